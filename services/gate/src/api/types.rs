//! API 常量与内部类型。

/// 终端高亮样式：重置。
pub(crate) const ANSI_RESET: &str = "\x1b[0m";
/// 终端高亮样式：粗体。
pub(crate) const ANSI_BOLD: &str = "\x1b[1m";
/// 终端高亮样式：青色。
pub(crate) const ANSI_CYAN: &str = "\x1b[36m";
/// 终端高亮样式：亮白。
pub(crate) const ANSI_WHITE: &str = "\x1b[97m";

/// Bearer 方案名（比较时忽略大小写）。
pub(crate) const BEARER_SCHEME: &str = "bearer";

/// 缺少 Authorization 头。
pub(crate) const MSG_MISSING_CREDENTIAL: &str = "Missing Authorization header";
pub(crate) const TIP_MISSING_CREDENTIAL: &str =
    "Include \"Authorization: Bearer <token>\" in your request headers";
/// Authorization 头格式错误。
pub(crate) const MSG_MALFORMED_CREDENTIAL: &str = "Invalid Authorization header format";
pub(crate) const TIP_MALFORMED_CREDENTIAL: &str = "Use format: \"Authorization: Bearer <token>\"";
/// token 签名无效或已过期。
pub(crate) const MSG_INVALID_TOKEN: &str = "Invalid or expired token";
pub(crate) const TIP_INVALID_TOKEN: &str = "Get a new token from /api/login endpoint";

/// 登录失败。
pub(crate) const MSG_BAD_LOGIN: &str = "Invalid username or password";
pub(crate) const TIP_BAD_LOGIN: &str = "Check your credentials and try again";
/// 登录请求体缺字段或无法解析。
pub(crate) const MSG_BAD_LOGIN_BODY: &str = "Username and password are required";
pub(crate) const TIP_BAD_LOGIN_BODY: &str =
    "Send JSON body: {\"username\": \"...\", \"password\": \"...\"}";

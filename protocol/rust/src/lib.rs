// 文件职责：
// 1) 定义 gate 服务与调用方共用的鉴权数据结构（claims、登录请求/响应）。
// 2) 提供 unix 秒与 RFC3339 时间戳等跨端一致的基础函数。
// 3) 作为 Rust 侧协议唯一代码源，供服务端与测试复用。

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// 签名 token 内嵌的 claims。
///
/// 字段名沿用 JWT 注册 claim（`iat` / `exp`，unix 秒），
/// 以便标准 JWT 工具直接解码。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    // 绑定的用户名。
    pub username: String,
    // 签发时间（unix 秒）；iat 在 JWT 中可选，缺省为 0。
    #[serde(default)]
    pub iat: i64,
    // 过期时间（unix 秒），`now >= exp` 即失效。
    pub exp: i64,
}

impl TokenClaims {
    /// 在 `now` 时刻 claims 是否已过期。
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }

    /// 剩余有效秒数，已过期返回 0。
    pub fn remaining_sec_at(&self, now: i64) -> i64 {
        self.exp.saturating_sub(now).max(0)
    }
}

/// 登录请求体。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// 登录成功返回数据。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    // 签名 token，调用方以 `Authorization: Bearer <token>` 回传。
    pub token: String,
    pub username: String,
    pub expires_in_minutes: i64,
    // 过期时间（RFC3339）。
    pub expires_at: String,
}

/// 受保护接口回显的用户信息。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

impl From<&TokenClaims> for UserData {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            username: claims.username.clone(),
            iat: claims.iat,
            exp: claims.exp,
        }
    }
}

/// 当前 unix 秒。
pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}

/// unix 秒转 RFC3339；超出 chrono 可表示范围时返回空串。
pub fn unix_to_rfc3339(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{LoginData, TokenClaims, unix_to_rfc3339};

    #[test]
    fn claims_expire_at_exact_boundary() {
        let claims = TokenClaims {
            username: "admin".to_string(),
            iat: 100,
            exp: 160,
        };
        assert!(!claims.is_expired_at(159));
        assert!(claims.is_expired_at(160));
        assert_eq!(claims.remaining_sec_at(130), 30);
        assert_eq!(claims.remaining_sec_at(500), 0);
    }

    #[test]
    fn claims_without_iat_decode() {
        let claims: TokenClaims =
            serde_json::from_str(r#"{"username":"admin","exp":1700003600}"#).expect("decode");
        assert_eq!(claims.iat, 0);
        assert_eq!(claims.exp, 1_700_003_600);
    }

    #[test]
    fn login_data_uses_camel_case_fields() {
        let data = LoginData {
            token: "t".to_string(),
            username: "admin".to_string(),
            expires_in_minutes: 60,
            expires_at: unix_to_rfc3339(0),
        };
        let value = serde_json::to_value(&data).expect("encode login data");
        assert_eq!(value["expiresInMinutes"], 60);
        assert_eq!(value["expiresAt"], "1970-01-01T00:00:00Z");
    }
}

//! 启动信息高亮输出。

use crate::{
    api::types::{ANSI_BOLD, ANSI_CYAN, ANSI_RESET, ANSI_WHITE},
    auth::credentials::CredentialStore,
    config::{AppConfig, SecretSource},
};

/// 监听成功后打印启动区块：端口、静态页、登录入口与演示账号。
pub(crate) fn print_startup_banner(config: &AppConfig, credentials: &CredentialStore) {
    println!(
        "{cyan}{bold}\n╔══════════════════════════════════════════════════════════════╗\n\
         ║                  🔐 Authentication Test App                  ║\n\
         ╚══════════════════════════════════════════════════════════════╝{reset}",
        cyan = ANSI_CYAN,
        bold = ANSI_BOLD,
        reset = ANSI_RESET
    );
    for (label, value) in banner_lines(config, credentials) {
        println!(
            "{white}{bold}{label}:{reset} {value}",
            white = ANSI_WHITE,
            bold = ANSI_BOLD,
            reset = ANSI_RESET,
        );
    }
    println!();
}

/// banner 各行内容（标签, 值）。
fn banner_lines(config: &AppConfig, credentials: &CredentialStore) -> Vec<(&'static str, String)> {
    let secret_note = match config.secret_source {
        SecretSource::Env => "AUTH_SECRET_KEY".to_string(),
        SecretSource::Generated => "random (set AUTH_SECRET_KEY to keep tokens across restarts)".to_string(),
    };
    vec![
        ("Port", config.port.to_string()),
        ("Static page", config.index_path().display().to_string()),
        ("Login", "POST /api/login".to_string()),
        ("Protected", "GET /api/me, GET /api/verify".to_string()),
        ("Token TTL", format!("{} min", config.token_ttl_min)),
        ("Signing key", secret_note),
        ("Demo users", credentials.usernames().join(", ")),
    ]
}

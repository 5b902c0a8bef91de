//! 运行配置：从环境变量一次性解析监听地址、签名密钥、token TTL 与静态目录。

use std::path::PathBuf;

use anyhow::{Context, bail};

/// 默认监听端口。
pub(crate) const DEFAULT_PORT: u16 = 5050;
/// 默认监听地址。
pub(crate) const DEFAULT_HOST: &str = "0.0.0.0";
/// 登录签发 token 的默认有效期（分钟）。
pub(crate) const DEFAULT_TOKEN_TTL_MIN: i64 = 60;
/// 默认静态目录（相对当前工作目录）。
pub(crate) const DEFAULT_STATIC_DIR: &str = ".";

/// 签名密钥来源。
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum SecretSource {
    /// 来自 `AUTH_SECRET_KEY`。
    Env,
    /// 未配置，进程启动时随机生成，重启后旧 token 全部失效。
    Generated,
}

impl SecretSource {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Env => "env",
            Self::Generated => "generated",
        }
    }
}

/// Gate 运行配置。
#[derive(Clone)]
pub(crate) struct AppConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) secret: String,
    pub(crate) secret_source: SecretSource,
    pub(crate) token_ttl_min: i64,
    pub(crate) static_dir: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    // 密钥不进日志。
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secret", &"<redacted>")
            .field("secret_source", &self.secret_source)
            .field("token_ttl_min", &self.token_ttl_min)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

impl AppConfig {
    /// 从进程环境变量解析配置。
    pub(crate) fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意 key 查询函数解析配置，便于测试注入。
    pub(crate) fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = read("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match read("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("invalid PORT: {raw}"))?,
            None => DEFAULT_PORT,
        };
        let token_ttl_min = match read("AUTH_TOKEN_TTL_MIN") {
            Some(raw) => raw
                .parse::<i64>()
                .with_context(|| format!("invalid AUTH_TOKEN_TTL_MIN: {raw}"))?,
            None => DEFAULT_TOKEN_TTL_MIN,
        };
        if token_ttl_min <= 0 {
            bail!("invalid AUTH_TOKEN_TTL_MIN: {token_ttl_min}, must be > 0");
        }
        let static_dir = PathBuf::from(
            read("AUTH_STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        );
        // 密钥原样使用，仅全空白视为未配置。
        let (secret, secret_source) = match lookup("AUTH_SECRET_KEY")
            .filter(|v| !v.trim().is_empty())
        {
            Some(secret) => (secret, SecretSource::Env),
            None => (generate_secret(), SecretSource::Generated),
        };

        Ok(Self {
            host,
            port,
            secret,
            secret_source,
            token_ttl_min,
            static_dir,
        })
    }

    /// 监听地址（`host:port`，host 可为主机名）。
    pub(crate) fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 静态首页路径。
    pub(crate) fn index_path(&self) -> PathBuf {
        self.static_dir.join("index.html")
    }
}

/// 生成进程级随机签名密钥。
pub(crate) fn generate_secret() -> String {
    format!(
        "tg_sk_{}{}",
        uuid::Uuid::new_v4().simple(),
        uuid::Uuid::new_v4().simple()
    )
}

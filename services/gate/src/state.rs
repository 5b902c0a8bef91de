//! Gate 共享状态：签名服务、凭证表与运行配置，启动后只读。

use std::sync::Arc;

use crate::{
    auth::{credentials::CredentialStore, token::TokenService},
    config::AppConfig,
};

/// Gate 共享状态。
#[derive(Clone)]
pub(crate) struct AppState {
    /// token 签发/校验服务。
    pub(crate) tokens: Arc<TokenService>,
    /// 固定凭证表。
    pub(crate) credentials: Arc<CredentialStore>,
    /// 运行配置。
    pub(crate) config: Arc<AppConfig>,
}

impl AppState {
    /// 由配置与凭证表装配状态，签名密钥取自配置。
    pub(crate) fn new(config: AppConfig, credentials: CredentialStore) -> Self {
        Self {
            tokens: Arc::new(TokenService::new(config.secret.clone())),
            credentials: Arc::new(credentials),
            config: Arc::new(config),
        }
    }
}

//! 鉴权模块：固定凭证表、token 签发/校验与请求守卫。
//!
//! 调用顺序约定：先 [`credentials::CredentialStore::authenticate`]，
//! 成功后再 [`token::TokenService::issue`]。两者刻意保持解耦，
//! 签发本身不校验用户是否存在，顺序由调用方（登录接口）保证。

pub(crate) mod credentials;
pub(crate) mod guard;
pub(crate) mod handlers;
pub(crate) mod token;
pub(crate) mod token_crypto;

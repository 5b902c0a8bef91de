//! 请求守卫：校验 `Authorization: Bearer <token>` 后再放行到被包裹的处理函数。
//!
//! 判定顺序：头存在 → 格式正确 → 签名有效 → 未过期 → 放行，
//! 任一步失败即短路返回 401，被包裹的处理函数不会执行。

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::MethodRouter,
};
use tg_shared_protocol::TokenClaims;
use thiserror::Error;
use tracing::debug;

use crate::{
    api::{
        error::ApiError,
        types::{
            BEARER_SCHEME, MSG_INVALID_TOKEN, MSG_MALFORMED_CREDENTIAL, MSG_MISSING_CREDENTIAL,
            TIP_INVALID_TOKEN, TIP_MALFORMED_CREDENTIAL, TIP_MISSING_CREDENTIAL,
        },
    },
    auth::{
        token::{TokenError, TokenService},
        token_crypto::fingerprint,
    },
    state::AppState,
};

/// 守卫拒绝原因。
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub(crate) enum GuardRejection {
    #[error("authorization header is missing")]
    MissingCredential,
    #[error("authorization header is not `Bearer <token>`")]
    MalformedCredential,
    #[error("bearer token rejected: {0}")]
    InvalidOrExpiredToken(TokenError),
}

impl GuardRejection {
    /// 日志用短标签。
    pub(crate) fn reason(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::MalformedCredential => "malformed_credential",
            Self::InvalidOrExpiredToken(TokenError::BadSignature) => "bad_signature",
            Self::InvalidOrExpiredToken(TokenError::Expired) => "expired",
        }
    }

    pub(crate) fn message(&self) -> &'static str {
        match self {
            Self::MissingCredential => MSG_MISSING_CREDENTIAL,
            Self::MalformedCredential => MSG_MALFORMED_CREDENTIAL,
            Self::InvalidOrExpiredToken(_) => MSG_INVALID_TOKEN,
        }
    }

    pub(crate) fn tip(&self) -> &'static str {
        match self {
            Self::MissingCredential => TIP_MISSING_CREDENTIAL,
            Self::MalformedCredential => TIP_MALFORMED_CREDENTIAL,
            Self::InvalidOrExpiredToken(_) => TIP_INVALID_TOKEN,
        }
    }
}

impl From<GuardRejection> for ApiError {
    fn from(rejection: GuardRejection) -> Self {
        ApiError::unauthorized(rejection.message(), rejection.tip())
    }
}

/// 从请求头提取 bearer token。
///
/// 空头值视为缺失；值必须恰好两段（按空白切分），首段忽略大小写等于 `bearer`。
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<&str, GuardRejection> {
    let Some(raw) = headers.get(AUTHORIZATION) else {
        return Err(GuardRejection::MissingCredential);
    };
    if raw.is_empty() {
        return Err(GuardRejection::MissingCredential);
    }
    let value = raw
        .to_str()
        .map_err(|_| GuardRejection::MalformedCredential)?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => {
            Ok(token)
        }
        _ => Err(GuardRejection::MalformedCredential),
    }
}

/// 对单个请求做完整判定，成功返回 claims。
pub(crate) fn authorize(
    tokens: &TokenService,
    headers: &HeaderMap,
) -> Result<TokenClaims, GuardRejection> {
    let token = bearer_token(headers)?;
    tokens.verify(token).map_err(|err| {
        debug!(token = %fingerprint(token), "verify bearer token failed: {err}");
        GuardRejection::InvalidOrExpiredToken(err)
    })
}

/// 守卫中间件：通过后把 claims 写入请求扩展，下游用 `Extension<TokenClaims>` 读取。
pub(crate) async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    match authorize(&state.tokens, req.headers()) {
        Ok(claims) => {
            debug!(username = %claims.username, path = %req.uri().path(), "request authorized");
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(rejection) => {
            debug!(
                reason = rejection.reason(),
                path = %req.uri().path(),
                "request rejected"
            );
            ApiError::from(rejection).into_response()
        }
    }
}

/// 包裹受保护路由：传入处理函数，返回先过守卫再执行的新处理函数。
pub(crate) fn protect(state: &AppState, route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

//! 鉴权 HTTP 路由处理函数。

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Serialize;
use tg_shared_protocol::{
    LoginData, LoginRequest, TokenClaims, UserData, now_unix, unix_to_rfc3339,
};
use tracing::{error, info, warn};

use crate::{
    api::{
        error::ApiError,
        response::{ApiEnvelope, ok_response},
        types::{MSG_BAD_LOGIN, MSG_BAD_LOGIN_BODY, TIP_BAD_LOGIN, TIP_BAD_LOGIN_BODY},
    },
    auth::token_crypto::fingerprint,
    state::AppState,
};

/// `/api/me` 返回数据。
#[derive(Debug, Serialize)]
pub(crate) struct MeData {
    pub(crate) user: UserData,
}

/// `/api/verify` 返回数据。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyData {
    pub(crate) valid: bool,
    pub(crate) user: UserData,
    pub(crate) expires_in_sec: i64,
}

/// 登录接口：先校验凭证表，成功后签发 token。
pub(crate) async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiEnvelope<LoginData>>), ApiError> {
    let Json(req) = payload.map_err(|err| {
        warn!("login body rejected: {err}");
        ApiError::new(StatusCode::BAD_REQUEST, MSG_BAD_LOGIN_BODY, TIP_BAD_LOGIN_BODY)
    })?;
    // 用户名原样参与比对与签发，不做 trim。
    let username = req.username.as_str();
    if username.is_empty() || req.password.is_empty() {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            MSG_BAD_LOGIN_BODY,
            TIP_BAD_LOGIN_BODY,
        ));
    }

    if !state.credentials.authenticate(username, &req.password) {
        warn!(username = %username, "login failed");
        return Err(ApiError::unauthorized(MSG_BAD_LOGIN, TIP_BAD_LOGIN));
    }

    let ttl_min = state.config.token_ttl_min;
    let issued = state.tokens.issue(username, ttl_min).map_err(|err| {
        error!("issue token failed: {err}");
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to issue token",
            "Please try again later",
        )
    })?;
    info!(username = %username, token = %fingerprint(&issued.token), "login succeeded");

    Ok(ok_response(
        StatusCode::OK,
        "Login successful",
        Some(LoginData {
            token: issued.token,
            username: username.to_string(),
            expires_in_minutes: ttl_min,
            expires_at: unix_to_rfc3339(issued.claims.exp),
        }),
    ))
}

/// 当前用户接口（受保护）。
pub(crate) async fn me_handler(
    Extension(claims): Extension<TokenClaims>,
) -> (StatusCode, Json<ApiEnvelope<MeData>>) {
    ok_response(
        StatusCode::OK,
        format!("Hello, {}", claims.username),
        Some(MeData {
            user: UserData::from(&claims),
        }),
    )
}

/// token 校验接口（受保护）：能进入此处即代表 token 有效。
pub(crate) async fn verify_handler(
    Extension(claims): Extension<TokenClaims>,
) -> (StatusCode, Json<ApiEnvelope<VerifyData>>) {
    ok_response(
        StatusCode::OK,
        "Token is valid",
        Some(VerifyData {
            valid: true,
            user: UserData::from(&claims),
            expires_in_sec: claims.remaining_sec_at(now_unix()),
        }),
    )
}

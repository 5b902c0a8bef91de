//! API 错误定义与响应转换。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use super::response::ApiEnvelope;

/// 认证与接口错误，对外渲染为 `{ success: false, message, tip }`。
#[derive(Debug)]
pub(crate) struct ApiError {
    pub(crate) status: StatusCode,
    pub(crate) message: String,
    pub(crate) tip: &'static str,
}

impl ApiError {
    /// 构造统一 API 错误。
    pub(crate) fn new(status: StatusCode, message: impl Into<String>, tip: &'static str) -> Self {
        Self {
            status,
            message: message.into(),
            tip,
        }
    }

    /// 401 快捷构造。
    pub(crate) fn unauthorized(message: impl Into<String>, tip: &'static str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message, tip)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ApiEnvelope::<Value> {
                success: false,
                message: self.message,
                tip: Some(self.tip.to_string()),
                data: None,
            }),
        )
            .into_response()
    }
}

//! API 响应包裹。

use axum::{Json, http::StatusCode};
use serde::Serialize;

/// 通用 API 成功/失败包裹结构。
///
/// `data` 平铺到顶层，成功体形如 `{ success, message, token, ... }`。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiEnvelope<T>
where
    T: Serialize,
{
    pub(crate) success: bool,
    pub(crate) message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) tip: Option<String>,
    #[serde(flatten)]
    pub(crate) data: Option<T>,
}

/// 构造成功响应。
pub(crate) fn ok_response<T: Serialize>(
    status: StatusCode,
    message: impl Into<String>,
    data: Option<T>,
) -> (StatusCode, Json<ApiEnvelope<T>>) {
    (
        status,
        Json(ApiEnvelope {
            success: true,
            message: message.into(),
            tip: None,
            data,
        }),
    )
}

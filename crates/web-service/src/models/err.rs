use crate::models::common::ErrorReply;
use crate::upload::UploadError;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use database::DatabaseError;
use shared_lib::AppConfig;
use std::any::Any;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// 使用 [`thiserror`] 定义错误类型
/// 方便根据类型转换为相应的http错误码
#[derive(Error, Debug)]
pub enum AppError {
    /// 数据验证错误，这种错误通常都是用户参数不正确导致的，所以需要转换为400
    #[error(transparent)]
    ValidationFailed(#[from] ValidationErrors),

    /// 上传表单错误
    #[error(transparent)]
    UploadFailed(#[from] UploadError),

    /// 仓库层数据库错误
    #[error(transparent)]
    RepositoryError(#[from] DatabaseError),
}

/// handler 返回值类型
pub type AppResult<T> = Result<T, AppError>;

/// 500 错误的内部详情
///
/// 放在响应的 extensions 中，只有 development 环境下才会被 [`expose_error_details`] 写回响应体
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

/// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            AppError::UploadFailed(UploadError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::UploadFailed(_) => StatusCode::BAD_REQUEST,
            AppError::RepositoryError(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::RepositoryError(DatabaseError::ValidationError(_)) => StatusCode::BAD_REQUEST,
            AppError::RepositoryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status != StatusCode::INTERNAL_SERVER_ERROR {
            return (status, Json(ErrorReply::new(self.to_string()))).into_response();
        }

        error!("❌ 请求处理失败: {self}");
        internal_error_response(self.to_string())
    }
}

/// 构建脱敏后的 500 响应，原始错误放在 [`ErrorDetail`] 中
fn internal_error_response(detail: String) -> Response {
    let mut response = (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorReply::internal(None))).into_response();
    response.extensions_mut().insert(ErrorDetail(detail));
    response
}

/// handler 发生 panic 时的兜底响应，配合 `CatchPanicLayer::custom` 使用
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!("💥 请求处理发生 panic: {detail}");
    internal_error_response(detail)
}

/// development 环境下把 [`ErrorDetail`] 写回 500 响应体的 `error` 字段
pub async fn expose_error_details(State(config): State<Arc<AppConfig>>, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let Some(ErrorDetail(detail)) = response.extensions_mut().remove::<ErrorDetail>() else {
        return response;
    };

    if !config.environment.is_development() {
        return response;
    }

    (response.status(), Json(ErrorReply::internal(Some(detail)))).into_response()
}

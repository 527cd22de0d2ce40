//! 路由入口
//!
//! 提供 [`create_app_router`] 函数，导出当前App的所有路由。
//!
//! 用户可以在导出路由时传入共享数据 shared_state，这样所有路由函数都可以访问。

use crate::models::err::{expose_error_details, handle_panic};
use crate::routes::health::{__path_health_check, health_check};
use crate::routes::projects::{__path_database_diagnostics, __path_get_project, __path_list_projects, __path_upload_project};
use crate::routes::projects::{database_diagnostics, get_project, list_projects, upload_project};
use crate::upload::MediaField;
use crate::AppState;
use axum::extract::DefaultBodyLimit;
use axum::{middleware, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_scalar::{Scalar, Servable};

pub mod health;
pub mod projects;

/// multipart 表单中文本字段预留的空间
const FORM_FIELDS_OVERHEAD: usize = 1024 * 1024;

/// 上传请求体的总大小上限：所有文件都达到单文件上限，再加上文本字段
pub fn upload_body_limit(max_file_size: usize) -> usize {
    let max_files = MediaField::Photos.max_count() + MediaField::Video.max_count();
    max_file_size.saturating_mul(max_files).saturating_add(FORM_FIELDS_OVERHEAD)
}

/// 导出当前App的所有接口路由
///
/// ## **❗️注意事项：**
///
/// 由于 [`routes!`] 宏限制，在同一个宏里面不能同时定义多个相同类型的http接口，
/// 所以这里每个接口单独调用一次 `.routes()`。
///
/// `/projects/upload` 和 `/projects/{id}` 可以共存，静态路径优先匹配。
fn routers(state: AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_projects))
        .routes(routes!(get_project))
        .routes(routes!(upload_project))
        .routes(routes!(database_diagnostics))
        .routes(routes!(health_check))
        .with_state(state)
}

/// 创建当前App的路由
///
/// 完成以下功能：
/// - 生成OpenAPI文档，使用Scalar作为在线文档格式（`/docs`）
/// - 生成App接口路由
/// - `/uploads` 提供上传文件的静态访问，其余未匹配的路径由前端静态目录处理
/// - 统一的 panic 兜底、500 错误详情控制、请求日志
///
/// 由于使用了 `utoipa` 库来自动化生成`openapi`文档，因此我们没有使用原生的 [`Router`]，而是使用了
/// [`OpenApiRouter`] 。
pub fn create_app_router(shared_state: AppState) -> Router {
    // 当前项目的OpenAPI声明
    #[derive(OpenApi)]
    #[openapi(
        tags(
            (name = "projects", description = "创新项目的上传、列表、详情和数据库诊断"),
            (name = "health", description = "健康检查")
        ),
    )]
    struct ApiDoc;

    let config = shared_state.config.clone();

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(routers(shared_state))
        .split_for_parts();

    // 合并文档路由，用户可通过 /docs 访问文档网页地址
    router
        .merge(Scalar::with_url("/docs", api))
        .nest_service("/uploads", ServeDir::new(&config.upload_dir))
        .fallback_service(ServeDir::new(&config.public_dir))
        .layer(DefaultBodyLimit::max(upload_body_limit(config.max_upload_file_size)))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(config, expose_error_details))
        .layer(TraceLayer::new_for_http())
}

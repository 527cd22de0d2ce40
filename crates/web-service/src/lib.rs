//! Web服务模块
//!
//! 提供 HTTP API 接口、文件上传处理、前端静态页面和文档服务

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use database::{DatabasePool, ProjectRepository, ProjectRepositoryTrait};
use services::{ProjectService, ProjectServiceTrait};
use shared_lib::AppConfig;
use std::sync::Arc;
use tokio::sync::watch::Receiver;
use tracing::info;
use upload::FileStore;

pub mod models;
pub mod routes;
pub mod services;
pub mod upload;

/// 应用共享状态
///
/// 每个请求都会 clone 一份，内部都是 [`Arc`]，开销很小
#[derive(Clone)]
pub struct AppState {
    pub project_service: Arc<dyn ProjectServiceTrait>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// 使用任意的项目仓库实现组装共享状态
    pub fn new<PR: ProjectRepositoryTrait>(project_repository: Arc<PR>, config: Arc<AppConfig>) -> Self {
        let file_store = FileStore::new(&config.upload_dir);
        Self {
            project_service: Arc::new(ProjectService::new(project_repository, file_store)),
            config,
        }
    }
}

/// 启动 Web 服务
///
/// 收到 `shutdown_rx` 的关闭信号后停止接收新请求，等待正在处理的请求完成后返回
pub async fn start_web_service(
    pool: DatabasePool,
    config: Arc<AppConfig>,
    mut shutdown_rx: Receiver<bool>,
) -> Result<()> {
    FileStore::new(&config.upload_dir)
        .prepare()
        .await
        .wrap_err_with(|| format!("创建上传目录 {} 失败", config.upload_dir.display()))?;

    let shared_state = AppState::new(Arc::new(ProjectRepository::new(pool)), config.clone());

    let router = routes::create_app_router(shared_state);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    info!("🚀 启动 Web Service 在 {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .wrap_err_with(|| format!("监听 {bind_addr} 失败"))?;

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            // 发送端被drop也视为关闭信号
            let _ = shutdown_rx.changed().await;
            info!("🛑 Web Service 正在关闭...");
        })
        .await?;

    Ok(())
}

//! 创新项目展示市场服务入口
//!
//! 启动顺序：加载配置 -> 初始化日志 -> 连接数据库并执行迁移 -> 启动 Web 服务。
//! 数据库连接失败直接退出进程；收到 Ctrl-C 后优雅关闭 Web 服务并释放连接池。

use color_eyre::eyre::WrapErr;
use color_eyre::{Result, Section};
use database::initialize_database;
use shared_lib::AppConfig;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // 初始化日志，默认 info 级别，可通过 RUST_LOG 调整
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load()?;
    info!("🔧 配置加载完成，运行环境: {:?}", config.environment);

    info!("🔌 正在连接数据库...");
    let pool = initialize_database(config.clone())
        .await
        .wrap_err("初始化数据库失败")
        .suggestion("检查 DATABASE_URL 是否正确以及数据库是否可以访问")?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let web_service = tokio::spawn(web_service::start_web_service(pool.clone(), config.clone(), shutdown_rx));

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.wrap_err("监听退出信号失败")?;
            info!("📴 收到退出信号");
            // Web 服务已经退出时发送会失败，忽略即可
            let _ = shutdown_tx.send(true);
        }
        _ = shutdown_tx.closed() => {}
    }

    let outcome = web_service.await.wrap_err("Web Service 任务异常退出")?;

    pool.close().await;
    info!("👋 数据库连接池已关闭，服务退出");

    // 出错时由 color-eyre 统一输出报告
    outcome.wrap_err("Web Service 运行失败")
}

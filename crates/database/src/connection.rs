use crate::{DatabaseError, DatabaseResult};
use shared_lib::AppConfig;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Pool, Postgres};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// 数据库连接池
pub type DatabasePool = Pool<Postgres>;

/// 市场的读写都很轻，少量常驻连接就够用
const MIN_CONNECTIONS: u32 = 2;
const MAX_CONNECTIONS: u32 = 20;
/// 上传请求等待连接的上限，超时按数据库错误返回 500
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);
const IDLE_TIMEOUT: Duration = Duration::from_secs(3600);
const MAX_LIFETIME: Duration = Duration::from_secs(3600 * 6);

/// 连接项目库并执行 `migrations/` 下的迁移
///
/// 进程启动时调用一次，失败时由调用方直接退出进程；
/// 退出时调用 [`Pool::close`] 释放连接。
pub async fn initialize_database(config: Arc<AppConfig>) -> DatabaseResult<DatabasePool> {
    let options = PgConnectOptions::from_str(&config.postgresql_conn_str)
        .map_err(|e| DatabaseError::connection(format!("DATABASE_URL 格式不正确: {e}")))?;

    // 日志里只输出地址和库名，不带密码
    let target = format!(
        "{}:{}/{}",
        options.get_host(),
        options.get_port(),
        options.get_database().unwrap_or("<default>")
    );
    info!("🔌 连接项目库 {target}");

    let pool = PgPoolOptions::new()
        .min_connections(MIN_CONNECTIONS)
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .test_before_acquire(true)
        .connect_with(options)
        .await
        .map_err(|e| {
            warn!("⚠️ 项目库 {target} 无法连接");
            DatabaseError::connection(format!("连接 {target} 失败: {e}"))
        })?;

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .map_err(|e| DatabaseError::migration(format!("projects 表迁移失败: {e}")))?;

    info!("✅ 项目库就绪: {target}");
    Ok(pool)
}

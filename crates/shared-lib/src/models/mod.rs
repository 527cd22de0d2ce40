pub mod config;

// 重新导出具体的类型
pub use config::{AppConfig, AppEnvironment, DEFAULT_MAX_UPLOAD_FILE_SIZE, DEFAULT_PORT};

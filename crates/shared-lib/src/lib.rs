//! 🔧 共享库模块
//!
//! 这个模块包含了在多个服务之间共享的通用代码，目前主要是程序配置：
//! - 数据库连接字符串
//! - Web 服务端口
//! - 上传文件存储目录与大小限制

pub mod models;

// 重新导出常用类型
pub use models::{AppConfig, AppEnvironment, DEFAULT_MAX_UPLOAD_FILE_SIZE, DEFAULT_PORT};

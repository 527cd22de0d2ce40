use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::{Result, Section};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// 默认监听端口
pub const DEFAULT_PORT: u16 = 3001;

/// 单个上传文件的默认大小上限（10 MiB）
pub const DEFAULT_MAX_UPLOAD_FILE_SIZE: usize = 10 * 1024 * 1024;

/// 运行环境
///
/// 只有 `development` 环境下才会在 500 错误响应中暴露内部错误详情
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnvironment {
    Development,
    #[default]
    Production,
}

impl AppEnvironment {
    pub fn is_development(&self) -> bool {
        matches!(self, AppEnvironment::Development)
    }
}

impl FromStr for AppEnvironment {
    type Err = color_eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(AppEnvironment::Development),
            "production" | "prod" => Ok(AppEnvironment::Production),
            other => Err(eyre!("未知的运行环境: {other}")),
        }
    }
}

/// 程序配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// postgresql数据库链接字符串
    pub postgresql_conn_str: String,

    /// Web 服务监听端口
    ///
    /// 可通过环境变量 `PORT` 来调整
    pub port: u16,

    /// 运行环境，通过 `APP_ENV` 设置
    pub environment: AppEnvironment,

    /// 上传文件存放目录，会以 `/uploads` 路径对外提供静态访问
    pub upload_dir: PathBuf,

    /// 前端静态页面目录
    pub public_dir: PathBuf,

    /// 单个上传文件的大小上限（字节）
    ///
    /// 图片和视频共用同一个上限，可通过环境变量 `MAX_UPLOAD_FILE_SIZE` 来调整
    pub max_upload_file_size: usize,
}

impl AppConfig {
    pub fn load() -> Result<Arc<AppConfig>> {
        // 加载.env文件中的数据注入到环境变量中，方便本地测试
        // 线上环境部署时会直接使用环境变量，不需要.env文件
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        Ok(Arc::new(config))
    }

    /// 根据给定的查找函数构建配置
    ///
    /// [`AppConfig::load`] 传入的是环境变量读取函数，测试时可以传入任意的键值来源。
    pub fn from_lookup<F>(lookup: F) -> Result<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 读取数据库地址信息（仅支持postgresql）
        let db_url = lookup("DATABASE_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| eyre!("DATABASE_URL is empty"))
            .wrap_err("Can not load DATABASE_URL in environment")
            .suggestion("设置 DATABASE_URL 环境变量")?;

        let environment = match lookup("APP_ENV") {
            Some(value) => value
                .parse::<AppEnvironment>()
                .wrap_err("Can not parse APP_ENV")
                .suggestion("APP_ENV 只支持 development / production")?,
            None => AppEnvironment::default(),
        };

        Ok(AppConfig {
            postgresql_conn_str: db_url,
            port: lookup("PORT").map_or(DEFAULT_PORT, |s| s.parse().unwrap_or(DEFAULT_PORT)),
            environment,
            upload_dir: lookup("UPLOAD_DIR").map_or_else(|| PathBuf::from("uploads"), PathBuf::from),
            public_dir: lookup("PUBLIC_DIR").map_or_else(|| PathBuf::from("public"), PathBuf::from),
            max_upload_file_size: lookup("MAX_UPLOAD_FILE_SIZE")
                .map_or(DEFAULT_MAX_UPLOAD_FILE_SIZE, |s| s.parse().unwrap_or(DEFAULT_MAX_UPLOAD_FILE_SIZE)),
        })
    }
}

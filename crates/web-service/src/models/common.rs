//! 通用响应信封
//!
//! 所有接口统一返回 `{ success, message?, ...payload }` 结构的 json

use crate::models::projects::{DatabaseReport, ProjectInfo};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// 失败时返回的信封
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorReply {
    #[schema(example = false)]
    pub success: bool,

    #[schema(example = "Please fill all required fields")]
    pub message: String,

    /// 500 错误的详情，非 development 环境固定为 `Internal server error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorReply {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: None,
        }
    }

    /// 内部错误，`detail` 为 `None` 时使用脱敏后的描述
    pub fn internal(detail: Option<String>) -> Self {
        Self {
            success: false,
            message: "Something went wrong!".to_string(),
            error: Some(detail.unwrap_or_else(|| "Internal server error".to_string())),
        }
    }
}

/// 项目列表
#[derive(Serialize, Debug, ToSchema)]
pub struct ProjectListReply {
    #[schema(example = true)]
    pub success: bool,

    #[schema(example = 3)]
    /// 项目总数
    pub count: usize,

    /// 按创建时间倒序
    pub projects: Vec<ProjectInfo>,
}

/// 单个项目
#[derive(Serialize, Debug, ToSchema)]
pub struct ProjectReply {
    #[schema(example = true)]
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Project uploaded successfully")]
    pub message: Option<String>,

    pub project: ProjectInfo,
}

/// 数据库诊断
#[derive(Serialize, Debug, ToSchema)]
pub struct DatabaseReply {
    #[schema(example = true)]
    pub success: bool,

    pub database: DatabaseReport,
}

/// 健康检查
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthReply {
    #[schema(example = "healthy")]
    pub status: String,

    pub timestamp: DateTime<Utc>,

    /// 数据库连接状态：connected / disconnected / closed
    ///
    /// 对外的字段名固定为 `mongoStatus`，与实际使用的数据库无关
    #[schema(example = "connected")]
    #[serde(rename = "mongoStatus")]
    pub database_status: String,
}

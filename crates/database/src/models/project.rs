//! 项目数据库模型
//!
//! 定义项目相关的数据库模型结构体，以及写入前的数据校验规则。
//!
//! 校验规则通过 [`validator`] 声明在 [`ProjectCreate`] 上，和具体的 SQL 实现无关：
//! 服务层在写文件之前、仓库层在插入之前都会调用一次。

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// 单个项目最多允许的图片数量
pub const MAX_PROJECT_PHOTOS: usize = 5;

/// 项目类型
///
/// 对应数据库中的 `project_type` 枚举类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "project_type", rename_all = "lowercase")]
pub enum ProjectType {
    Tech,
    Art,
    Design,
    Other,
}

impl ProjectType {
    /// 所有合法的项目类型
    pub const ALL: [ProjectType; 4] = [ProjectType::Tech, ProjectType::Art, ProjectType::Design, ProjectType::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Tech => "tech",
            ProjectType::Art => "art",
            ProjectType::Design => "design",
            ProjectType::Other => "other",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("type must be one of tech, art, design, other (got '{s}')"))
    }
}

/// 项目信息结构体
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ProjectInfo {
    pub id: Uuid,
    pub name: String,
    pub project_type: ProjectType,
    pub description: String,
    /// 图片访问路径，保持上传时的顺序
    pub project_photos: Vec<String>,
    pub project_video: Option<String>,
    pub innovator_name: String,
    pub innovator_contact: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 诊断接口使用的项目摘要
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ProjectSummary {
    pub id: Uuid,
    pub name: String,
    pub project_type: ProjectType,
    pub created_at: DateTime<Utc>,
}

impl From<&ProjectInfo> for ProjectSummary {
    fn from(project: &ProjectInfo) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            project_type: project.project_type,
            created_at: project.created_at,
        }
    }
}

/// 项目创建参数
///
/// `id` / `created_at` 由数据库生成，这里不包含
#[derive(Debug, Clone, Validate)]
pub struct ProjectCreate {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    pub project_type: ProjectType,

    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,

    #[validate(length(min = 1, max = 5, message = "a project needs between 1 and 5 photos"))]
    pub project_photos: Vec<String>,

    pub project_video: Option<String>,

    #[validate(length(min = 1, message = "innovatorName is required"))]
    pub innovator_name: String,

    #[validate(length(min = 1, message = "innovatorContact is required"))]
    pub innovator_contact: String,

    #[validate(custom(function = "validate_price"))]
    pub price: f64,
}

/// 价格必须是有限的非负数
fn validate_price(price: f64) -> Result<(), ValidationError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("price").with_message("price must be a non-negative number".into()))
    }
}

/// 数据库连接状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseStatus {
    Connected,
    Disconnected,
    /// 连接池已经关闭（进程正在退出）
    Closed,
}

impl DatabaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseStatus::Connected => "connected",
            DatabaseStatus::Disconnected => "disconnected",
            DatabaseStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for DatabaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 连接目标信息，仅用于诊断展示
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionInfo {
    pub database_name: Option<String>,
    pub host: String,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// 对外返回的项目信息
#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    /// 项目ID
    pub id: Uuid,

    #[schema(example = "Solar Lamp")]
    pub name: String,

    #[serde(rename = "type")]
    #[schema(example = "tech")]
    /// 项目类型：tech / art / design / other
    pub project_type: String,

    pub description: String,

    #[schema(example = json!(["/uploads/projectPhotos-1736150400000-482913467.png"]))]
    /// 图片访问路径，保持上传顺序
    pub project_photos: Vec<String>,

    /// 视频访问路径，没有视频时为 `null`
    pub project_video: Option<String>,

    #[schema(example = "A. Innovator")]
    pub innovator_name: String,

    #[schema(example = "a@x.com")]
    pub innovator_contact: String,

    #[schema(example = 49.99)]
    pub price: f64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl From<database::ProjectInfo> for ProjectInfo {
    fn from(project: database::ProjectInfo) -> Self {
        Self {
            id: project.id,
            name: project.name,
            project_type: project.project_type.to_string(),
            description: project.description,
            project_photos: project.project_photos,
            project_video: project.project_video,
            innovator_name: project.innovator_name,
            innovator_contact: project.innovator_contact,
            price: project.price,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

/// 诊断接口中的项目摘要
#[derive(Serialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub created_at: DateTime<Utc>,
}

impl From<database::ProjectSummary> for ProjectSummary {
    fn from(summary: database::ProjectSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            project_type: summary.project_type.to_string(),
            created_at: summary.created_at,
        }
    }
}

/// 数据库诊断信息
#[derive(Serialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseReport {
    #[schema(example = "connected")]
    pub status: String,

    #[schema(example = 12)]
    pub total_projects: i64,

    /// 最新的5个项目
    pub latest_projects: Vec<ProjectSummary>,

    pub database_name: Option<String>,

    pub host: String,
}

/// 上传项目的表单（`multipart/form-data`），仅用于生成 OpenAPI 文档
#[allow(dead_code)]
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadProjectForm {
    #[schema(example = "Solar Lamp")]
    name: String,

    #[serde(rename = "type")]
    #[schema(example = "tech")]
    project_type: String,

    description: String,

    #[schema(example = "A. Innovator")]
    innovator_name: String,

    #[schema(example = "a@x.com")]
    innovator_contact: String,

    #[schema(example = "49.99")]
    price: String,

    /// 1~5 张图片（jpg/jpeg/png/gif）
    project_photos: Vec<String>,

    /// 可选的视频（mp4/mov/avi）
    project_video: Option<String>,
}

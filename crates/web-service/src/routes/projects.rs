//! 项目相关接口
//!

use crate::models::common::{DatabaseReply, ErrorReply, ProjectListReply, ProjectReply};
use crate::models::err::AppError;
use crate::models::projects::{ProjectInfo, UploadProjectForm};
use crate::upload::ProjectUploadForm;
use crate::AppState;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

/// 查询全部项目
///
/// 按创建时间倒序返回全部项目，不分页。
#[utoipa::path(get,
    path = "/projects",
    tag = "projects",
    responses(
        (status = 200, description = "All projects, newest first", body = ProjectListReply),
        (status = 500, description = "Database error", body = ErrorReply)
    ),
)]
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<ProjectListReply>, AppError> {
    debug!("🔍 查询项目列表");

    let projects: Vec<ProjectInfo> = state
        .project_service
        .list_projects()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(ProjectListReply {
        success: true,
        count: projects.len(),
        projects,
    }))
}

/// 查询指定项目信息
///
/// ID 格式不正确和 ID 不存在都返回 404。
#[utoipa::path(get,
    path = "/projects/{id}",
    tag = "projects",
    params(("id" = String, Path, description = "项目ID")),
    responses(
        (status = 200, description = "Project detail", body = ProjectReply),
        (status = 404, description = "Project not found", body = ErrorReply)
    ),
)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<ProjectReply>, AppError> {
    debug!("Getting project id {}", project_id);

    let project = state.project_service.get_project(&project_id).await?;

    Ok(Json(ProjectReply {
        success: true,
        message: None,
        project: project.into(),
    }))
}

/// 上传项目
///
/// `multipart/form-data` 表单：
/// - `projectPhotos`: 1~5 张图片（jpg/jpeg/png/gif）
/// - `projectVideo`: 可选，最多 1 个视频（mp4/mov/avi）
/// - `name` / `type` / `description` / `innovatorName` / `innovatorContact` / `price`: 必填
///
/// 所有校验通过后才会写文件，项目创建失败时已写入的文件会被删除。
#[utoipa::path(post,
    path = "/projects/upload",
    tag = "projects",
    request_body(content = UploadProjectForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Project created", body = ProjectReply),
        (status = 400, description = "Invalid upload", body = ErrorReply),
        (status = 500, description = "Unexpected failure", body = ErrorReply)
    ),
)]
pub async fn upload_project(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ProjectReply>), AppError> {
    let form = ProjectUploadForm::read(&mut multipart, state.config.max_upload_file_size).await?;
    debug!("📨 上传表单: {} 张图片, 视频: {}", form.photos.len(), form.video.is_some());

    let draft = form.into_draft()?;
    let project = state.project_service.upload_project(draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(ProjectReply {
            success: true,
            message: Some("Project uploaded successfully".to_string()),
            project: project.into(),
        }),
    ))
}

/// 数据库诊断
///
/// 返回连接状态、项目总数和最新的5个项目（仅名称/类型/创建时间），没有副作用。
#[utoipa::path(get,
    path = "/projects/test/database",
    tag = "projects",
    responses(
        (status = 200, description = "Database diagnostics", body = DatabaseReply),
        (status = 500, description = "Database error", body = ErrorReply)
    ),
)]
pub async fn database_diagnostics(State(state): State<AppState>) -> Result<Json<DatabaseReply>, AppError> {
    let database = state.project_service.database_report().await?;

    Ok(Json(DatabaseReply {
        success: true,
        database,
    }))
}

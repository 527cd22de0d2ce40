//! 项目服务
//!
//! 提供项目相关的业务逻辑操作

use crate::models::err::AppResult;
use crate::models::projects::DatabaseReport;
use crate::services::traits::ProjectServiceTrait;
use crate::upload::{FileStore, ProjectDraft, StoredFile, UploadError};
use database::{DatabaseStatus, ProjectInfo, ProjectRepositoryTrait};
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

/// 诊断接口展示的最新项目个数
const LATEST_PROJECTS_LIMIT: i64 = 5;

#[derive(Debug)]
pub struct ProjectService<PR: ProjectRepositoryTrait> {
    project_repository: Arc<PR>,
    file_store: FileStore,
}

impl<PR: ProjectRepositoryTrait> ProjectService<PR> {
    pub fn new(project_repository: Arc<PR>, file_store: FileStore) -> Self {
        Self {
            project_repository,
            file_store,
        }
    }
}

#[async_trait::async_trait]
impl<PR: ProjectRepositoryTrait> ProjectServiceTrait for ProjectService<PR> {
    async fn list_projects(&self) -> AppResult<Vec<ProjectInfo>> {
        Ok(self.project_repository.list_projects().await?)
    }

    async fn get_project(&self, id: &str) -> AppResult<ProjectInfo> {
        Ok(self.project_repository.get_project_by_id(id).await?)
    }

    async fn upload_project(&self, draft: ProjectDraft) -> AppResult<ProjectInfo> {
        // 先分配文件名，拿到最终的访问路径后做一次完整校验，校验失败时不会写任何文件
        let photo_targets: Vec<StoredFile> = draft.photos.iter().map(|f| self.file_store.allocate(f)).collect();
        let video_target = draft.video.as_ref().map(|f| self.file_store.allocate(f));

        let project = draft.to_project_create(
            photo_targets.iter().map(|t| t.public_path.clone()).collect(),
            video_target.as_ref().map(|t| t.public_path.clone()),
        );
        project.validate()?;

        let mut files: Vec<(StoredFile, &[u8])> = photo_targets
            .into_iter()
            .zip(draft.photos.iter().map(|f| f.data.as_slice()))
            .collect();
        if let (Some(target), Some(video)) = (video_target, draft.video.as_ref()) {
            files.push((target, video.data.as_slice()));
        }

        // 请求被取消时 future 直接被 drop，文件清理交给 WrittenFiles 的 Drop 完成
        let written = self.file_store.write_all(&files).await.map_err(UploadError::from)?;
        debug!("💾 已写入 {} 个文件", written.len());

        let created = self.project_repository.create_project(project).await.inspect_err(|e| {
            warn!("⚠️ 项目创建失败，清理 {} 个已上传文件: {e}", written.len());
        })?;
        written.keep();

        info!("✅ 项目上传成功: {} ({})", created.name, created.id);
        Ok(created)
    }

    async fn database_report(&self) -> AppResult<DatabaseReport> {
        let status = self.project_repository.connection_status().await;
        let total_projects = self.project_repository.count_projects().await?;
        let latest_projects = self.project_repository.latest_projects(LATEST_PROJECTS_LIMIT).await?;
        let connection = self.project_repository.connection_info();

        Ok(DatabaseReport {
            status: status.to_string(),
            total_projects,
            latest_projects: latest_projects.into_iter().map(Into::into).collect(),
            database_name: connection.database_name,
            host: connection.host,
        })
    }

    async fn database_status(&self) -> DatabaseStatus {
        self.project_repository.connection_status().await
    }
}

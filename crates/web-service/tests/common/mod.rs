//! 集成测试公共工具
//!
//! 使用内存中的项目仓库代替 PostgreSQL，路由和中间件与生产环境一致。

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use database::{
    ConnectionInfo, DatabaseError, DatabaseResult, DatabaseStatus, ProjectCreate, ProjectInfo,
    ProjectRepositoryTrait, ProjectSummary,
};
use http_body_util::BodyExt;
use serde_json::Value;
use shared_lib::{AppConfig, AppEnvironment};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;
use validator::Validate;
use web_service::routes::create_app_router;
use web_service::AppState;

/// 内存项目仓库
#[derive(Debug, Default)]
pub struct InMemoryProjectRepository {
    projects: Mutex<Vec<ProjectInfo>>,
    /// 为 true 时所有创建操作都返回数据库错误
    fail_creates: bool,
    /// 为 true 时查询列表直接 panic
    panic_on_list: bool,
}

impl InMemoryProjectRepository {
    pub fn failing() -> Self {
        Self {
            fail_creates: true,
            ..Default::default()
        }
    }

    pub fn panicking() -> Self {
        Self {
            panic_on_list: true,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.projects.lock().unwrap().len()
    }

    /// 保证创建时间严格递增，避免同一微秒内创建导致排序不稳定
    fn next_created_at(projects: &[ProjectInfo]) -> DateTime<Utc> {
        let now = Utc::now();
        match projects.iter().map(|p| p.created_at).max() {
            Some(last) if last >= now => last + Duration::microseconds(1),
            _ => now,
        }
    }

    fn sorted(&self) -> Vec<ProjectInfo> {
        let mut projects = self.projects.lock().unwrap().clone();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        projects
    }
}

#[async_trait::async_trait]
impl ProjectRepositoryTrait for InMemoryProjectRepository {
    async fn create_project(&self, project: ProjectCreate) -> DatabaseResult<ProjectInfo> {
        project.validate()?;
        if self.fail_creates {
            return Err(DatabaseError::connection("database is unreachable"));
        }

        let mut projects = self.projects.lock().unwrap();
        let created_at = Self::next_created_at(&projects);
        let info = ProjectInfo {
            id: Uuid::new_v4(),
            name: project.name,
            project_type: project.project_type,
            description: project.description,
            project_photos: project.project_photos,
            project_video: project.project_video,
            innovator_name: project.innovator_name,
            innovator_contact: project.innovator_contact,
            price: project.price,
            created_at,
            updated_at: created_at,
        };
        projects.push(info.clone());
        Ok(info)
    }

    async fn list_projects(&self) -> DatabaseResult<Vec<ProjectInfo>> {
        if self.panic_on_list {
            panic!("project list exploded");
        }
        Ok(self.sorted())
    }

    async fn get_project_by_id(&self, id: &str) -> DatabaseResult<ProjectInfo> {
        let uuid = Uuid::parse_str(id).map_err(|_| DatabaseError::not_found("Project not found"))?;
        self.projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == uuid)
            .cloned()
            .ok_or_else(|| DatabaseError::not_found("Project not found"))
    }

    async fn count_projects(&self) -> DatabaseResult<i64> {
        Ok(self.len() as i64)
    }

    async fn latest_projects(&self, limit: i64) -> DatabaseResult<Vec<ProjectSummary>> {
        Ok(self.sorted().iter().take(limit as usize).map(ProjectSummary::from).collect())
    }

    async fn connection_status(&self) -> DatabaseStatus {
        DatabaseStatus::Connected
    }

    fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            database_name: Some("memory".to_string()),
            host: "localhost".to_string(),
        }
    }
}

/// 测试用配置，上传目录和静态目录都放在临时目录下
pub fn test_config(root: &Path) -> AppConfig {
    AppConfig {
        postgresql_conn_str: "postgres://unused".to_string(),
        port: 0,
        environment: AppEnvironment::Production,
        upload_dir: root.join("uploads"),
        public_dir: root.join("public"),
        max_upload_file_size: 1024 * 1024,
    }
}

/// 构建完整的应用路由
pub fn build_test_app(repository: Arc<InMemoryProjectRepository>, config: AppConfig) -> Router {
    std::fs::create_dir_all(&config.upload_dir).unwrap();
    std::fs::create_dir_all(&config.public_dir).unwrap();
    create_app_router(AppState::new(repository, Arc::new(config)))
}

/// 上传目录中的文件个数
pub fn uploaded_file_count(config: &AppConfig) -> usize {
    std::fs::read_dir(&config.upload_dir).unwrap().count()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().method(Method::GET).uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_multipart(app: Router, uri: &str, form: MultipartForm) -> Response<Body> {
    let (content_type, body) = form.build();
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

const BOUNDARY: &str = "----marketplace-test-boundary";

/// 手工拼装 `multipart/form-data` 请求体
#[derive(Debug, Default, Clone)]
pub struct MultipartForm {
    parts: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.parts.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n").as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.parts.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.parts.extend_from_slice(data);
        self.parts.extend_from_slice(b"\r\n");
        self
    }

    pub fn photo(self, file_name: &str) -> Self {
        self.file("projectPhotos", file_name, "image/png", b"\x89PNG fake image bytes")
    }

    pub fn build(self) -> (String, Vec<u8>) {
        let mut body = self.parts;
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        (format!("multipart/form-data; boundary={BOUNDARY}"), body)
    }
}

/// 所有必填字段都已填写的表单（不含文件）
pub fn solar_lamp_fields() -> MultipartForm {
    MultipartForm::new()
        .text("name", "Solar Lamp")
        .text("type", "tech")
        .text("description", "A lamp powered by the sun")
        .text("innovatorName", "A. Innovator")
        .text("innovatorContact", "a@x.com")
        .text("price", "49.99")
}

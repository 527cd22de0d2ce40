//! 项目仓库
//!
//! 负责项目相关的数据库操作

use crate::models::project::{ConnectionInfo, DatabaseStatus, ProjectCreate, ProjectInfo, ProjectSummary};
use crate::repositories::traits::ProjectRepositoryTrait;
use crate::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;
use validator::Validate;

/// 查询项目时统一返回的列
const PROJECT_COLUMNS: &str = "id, name, project_type, description, project_photos, project_video, \
     innovator_name, innovator_contact, price, created_at, updated_at";

/// 项目仓库结构体
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// 创建新的项目仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProjectRepositoryTrait for ProjectRepository {
    /// 创建新项目
    ///
    /// 插入前先执行 [`ProjectCreate`] 上声明的校验规则，校验失败返回
    /// [`DatabaseError::ValidationError`]，不会访问数据库。
    ///
    /// `id`、`created_at`、`updated_at` 都由数据库默认值生成。
    async fn create_project(&self, project: ProjectCreate) -> DatabaseResult<ProjectInfo> {
        debug!("📝 创建项目: {:#?}", project);

        project.validate()?;

        let sql = format!(
            r#"
            INSERT INTO projects (name, project_type, description, project_photos, project_video,
                                  innovator_name, innovator_contact, price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PROJECT_COLUMNS};
            "#
        );

        let project_info = sqlx::query_as::<_, ProjectInfo>(&sql)
            .bind(&project.name)
            .bind(project.project_type)
            .bind(&project.description)
            .bind(&project.project_photos)
            .bind(&project.project_video)
            .bind(&project.innovator_name)
            .bind(&project.innovator_contact)
            .bind(project.price)
            .fetch_one(&self.pool)
            .await?;

        debug!("✅ 项目创建成功: {}", project_info.id);
        Ok(project_info)
    }

    /// 查询全部项目
    ///
    /// 不分页，按创建时间倒序（最新的在前）。每次都直接查询数据库，不做缓存。
    async fn list_projects(&self) -> DatabaseResult<Vec<ProjectInfo>> {
        debug!("🔍 查询全部项目");

        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC");
        let projects = sqlx::query_as::<_, ProjectInfo>(&sql).fetch_all(&self.pool).await?;

        debug!("✅ 查询完成 - 共 {} 个项目", projects.len());
        Ok(projects)
    }

    /// 根据 ID 获取项目信息
    ///
    /// ID 不是合法的 UUID 时直接当作不存在处理，不访问数据库。
    async fn get_project_by_id(&self, id: &str) -> DatabaseResult<ProjectInfo> {
        debug!("🔍 根据 ID 获取项目: {}", id);

        let Ok(uuid) = Uuid::parse_str(id) else {
            return Err(DatabaseError::not_found("Project not found"));
        };

        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1 LIMIT 1");
        let project = sqlx::query_as::<_, ProjectInfo>(&sql)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Project not found"))?;

        debug!("✅ 项目获取成功: {}", project.id);
        Ok(project)
    }

    async fn count_projects(&self) -> DatabaseResult<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn latest_projects(&self, limit: i64) -> DatabaseResult<Vec<ProjectSummary>> {
        let projects = sqlx::query_as::<_, ProjectSummary>(
            r#"
            SELECT id, name, project_type, created_at
            FROM projects
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(projects)
    }

    /// 连接池关闭后返回 [`DatabaseStatus::Closed`]，否则用 `SELECT 1` 探测
    async fn connection_status(&self) -> DatabaseStatus {
        if self.pool.is_closed() {
            return DatabaseStatus::Closed;
        }

        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => DatabaseStatus::Connected,
            Err(e) => {
                warn!("⚠️ 数据库连接检查失败: {e}");
                DatabaseStatus::Disconnected
            }
        }
    }

    fn connection_info(&self) -> ConnectionInfo {
        let options = self.pool.connect_options();
        ConnectionInfo {
            database_name: options.get_database().map(str::to_string),
            host: options.get_host().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! 这些测试需要真实的 PostgreSQL（`DATABASE_URL`），默认忽略：
    //! `cargo test -p database -- --ignored`

    use super::*;
    use crate::models::project::ProjectType;

    fn solar_lamp() -> ProjectCreate {
        ProjectCreate {
            name: "Solar Lamp".to_string(),
            project_type: ProjectType::Tech,
            description: "A lamp powered by the sun".to_string(),
            project_photos: vec!["/uploads/projectPhotos-1.png".to_string(), "/uploads/projectPhotos-2.png".to_string()],
            project_video: Some("/uploads/projectVideo-1.mp4".to_string()),
            innovator_name: "A. Innovator".to_string(),
            innovator_contact: "a@x.com".to_string(),
            price: 49.99,
        }
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "需要 PostgreSQL"]
    async fn test_create_and_get_project(pool: PgPool) {
        let repo = ProjectRepository::new(pool);

        let created = repo.create_project(solar_lamp()).await.unwrap();
        assert_eq!(created.price, 49.99);
        assert_eq!(created.project_photos.len(), 2);

        let fetched = repo.get_project_by_id(&created.id.to_string()).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(repo.count_projects().await.unwrap(), 1);
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "需要 PostgreSQL"]
    async fn test_list_is_newest_first(pool: PgPool) {
        let repo = ProjectRepository::new(pool);

        for name in ["first", "second", "third"] {
            repo.create_project(ProjectCreate { name: name.to_string(), ..solar_lamp() }).await.unwrap();
        }

        let names: Vec<String> = repo.list_projects().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["third", "second", "first"]);

        let latest = repo.latest_projects(2).await.unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].name, "third");
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "需要 PostgreSQL"]
    async fn test_missing_or_malformed_id_is_not_found(pool: PgPool) {
        let repo = ProjectRepository::new(pool);

        let malformed = repo.get_project_by_id("not-a-uuid").await;
        assert!(matches!(malformed, Err(DatabaseError::NotFound(_))));

        let missing = repo.get_project_by_id(&Uuid::new_v4().to_string()).await;
        assert!(matches!(missing, Err(DatabaseError::NotFound(_))));
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "需要 PostgreSQL"]
    async fn test_invalid_project_is_rejected_before_insert(pool: PgPool) {
        let repo = ProjectRepository::new(pool);

        let result = repo.create_project(ProjectCreate { price: -1.0, ..solar_lamp() }).await;
        assert!(matches!(result, Err(DatabaseError::ValidationError(_))));
        assert_eq!(repo.count_projects().await.unwrap(), 0);
        assert_eq!(repo.connection_status().await, DatabaseStatus::Connected);
    }
}

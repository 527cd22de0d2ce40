//! 项目仓库 trait 定义
//!
//! 定义项目数据库操作的抽象接口

use crate::models::project::{ConnectionInfo, DatabaseStatus, ProjectCreate, ProjectInfo, ProjectSummary};
use crate::DatabaseResult;

/// 项目仓库trait定义
///
/// 定义了项目相关的数据库操作接口，支持：
/// - 项目创建
/// - 项目列表（按创建时间倒序，不分页）
/// - 项目查询
/// - 项目计数和连接诊断
///
/// 项目一经创建不会被修改或删除，所以这里没有更新/删除接口。
#[async_trait::async_trait]
pub trait ProjectRepositoryTrait: Send + Sync + 'static {
    /// 创建新项目
    ///
    /// # 参数
    /// - `project`: 项目创建信息，写入前会先做数据校验
    ///
    /// # 返回值
    /// 返回创建的项目信息（包含数据库生成的 `id` 和 `created_at`）
    async fn create_project(&self, project: ProjectCreate) -> DatabaseResult<ProjectInfo>;

    /// 查询全部项目
    ///
    /// # 返回值
    /// 按 `created_at` 倒序排列的项目列表，没有数据时返回空列表
    async fn list_projects(&self) -> DatabaseResult<Vec<ProjectInfo>>;

    /// 根据 ID 获取项目信息
    ///
    /// # 参数
    /// - `id`: 项目 ID 的字符串形式
    ///
    /// # 返回值
    /// 返回项目信息；ID 格式不正确或者不存在时返回 [`crate::DatabaseError::NotFound`]
    async fn get_project_by_id(&self, id: &str) -> DatabaseResult<ProjectInfo>;

    /// 项目总数
    async fn count_projects(&self) -> DatabaseResult<i64>;

    /// 最新创建的若干个项目摘要
    async fn latest_projects(&self, limit: i64) -> DatabaseResult<Vec<ProjectSummary>>;

    /// 当前数据库连接状态
    async fn connection_status(&self) -> DatabaseStatus;

    /// 数据库名称和主机
    fn connection_info(&self) -> ConnectionInfo;
}

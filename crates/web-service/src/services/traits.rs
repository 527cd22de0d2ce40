//! 服务层 trait 定义
//!
//! 定义服务层的抽象接口，遵循六边形架构的端口适配器模式

use crate::models::err::AppResult;
use crate::models::projects::DatabaseReport;
use crate::upload::ProjectDraft;
use database::{DatabaseStatus, ProjectInfo};

/// 项目服务 trait 定义
///
/// 定义了项目相关的业务逻辑接口，作为应用层的端口(Port)
///
/// 该 trait 作为业务逻辑的抽象接口，具体实现由 [`crate::services::ProjectService`] 提供。
/// 路由层通过 `Arc<dyn ProjectServiceTrait>` 使用，所以这里不要求 `Clone`。
#[async_trait::async_trait]
pub trait ProjectServiceTrait: Send + Sync + 'static {
    /// 查询全部项目，按创建时间倒序
    async fn list_projects(&self) -> AppResult<Vec<ProjectInfo>>;

    /// 根据 ID 获取项目信息
    ///
    /// # 参数
    /// - `id`: 路径中的项目 ID，格式不正确时按不存在处理
    async fn get_project(&self, id: &str) -> AppResult<ProjectInfo>;

    /// 保存上传文件并创建项目
    ///
    /// 文件写入和项目创建作为一个补偿单元：任何一步失败都会删除已经写入的文件。
    ///
    /// # 参数
    /// - `draft`: 已通过表单校验的项目
    ///
    /// # 返回值
    /// 返回创建的项目信息
    async fn upload_project(&self, draft: ProjectDraft) -> AppResult<ProjectInfo>;

    /// 数据库诊断信息：连接状态、项目总数、最新的5个项目
    async fn database_report(&self) -> AppResult<DatabaseReport>;

    /// 数据库连接状态
    async fn database_status(&self) -> DatabaseStatus;
}

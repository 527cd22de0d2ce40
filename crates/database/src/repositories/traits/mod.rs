//! 数据库仓库 trait 定义
//!
//! 这里定义了各种数据库仓库的抽象接口
//!
//! ## Repository Trait 约束 🎯
//!
//! ```ignore
//! pub trait XxxRepositoryTrait: Send + Sync + 'static {
//!     // 异步方法定义...
//! }
//! ```
//!
//! - `Send` / `Sync`：同一个仓库实例会被多个请求在不同线程上并发使用
//! - `'static`：仓库会被放进 `Arc` 里跟随整个服务的生命周期
//!
//! Web 服务层只依赖这里的 trait，生产环境注入 [`crate::ProjectRepository`]（PostgreSQL），
//! 集成测试可以注入内存实现，不需要真实数据库：
//!
//! ```ignore
//! let repository = Arc::new(ProjectRepository::new(pool.clone()));
//! let service = ProjectService::new(repository, file_store);
//!
//! let projects = service.list_projects().await?;
//! ```
//!
//! 所有方法统一返回 `DatabaseResult<T>`，由上层转换为 HTTP 错误码。

pub mod project;

// 重新导出
pub use project::ProjectRepositoryTrait;

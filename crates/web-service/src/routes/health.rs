use crate::models::common::HealthReply;
use crate::AppState;
use axum::extract::State;
use axum::Json;

/// 健康检查
///
/// 进程存活即返回 200，数据库状态只做展示
#[utoipa::path(get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is alive", body = HealthReply)),
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthReply> {
    let database_status = state.project_service.database_status().await;

    Json(HealthReply {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        database_status: database_status.to_string(),
    })
}

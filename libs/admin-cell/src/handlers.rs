use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::Value;

use shared_models::auth::User;
use shared_models::error::AppError;
use shared_models::response::success;
use shared_store::AppState;
use shared_utils::extractor::require_admin;

use crate::services::stats::StatsService;

#[axum::debug_handler]
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    let stats_service = StatsService::new(state.store.clone());
    let stats = stats_service.collect().await;
    Ok(Json(success(stats)))
}

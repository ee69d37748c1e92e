use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::auth::User;
use shared_models::error::AppError;
use shared_models::response::success;
use shared_store::AppState;
use shared_utils::extractor::require_admin;

use crate::models::{
    CreateLocationRequest, CreateSpecialtyRequest, UpdateLocationRequest, UpdateSpecialtyRequest,
};
use crate::services::catalog::CatalogService;

// ==============================================================================
// SPECIALTIES
// ==============================================================================

#[axum::debug_handler]
pub async fn list_specialties(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let catalog = CatalogService::new(state.store.clone());
    let specialties = catalog.list_specialties().await;
    Ok(Json(success(json!({
        "specialties": specialties,
        "total": specialties.len()
    }))))
}

#[axum::debug_handler]
pub async fn get_specialty(
    State(state): State<Arc<AppState>>,
    Path(specialty_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let catalog = CatalogService::new(state.store.clone());
    let specialty = catalog.get_specialty(specialty_id).await?;
    Ok(Json(success(specialty)))
}

#[axum::debug_handler]
pub async fn create_specialty(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateSpecialtyRequest>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;
    let catalog = CatalogService::new(state.store.clone());
    let specialty = catalog.create_specialty(request).await?;
    Ok(Json(success(specialty)))
}

#[axum::debug_handler]
pub async fn update_specialty(
    State(state): State<Arc<AppState>>,
    Path(specialty_id): Path<Uuid>,
    Extension(user): Extension<User>,
    Json(request): Json<UpdateSpecialtyRequest>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;
    let catalog = CatalogService::new(state.store.clone());
    let specialty = catalog.update_specialty(specialty_id, request).await?;
    Ok(Json(success(specialty)))
}

#[axum::debug_handler]
pub async fn delete_specialty(
    State(state): State<Arc<AppState>>,
    Path(specialty_id): Path<Uuid>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;
    let catalog = CatalogService::new(state.store.clone());
    catalog.delete_specialty(specialty_id).await?;
    Ok(Json(success(json!({ "deleted": true }))))
}

// ==============================================================================
// LOCATIONS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_locations(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let catalog = CatalogService::new(state.store.clone());
    let locations = catalog.list_locations().await;
    Ok(Json(success(json!({
        "locations": locations,
        "total": locations.len()
    }))))
}

#[axum::debug_handler]
pub async fn get_location(
    State(state): State<Arc<AppState>>,
    Path(location_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let catalog = CatalogService::new(state.store.clone());
    let location = catalog.get_location(location_id).await?;
    Ok(Json(success(location)))
}

#[axum::debug_handler]
pub async fn create_location(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateLocationRequest>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;
    let catalog = CatalogService::new(state.store.clone());
    let location = catalog.create_location(request).await?;
    Ok(Json(success(location)))
}

#[axum::debug_handler]
pub async fn update_location(
    State(state): State<Arc<AppState>>,
    Path(location_id): Path<Uuid>,
    Extension(user): Extension<User>,
    Json(request): Json<UpdateLocationRequest>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;
    let catalog = CatalogService::new(state.store.clone());
    let location = catalog.update_location(location_id, request).await?;
    Ok(Json(success(location)))
}

#[axum::debug_handler]
pub async fn delete_location(
    State(state): State<Arc<AppState>>,
    Path(location_id): Path<Uuid>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;
    let catalog = CatalogService::new(state.store.clone());
    catalog.delete_location(location_id).await?;
    Ok(Json(success(json!({ "deleted": true }))))
}

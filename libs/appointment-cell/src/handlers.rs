use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::auth::User;
use shared_models::error::AppError;
use shared_models::response::success;
use shared_store::AppState;

use crate::models::{AppointmentListQuery, BookAppointmentRequest, UpdateStatusRequest};
use crate::services::{booking::BookingService, lifecycle::LifecycleService};

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(state.store.clone());
    let appointment = booking_service.book(&user, request).await?;
    Ok(Json(success(appointment)))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Query(query): Query<AppointmentListQuery>,
) -> Result<Json<Value>, AppError> {
    let lifecycle_service = LifecycleService::new(state.store.clone());
    let appointments = lifecycle_service.list(&user, query).await?;
    Ok(Json(success(json!({
        "appointments": appointments,
        "total": appointments.len()
    }))))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<Uuid>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let lifecycle_service = LifecycleService::new(state.store.clone());
    let appointment = lifecycle_service.get(&user, appointment_id).await?;
    Ok(Json(success(appointment)))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<Uuid>,
    Extension(user): Extension<User>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let lifecycle_service = LifecycleService::new(state.store.clone());
    let appointment = lifecycle_service
        .update_status(&user, appointment_id, request.status)
        .await?;
    Ok(Json(success(appointment)))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<Uuid>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let lifecycle_service = LifecycleService::new(state.store.clone());
    let appointment = lifecycle_service.cancel(&user, appointment_id).await?;
    Ok(Json(success(appointment)))
}

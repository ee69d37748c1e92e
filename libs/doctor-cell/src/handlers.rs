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
use shared_store::repo::{DoctorFilter, DoctorRepository};
use shared_store::AppState;
use shared_utils::extractor::require_admin;

use crate::models::{
    CreateDoctorRequest, CreateScheduleRequest, CreateVacationRequest, DoctorSearchQuery,
    SlotsQuery, UpdateDoctorRequest, UpdateScheduleRequest,
};
use crate::services::{
    availability::AvailabilityService, doctor::DoctorService, schedule::ScheduleService,
};

/// Schedules and vacations may be managed by an admin or by the doctor's
/// own linked account.
async fn ensure_can_manage(
    state: &AppState,
    user: &User,
    doctor_id: Uuid,
) -> Result<(), AppError> {
    if user.is_admin() {
        return Ok(());
    }
    if user.is_doctor() {
        if let Ok(user_id) = Uuid::parse_str(&user.id) {
            if let Some(doctor) = state.store.find_doctor_by_user(user_id).await {
                if doctor.id == doctor_id {
                    return Ok(());
                }
            }
        }
    }
    Err(AppError::Forbidden(
        "غير مصرح لك بإدارة جدول هذا الطبيب".to_string(),
    ))
}

// ==============================================================================
// PUBLIC HANDLERS (NO AUTHENTICATION REQUIRED)
// ==============================================================================

#[axum::debug_handler]
pub async fn search_doctors(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DoctorSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(state.store.clone());

    let filter = DoctorFilter {
        specialty_id: query.specialty_id,
        location_id: query.location_id,
        query: query.q,
        include_inactive: query.include_inactive.unwrap_or(false),
        limit: query.limit,
        offset: query.offset,
    };

    let doctors = doctor_service.search_doctors(filter).await;

    Ok(Json(success(json!({
        "doctors": doctors,
        "total": doctors.len()
    }))))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(state.store.clone());
    let doctor = doctor_service.get_doctor(doctor_id).await?;
    Ok(Json(success(doctor)))
}

#[axum::debug_handler]
pub async fn get_doctor_schedules(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let schedule_service = ScheduleService::new(state.store.clone());
    let schedules = schedule_service.list_schedules(doctor_id).await?;
    Ok(Json(success(schedules)))
}

#[axum::debug_handler]
pub async fn get_doctor_vacations(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let schedule_service = ScheduleService::new(state.store.clone());
    let vacations = schedule_service.list_vacations(doctor_id).await?;
    Ok(Json(success(vacations)))
}

#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<Uuid>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Value>, AppError> {
    let availability_service = AvailabilityService::new(state.store.clone());
    let day = availability_service.day_slots(doctor_id, query.date).await?;
    Ok(Json(success(day)))
}

// ==============================================================================
// PROTECTED DOCTOR PROFILE HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    let doctor_service = DoctorService::new(state.store.clone());
    let doctor = doctor_service.create_doctor(request).await?;
    Ok(Json(success(doctor)))
}

#[axum::debug_handler]
pub async fn update_doctor(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<Uuid>,
    Extension(user): Extension<User>,
    Json(request): Json<UpdateDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    let doctor_service = DoctorService::new(state.store.clone());
    let doctor = doctor_service.update_doctor(doctor_id, request).await?;
    Ok(Json(success(doctor)))
}

#[axum::debug_handler]
pub async fn deactivate_doctor(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<Uuid>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    let doctor_service = DoctorService::new(state.store.clone());
    let doctor = doctor_service.deactivate_doctor(doctor_id).await?;
    Ok(Json(success(doctor)))
}

// ==============================================================================
// SCHEDULE & VACATION HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<Uuid>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateScheduleRequest>,
) -> Result<Json<Value>, AppError> {
    ensure_can_manage(&state, &user, doctor_id).await?;

    let schedule_service = ScheduleService::new(state.store.clone());
    let schedule = schedule_service.create_schedule(doctor_id, request).await?;
    Ok(Json(success(schedule)))
}

#[axum::debug_handler]
pub async fn update_schedule(
    State(state): State<Arc<AppState>>,
    Path((doctor_id, schedule_id)): Path<(Uuid, Uuid)>,
    Extension(user): Extension<User>,
    Json(request): Json<UpdateScheduleRequest>,
) -> Result<Json<Value>, AppError> {
    ensure_can_manage(&state, &user, doctor_id).await?;

    let schedule_service = ScheduleService::new(state.store.clone());
    let schedule = schedule_service
        .update_schedule(doctor_id, schedule_id, request)
        .await?;
    Ok(Json(success(schedule)))
}

#[axum::debug_handler]
pub async fn delete_schedule(
    State(state): State<Arc<AppState>>,
    Path((doctor_id, schedule_id)): Path<(Uuid, Uuid)>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    ensure_can_manage(&state, &user, doctor_id).await?;

    let schedule_service = ScheduleService::new(state.store.clone());
    schedule_service.delete_schedule(doctor_id, schedule_id).await?;
    Ok(Json(success(json!({ "deleted": true }))))
}

#[axum::debug_handler]
pub async fn create_vacation(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<Uuid>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateVacationRequest>,
) -> Result<Json<Value>, AppError> {
    ensure_can_manage(&state, &user, doctor_id).await?;

    let schedule_service = ScheduleService::new(state.store.clone());
    let vacation = schedule_service.add_vacation(doctor_id, request).await?;
    Ok(Json(success(vacation)))
}

#[axum::debug_handler]
pub async fn delete_vacation(
    State(state): State<Arc<AppState>>,
    Path((doctor_id, vacation_id)): Path<(Uuid, Uuid)>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    ensure_can_manage(&state, &user, doctor_id).await?;

    let schedule_service = ScheduleService::new(state.store.clone());
    schedule_service.delete_vacation(doctor_id, vacation_id).await?;
    Ok(Json(success(json!({ "deleted": true }))))
}

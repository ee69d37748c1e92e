use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use shared_store::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppState>) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/", get(handlers::search_doctors))
        .route("/{doctor_id}", get(handlers::get_doctor))
        .route("/{doctor_id}/schedules", get(handlers::get_doctor_schedules))
        .route("/{doctor_id}/vacations", get(handlers::get_doctor_vacations))
        .route("/{doctor_id}/available-slots", get(handlers::get_available_slots));

    // Protected routes (authentication required)
    let protected_routes = Router::new()
        // Doctor profile management
        .route("/", post(handlers::create_doctor))
        .route("/{doctor_id}", put(handlers::update_doctor))
        .route("/{doctor_id}", delete(handlers::deactivate_doctor))
        // Weekly schedule management
        .route("/{doctor_id}/schedules", post(handlers::create_schedule))
        .route("/{doctor_id}/schedules/{schedule_id}", put(handlers::update_schedule))
        .route("/{doctor_id}/schedules/{schedule_id}", delete(handlers::delete_schedule))
        // Vacations
        .route("/{doctor_id}/vacations", post(handlers::create_vacation))
        .route("/{doctor_id}/vacations/{vacation_id}", delete(handlers::delete_vacation))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}

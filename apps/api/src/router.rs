use std::sync::Arc;

use axum::{routing::get, Router};

use admin_cell::router::admin_routes;
use appointment_cell::router::appointment_routes;
use auth_cell::router::auth_routes;
use directory_cell::router::{location_routes, specialty_routes};
use doctor_cell::router::doctor_routes;
use shared_store::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Hajz clinic API is running!" }))
        .nest("/api/auth", auth_routes(state.clone()))
        .nest("/api/doctors", doctor_routes(state.clone()))
        .nest("/api/appointments", appointment_routes(state.clone()))
        .nest("/api/specialties", specialty_routes(state.clone()))
        .nest("/api/locations", location_routes(state.clone()))
        .nest("/api/admin", admin_routes(state))
}

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use shared_store::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn specialty_routes(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/", get(handlers::list_specialties))
        .route("/{specialty_id}", get(handlers::get_specialty));

    let protected_routes = Router::new()
        .route("/", post(handlers::create_specialty))
        .route("/{specialty_id}", put(handlers::update_specialty))
        .route("/{specialty_id}", delete(handlers::delete_specialty))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}

pub fn location_routes(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/", get(handlers::list_locations))
        .route("/{location_id}", get(handlers::get_location));

    let protected_routes = Router::new()
        .route("/", post(handlers::create_location))
        .route("/{location_id}", put(handlers::update_location))
        .route("/{location_id}", delete(handlers::delete_location))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}

use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    Json,
};
use chrono::Utc;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use shared_models::auth::User as AuthUser;
use shared_models::error::AppError;
use shared_models::response::success;
use shared_store::entities::{User, UserRole};
use shared_store::repo::{StoreError, UserRepository};
use shared_store::AppState;
use shared_utils::jwt::issue_token;
use shared_utils::password::{hash_password, verify_password};

use crate::models::{AuthResponse, LoginRequest, RegisterRequest};

fn validate_registration(request: &RegisterRequest) -> Result<(), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::ValidationError("الاسم مطلوب".to_string()));
    }
    if !request.email.contains('@') {
        return Err(AppError::ValidationError(
            "البريد الإلكتروني غير صالح".to_string(),
        ));
    }
    if request.password.chars().count() < 8 {
        return Err(AppError::ValidationError(
            "كلمة المرور يجب أن تكون ٨ أحرف على الأقل".to_string(),
        ));
    }
    Ok(())
}

fn token_for(user: &User, state: &AppState) -> Result<String, AppError> {
    issue_token(
        &user.id.to_string(),
        Some(&user.email),
        user.role.as_str(),
        &state.config.jwt_secret,
        state.config.token_ttl_hours,
    )
    .map_err(AppError::Internal)
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<Value>, AppError> {
    debug!("Registering new patient account: {}", request.email);

    validate_registration(&request)?;

    let password_hash = hash_password(&request.password).map_err(AppError::Internal)?;

    let user = User {
        id: Uuid::new_v4(),
        name: request.name.trim().to_string(),
        email: request.email.trim().to_lowercase(),
        phone: request.phone,
        password_hash,
        role: UserRole::Patient,
        created_at: Utc::now(),
    };

    let user = state.store.insert_user(user).await.map_err(|e| match e {
        StoreError::Conflict(_) => {
            AppError::Conflict("البريد الإلكتروني مستخدم مسبقاً".to_string())
        }
        StoreError::NotFound(_) => AppError::Internal(e.to_string()),
    })?;

    let token = token_for(&user, &state)?;

    Ok(Json(success(AuthResponse { token, user })))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    debug!("Login attempt: {}", request.email);

    let invalid =
        || AppError::Auth("البريد الإلكتروني أو كلمة المرور غير صحيحة".to_string());

    let user = state
        .store
        .find_user_by_email(request.email.trim())
        .await
        .ok_or_else(invalid)?;

    if !verify_password(&request.password, &user.password_hash) {
        return Err(invalid());
    }

    let token = token_for(&user, &state)?;

    Ok(Json(success(AuthResponse { token, user })))
}

#[axum::debug_handler]
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Value>, AppError> {
    let user_id = Uuid::parse_str(&auth.id)
        .map_err(|_| AppError::Auth("Invalid token subject".to_string()))?;

    let user = state
        .store
        .get_user(user_id)
        .await
        .map_err(|_| AppError::NotFound("الحساب غير موجود".to_string()))?;

    Ok(Json(success(user)))
}

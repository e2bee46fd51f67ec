use std::sync::Arc;

use axum::extract::{Json, State};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::error::AppError;
use shared_models::user::UserResponse;
use shared_store::AppState;

use crate::models::{AuthError, LoginRequest, RegisterRequest};
use crate::services::SessionService;

fn map_auth_error(err: AuthError) -> AppError {
    match err {
        AuthError::InvalidCredentials => AppError::Auth("Invalid email or password".to_string()),
        AuthError::DuplicateEmail => {
            AppError::Conflict("A user with this email already exists".to_string())
        }
        AuthError::Validation(msg) => AppError::Validation(msg),
        AuthError::PasswordHash(msg) => AppError::Internal(msg),
        AuthError::Store(e) => AppError::Store(e.to_string()),
    }
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<Value>, AppError> {
    debug!("registering {} as {}", request.email, request.role);

    let service = SessionService::new(state.store.clone());
    let user = service.register(request).map_err(map_auth_error)?;

    let message = if user.is_pending_doctor() {
        "Registration successful! Please wait for admin approval."
    } else {
        "Registration successful!"
    };

    Ok(Json(json!({
        "success": true,
        "user": UserResponse::from(&user),
        "message": message
    })))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    debug!("login attempt for {}", request.email);

    let service = SessionService::new(state.store.clone());
    let user = service
        .establish_session(&request.email, &request.password)
        .map_err(map_auth_error)?;

    Ok(Json(json!({
        "success": true,
        "user": UserResponse::from(&user),
        "message": format!("Welcome back, {}!", user.name)
    })))
}

#[axum::debug_handler]
pub async fn logout(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let service = SessionService::new(state.store.clone());
    service.end_session().map_err(map_auth_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "Logged out successfully"
    })))
}

#[axum::debug_handler]
pub async fn session(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let service = SessionService::new(state.store.clone());
    let session = service.current_session().map_err(map_auth_error)?;

    Ok(Json(match session {
        Some(user) => json!({
            "authenticated": true,
            "user": UserResponse::from(&user)
        }),
        None => json!({
            "authenticated": false
        }),
    }))
}

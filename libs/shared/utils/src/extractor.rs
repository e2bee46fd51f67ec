use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use shared_models::error::AppError;
use shared_store::AppState;

/// Middleware for protected routes: resolves the active session from the
/// record store and inserts the user into request extensions. Absent
/// session means the request never reaches the handler.
pub async fn session_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let session = state
        .store
        .read()
        .map_err(|e| AppError::Store(e.to_string()))?
        .session()
        .cloned();

    let user = match session {
        Some(user) => user,
        None => {
            debug!("no active session, denying request");
            return Err(AppError::Auth("Authentication required".to_string()));
        }
    };

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_store::AppState;
use shared_utils::extractor::session_middleware;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppState>) -> Router {
    // Catalog browsing and the admin approval workflow all require a session
    let protected_routes = Router::new()
        .route("/", get(handlers::list_doctors))
        .route("/specializations", get(handlers::list_specializations))
        .route("/pending", get(handlers::pending_doctors))
        .route("/approved", get(handlers::approved_doctors))
        .route("/{doctor_id}/approve", post(handlers::approve_doctor))
        .route("/{doctor_id}/reject", post(handlers::reject_doctor))
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware));

    Router::new().merge(protected_routes).with_state(state)
}

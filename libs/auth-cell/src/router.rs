use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_store::AppState;

use crate::handlers;

pub fn auth_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/session", get(handlers::session))
        .with_state(state)
}

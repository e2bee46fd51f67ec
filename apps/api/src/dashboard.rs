use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    middleware,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};

use appointment_cell::services::AppointmentBookingService;
use doctor_cell::services::{DoctorApprovalService, DoctorCatalogService};
use shared_models::error::AppError;
use shared_models::user::{Role, User, UserResponse};
use shared_store::AppState;
use shared_utils::access::authorize;
use shared_utils::extractor::session_middleware;

/// The three role views. Each endpoint runs the full access gate for its
/// role and aggregates what that dashboard renders.
pub fn dashboard_routes(state: Arc<AppState>) -> Router {
    let protected_routes = Router::new()
        .route("/patient", get(patient_dashboard))
        .route("/doctor", get(doctor_dashboard))
        .route("/admin", get(admin_dashboard))
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware));

    Router::new().merge(protected_routes).with_state(state)
}

async fn patient_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let patient = authorize(Some(&user), Some(Role::Patient))?;

    let booking_service = AppointmentBookingService::new(state.store.clone());
    let catalog = DoctorCatalogService::new(state.store.clone());

    let appointments = booking_service
        .list_for_patient(patient.id)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let doctors = catalog
        .bookable_doctors()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let specializations = catalog
        .specializations()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!({
        "user": UserResponse::from(patient),
        "appointments": appointments,
        "doctors": doctors,
        "specializations": specializations
    })))
}

async fn doctor_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let doctor = authorize(Some(&user), Some(Role::Doctor))?;

    let booking_service = AppointmentBookingService::new(state.store.clone());
    let appointments = booking_service
        .list_for_doctor(doctor.id)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let stats = booking_service
        .stats_for_doctor(doctor.id, Utc::now().date_naive())
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!({
        "user": UserResponse::from(doctor),
        "appointments": appointments,
        "stats": stats
    })))
}

async fn admin_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    authorize(Some(&user), Some(Role::Admin))?;

    let approval = DoctorApprovalService::new(state.store.clone());
    let booking_service = AppointmentBookingService::new(state.store.clone());

    let pending_doctors = approval
        .pending_doctors()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let approved_doctors = approval
        .approved_doctors()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let appointments = booking_service
        .list_all()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let appointment_stats = booking_service
        .platform_stats(Utc::now().date_naive())
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let total_patients = state
        .store
        .read()
        .map_err(|e| AppError::Store(e.to_string()))?
        .users()
        .iter()
        .filter(|u| u.role == Role::Patient)
        .count();

    Ok(Json(json!({
        "overview": {
            "total_patients": total_patients,
            "approved_doctors": approved_doctors.len(),
            "pending_doctors": pending_doctors.len(),
            "total_appointments": appointments.len()
        },
        "pending_doctors": pending_doctors,
        "approved_doctors": approved_doctors,
        "appointments": appointments,
        "appointment_stats": appointment_stats
    })))
}

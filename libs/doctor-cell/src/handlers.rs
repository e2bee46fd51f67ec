use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_models::user::{Role, User};
use shared_store::AppState;
use shared_utils::access::authorize;

use crate::models::{DoctorError, DoctorSearchQuery};
use crate::services::{DoctorApprovalService, DoctorCatalogService};

fn map_doctor_error(err: DoctorError) -> AppError {
    match err {
        DoctorError::NotFound => AppError::NotFound("Doctor not found".to_string()),
        DoctorError::NotADoctor => AppError::BadRequest("User is not a doctor".to_string()),
        DoctorError::Seed(msg) => AppError::Internal(msg),
        DoctorError::Store(e) => AppError::Store(e.to_string()),
    }
}

/// Bookable catalog with the patient dashboard's search filters. Any
/// admitted actor may browse it.
#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Query(query): Query<DoctorSearchQuery>,
) -> Result<Json<Value>, AppError> {
    authorize(Some(&user), None)?;

    let catalog = DoctorCatalogService::new(state.store.clone());
    let doctors = catalog
        .search(query.q.as_deref(), query.specialization.as_deref())
        .map_err(map_doctor_error)?;
    let count = doctors.len();

    Ok(Json(json!({
        "doctors": doctors,
        "count": count
    })))
}

#[axum::debug_handler]
pub async fn list_specializations(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    authorize(Some(&user), None)?;

    let catalog = DoctorCatalogService::new(state.store.clone());
    let specializations = catalog.specializations().map_err(map_doctor_error)?;

    Ok(Json(json!({ "specializations": specializations })))
}

#[axum::debug_handler]
pub async fn pending_doctors(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    authorize(Some(&user), Some(Role::Admin))?;

    let approval = DoctorApprovalService::new(state.store.clone());
    let doctors = approval.pending_doctors().map_err(map_doctor_error)?;

    Ok(Json(json!({ "doctors": doctors })))
}

#[axum::debug_handler]
pub async fn approved_doctors(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    authorize(Some(&user), Some(Role::Admin))?;

    let approval = DoctorApprovalService::new(state.store.clone());
    let doctors = approval.approved_doctors().map_err(map_doctor_error)?;

    Ok(Json(json!({ "doctors": doctors })))
}

#[axum::debug_handler]
pub async fn approve_doctor(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<Uuid>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    authorize(Some(&user), Some(Role::Admin))?;

    let approval = DoctorApprovalService::new(state.store.clone());
    let doctor = approval.approve(doctor_id).map_err(map_doctor_error)?;

    Ok(Json(json!({
        "success": true,
        "doctor": doctor,
        "message": "Doctor approved successfully!"
    })))
}

#[axum::debug_handler]
pub async fn reject_doctor(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<Uuid>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    authorize(Some(&user), Some(Role::Admin))?;

    let approval = DoctorApprovalService::new(state.store.clone());
    approval.reject(doctor_id).map_err(map_doctor_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "Doctor registration rejected"
    })))
}

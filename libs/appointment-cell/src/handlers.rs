use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_models::user::{Role, User};
use shared_store::AppState;
use shared_utils::access::authorize;

use crate::models::{
    AppointmentError, CompleteAppointmentRequest, CreateAppointmentRequest,
    RescheduleAppointmentRequest,
};
use crate::services::AppointmentBookingService;

fn map_appointment_error(err: AppointmentError) -> AppError {
    match err {
        AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        AppointmentError::DoctorNotFound => AppError::NotFound("Doctor not found".to_string()),
        AppointmentError::InvalidTransition(status) => AppError::Conflict(format!(
            "Appointment cannot be modified in current status: {}",
            status
        )),
        AppointmentError::Unauthorized => {
            AppError::Forbidden("Not authorized to act on this appointment".to_string())
        }
        AppointmentError::Validation(msg) => AppError::Validation(msg),
        AppointmentError::Store(e) => AppError::Store(e.to_string()),
    }
}

/// Patients book for themselves; the patient snapshot comes from the
/// session, never from the request body.
#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let patient = authorize(Some(&user), Some(Role::Patient))?;

    let booking_service = AppointmentBookingService::new(state.store.clone());
    let appointment = booking_service
        .create_appointment(patient, request)
        .map_err(map_appointment_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment booked successfully!"
    })))
}

#[axum::debug_handler]
pub async fn confirm_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<u64>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let doctor = authorize(Some(&user), Some(Role::Doctor))?;

    let booking_service = AppointmentBookingService::new(state.store.clone());
    let appointment = booking_service
        .confirm_appointment(doctor, appointment_id)
        .map_err(map_appointment_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment confirmed successfully"
    })))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<u64>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let doctor = authorize(Some(&user), Some(Role::Doctor))?;

    let booking_service = AppointmentBookingService::new(state.store.clone());
    let appointment = booking_service
        .cancel_appointment(doctor, appointment_id)
        .map_err(map_appointment_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment cancelled successfully"
    })))
}

#[axum::debug_handler]
pub async fn complete_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<u64>,
    Extension(user): Extension<User>,
    Json(request): Json<CompleteAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let doctor = authorize(Some(&user), Some(Role::Doctor))?;

    let booking_service = AppointmentBookingService::new(state.store.clone());
    let appointment = booking_service
        .complete_appointment(doctor, appointment_id, request.notes)
        .map_err(map_appointment_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment completed successfully"
    })))
}

#[axum::debug_handler]
pub async fn reschedule_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<u64>,
    Extension(user): Extension<User>,
    Json(request): Json<RescheduleAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let patient = authorize(Some(&user), Some(Role::Patient))?;

    let booking_service = AppointmentBookingService::new(state.store.clone());
    let appointment = booking_service
        .reschedule_appointment(patient, appointment_id, request)
        .map_err(map_appointment_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment rescheduled, awaiting doctor confirmation"
    })))
}

#[axum::debug_handler]
pub async fn get_patient_appointments(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<Uuid>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let actor = authorize(Some(&user), None)?;

    // Patients see their own bookings; admins see anyone's.
    if actor.id != patient_id && actor.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Not authorized to view these appointments".to_string(),
        ));
    }

    let booking_service = AppointmentBookingService::new(state.store.clone());
    let appointments = booking_service
        .list_for_patient(patient_id)
        .map_err(map_appointment_error)?;

    Ok(Json(json!({ "appointments": appointments })))
}

#[axum::debug_handler]
pub async fn get_doctor_appointments(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<Uuid>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let actor = authorize(Some(&user), None)?;

    if actor.id != doctor_id && actor.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Not authorized to view these appointments".to_string(),
        ));
    }

    let booking_service = AppointmentBookingService::new(state.store.clone());
    let appointments = booking_service
        .list_for_doctor(doctor_id)
        .map_err(map_appointment_error)?;

    Ok(Json(json!({ "appointments": appointments })))
}

/// Admin view over every appointment on the platform.
#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    authorize(Some(&user), Some(Role::Admin))?;

    let booking_service = AppointmentBookingService::new(state.store.clone());
    let appointments = booking_service.list_all().map_err(map_appointment_error)?;
    let stats = booking_service
        .platform_stats(Utc::now().date_naive())
        .map_err(map_appointment_error)?;

    Ok(Json(json!({
        "appointments": appointments,
        "stats": stats
    })))
}

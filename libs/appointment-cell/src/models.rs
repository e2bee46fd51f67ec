use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::appointment::{Appointment, AppointmentStatus};
use shared_store::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub time: String,
    pub reason: String,
    pub patient_age: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteAppointmentRequest {
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleAppointmentRequest {
    pub date: NaiveDate,
    pub time: String,
}

/// The counters the dashboards render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub rescheduled: usize,
    /// Appointments dated today.
    pub today: usize,
}

impl AppointmentStats {
    pub fn collect(appointments: &[Appointment], today: NaiveDate) -> Self {
        let count = |status: AppointmentStatus| {
            appointments.iter().filter(|a| a.status == status).count()
        };

        Self {
            total: appointments.len(),
            pending: count(AppointmentStatus::Pending),
            confirmed: count(AppointmentStatus::Confirmed),
            completed: count(AppointmentStatus::Completed),
            cancelled: count(AppointmentStatus::Cancelled),
            rescheduled: count(AppointmentStatus::Rescheduled),
            today: appointments.iter().filter(|a| a.date == today).count(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Appointment cannot be modified in current status: {0}")]
    InvalidTransition(AppointmentStatus),

    #[error("Unauthorized access to appointment")]
    Unauthorized,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

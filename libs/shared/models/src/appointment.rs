use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Rescheduled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Rescheduled => write!(f, "rescheduled"),
        }
    }
}

/// One booking between exactly one patient and one doctor.
///
/// `patient_name`, `doctor_name` and `doctor_specialization` are snapshots
/// taken at booking time; they are never re-derived from the user set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    /// Monotonically assigned: one greater than the highest existing id.
    pub id: u64,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub patient_name: String,
    pub doctor_name: String,
    pub doctor_specialization: String,
    pub date: NaiveDate,
    /// Slot label as entered at booking time, e.g. "10:00".
    pub time: String,
    pub status: AppointmentStatus,
    pub reason: String,
    pub patient_age: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The only legal post-creation mutation of an appointment. Identity and
/// snapshot fields are frozen; date/time change solely through reschedule.
#[derive(Debug, Clone, Default)]
pub struct AppointmentUpdate {
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
}

impl Appointment {
    pub fn apply(&mut self, update: AppointmentUpdate, now: DateTime<Utc>) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(time) = update.time {
            self.time = time;
        }
        self.updated_at = now;
    }
}

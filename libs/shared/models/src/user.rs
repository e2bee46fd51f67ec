use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Patient => write!(f, "patient"),
            Role::Doctor => write!(f, "doctor"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// One weekly availability window on a doctor's practice profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub day: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
}

/// Practice details carried only by doctor accounts. Not a separate store:
/// the catalog shown to patients is derived from approved doctor users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorPractice {
    pub specialization: String,
    pub experience_years: i32,
    pub education: String,
    pub consultation_fee: i64,
    pub availability: Vec<AvailabilitySlot>,
    pub rating: f32,
    pub review_count: i32,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Defaults to true for patients and admins, false for newly
    /// registered doctors. Mutated only by an admin approval.
    pub is_approved: bool,
    /// Argon2 PHC string. Never exposed through the API; responses go
    /// through `UserResponse`.
    pub password_hash: String,
    pub practice: Option<DoctorPractice>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_pending_doctor(&self) -> bool {
        self.role == Role::Doctor && !self.is_approved
    }
}

/// API-facing view of a user record, without credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_approved: bool,
    pub practice: Option<DoctorPractice>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            phone: user.phone.clone(),
            address: user.address.clone(),
            is_approved: user.is_approved,
            practice: user.practice.clone(),
            created_at: user.created_at,
        }
    }
}

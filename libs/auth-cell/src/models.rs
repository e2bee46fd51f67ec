use serde::{Deserialize, Serialize};

use shared_models::user::{AvailabilitySlot, Role};
use shared_store::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub phone: Option<String>,
    pub address: Option<String>,
    // Practice fields, read only when role = doctor
    pub specialization: Option<String>,
    pub experience_years: Option<i32>,
    pub education: Option<String>,
    pub consultation_fee: Option<i64>,
    pub bio: Option<String>,
    pub availability: Option<Vec<AvailabilitySlot>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("A user with this email already exists")]
    DuplicateEmail,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::user::{AvailabilitySlot, Role, User};
use shared_store::StoreError;

/// Catalog entry shown to patients: an approved doctor user flattened
/// together with their practice profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub specialization: String,
    pub experience_years: i32,
    pub education: String,
    pub consultation_fee: i64,
    pub availability: Vec<AvailabilitySlot>,
    pub rating: f32,
    pub review_count: i32,
    pub bio: Option<String>,
}

impl DoctorSummary {
    /// None for non-doctors and for doctor records without a practice
    /// profile (which registration never produces).
    pub fn from_user(user: &User) -> Option<Self> {
        if user.role != Role::Doctor {
            return None;
        }
        let practice = user.practice.as_ref()?;

        Some(Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            specialization: practice.specialization.clone(),
            experience_years: practice.experience_years,
            education: practice.education.clone(),
            consultation_fee: practice.consultation_fee,
            availability: practice.availability.clone(),
            rating: practice.rating,
            review_count: practice.review_count,
            bio: practice.bio.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct DoctorSearchQuery {
    /// Free-text match against name or specialization.
    pub q: Option<String>,
    /// Exact specialization filter.
    pub specialization: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DoctorError {
    #[error("Doctor not found")]
    NotFound,

    #[error("User is not a doctor")]
    NotADoctor,

    #[error("Catalog seeding failed: {0}")]
    Seed(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

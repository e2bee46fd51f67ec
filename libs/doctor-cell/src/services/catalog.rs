use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHasher};
use chrono::{NaiveTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use shared_models::user::{AvailabilitySlot, DoctorPractice, Role, User};
use shared_store::SharedStore;

use crate::models::{DoctorError, DoctorSummary};

/// The bookable catalog, derived from approved doctor user records.
/// There is no separate curated list; what patients see is what the
/// admin has approved.
pub struct DoctorCatalogService {
    store: SharedStore,
}

impl DoctorCatalogService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// All approved doctors, in registration order.
    pub fn bookable_doctors(&self) -> Result<Vec<DoctorSummary>, DoctorError> {
        let store = self.store.read()?;
        Ok(store
            .users()
            .iter()
            .filter(|u| u.is_approved)
            .filter_map(DoctorSummary::from_user)
            .collect())
    }

    /// The patient dashboard's search: free text against name or
    /// specialization, plus an optional exact specialization filter.
    pub fn search(
        &self,
        term: Option<&str>,
        specialization: Option<&str>,
    ) -> Result<Vec<DoctorSummary>, DoctorError> {
        let doctors = self.bookable_doctors()?;
        let term = term.map(str::to_lowercase);

        Ok(doctors
            .into_iter()
            .filter(|doctor| {
                let matches_term = term.as_deref().map_or(true, |t| {
                    doctor.name.to_lowercase().contains(t)
                        || doctor.specialization.to_lowercase().contains(t)
                });
                let matches_specialization =
                    specialization.map_or(true, |s| doctor.specialization == s);
                matches_term && matches_specialization
            })
            .collect())
    }

    /// Distinct specializations in first-seen order, for the filter UI.
    pub fn specializations(&self) -> Result<Vec<String>, DoctorError> {
        let doctors = self.bookable_doctors()?;
        let mut seen = Vec::new();
        for doctor in doctors {
            if !seen.contains(&doctor.specialization) {
                seen.push(doctor.specialization);
            }
        }
        Ok(seen)
    }

    /// An approved, bookable doctor by id.
    pub fn bookable_doctor(&self, id: Uuid) -> Result<User, DoctorError> {
        let store = self.store.read()?;
        store
            .find_user(id)
            .filter(|u| u.role == Role::Doctor && u.is_approved)
            .cloned()
            .ok_or(DoctorError::NotFound)
    }

    /// Seeds the demo doctors as real, pre-approved user records into an
    /// empty store. No-op once any records exist.
    pub fn seed_demo_catalog(&self, demo_password: &str) -> Result<usize, DoctorError> {
        let mut store = self.store.write()?;
        if !store.is_empty() {
            debug!("store is not empty, skipping demo catalog seed");
            return Ok(0);
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(demo_password.as_bytes(), &salt)
            .map_err(|e| DoctorError::Seed(e.to_string()))?
            .to_string();

        let seeds = demo_doctors(&password_hash);
        let count = seeds.len();
        for doctor in seeds {
            store.insert_user(doctor)?;
        }

        info!("seeded {} demo doctors", count);
        Ok(count)
    }
}

fn slot(day: &str, start: (u32, u32), end: (u32, u32)) -> AvailabilitySlot {
    AvailabilitySlot {
        day: day.to_string(),
        start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).expect("valid seed time"),
        end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).expect("valid seed time"),
        is_available: true,
    }
}

fn demo_doctor(
    name: &str,
    email: &str,
    practice: DoctorPractice,
    password_hash: &str,
) -> User {
    User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        role: Role::Doctor,
        phone: None,
        address: None,
        is_approved: true,
        password_hash: password_hash.to_string(),
        practice: Some(practice),
        created_at: Utc::now(),
    }
}

fn demo_doctors(password_hash: &str) -> Vec<User> {
    vec![
        demo_doctor(
            "Dr. Sarah Johnson",
            "sarah.johnson@docspot.com",
            DoctorPractice {
                specialization: "Cardiology".to_string(),
                experience_years: 12,
                education: "MD - Cardiology, AIIMS Delhi".to_string(),
                consultation_fee: 1200,
                availability: vec![
                    slot("Monday", (9, 0), (17, 0)),
                    slot("Tuesday", (9, 0), (17, 0)),
                    slot("Wednesday", (9, 0), (17, 0)),
                ],
                rating: 4.8,
                review_count: 127,
                bio: Some(
                    "Experienced cardiologist specializing in preventive cardiology and heart disease management."
                        .to_string(),
                ),
            },
            password_hash,
        ),
        demo_doctor(
            "Dr. Michael Chen",
            "michael.chen@docspot.com",
            DoctorPractice {
                specialization: "Dermatology".to_string(),
                experience_years: 8,
                education: "MD - Dermatology, PGI Chandigarh".to_string(),
                consultation_fee: 950,
                availability: vec![
                    slot("Monday", (10, 0), (16, 0)),
                    slot("Thursday", (10, 0), (16, 0)),
                    slot("Friday", (10, 0), (16, 0)),
                ],
                rating: 4.6,
                review_count: 89,
                bio: Some(
                    "Board-certified dermatologist with expertise in skin cancer screening and cosmetic procedures."
                        .to_string(),
                ),
            },
            password_hash,
        ),
        demo_doctor(
            "Dr. Emily Rodriguez",
            "emily.rodriguez@docspot.com",
            DoctorPractice {
                specialization: "Pediatrics".to_string(),
                experience_years: 15,
                education: "MD - Pediatrics, KEM Hospital Mumbai".to_string(),
                consultation_fee: 800,
                availability: vec![
                    slot("Monday", (8, 0), (14, 0)),
                    slot("Tuesday", (8, 0), (14, 0)),
                    slot("Wednesday", (8, 0), (14, 0)),
                ],
                rating: 4.9,
                review_count: 203,
                bio: Some(
                    "Dedicated pediatrician with a passion for child healthcare and development.".to_string(),
                ),
            },
            password_hash,
        ),
    ]
}

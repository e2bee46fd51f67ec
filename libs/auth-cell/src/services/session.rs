use std::sync::OnceLock;

use chrono::Utc;
use regex::Regex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_models::user::{DoctorPractice, Role, User};
use shared_store::SharedStore;

use crate::models::{AuthError, RegisterRequest};
use crate::services::password;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
    })
}

/// Identity and session operations over the shared record store.
pub struct SessionService {
    store: SharedStore,
}

impl SessionService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Creates a user record. Doctors start unapproved and are not granted
    /// a session; everyone else becomes the active session immediately.
    pub fn register(&self, request: RegisterRequest) -> Result<User, AuthError> {
        self.validate_registration(&request)?;

        let mut store = self.store.write()?;

        if store.find_user_by_email(&request.email).is_some() {
            warn!("registration rejected, email already in use: {}", request.email);
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = password::hash_password(&request.password)
            .map_err(|e| AuthError::PasswordHash(e.to_string()))?;

        let is_doctor = request.role == Role::Doctor;
        let practice = is_doctor.then(|| DoctorPractice {
            specialization: request
                .specialization
                .clone()
                .unwrap_or_else(|| "General Practice".to_string()),
            experience_years: request.experience_years.unwrap_or(0),
            education: request.education.clone().unwrap_or_default(),
            consultation_fee: request.consultation_fee.unwrap_or(500),
            availability: request.availability.clone().unwrap_or_default(),
            rating: 0.0,
            review_count: 0,
            bio: request.bio.clone(),
        });

        let user = User {
            id: Uuid::new_v4(),
            name: request.name,
            email: request.email,
            role: request.role,
            phone: request.phone,
            address: request.address,
            is_approved: !is_doctor,
            password_hash,
            practice,
            created_at: Utc::now(),
        };

        store.insert_user(user.clone())?;

        if is_doctor {
            info!("doctor {} registered, awaiting admin approval", user.id);
        } else {
            store.set_session(Some(user.clone()))?;
            info!("{} {} registered and signed in", user.role, user.id);
        }

        Ok(user)
    }

    /// Looks the user up by email and verifies the password against the
    /// stored hash. Unknown email and wrong password are indistinguishable
    /// to the caller.
    pub fn establish_session(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let mut store = self.store.write()?;

        let user = store
            .find_user_by_email(email)
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?;

        let verified = password::verify_password(password, &user.password_hash)
            .map_err(|e| AuthError::PasswordHash(e.to_string()))?;
        if !verified {
            debug!("password mismatch for {}", email);
            return Err(AuthError::InvalidCredentials);
        }

        store.set_session(Some(user.clone()))?;
        info!("session established for {} {}", user.role, user.id);
        Ok(user)
    }

    /// Clears the active session. Safe to call when none is active.
    pub fn end_session(&self) -> Result<(), AuthError> {
        self.store.write()?.set_session(None)?;
        debug!("session cleared");
        Ok(())
    }

    pub fn current_session(&self) -> Result<Option<User>, AuthError> {
        Ok(self.store.read()?.session().cloned())
    }

    fn validate_registration(&self, request: &RegisterRequest) -> Result<(), AuthError> {
        if request.name.trim().is_empty() {
            return Err(AuthError::Validation("Name is required".to_string()));
        }
        if !email_regex().is_match(&request.email) || request.email.len() > 254 {
            return Err(AuthError::Validation("Invalid email address".to_string()));
        }
        if request.password.is_empty() {
            return Err(AuthError::Validation("Password is required".to_string()));
        }
        Ok(())
    }
}

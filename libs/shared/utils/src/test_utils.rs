use std::sync::Arc;

use chrono::{NaiveTime, Utc};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::user::{AvailabilitySlot, DoctorPractice, Role, User};
use shared_store::{AppState, SharedStore};

/// Builder for user fixtures. The password hash is a placeholder; tests
/// that exercise credential verification register through the session
/// service instead.
pub struct TestUser;

impl TestUser {
    pub fn patient(name: &str, email: &str) -> User {
        Self::with_role(name, email, Role::Patient)
    }

    pub fn admin(name: &str, email: &str) -> User {
        Self::with_role(name, email, Role::Admin)
    }

    pub fn doctor(name: &str, email: &str, specialization: &str, approved: bool) -> User {
        let mut user = Self::with_role(name, email, Role::Doctor);
        user.is_approved = approved;
        user.practice = Some(test_practice(specialization));
        user
    }

    fn with_role(name: &str, email: &str, role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            phone: None,
            address: None,
            is_approved: role != Role::Doctor,
            password_hash: "test-hash".to_string(),
            practice: None,
            created_at: Utc::now(),
        }
    }
}

pub fn test_practice(specialization: &str) -> DoctorPractice {
    DoctorPractice {
        specialization: specialization.to_string(),
        experience_years: 10,
        education: "MD".to_string(),
        consultation_fee: 900,
        availability: vec![AvailabilitySlot {
            day: "Monday".to_string(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).expect("valid time"),
            is_available: true,
        }],
        rating: 0.0,
        review_count: 0,
        bio: None,
    }
}

/// In-memory application state for router and handler tests.
pub fn test_state() -> Arc<AppState> {
    Arc::new(AppState::new(AppConfig::default(), SharedStore::in_memory()))
}

/// State pre-seeded with the given users, none of them the active session.
pub fn test_state_with_users(users: Vec<User>) -> Arc<AppState> {
    let state = test_state();
    {
        let mut store = state.store.write().expect("store lock");
        for user in users {
            store.insert_user(user).expect("insert fixture user");
        }
    }
    state
}

/// State with an active session, for protected-route tests.
pub fn test_state_with_session(user: User) -> Arc<AppState> {
    let state = test_state_with_users(vec![user.clone()]);
    state
        .store
        .write()
        .expect("store lock")
        .set_session(Some(user))
        .expect("set fixture session");
    state
}

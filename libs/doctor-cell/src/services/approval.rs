use tracing::{info, warn};
use uuid::Uuid;

use shared_models::user::{Role, User, UserResponse};
use shared_store::SharedStore;

use crate::models::DoctorError;

/// Admin workflow over doctor registrations: listing, approving and
/// rejecting. Rejection removes the user record entirely.
pub struct DoctorApprovalService {
    store: SharedStore,
}

impl DoctorApprovalService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn pending_doctors(&self) -> Result<Vec<UserResponse>, DoctorError> {
        self.doctors(|u| !u.is_approved)
    }

    pub fn approved_doctors(&self) -> Result<Vec<UserResponse>, DoctorError> {
        self.doctors(|u| u.is_approved)
    }

    /// Flips the approval flag, the only legal post-creation user
    /// mutation. Approving an already-approved doctor is a no-op success.
    pub fn approve(&self, doctor_id: Uuid) -> Result<UserResponse, DoctorError> {
        let mut store = self.store.write()?;

        let doctor = store.find_user(doctor_id).ok_or(DoctorError::NotFound)?;
        if doctor.role != Role::Doctor {
            return Err(DoctorError::NotADoctor);
        }
        if doctor.is_approved {
            return Ok(UserResponse::from(doctor));
        }

        let updated = store
            .mark_user_approved(doctor_id)?
            .ok_or(DoctorError::NotFound)?;
        info!("doctor {} approved", doctor_id);
        Ok(UserResponse::from(&updated))
    }

    /// Removes the doctor's registration record.
    pub fn reject(&self, doctor_id: Uuid) -> Result<(), DoctorError> {
        let mut store = self.store.write()?;

        let doctor = store.find_user(doctor_id).ok_or(DoctorError::NotFound)?;
        if doctor.role != Role::Doctor {
            return Err(DoctorError::NotADoctor);
        }

        if !store.remove_user(doctor_id)? {
            return Err(DoctorError::NotFound);
        }
        warn!("doctor {} registration rejected and removed", doctor_id);
        Ok(())
    }

    fn doctors(&self, filter: impl Fn(&User) -> bool) -> Result<Vec<UserResponse>, DoctorError> {
        let store = self.store.read()?;
        Ok(store
            .users()
            .iter()
            .filter(|u| u.role == Role::Doctor && filter(u))
            .map(UserResponse::from)
            .collect())
    }
}

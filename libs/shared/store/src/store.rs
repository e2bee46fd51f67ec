use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use shared_models::{Appointment, AppointmentUpdate, User};

use crate::backend::{MemoryBackend, Snapshot, StoreBackend, StoreError};

/// Owns the user set, the active-session pointer and the appointment set.
/// Every mutation persists the full snapshot before touching the in-memory
/// collections, so a failed save leaves the records exactly as they were.
pub struct RecordStore {
    backend: Box<dyn StoreBackend>,
    users: Vec<User>,
    session: Option<User>,
    appointments: Vec<Appointment>,
}

impl RecordStore {
    /// Start empty on the given backend, without reading prior state.
    pub fn new(backend: Box<dyn StoreBackend>) -> Self {
        Self {
            backend,
            users: Vec::new(),
            session: None,
            appointments: Vec::new(),
        }
    }

    /// Hydrate from whatever the backend last persisted.
    pub fn open(backend: Box<dyn StoreBackend>) -> Result<Self, StoreError> {
        let snapshot = backend.load()?.unwrap_or_default();
        debug!(
            users = snapshot.users.len(),
            appointments = snapshot.appointments.len(),
            "record store loaded"
        );
        Ok(Self {
            backend,
            users: snapshot.users,
            session: snapshot.session,
            appointments: snapshot.appointments,
        })
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn session(&self) -> Option<&User> {
        self.session.as_ref()
    }

    pub fn find_user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Case-sensitive exact match, as the registration uniqueness rule.
    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    /// One greater than the highest assigned appointment id.
    pub fn next_appointment_id(&self) -> u64 {
        self.appointments.iter().map(|a| a.id).max().unwrap_or(0) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.appointments.is_empty()
    }

    pub fn insert_user(&mut self, user: User) -> Result<(), StoreError> {
        let mut users = self.users.clone();
        users.push(user);
        self.commit(Snapshot {
            users,
            session: self.session.clone(),
            appointments: self.appointments.clone(),
        })
    }

    /// The only legal post-creation user mutation: flipping the approval
    /// flag. Returns the updated record, or None for an unknown id.
    pub fn mark_user_approved(&mut self, id: Uuid) -> Result<Option<User>, StoreError> {
        let Some(index) = self.users.iter().position(|u| u.id == id) else {
            return Ok(None);
        };

        let mut users = self.users.clone();
        users[index].is_approved = true;
        let updated = users[index].clone();

        self.commit(Snapshot {
            users,
            session: self.session.clone(),
            appointments: self.appointments.clone(),
        })?;
        Ok(Some(updated))
    }

    /// Removes a user record entirely. Returns false for an unknown id.
    pub fn remove_user(&mut self, id: Uuid) -> Result<bool, StoreError> {
        if !self.users.iter().any(|u| u.id == id) {
            return Ok(false);
        }

        let users: Vec<User> = self.users.iter().filter(|u| u.id != id).cloned().collect();
        self.commit(Snapshot {
            users,
            session: self.session.clone(),
            appointments: self.appointments.clone(),
        })?;
        Ok(true)
    }

    pub fn set_session(&mut self, session: Option<User>) -> Result<(), StoreError> {
        self.commit(Snapshot {
            users: self.users.clone(),
            session,
            appointments: self.appointments.clone(),
        })
    }

    pub fn insert_appointment(&mut self, appointment: Appointment) -> Result<(), StoreError> {
        let mut appointments = self.appointments.clone();
        appointments.push(appointment);
        self.commit(Snapshot {
            users: self.users.clone(),
            session: self.session.clone(),
            appointments,
        })
    }

    /// Applies a whitelisted update to one appointment. Returns the updated
    /// record, or None for an unknown id.
    pub fn update_appointment(
        &mut self,
        id: u64,
        update: AppointmentUpdate,
        now: DateTime<Utc>,
    ) -> Result<Option<Appointment>, StoreError> {
        let Some(index) = self.appointments.iter().position(|a| a.id == id) else {
            return Ok(None);
        };

        let mut appointments = self.appointments.clone();
        appointments[index].apply(update, now);
        let updated = appointments[index].clone();

        self.commit(Snapshot {
            users: self.users.clone(),
            session: self.session.clone(),
            appointments,
        })?;
        Ok(Some(updated))
    }

    fn commit(&mut self, snapshot: Snapshot) -> Result<(), StoreError> {
        self.backend.save(&snapshot)?;
        self.users = snapshot.users;
        self.session = snapshot.session;
        self.appointments = snapshot.appointments;
        Ok(())
    }
}

/// Cloneable handle through which every component reaches the one store.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<RwLock<RecordStore>>,
}

impl SharedStore {
    pub fn new(store: RecordStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(RecordStore::new(Box::new(MemoryBackend::default())))
    }

    pub fn read(&self) -> Result<RwLockReadGuard<'_, RecordStore>, StoreError> {
        self.inner.read().map_err(|_| StoreError::Poisoned)
    }

    pub fn write(&self) -> Result<RwLockWriteGuard<'_, RecordStore>, StoreError> {
        self.inner.write().map_err(|_| StoreError::Poisoned)
    }
}

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use shared_models::{Appointment, AppointmentStatus, AppointmentUpdate, Role, User};
use shared_store::{JsonFileBackend, MemoryBackend, RecordStore, Snapshot, StoreBackend, StoreError};

fn test_user(name: &str, email: &str, role: Role) -> User {
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

fn test_appointment(id: u64, patient_id: Uuid, doctor_id: Uuid) -> Appointment {
    let now = Utc::now();
    Appointment {
        id,
        patient_id,
        doctor_id,
        patient_name: "Pat".to_string(),
        doctor_name: "Dr. Doc".to_string(),
        doctor_specialization: "Cardiology".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        time: "10:00".to_string(),
        status: AppointmentStatus::Pending,
        reason: "checkup".to_string(),
        patient_age: 30,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

/// Backend whose saves can be switched off, for atomicity checks.
struct FailingBackend {
    fail: Arc<AtomicBool>,
}

impl StoreBackend for FailingBackend {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        Ok(None)
    }

    fn save(&self, _snapshot: &Snapshot) -> Result<(), StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )))
        } else {
            Ok(())
        }
    }
}

#[test]
fn json_file_backend_round_trips_the_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("docspot.json");

    let mut store = RecordStore::open(Box::new(JsonFileBackend::new(&path))).unwrap();
    let patient = test_user("Pat", "pat@example.com", Role::Patient);
    let doctor = test_user("Dr. Doc", "doc@example.com", Role::Doctor);
    store.insert_user(patient.clone()).unwrap();
    store.insert_user(doctor.clone()).unwrap();
    store
        .insert_appointment(test_appointment(1, patient.id, doctor.id))
        .unwrap();
    store.set_session(Some(patient.clone())).unwrap();

    let reopened = RecordStore::open(Box::new(JsonFileBackend::new(&path))).unwrap();
    assert_eq!(reopened.users().len(), 2);
    assert_eq!(reopened.appointments().len(), 1);
    assert_eq!(reopened.session().map(|u| u.id), Some(patient.id));
    assert_eq!(reopened.users()[0].email, "pat@example.com");
}

#[test]
fn missing_store_document_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let store = RecordStore::open(Box::new(JsonFileBackend::new(&path))).unwrap();
    assert!(store.is_empty());
    assert!(store.session().is_none());
}

#[test]
fn appointment_ids_are_monotonic() {
    let mut store = RecordStore::new(Box::new(MemoryBackend::default()));
    assert_eq!(store.next_appointment_id(), 1);

    let patient = test_user("Pat", "pat@example.com", Role::Patient);
    let doctor = test_user("Dr. Doc", "doc@example.com", Role::Doctor);
    store
        .insert_appointment(test_appointment(1, patient.id, doctor.id))
        .unwrap();
    store
        .insert_appointment(test_appointment(7, patient.id, doctor.id))
        .unwrap();

    assert_eq!(store.next_appointment_id(), 8);
}

#[test]
fn listings_preserve_insertion_order() {
    let mut store = RecordStore::new(Box::new(MemoryBackend::default()));
    let patient = test_user("Pat", "pat@example.com", Role::Patient);
    let doctor = test_user("Dr. Doc", "doc@example.com", Role::Doctor);

    for id in 1..=4 {
        store
            .insert_appointment(test_appointment(id, patient.id, doctor.id))
            .unwrap();
    }

    let ids: Vec<u64> = store.appointments().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn failed_save_leaves_records_unchanged() {
    let fail = Arc::new(AtomicBool::new(false));
    let mut store = RecordStore::new(Box::new(FailingBackend { fail: fail.clone() }));

    let patient = test_user("Pat", "pat@example.com", Role::Patient);
    let doctor = test_user("Dr. Doc", "doc@example.com", Role::Doctor);
    store.insert_user(patient.clone()).unwrap();
    store
        .insert_appointment(test_appointment(1, patient.id, doctor.id))
        .unwrap();
    let before = store.appointments()[0].clone();

    fail.store(true, Ordering::SeqCst);

    let result = store.update_appointment(
        1,
        AppointmentUpdate {
            status: Some(AppointmentStatus::Cancelled),
            ..Default::default()
        },
        Utc::now(),
    );

    assert!(result.is_err());
    assert_eq!(store.appointments()[0], before);
    assert_eq!(store.users().len(), 1);
}

#[test]
fn update_appointment_unknown_id_is_none() {
    let mut store = RecordStore::new(Box::new(MemoryBackend::default()));
    let updated = store
        .update_appointment(42, AppointmentUpdate::default(), Utc::now())
        .unwrap();
    assert!(updated.is_none());
}

#[test]
fn approve_and_remove_user() {
    let mut store = RecordStore::new(Box::new(MemoryBackend::default()));
    let doctor = test_user("Dr. Doc", "doc@example.com", Role::Doctor);
    store.insert_user(doctor.clone()).unwrap();
    assert!(!store.find_user(doctor.id).unwrap().is_approved);

    let updated = store.mark_user_approved(doctor.id).unwrap().unwrap();
    assert!(updated.is_approved);
    assert!(store.find_user(doctor.id).unwrap().is_approved);

    assert!(store.remove_user(doctor.id).unwrap());
    assert!(store.find_user(doctor.id).is_none());
    assert!(!store.remove_user(doctor.id).unwrap());
    assert!(store.mark_user_approved(doctor.id).unwrap().is_none());
}

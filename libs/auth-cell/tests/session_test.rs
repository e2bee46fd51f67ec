use assert_matches::assert_matches;

use auth_cell::models::{AuthError, RegisterRequest};
use auth_cell::services::SessionService;
use shared_models::user::Role;
use shared_store::SharedStore;

fn register_request(name: &str, email: &str, role: Role) -> RegisterRequest {
    RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: "Secret-123".to_string(),
        role,
        phone: None,
        address: None,
        specialization: None,
        experience_years: None,
        education: None,
        consultation_fee: None,
        bio: None,
        availability: None,
    }
}

fn service() -> (SessionService, SharedStore) {
    let store = SharedStore::in_memory();
    (SessionService::new(store.clone()), store)
}

#[test]
fn patient_registration_is_approved_and_signed_in() {
    let (service, store) = service();

    let user = service
        .register(register_request("Pat", "pat@example.com", Role::Patient))
        .unwrap();

    assert!(user.is_approved);
    assert!(user.practice.is_none());
    let session = store.read().unwrap().session().cloned();
    assert_eq!(session.map(|u| u.id), Some(user.id));
}

#[test]
fn admin_registration_is_approved_and_signed_in() {
    let (service, store) = service();

    let user = service
        .register(register_request("Ada", "ada@example.com", Role::Admin))
        .unwrap();

    assert!(user.is_approved);
    assert_eq!(
        store.read().unwrap().session().map(|u| u.id),
        Some(user.id)
    );
}

#[test]
fn doctor_registration_awaits_approval_without_session() {
    let (service, store) = service();

    let mut request = register_request("Dr. A", "a@x.com", Role::Doctor);
    request.specialization = Some("Cardiology".to_string());
    let user = service.register(request).unwrap();

    assert!(!user.is_approved);
    let practice = user.practice.expect("doctor gets a practice profile");
    assert_eq!(practice.specialization, "Cardiology");
    assert!(store.read().unwrap().session().is_none());
}

#[test]
fn doctor_practice_specialization_defaults_when_omitted() {
    let (service, _store) = service();

    let user = service
        .register(register_request("Dr. B", "b@x.com", Role::Doctor))
        .unwrap();

    assert_eq!(
        user.practice.unwrap().specialization,
        "General Practice"
    );
}

#[test]
fn duplicate_email_is_rejected() {
    let (service, _store) = service();

    service
        .register(register_request("Pat", "pat@example.com", Role::Patient))
        .unwrap();
    let err = service
        .register(register_request("Other", "pat@example.com", Role::Patient))
        .unwrap_err();

    assert_matches!(err, AuthError::DuplicateEmail);
}

#[test]
fn email_uniqueness_is_case_sensitive() {
    let (service, _store) = service();

    service
        .register(register_request("Pat", "pat@example.com", Role::Patient))
        .unwrap();
    // Different byte sequence, so a distinct user per current scope.
    service
        .register(register_request("Pat", "Pat@example.com", Role::Patient))
        .unwrap();
}

#[test]
fn login_verifies_the_stored_password() {
    let (service, store) = service();

    service
        .register(register_request("Pat", "pat@example.com", Role::Patient))
        .unwrap();
    service.end_session().unwrap();

    let err = service
        .establish_session("pat@example.com", "not-the-password")
        .unwrap_err();
    assert_matches!(err, AuthError::InvalidCredentials);
    assert!(store.read().unwrap().session().is_none());

    let user = service
        .establish_session("pat@example.com", "Secret-123")
        .unwrap();
    assert_eq!(
        store.read().unwrap().session().map(|u| u.id),
        Some(user.id)
    );
}

#[test]
fn unknown_email_is_invalid_credentials() {
    let (service, _store) = service();

    let err = service
        .establish_session("ghost@example.com", "whatever")
        .unwrap_err();
    assert_matches!(err, AuthError::InvalidCredentials);
}

#[test]
fn end_session_is_idempotent() {
    let (service, store) = service();

    service
        .register(register_request("Pat", "pat@example.com", Role::Patient))
        .unwrap();
    service.end_session().unwrap();
    service.end_session().unwrap();

    assert!(store.read().unwrap().session().is_none());
}

#[test]
fn registration_validates_inputs() {
    let (service, _store) = service();

    let mut request = register_request("", "pat@example.com", Role::Patient);
    assert_matches!(
        service.register(request.clone()).unwrap_err(),
        AuthError::Validation(_)
    );

    request.name = "Pat".to_string();
    request.email = "not-an-email".to_string();
    assert_matches!(
        service.register(request.clone()).unwrap_err(),
        AuthError::Validation(_)
    );

    request.email = "pat@example.com".to_string();
    request.password = String::new();
    assert_matches!(
        service.register(request).unwrap_err(),
        AuthError::Validation(_)
    );
}

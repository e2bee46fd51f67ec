use assert_matches::assert_matches;

use appointment_cell::models::AppointmentError;
use appointment_cell::services::AppointmentLifecycleService;
use shared_models::appointment::AppointmentStatus::{self, *};

#[test]
fn pending_moves_to_confirmed_or_cancelled() {
    let service = AppointmentLifecycleService::new();
    assert_eq!(service.get_valid_transitions(&Pending), vec![Confirmed, Cancelled]);
}

#[test]
fn confirmed_moves_to_completed_or_rescheduled() {
    let service = AppointmentLifecycleService::new();
    assert_eq!(service.get_valid_transitions(&Confirmed), vec![Completed, Rescheduled]);
}

#[test]
fn rescheduled_loops_back_through_the_doctor_decision() {
    let service = AppointmentLifecycleService::new();
    assert_eq!(service.get_valid_transitions(&Rescheduled), vec![Confirmed, Cancelled]);
}

#[test]
fn completed_and_cancelled_are_terminal() {
    let service = AppointmentLifecycleService::new();
    assert!(service.get_valid_transitions(&Completed).is_empty());
    assert!(service.get_valid_transitions(&Cancelled).is_empty());
}

#[test]
fn illegal_transitions_carry_the_current_status() {
    let service = AppointmentLifecycleService::new();

    let err = service
        .validate_status_transition(&Pending, &Completed)
        .unwrap_err();
    assert_matches!(err, AppointmentError::InvalidTransition(Pending));

    let err = service
        .validate_status_transition(&Cancelled, &Confirmed)
        .unwrap_err();
    assert_matches!(err, AppointmentError::InvalidTransition(Cancelled));
}

#[test]
fn transition_matrix_is_exhaustive() {
    let service = AppointmentLifecycleService::new();
    let all = [Pending, Confirmed, Completed, Cancelled, Rescheduled];

    let legal: &[(AppointmentStatus, AppointmentStatus)] = &[
        (Pending, Confirmed),
        (Pending, Cancelled),
        (Confirmed, Completed),
        (Confirmed, Rescheduled),
        (Rescheduled, Confirmed),
        (Rescheduled, Cancelled),
    ];

    for from in all {
        for to in all {
            let expected = legal.contains(&(from, to));
            let actual = service.validate_status_transition(&from, &to).is_ok();
            assert_eq!(actual, expected, "transition {} -> {}", from, to);
        }
    }
}

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use doctor_cell::models::DoctorError;
use doctor_cell::services::DoctorCatalogService;
use shared_models::appointment::{Appointment, AppointmentStatus, AppointmentUpdate};
use shared_models::user::User;
use shared_store::SharedStore;

use crate::models::{
    AppointmentError, AppointmentStats, CreateAppointmentRequest, RescheduleAppointmentRequest,
};
use crate::services::lifecycle::AppointmentLifecycleService;

pub struct AppointmentBookingService {
    store: SharedStore,
    lifecycle_service: AppointmentLifecycleService,
    catalog_service: DoctorCatalogService,
}

impl AppointmentBookingService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            lifecycle_service: AppointmentLifecycleService::new(),
            catalog_service: DoctorCatalogService::new(store.clone()),
            store,
        }
    }

    /// Books a pending appointment for the acting patient, capturing the
    /// patient/doctor snapshot fields at call time. No slot-capacity check
    /// is made: conflicting bookings for the same doctor are allowed.
    pub fn create_appointment(
        &self,
        patient: &User,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        info!(
            "booking appointment for patient {} with doctor {}",
            patient.id, request.doctor_id
        );

        Self::validate_booking_request(&request)?;

        // Resolve the doctor through the catalog before locking for the
        // insert: only approved doctor records are bookable.
        let doctor = self
            .catalog_service
            .bookable_doctor(request.doctor_id)
            .map_err(|e| match e {
                DoctorError::Store(e) => AppointmentError::Store(e),
                _ => AppointmentError::DoctorNotFound,
            })?;

        let specialization = doctor
            .practice
            .as_ref()
            .map(|p| p.specialization.clone())
            .unwrap_or_else(|| "General Practice".to_string());

        let now = Utc::now();
        let mut store = self.store.write()?;
        let appointment = Appointment {
            id: store.next_appointment_id(),
            patient_id: patient.id,
            doctor_id: doctor.id,
            patient_name: patient.name.clone(),
            doctor_name: doctor.name.clone(),
            doctor_specialization: specialization,
            date: request.date,
            time: request.time,
            status: AppointmentStatus::Pending,
            reason: request.reason,
            patient_age: request.patient_age,
            notes: None,
            created_at: now,
            updated_at: now,
        };

        store.insert_appointment(appointment.clone())?;

        info!("appointment {} booked with doctor {}", appointment.id, doctor.id);
        Ok(appointment)
    }

    /// Doctor accepts a pending (or rescheduled) appointment.
    pub fn confirm_appointment(
        &self,
        doctor: &User,
        appointment_id: u64,
    ) -> Result<Appointment, AppointmentError> {
        self.doctor_transition(doctor, appointment_id, AppointmentStatus::Confirmed, None)
    }

    /// Doctor declines a pending (or rescheduled) appointment. Cancellation
    /// is a status, not a removal.
    pub fn cancel_appointment(
        &self,
        doctor: &User,
        appointment_id: u64,
    ) -> Result<Appointment, AppointmentError> {
        self.doctor_transition(doctor, appointment_id, AppointmentStatus::Cancelled, None)
    }

    /// Doctor closes out a confirmed appointment, optionally attaching
    /// consultation notes.
    pub fn complete_appointment(
        &self,
        doctor: &User,
        appointment_id: u64,
        notes: Option<String>,
    ) -> Result<Appointment, AppointmentError> {
        self.doctor_transition(doctor, appointment_id, AppointmentStatus::Completed, notes)
    }

    /// Patient moves their confirmed appointment to a new date/time; the
    /// doctor has to confirm or cancel it again.
    pub fn reschedule_appointment(
        &self,
        patient: &User,
        appointment_id: u64,
        request: RescheduleAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        if request.time.trim().is_empty() {
            return Err(AppointmentError::Validation("Time is required".to_string()));
        }

        let mut store = self.store.write()?;
        let current = store
            .appointments()
            .iter()
            .find(|a| a.id == appointment_id)
            .cloned()
            .ok_or(AppointmentError::NotFound)?;

        if current.patient_id != patient.id {
            warn!(
                "patient {} attempted to reschedule appointment {} they do not own",
                patient.id, appointment_id
            );
            return Err(AppointmentError::Unauthorized);
        }

        self.lifecycle_service
            .validate_status_transition(&current.status, &AppointmentStatus::Rescheduled)?;

        let updated = store
            .update_appointment(
                appointment_id,
                AppointmentUpdate {
                    status: Some(AppointmentStatus::Rescheduled),
                    date: Some(request.date),
                    time: Some(request.time),
                    ..Default::default()
                },
                Utc::now(),
            )?
            .ok_or(AppointmentError::NotFound)?;

        info!("appointment {} rescheduled to {} {}", updated.id, updated.date, updated.time);
        Ok(updated)
    }

    /// A patient's appointments, in creation order.
    pub fn list_for_patient(&self, patient_id: Uuid) -> Result<Vec<Appointment>, AppointmentError> {
        let store = self.store.read()?;
        Ok(store
            .appointments()
            .iter()
            .filter(|a| a.patient_id == patient_id)
            .cloned()
            .collect())
    }

    /// A doctor's appointments, in creation order.
    pub fn list_for_doctor(&self, doctor_id: Uuid) -> Result<Vec<Appointment>, AppointmentError> {
        let store = self.store.read()?;
        Ok(store
            .appointments()
            .iter()
            .filter(|a| a.doctor_id == doctor_id)
            .cloned()
            .collect())
    }

    /// Every appointment on the platform, in creation order.
    pub fn list_all(&self) -> Result<Vec<Appointment>, AppointmentError> {
        let store = self.store.read()?;
        Ok(store.appointments().to_vec())
    }

    pub fn stats_for_doctor(
        &self,
        doctor_id: Uuid,
        today: NaiveDate,
    ) -> Result<AppointmentStats, AppointmentError> {
        let appointments = self.list_for_doctor(doctor_id)?;
        Ok(AppointmentStats::collect(&appointments, today))
    }

    pub fn platform_stats(&self, today: NaiveDate) -> Result<AppointmentStats, AppointmentError> {
        let appointments = self.list_all()?;
        Ok(AppointmentStats::collect(&appointments, today))
    }

    fn doctor_transition(
        &self,
        doctor: &User,
        appointment_id: u64,
        new_status: AppointmentStatus,
        notes: Option<String>,
    ) -> Result<Appointment, AppointmentError> {
        debug!("appointment {} transition to {}", appointment_id, new_status);

        let mut store = self.store.write()?;
        let current = store
            .appointments()
            .iter()
            .find(|a| a.id == appointment_id)
            .cloned()
            .ok_or(AppointmentError::NotFound)?;

        if current.doctor_id != doctor.id {
            warn!(
                "doctor {} attempted to act on appointment {} assigned to doctor {}",
                doctor.id, appointment_id, current.doctor_id
            );
            return Err(AppointmentError::Unauthorized);
        }

        self.lifecycle_service
            .validate_status_transition(&current.status, &new_status)?;

        let updated = store
            .update_appointment(
                appointment_id,
                AppointmentUpdate {
                    status: Some(new_status),
                    notes,
                    ..Default::default()
                },
                Utc::now(),
            )?
            .ok_or(AppointmentError::NotFound)?;

        info!(
            "appointment {} {} -> {}",
            appointment_id, current.status, updated.status
        );
        Ok(updated)
    }

    fn validate_booking_request(request: &CreateAppointmentRequest) -> Result<(), AppointmentError> {
        if request.time.trim().is_empty() {
            return Err(AppointmentError::Validation("Time is required".to_string()));
        }
        if request.reason.trim().is_empty() {
            return Err(AppointmentError::Validation("Reason is required".to_string()));
        }
        if !(1..=120).contains(&request.patient_age) {
            return Err(AppointmentError::Validation(
                "Patient age must be between 1 and 120".to_string(),
            ));
        }
        Ok(())
    }
}

pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{AppointmentError, AppointmentStats, CreateAppointmentRequest};
pub use services::{AppointmentBookingService, AppointmentLifecycleService};

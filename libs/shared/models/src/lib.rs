pub mod appointment;
pub mod error;
pub mod user;

pub use appointment::{Appointment, AppointmentStatus, AppointmentUpdate};
pub use error::AppError;
pub use user::{AvailabilitySlot, DoctorPractice, Role, User, UserResponse};

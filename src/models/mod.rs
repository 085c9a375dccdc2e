pub mod appointment;
pub mod intent;
pub mod session;

pub use appointment::{Appointment, AppointmentStatus, ExamKind};
pub use intent::Intent;
pub use session::{Draft, Session, Step};

pub mod ledger;
pub mod sessions;

pub use ledger::{AppointmentLedger, CancelError};
pub use sessions::SessionStore;

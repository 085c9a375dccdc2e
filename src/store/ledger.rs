use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::models::{Appointment, AppointmentStatus, Draft};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CancelError {
    #[error("appointment not found")]
    NotFound,
    #[error("appointment already cancelled")]
    AlreadyCancelled,
}

/// In-memory appointment records, kept for the process lifetime. Nothing
/// is persisted and nothing is physically deleted; cancellation flips the
/// status and the record stays addressable by id.
pub struct AppointmentLedger {
    seq: AtomicU64,
    rows: Mutex<HashMap<u64, Appointment>>,
}

impl AppointmentLedger {
    pub fn new() -> Self {
        AppointmentLedger {
            seq: AtomicU64::new(1),
            rows: Mutex::new(HashMap::new()),
        }
    }

    /// Store a confirmed draft under the next sequence id. The id is
    /// taken under the map lock, so ids are dense and every assigned id
    /// is immediately visible.
    pub fn insert(&self, draft: Draft) -> Appointment {
        let mut rows = self.rows.lock().unwrap();
        let id = self.seq.fetch_add(1, Ordering::SeqCst);
        let appointment = Appointment {
            id,
            patient_name: draft.name,
            phone: draft.phone,
            exam: draft.exam,
            date: draft.date,
            time: draft.time,
            status: AppointmentStatus::Scheduled,
        };
        rows.insert(id, appointment.clone());
        appointment
    }

    pub fn get(&self, id: u64) -> Option<Appointment> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    /// Flip a scheduled appointment to cancelled. Never reverts.
    pub fn cancel(&self, id: u64) -> Result<(), CancelError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&id) {
            None => Err(CancelError::NotFound),
            Some(a) if a.status == AppointmentStatus::Cancelled => {
                Err(CancelError::AlreadyCancelled)
            }
            Some(a) => {
                a.status = AppointmentStatus::Cancelled;
                Ok(())
            }
        }
    }

    /// Scheduled appointments for a phone, soonest first.
    pub fn list_by_phone(&self, phone: &str) -> Vec<Appointment> {
        let rows = self.rows.lock().unwrap();
        let mut found: Vec<Appointment> = rows
            .values()
            .filter(|a| a.phone == phone && a.status == AppointmentStatus::Scheduled)
            .cloned()
            .collect();
        found.sort_by_key(|a| (a.date, a.time));
        found
    }
}

impl Default for AppointmentLedger {
    fn default() -> Self {
        Self::new()
    }
}

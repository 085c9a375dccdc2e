use chrono::{NaiveDate, NaiveTime};

use crate::models::appointment::ExamKind;

/// Where the conversation currently stands. Both outcomes of `Confirm`
/// end the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Start,
    AskName,
    AskPhone,
    AskExam,
    AskDate,
    AskTime,
    Confirm,
}

/// Per-conversation state: the current step plus whatever draft fields
/// have been collected so far. A field stays `None` until the step that
/// asks for it stores a valid answer.
#[derive(Debug, Clone)]
pub struct Session {
    pub step: Step,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub exam: Option<ExamKind>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

impl Session {
    pub fn new() -> Self {
        Session {
            step: Step::Start,
            name: None,
            phone: None,
            exam: None,
            date: None,
            time: None,
        }
    }

    /// The complete draft, or `None` while any field is still missing.
    pub fn draft(&self) -> Option<Draft> {
        Some(Draft {
            name: self.name.clone()?,
            phone: self.phone.clone()?,
            exam: self.exam?,
            date: self.date?,
            time: self.time?,
        })
    }

    pub fn reset(&mut self) {
        *self = Session::new();
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

/// A fully collected appointment request, ready for the ledger.
#[derive(Debug, Clone)]
pub struct Draft {
    pub name: String,
    pub phone: String,
    pub exam: ExamKind,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

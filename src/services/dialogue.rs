use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};

use crate::models::{Intent, Session, Step};
use crate::services::clock::{Clock, SystemClock};
use crate::services::nlu::Lexicon;
use crate::services::{nlu, slots};
use crate::store::{AppointmentLedger, SessionStore};

/// The conversation state machine. One instance serves every session;
/// per-turn state lives in the session store and the ledger.
pub struct DialogueEngine {
    ledger: Arc<AppointmentLedger>,
    sessions: Arc<SessionStore>,
    lexicon: Lexicon,
    clock: Arc<dyn Clock>,
    session_ttl: Option<Duration>,
}

impl DialogueEngine {
    pub fn new(ledger: Arc<AppointmentLedger>, sessions: Arc<SessionStore>) -> Self {
        DialogueEngine {
            ledger,
            sessions,
            lexicon: Lexicon::default(),
            clock: Arc::new(SystemClock),
            session_ttl: None,
        }
    }

    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Evict sessions idle for longer than `ttl` at the start of each
    /// turn. `None` (the default) keeps abandoned sessions forever.
    pub fn with_session_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Advance one conversation by one message and produce the reply.
    /// Total over its inputs: empty or malformed text still gets a
    /// user-facing reply, never an error.
    pub fn handle(&self, session_id: &str, raw: &str) -> String {
        let now = self.clock.now();
        if let Some(ttl) = self.session_ttl {
            self.sessions.evict_idle(ttl, now);
        }

        let msg = raw.trim();
        let intent = nlu::classify(&self.lexicon, msg);

        let session = self.sessions.get_or_create(session_id, now);
        let mut st = session.lock().unwrap();

        tracing::info!(
            session = session_id,
            step = ?st.step,
            intent = ?intent,
            "processing message"
        );

        // Cancel and list act from any step; everything else is up to the
        // current step.
        match intent {
            Intent::Cancel(id) => self.cancel_appointment(id),
            Intent::List => self.list_appointments(&mut st),
            _ => self.advance(session_id, &mut st, msg, intent, now),
        }
    }

    fn cancel_appointment(&self, id: u64) -> String {
        match self.ledger.cancel(id) {
            Ok(()) => {
                tracing::info!(id, "appointment cancelled");
                format!("Appointment #{id} has been cancelled.")
            }
            Err(e) => {
                tracing::info!(id, error = %e, "cancellation rejected");
                format!("I couldn't find appointment #{id}.")
            }
        }
    }

    fn list_appointments(&self, st: &mut Session) -> String {
        let Some(phone) = st.phone.clone() else {
            st.step = Step::AskPhone;
            return "What is your phone number? (digits only)".to_string();
        };

        let scheduled = self.ledger.list_by_phone(&phone);
        if scheduled.is_empty() {
            return "You have no upcoming appointments.".to_string();
        }

        let mut out = String::from("Your appointments:\n");
        for appointment in &scheduled {
            out.push_str(&appointment.summary());
            out.push('\n');
        }
        out.push_str("\nTo cancel one, send: cancel #ID");
        out
    }

    fn advance(
        &self,
        session_id: &str,
        st: &mut Session,
        msg: &str,
        intent: Intent,
        now: NaiveDateTime,
    ) -> String {
        match (st.step, intent) {
            (Step::Start, Intent::Book) => {
                st.step = Step::AskName;
                "Great! What is your full name?".to_string()
            }
            (Step::Start, _) => {
                "Hello! I'm the clinic's exam booking assistant. Would you like to \
                 **book**, **list** or **cancel #ID**?"
                    .to_string()
            }
            (Step::AskName, _) => {
                if msg.chars().count() < 2 {
                    return "Could you repeat your full name?".to_string();
                }
                st.name = Some(msg.to_string());
                st.step = Step::AskPhone;
                "What is your phone number? (digits only)".to_string()
            }
            (Step::AskPhone, _) => {
                let digits = nlu::digits(msg);
                if digits.len() < 8 {
                    return "Invalid phone number. Send digits only (area code + number)."
                        .to_string();
                }
                st.phone = Some(digits);
                st.step = Step::AskExam;
                "Which exam? (Blood, Urine, X-Ray, Tomography)".to_string()
            }
            (Step::AskExam, _) => {
                let Some(exam) = nlu::match_exam(&self.lexicon, msg) else {
                    return "I didn't recognize that exam. Reply with: Blood, Urine, X-Ray \
                            or Tomography."
                        .to_string();
                };
                st.exam = Some(exam);
                st.step = Step::AskDate;
                "For which date? (DD/MM/YYYY, or \"today\" / \"tomorrow\")".to_string()
            }
            (Step::AskDate, _) => {
                let Some(date) = nlu::parse_date(&self.lexicon, msg, now.date()) else {
                    return "Invalid date. Use DD/MM/YYYY (e.g. 22/10/2025).".to_string();
                };
                st.date = Some(date);
                let open = slots::available_slots(date, now);
                if open.is_empty() {
                    return "No available times on that date. Please send another date \
                            (DD/MM/YYYY)."
                        .to_string();
                }
                st.step = Step::AskTime;
                let mut out = String::from("Available times:\n");
                for time in &open {
                    out.push_str(&format!("• {}\n", time.format("%H:%M")));
                }
                out.push_str("Pick a time (HH:MM).");
                out
            }
            (Step::AskTime, _) => {
                let Some(time) = nlu::parse_time(&self.lexicon, msg) else {
                    return "Invalid time. Use HH:MM (e.g. 09:30).".to_string();
                };
                st.time = Some(time);
                st.step = Step::Confirm;
                match st.draft() {
                    Some(draft) => format!(
                        "Confirm this appointment?\nPatient: {}\nPhone: {}\nExam: {}\n\
                         Date/time: {} {}\nReply YES or NO.",
                        draft.name,
                        draft.phone,
                        draft.exam,
                        draft.date.format("%d/%m/%Y"),
                        draft.time.format("%H:%M"),
                    ),
                    None => self.abort(session_id, st),
                }
            }
            (Step::Confirm, _) => {
                if !nlu::is_affirmative(&self.lexicon, msg) {
                    self.finish(session_id, st);
                    return "No problem, nothing was booked. Anything else I can help \
                            with? (book / list)"
                        .to_string();
                }
                match st.draft() {
                    Some(draft) => {
                        let appointment = self.ledger.insert(draft);
                        tracing::info!(
                            id = appointment.id,
                            session = session_id,
                            "appointment booked"
                        );
                        let reply = format!(
                            "Appointment booked!\nCode: #{}\n{}\nKeep this code in case \
                             you need to cancel.",
                            appointment.id,
                            appointment.summary(),
                        );
                        self.finish(session_id, st);
                        reply
                    }
                    None => self.abort(session_id, st),
                }
            }
        }
    }

    /// Defensive reset for a session that reached confirmation with an
    /// incomplete draft.
    fn abort(&self, session_id: &str, st: &mut Session) -> String {
        tracing::warn!(session = session_id, "incomplete draft at confirmation, resetting");
        self.finish(session_id, st);
        "I'm sorry, something went wrong. Could we start over? Say **book** to begin."
            .to_string()
    }

    /// Terminal transition. The in-memory value is reset before the store
    /// entry is dropped, so a concurrent message still holding this
    /// session sees a fresh `Start` instead of a stale `Confirm`.
    fn finish(&self, session_id: &str, st: &mut Session) {
        st.reset();
        self.sessions.remove(session_id);
    }
}

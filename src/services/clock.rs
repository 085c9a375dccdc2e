use chrono::{Local, NaiveDateTime};

/// Source of "now" for the dialogue engine. The engine never reads the
/// system clock directly, so tests can pin time wherever they need it.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the server's local timezone, which is how patients mean
/// "today" and "tomorrow".
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

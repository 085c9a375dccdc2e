use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

// Clinic hours: half-hour slots from 08:00, last one ending at 17:00.
const OPEN: NaiveTime = match NaiveTime::from_hms_opt(8, 0, 0) {
    Some(t) => t,
    None => unreachable!(),
};
const CLOSE: NaiveTime = match NaiveTime::from_hms_opt(17, 0, 0) {
    Some(t) => t,
    None => unreachable!(),
};
const SLOT_MINUTES: i64 = 30;

/// Bookable start times for `date`, in ascending order. Weekends have no
/// slots, and only starts strictly after `now` are offered, so a date in
/// the past (or today after closing) yields an empty list.
pub fn available_slots(date: NaiveDate, now: NaiveDateTime) -> Vec<NaiveTime> {
    if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        return Vec::new();
    }

    let slot = Duration::minutes(SLOT_MINUTES);
    let mut slots = Vec::new();
    let mut start = OPEN;
    while start + slot <= CLOSE {
        if date.and_time(start) > now {
            slots.push(start);
        }
        start = start + slot;
    }
    slots
}

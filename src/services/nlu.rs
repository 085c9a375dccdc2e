use chrono::{Duration, NaiveDate, NaiveTime};

use crate::models::{ExamKind, Intent};

/// The literals the engine recognizes, kept as data so another locale is
/// a different `Lexicon` rather than a different state machine.
#[derive(Debug, Clone)]
pub struct Lexicon {
    /// Substrings that start the booking flow (only honored at `Start`).
    pub book_keywords: Vec<String>,
    /// Substrings that request the appointment listing.
    pub list_keywords: Vec<String>,
    /// Word that, together with a number, requests a cancellation.
    pub cancel_keyword: String,
    /// Lowercase prefixes accepted as "yes" at the confirmation step.
    pub affirmative_prefixes: Vec<String>,
    /// Substrings standing for the current date.
    pub today_keywords: Vec<String>,
    /// Substrings standing for the current date plus one day.
    pub tomorrow_keywords: Vec<String>,
    /// chrono formats tried in order when parsing a date.
    pub date_formats: Vec<String>,
    /// chrono formats tried in order when parsing a time.
    pub time_formats: Vec<String>,
    /// Exam stems in precedence order; the first containment wins.
    pub exam_keywords: Vec<(ExamKind, Vec<String>)>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Lexicon {
            book_keywords: vec!["book".into(), "schedule".into()],
            list_keywords: vec!["list".into(), "my appointments".into(), "view".into()],
            cancel_keyword: "cancel".into(),
            affirmative_prefixes: vec!["y".into()],
            today_keywords: vec!["today".into()],
            tomorrow_keywords: vec!["tomorrow".into()],
            date_formats: vec!["%d/%m/%Y".into(), "%d-%m-%Y".into()],
            time_formats: vec!["%H:%M".into()],
            exam_keywords: vec![
                (ExamKind::Blood, vec!["blood".into()]),
                (ExamKind::Urine, vec!["urine".into()]),
                (ExamKind::XRay, vec!["x-ray".into(), "xray".into(), "x ray".into()]),
                (ExamKind::Tomography, vec!["tomo".into()]),
            ],
        }
    }
}

/// Classify the global intent of a raw message. Cancellation needs the
/// cancel keyword as a whole word plus a number somewhere in the text;
/// list and book match on plain containment.
pub fn classify(lexicon: &Lexicon, text: &str) -> Intent {
    let low = text.to_lowercase();

    let has_cancel_word = low
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word == lexicon.cancel_keyword);
    if has_cancel_word {
        if let Some(id) = first_number(&low) {
            return Intent::Cancel(id);
        }
    }

    if lexicon.list_keywords.iter().any(|k| low.contains(k.as_str())) {
        return Intent::List;
    }
    if lexicon.book_keywords.iter().any(|k| low.contains(k.as_str())) {
        return Intent::Book;
    }
    Intent::Unknown
}

/// First maximal run of ASCII digits in the text, parsed as an id.
pub fn first_number(text: &str) -> Option<u64> {
    let run: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    run.parse().ok()
}

/// Digits-only projection of the text, e.g. `(11) 99999-8888` becomes
/// `11999998888`.
pub fn digits(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Interpret a free-text date: literal today/tomorrow words first, then
/// the lexicon's numeric formats in order. First success wins.
pub fn parse_date(lexicon: &Lexicon, text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let low = text.trim().to_lowercase();
    if lexicon.today_keywords.iter().any(|k| low.contains(k.as_str())) {
        return Some(today);
    }
    if lexicon.tomorrow_keywords.iter().any(|k| low.contains(k.as_str())) {
        return Some(today + Duration::days(1));
    }
    lexicon
        .date_formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&low, format).ok())
}

pub fn parse_time(lexicon: &Lexicon, text: &str) -> Option<NaiveTime> {
    let trimmed = text.trim();
    lexicon
        .time_formats
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
}

/// Map free text to an exam by stem containment, first match wins.
pub fn match_exam(lexicon: &Lexicon, text: &str) -> Option<ExamKind> {
    let low = text.to_lowercase();
    for (exam, stems) in &lexicon.exam_keywords {
        if stems.iter().any(|s| low.contains(s.as_str())) {
            return Some(*exam);
        }
    }
    None
}

/// Whether the message counts as "yes" at the confirmation step.
pub fn is_affirmative(lexicon: &Lexicon, text: &str) -> bool {
    let low = text.trim().to_lowercase();
    lexicon
        .affirmative_prefixes
        .iter()
        .any(|prefix| low.starts_with(prefix.as_str()))
}

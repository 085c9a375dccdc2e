use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// The fixed set of exams the clinic schedules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExamKind {
    Blood,
    Urine,
    XRay,
    Tomography,
}

impl ExamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExamKind::Blood => "Blood",
            ExamKind::Urine => "Urine",
            ExamKind::XRay => "X-Ray",
            ExamKind::Tomography => "Tomography",
        }
    }
}

impl std::fmt::Display for ExamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cancellation is a one-way status flip; records are never deleted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: u64,
    pub patient_name: String,
    pub phone: String,
    pub exam: ExamKind,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// One-line rendering used in listings and replies, e.g.
    /// `#12 • Blood • 22/10/2025 09:00`.
    pub fn summary(&self) -> String {
        format!(
            "#{} • {} • {} {}",
            self.id,
            self.exam,
            self.date.format("%d/%m/%Y"),
            self.time.format("%H:%M"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_format() {
        let appointment = Appointment {
            id: 12,
            patient_name: "Maria Silva".to_string(),
            phone: "11999998888".to_string(),
            exam: ExamKind::Blood,
            date: NaiveDate::from_ymd_opt(2025, 10, 22).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            status: AppointmentStatus::Scheduled,
        };
        assert_eq!(appointment.summary(), "#12 • Blood • 22/10/2025 09:00");
    }

    #[test]
    fn test_exam_display_names() {
        assert_eq!(ExamKind::Blood.to_string(), "Blood");
        assert_eq!(ExamKind::XRay.to_string(), "X-Ray");
        assert_eq!(ExamKind::Tomography.to_string(), "Tomography");
    }
}

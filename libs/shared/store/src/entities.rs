use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==============================================================================
// USERS
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Doctor,
    Patient,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Doctor => "doctor",
            UserRole::Patient => "patient",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

// ==============================================================================
// DIRECTORY
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specialty {
    pub id: Uuid,
    pub name_ar: String,
    pub name_en: Option<String>,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub name_ar: String,
    pub name_en: Option<String>,
    pub city_ar: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ==============================================================================
// DOCTORS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    /// Login account of the doctor, when one exists.
    pub user_id: Option<Uuid>,
    pub name_ar: String,
    pub name_en: Option<String>,
    pub specialty_id: Uuid,
    pub location_id: Uuid,
    pub bio_ar: Option<String>,
    /// Slot granularity in minutes.
    pub consultation_duration: i32,
    pub consultation_price: f64,
    pub rating: f32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One recurring weekly availability window. A doctor may have several rows
/// on the same weekday (e.g. a morning and an evening shift); rows for the
/// same doctor/day must not overlap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSchedule {
    pub id: Uuid,
    pub doctor_id: Uuid,
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_active: bool,
}

/// Inclusive date range during which no slots are offered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorVacation {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DoctorVacation {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

// ==============================================================================
// APPOINTMENTS
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
    }

    /// Cancelled appointments release their slot; everything else blocks it.
    pub fn blocks_slot(&self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled)
    }

    /// pending → confirmed → completed, with cancelled reachable from any
    /// non-terminal state. Everything else is rejected at the API boundary.
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Confirmed, Completed) | (Pending, Cancelled) | (Confirmed, Cancelled)
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: AppointmentStatus,
    pub price: f64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// Half-open interval overlap test against another time range on the
    /// same date: `self.start < end && self.end > start`.
    pub fn overlaps(&self, start: NaiveTime, end: NaiveTime) -> bool {
        self.start_time < end && self.end_time > start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn forward_transitions_are_allowed() {
        assert!(AppointmentStatus::Pending.can_transition_to(AppointmentStatus::Confirmed));
        assert!(AppointmentStatus::Confirmed.can_transition_to(AppointmentStatus::Completed));
    }

    #[test]
    fn cancellation_is_allowed_from_non_terminal_states() {
        assert!(AppointmentStatus::Pending.can_transition_to(AppointmentStatus::Cancelled));
        assert!(AppointmentStatus::Confirmed.can_transition_to(AppointmentStatus::Cancelled));
    }

    #[test]
    fn terminal_states_admit_no_transition() {
        for next in [
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
        ] {
            assert!(!AppointmentStatus::Completed.can_transition_to(next));
            assert!(!AppointmentStatus::Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn skipping_confirmation_is_rejected() {
        assert!(!AppointmentStatus::Pending.can_transition_to(AppointmentStatus::Completed));
        assert!(!AppointmentStatus::Confirmed.can_transition_to(AppointmentStatus::Pending));
    }

    #[test]
    fn half_open_overlap() {
        let appt = Appointment {
            id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            start_time: time(10, 0),
            end_time: time(10, 30),
            status: AppointmentStatus::Confirmed,
            price: 150.0,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(appt.overlaps(time(10, 15), time(10, 45)));
        assert!(appt.overlaps(time(9, 45), time(10, 15)));
        // Touching boundaries do not overlap.
        assert!(!appt.overlaps(time(10, 30), time(11, 0)));
        assert!(!appt.overlaps(time(9, 30), time(10, 0)));
    }

    #[test]
    fn vacation_range_is_inclusive() {
        let vacation = DoctorVacation {
            id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
            start_date: NaiveDate::from_ymd_opt(2025, 7, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 7, 15).unwrap(),
            reason: None,
            created_at: Utc::now(),
        };

        assert!(vacation.covers(NaiveDate::from_ymd_opt(2025, 7, 10).unwrap()));
        assert!(vacation.covers(NaiveDate::from_ymd_opt(2025, 7, 15).unwrap()));
        assert!(!vacation.covers(NaiveDate::from_ymd_opt(2025, 7, 16).unwrap()));
    }
}

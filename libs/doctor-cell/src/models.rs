use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDoctorRequest {
    pub user_id: Option<Uuid>,
    pub name_ar: String,
    pub name_en: Option<String>,
    pub specialty_id: Uuid,
    pub location_id: Uuid,
    pub bio_ar: Option<String>,
    pub consultation_duration: Option<i32>,
    pub consultation_price: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDoctorRequest {
    pub name_ar: Option<String>,
    pub name_en: Option<String>,
    pub specialty_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub bio_ar: Option<String>,
    pub consultation_duration: Option<i32>,
    pub consultation_price: Option<f64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct DoctorSearchQuery {
    pub specialty_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    /// Substring match on the doctor name, Arabic or English.
    pub q: Option<String>,
    pub include_inactive: Option<bool>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateScheduleRequest {
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateScheduleRequest {
    pub day_of_week: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateVacationRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub date: NaiveDate,
}

/// Why a day has (or has no) bookable slots.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Available,
    OnVacation,
    NotScheduled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailableSlot {
    /// "HH:MM"
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i32,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayAvailability {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub status: DayStatus,
    pub slots: Vec<AvailableSlot>,
}

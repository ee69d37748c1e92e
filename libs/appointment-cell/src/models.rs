use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use shared_store::entities::AppointmentStatus;

#[derive(Debug, Clone, Deserialize)]
pub struct BookAppointmentRequest {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    /// "HH:MM"
    pub start_time: String,
    /// Defaults to `start_time` plus the doctor's consultation duration.
    pub end_time: Option<String>,
    pub notes: Option<String>,
    // Admin-created bookings attach (or create) the patient by email.
    pub patient_name: Option<String>,
    pub patient_email: Option<String>,
    pub patient_phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AppointmentListQuery {
    pub doctor_id: Option<Uuid>,
    pub patient_id: Option<Uuid>,
    pub status: Option<AppointmentStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::entities::{
    Appointment, AppointmentStatus, Doctor, DoctorSchedule, DoctorVacation, Location, Specialty,
    User, UserRole,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(&'static str),

    #[error("conflict: {0}")]
    Conflict(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Default)]
pub struct DoctorFilter {
    pub specialty_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    /// Case-insensitive substring match on Arabic or English name.
    pub query: Option<String>,
    pub include_inactive: bool,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    pub doctor_id: Option<Uuid>,
    pub patient_id: Option<Uuid>,
    pub status: Option<AppointmentStatus>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the email is already registered.
    async fn insert_user(&self, user: User) -> StoreResult<User>;
    async fn get_user(&self, id: Uuid) -> StoreResult<User>;
    async fn find_user_by_email(&self, email: &str) -> Option<User>;
    async fn count_users_with_role(&self, role: UserRole) -> usize;
}

#[async_trait]
pub trait DoctorRepository: Send + Sync {
    async fn insert_doctor(&self, doctor: Doctor) -> Doctor;
    async fn get_doctor(&self, id: Uuid) -> StoreResult<Doctor>;
    async fn update_doctor(&self, doctor: Doctor) -> StoreResult<Doctor>;
    async fn find_doctor_by_user(&self, user_id: Uuid) -> Option<Doctor>;
    async fn search_doctors(&self, filter: &DoctorFilter) -> Vec<Doctor>;
    async fn count_doctors(&self, active_only: bool) -> usize;
}

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn insert_schedule(&self, row: DoctorSchedule) -> DoctorSchedule;
    async fn get_schedule(&self, id: Uuid) -> StoreResult<DoctorSchedule>;
    async fn update_schedule(&self, row: DoctorSchedule) -> StoreResult<DoctorSchedule>;
    async fn delete_schedule(&self, id: Uuid) -> StoreResult<()>;
    /// All rows for a doctor, ordered by weekday then start time.
    async fn schedules_for_doctor(&self, doctor_id: Uuid) -> Vec<DoctorSchedule>;
}

#[async_trait]
pub trait VacationRepository: Send + Sync {
    async fn insert_vacation(&self, vacation: DoctorVacation) -> DoctorVacation;
    async fn delete_vacation(&self, id: Uuid) -> StoreResult<()>;
    async fn vacations_for_doctor(&self, doctor_id: Uuid) -> Vec<DoctorVacation>;
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Conflict-checked insert: verifies the requested interval against all
    /// slot-blocking appointments for the same doctor and date, and inserts
    /// only when free. Check and insert happen under one write lock so two
    /// concurrent bookings of the same slot cannot both succeed.
    async fn book_appointment(&self, appointment: Appointment) -> StoreResult<Appointment>;
    async fn get_appointment(&self, id: Uuid) -> StoreResult<Appointment>;
    async fn update_appointment(&self, appointment: Appointment) -> StoreResult<Appointment>;
    async fn search_appointments(&self, filter: &AppointmentFilter) -> Vec<Appointment>;
    /// Non-cancelled appointments for a doctor on a date, ordered by start.
    async fn blocking_appointments_on(&self, doctor_id: Uuid, date: NaiveDate) -> Vec<Appointment>;
}

#[async_trait]
pub trait SpecialtyRepository: Send + Sync {
    /// Fails with `Conflict` on a duplicate Arabic name.
    async fn insert_specialty(&self, specialty: Specialty) -> StoreResult<Specialty>;
    async fn get_specialty(&self, id: Uuid) -> StoreResult<Specialty>;
    async fn update_specialty(&self, specialty: Specialty) -> StoreResult<Specialty>;
    async fn delete_specialty(&self, id: Uuid) -> StoreResult<()>;
    async fn list_specialties(&self) -> Vec<Specialty>;
}

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn insert_location(&self, location: Location) -> StoreResult<Location>;
    async fn get_location(&self, id: Uuid) -> StoreResult<Location>;
    async fn update_location(&self, location: Location) -> StoreResult<Location>;
    async fn delete_location(&self, id: Uuid) -> StoreResult<()>;
    async fn list_locations(&self) -> Vec<Location>;
}

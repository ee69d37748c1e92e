use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use tracing::debug;
use uuid::Uuid;

use shared_models::error::AppError;
use shared_store::entities::{Appointment, DoctorSchedule, DoctorVacation};
use shared_store::repo::{
    AppointmentRepository, DoctorRepository, ScheduleRepository, VacationRepository,
};
use shared_store::MemoryStore;
use shared_utils::time::{format_hhmm, minutes_since_midnight, time_from_minutes};

use crate::models::{AvailableSlot, DayAvailability, DayStatus};

/// 0 = Sunday, 1 = Monday, etc., matching the stored `day_of_week`.
pub fn weekday_index(date: NaiveDate) -> i32 {
    match date.weekday() {
        Weekday::Sun => 0,
        Weekday::Mon => 1,
        Weekday::Tue => 2,
        Weekday::Wed => 3,
        Weekday::Thu => 4,
        Weekday::Fri => 5,
        Weekday::Sat => 6,
    }
}

/// Compute the bookable slots for one doctor-day. Pure function of its
/// inputs: callers pass `now` so "today" filtering stays deterministic.
///
/// A slot survives when its half-open interval lies inside an active
/// schedule window for the weekday, does not intersect any slot-blocking
/// appointment on that date, and (for today) has not already started.
pub fn compute_day_slots(
    date: NaiveDate,
    now: DateTime<Utc>,
    duration_minutes: i32,
    price: f64,
    schedules: &[DoctorSchedule],
    vacations: &[DoctorVacation],
    appointments: &[Appointment],
) -> (DayStatus, Vec<AvailableSlot>) {
    if vacations.iter().any(|v| v.covers(date)) {
        return (DayStatus::OnVacation, vec![]);
    }

    let day_of_week = weekday_index(date);
    let windows: Vec<&DoctorSchedule> = schedules
        .iter()
        .filter(|row| row.is_active && row.day_of_week == day_of_week)
        .collect();
    if windows.is_empty() {
        return (DayStatus::NotScheduled, vec![]);
    }

    let duration = if duration_minutes > 0 { duration_minutes } else { 30 };
    let is_today = now.date_naive() == date;
    let now_minutes = minutes_since_midnight(now.time());

    let mut slots = Vec::new();
    for window in windows {
        let window_end = minutes_since_midnight(window.end_time);
        let mut current = minutes_since_midnight(window.start_time);

        while current + duration <= window_end {
            let start_time = time_from_minutes(current);
            let end_time = time_from_minutes(current + duration);

            let taken = appointments.iter().any(|appt| {
                appt.date == date
                    && appt.status.blocks_slot()
                    && appt.overlaps(start_time, end_time)
            });
            let already_started = is_today && current <= now_minutes;

            if !taken && !already_started {
                slots.push(AvailableSlot {
                    start_time: format_hhmm(start_time),
                    end_time: format_hhmm(end_time),
                    duration_minutes: duration,
                    price,
                });
            }

            current += duration;
        }
    }

    // "HH:MM" sorts chronologically.
    slots.sort_by(|a, b| a.start_time.cmp(&b.start_time));

    (DayStatus::Available, slots)
}

pub struct AvailabilityService {
    doctors: Arc<dyn DoctorRepository>,
    schedules: Arc<dyn ScheduleRepository>,
    vacations: Arc<dyn VacationRepository>,
    appointments: Arc<dyn AppointmentRepository>,
}

impl AvailabilityService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            doctors: store.clone(),
            schedules: store.clone(),
            vacations: store.clone(),
            appointments: store,
        }
    }

    /// The returned list is advisory: a slot may be taken by the time the
    /// booking request lands, so the write path re-checks conflicts.
    pub async fn day_slots(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
    ) -> Result<DayAvailability, AppError> {
        debug!("Calculating available slots for doctor {} on {}", doctor_id, date);

        let doctor = self
            .doctors
            .get_doctor(doctor_id)
            .await
            .map_err(|_| AppError::NotFound("الطبيب غير موجود".to_string()))?;

        let schedules = self.schedules.schedules_for_doctor(doctor_id).await;
        let vacations = self.vacations.vacations_for_doctor(doctor_id).await;
        let appointments = self
            .appointments
            .blocking_appointments_on(doctor_id, date)
            .await;

        let (status, slots) = compute_day_slots(
            date,
            Utc::now(),
            doctor.consultation_duration,
            doctor.consultation_price,
            &schedules,
            &vacations,
            &appointments,
        );

        debug!("Found {} available slots", slots.len());
        Ok(DayAvailability {
            doctor_id,
            date,
            status,
            slots,
        })
    }
}

use std::sync::Arc;

use chrono::{NaiveTime, Utc};
use tracing::debug;
use uuid::Uuid;

use shared_models::error::AppError;
use shared_store::entities::{DoctorSchedule, DoctorVacation};
use shared_store::repo::{DoctorRepository, ScheduleRepository, VacationRepository};
use shared_store::MemoryStore;
use shared_utils::time::parse_hhmm;

use crate::models::{CreateScheduleRequest, CreateVacationRequest, UpdateScheduleRequest};

pub struct ScheduleService {
    doctors: Arc<dyn DoctorRepository>,
    schedules: Arc<dyn ScheduleRepository>,
    vacations: Arc<dyn VacationRepository>,
}

impl ScheduleService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            doctors: store.clone(),
            schedules: store.clone(),
            vacations: store,
        }
    }

    pub async fn list_schedules(&self, doctor_id: Uuid) -> Result<Vec<DoctorSchedule>, AppError> {
        self.ensure_doctor(doctor_id).await?;
        Ok(self.schedules.schedules_for_doctor(doctor_id).await)
    }

    pub async fn create_schedule(
        &self,
        doctor_id: Uuid,
        request: CreateScheduleRequest,
    ) -> Result<DoctorSchedule, AppError> {
        debug!("Creating schedule for doctor {}", doctor_id);
        self.ensure_doctor(doctor_id).await?;

        let (start_time, end_time) =
            validate_window(request.day_of_week, &request.start_time, &request.end_time)?;

        self.ensure_no_window_overlap(doctor_id, request.day_of_week, start_time, end_time, None)
            .await?;

        Ok(self
            .schedules
            .insert_schedule(DoctorSchedule {
                id: Uuid::new_v4(),
                doctor_id,
                day_of_week: request.day_of_week,
                start_time,
                end_time,
                is_active: request.is_active.unwrap_or(true),
            })
            .await)
    }

    pub async fn update_schedule(
        &self,
        doctor_id: Uuid,
        schedule_id: Uuid,
        request: UpdateScheduleRequest,
    ) -> Result<DoctorSchedule, AppError> {
        let mut row = self.owned_schedule(doctor_id, schedule_id).await?;

        if let Some(day_of_week) = request.day_of_week {
            row.day_of_week = day_of_week;
        }
        if let Some(ref start) = request.start_time {
            row.start_time = parse_hhmm(start).map_err(AppError::ValidationError)?;
        }
        if let Some(ref end) = request.end_time {
            row.end_time = parse_hhmm(end).map_err(AppError::ValidationError)?;
        }
        if let Some(is_active) = request.is_active {
            row.is_active = is_active;
        }

        validate_day(row.day_of_week)?;
        if row.start_time >= row.end_time {
            return Err(AppError::ValidationError(
                "وقت البداية يجب أن يكون قبل وقت النهاية".to_string(),
            ));
        }

        if row.is_active {
            self.ensure_no_window_overlap(
                doctor_id,
                row.day_of_week,
                row.start_time,
                row.end_time,
                Some(schedule_id),
            )
            .await?;
        }

        self.schedules
            .update_schedule(row)
            .await
            .map_err(|_| AppError::NotFound("فترة الدوام غير موجودة".to_string()))
    }

    pub async fn delete_schedule(&self, doctor_id: Uuid, schedule_id: Uuid) -> Result<(), AppError> {
        self.owned_schedule(doctor_id, schedule_id).await?;
        self.schedules
            .delete_schedule(schedule_id)
            .await
            .map_err(|_| AppError::NotFound("فترة الدوام غير موجودة".to_string()))
    }

    pub async fn list_vacations(&self, doctor_id: Uuid) -> Result<Vec<DoctorVacation>, AppError> {
        self.ensure_doctor(doctor_id).await?;
        Ok(self.vacations.vacations_for_doctor(doctor_id).await)
    }

    pub async fn add_vacation(
        &self,
        doctor_id: Uuid,
        request: CreateVacationRequest,
    ) -> Result<DoctorVacation, AppError> {
        self.ensure_doctor(doctor_id).await?;

        if request.start_date > request.end_date {
            return Err(AppError::ValidationError(
                "تاريخ بداية الإجازة يجب أن يسبق تاريخ نهايتها".to_string(),
            ));
        }

        Ok(self
            .vacations
            .insert_vacation(DoctorVacation {
                id: Uuid::new_v4(),
                doctor_id,
                start_date: request.start_date,
                end_date: request.end_date,
                reason: request.reason,
                created_at: Utc::now(),
            })
            .await)
    }

    pub async fn delete_vacation(&self, doctor_id: Uuid, vacation_id: Uuid) -> Result<(), AppError> {
        let owned = self
            .vacations
            .vacations_for_doctor(doctor_id)
            .await
            .iter()
            .any(|v| v.id == vacation_id);
        if !owned {
            return Err(AppError::NotFound("الإجازة غير موجودة".to_string()));
        }
        self.vacations
            .delete_vacation(vacation_id)
            .await
            .map_err(|_| AppError::NotFound("الإجازة غير موجودة".to_string()))
    }

    async fn ensure_doctor(&self, doctor_id: Uuid) -> Result<(), AppError> {
        self.doctors
            .get_doctor(doctor_id)
            .await
            .map_err(|_| AppError::NotFound("الطبيب غير موجود".to_string()))?;
        Ok(())
    }

    async fn owned_schedule(
        &self,
        doctor_id: Uuid,
        schedule_id: Uuid,
    ) -> Result<DoctorSchedule, AppError> {
        let row = self
            .schedules
            .get_schedule(schedule_id)
            .await
            .map_err(|_| AppError::NotFound("فترة الدوام غير موجودة".to_string()))?;
        if row.doctor_id != doctor_id {
            return Err(AppError::NotFound("فترة الدوام غير موجودة".to_string()));
        }
        Ok(row)
    }

    async fn ensure_no_window_overlap(
        &self,
        doctor_id: Uuid,
        day_of_week: i32,
        start_time: NaiveTime,
        end_time: NaiveTime,
        exclude_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        let existing = self.schedules.schedules_for_doctor(doctor_id).await;
        let overlapping = existing.iter().any(|row| {
            row.is_active
                && row.day_of_week == day_of_week
                && Some(row.id) != exclude_id
                && start_time < row.end_time
                && end_time > row.start_time
        });
        if overlapping {
            return Err(AppError::Conflict(
                "تتعارض فترة الدوام مع فترة أخرى في نفس اليوم".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_day(day_of_week: i32) -> Result<(), AppError> {
    if !(0..=6).contains(&day_of_week) {
        return Err(AppError::ValidationError(
            "اليوم يجب أن يكون بين ٠ (الأحد) و ٦ (السبت)".to_string(),
        ));
    }
    Ok(())
}

fn validate_window(
    day_of_week: i32,
    start: &str,
    end: &str,
) -> Result<(NaiveTime, NaiveTime), AppError> {
    validate_day(day_of_week)?;
    let start_time = parse_hhmm(start).map_err(AppError::ValidationError)?;
    let end_time = parse_hhmm(end).map_err(AppError::ValidationError)?;
    if start_time >= end_time {
        return Err(AppError::ValidationError(
            "وقت البداية يجب أن يكون قبل وقت النهاية".to_string(),
        ));
    }
    Ok((start_time, end_time))
}

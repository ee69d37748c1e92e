use std::sync::Arc;

use chrono::{Duration, NaiveTime, Utc};
use tracing::debug;
use uuid::Uuid;

use shared_models::auth::User as AuthUser;
use shared_models::error::AppError;
use shared_store::entities::{Appointment, AppointmentStatus, Doctor, User, UserRole};
use shared_store::repo::{
    AppointmentRepository, DoctorRepository, StoreError, UserRepository,
};
use shared_store::MemoryStore;
use shared_utils::time::parse_hhmm;

use crate::models::BookAppointmentRequest;

pub struct BookingService {
    doctors: Arc<dyn DoctorRepository>,
    users: Arc<dyn UserRepository>,
    appointments: Arc<dyn AppointmentRepository>,
}

impl BookingService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            doctors: store.clone(),
            users: store.clone(),
            appointments: store,
        }
    }

    /// Book a slot. Whatever the availability endpoint said earlier, the
    /// overlap check runs again here, atomically with the insert.
    ///
    /// Patients book for themselves and get a `confirmed` appointment;
    /// admins book on behalf of a patient (attached or created by email)
    /// and the appointment starts out `pending`.
    pub async fn book(
        &self,
        user: &AuthUser,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, AppError> {
        debug!(
            "Booking request for doctor {} on {} at {}",
            request.doctor_id, request.date, request.start_time
        );

        let doctor = self
            .doctors
            .get_doctor(request.doctor_id)
            .await
            .map_err(|_| AppError::NotFound("الطبيب غير موجود".to_string()))?;
        if !doctor.is_active {
            return Err(AppError::BadRequest("الطبيب غير متاح للحجز حالياً".to_string()));
        }

        let (start_time, end_time) = resolve_times(&request, &doctor)?;

        let (patient_id, status) = if user.is_admin() {
            (self.attach_or_create_patient(&request).await?, AppointmentStatus::Pending)
        } else {
            let patient_id = Uuid::parse_str(&user.id)
                .map_err(|_| AppError::Auth("Invalid token subject".to_string()))?;
            self.users
                .get_user(patient_id)
                .await
                .map_err(|_| AppError::Auth("الحساب غير موجود".to_string()))?;
            (patient_id, AppointmentStatus::Confirmed)
        };

        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            doctor_id: doctor.id,
            patient_id,
            date: request.date,
            start_time,
            end_time,
            status,
            price: doctor.consultation_price,
            notes: request.notes,
            created_at: now,
            updated_at: now,
        };

        self.appointments
            .book_appointment(appointment)
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => {
                    AppError::Conflict("هذا الموعد محجوز مسبقاً".to_string())
                }
                StoreError::NotFound(_) => AppError::Internal(e.to_string()),
            })
    }

    async fn attach_or_create_patient(
        &self,
        request: &BookAppointmentRequest,
    ) -> Result<Uuid, AppError> {
        let email = request
            .patient_email
            .as_deref()
            .map(str::trim)
            .filter(|e| e.contains('@'))
            .ok_or_else(|| {
                AppError::ValidationError("البريد الإلكتروني للمريض مطلوب".to_string())
            })?;

        if let Some(existing) = self.users.find_user_by_email(email).await {
            return Ok(existing.id);
        }

        let name = request
            .patient_name
            .clone()
            .unwrap_or_else(|| email.to_string());
        let created = User {
            id: Uuid::new_v4(),
            name,
            email: email.to_lowercase(),
            phone: request.patient_phone.clone(),
            // No credentials yet: the account is claimable via password reset.
            password_hash: String::new(),
            role: UserRole::Patient,
            created_at: Utc::now(),
        };

        match self.users.insert_user(created).await {
            Ok(user) => Ok(user.id),
            // Lost an insert race on the same email; the row is there now.
            Err(StoreError::Conflict(_)) => self
                .users
                .find_user_by_email(email)
                .await
                .map(|u| u.id)
                .ok_or_else(|| AppError::Internal("patient lookup failed".to_string())),
            Err(e) => Err(AppError::Internal(e.to_string())),
        }
    }
}

fn resolve_times(
    request: &BookAppointmentRequest,
    doctor: &Doctor,
) -> Result<(NaiveTime, NaiveTime), AppError> {
    let start_time = parse_hhmm(&request.start_time).map_err(AppError::ValidationError)?;

    let end_time = match request.end_time.as_deref() {
        Some(raw) => parse_hhmm(raw).map_err(AppError::ValidationError)?,
        None => {
            let (end, wrapped) = start_time
                .overflowing_add_signed(Duration::minutes(doctor.consultation_duration as i64));
            if wrapped != 0 {
                return Err(AppError::ValidationError(
                    "وقت الحجز خارج حدود اليوم".to_string(),
                ));
            }
            end
        }
    };

    if start_time >= end_time {
        return Err(AppError::ValidationError(
            "وقت البداية يجب أن يكون قبل وقت النهاية".to_string(),
        ));
    }

    Ok((start_time, end_time))
}

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use shared_models::auth::User as AuthUser;
use shared_models::error::AppError;
use shared_store::entities::{Appointment, AppointmentStatus};
use shared_store::repo::{AppointmentFilter, AppointmentRepository, DoctorRepository};
use shared_store::MemoryStore;

use crate::models::AppointmentListQuery;

/// Who the caller is, resolved once per request.
enum Scope {
    Admin,
    Doctor(Uuid),
    Patient(Uuid),
}

pub struct LifecycleService {
    doctors: Arc<dyn DoctorRepository>,
    appointments: Arc<dyn AppointmentRepository>,
}

impl LifecycleService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            doctors: store.clone(),
            appointments: store,
        }
    }

    /// List with filters. Patients see their own appointments, doctors the
    /// ones on their calendar, admins everything.
    pub async fn list(
        &self,
        user: &AuthUser,
        query: AppointmentListQuery,
    ) -> Result<Vec<Appointment>, AppError> {
        let mut filter = AppointmentFilter {
            doctor_id: query.doctor_id,
            patient_id: query.patient_id,
            status: query.status,
            from_date: query.from,
            to_date: query.to,
            limit: query.limit,
            offset: query.offset,
        };

        match self.scope(user).await? {
            Scope::Admin => {}
            Scope::Doctor(doctor_id) => filter.doctor_id = Some(doctor_id),
            Scope::Patient(patient_id) => filter.patient_id = Some(patient_id),
        }

        Ok(self.appointments.search_appointments(&filter).await)
    }

    pub async fn get(&self, user: &AuthUser, id: Uuid) -> Result<Appointment, AppError> {
        let appointment = self
            .appointments
            .get_appointment(id)
            .await
            .map_err(|_| AppError::NotFound("الموعد غير موجود".to_string()))?;
        self.ensure_visible(user, &appointment).await?;
        Ok(appointment)
    }

    /// Transition-validated status change; the allowed transitions are
    /// pending → confirmed → completed, plus cancellation of either.
    pub async fn update_status(
        &self,
        user: &AuthUser,
        id: Uuid,
        next: AppointmentStatus,
    ) -> Result<Appointment, AppError> {
        let mut appointment = self.get(user, id).await?;

        if let Scope::Patient(_) = self.scope(user).await? {
            if next != AppointmentStatus::Cancelled {
                return Err(AppError::Forbidden(
                    "يمكنك إلغاء مواعيدك فقط".to_string(),
                ));
            }
        }

        if !appointment.status.can_transition_to(next) {
            return Err(AppError::BadRequest(format!(
                "لا يمكن تغيير حالة الموعد من '{}' إلى '{}'",
                appointment.status, next
            )));
        }

        debug!("Appointment {} status: {} -> {}", id, appointment.status, next);
        appointment.status = next;
        appointment.updated_at = Utc::now();

        self.appointments
            .update_appointment(appointment)
            .await
            .map_err(|_| AppError::NotFound("الموعد غير موجود".to_string()))
    }

    pub async fn cancel(&self, user: &AuthUser, id: Uuid) -> Result<Appointment, AppError> {
        self.update_status(user, id, AppointmentStatus::Cancelled).await
    }

    async fn scope(&self, user: &AuthUser) -> Result<Scope, AppError> {
        if user.is_admin() {
            return Ok(Scope::Admin);
        }
        let user_id = Uuid::parse_str(&user.id)
            .map_err(|_| AppError::Auth("Invalid token subject".to_string()))?;
        if user.is_doctor() {
            let doctor = self
                .doctors
                .find_doctor_by_user(user_id)
                .await
                .ok_or_else(|| {
                    AppError::Forbidden("لا يوجد ملف طبيب مرتبط بهذا الحساب".to_string())
                })?;
            return Ok(Scope::Doctor(doctor.id));
        }
        Ok(Scope::Patient(user_id))
    }

    async fn ensure_visible(
        &self,
        user: &AuthUser,
        appointment: &Appointment,
    ) -> Result<(), AppError> {
        let visible = match self.scope(user).await? {
            Scope::Admin => true,
            Scope::Doctor(doctor_id) => appointment.doctor_id == doctor_id,
            Scope::Patient(patient_id) => appointment.patient_id == patient_id,
        };
        if visible {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "غير مصرح لك بالاطلاع على هذا الموعد".to_string(),
            ))
        }
    }
}

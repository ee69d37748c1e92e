use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use shared_models::error::AppError;
use shared_store::entities::Doctor;
use shared_store::repo::{DoctorFilter, DoctorRepository, LocationRepository, SpecialtyRepository};
use shared_store::MemoryStore;

use crate::models::{CreateDoctorRequest, UpdateDoctorRequest};

const DEFAULT_CONSULTATION_MINUTES: i32 = 30;

pub struct DoctorService {
    doctors: Arc<dyn DoctorRepository>,
    specialties: Arc<dyn SpecialtyRepository>,
    locations: Arc<dyn LocationRepository>,
}

impl DoctorService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            doctors: store.clone(),
            specialties: store.clone(),
            locations: store,
        }
    }

    pub async fn create_doctor(&self, request: CreateDoctorRequest) -> Result<Doctor, AppError> {
        debug!("Creating doctor profile: {}", request.name_ar);

        if request.name_ar.trim().is_empty() {
            return Err(AppError::ValidationError("اسم الطبيب مطلوب".to_string()));
        }

        let duration = request
            .consultation_duration
            .unwrap_or(DEFAULT_CONSULTATION_MINUTES);
        if duration <= 0 {
            return Err(AppError::ValidationError("مدة الكشف غير صالحة".to_string()));
        }
        if request.consultation_price < 0.0 {
            return Err(AppError::ValidationError("سعر الكشف غير صالح".to_string()));
        }

        self.ensure_references(request.specialty_id, request.location_id)
            .await?;

        let now = Utc::now();
        let doctor = self
            .doctors
            .insert_doctor(Doctor {
                id: Uuid::new_v4(),
                user_id: request.user_id,
                name_ar: request.name_ar.trim().to_string(),
                name_en: request.name_en,
                specialty_id: request.specialty_id,
                location_id: request.location_id,
                bio_ar: request.bio_ar,
                consultation_duration: duration,
                consultation_price: request.consultation_price,
                rating: 0.0,
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .await;

        debug!("Doctor created with ID: {}", doctor.id);
        Ok(doctor)
    }

    pub async fn get_doctor(&self, doctor_id: Uuid) -> Result<Doctor, AppError> {
        self.doctors
            .get_doctor(doctor_id)
            .await
            .map_err(|_| AppError::NotFound("الطبيب غير موجود".to_string()))
    }

    pub async fn update_doctor(
        &self,
        doctor_id: Uuid,
        request: UpdateDoctorRequest,
    ) -> Result<Doctor, AppError> {
        let mut doctor = self.get_doctor(doctor_id).await?;

        if let Some(name_ar) = request.name_ar {
            if name_ar.trim().is_empty() {
                return Err(AppError::ValidationError("اسم الطبيب مطلوب".to_string()));
            }
            doctor.name_ar = name_ar.trim().to_string();
        }
        if let Some(name_en) = request.name_en {
            doctor.name_en = Some(name_en);
        }
        if let Some(bio_ar) = request.bio_ar {
            doctor.bio_ar = Some(bio_ar);
        }
        if let Some(duration) = request.consultation_duration {
            if duration <= 0 {
                return Err(AppError::ValidationError("مدة الكشف غير صالحة".to_string()));
            }
            doctor.consultation_duration = duration;
        }
        if let Some(price) = request.consultation_price {
            if price < 0.0 {
                return Err(AppError::ValidationError("سعر الكشف غير صالح".to_string()));
            }
            doctor.consultation_price = price;
        }
        if let Some(is_active) = request.is_active {
            doctor.is_active = is_active;
        }

        let specialty_id = request.specialty_id.unwrap_or(doctor.specialty_id);
        let location_id = request.location_id.unwrap_or(doctor.location_id);
        self.ensure_references(specialty_id, location_id).await?;
        doctor.specialty_id = specialty_id;
        doctor.location_id = location_id;

        doctor.updated_at = Utc::now();

        self.doctors
            .update_doctor(doctor)
            .await
            .map_err(|_| AppError::NotFound("الطبيب غير موجود".to_string()))
    }

    /// Soft delete: the profile stays for existing appointments but drops
    /// out of search and booking.
    pub async fn deactivate_doctor(&self, doctor_id: Uuid) -> Result<Doctor, AppError> {
        let mut doctor = self.get_doctor(doctor_id).await?;
        doctor.is_active = false;
        doctor.updated_at = Utc::now();
        self.doctors
            .update_doctor(doctor)
            .await
            .map_err(|_| AppError::NotFound("الطبيب غير موجود".to_string()))
    }

    pub async fn search_doctors(&self, filter: DoctorFilter) -> Vec<Doctor> {
        self.doctors.search_doctors(&filter).await
    }

    async fn ensure_references(
        &self,
        specialty_id: Uuid,
        location_id: Uuid,
    ) -> Result<(), AppError> {
        self.specialties
            .get_specialty(specialty_id)
            .await
            .map_err(|_| AppError::BadRequest("التخصص غير موجود".to_string()))?;
        self.locations
            .get_location(location_id)
            .await
            .map_err(|_| AppError::BadRequest("الموقع غير موجود".to_string()))?;
        Ok(())
    }
}

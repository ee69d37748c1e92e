use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use shared_models::error::AppError;
use shared_store::entities::{Location, Specialty};
use shared_store::repo::{
    DoctorFilter, DoctorRepository, LocationRepository, SpecialtyRepository, StoreError,
};
use shared_store::MemoryStore;

use crate::models::{
    CreateLocationRequest, CreateSpecialtyRequest, UpdateLocationRequest, UpdateSpecialtyRequest,
};

pub struct CatalogService {
    specialties: Arc<dyn SpecialtyRepository>,
    locations: Arc<dyn LocationRepository>,
    doctors: Arc<dyn DoctorRepository>,
}

fn duplicate_name(e: StoreError) -> AppError {
    match e {
        StoreError::Conflict(_) => AppError::Conflict("الاسم مستخدم مسبقاً".to_string()),
        StoreError::NotFound(_) => AppError::NotFound("السجل غير موجود".to_string()),
    }
}

impl CatalogService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            specialties: store.clone(),
            locations: store.clone(),
            doctors: store,
        }
    }

    // ------------------------------------------------------------------
    // Specialties
    // ------------------------------------------------------------------

    pub async fn list_specialties(&self) -> Vec<Specialty> {
        self.specialties.list_specialties().await
    }

    pub async fn get_specialty(&self, id: Uuid) -> Result<Specialty, AppError> {
        self.specialties
            .get_specialty(id)
            .await
            .map_err(|_| AppError::NotFound("التخصص غير موجود".to_string()))
    }

    pub async fn create_specialty(
        &self,
        request: CreateSpecialtyRequest,
    ) -> Result<Specialty, AppError> {
        if request.name_ar.trim().is_empty() {
            return Err(AppError::ValidationError("اسم التخصص مطلوب".to_string()));
        }
        debug!("Creating specialty: {}", request.name_ar);

        self.specialties
            .insert_specialty(Specialty {
                id: Uuid::new_v4(),
                name_ar: request.name_ar.trim().to_string(),
                name_en: request.name_en,
                icon: request.icon,
                created_at: Utc::now(),
            })
            .await
            .map_err(duplicate_name)
    }

    pub async fn update_specialty(
        &self,
        id: Uuid,
        request: UpdateSpecialtyRequest,
    ) -> Result<Specialty, AppError> {
        let mut specialty = self.get_specialty(id).await?;

        if let Some(name_ar) = request.name_ar {
            if name_ar.trim().is_empty() {
                return Err(AppError::ValidationError("اسم التخصص مطلوب".to_string()));
            }
            specialty.name_ar = name_ar.trim().to_string();
        }
        if let Some(name_en) = request.name_en {
            specialty.name_en = Some(name_en);
        }
        if let Some(icon) = request.icon {
            specialty.icon = Some(icon);
        }

        self.specialties
            .update_specialty(specialty)
            .await
            .map_err(duplicate_name)
    }

    /// Deleting a specialty that doctors still reference would orphan their
    /// profiles, so it is refused.
    pub async fn delete_specialty(&self, id: Uuid) -> Result<(), AppError> {
        self.get_specialty(id).await?;

        let referencing = self
            .doctors
            .search_doctors(&DoctorFilter {
                specialty_id: Some(id),
                include_inactive: true,
                ..Default::default()
            })
            .await;
        if !referencing.is_empty() {
            return Err(AppError::Conflict(
                "لا يمكن حذف التخصص لوجود أطباء مرتبطين به".to_string(),
            ));
        }

        self.specialties
            .delete_specialty(id)
            .await
            .map_err(|_| AppError::NotFound("التخصص غير موجود".to_string()))
    }

    // ------------------------------------------------------------------
    // Locations
    // ------------------------------------------------------------------

    pub async fn list_locations(&self) -> Vec<Location> {
        self.locations.list_locations().await
    }

    pub async fn get_location(&self, id: Uuid) -> Result<Location, AppError> {
        self.locations
            .get_location(id)
            .await
            .map_err(|_| AppError::NotFound("الموقع غير موجود".to_string()))
    }

    pub async fn create_location(
        &self,
        request: CreateLocationRequest,
    ) -> Result<Location, AppError> {
        if request.name_ar.trim().is_empty() {
            return Err(AppError::ValidationError("اسم الموقع مطلوب".to_string()));
        }
        debug!("Creating location: {}", request.name_ar);

        self.locations
            .insert_location(Location {
                id: Uuid::new_v4(),
                name_ar: request.name_ar.trim().to_string(),
                name_en: request.name_en,
                city_ar: request.city_ar,
                created_at: Utc::now(),
            })
            .await
            .map_err(duplicate_name)
    }

    pub async fn update_location(
        &self,
        id: Uuid,
        request: UpdateLocationRequest,
    ) -> Result<Location, AppError> {
        let mut location = self.get_location(id).await?;

        if let Some(name_ar) = request.name_ar {
            if name_ar.trim().is_empty() {
                return Err(AppError::ValidationError("اسم الموقع مطلوب".to_string()));
            }
            location.name_ar = name_ar.trim().to_string();
        }
        if let Some(name_en) = request.name_en {
            location.name_en = Some(name_en);
        }
        if let Some(city_ar) = request.city_ar {
            location.city_ar = Some(city_ar);
        }

        self.locations
            .update_location(location)
            .await
            .map_err(duplicate_name)
    }

    pub async fn delete_location(&self, id: Uuid) -> Result<(), AppError> {
        self.get_location(id).await?;

        let referencing = self
            .doctors
            .search_doctors(&DoctorFilter {
                location_id: Some(id),
                include_inactive: true,
                ..Default::default()
            })
            .await;
        if !referencing.is_empty() {
            return Err(AppError::Conflict(
                "لا يمكن حذف الموقع لوجود أطباء مرتبطين به".to_string(),
            ));
        }

        self.locations
            .delete_location(id)
            .await
            .map_err(|_| AppError::NotFound("الموقع غير موجود".to_string()))
    }
}

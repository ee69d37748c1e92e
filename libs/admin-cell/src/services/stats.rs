use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::debug;

use shared_store::entities::{AppointmentStatus, UserRole};
use shared_store::repo::{
    AppointmentFilter, AppointmentRepository, DoctorRepository, LocationRepository,
    SpecialtyRepository, UserRepository,
};
use shared_store::MemoryStore;

use crate::models::AdminStats;

pub struct StatsService {
    users: Arc<dyn UserRepository>,
    doctors: Arc<dyn DoctorRepository>,
    specialties: Arc<dyn SpecialtyRepository>,
    locations: Arc<dyn LocationRepository>,
    appointments: Arc<dyn AppointmentRepository>,
}

impl StatsService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            doctors: store.clone(),
            specialties: store.clone(),
            locations: store.clone(),
            appointments: store,
        }
    }

    pub async fn collect(&self) -> AdminStats {
        self.collect_for(Utc::now().date_naive()).await
    }

    /// `today` is passed in so tests can pin the date.
    pub async fn collect_for(&self, today: NaiveDate) -> AdminStats {
        debug!("Collecting admin statistics");

        let appointments = self
            .appointments
            .search_appointments(&AppointmentFilter::default())
            .await;

        let count_status = |status: AppointmentStatus| {
            appointments.iter().filter(|a| a.status == status).count()
        };
        let total_revenue = appointments
            .iter()
            .filter(|a| {
                matches!(
                    a.status,
                    AppointmentStatus::Confirmed | AppointmentStatus::Completed
                )
            })
            .map(|a| a.price)
            .sum();

        AdminStats {
            total_doctors: self.doctors.count_doctors(false).await,
            active_doctors: self.doctors.count_doctors(true).await,
            total_patients: self.users.count_users_with_role(UserRole::Patient).await,
            total_specialties: self.specialties.list_specialties().await.len(),
            total_locations: self.locations.list_locations().await.len(),
            appointments_total: appointments.len(),
            appointments_pending: count_status(AppointmentStatus::Pending),
            appointments_confirmed: count_status(AppointmentStatus::Confirmed),
            appointments_completed: count_status(AppointmentStatus::Completed),
            appointments_cancelled: count_status(AppointmentStatus::Cancelled),
            appointments_today: appointments.iter().filter(|a| a.date == today).count(),
            total_revenue,
        }
    }
}

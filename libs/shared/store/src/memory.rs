use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::entities::{
    Appointment, Doctor, DoctorSchedule, DoctorVacation, Location, Specialty, User, UserRole,
};
use crate::repo::{
    AppointmentFilter, AppointmentRepository, DoctorFilter, DoctorRepository, LocationRepository,
    ScheduleRepository, SpecialtyRepository, StoreError, StoreResult, UserRepository,
    VacationRepository,
};

/// Process-wide in-memory data store. Every collection sits behind its own
/// `RwLock`; the booking path is the only multi-step critical section and
/// holds the appointments write lock across check and insert.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    doctors: RwLock<Vec<Doctor>>,
    schedules: RwLock<Vec<DoctorSchedule>>,
    vacations: RwLock<Vec<DoctorVacation>>,
    appointments: RwLock<Vec<Appointment>>,
    specialties: RwLock<Vec<Specialty>>,
    locations: RwLock<Vec<Location>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_query(doctor: &Doctor, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    doctor.name_ar.contains(&q)
        || doctor
            .name_en
            .as_deref()
            .map(|name| name.to_lowercase().contains(&q))
            .unwrap_or(false)
}

fn paginate<T>(items: Vec<T>, offset: Option<usize>, limit: Option<usize>) -> Vec<T> {
    items
        .into_iter()
        .skip(offset.unwrap_or(0))
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(StoreError::Conflict(format!(
                "email already registered: {}",
                user.email
            )));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(StoreError::NotFound("user"))
    }

    async fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    async fn count_users_with_role(&self, role: UserRole) -> usize {
        self.users
            .read()
            .await
            .iter()
            .filter(|u| u.role == role)
            .count()
    }
}

#[async_trait]
impl DoctorRepository for MemoryStore {
    async fn insert_doctor(&self, doctor: Doctor) -> Doctor {
        self.doctors.write().await.push(doctor.clone());
        doctor
    }

    async fn get_doctor(&self, id: Uuid) -> StoreResult<Doctor> {
        self.doctors
            .read()
            .await
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or(StoreError::NotFound("doctor"))
    }

    async fn update_doctor(&self, doctor: Doctor) -> StoreResult<Doctor> {
        let mut doctors = self.doctors.write().await;
        match doctors.iter_mut().find(|d| d.id == doctor.id) {
            Some(slot) => {
                *slot = doctor.clone();
                Ok(doctor)
            }
            None => Err(StoreError::NotFound("doctor")),
        }
    }

    async fn find_doctor_by_user(&self, user_id: Uuid) -> Option<Doctor> {
        self.doctors
            .read()
            .await
            .iter()
            .find(|d| d.user_id == Some(user_id))
            .cloned()
    }

    async fn search_doctors(&self, filter: &DoctorFilter) -> Vec<Doctor> {
        let doctors = self.doctors.read().await;
        let hits: Vec<Doctor> = doctors
            .iter()
            .filter(|d| filter.include_inactive || d.is_active)
            .filter(|d| filter.specialty_id.map_or(true, |s| d.specialty_id == s))
            .filter(|d| filter.location_id.map_or(true, |l| d.location_id == l))
            .filter(|d| filter.query.as_deref().map_or(true, |q| matches_query(d, q)))
            .cloned()
            .collect();
        paginate(hits, filter.offset, filter.limit)
    }

    async fn count_doctors(&self, active_only: bool) -> usize {
        self.doctors
            .read()
            .await
            .iter()
            .filter(|d| !active_only || d.is_active)
            .count()
    }
}

#[async_trait]
impl ScheduleRepository for MemoryStore {
    async fn insert_schedule(&self, row: DoctorSchedule) -> DoctorSchedule {
        self.schedules.write().await.push(row.clone());
        row
    }

    async fn get_schedule(&self, id: Uuid) -> StoreResult<DoctorSchedule> {
        self.schedules
            .read()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(StoreError::NotFound("schedule"))
    }

    async fn update_schedule(&self, row: DoctorSchedule) -> StoreResult<DoctorSchedule> {
        let mut schedules = self.schedules.write().await;
        match schedules.iter_mut().find(|s| s.id == row.id) {
            Some(slot) => {
                *slot = row.clone();
                Ok(row)
            }
            None => Err(StoreError::NotFound("schedule")),
        }
    }

    async fn delete_schedule(&self, id: Uuid) -> StoreResult<()> {
        let mut schedules = self.schedules.write().await;
        let before = schedules.len();
        schedules.retain(|s| s.id != id);
        if schedules.len() == before {
            return Err(StoreError::NotFound("schedule"));
        }
        Ok(())
    }

    async fn schedules_for_doctor(&self, doctor_id: Uuid) -> Vec<DoctorSchedule> {
        let mut rows: Vec<DoctorSchedule> = self
            .schedules
            .read()
            .await
            .iter()
            .filter(|s| s.doctor_id == doctor_id)
            .cloned()
            .collect();
        rows.sort_by_key(|s| (s.day_of_week, s.start_time));
        rows
    }
}

#[async_trait]
impl VacationRepository for MemoryStore {
    async fn insert_vacation(&self, vacation: DoctorVacation) -> DoctorVacation {
        self.vacations.write().await.push(vacation.clone());
        vacation
    }

    async fn delete_vacation(&self, id: Uuid) -> StoreResult<()> {
        let mut vacations = self.vacations.write().await;
        let before = vacations.len();
        vacations.retain(|v| v.id != id);
        if vacations.len() == before {
            return Err(StoreError::NotFound("vacation"));
        }
        Ok(())
    }

    async fn vacations_for_doctor(&self, doctor_id: Uuid) -> Vec<DoctorVacation> {
        let mut rows: Vec<DoctorVacation> = self
            .vacations
            .read()
            .await
            .iter()
            .filter(|v| v.doctor_id == doctor_id)
            .cloned()
            .collect();
        rows.sort_by_key(|v| v.start_date);
        rows
    }
}

#[async_trait]
impl AppointmentRepository for MemoryStore {
    async fn book_appointment(&self, appointment: Appointment) -> StoreResult<Appointment> {
        // Conflict check and insert under one write lock, so the
        // availability-read/booking-write race cannot double-book a slot.
        let mut appointments = self.appointments.write().await;

        let conflict = appointments.iter().any(|a| {
            a.doctor_id == appointment.doctor_id
                && a.date == appointment.date
                && a.status.blocks_slot()
                && a.overlaps(appointment.start_time, appointment.end_time)
        });

        if conflict {
            debug!(
                "booking conflict for doctor {} on {} at {}",
                appointment.doctor_id, appointment.date, appointment.start_time
            );
            return Err(StoreError::Conflict(
                "requested time overlaps an existing appointment".to_string(),
            ));
        }

        appointments.push(appointment.clone());
        Ok(appointment)
    }

    async fn get_appointment(&self, id: Uuid) -> StoreResult<Appointment> {
        self.appointments
            .read()
            .await
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(StoreError::NotFound("appointment"))
    }

    async fn update_appointment(&self, appointment: Appointment) -> StoreResult<Appointment> {
        let mut appointments = self.appointments.write().await;
        match appointments.iter_mut().find(|a| a.id == appointment.id) {
            Some(slot) => {
                *slot = appointment.clone();
                Ok(appointment)
            }
            None => Err(StoreError::NotFound("appointment")),
        }
    }

    async fn search_appointments(&self, filter: &AppointmentFilter) -> Vec<Appointment> {
        let appointments = self.appointments.read().await;
        let mut hits: Vec<Appointment> = appointments
            .iter()
            .filter(|a| filter.doctor_id.map_or(true, |d| a.doctor_id == d))
            .filter(|a| filter.patient_id.map_or(true, |p| a.patient_id == p))
            .filter(|a| filter.status.map_or(true, |s| a.status == s))
            .filter(|a| filter.from_date.map_or(true, |d| a.date >= d))
            .filter(|a| filter.to_date.map_or(true, |d| a.date <= d))
            .cloned()
            .collect();
        hits.sort_by_key(|a| (a.date, a.start_time));
        paginate(hits, filter.offset, filter.limit)
    }

    async fn blocking_appointments_on(&self, doctor_id: Uuid, date: NaiveDate) -> Vec<Appointment> {
        let mut rows: Vec<Appointment> = self
            .appointments
            .read()
            .await
            .iter()
            .filter(|a| a.doctor_id == doctor_id && a.date == date && a.status.blocks_slot())
            .cloned()
            .collect();
        rows.sort_by_key(|a| a.start_time);
        rows
    }
}

#[async_trait]
impl SpecialtyRepository for MemoryStore {
    async fn insert_specialty(&self, specialty: Specialty) -> StoreResult<Specialty> {
        let mut specialties = self.specialties.write().await;
        if specialties.iter().any(|s| s.name_ar == specialty.name_ar) {
            return Err(StoreError::Conflict(format!(
                "specialty already exists: {}",
                specialty.name_ar
            )));
        }
        specialties.push(specialty.clone());
        Ok(specialty)
    }

    async fn get_specialty(&self, id: Uuid) -> StoreResult<Specialty> {
        self.specialties
            .read()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(StoreError::NotFound("specialty"))
    }

    async fn update_specialty(&self, specialty: Specialty) -> StoreResult<Specialty> {
        let mut specialties = self.specialties.write().await;
        if specialties
            .iter()
            .any(|s| s.id != specialty.id && s.name_ar == specialty.name_ar)
        {
            return Err(StoreError::Conflict(format!(
                "specialty already exists: {}",
                specialty.name_ar
            )));
        }
        match specialties.iter_mut().find(|s| s.id == specialty.id) {
            Some(slot) => {
                *slot = specialty.clone();
                Ok(specialty)
            }
            None => Err(StoreError::NotFound("specialty")),
        }
    }

    async fn delete_specialty(&self, id: Uuid) -> StoreResult<()> {
        let mut specialties = self.specialties.write().await;
        let before = specialties.len();
        specialties.retain(|s| s.id != id);
        if specialties.len() == before {
            return Err(StoreError::NotFound("specialty"));
        }
        Ok(())
    }

    async fn list_specialties(&self) -> Vec<Specialty> {
        self.specialties.read().await.clone()
    }
}

#[async_trait]
impl LocationRepository for MemoryStore {
    async fn insert_location(&self, location: Location) -> StoreResult<Location> {
        let mut locations = self.locations.write().await;
        if locations.iter().any(|l| l.name_ar == location.name_ar) {
            return Err(StoreError::Conflict(format!(
                "location already exists: {}",
                location.name_ar
            )));
        }
        locations.push(location.clone());
        Ok(location)
    }

    async fn get_location(&self, id: Uuid) -> StoreResult<Location> {
        self.locations
            .read()
            .await
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or(StoreError::NotFound("location"))
    }

    async fn update_location(&self, location: Location) -> StoreResult<Location> {
        let mut locations = self.locations.write().await;
        if locations
            .iter()
            .any(|l| l.id != location.id && l.name_ar == location.name_ar)
        {
            return Err(StoreError::Conflict(format!(
                "location already exists: {}",
                location.name_ar
            )));
        }
        match locations.iter_mut().find(|l| l.id == location.id) {
            Some(slot) => {
                *slot = location.clone();
                Ok(location)
            }
            None => Err(StoreError::NotFound("location")),
        }
    }

    async fn delete_location(&self, id: Uuid) -> StoreResult<()> {
        let mut locations = self.locations.write().await;
        let before = locations.len();
        locations.retain(|l| l.id != id);
        if locations.len() == before {
            return Err(StoreError::NotFound("location"));
        }
        Ok(())
    }

    async fn list_locations(&self) -> Vec<Location> {
        self.locations.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::AppointmentStatus;
    use chrono::{NaiveTime, Utc};

    fn appointment(doctor_id: Uuid, start: (u32, u32), end: (u32, u32)) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            doctor_id,
            patient_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            status: AppointmentStatus::Confirmed,
            price: 150.0,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn overlapping_booking_is_rejected() {
        let store = MemoryStore::new();
        let doctor_id = Uuid::new_v4();

        store
            .book_appointment(appointment(doctor_id, (10, 0), (10, 30)))
            .await
            .unwrap();

        let err = store
            .book_appointment(appointment(doctor_id, (10, 15), (10, 45)))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn cancelled_appointments_release_the_slot() {
        let store = MemoryStore::new();
        let doctor_id = Uuid::new_v4();

        let mut first = appointment(doctor_id, (10, 0), (10, 30));
        first.status = AppointmentStatus::Cancelled;
        store.book_appointment(first).await.unwrap();

        store
            .book_appointment(appointment(doctor_id, (10, 0), (10, 30)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn concurrent_bookings_of_one_slot_admit_exactly_one() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let doctor_id = Uuid::new_v4();

        let a = {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .book_appointment(appointment(doctor_id, (11, 0), (11, 30)))
                    .await
            })
        };
        let b = {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .book_appointment(appointment(doctor_id, (11, 0), (11, 30)))
                    .await
            })
        };

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        assert_eq!(1, [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryStore::new();
        let user = User {
            id: Uuid::new_v4(),
            name: "سالم".to_string(),
            email: "salem@example.com".to_string(),
            phone: None,
            password_hash: "x".to_string(),
            role: UserRole::Patient,
            created_at: Utc::now(),
        };
        store.insert_user(user.clone()).await.unwrap();

        let mut dup = user;
        dup.id = Uuid::new_v4();
        dup.email = "SALEM@example.com".to_string();
        assert!(matches!(
            store.insert_user(dup).await.unwrap_err(),
            StoreError::Conflict(_)
        ));
    }
}

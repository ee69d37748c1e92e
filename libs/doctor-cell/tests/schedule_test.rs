use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Days, Utc};
use uuid::Uuid;

use doctor_cell::models::{
    CreateDoctorRequest, CreateScheduleRequest, CreateVacationRequest, UpdateScheduleRequest,
};
use doctor_cell::services::{doctor::DoctorService, schedule::ScheduleService};
use shared_models::error::AppError;
use shared_store::entities::{Location, Specialty};
use shared_store::repo::{LocationRepository, SpecialtyRepository};
use shared_store::MemoryStore;

async fn store_with_directory() -> (Arc<MemoryStore>, Uuid, Uuid) {
    let store = Arc::new(MemoryStore::new());
    let specialty = store
        .insert_specialty(Specialty {
            id: Uuid::new_v4(),
            name_ar: "باطنية".to_string(),
            name_en: None,
            icon: None,
            created_at: Utc::now(),
        })
        .await
        .unwrap();
    let location = store
        .insert_location(Location {
            id: Uuid::new_v4(),
            name_ar: "العيادة الرئيسية".to_string(),
            name_en: None,
            city_ar: None,
            created_at: Utc::now(),
        })
        .await
        .unwrap();
    (store, specialty.id, location.id)
}

async fn create_doctor(store: &Arc<MemoryStore>, specialty_id: Uuid, location_id: Uuid) -> Uuid {
    DoctorService::new(store.clone())
        .create_doctor(CreateDoctorRequest {
            user_id: None,
            name_ar: "د. أحمد الخالدي".to_string(),
            name_en: None,
            specialty_id,
            location_id,
            bio_ar: None,
            consultation_duration: Some(30),
            consultation_price: 150.0,
        })
        .await
        .unwrap()
        .id
}

fn window(day: i32, start: &str, end: &str) -> CreateScheduleRequest {
    CreateScheduleRequest {
        day_of_week: day,
        start_time: start.to_string(),
        end_time: end.to_string(),
        is_active: None,
    }
}

#[tokio::test]
async fn two_non_overlapping_windows_on_one_day_are_accepted() {
    let (store, specialty_id, location_id) = store_with_directory().await;
    let doctor_id = create_doctor(&store, specialty_id, location_id).await;
    let service = ScheduleService::new(store);

    service
        .create_schedule(doctor_id, window(0, "09:00", "13:00"))
        .await
        .unwrap();
    service
        .create_schedule(doctor_id, window(0, "16:00", "20:00"))
        .await
        .unwrap();

    assert_eq!(2, service.list_schedules(doctor_id).await.unwrap().len());
}

#[tokio::test]
async fn overlapping_window_is_a_conflict() {
    let (store, specialty_id, location_id) = store_with_directory().await;
    let doctor_id = create_doctor(&store, specialty_id, location_id).await;
    let service = ScheduleService::new(store);

    service
        .create_schedule(doctor_id, window(0, "09:00", "13:00"))
        .await
        .unwrap();

    let err = service
        .create_schedule(doctor_id, window(0, "12:00", "15:00"))
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Conflict(_));
}

#[tokio::test]
async fn invalid_day_and_inverted_times_are_rejected() {
    let (store, specialty_id, location_id) = store_with_directory().await;
    let doctor_id = create_doctor(&store, specialty_id, location_id).await;
    let service = ScheduleService::new(store);

    assert_matches!(
        service
            .create_schedule(doctor_id, window(7, "09:00", "13:00"))
            .await
            .unwrap_err(),
        AppError::ValidationError(_)
    );
    assert_matches!(
        service
            .create_schedule(doctor_id, window(0, "13:00", "09:00"))
            .await
            .unwrap_err(),
        AppError::ValidationError(_)
    );
}

#[tokio::test]
async fn updating_a_window_does_not_conflict_with_itself() {
    let (store, specialty_id, location_id) = store_with_directory().await;
    let doctor_id = create_doctor(&store, specialty_id, location_id).await;
    let service = ScheduleService::new(store);

    let row = service
        .create_schedule(doctor_id, window(0, "09:00", "13:00"))
        .await
        .unwrap();

    let updated = service
        .update_schedule(
            doctor_id,
            row.id,
            UpdateScheduleRequest {
                day_of_week: None,
                start_time: Some("09:30".to_string()),
                end_time: None,
                is_active: None,
            },
        )
        .await
        .unwrap();

    assert_eq!("09:30", updated.start_time.format("%H:%M").to_string());
}

#[tokio::test]
async fn schedule_of_another_doctor_is_invisible() {
    let (store, specialty_id, location_id) = store_with_directory().await;
    let first = create_doctor(&store, specialty_id, location_id).await;
    let second = create_doctor(&store, specialty_id, location_id).await;
    let service = ScheduleService::new(store);

    let row = service
        .create_schedule(first, window(0, "09:00", "13:00"))
        .await
        .unwrap();

    let err = service.delete_schedule(second, row.id).await.unwrap_err();
    assert_matches!(err, AppError::NotFound(_));
}

#[tokio::test]
async fn inverted_vacation_range_is_rejected() {
    let (store, specialty_id, location_id) = store_with_directory().await;
    let doctor_id = create_doctor(&store, specialty_id, location_id).await;
    let service = ScheduleService::new(store);

    let today = Utc::now().date_naive();
    let err = service
        .add_vacation(
            doctor_id,
            CreateVacationRequest {
                start_date: today.checked_add_days(Days::new(5)).unwrap(),
                end_date: today,
                reason: None,
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, AppError::ValidationError(_));
}

#[tokio::test]
async fn single_day_vacation_is_accepted() {
    let (store, specialty_id, location_id) = store_with_directory().await;
    let doctor_id = create_doctor(&store, specialty_id, location_id).await;
    let service = ScheduleService::new(store);

    let today = Utc::now().date_naive();
    service
        .add_vacation(
            doctor_id,
            CreateVacationRequest {
                start_date: today,
                end_date: today,
                reason: Some("مؤتمر طبي".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(1, service.list_vacations(doctor_id).await.unwrap().len());
}

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use appointment_cell::models::AppointmentListQuery;
use appointment_cell::services::lifecycle::LifecycleService;
use shared_models::auth::User as AuthUser;
use shared_models::error::AppError;
use shared_store::entities::{Appointment, AppointmentStatus, Doctor};
use shared_store::repo::{AppointmentRepository, DoctorRepository};
use shared_store::MemoryStore;

fn auth(id: Uuid, role: &str) -> AuthUser {
    AuthUser {
        id: id.to_string(),
        email: None,
        role: Some(role.to_string()),
        created_at: None,
    }
}

fn empty_query() -> AppointmentListQuery {
    AppointmentListQuery {
        doctor_id: None,
        patient_id: None,
        status: None,
        from: None,
        to: None,
        limit: None,
        offset: None,
    }
}

async fn seed_doctor(store: &Arc<MemoryStore>, user_id: Option<Uuid>) -> Doctor {
    let now = Utc::now();
    store
        .insert_doctor(Doctor {
            id: Uuid::new_v4(),
            user_id,
            name_ar: "د. أحمد الخالدي".to_string(),
            name_en: None,
            specialty_id: Uuid::new_v4(),
            location_id: Uuid::new_v4(),
            bio_ar: None,
            consultation_duration: 30,
            consultation_price: 150.0,
            rating: 0.0,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
        .await
}

async fn seed_appointment(
    store: &Arc<MemoryStore>,
    doctor_id: Uuid,
    patient_id: Uuid,
    start: (u32, u32),
    status: AppointmentStatus,
) -> Appointment {
    let now = Utc::now();
    store
        .book_appointment(Appointment {
            id: Uuid::new_v4(),
            doctor_id,
            patient_id,
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(start.0, start.1 + 30, 0).unwrap(),
            status,
            price: 150.0,
            notes: None,
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn admin_walks_the_full_status_machine() {
    let store = Arc::new(MemoryStore::new());
    let doctor = seed_doctor(&store, None).await;
    let appointment =
        seed_appointment(&store, doctor.id, Uuid::new_v4(), (10, 0), AppointmentStatus::Pending)
            .await;
    let service = LifecycleService::new(store);
    let admin = auth(Uuid::new_v4(), "admin");

    let confirmed = service
        .update_status(&admin, appointment.id, AppointmentStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(AppointmentStatus::Confirmed, confirmed.status);

    let completed = service
        .update_status(&admin, appointment.id, AppointmentStatus::Completed)
        .await
        .unwrap();
    assert_eq!(AppointmentStatus::Completed, completed.status);
}

#[tokio::test]
async fn invalid_transitions_are_rejected() {
    let store = Arc::new(MemoryStore::new());
    let doctor = seed_doctor(&store, None).await;
    let pending =
        seed_appointment(&store, doctor.id, Uuid::new_v4(), (10, 0), AppointmentStatus::Pending)
            .await;
    let completed =
        seed_appointment(&store, doctor.id, Uuid::new_v4(), (11, 0), AppointmentStatus::Completed)
            .await;
    let service = LifecycleService::new(store);
    let admin = auth(Uuid::new_v4(), "admin");

    // Skipping confirmation is not allowed.
    assert_matches!(
        service
            .update_status(&admin, pending.id, AppointmentStatus::Completed)
            .await
            .unwrap_err(),
        AppError::BadRequest(_)
    );
    // Terminal states stay terminal.
    assert_matches!(
        service
            .update_status(&admin, completed.id, AppointmentStatus::Cancelled)
            .await
            .unwrap_err(),
        AppError::BadRequest(_)
    );
}

#[tokio::test]
async fn patient_can_cancel_their_own_appointment_but_not_confirm_it() {
    let store = Arc::new(MemoryStore::new());
    let doctor = seed_doctor(&store, None).await;
    let patient_id = Uuid::new_v4();
    let appointment =
        seed_appointment(&store, doctor.id, patient_id, (10, 0), AppointmentStatus::Pending).await;
    let service = LifecycleService::new(store);
    let patient = auth(patient_id, "patient");

    assert_matches!(
        service
            .update_status(&patient, appointment.id, AppointmentStatus::Confirmed)
            .await
            .unwrap_err(),
        AppError::Forbidden(_)
    );

    let cancelled = service.cancel(&patient, appointment.id).await.unwrap();
    assert_eq!(AppointmentStatus::Cancelled, cancelled.status);
}

#[tokio::test]
async fn patient_cannot_touch_someone_elses_appointment() {
    let store = Arc::new(MemoryStore::new());
    let doctor = seed_doctor(&store, None).await;
    let appointment =
        seed_appointment(&store, doctor.id, Uuid::new_v4(), (10, 0), AppointmentStatus::Pending)
            .await;
    let service = LifecycleService::new(store);
    let stranger = auth(Uuid::new_v4(), "patient");

    assert_matches!(
        service.get(&stranger, appointment.id).await.unwrap_err(),
        AppError::Forbidden(_)
    );
    assert_matches!(
        service.cancel(&stranger, appointment.id).await.unwrap_err(),
        AppError::Forbidden(_)
    );
}

#[tokio::test]
async fn listing_is_scoped_to_the_caller() {
    let store = Arc::new(MemoryStore::new());
    let doctor_account = Uuid::new_v4();
    let own_doctor = seed_doctor(&store, Some(doctor_account)).await;
    let other_doctor = seed_doctor(&store, None).await;
    let patient_id = Uuid::new_v4();

    seed_appointment(&store, own_doctor.id, patient_id, (10, 0), AppointmentStatus::Confirmed)
        .await;
    seed_appointment(&store, other_doctor.id, Uuid::new_v4(), (11, 0), AppointmentStatus::Confirmed)
        .await;
    let service = LifecycleService::new(store);

    let as_admin = service.list(&auth(Uuid::new_v4(), "admin"), empty_query()).await.unwrap();
    assert_eq!(2, as_admin.len());

    let as_doctor = service.list(&auth(doctor_account, "doctor"), empty_query()).await.unwrap();
    assert_eq!(1, as_doctor.len());
    assert_eq!(own_doctor.id, as_doctor[0].doctor_id);

    let as_patient = service.list(&auth(patient_id, "patient"), empty_query()).await.unwrap();
    assert_eq!(1, as_patient.len());
    assert_eq!(patient_id, as_patient[0].patient_id);
}

#[tokio::test]
async fn doctor_account_without_profile_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let service = LifecycleService::new(store);

    let err = service
        .list(&auth(Uuid::new_v4(), "doctor"), empty_query())
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Forbidden(_));
}

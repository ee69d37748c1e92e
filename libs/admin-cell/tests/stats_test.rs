use std::sync::Arc;

use assert_matches::assert_matches;
use axum::extract::{Extension, State};
use chrono::{Days, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use admin_cell::handlers;
use admin_cell::services::stats::StatsService;
use shared_config::AppConfig;
use shared_models::auth::User as AuthUser;
use shared_models::error::AppError;
use shared_store::entities::{Appointment, AppointmentStatus, Doctor};
use shared_store::repo::{AppointmentRepository, DoctorRepository};
use shared_store::seed::seed_demo_data;
use shared_store::{AppState, MemoryStore};

async fn seed_appointment(
    store: &Arc<MemoryStore>,
    date: NaiveDate,
    hour: u32,
    status: AppointmentStatus,
    price: f64,
) {
    let now = Utc::now();
    let doctor = store
        .insert_doctor(Doctor {
            id: Uuid::new_v4(),
            user_id: None,
            name_ar: "د. سارة العتيبي".to_string(),
            name_en: None,
            specialty_id: Uuid::new_v4(),
            location_id: Uuid::new_v4(),
            bio_ar: None,
            consultation_duration: 30,
            consultation_price: price,
            rating: 0.0,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
        .await;
    store
        .book_appointment(Appointment {
            id: Uuid::new_v4(),
            doctor_id: doctor.id,
            patient_id: Uuid::new_v4(),
            date,
            start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(hour, 30, 0).unwrap(),
            status,
            price,
            notes: None,
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn stats_aggregate_statuses_revenue_and_todays_count() {
    let store = Arc::new(MemoryStore::new());
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap();

    seed_appointment(&store, today, 9, AppointmentStatus::Confirmed, 150.0).await;
    seed_appointment(&store, today, 10, AppointmentStatus::Cancelled, 150.0).await;
    seed_appointment(&store, tomorrow, 9, AppointmentStatus::Completed, 200.0).await;
    seed_appointment(&store, tomorrow, 10, AppointmentStatus::Pending, 90.0).await;

    let stats = StatsService::new(store).collect_for(today).await;

    assert_eq!(4, stats.appointments_total);
    assert_eq!(1, stats.appointments_pending);
    assert_eq!(1, stats.appointments_confirmed);
    assert_eq!(1, stats.appointments_completed);
    assert_eq!(1, stats.appointments_cancelled);
    assert_eq!(2, stats.appointments_today);
    // Only confirmed + completed count towards revenue.
    assert_eq!(350.0, stats.total_revenue);
    assert_eq!(4, stats.total_doctors);
}

#[tokio::test]
async fn seeded_store_produces_consistent_counts() {
    let store = Arc::new(MemoryStore::new());
    seed_demo_data(&store, &|p| format!("hashed:{p}")).await;

    let stats = StatsService::new(store).collect().await;

    assert_eq!(3, stats.total_doctors);
    assert_eq!(3, stats.active_doctors);
    assert_eq!(4, stats.total_specialties);
    assert_eq!(3, stats.total_locations);
    assert_eq!(1, stats.total_patients);
    assert_eq!(2, stats.appointments_total);
}

#[tokio::test]
async fn stats_endpoint_is_admin_only() {
    let config = AppConfig {
        port: 0,
        jwt_secret: "test-secret".to_string(),
        token_ttl_hours: 24,
        seed_demo_data: false,
    };
    let state = Arc::new(AppState::new(config, Arc::new(MemoryStore::new())));

    let patient = AuthUser {
        id: Uuid::new_v4().to_string(),
        email: None,
        role: Some("patient".to_string()),
        created_at: None,
    };

    let err = handlers::get_stats(State(state), Extension(patient))
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Forbidden(_));
}

use chrono::{Datelike, Days, NaiveDate, NaiveTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::entities::{
    Appointment, AppointmentStatus, Doctor, DoctorSchedule, DoctorVacation, Location, Specialty,
    User, UserRole,
};
use crate::memory::MemoryStore;
use crate::repo::{
    AppointmentRepository, DoctorRepository, LocationRepository, ScheduleRepository,
    SpecialtyRepository, UserRepository, VacationRepository,
};

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid seed time")
}

/// First date strictly after `from` falling on `day_of_week` (0 = Sunday).
fn next_weekday(from: NaiveDate, day_of_week: u32) -> NaiveDate {
    let mut date = from.checked_add_days(Days::new(1)).expect("valid seed date");
    while date.weekday().num_days_from_sunday() != day_of_week {
        date = date.checked_add_days(Days::new(1)).expect("valid seed date");
    }
    date
}

/// Populate the store with the demo dataset the dashboards expect. The
/// password hasher is injected so this crate stays below the crypto layer.
pub async fn seed_demo_data(store: &MemoryStore, hash_password: &dyn Fn(&str) -> String) {
    let now = Utc::now();
    let today = now.date_naive();

    // Directory
    let specialties = [
        ("باطنية", "Internal Medicine", "stethoscope"),
        ("أطفال", "Pediatrics", "baby"),
        ("جلدية", "Dermatology", "sun"),
        ("أسنان", "Dentistry", "tooth"),
    ]
    .map(|(name_ar, name_en, icon)| Specialty {
        id: Uuid::new_v4(),
        name_ar: name_ar.to_string(),
        name_en: Some(name_en.to_string()),
        icon: Some(icon.to_string()),
        created_at: now,
    });
    for specialty in &specialties {
        store
            .insert_specialty(specialty.clone())
            .await
            .expect("seed specialty");
    }

    let locations = [
        ("العيادة الرئيسية", "Main Clinic", "الرياض"),
        ("فرع جدة", "Jeddah Branch", "جدة"),
        ("فرع الدمام", "Dammam Branch", "الدمام"),
    ]
    .map(|(name_ar, name_en, city_ar)| Location {
        id: Uuid::new_v4(),
        name_ar: name_ar.to_string(),
        name_en: Some(name_en.to_string()),
        city_ar: Some(city_ar.to_string()),
        created_at: now,
    });
    for location in &locations {
        store
            .insert_location(location.clone())
            .await
            .expect("seed location");
    }

    // Accounts
    let admin = User {
        id: Uuid::new_v4(),
        name: "مدير النظام".to_string(),
        email: "admin@clinic.sa".to_string(),
        phone: None,
        password_hash: hash_password("admin1234"),
        role: UserRole::Admin,
        created_at: now,
    };
    let doctor_account = User {
        id: Uuid::new_v4(),
        name: "د. أحمد الخالدي".to_string(),
        email: "dr.ahmad@clinic.sa".to_string(),
        phone: Some("0501111111".to_string()),
        password_hash: hash_password("doctor1234"),
        role: UserRole::Doctor,
        created_at: now,
    };
    let patient = User {
        id: Uuid::new_v4(),
        name: "سالم الحربي".to_string(),
        email: "salem@example.com".to_string(),
        phone: Some("0502222222".to_string()),
        password_hash: hash_password("patient1234"),
        role: UserRole::Patient,
        created_at: now,
    };
    for user in [&admin, &doctor_account, &patient] {
        store.insert_user(user.clone()).await.expect("seed user");
    }

    // Doctors
    let ahmad = store
        .insert_doctor(Doctor {
            id: Uuid::new_v4(),
            user_id: Some(doctor_account.id),
            name_ar: "د. أحمد الخالدي".to_string(),
            name_en: Some("Dr. Ahmad Al-Khalidi".to_string()),
            specialty_id: specialties[0].id,
            location_id: locations[0].id,
            bio_ar: Some("استشاري باطنية بخبرة ١٥ عاماً".to_string()),
            consultation_duration: 30,
            consultation_price: 150.0,
            rating: 4.8,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
        .await;
    let sara = store
        .insert_doctor(Doctor {
            id: Uuid::new_v4(),
            user_id: None,
            name_ar: "د. سارة العتيبي".to_string(),
            name_en: Some("Dr. Sara Al-Otaibi".to_string()),
            specialty_id: specialties[1].id,
            location_id: locations[1].id,
            bio_ar: Some("أخصائية أطفال وحديثي الولادة".to_string()),
            consultation_duration: 20,
            consultation_price: 200.0,
            rating: 4.9,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
        .await;
    let mohammed = store
        .insert_doctor(Doctor {
            id: Uuid::new_v4(),
            user_id: None,
            name_ar: "د. محمد الزهراني".to_string(),
            name_en: Some("Dr. Mohammed Al-Zahrani".to_string()),
            specialty_id: specialties[2].id,
            location_id: locations[0].id,
            bio_ar: None,
            consultation_duration: 30,
            consultation_price: 180.0,
            rating: 4.5,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
        .await;

    // Weekly schedules. Ahmad works a split Sunday shift.
    let schedule_rows = [
        (ahmad.id, 0, time(9, 0), time(13, 0)),
        (ahmad.id, 0, time(16, 0), time(20, 0)),
        (ahmad.id, 2, time(9, 0), time(13, 0)),
        (ahmad.id, 4, time(9, 0), time(13, 0)),
        (sara.id, 1, time(10, 0), time(14, 0)),
        (sara.id, 3, time(10, 0), time(14, 0)),
        (mohammed.id, 6, time(9, 0), time(12, 0)),
    ];
    for (doctor_id, day_of_week, start_time, end_time) in schedule_rows {
        store
            .insert_schedule(DoctorSchedule {
                id: Uuid::new_v4(),
                doctor_id,
                day_of_week,
                start_time,
                end_time,
                is_active: true,
            })
            .await;
    }

    store
        .insert_vacation(DoctorVacation {
            id: Uuid::new_v4(),
            doctor_id: mohammed.id,
            start_date: today.checked_add_days(Days::new(10)).expect("valid seed date"),
            end_date: today.checked_add_days(Days::new(15)).expect("valid seed date"),
            reason: Some("إجازة سنوية".to_string()),
            created_at: now,
        })
        .await;

    // A couple of bookings on Ahmad's next Sunday shift.
    let sunday = next_weekday(today, 0);
    for (start, end, status) in [
        (time(10, 0), time(10, 30), AppointmentStatus::Confirmed),
        (time(11, 0), time(11, 30), AppointmentStatus::Pending),
    ] {
        store
            .book_appointment(Appointment {
                id: Uuid::new_v4(),
                doctor_id: ahmad.id,
                patient_id: patient.id,
                date: sunday,
                start_time: start,
                end_time: end,
                status,
                price: ahmad.consultation_price,
                notes: None,
                created_at: now,
                updated_at: now,
            })
            .await
            .expect("seed appointment");
    }

    info!(
        "seeded demo data: {} specialties, {} locations, 3 doctors, 3 users",
        specialties.len(),
        locations.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::DoctorFilter;

    #[tokio::test]
    async fn seeding_populates_every_collection() {
        let store = MemoryStore::new();
        seed_demo_data(&store, &|p| format!("hashed:{p}")).await;

        assert_eq!(4, store.list_specialties().await.len());
        assert_eq!(3, store.list_locations().await.len());
        assert_eq!(3, store.search_doctors(&DoctorFilter::default()).await.len());
        assert_eq!(1, store.count_users_with_role(UserRole::Admin).await);
        assert!(store.find_user_by_email("salem@example.com").await.is_some());
    }

    #[test]
    fn next_weekday_lands_on_requested_day() {
        let from = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
        let sunday = next_weekday(from, 0);
        assert_eq!(0, sunday.weekday().num_days_from_sunday());
        assert!(sunday > from);
    }
}

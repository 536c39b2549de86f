use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use doctor_cell::{CreateDoctorRequest, DoctorService};
use scheduling_cell::{
    bucket_appointments, generate_slots_or_default, AppointmentService, AppointmentStatus,
    BookAppointmentRequest, RescheduleAppointmentRequest, SchedulingError, WorkShift,
};
use shared_models::time::format_hhmm;
use shared_storage::MemoryStore;

// ==============================================================================
// TEST FIXTURES AND UTILITIES
// ==============================================================================

struct TestSetup {
    service: AppointmentService,
    doctor_id: Uuid,
}

impl TestSetup {
    fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let doctor = DoctorService::new(store.clone())
            .create(CreateDoctorRequest {
                name: "Dr. Huda".to_string(),
                specialty: "General".to_string(),
                phone: "0790000001".to_string(),
            })
            .expect("seed doctor");
        Self {
            service: AppointmentService::new(store),
            doctor_id: doctor.id,
        }
    }

    fn request(&self, date: NaiveDate, time: NaiveTime, duration: u32) -> BookAppointmentRequest {
        BookAppointmentRequest {
            date,
            time,
            duration_minutes: duration,
            doctor_id: self.doctor_id,
            patient_id: None,
            temp_patient_name: Some("زائر".to_string()),
            treatment_type: "فحص".to_string(),
            notes: String::new(),
        }
    }
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, day).unwrap()
}

// ==============================================================================
// BOOKING AND CONFLICT BEHAVIOR
// ==============================================================================

#[test]
fn test_booking_an_overlapping_slot_is_refused() {
    let setup = TestSetup::new();
    let existing = setup
        .service
        .book(setup.request(d(7), t(10, 15), 30))
        .unwrap();

    // 10:00-10:30 overlaps the existing 10:15-10:45 booking.
    let result = setup.service.book(setup.request(d(7), t(10, 0), 30));
    assert_matches!(
        result,
        Err(SchedulingError::Conflict { conflicting_id }) if conflicting_id == existing.id
    );
}

#[test]
fn test_back_to_back_bookings_are_allowed() {
    let setup = TestSetup::new();
    setup.service.book(setup.request(d(7), t(9, 0), 30)).unwrap();
    // Starts exactly when the previous one ends.
    setup.service.book(setup.request(d(7), t(9, 30), 30)).unwrap();
    assert_eq!(setup.service.list_for_date(d(7)).unwrap().len(), 2);
}

#[test]
fn test_reschedule_does_not_conflict_with_itself() {
    let setup = TestSetup::new();
    let apt = setup
        .service
        .book(setup.request(d(7), t(9, 0), 30))
        .unwrap();

    // Shift by 15 minutes into its own old window.
    let moved = setup
        .service
        .reschedule(
            apt.id,
            RescheduleAppointmentRequest {
                date: d(7),
                time: t(9, 15),
                duration_minutes: None,
            },
        )
        .unwrap();
    assert_eq!(moved.time, t(9, 15));
    assert_eq!(moved.duration_minutes, 30);
}

#[test]
fn test_reschedule_into_another_booking_is_refused() {
    let setup = TestSetup::new();
    let first = setup
        .service
        .book(setup.request(d(7), t(9, 0), 30))
        .unwrap();
    let second = setup
        .service
        .book(setup.request(d(7), t(11, 0), 30))
        .unwrap();

    let result = setup.service.reschedule(
        second.id,
        RescheduleAppointmentRequest {
            date: d(7),
            time: t(9, 10),
            duration_minutes: None,
        },
    );
    assert_matches!(
        result,
        Err(SchedulingError::Conflict { conflicting_id }) if conflicting_id == first.id
    );
}

#[test]
fn test_walk_in_requires_a_name() {
    let setup = TestSetup::new();
    let mut request = setup.request(d(7), t(9, 0), 30);
    request.temp_patient_name = Some("   ".to_string());
    assert_matches!(
        setup.service.book(request),
        Err(SchedulingError::ValidationError(_))
    );
}

#[test]
fn test_unknown_doctor_is_refused() {
    let setup = TestSetup::new();
    let mut request = setup.request(d(7), t(9, 0), 30);
    request.doctor_id = Uuid::new_v4();
    assert_matches!(
        setup.service.book(request),
        Err(SchedulingError::DoctorUnavailable)
    );
}

#[test]
fn test_doctor_history_sorted_by_date_then_time() {
    let setup = TestSetup::new();
    setup.service.book(setup.request(d(8), t(9, 0), 30)).unwrap();
    setup.service.book(setup.request(d(7), t(14, 0), 30)).unwrap();
    setup.service.book(setup.request(d(7), t(9, 0), 30)).unwrap();

    let history = setup.service.list_for_doctor(setup.doctor_id).unwrap();
    let order: Vec<(NaiveDate, NaiveTime)> = history.iter().map(|a| (a.date, a.time)).collect();
    assert_eq!(
        order,
        vec![(d(7), t(9, 0)), (d(7), t(14, 0)), (d(8), t(9, 0))]
    );
    assert!(setup.service.list_for_doctor(Uuid::new_v4()).unwrap().is_empty());
}

#[test]
fn test_cancel_and_status_update() {
    let setup = TestSetup::new();
    let apt = setup
        .service
        .book(setup.request(d(7), t(9, 0), 30))
        .unwrap();

    let waiting = setup
        .service
        .update_status(apt.id, AppointmentStatus::Waiting)
        .unwrap();
    assert_eq!(waiting.status, AppointmentStatus::Waiting);

    let cancelled = setup.service.cancel(apt.id).unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
}

#[test]
fn test_work_day_and_holiday_checks() {
    let setup = TestSetup::new();
    let mut settings = setup.service.settings().unwrap();
    // Default working days are Sunday through Thursday.
    let sunday = NaiveDate::from_ymd_opt(2025, 4, 6).unwrap();
    let friday = NaiveDate::from_ymd_opt(2025, 4, 4).unwrap();
    assert!(setup.service.is_work_day(sunday).unwrap());
    assert!(!setup.service.is_work_day(friday).unwrap());

    settings.holidays.push(sunday);
    setup.service.save_settings(&settings).unwrap();
    assert!(setup.service.is_holiday(sunday).unwrap());
    assert!(!setup.service.is_holiday(friday).unwrap());
}

// ==============================================================================
// END-TO-END SCHEDULE SCENARIO
// ==============================================================================

#[test]
fn test_shift_slots_then_conflicting_booking() {
    let setup = TestSetup::new();

    // shifts = [09:00-12:00], slotDuration = 30
    let shifts = [WorkShift::new("morning", t(9, 0), t(12, 0))];
    let slots: Vec<String> = generate_slots_or_default(&shifts, 30, t(9, 0), t(17, 0))
        .into_iter()
        .map(format_hhmm)
        .collect();
    assert_eq!(
        slots,
        vec!["09:00", "09:30", "10:00", "10:30", "11:00", "11:30"]
    );

    // Existing 10:15-10:45 booking blocks a 10:00 half-hour booking.
    let existing = setup
        .service
        .book(setup.request(d(9), t(10, 15), 30))
        .unwrap();
    assert_matches!(
        setup.service.book(setup.request(d(9), t(10, 0), 30)),
        Err(SchedulingError::Conflict { conflicting_id }) if conflicting_id == existing.id
    );
}

#[test]
fn test_display_grid_buckets_appointments_without_affecting_conflicts() {
    let setup = TestSetup::new();
    let apt = setup
        .service
        .book(setup.request(d(10), t(9, 20), 30))
        .unwrap();

    // 15-minute micro-grid for display rows, independent of the 30-minute
    // booking granularity.
    let grid = generate_slots_or_default(
        &[WorkShift::new("m", t(9, 0), t(10, 0))],
        15,
        t(9, 0),
        t(17, 0),
    );
    let appointments = setup.service.list_for_date(d(10)).unwrap();
    let rows = bucket_appointments(&appointments, d(10), &grid);

    let row_0915 = rows.iter().find(|(t0, _)| *t0 == t(9, 15)).unwrap();
    assert_eq!(row_0915.1.len(), 1);
    assert_eq!(row_0915.1[0].id, apt.id);

    let occupied: usize = rows.iter().map(|(_, b)| b.len()).sum();
    assert_eq!(occupied, 1);
}

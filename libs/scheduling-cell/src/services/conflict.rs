//! Appointment interval-overlap detection.
//!
//! Pure function over explicit inputs; callers load the appointment list and
//! decide how to surface a detected conflict.

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use shared_models::time::minutes_of_day;

use crate::models::Appointment;

/// Find the first existing appointment for `doctor_id` on `date` whose
/// `[start, start+duration)` interval overlaps the proposed one.
///
/// Intervals are half-open and the comparison is strict, so an appointment
/// ending exactly when another starts is not a conflict, and zero-length
/// intervals never conflict. `exclude_id` skips the appointment being edited
/// so it cannot conflict with itself. Returns `None` when the slot is free.
pub fn conflicting_appointment<'a>(
    existing: &'a [Appointment],
    date: NaiveDate,
    time: NaiveTime,
    duration_minutes: u32,
    doctor_id: Uuid,
    exclude_id: Option<Uuid>,
) -> Option<&'a Appointment> {
    let start = minutes_of_day(time);
    let end = start + duration_minutes;

    existing.iter().find(|apt| {
        if apt.doctor_id != doctor_id || apt.date != date {
            return false;
        }
        if exclude_id == Some(apt.id) {
            return false;
        }
        let apt_start = minutes_of_day(apt.time);
        let apt_end = apt_start + apt.duration_minutes;
        start < apt_end && end > apt_start
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentStatus;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn apt(doctor: Uuid, time: NaiveTime, duration: u32) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            date: d(),
            time,
            duration_minutes: duration,
            doctor_id: doctor,
            patient_id: None,
            temp_patient_name: Some("walk-in".to_string()),
            treatment_type: "فحص".to_string(),
            status: AppointmentStatus::Scheduled,
            notes: String::new(),
        }
    }

    #[test]
    fn test_overlap_detected_in_both_insertion_orders() {
        let doctor = Uuid::new_v4();
        let a = apt(doctor, t(10, 15), 30); // 10:15-10:45
        let existing = vec![a.clone()];

        // Proposed 10:00-10:30 overlaps 10:15-10:45.
        let hit = conflicting_appointment(&existing, d(), t(10, 0), 30, doctor, None);
        assert_eq!(hit.map(|x| x.id), Some(a.id));

        // And the mirrored case: existing 10:00-10:30, proposed 10:15-10:45.
        let b = apt(doctor, t(10, 0), 30);
        let existing = vec![b.clone()];
        let hit = conflicting_appointment(&existing, d(), t(10, 15), 30, doctor, None);
        assert_eq!(hit.map(|x| x.id), Some(b.id));
    }

    #[test]
    fn test_touching_boundaries_do_not_conflict() {
        let doctor = Uuid::new_v4();
        let existing = vec![apt(doctor, t(9, 0), 30)]; // 09:00-09:30

        assert!(conflicting_appointment(&existing, d(), t(9, 30), 30, doctor, None).is_none());
        assert!(conflicting_appointment(&existing, d(), t(8, 30), 30, doctor, None).is_none());
    }

    #[test]
    fn test_zero_length_never_conflicts() {
        let doctor = Uuid::new_v4();
        let existing = vec![apt(doctor, t(9, 0), 30)];
        assert!(conflicting_appointment(&existing, d(), t(9, 10), 0, doctor, None).is_none());
    }

    #[test]
    fn test_other_doctor_and_other_date_ignored() {
        let doctor = Uuid::new_v4();
        let existing = vec![apt(doctor, t(9, 0), 60)];

        assert!(
            conflicting_appointment(&existing, d(), t(9, 0), 60, Uuid::new_v4(), None).is_none()
        );
        let other_day = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
        assert!(conflicting_appointment(&existing, other_day, t(9, 0), 60, doctor, None).is_none());
    }

    #[test]
    fn test_exclude_id_skips_self() {
        let doctor = Uuid::new_v4();
        let a = apt(doctor, t(9, 0), 30);
        let existing = vec![a.clone()];

        assert!(
            conflicting_appointment(&existing, d(), t(9, 0), 30, doctor, Some(a.id)).is_none()
        );
        // A different appointment at the same slot still conflicts.
        assert!(
            conflicting_appointment(&existing, d(), t(9, 0), 30, doctor, Some(Uuid::new_v4()))
                .is_some()
        );
    }

    #[test]
    fn test_containment_counts_as_overlap() {
        let doctor = Uuid::new_v4();
        let existing = vec![apt(doctor, t(9, 0), 120)]; // 09:00-11:00
        assert!(conflicting_appointment(&existing, d(), t(9, 30), 30, doctor, None).is_some());
        // Proposed interval containing the existing one.
        let existing = vec![apt(doctor, t(9, 30), 30)];
        assert!(conflicting_appointment(&existing, d(), t(9, 0), 120, doctor, None).is_some());
    }

    #[test]
    fn test_empty_list_is_free() {
        assert!(conflicting_appointment(&[], d(), t(9, 0), 30, Uuid::new_v4(), None).is_none());
    }
}

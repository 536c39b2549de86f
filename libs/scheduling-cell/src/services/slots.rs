//! Time-grid generation from configured work shifts.

use chrono::{NaiveDate, NaiveTime};

use shared_models::time::{minutes_of_day, time_from_minutes};

use crate::models::{Appointment, WorkShift};

/// Discrete bookable times: for each shift in list order, emit the start
/// time and every `step_minutes` increment strictly before the shift end.
/// Shifts are same-day windows; a shift whose end is not after its start
/// contributes nothing.
pub fn generate_slots(shifts: &[WorkShift], step_minutes: u32) -> Vec<NaiveTime> {
    let mut slots = Vec::new();
    if step_minutes == 0 {
        return slots;
    }

    for shift in shifts {
        let end = minutes_of_day(shift.end_time);
        let mut current = minutes_of_day(shift.start_time);
        while current < end {
            slots.push(time_from_minutes(current));
            current += step_minutes;
        }
    }

    slots
}

/// Like [`generate_slots`], but an empty shift list falls back to a single
/// window spanning the configured default start/end.
pub fn generate_slots_or_default(
    shifts: &[WorkShift],
    step_minutes: u32,
    default_start: NaiveTime,
    default_end: NaiveTime,
) -> Vec<NaiveTime> {
    if shifts.is_empty() {
        let fallback = [WorkShift::new("default", default_start, default_end)];
        generate_slots(&fallback, step_minutes)
    } else {
        generate_slots(shifts, step_minutes)
    }
}

/// Bucket one day's appointments onto a display grid: each appointment lands
/// on the latest grid row at or before its start time. Appointments starting
/// before the first row are dropped. Purely presentational; the conflict
/// check always uses exact start plus duration, never the grid.
pub fn bucket_appointments<'a>(
    appointments: &'a [Appointment],
    date: NaiveDate,
    grid: &[NaiveTime],
) -> Vec<(NaiveTime, Vec<&'a Appointment>)> {
    let mut rows: Vec<(NaiveTime, Vec<&Appointment>)> =
        grid.iter().map(|&t| (t, Vec::new())).collect();

    for apt in appointments.iter().filter(|a| a.date == date) {
        let start = minutes_of_day(apt.time);
        let row = rows
            .iter_mut()
            .filter(|(t, _)| minutes_of_day(*t) <= start)
            .max_by_key(|(t, _)| minutes_of_day(*t));
        if let Some((_, bucket)) = row {
            bucket.push(apt);
        }
    }

    rows
}

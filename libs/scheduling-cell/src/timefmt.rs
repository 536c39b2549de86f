//! Display formatting for appointment times. The clinic UI shows 12-hour
//! times with Arabic meridiem suffixes; records always keep 24-hour "HH:mm".

use chrono::{NaiveTime, Timelike};

use shared_models::time::{format_hhmm, minutes_of_day, time_from_minutes};

/// 12-hour display with Arabic suffix: "9:30 ص" / "3:00 م".
pub fn format_time_12(time: NaiveTime) -> String {
    let suffix = if time.hour() < 12 { "ص" } else { "م" };
    let hour = match time.hour() % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", hour, time.minute(), suffix)
}

/// 12-hour range display: "9:30 ص - 10:00 ص".
pub fn format_time_range_12(time: NaiveTime, duration_minutes: u32) -> String {
    let end = time_from_minutes(minutes_of_day(time) + duration_minutes);
    format!("{} - {}", format_time_12(time), format_time_12(end))
}

/// 24-hour range display: "09:30 - 10:00".
pub fn format_time_range_24(time: NaiveTime, duration_minutes: u32) -> String {
    let end = time_from_minutes(minutes_of_day(time) + duration_minutes);
    format!("{} - {}", format_hhmm(time), format_hhmm(end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_morning_and_afternoon_suffixes() {
        assert_eq!(format_time_12(t(9, 30)), "9:30 ص");
        assert_eq!(format_time_12(t(15, 0)), "3:00 م");
        assert_eq!(format_time_12(t(0, 5)), "12:05 ص");
        assert_eq!(format_time_12(t(12, 0)), "12:00 م");
    }

    #[test]
    fn test_range_crossing_noon() {
        assert_eq!(format_time_range_12(t(11, 45), 30), "11:45 ص - 12:15 م");
    }

    #[test]
    fn test_range_24_wraps_midnight() {
        assert_eq!(format_time_range_24(t(23, 45), 30), "23:45 - 00:15");
    }
}

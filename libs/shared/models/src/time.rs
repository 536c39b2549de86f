//! Clock-time helpers shared by every cell that touches schedules.
//!
//! All persisted times are 24-hour `"HH:mm"` strings, zero-padded to two
//! digits on both components. The `hhmm` serde module keeps that exact
//! format on the wire while domain code works with `chrono::NaiveTime`.

use chrono::{NaiveTime, Timelike};

/// Serde codec for `NaiveTime` as `"HH:mm"`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .map_err(|e| serde::de::Error::custom(format!("invalid HH:mm time {raw:?}: {e}")))
    }
}

/// Render a time as zero-padded 24-hour `"HH:mm"`.
pub fn format_hhmm(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Minutes since midnight.
pub fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Build a time from minutes since midnight, wrapping past 24h.
pub fn time_from_minutes(minutes: u32) -> NaiveTime {
    let m = minutes % (24 * 60);
    NaiveTime::from_hms_opt(m / 60, m % 60, 0)
        .unwrap_or_else(|| NaiveTime::from_hms_opt(0, 0, 0).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_is_zero_padded() {
        let t = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        assert_eq!(format_hhmm(t), "09:05");
    }

    #[test]
    fn test_minutes_round_trip() {
        for m in [0, 1, 59, 60, 9 * 60 + 30, 23 * 60 + 59] {
            assert_eq!(minutes_of_day(time_from_minutes(m)), m);
        }
    }

    #[test]
    fn test_hhmm_codec_preserves_format() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Wrapper {
            #[serde(with = "hhmm")]
            at: NaiveTime,
        }

        let w: Wrapper = serde_json::from_str(r#"{"at":"07:45"}"#).unwrap();
        assert_eq!(minutes_of_day(w.at), 7 * 60 + 45);
        assert_eq!(serde_json::to_string(&w).unwrap(), r#"{"at":"07:45"}"#);
    }
}

use std::env;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory where the JSON-file store keeps its data.
    pub data_dir: PathBuf,
    /// Fallback shift window used when no shifts are configured.
    pub default_start_time: String,
    pub default_end_time: String,
    /// Booking slot granularity in minutes.
    pub default_slot_minutes: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("CLINIC_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    warn!("CLINIC_DATA_DIR not set, using ./clinic-data");
                    PathBuf::from("clinic-data")
                }),
            default_start_time: env::var("CLINIC_DEFAULT_START_TIME")
                .unwrap_or_else(|_| "09:00".to_string()),
            default_end_time: env::var("CLINIC_DEFAULT_END_TIME")
                .unwrap_or_else(|_| "17:00".to_string()),
            default_slot_minutes: env::var("CLINIC_SLOT_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(|| {
                    warn!("CLINIC_SLOT_MINUTES not set or invalid, using 30");
                    30
                }),
        }
    }

    /// Slot granularity to use for a stored settings value, falling back to
    /// the configured default when the stored value is zero.
    pub fn slot_minutes(&self, configured: u32) -> u32 {
        if configured > 0 {
            configured
        } else {
            self.default_slot_minutes
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("clinic-data"),
            default_start_time: "09:00".to_string(),
            default_end_time: "17:00".to_string(),
            default_slot_minutes: 30,
        }
    }
}

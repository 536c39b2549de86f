use std::sync::Arc;

use anyhow::Result;
use chrono::{Local, NaiveTime};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod bootstrap;
mod summary;

use scheduling_cell::{generate_slots_or_default, AppointmentService};
use shared_config::AppConfig;
use shared_storage::{JsonFileStore, KeyValueStore};

fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting clinic manager");

    let config = AppConfig::from_env();
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(&config.data_dir)?);
    info!("Data directory: {}", config.data_dir.display());

    bootstrap::seed(store.clone())?;

    let scheduling = AppointmentService::new(store.clone());
    let settings = scheduling.settings()?;
    let default_start = NaiveTime::parse_from_str(&config.default_start_time, "%H:%M")
        .unwrap_or(settings.start_time);
    let default_end = NaiveTime::parse_from_str(&config.default_end_time, "%H:%M")
        .unwrap_or(settings.end_time);
    let slots = generate_slots_or_default(
        &settings.shifts,
        config.slot_minutes(settings.slot_duration),
        default_start,
        default_end,
    );

    let today = Local::now().date_naive();
    for line in summary::startup_summary(store, today, slots.len())? {
        info!("{line}");
    }

    Ok(())
}

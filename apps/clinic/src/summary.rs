use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;

use dental_chart_cell::{oval_positions, OvalOptions, DECIDUOUS_ORDER, PERMANENT_ORDER};
use doctor_cell::DoctorService;
use patient_cell::PatientService;
use scheduling_cell::AppointmentService;
use shared_storage::KeyValueStore;
use staff_cell::StaffService;

const CHART_VIEWPORT: OvalOptions = OvalOptions {
    width: 420.0,
    height: 520.0,
    padding: 16.0,
};

/// Startup report lines covering every cell the app serves.
pub fn startup_summary(
    store: Arc<dyn KeyValueStore>,
    today: NaiveDate,
    bookable_slots: usize,
) -> Result<Vec<String>> {
    let doctors = DoctorService::new(store.clone());
    let patients = PatientService::new(store.clone());
    let staff = StaffService::new(store.clone());
    let scheduling = AppointmentService::new(store);

    Ok(vec![
        format!(
            "doctors: {}, patients: {}, staff accounts: {}",
            doctors.list()?.len(),
            patients.list()?.len(),
            staff.list()?.len(),
        ),
        format!(
            "{}: {} appointments across {} bookable slots",
            today,
            scheduling.list_for_date(today)?.len(),
            bookable_slots,
        ),
        format!(
            "dental chart layouts ready: {} permanent, {} deciduous positions",
            oval_positions(&PERMANENT_ORDER, CHART_VIEWPORT).len(),
            oval_positions(&DECIDUOUS_ORDER, CHART_VIEWPORT).len(),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_storage::MemoryStore;

    #[test]
    fn test_summary_reports_every_cell() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        crate::bootstrap::seed(store.clone()).unwrap();

        let today = NaiveDate::from_ymd_opt(2025, 8, 29).unwrap();
        let lines = startup_summary(store, today, 16).unwrap();

        assert_eq!(lines.len(), 3);
        // The seeded store holds exactly the owner doctor.
        assert_eq!(lines[0], "doctors: 1, patients: 0, staff accounts: 0");
        assert!(lines[1].contains("0 appointments across 16 bookable slots"));
        assert!(lines[2].contains("32 permanent, 20 deciduous"));
    }
}

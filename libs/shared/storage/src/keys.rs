//! Fixed set of storage keys. Every cell reads and writes whole collections
//! under one of these keys; there is no per-record addressing.

pub const CLINIC_SETTINGS: &str = "clinic_settings";
pub const DOCTORS: &str = "doctors";
pub const TREATMENT_GROUPS: &str = "treatment_groups";
pub const PATIENTS: &str = "patients";
pub const APPOINTMENTS: &str = "appointments";
pub const INVOICES: &str = "invoices";
pub const PAYMENTS: &str = "payments";
pub const EXPENSES: &str = "expenses";
pub const EXPENSE_TYPES: &str = "expense_types";
pub const STAFF: &str = "staff";
pub const PRESCRIPTIONS: &str = "prescriptions";
pub const PATIENT_FILES: &str = "patient_files";
pub const PATIENT_TREATMENTS: &str = "patient_treatments";
pub const LABS: &str = "labs";
pub const LAB_WORK_TYPES: &str = "lab_work_types";
pub const LAB_ORDERS: &str = "lab_orders";
pub const LAB_PAYMENTS: &str = "lab_payments";
pub const DOCTOR_PAYMENTS: &str = "doctor_payments";
pub const AUTH_SESSION: &str = "auth_session";

/// Keys that hold plain record arrays and start out empty.
pub const EMPTY_ARRAY_KEYS: &[&str] = &[
    PATIENTS,
    APPOINTMENTS,
    INVOICES,
    PAYMENTS,
    EXPENSES,
    STAFF,
    PRESCRIPTIONS,
    PATIENT_FILES,
    PATIENT_TREATMENTS,
    LABS,
    LAB_ORDERS,
    LAB_PAYMENTS,
    DOCTOR_PAYMENTS,
];

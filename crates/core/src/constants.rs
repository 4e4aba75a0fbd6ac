//! Constants used throughout the hims core crate.
//!
//! All section directory names and filenames live here so the storage
//! layout is defined in exactly one place.

/// Default directory for record storage when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "hims_data";

/// Filename of the JSON document inside each record directory.
pub const RECORD_FILENAME: &str = "record.json";

/// Directory name for patient records.
pub const PATIENTS_DIR_NAME: &str = "patients";

/// Directory name for prescription records.
pub const PRESCRIPTIONS_DIR_NAME: &str = "prescriptions";

/// Directory name for blood bank units.
pub const BLOOD_BANK_DIR_NAME: &str = "blood_bank";

/// Directory name for equipment records.
pub const EQUIPMENT_DIR_NAME: &str = "equipment";

/// Directory name for ICU chart entries.
pub const ICU_DIR_NAME: &str = "icu_charts";

/// Directory name for swab collections.
pub const SWABS_DIR_NAME: &str = "swabs";

/// Directory name for general inventory items.
pub const INVENTORY_DIR_NAME: &str = "inventory";

/// Directory name for notifications.
pub const NOTIFICATIONS_DIR_NAME: &str = "notifications";

/// Directory name for staff accounts.
pub const STAFF_DIR_NAME: &str = "staff";

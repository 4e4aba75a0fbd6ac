//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into core
//! services. The intent is to avoid reading process-wide environment
//! variables during request handling, which can lead to inconsistent
//! behaviour in multi-threaded runtimes and test harnesses.

use std::path::{Path, PathBuf};

use crate::constants::{
    BLOOD_BANK_DIR_NAME, EQUIPMENT_DIR_NAME, ICU_DIR_NAME, INVENTORY_DIR_NAME,
    NOTIFICATIONS_DIR_NAME, PATIENTS_DIR_NAME, PRESCRIPTIONS_DIR_NAME, STAFF_DIR_NAME,
    SWABS_DIR_NAME,
};
use crate::error::{RecordError, RecordResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    facility_namespace: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::InvalidInput` if `facility_namespace` is
    /// empty or whitespace-only.
    pub fn new(data_dir: PathBuf, facility_namespace: String) -> RecordResult<Self> {
        if facility_namespace.trim().is_empty() {
            return Err(RecordError::InvalidInput(
                "facility_namespace cannot be empty".into(),
            ));
        }

        Ok(Self {
            data_dir,
            facility_namespace,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn facility_namespace(&self) -> &str {
        &self.facility_namespace
    }

    pub fn patients_dir(&self) -> PathBuf {
        self.data_dir.join(PATIENTS_DIR_NAME)
    }

    pub fn prescriptions_dir(&self) -> PathBuf {
        self.data_dir.join(PRESCRIPTIONS_DIR_NAME)
    }

    pub fn blood_bank_dir(&self) -> PathBuf {
        self.data_dir.join(BLOOD_BANK_DIR_NAME)
    }

    pub fn equipment_dir(&self) -> PathBuf {
        self.data_dir.join(EQUIPMENT_DIR_NAME)
    }

    pub fn icu_dir(&self) -> PathBuf {
        self.data_dir.join(ICU_DIR_NAME)
    }

    pub fn swabs_dir(&self) -> PathBuf {
        self.data_dir.join(SWABS_DIR_NAME)
    }

    pub fn inventory_dir(&self) -> PathBuf {
        self.data_dir.join(INVENTORY_DIR_NAME)
    }

    pub fn notifications_dir(&self) -> PathBuf {
        self.data_dir.join(NOTIFICATIONS_DIR_NAME)
    }

    pub fn staff_dir(&self) -> PathBuf {
        self.data_dir.join(STAFF_DIR_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_namespace() {
        let err = CoreConfig::new(PathBuf::from("data"), "  ".into())
            .expect_err("empty namespace should be rejected");
        assert!(matches!(err, RecordError::InvalidInput(msg) if msg.contains("facility_namespace")));
    }

    #[test]
    fn test_section_dirs_hang_off_data_dir() {
        let cfg = CoreConfig::new(PathBuf::from("data"), "hims.test".into())
            .expect("CoreConfig::new should succeed");
        assert_eq!(cfg.patients_dir(), Path::new("data/patients"));
        assert_eq!(cfg.blood_bank_dir(), Path::new("data/blood_bank"));
        assert_eq!(cfg.icu_dir(), Path::new("data/icu_charts"));
        assert_eq!(cfg.facility_namespace(), "hims.test");
    }
}

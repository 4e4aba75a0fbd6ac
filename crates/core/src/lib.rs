//! # hims Core
//!
//! Core business logic for the hims hospital information system.
//!
//! This crate contains pure data operations and record storage:
//! - Domain services for every record family (patients, prescriptions,
//!   blood bank, equipment, ICU charting, swab monitoring, inventory,
//!   notifications, staff accounts, admin overview)
//! - The derived-scheduling and quantity-calculation rules shared by
//!   those services (`dosing`, `scheduling`, `fluid`, `contamination`)
//! - Sharded JSON record storage under the configured data directory
//!
//! **No API concerns**: HTTP servers, request parsing, or service
//! interfaces belong in `api-rest`.

pub mod admin;
pub mod blood_bank;
pub mod config;
pub mod constants;
pub mod contamination;
pub mod dosing;
pub mod equipment;
pub mod error;
pub mod fluid;
pub mod icu;
pub mod inventory;
pub mod notifications;
pub mod patients;
pub mod prescriptions;
pub mod scheduling;
pub mod staff;
pub mod store;
pub mod swabs;

pub use config::CoreConfig;
pub use constants::DEFAULT_DATA_DIR;
pub use error::{RecordError, RecordResult};
pub use hims_types::{EmailAddress, NonEmptyText, TextError};
pub use hims_uuid::{IdError, RecordId};

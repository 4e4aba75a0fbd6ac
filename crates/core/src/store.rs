//! Sharded JSON record storage.
//!
//! Every record family is stored as one JSON document per record in a
//! sharded directory structure:
//!
//! ```text
//! <section>/
//!   <s1>/
//!     <s2>/
//!       <id>/
//!         record.json
//! ```
//!
//! where `s1` and `s2` are the first four hex characters of the record's
//! canonical identifier. Sharding keeps directory fan-out bounded so a
//! section scales to a large number of records.
//!
//! ## Pure data operations
//!
//! This module contains **only** storage operations. Domain rules live in
//! the service modules; API concerns live in `api-rest`.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::constants::RECORD_FILENAME;
use crate::error::{RecordError, RecordResult};
use hims_uuid::RecordId;

/// Storage for one record section (patients, equipment, ...).
///
/// The store is cheap to construct; services create one per section from
/// the corresponding `CoreConfig` directory accessor.
#[derive(Clone, Debug)]
pub struct RecordStore {
    section_dir: PathBuf,
}

impl RecordStore {
    /// Creates a store rooted at `section_dir`.
    ///
    /// The directory is created lazily on first write, so constructing a
    /// store never touches the filesystem.
    pub fn new(section_dir: PathBuf) -> Self {
        Self { section_dir }
    }

    fn record_path(&self, id: &RecordId) -> PathBuf {
        id.sharded_dir(&self.section_dir).join(RECORD_FILENAME)
    }

    /// Allocates a fresh record directory, guarding against pathological
    /// identifier collisions (or pre-existing directories from external
    /// interference) by retrying with new identifiers a bounded number of
    /// times.
    fn create_unique_record_dir(&self) -> RecordResult<(RecordId, PathBuf)> {
        for _attempt in 0..5 {
            let id = RecordId::generate();
            let candidate = id.sharded_dir(&self.section_dir);

            if candidate.exists() {
                continue;
            }

            if let Some(parent) = candidate.parent() {
                fs::create_dir_all(parent).map_err(RecordError::StorageDirCreation)?;
            }

            match fs::create_dir(&candidate) {
                Ok(()) => return Ok((id, candidate)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(RecordError::RecordDirCreation(e)),
            }
        }

        Err(RecordError::RecordDirCreation(io::Error::new(
            ErrorKind::AlreadyExists,
            "failed to allocate a unique record directory after 5 attempts",
        )))
    }

    /// Creates a new record.
    ///
    /// Allocates an identifier, lets `build` construct the record around
    /// it, and persists the result. Returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns `RecordError` if directory allocation, serialisation, or
    /// the file write fails.
    pub fn create<T, F>(&self, build: F) -> RecordResult<T>
    where
        T: Serialize,
        F: FnOnce(RecordId) -> T,
    {
        let (id, dir) = self.create_unique_record_dir()?;
        let record = build(id);

        let json = serde_json::to_string_pretty(&record).map_err(RecordError::Serialization)?;
        fs::write(dir.join(RECORD_FILENAME), json).map_err(RecordError::FileWrite)?;

        Ok(record)
    }

    /// Loads one record by identifier.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` if no document exists for `id`,
    /// `RecordError::FileRead`/`Deserialization` on other failures.
    pub fn load<T: DeserializeOwned>(&self, id: &RecordId) -> RecordResult<T> {
        let path = self.record_path(id);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(RecordError::NotFound(id.to_string()));
            }
            Err(e) => return Err(RecordError::FileRead(e)),
        };
        serde_json::from_str(&contents).map_err(RecordError::Deserialization)
    }

    /// Overwrites the document of an existing record.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` if the record directory does not
    /// exist; updates never implicitly create records.
    pub fn save<T: Serialize>(&self, id: &RecordId, record: &T) -> RecordResult<()> {
        let dir = id.sharded_dir(&self.section_dir);
        if !dir.is_dir() {
            return Err(RecordError::NotFound(id.to_string()));
        }

        let json = serde_json::to_string_pretty(record).map_err(RecordError::Serialization)?;
        fs::write(dir.join(RECORD_FILENAME), json).map_err(RecordError::FileWrite)?;

        Ok(())
    }

    /// Lists all records in this section.
    ///
    /// Traverses the sharded directory structure and reads every record
    /// document. A document that cannot be read or parsed is logged as a
    /// warning and skipped; a missing section directory yields an empty
    /// list. Callers therefore always get the readable subset.
    pub fn list<T: DeserializeOwned>(&self) -> Vec<T> {
        let mut records = Vec::new();

        let s1_iter = match fs::read_dir(&self.section_dir) {
            Ok(it) => it,
            Err(_) => return records,
        };

        for s1 in s1_iter.flatten() {
            let s1_path = s1.path();
            if !s1_path.is_dir() {
                continue;
            }

            let s2_iter = match fs::read_dir(&s1_path) {
                Ok(it) => it,
                Err(_) => continue,
            };

            for s2 in s2_iter.flatten() {
                let s2_path = s2.path();
                if !s2_path.is_dir() {
                    continue;
                }

                let id_iter = match fs::read_dir(&s2_path) {
                    Ok(it) => it,
                    Err(_) => continue,
                };

                for id_ent in id_iter.flatten() {
                    let record_path = id_ent.path().join(RECORD_FILENAME);
                    if !record_path.is_file() {
                        continue;
                    }

                    match fs::read_to_string(&record_path) {
                        Ok(contents) => match serde_json::from_str::<T>(&contents) {
                            Ok(record) => records.push(record),
                            Err(e) => {
                                tracing::warn!(
                                    "skipping unparseable record {}: {}",
                                    record_path.display(),
                                    e
                                );
                            }
                        },
                        Err(e) => {
                            tracing::warn!(
                                "skipping unreadable record {}: {}",
                                record_path.display(),
                                e
                            );
                        }
                    }
                }
            }
        }

        records
    }

    /// Returns the number of readable records in this section.
    pub fn count<T: DeserializeOwned>(&self) -> usize {
        self.list::<T>().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        id: RecordId,
        label: String,
    }

    fn store_in(temp_dir: &TempDir) -> RecordStore {
        RecordStore::new(temp_dir.path().join("samples"))
    }

    #[test]
    fn test_create_then_load_round_trips() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = store_in(&temp_dir);

        let created = store
            .create(|id| Sample {
                id,
                label: "first".into(),
            })
            .expect("create should succeed");

        let loaded: Sample = store.load(&created.id).expect("load should succeed");
        assert_eq!(loaded, created);

        let record_dir = created.id.sharded_dir(&temp_dir.path().join("samples"));
        assert!(record_dir.join(RECORD_FILENAME).is_file());
    }

    #[test]
    fn test_load_missing_record_is_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = store_in(&temp_dir);

        let id = RecordId::generate();
        let err = store
            .load::<Sample>(&id)
            .expect_err("missing record should not load");
        assert!(matches!(err, RecordError::NotFound(s) if s == id.to_string()));
    }

    #[test]
    fn test_save_updates_existing_record_only() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = store_in(&temp_dir);

        let mut record = store
            .create(|id| Sample {
                id,
                label: "before".into(),
            })
            .expect("create should succeed");

        record.label = "after".into();
        store.save(&record.id, &record).expect("save should succeed");

        let loaded: Sample = store.load(&record.id).expect("load should succeed");
        assert_eq!(loaded.label, "after");

        let orphan = RecordId::generate();
        let err = store
            .save(&orphan, &record)
            .expect_err("saving a never-created record should fail");
        assert!(matches!(err, RecordError::NotFound(_)));
    }

    #[test]
    fn test_list_skips_corrupt_documents() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = store_in(&temp_dir);

        for label in ["a", "b", "c"] {
            store
                .create(|id| Sample {
                    id,
                    label: label.into(),
                })
                .expect("create should succeed");
        }

        // Corrupt one record on disk.
        let victim: Sample = store.list().into_iter().next().expect("have records");
        let victim_path = victim
            .id
            .sharded_dir(&temp_dir.path().join("samples"))
            .join(RECORD_FILENAME);
        fs::write(&victim_path, "{ not json").expect("should corrupt file");

        let survivors: Vec<Sample> = store.list();
        assert_eq!(survivors.len(), 2, "corrupt record should be skipped");
        assert!(survivors.iter().all(|s| s.id != victim.id));
    }

    #[test]
    fn test_list_on_missing_section_is_empty() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = store_in(&temp_dir);

        let records: Vec<Sample> = store.list();
        assert!(records.is_empty());
        assert_eq!(store.count::<Sample>(), 0);
    }
}

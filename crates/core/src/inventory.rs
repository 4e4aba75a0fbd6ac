//! General store inventory.
//!
//! Tracks consumables, instruments, and pharmacy stock outside the blood
//! bank. Stock moves through signed adjustments; an adjustment that would
//! take the quantity below zero is rejected rather than clamped.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::CoreConfig;
use crate::error::{RecordError, RecordResult};
use crate::store::RecordStore;
use hims_types::NonEmptyText;
use hims_uuid::RecordId;

/// Category of an inventory item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Medicine,
    Consumable,
    Instrument,
    Other,
}

/// A stored inventory item.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct InventoryItem {
    #[schema(value_type = String)]
    pub id: RecordId,
    #[schema(value_type = String)]
    pub name: NonEmptyText,
    pub category: ItemCategory,
    pub quantity: u32,
    /// Unit of issue, such as "box", "vial", "piece".
    pub unit: String,
    /// Stock at or below this level appears in the low-stock listing.
    pub reorder_level: u32,
    pub expiry_date: Option<NaiveDate>,
}

/// Input for adding an inventory item.
#[derive(Clone, Debug)]
pub struct NewInventoryItem {
    pub name: NonEmptyText,
    pub category: ItemCategory,
    pub quantity: u32,
    pub unit: String,
    pub reorder_level: u32,
    pub expiry_date: Option<NaiveDate>,
}

/// Service for inventory operations.
#[derive(Clone, Debug)]
pub struct InventoryService {
    store: RecordStore,
}

impl InventoryService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            store: RecordStore::new(cfg.inventory_dir()),
        }
    }

    /// Adds a new item.
    pub fn add(&self, new: NewInventoryItem) -> RecordResult<InventoryItem> {
        self.store.create(|id| InventoryItem {
            id,
            name: new.name,
            category: new.category,
            quantity: new.quantity,
            unit: new.unit,
            reorder_level: new.reorder_level,
            expiry_date: new.expiry_date,
        })
    }

    /// Fetches one item by identifier.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` if no such item exists.
    pub fn fetch(&self, id: &RecordId) -> RecordResult<InventoryItem> {
        self.store.load(id)
    }

    /// Applies a signed stock adjustment (receipt positive, issue
    /// negative) and returns the updated item.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::InvalidInput` if the adjustment would drive
    /// the quantity below zero, `RecordError::NotFound` for an unknown
    /// item.
    pub fn adjust_stock(&self, id: &RecordId, delta: i64) -> RecordResult<InventoryItem> {
        let mut item: InventoryItem = self.store.load(id)?;

        let adjusted = i64::from(item.quantity) + delta;
        if adjusted < 0 {
            return Err(RecordError::InvalidInput(format!(
                "cannot issue {} of '{}': only {} in stock",
                delta.unsigned_abs(),
                item.name,
                item.quantity
            )));
        }
        item.quantity = adjusted as u32;

        self.store.save(id, &item)?;
        Ok(item)
    }

    /// Lists every item.
    pub fn list(&self) -> Vec<InventoryItem> {
        self.store.list()
    }

    /// Items at or below their reorder level.
    pub fn low_stock(&self) -> Vec<InventoryItem> {
        self.list()
            .into_iter()
            .filter(|item| item.quantity <= item.reorder_level)
            .collect()
    }
}

//! Super-admin overview.
//!
//! A read-only aggregation across every record family, backing the admin
//! console's landing figures. All numbers are derived on demand from the
//! underlying services; nothing here owns state.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::blood_bank::BloodBankService;
use crate::config::CoreConfig;
use crate::equipment::EquipmentService;
use crate::inventory::InventoryService;
use crate::notifications::NotificationService;
use crate::patients::PatientService;
use crate::prescriptions::PrescriptionService;
use crate::staff::StaffService;
use crate::swabs::SwabService;

/// Headline figures across the whole system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SystemOverview {
    pub patients: usize,
    pub prescriptions: usize,
    pub blood_units_available: usize,
    pub equipment_total: usize,
    pub equipment_overdue: usize,
    pub equipment_due_soon: usize,
    pub inventory_low_stock: usize,
    pub swabs_pending_result: usize,
    pub staff_active: usize,
    pub notifications_unread: usize,
}

/// Service producing the admin overview.
#[derive(Clone, Debug)]
pub struct AdminService {
    cfg: Arc<CoreConfig>,
}

impl AdminService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Gathers the overview, deriving equipment status against `today`.
    pub fn overview(&self, today: NaiveDate) -> SystemOverview {
        let equipment = EquipmentService::new(self.cfg.clone());
        let (equipment_overdue, equipment_due_soon, _) = equipment.status_counts(today);

        SystemOverview {
            patients: PatientService::new(self.cfg.clone()).count(),
            prescriptions: PrescriptionService::new(self.cfg.clone()).count(),
            blood_units_available: BloodBankService::new(self.cfg.clone()).available_total(),
            equipment_total: equipment.count(),
            equipment_overdue,
            equipment_due_soon,
            inventory_low_stock: InventoryService::new(self.cfg.clone()).low_stock().len(),
            swabs_pending_result: SwabService::new(self.cfg.clone()).pending_count(),
            staff_active: StaffService::new(self.cfg.clone()).active_count(),
            notifications_unread: NotificationService::new(self.cfg.clone()).unread_total(),
        }
    }
}

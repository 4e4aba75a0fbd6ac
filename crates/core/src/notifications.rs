//! Staff notifications.
//!
//! Notifications are addressed to staff accounts and carry a severity.
//! Marking a notification read is idempotent.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::CoreConfig;
use crate::error::RecordResult;
use crate::staff::StaffService;
use crate::store::RecordStore;
use hims_types::NonEmptyText;
use hims_uuid::RecordId;

/// Urgency of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// A stored notification.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    #[schema(value_type = String)]
    pub id: RecordId,
    #[schema(value_type = String)]
    pub recipient_id: RecordId,
    #[schema(value_type = String)]
    pub title: NonEmptyText,
    pub body: String,
    pub severity: Severity,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Service for notification operations.
#[derive(Clone, Debug)]
pub struct NotificationService {
    cfg: Arc<CoreConfig>,
    store: RecordStore,
}

impl NotificationService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        let store = RecordStore::new(cfg.notifications_dir());
        Self { cfg, store }
    }

    /// Pushes a notification to a staff account.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` if the recipient does not exist.
    pub fn push(
        &self,
        recipient_id: RecordId,
        title: NonEmptyText,
        body: String,
        severity: Severity,
    ) -> RecordResult<Notification> {
        StaffService::new(self.cfg.clone()).fetch(&recipient_id)?;

        self.store.create(|id| Notification {
            id,
            recipient_id,
            title,
            body,
            severity,
            read: false,
            created_at: Utc::now(),
        })
    }

    /// A recipient's notifications, newest first.
    pub fn list_for(&self, recipient_id: &RecordId, unread_only: bool) -> Vec<Notification> {
        let mut notifications: Vec<Notification> = self
            .store
            .list::<Notification>()
            .into_iter()
            .filter(|n| n.recipient_id == *recipient_id && (!unread_only || !n.read))
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notifications
    }

    /// Marks a notification read. Re-marking is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` if no such notification exists.
    pub fn mark_read(&self, id: &RecordId) -> RecordResult<Notification> {
        let mut notification: Notification = self.store.load(id)?;
        if !notification.read {
            notification.read = true;
            self.store.save(id, &notification)?;
        }
        Ok(notification)
    }

    /// Unread notifications across all recipients.
    pub fn unread_total(&self) -> usize {
        self.store
            .list::<Notification>()
            .iter()
            .filter(|n| !n.read)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staff::{NewStaffAccount, StaffRole};
    use hims_types::EmailAddress;
    use std::path::Path;
    use tempfile::TempDir;

    fn test_cfg(data_dir: &Path) -> Arc<CoreConfig> {
        Arc::new(
            CoreConfig::new(data_dir.to_path_buf(), "hims.test".into())
                .expect("CoreConfig::new should succeed"),
        )
    }

    fn create_staff(cfg: Arc<CoreConfig>, email: &str) -> RecordId {
        StaffService::new(cfg)
            .create(NewStaffAccount {
                full_name: NonEmptyText::new("Nurse Example").unwrap(),
                email: EmailAddress::parse(email).unwrap(),
                role: StaffRole::Nurse,
            })
            .expect("create should succeed")
            .id
    }

    #[test]
    fn test_push_and_list_newest_first() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let service = NotificationService::new(cfg.clone());
        let recipient = create_staff(cfg, "nurse@hospital.example");

        service
            .push(
                recipient,
                NonEmptyText::new("Shift change").unwrap(),
                "Night shift starts at 20:00".into(),
                Severity::Info,
            )
            .expect("push should succeed");
        service
            .push(
                recipient,
                NonEmptyText::new("Equipment overdue").unwrap(),
                "Ventilator V-3 missed its service date".into(),
                Severity::Critical,
            )
            .expect("push should succeed");

        let inbox = service.list_for(&recipient, false);
        assert_eq!(inbox.len(), 2);
        assert!(inbox[0].created_at >= inbox[1].created_at);
        assert!(inbox.iter().all(|n| !n.read));
    }

    #[test]
    fn test_push_to_unknown_recipient_is_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let service = NotificationService::new(test_cfg(temp_dir.path()));

        let err = service
            .push(
                RecordId::generate(),
                NonEmptyText::new("Hello").unwrap(),
                String::new(),
                Severity::Info,
            )
            .expect_err("unknown recipient should be rejected");
        assert!(matches!(err, crate::RecordError::NotFound(_)));
    }

    #[test]
    fn test_mark_read_is_idempotent_and_filters_unread() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path());
        let service = NotificationService::new(cfg.clone());
        let recipient = create_staff(cfg, "doctor@hospital.example");

        let notification = service
            .push(
                recipient,
                NonEmptyText::new("Lab result").unwrap(),
                "Swab result available".into(),
                Severity::Warning,
            )
            .expect("push should succeed");

        assert_eq!(service.unread_total(), 1);

        let first = service
            .mark_read(&notification.id)
            .expect("mark_read should succeed");
        let second = service
            .mark_read(&notification.id)
            .expect("second mark_read should succeed");
        assert!(first.read && second.read);

        assert_eq!(service.unread_total(), 0);
        assert!(service.list_for(&recipient, true).is_empty());
        assert_eq!(service.list_for(&recipient, false).len(), 1);
    }
}

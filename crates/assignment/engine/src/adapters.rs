//! External collaborator interfaces.
//!
//! The engine consumes, and never implements, blob storage for evidence,
//! the audit sink, the notification publisher, and the user directory.
//! The in-memory implementations here back tests and local wiring; they
//! mirror what a production adapter would do without the I/O.

use assignment_types::{AssignmentId, User, UserId, WorkflowEvent};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

/// Failure inside an external collaborator. For the audit and
/// notification sinks this is logged and swallowed at the emission
/// boundary; for evidence storage and identity lookups it surfaces to
/// the caller as a storage error.
#[derive(Debug, thiserror::Error)]
#[error("adapter unavailable: {0}")]
pub struct AdapterError(pub String);

// ── Traits ───────────────────────────────────────────────────────────

/// Opaque blob storage for evidence files and report attachments.
#[async_trait]
pub trait EvidenceStore: Send + Sync {
    /// Persist the bytes and return an opaque reference string.
    async fn store(&self, bytes: &[u8], name: &str) -> Result<String, AdapterError>;

    /// Fetch previously stored bytes by reference.
    async fn fetch(&self, reference: &str) -> Result<Vec<u8>, AdapterError>;
}

/// Best-effort append-only audit sink.
#[async_trait]
pub trait AuditRecorder: Send + Sync {
    async fn record(
        &self,
        event: WorkflowEvent,
        assignment_id: &AssignmentId,
        actor: &UserId,
        metadata: serde_json::Value,
    ) -> Result<(), AdapterError>;
}

/// Fire-and-forget event publisher. Delivery is neither awaited nor
/// guaranteed by the engine.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn publish(
        &self,
        event: WorkflowEvent,
        assignment_id: &AssignmentId,
        recipients: &[UserId],
        payload: serde_json::Value,
    ) -> Result<(), AdapterError>;
}

/// Read-only view of the user directory.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, AdapterError>;
}

// ── In-memory adapters ───────────────────────────────────────────────

/// Blob store keeping everything in a map. References are
/// `evidence://<uuid>/<name>`.
#[derive(Default)]
pub struct InMemoryEvidenceStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryEvidenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EvidenceStore for InMemoryEvidenceStore {
    async fn store(&self, bytes: &[u8], name: &str) -> Result<String, AdapterError> {
        let reference = format!("evidence://{}/{}", uuid::Uuid::new_v4(), name);
        let mut guard = self
            .blobs
            .write()
            .map_err(|_| AdapterError("evidence lock poisoned".to_string()))?;
        guard.insert(reference.clone(), bytes.to_vec());
        Ok(reference)
    }

    async fn fetch(&self, reference: &str) -> Result<Vec<u8>, AdapterError> {
        let guard = self
            .blobs
            .read()
            .map_err(|_| AdapterError("evidence lock poisoned".to_string()))?;
        guard
            .get(reference)
            .cloned()
            .ok_or_else(|| AdapterError(format!("no evidence stored at {}", reference)))
    }
}

/// A recorded audit entry, for assertions in tests.
#[derive(Clone, Debug)]
pub struct RecordedAudit {
    pub event: WorkflowEvent,
    pub assignment_id: AssignmentId,
    pub actor: UserId,
    pub metadata: serde_json::Value,
}

/// Audit sink that records every entry in memory.
#[derive(Default)]
pub struct RecordingAuditLog {
    entries: Mutex<Vec<RecordedAudit>>,
}

impl RecordingAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<RecordedAudit> {
        self.entries.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn count_of(&self, event: WorkflowEvent) -> usize {
        self.entries().iter().filter(|e| e.event == event).count()
    }
}

#[async_trait]
impl AuditRecorder for RecordingAuditLog {
    async fn record(
        &self,
        event: WorkflowEvent,
        assignment_id: &AssignmentId,
        actor: &UserId,
        metadata: serde_json::Value,
    ) -> Result<(), AdapterError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| AdapterError("audit lock poisoned".to_string()))?;
        guard.push(RecordedAudit {
            event,
            assignment_id: assignment_id.clone(),
            actor: actor.clone(),
            metadata,
        });
        Ok(())
    }
}

/// A recorded notification, for assertions in tests.
#[derive(Clone, Debug)]
pub struct RecordedNotification {
    pub event: WorkflowEvent,
    pub assignment_id: AssignmentId,
    pub recipients: Vec<UserId>,
    pub payload: serde_json::Value,
}

/// Notification publisher that records every event in memory.
#[derive(Default)]
pub struct RecordingNotifier {
    published: Mutex<Vec<RecordedNotification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<RecordedNotification> {
        self.published.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn count_of(&self, event: WorkflowEvent) -> usize {
        self.published().iter().filter(|n| n.event == event).count()
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingNotifier {
    async fn publish(
        &self,
        event: WorkflowEvent,
        assignment_id: &AssignmentId,
        recipients: &[UserId],
        payload: serde_json::Value,
    ) -> Result<(), AdapterError> {
        let mut guard = self
            .published
            .lock()
            .map_err(|_| AdapterError("notification lock poisoned".to_string()))?;
        guard.push(RecordedNotification {
            event,
            assignment_id: assignment_id.clone(),
            recipients: recipients.to_vec(),
            payload,
        });
        Ok(())
    }
}

/// Fixed user directory for tests and local wiring.
#[derive(Default)]
pub struct StaticDirectory {
    users: RwLock<HashMap<UserId, User>>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let directory = Self::new();
        for user in users {
            directory.add(user);
        }
        directory
    }

    pub fn add(&self, user: User) {
        if let Ok(mut guard) = self.users.write() {
            guard.insert(user.id.clone(), user);
        }
    }
}

#[async_trait]
impl IdentityResolver for StaticDirectory {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, AdapterError> {
        let guard = self
            .users
            .read()
            .map_err(|_| AdapterError("directory lock poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_evidence_store_roundtrip() {
        let store = InMemoryEvidenceStore::new();
        let reference = store.store(b"photo bytes", "shelf.jpg").await.unwrap();
        assert!(reference.starts_with("evidence://"));
        assert!(reference.ends_with("/shelf.jpg"));

        let bytes = store.fetch(&reference).await.unwrap();
        assert_eq!(bytes, b"photo bytes");

        assert!(store.fetch("evidence://nope/x").await.is_err());
    }

    #[tokio::test]
    async fn test_static_directory_lookup() {
        let directory =
            StaticDirectory::with_users([User::new(UserId::new("u-1"), "Alex")]);
        assert!(directory
            .find_user(&UserId::new("u-1"))
            .await
            .unwrap()
            .is_some());
        assert!(directory
            .find_user(&UserId::new("ghost"))
            .await
            .unwrap()
            .is_none());
    }
}

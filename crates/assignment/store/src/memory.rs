//! In-memory reference implementation of the assignment store.
//!
//! Deterministic and test-friendly. Production deployments should use a
//! transactional backend for source-of-truth data; the version check
//! here maps directly onto a `WHERE version = $expected` compare-and-set.

use crate::traits::{AssignmentStore, QueryWindow};
use crate::{StoreError, StoreResult};
use assignment_types::{Assignment, AssignmentId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory assignment store adapter.
#[derive(Default)]
pub struct InMemoryAssignmentStore {
    assignments: RwLock<HashMap<AssignmentId, Assignment>>,
}

impl InMemoryAssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssignmentStore for InMemoryAssignmentStore {
    async fn insert(&self, assignment: Assignment) -> StoreResult<()> {
        let mut guard = self
            .assignments
            .write()
            .map_err(|_| StoreError::Backend("assignments lock poisoned".to_string()))?;

        if guard.contains_key(&assignment.id) {
            return Err(StoreError::AlreadyExists(assignment.id.clone()));
        }
        guard.insert(assignment.id.clone(), assignment);
        Ok(())
    }

    async fn get(&self, id: &AssignmentId) -> StoreResult<Option<Assignment>> {
        let guard = self
            .assignments
            .read()
            .map_err(|_| StoreError::Backend("assignments lock poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }

    async fn update(
        &self,
        mut assignment: Assignment,
        expected_version: u64,
    ) -> StoreResult<Assignment> {
        let mut guard = self
            .assignments
            .write()
            .map_err(|_| StoreError::Backend("assignments lock poisoned".to_string()))?;

        let current = guard
            .get(&assignment.id)
            .ok_or_else(|| StoreError::NotFound(assignment.id.clone()))?;

        if current.version != expected_version {
            return Err(StoreError::VersionConflict {
                id: assignment.id.clone(),
                expected: expected_version,
                found: current.version,
            });
        }

        assignment.version = expected_version + 1;
        guard.insert(assignment.id.clone(), assignment.clone());
        Ok(assignment)
    }

    async fn list(&self, window: QueryWindow) -> StoreResult<Vec<Assignment>> {
        let guard = self
            .assignments
            .read()
            .map_err(|_| StoreError::Backend("assignments lock poisoned".to_string()))?;
        let mut values = guard.values().cloned().collect::<Vec<_>>();
        values.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(apply_window(values, window))
    }

    async fn list_due_before(&self, cutoff: DateTime<Utc>) -> StoreResult<Vec<Assignment>> {
        let guard = self
            .assignments
            .read()
            .map_err(|_| StoreError::Backend("assignments lock poisoned".to_string()))?;
        Ok(guard
            .values()
            .filter(|a| a.due_date.map(|due| due < cutoff).unwrap_or(false))
            .cloned()
            .collect())
    }
}

fn apply_window(values: Vec<Assignment>, window: QueryWindow) -> Vec<Assignment> {
    let iter = values.into_iter().skip(window.offset);
    if window.limit == 0 {
        iter.collect()
    } else {
        iter.take(window.limit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assignment_types::UserId;
    use chrono::Duration;

    fn make_assignment(title: &str) -> Assignment {
        Assignment::new(title, "", UserId::new("assignee"), UserId::new("assigner"))
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = InMemoryAssignmentStore::new();
        let a = make_assignment("count stock");
        let id = a.id.clone();

        store.insert(a).await.unwrap();
        let loaded = store.get(&id).await.unwrap().unwrap();
        assert_eq!(loaded.title, "count stock");
        assert_eq!(loaded.version, 1);

        assert!(store
            .get(&AssignmentId::new("missing"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let store = InMemoryAssignmentStore::new();
        let a = make_assignment("one");
        store.insert(a.clone()).await.unwrap();
        assert!(matches!(
            store.insert(a).await,
            Err(StoreError::AlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_update_bumps_version() {
        let store = InMemoryAssignmentStore::new();
        let mut a = make_assignment("one");
        store.insert(a.clone()).await.unwrap();

        a.title = "one (renamed)".into();
        let stored = store.update(a, 1).await.unwrap();
        assert_eq!(stored.version, 2);
        assert_eq!(stored.title, "one (renamed)");
    }

    #[tokio::test]
    async fn test_stale_update_conflicts() {
        let store = InMemoryAssignmentStore::new();
        let a = make_assignment("one");
        store.insert(a.clone()).await.unwrap();

        store.update(a.clone(), 1).await.unwrap();
        let result = store.update(a, 1).await;
        assert!(matches!(
            result,
            Err(StoreError::VersionConflict {
                expected: 1,
                found: 2,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_list_due_before() {
        let store = InMemoryAssignmentStore::new();
        let now = Utc::now();

        let overdue = make_assignment("late").with_due_date(now - Duration::days(1));
        let on_time = make_assignment("fine").with_due_date(now + Duration::days(1));
        let undated = make_assignment("open-ended");
        store.insert(overdue.clone()).await.unwrap();
        store.insert(on_time).await.unwrap();
        store.insert(undated).await.unwrap();

        let due = store.list_due_before(now).await.unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, overdue.id);
    }

    #[tokio::test]
    async fn test_list_window() {
        let store = InMemoryAssignmentStore::new();
        for i in 0..5 {
            store
                .insert(make_assignment(&format!("a{}", i)))
                .await
                .unwrap();
        }

        assert_eq!(store.list(QueryWindow::default()).await.unwrap().len(), 5);
        let page = store
            .list(QueryWindow {
                limit: 2,
                offset: 4,
            })
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
    }
}

//! In-memory RAID backend
//!
//! Used by the CLI and by scenario tests. Items are keyed by id; ids are
//! `raid-1`, `raid-2`, ... in creation order, per instance.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use raidchat_core::{NewRaidItem, RaidItem, RaidItemUpdate};

use crate::api::{ApiError, ApiResponse, RaidApi};

#[derive(Debug, Default)]
pub struct InMemoryRaidApi {
    items: RwLock<BTreeMap<String, RaidItem>>,
    next_id: AtomicU64,
}

impl InMemoryRaidApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items across all projects
    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn allocate_id(&self) -> String {
        format!("raid-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

fn poisoned<E>(_: E) -> ApiError {
    ApiError::Unavailable("item store lock poisoned".to_string())
}

fn blank(project_key: &str) -> bool {
    project_key.trim().is_empty()
}

#[async_trait]
impl RaidApi for InMemoryRaidApi {
    async fn create_raid_item(
        &self,
        project_key: &str,
        payload: NewRaidItem,
    ) -> Result<ApiResponse<RaidItem>, ApiError> {
        if blank(project_key) {
            return Ok(ApiResponse::err("Project key is required"));
        }

        let now = Utc::now();
        let item = RaidItem {
            id: self.allocate_id(),
            project_key: project_key.to_string(),
            raid_type: payload.raid_type,
            title: payload.title,
            description: payload.description,
            status: payload.status,
            priority: payload.priority,
            owner: payload.owner,
            created_at: now,
            updated_at: now,
        };

        let mut items = self.items.write().map_err(poisoned)?;
        items.insert(item.id.clone(), item.clone());
        Ok(ApiResponse::ok(item))
    }

    async fn update_raid_item(
        &self,
        project_key: &str,
        raid_id: &str,
        updates: RaidItemUpdate,
    ) -> Result<ApiResponse<RaidItem>, ApiError> {
        if blank(project_key) {
            return Ok(ApiResponse::err("Project key is required"));
        }

        let mut items = self.items.write().map_err(poisoned)?;
        let item = match items.get_mut(raid_id) {
            Some(item) if item.project_key == project_key => item,
            // Items of other projects are indistinguishable from missing ones.
            _ => {
                return Ok(ApiResponse::err(format!(
                    "RAID item {} not found in project {}",
                    raid_id, project_key
                )))
            }
        };

        if let Some(title) = updates.title {
            item.title = title;
        }
        if let Some(description) = updates.description {
            item.description = description;
        }
        if let Some(status) = updates.status {
            item.status = status;
        }
        if let Some(priority) = updates.priority {
            item.priority = priority;
        }
        if let Some(owner) = updates.owner {
            item.owner = Some(owner);
        }
        item.updated_at = Utc::now();

        Ok(ApiResponse::ok(item.clone()))
    }

    async fn list_raid_items(
        &self,
        project_key: &str,
    ) -> Result<ApiResponse<Vec<RaidItem>>, ApiError> {
        if blank(project_key) {
            return Ok(ApiResponse::err("Project key is required"));
        }

        let items = self.items.read().map_err(poisoned)?;
        let listed = items
            .values()
            .filter(|item| item.project_key == project_key)
            .cloned()
            .collect();
        Ok(ApiResponse::ok(listed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raidchat_core::{RaidPriority, RaidStatus, RaidType};

    fn payload(title: &str) -> NewRaidItem {
        NewRaidItem {
            raid_type: RaidType::Risk,
            title: title.to_string(),
            description: "D".to_string(),
            status: RaidStatus::Open,
            priority: RaidPriority::Medium,
            owner: None,
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential_per_instance() {
        let api = InMemoryRaidApi::new();
        let first = api.create_raid_item("PRJ", payload("A")).await.unwrap();
        let second = api.create_raid_item("PRJ", payload("B")).await.unwrap();

        assert_eq!(first.data.unwrap().id, "raid-1");
        assert_eq!(second.data.unwrap().id, "raid-2");

        let other = InMemoryRaidApi::new();
        let fresh = other.create_raid_item("PRJ", payload("C")).await.unwrap();
        assert_eq!(fresh.data.unwrap().id, "raid-1");
    }

    #[tokio::test]
    async fn test_update_applies_only_given_fields() {
        let api = InMemoryRaidApi::new();
        api.create_raid_item("PRJ", payload("A")).await.unwrap();

        let updates = RaidItemUpdate {
            status: Some(RaidStatus::Resolved),
            ..RaidItemUpdate::default()
        };
        let resp = api.update_raid_item("PRJ", "raid-1", updates).await.unwrap();

        let item = resp.data.unwrap();
        assert_eq!(item.status, RaidStatus::Resolved);
        assert_eq!(item.title, "A");
        assert!(item.updated_at >= item.created_at);
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_or_foreign_ids() {
        let api = InMemoryRaidApi::new();
        api.create_raid_item("PRJ", payload("A")).await.unwrap();

        let missing = api
            .update_raid_item("PRJ", "raid-9", RaidItemUpdate::default())
            .await
            .unwrap();
        assert!(!missing.success);

        let foreign = api
            .update_raid_item("OTHER", "raid-1", RaidItemUpdate::default())
            .await
            .unwrap();
        assert!(!foreign.success);
        assert!(foreign.error.unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn test_list_is_scoped_by_project() {
        let api = InMemoryRaidApi::new();
        api.create_raid_item("PRJ", payload("A")).await.unwrap();
        api.create_raid_item("OTHER", payload("B")).await.unwrap();

        let listed = api.list_raid_items("PRJ").await.unwrap().data.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "A");
        assert_eq!(api.len(), 2);
    }

    #[test]
    fn test_blank_project_key_is_rejected() {
        let api = InMemoryRaidApi::new();
        let resp = tokio_test::block_on(api.create_raid_item("  ", payload("A"))).unwrap();
        assert!(!resp.success);
        assert!(api.is_empty());
    }
}

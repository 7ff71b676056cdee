use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::error::ItemResult;
use crate::models::{CreateItem, Item, UpdateItem};

/// Data access for items.
///
/// Absence is reported as `Ok(None)`; deciding which error that becomes is
/// left to the service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Every item, ordered by id
    async fn list(&self) -> ItemResult<Vec<Item>>;

    /// Insert a new row and return it with its assigned id
    async fn create(&self, input: CreateItem) -> ItemResult<Item>;

    async fn get_by_id(&self, id: i32) -> ItemResult<Option<Item>>;

    /// Replace name and value of `id`, returning the row as stored
    async fn update(&self, id: i32, input: UpdateItem) -> ItemResult<Option<Item>>;

    /// Remove `id`, returning its last values
    async fn delete(&self, id: i32) -> ItemResult<Option<Item>>;
}

#[derive(Debug)]
struct InMemoryState {
    items: BTreeMap<i32, Item>,
    next_id: i32,
}

/// Process-local store for development and tests.
///
/// Ids start at 1 and are never handed out twice, even after a delete.
#[derive(Debug)]
pub struct InMemoryItemRepository {
    state: RwLock<InMemoryState>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(InMemoryState {
                items: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn list(&self) -> ItemResult<Vec<Item>> {
        let state = self.state.read().await;
        Ok(state.items.values().cloned().collect())
    }

    async fn create(&self, input: CreateItem) -> ItemResult<Item> {
        let mut state = self.state.write().await;

        let id = state.next_id;
        state.next_id += 1;

        let item = Item {
            id,
            name: input.name,
            value: input.value,
        };
        state.items.insert(id, item.clone());

        tracing::info!(item_id = id, "Created item");
        Ok(item)
    }

    async fn get_by_id(&self, id: i32) -> ItemResult<Option<Item>> {
        let state = self.state.read().await;
        Ok(state.items.get(&id).cloned())
    }

    async fn update(&self, id: i32, input: UpdateItem) -> ItemResult<Option<Item>> {
        let mut state = self.state.write().await;

        let Some(item) = state.items.get_mut(&id) else {
            return Ok(None);
        };
        item.name = input.name;
        item.value = input.value;

        tracing::info!(item_id = id, "Updated item");
        Ok(Some(item.clone()))
    }

    async fn delete(&self, id: i32) -> ItemResult<Option<Item>> {
        let mut state = self.state.write().await;
        let removed = state.items.remove(&id);

        if removed.is_some() {
            tracing::info!(item_id = id, "Deleted item");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(name: &str, value: i32) -> CreateItem {
        CreateItem {
            name: name.to_string(),
            value,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_item() {
        let repo = InMemoryItemRepository::new();

        let item = repo.create(create_input("widget", 10)).await.unwrap();
        assert_eq!(item.id, 1);

        let fetched = repo.get_by_id(item.id).await.unwrap();
        assert_eq!(fetched, Some(item));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryItemRepository::new();

        let first = repo.create(create_input("a", 1)).await.unwrap();
        repo.delete(first.id).await.unwrap();
        let second = repo.create(create_input("b", 2)).await.unwrap();

        assert_eq!(second.id, first.id + 1);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = InMemoryItemRepository::new();
        for (name, value) in [("c", 3), ("a", 1), ("b", 2)] {
            repo.create(create_input(name, value)).await.unwrap();
        }

        let ids: Vec<i32> = repo.list().await.unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[tokio::test]
    async fn test_update_keeps_id() {
        let repo = InMemoryItemRepository::new();
        let item = repo.create(create_input("widget", 10)).await.unwrap();

        let updated = repo
            .update(
                item.id,
                UpdateItem {
                    name: "widget2".to_string(),
                    value: 20,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, item.id);
        assert_eq!(updated.name, "widget2");
        assert_eq!(updated.value, 20);
    }

    #[tokio::test]
    async fn test_missing_ids_are_none() {
        let repo = InMemoryItemRepository::new();
        let update = UpdateItem {
            name: "x".to_string(),
            value: 1,
        };

        assert!(repo.get_by_id(42).await.unwrap().is_none());
        assert!(repo.update(42, update).await.unwrap().is_none());
        assert!(repo.delete(42).await.unwrap().is_none());
    }
}

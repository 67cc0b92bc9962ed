//! Catalog storage.

use async_trait::async_trait;
use parking_lot::RwLock;
use pricewise_common::{BusinessCode, ItemId};

use crate::error::{CatalogError, CatalogResult};
use crate::item::CatalogItem;
use crate::page::{Page, PageRequest};

/// Storage contract for catalog items.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Whether an item with `code` is already stored.
    async fn exists_by_code(&self, code: &BusinessCode) -> CatalogResult<bool>;

    /// Persist a new item and return it as stored.
    async fn insert(&self, item: CatalogItem) -> CatalogResult<CatalogItem>;

    /// Look up an item by id.
    async fn find_by_id(&self, id: ItemId) -> CatalogResult<Option<CatalogItem>>;

    /// One page of items in storage order.
    async fn find_page(&self, request: PageRequest) -> CatalogResult<Page<CatalogItem>>;

    /// Number of stored items.
    async fn count(&self) -> CatalogResult<usize>;
}

/// In-process repository keeping items in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryCatalogRepository {
    items: RwLock<Vec<CatalogItem>>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn exists_by_code(&self, code: &BusinessCode) -> CatalogResult<bool> {
        Ok(self.items.read().iter().any(|item| &item.code == code))
    }

    async fn insert(&self, item: CatalogItem) -> CatalogResult<CatalogItem> {
        let mut items = self.items.write();

        // Unique constraint on code
        if items.iter().any(|existing| existing.code == item.code) {
            return Err(CatalogError::DuplicateCode(item.code));
        }

        items.push(item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: ItemId) -> CatalogResult<Option<CatalogItem>> {
        Ok(self.items.read().iter().find(|item| item.id == id).cloned())
    }

    async fn find_page(&self, request: PageRequest) -> CatalogResult<Page<CatalogItem>> {
        let items = self.items.read();
        let slice = items
            .iter()
            .skip(request.offset())
            .take(request.size)
            .cloned()
            .collect();

        Ok(Page::new(slice, request, items.len()))
    }

    async fn count(&self) -> CatalogResult<usize> {
        Ok(self.items.read().len())
    }
}

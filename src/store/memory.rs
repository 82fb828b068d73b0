use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tokio::sync::{Mutex, RwLock};

use super::{CatalogStore, CategoryStore, ProductFilter, ProductOrder, SessionStore, StoreResult};
use crate::{
    models::{Category, CategoryId, Product, ProductId},
    session::SessionId,
};

#[derive(Default)]
struct CatalogData {
    categories: Vec<Category>,
    products: Vec<Product>,
    next_category_id: CategoryId,
    next_product_id: ProductId,
}

/// Process-local catalog holding both categories and products.
///
/// Deleting a category cascades to its descendants and their products, like
/// the foreign keys in the relational schema.
#[derive(Default)]
pub struct MemoryCatalog {
    data: RwLock<CatalogData>,
}

/// Fields of a product to be inserted into a [`MemoryCatalog`].
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub category_id: CategoryId,
    pub is_discounted: bool,
    pub is_latest: bool,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: Decimal, category_id: CategoryId) -> Self {
        Self {
            name: name.into(),
            price,
            category_id,
            is_discounted: false,
            is_latest: false,
        }
    }

    pub fn discounted(mut self) -> Self {
        self.is_discounted = true;
        self
    }

    pub fn latest(mut self) -> Self {
        self.is_latest = true;
        self
    }
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_category(&self, name: &str, parent_id: Option<CategoryId>) -> Category {
        let mut data = self.data.write().await;
        data.next_category_id += 1;
        let now = Utc::now();
        let category = Category {
            id: data.next_category_id,
            name: name.to_string(),
            parent_id,
            created_at: now,
            updated_at: now,
        };
        data.categories.push(category.clone());
        category
    }

    /// Re-points `id` at `parent_id` without any acyclicity check.
    pub async fn set_parent(&self, id: CategoryId, parent_id: Option<CategoryId>) {
        let mut data = self.data.write().await;
        if let Some(category) = data.categories.iter_mut().find(|c| c.id == id) {
            category.parent_id = parent_id;
            category.updated_at = Utc::now();
        }
    }

    pub async fn add_product(&self, new: NewProduct) -> Product {
        let mut data = self.data.write().await;
        data.next_product_id += 1;
        let now = Utc::now();
        let product = Product {
            id: data.next_product_id,
            name: new.name,
            price: new.price,
            category_id: new.category_id,
            image: None,
            description: String::new(),
            is_discounted: new.is_discounted,
            is_latest: new.is_latest,
            created_at: now,
            updated_at: now,
        };
        data.products.push(product.clone());
        product
    }

    pub async fn delete_product(&self, id: ProductId) -> bool {
        let mut data = self.data.write().await;
        let before = data.products.len();
        data.products.retain(|p| p.id != id);
        data.products.len() != before
    }

    pub async fn delete_category(&self, id: CategoryId) -> bool {
        let mut data = self.data.write().await;
        if !data.categories.iter().any(|c| c.id == id) {
            return false;
        }

        let mut doomed = HashSet::from([id]);
        let mut frontier = vec![id];
        while let Some(parent) = frontier.pop() {
            for child in data.categories.iter().filter(|c| c.parent_id == Some(parent)) {
                if doomed.insert(child.id) {
                    frontier.push(child.id);
                }
            }
        }

        data.categories.retain(|c| !doomed.contains(&c.id));
        data.products.retain(|p| !doomed.contains(&p.category_id));
        true
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn product(&self, id: ProductId) -> StoreResult<Option<Product>> {
        let data = self.data.read().await;
        Ok(data.products.iter().find(|p| p.id == id).cloned())
    }

    async fn products(&self, filter: ProductFilter) -> StoreResult<Vec<Product>> {
        let data = self.data.read().await;
        let mut products: Vec<Product> = data
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        match filter.order {
            ProductOrder::Newest => {
                products.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)))
            }
            ProductOrder::IdDesc => products.sort_by(|a, b| b.id.cmp(&a.id)),
        }
        if let Some(limit) = filter.limit {
            products.truncate(limit as usize);
        }
        Ok(products)
    }

    async fn search_by_name(&self, needle: &str) -> StoreResult<Vec<Product>> {
        let needle = needle.to_lowercase();
        let mut products = self.products(ProductFilter::default()).await?;
        products.retain(|p| p.name.to_lowercase().contains(&needle));
        Ok(products)
    }
}

#[async_trait]
impl CategoryStore for MemoryCatalog {
    async fn category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        let data = self.data.read().await;
        Ok(data.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn category_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        let data = self.data.read().await;
        Ok(data.categories.iter().find(|c| c.name == name).cloned())
    }

    async fn children_of(&self, id: CategoryId) -> StoreResult<Vec<Category>> {
        let data = self.data.read().await;
        let mut children: Vec<Category> = data
            .categories
            .iter()
            .filter(|c| c.parent_id == Some(id))
            .cloned()
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    async fn all(&self) -> StoreResult<Vec<Category>> {
        let data = self.data.read().await;
        let mut categories = data.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

/// Process-local session storage.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<SessionId, StoredSession>>,
}

struct StoredSession {
    values: Map<String, Value>,
    updated_at: DateTime<Utc>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions currently held.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, session: SessionId, key: &str) -> StoreResult<Option<Value>> {
        let sessions = self.sessions.lock().await;
        Ok(sessions
            .get(&session)
            .and_then(|stored| stored.values.get(key))
            .cloned())
    }

    async fn save(&self, session: SessionId, key: &str, value: Value) -> StoreResult<()> {
        let mut sessions = self.sessions.lock().await;
        let stored = sessions.entry(session).or_insert_with(|| StoredSession {
            values: Map::new(),
            updated_at: Utc::now(),
        });
        stored.values.insert(key.to_string(), value);
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> StoreResult<u64> {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, stored| stored.updated_at >= cutoff);
        Ok((before - sessions.len()) as u64)
    }
}

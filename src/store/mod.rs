//! Storage seams used by the services.
//!
//! Every backend implements the same async traits, so services only ever see
//! `Arc<dyn …Store>`. [`orm`] talks to Postgres through sea-orm, [`memory`]
//! keeps everything in process and backs the test-suite and the
//! `SESSION_BACKEND=memory` mode.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::{
    models::{Category, CategoryId, Product, ProductId},
    session::SessionId,
};

pub mod memory;
pub mod orm;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("ORM error: {0}")]
    Orm(#[from] sea_orm::DbErr),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductOrder {
    /// Newest `created_at` first.
    #[default]
    Newest,
    /// Highest id first.
    IdDesc,
}

/// Selection criteria for [`CatalogStore::products`]. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub is_discounted: Option<bool>,
    pub is_latest: Option<bool>,
    pub category_ids: Option<Vec<CategoryId>>,
    pub product_ids: Option<Vec<ProductId>>,
    pub order: ProductOrder,
    pub limit: Option<u64>,
}

impl ProductFilter {
    pub fn discounted() -> Self {
        Self {
            is_discounted: Some(true),
            ..Self::default()
        }
    }

    pub fn latest() -> Self {
        Self {
            is_latest: Some(true),
            ..Self::default()
        }
    }

    pub fn in_categories(ids: Vec<CategoryId>) -> Self {
        Self {
            category_ids: Some(ids),
            ..Self::default()
        }
    }

    pub fn with_ids(ids: Vec<ProductId>) -> Self {
        Self {
            product_ids: Some(ids),
            ..Self::default()
        }
    }

    pub fn order_by(mut self, order: ProductOrder) -> Self {
        self.order = order;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.is_discounted.is_none_or(|flag| product.is_discounted == flag)
            && self.is_latest.is_none_or(|flag| product.is_latest == flag)
            && self
                .category_ids
                .as_ref()
                .is_none_or(|ids| ids.contains(&product.category_id))
            && self
                .product_ids
                .as_ref()
                .is_none_or(|ids| ids.contains(&product.id))
    }
}

#[async_trait]
pub trait CatalogStore: Send + Sync + 'static {
    async fn product(&self, id: ProductId) -> StoreResult<Option<Product>>;

    async fn products(&self, filter: ProductFilter) -> StoreResult<Vec<Product>>;

    /// Case-insensitive substring match on the product name.
    async fn search_by_name(&self, needle: &str) -> StoreResult<Vec<Product>>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync + 'static {
    async fn category(&self, id: CategoryId) -> StoreResult<Option<Category>>;

    async fn category_by_name(&self, name: &str) -> StoreResult<Option<Category>>;

    async fn children_of(&self, id: CategoryId) -> StoreResult<Vec<Category>>;

    async fn all(&self) -> StoreResult<Vec<Category>>;
}

/// Request-scoped key/value persistence keyed by client session.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    async fn load(&self, session: SessionId, key: &str) -> StoreResult<Option<Value>>;

    async fn save(&self, session: SessionId, key: &str, value: Value) -> StoreResult<()>;

    /// Deletes every session last written before `cutoff`, returning how many went.
    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> StoreResult<u64>;
}

#![allow(dead_code)]

use std::sync::Arc;

use axum_storefront::{
    models::{Category, Product},
    state::AppState,
    store::memory::{MemoryCatalog, MemorySessionStore, NewProduct},
};
use rust_decimal::Decimal;

pub fn price(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// A catalog shaped like the seeded store:
///
/// ```text
/// Footwear ─┬─ Men's Footwear ─┬─ Casual
///           │                  └─ Formal
///           └─ Women's Footwear ── Heels
/// Jewellery ── Payal
/// Clothes
/// ```
pub struct Fixture {
    pub catalog: Arc<MemoryCatalog>,
    pub sessions: Arc<MemorySessionStore>,
    pub state: AppState,
    pub footwear: Category,
    pub mens: Category,
    pub casual: Category,
    pub formal: Category,
    pub womens: Category,
    pub heels: Category,
    pub jewellery: Category,
    pub payal: Category,
    pub clothes: Category,
}

impl Fixture {
    pub async fn new() -> Self {
        let catalog = Arc::new(MemoryCatalog::new());
        let footwear = catalog.add_category("Footwear", None).await;
        let mens = catalog.add_category("Men's Footwear", Some(footwear.id)).await;
        let casual = catalog.add_category("Casual", Some(mens.id)).await;
        let formal = catalog.add_category("Formal", Some(mens.id)).await;
        let womens = catalog.add_category("Women's Footwear", Some(footwear.id)).await;
        let heels = catalog.add_category("Heels", Some(womens.id)).await;
        let jewellery = catalog.add_category("Jewellery", None).await;
        let payal = catalog.add_category("Payal", Some(jewellery.id)).await;
        let clothes = catalog.add_category("Clothes", None).await;

        let sessions = Arc::new(MemorySessionStore::new());
        let state = AppState::new(catalog.clone(), catalog.clone(), sessions.clone());
        Self {
            catalog,
            sessions,
            state,
            footwear,
            mens,
            casual,
            formal,
            womens,
            heels,
            jewellery,
            payal,
            clothes,
        }
    }

    pub async fn product(&self, name: &str, cents: i64, category: &Category) -> Product {
        self.catalog
            .add_product(NewProduct::new(name, price(cents), category.id))
            .await
    }
}

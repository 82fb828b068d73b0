//! The session cart: product id to quantity.

use std::{collections::BTreeMap, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::ProductId;

/// Session key the cart is stored under.
pub const CART_SESSION_KEY: &str = "cart";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CartAction {
    Increase,
    Decrease,
}

impl FromStr for CartAction {
    type Err = CartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "increase" => Ok(Self::Increase),
            "decrease" => Ok(Self::Decrease),
            other => Err(CartError::UnknownAction(other.to_string())),
        }
    }
}

impl CartAction {
    pub fn confirmation(self) -> &'static str {
        match self {
            Self::Increase => "Quantity increased!",
            Self::Decrease => "Quantity decreased!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Product not in cart")]
    NotInCart,

    #[error("Invalid action or quantity")]
    UnknownAction(String),

    #[error("Invalid action or quantity")]
    QuantityUnderflow,

    #[error("Invalid action or quantity")]
    QuantityOverflow,
}

/// Quantities keyed by product id. Every stored quantity is at least 1.
///
/// Serializes as a JSON object whose keys are the product ids as strings.
/// Entries that do not read back as an id and a positive quantity are
/// dropped on deserialization; the rest of the cart survives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    entries: BTreeMap<ProductId, u32>,
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let mut entries = BTreeMap::new();
        for (key, value) in raw {
            let id = key.parse::<ProductId>().ok();
            let quantity = value
                .as_u64()
                .and_then(|quantity| u32::try_from(quantity).ok())
                .filter(|&quantity| quantity > 0);
            match (id, quantity) {
                (Some(id), Some(quantity)) => {
                    entries.insert(id, quantity);
                }
                _ => tracing::warn!(key = %key, value = %value, "dropping malformed cart entry"),
            }
        }
        Ok(Self { entries })
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product_id`, returning the new quantity.
    pub fn add(&mut self, product_id: ProductId) -> Result<u32, CartError> {
        let quantity = match self.entries.get(&product_id) {
            Some(&current) => current.checked_add(1).ok_or(CartError::QuantityOverflow)?,
            None => 1,
        };
        self.entries.insert(product_id, quantity);
        Ok(quantity)
    }

    /// Drops the entry for `product_id`. Returns whether it was present.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        self.entries.remove(&product_id).is_some()
    }

    /// Applies a raw `action` string from a request to an existing entry,
    /// returning the parsed action and the new quantity.
    pub fn update(
        &mut self,
        product_id: ProductId,
        action: &str,
    ) -> Result<(CartAction, u32), CartError> {
        if !self.contains(product_id) {
            return Err(CartError::NotInCart);
        }
        let action = action.parse::<CartAction>()?;
        let quantity = self.apply(product_id, action)?;
        Ok((action, quantity))
    }

    /// Applies `action` to an existing entry. The cart is untouched on error.
    pub fn apply(&mut self, product_id: ProductId, action: CartAction) -> Result<u32, CartError> {
        let quantity = self
            .entries
            .get_mut(&product_id)
            .ok_or(CartError::NotInCart)?;
        match action {
            CartAction::Increase => {
                *quantity = quantity.checked_add(1).ok_or(CartError::QuantityOverflow)?
            }
            CartAction::Decrease if *quantity > 1 => *quantity -= 1,
            CartAction::Decrease => return Err(CartError::QuantityUnderflow),
        }
        Ok(*quantity)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.entries.contains_key(&product_id)
    }

    pub fn quantity(&self, product_id: ProductId) -> Option<u32> {
        self.entries.get(&product_id).copied()
    }

    /// Total number of items, not lines.
    pub fn count(&self) -> u64 {
        self.entries.values().map(|&q| u64::from(q)).sum()
    }

    pub fn product_ids(&self) -> Vec<ProductId> {
        self.entries.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProductId, u32)> + '_ {
        self.entries.iter().map(|(&id, &quantity)| (id, quantity))
    }

    /// Keeps only entries for which `keep` returns true, returning the removed ids.
    pub fn retain_products(&mut self, mut keep: impl FnMut(ProductId) -> bool) -> Vec<ProductId> {
        let mut removed = Vec::new();
        self.entries.retain(|&id, _| {
            let kept = keep(id);
            if !kept {
                removed.push(id);
            }
            kept
        });
        removed
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

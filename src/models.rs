use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub type CategoryId = i64;
pub type ProductId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub parent_id: Option<CategoryId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    pub category_id: CategoryId,
    pub image: Option<String>,
    pub description: String,
    pub is_discounted: bool,
    pub is_latest: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Price formatted for display, e.g. `$19.99`.
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_price_always_has_two_fraction_digits() {
        let now = Utc::now();
        let mut product = Product {
            id: 1,
            name: "Loafers".into(),
            price: Decimal::new(45, 0),
            category_id: 1,
            image: None,
            description: String::new(),
            is_discounted: false,
            is_latest: false,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(product.display_price(), "$45.00");

        product.price = Decimal::new(1999, 2);
        assert_eq!(product.display_price(), "$19.99");
    }
}

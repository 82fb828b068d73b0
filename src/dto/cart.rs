use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::pricing::{CartLine, CartTotals};

/// Form body of `POST /api/cart/update/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CartUpdateForm {
    /// `increase` or `decrease`.
    pub action: Option<String>,
}

/// View-model of the cart page.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartPage {
    pub cart_items: Vec<CartLine>,
    #[schema(value_type = String, example = "25.00")]
    pub total_price: Decimal,
    #[schema(value_type = String, example = "2.50")]
    pub tax: Decimal,
    #[schema(value_type = String, example = "27.50")]
    pub grand_total: Decimal,
    pub cart_count: u64,
    pub messages: Vec<String>,
}

impl CartPage {
    pub fn new(cart_items: Vec<CartLine>, messages: Vec<String>) -> Self {
        let totals = CartTotals::from_lines(&cart_items);
        Self {
            cart_items,
            total_price: totals.total_price,
            tax: totals.tax,
            grand_total: totals.grand_total,
            cart_count: totals.cart_count,
            messages,
        }
    }
}

/// Structured result of an add or remove.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartActionResult {
    pub success: bool,
    pub message: String,
    pub cart_count: u64,
}

/// Structured result of a quantity update. Only `success` and `message` are
/// present on failure.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartUpdateResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "20.00")]
    pub new_subtotal: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "25.00")]
    pub total_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "2.50")]
    pub tax: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "27.50")]
    pub grand_total: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_count: Option<u64>,
}

impl CartUpdateResult {
    pub fn updated(message: impl Into<String>, line: &CartLine, totals: CartTotals) -> Self {
        Self {
            success: true,
            message: message.into(),
            new_quantity: Some(line.quantity),
            new_subtotal: Some(line.subtotal),
            total_price: Some(totals.total_price),
            tax: Some(totals.tax),
            grand_total: Some(totals.grand_total),
            cart_count: Some(totals.cart_count),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            new_quantity: None,
            new_subtotal: None,
            total_price: None,
            tax: None,
            grand_total: None,
            cart_count: None,
        }
    }
}

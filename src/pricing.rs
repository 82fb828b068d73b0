//! Cart totals. All arithmetic is exact decimal.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Product;

/// Flat sales tax applied to the cart total (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Fraction digits kept for every monetary amount.
pub const MONEY_SCALE: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
    #[schema(value_type = String, example = "20.00")]
    pub subtotal: Decimal,
}

impl CartLine {
    pub fn new(product: Product, quantity: u32) -> Self {
        let subtotal = line_subtotal(product.price, quantity);
        Self {
            product,
            quantity,
            subtotal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CartTotals {
    #[schema(value_type = String, example = "25.00")]
    pub total_price: Decimal,
    #[schema(value_type = String, example = "2.50")]
    pub tax: Decimal,
    #[schema(value_type = String, example = "27.50")]
    pub grand_total: Decimal,
    pub cart_count: u64,
}

impl CartTotals {
    pub fn from_lines(lines: &[CartLine]) -> Self {
        let total_price = money(lines.iter().map(|line| line.subtotal).sum());
        let tax = tax_on(total_price);
        Self {
            total_price,
            tax,
            grand_total: total_price + tax,
            cart_count: lines.iter().map(|line| u64::from(line.quantity)).sum(),
        }
    }
}

pub fn line_subtotal(unit_price: Decimal, quantity: u32) -> Decimal {
    money(unit_price * Decimal::from(quantity))
}

pub fn tax_on(total: Decimal) -> Decimal {
    money(total * TAX_RATE)
}

fn money(amount: Decimal) -> Decimal {
    let mut amount = amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(MONEY_SCALE);
    amount
}

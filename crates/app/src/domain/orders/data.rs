//! Order pricing.
//!
//! All amounts are integer cents.

use crate::domain::orders::models::OrderItem;

/// Orders strictly above this items total ship free.
pub const FREE_SHIPPING_THRESHOLD: u64 = 50_00;

/// Flat shipping price below the free-shipping threshold.
pub const FLAT_SHIPPING_PRICE: u64 = 10_00;

/// Sales tax applied to the items total.
pub const TAX_RATE_PERCENT: u64 = 10;

/// Computed price breakdown for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub items_total: u64,
    pub shipping_price: u64,
    pub tax_price: u64,
    pub total_amount: u64,
}

/// Sum of `unit_price * quantity` over the given line items.
#[must_use]
pub fn line_items_total(items: &[OrderItem]) -> u64 {
    items
        .iter()
        .map(|item| item.unit_price * item.quantity)
        .sum()
}

/// Price an order from its items total.
#[must_use]
pub fn order_totals(items_total: u64) -> OrderTotals {
    let shipping_price = if items_total > FREE_SHIPPING_THRESHOLD {
        0
    } else {
        FLAT_SHIPPING_PRICE
    };

    let tax_price = items_total * TAX_RATE_PERCENT / 100;

    OrderTotals {
        items_total,
        shipping_price,
        tax_price,
        total_amount: items_total + shipping_price + tax_price,
    }
}

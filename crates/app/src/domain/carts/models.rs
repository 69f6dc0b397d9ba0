//! Cart Models

use jiff::Timestamp;
use uuid::Uuid;

/// Cart Model
///
/// One cart exists per user at most; a user who has never added an item
/// reads as an empty cart.
#[derive(Debug, Clone)]
pub struct Cart {
    pub user_uuid: Uuid,
    pub total_amount: u64,
    pub items: Vec<CartItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Cart {
    /// An empty cart for a user with no stored cart row.
    #[must_use]
    pub fn empty(user_uuid: Uuid) -> Self {
        let now = Timestamp::now();

        Self {
            user_uuid,
            total_amount: 0,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// CartItem Model
#[derive(Debug, Clone)]
pub struct CartItem {
    pub uuid: Uuid,
    pub product_uuid: Uuid,

    /// Product title at read time, joined from the catalog.
    pub title: String,

    pub quantity: u64,

    /// Unit price captured when the item was (last) added. Display
    /// only; order placement re-reads live catalog prices.
    pub price: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Cart Item Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_uuid: Uuid,
    pub quantity: u64,
}

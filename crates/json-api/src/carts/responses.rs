//! Cart response bodies.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::models::{Cart, CartItem};

/// Cart Response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    pub items: Vec<CartItemResponse>,

    /// Cached cart total in cents
    pub total_amount: u64,

    pub created_at: String,
    pub updated_at: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            total_amount: cart.total_amount,
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub title: String,
    pub quantity: u64,

    /// Unit price captured when the item was added, in cents
    pub price: u64,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            uuid: item.uuid,
            product_uuid: item.product_uuid,
            title: item.title,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

//! Product response bodies.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::models::Product;

/// Product Response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub title: String,

    /// Unit price in cents
    pub price: u64,

    pub stock: u64,
    pub is_active: bool,
    pub seller_uuid: Uuid,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            uuid: product.uuid,
            title: product.title,
            price: product.price,
            stock: product.stock,
            is_active: product.is_active,
            seller_uuid: product.seller_uuid,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

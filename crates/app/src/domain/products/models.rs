//! Product Models

use jiff::Timestamp;
use uuid::Uuid;

/// Product Model
#[derive(Debug, Clone)]
pub struct Product {
    pub uuid: Uuid,
    pub title: String,
    pub price: u64,
    pub stock: u64,
    pub is_active: bool,
    pub seller_uuid: Uuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl Product {
    /// Whether the product can currently be purchased at all.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.is_active && self.deleted_at.is_none()
    }
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: Uuid,
    pub title: String,
    pub price: u64,
    pub stock: u64,

    /// Explicit seller, honored for admin callers only; sellers always
    /// create products under their own identity.
    pub seller_uuid: Option<Uuid>,
}

//! Authorization predicates.
//!
//! Each service operation evaluates one of these against the caller's
//! [`Identity`] before doing any work.

use uuid::Uuid;

use crate::auth::{Identity, Role};

/// Owner-or-admin check used for viewing and paying an order.
#[must_use]
pub fn owner_or_admin(identity: Identity, owner: Uuid) -> bool {
    identity.user == owner || identity.role == Role::Admin
}

/// Staff check used for fulfilment updates and the seller order view.
#[must_use]
pub fn seller_or_admin(identity: Identity) -> bool {
    matches!(identity.role, Role::Seller | Role::Admin)
}

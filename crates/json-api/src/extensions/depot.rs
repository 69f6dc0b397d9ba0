//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::Depot;

use storefront_app::auth::Identity;

use crate::responses::ApiError;

/// Helpers for pulling injected values out of the request depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    /// The caller identity placed in the depot by the auth middleware.
    fn identity_or_401(&self) -> Result<Identity, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>().map_err(|_ignored| ApiError::internal())
    }

    fn identity_or_401(&self) -> Result<Identity, ApiError> {
        self.obtain::<Identity>()
            .copied()
            .map_err(|_ignored| ApiError::unauthorized("Not authenticated"))
    }
}

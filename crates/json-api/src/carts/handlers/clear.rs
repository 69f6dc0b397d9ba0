//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::errors::into_api_error,
    extensions::*,
    responses::{ApiError, MessageResponse},
    state::State,
};

#[salvo::handler]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    state
        .app
        .carts
        .clear_cart(identity.user)
        .await
        .map_err(into_api_error)?;

    Ok(Json(MessageResponse::new("Cart cleared")))
}

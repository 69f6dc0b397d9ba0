//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_api_error, responses::CartResponse},
    extensions::*,
    responses::{ApiError, DataResponse},
    state::State,
};

#[salvo::handler]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<DataResponse<CartResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(identity.user)
        .await
        .map_err(into_api_error)?;

    Ok(Json(DataResponse::new(cart.into())))
}

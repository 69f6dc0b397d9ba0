//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::prelude::*;
use uuid::Uuid;

use crate::{
    carts::{errors::into_api_error, responses::CartResponse},
    extensions::*,
    responses::{ApiError, DataResponse},
    state::State,
};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<DataResponse<CartResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let product = req
        .param::<Uuid>("product")
        .ok_or_else(|| ApiError::bad_request("Invalid product id"))?;

    let cart = state
        .app
        .carts
        .remove_item(identity.user, product)
        .await
        .map_err(into_api_error)?;

    Ok(Json(DataResponse::new(cart.into())))
}

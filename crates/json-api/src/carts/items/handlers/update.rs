//! Update Cart Item Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{errors::into_api_error, responses::CartResponse},
    extensions::*,
    responses::{ApiError, DataResponse, FieldError},
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct UpdateCartItemRequest {
    #[serde(default)]
    pub quantity: u64,
}

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

    let body: UpdateCartItemRequest = req
        .parse_json()
        .await
        .map_err(|_parse_error| ApiError::bad_request("Invalid request body"))?;

    if body.quantity == 0 {
        return Err(ApiError::validation(vec![FieldError::new(
            "quantity",
            "Quantity must be at least 1",
        )]));
    }

    let cart = state
        .app
        .carts
        .update_item(identity.user, product, body.quantity)
        .await
        .map_err(into_api_error)?;

    Ok(Json(DataResponse::new(cart.into())))
}

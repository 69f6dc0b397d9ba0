//! Add Cart Item Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::models::NewCartItem;

use crate::{
    carts::{errors::into_api_error, responses::CartResponse},
    extensions::*,
    responses::{ApiError, DataResponse, FieldError},
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddCartItemRequest {
    #[serde(default)]
    pub product_uuid: Option<Uuid>,

    /// Defaults to a single unit when omitted.
    #[serde(default = "default_quantity")]
    pub quantity: u64,
}

fn default_quantity() -> u64 {
    1
}

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<DataResponse<CartResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let body: AddCartItemRequest = req
        .parse_json()
        .await
        .map_err(|_parse_error| ApiError::bad_request("Invalid request body"))?;

    let Some(product_uuid) = body.product_uuid else {
        return Err(ApiError::validation(vec![FieldError::new(
            "productUuid",
            "Product is required",
        )]));
    };

    if body.quantity == 0 {
        return Err(ApiError::validation(vec![FieldError::new(
            "quantity",
            "Quantity must be at least 1",
        )]));
    }

    let cart = state
        .app
        .carts
        .add_item(
            identity.user,
            NewCartItem {
                product_uuid,
                quantity: body.quantity,
            },
        )
        .await
        .map_err(into_api_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(DataResponse::new(cart.into())))
}

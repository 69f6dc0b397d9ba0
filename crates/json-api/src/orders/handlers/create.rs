//! Place Order Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};

use crate::{
    extensions::*,
    orders::{errors::into_api_error, requests::PlaceOrderRequest, responses::OrderResponse},
    responses::{ApiError, DataResponse},
    state::State,
};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<DataResponse<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let body: PlaceOrderRequest = req
        .parse_json()
        .await
        .map_err(|_parse_error| ApiError::bad_request("Invalid request body"))?;

    let new_order = body.validate().map_err(ApiError::validation)?;

    let order = state
        .app
        .orders
        .place_order(identity, new_order)
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(DataResponse::new(order.into())))
}

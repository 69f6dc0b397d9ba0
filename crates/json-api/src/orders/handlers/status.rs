//! Set Order Status Handler

use std::{str::FromStr, sync::Arc};

use salvo::prelude::*;
use uuid::Uuid;

use storefront_app::domain::orders::models::OrderStatus;

use crate::{
    extensions::*,
    orders::{errors::into_api_error, requests::SetStatusRequest, responses::OrderResponse},
    responses::{ApiError, DataResponse, FieldError},
    state::State,
};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<DataResponse<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let uuid = req
        .param::<Uuid>("uuid")
        .ok_or_else(|| ApiError::bad_request("Invalid order id"))?;

    let body: SetStatusRequest = req
        .parse_json()
        .await
        .map_err(|_parse_error| ApiError::bad_request("Invalid request body"))?;

    let status = OrderStatus::from_str(&body.status).map_err(|_invalid| {
        ApiError::validation(vec![FieldError::new("status", "Invalid order status")])
    })?;

    let order = state
        .app
        .orders
        .set_status(identity, uuid, status)
        .await
        .map_err(into_api_error)?;

    Ok(Json(DataResponse::new(order.into())))
}

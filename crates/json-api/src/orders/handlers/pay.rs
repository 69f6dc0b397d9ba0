//! Pay Order Handler

use std::sync::Arc;

use salvo::prelude::*;
use uuid::Uuid;

use storefront_app::domain::orders::models::PaymentConfirmation;

use crate::{
    extensions::*,
    orders::{errors::into_api_error, requests::PayOrderRequest, responses::OrderResponse},
    responses::{ApiError, DataResponse},
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

    // The body is optional; an absent or empty body means no payment id.
    let body: PayOrderRequest = req.parse_json().await.unwrap_or_default();

    let order = state
        .app
        .orders
        .mark_paid(
            identity,
            uuid,
            PaymentConfirmation {
                payment_id: body.payment_id,
            },
        )
        .await
        .map_err(into_api_error)?;

    Ok(Json(DataResponse::new(order.into())))
}

//! Get Order Handler

use std::sync::Arc;

use salvo::prelude::*;
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_api_error, responses::OrderResponse},
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

    let order = state
        .app
        .orders
        .get_order(identity, uuid)
        .await
        .map_err(into_api_error)?;

    Ok(Json(DataResponse::new(order.into())))
}

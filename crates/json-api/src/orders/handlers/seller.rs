//! Seller Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use storefront_app::domain::pagination::PageRequest;

use crate::{
    extensions::*,
    orders::{errors::into_api_error, responses::OrderResponse},
    responses::{ApiError, ListResponse},
    state::State,
};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ListResponse<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let page = PageRequest::new(req.query::<u32>("page"), req.query::<u32>("limit"));

    let orders = state
        .app
        .orders
        .list_seller_orders(identity, page)
        .await
        .map_err(into_api_error)?;

    Ok(Json(ListResponse::new(orders, OrderResponse::from)))
}

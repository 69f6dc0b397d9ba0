//! Get Product Handler

use std::sync::Arc;

use salvo::prelude::*;
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{errors::into_api_error, responses::ProductResponse},
    responses::{ApiError, DataResponse},
    state::State,
};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<DataResponse<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let uuid = req
        .param::<Uuid>("uuid")
        .ok_or_else(|| ApiError::bad_request("Invalid product id"))?;

    let product = state
        .app
        .products
        .get_product(uuid)
        .await
        .map_err(into_api_error)?;

    Ok(Json(DataResponse::new(product.into())))
}

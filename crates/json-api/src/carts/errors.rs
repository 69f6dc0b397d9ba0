//! Errors

use tracing::error;

use storefront_app::domain::carts::CartsServiceError;

use crate::responses::ApiError;

pub(crate) fn into_api_error(error: CartsServiceError) -> ApiError {
    match error {
        CartsServiceError::NotFound => ApiError::not_found("Cart item not found"),
        CartsServiceError::ProductUnavailable { title } => {
            ApiError::bad_request(format!("Product {title} is no longer available"))
        }
        CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => ApiError::bad_request("Invalid cart payload"),
        CartsServiceError::Sql(source) => {
            error!("carts storage error: {source}");

            ApiError::internal()
        }
    }
}

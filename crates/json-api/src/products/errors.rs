//! Errors

use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

use crate::responses::ApiError;

pub(crate) fn into_api_error(error: ProductsServiceError) -> ApiError {
    match error {
        ProductsServiceError::NotFound => ApiError::not_found("Product not found"),
        ProductsServiceError::AlreadyExists => ApiError::conflict("Product already exists"),
        ProductsServiceError::Forbidden => {
            ApiError::forbidden("Not authorized to manage products")
        }
        ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => ApiError::bad_request("Invalid product payload"),
        ProductsServiceError::Sql(source) => {
            error!("products storage error: {source}");

            ApiError::internal()
        }
    }
}

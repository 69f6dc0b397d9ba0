//! Errors

use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

use crate::responses::ApiError;

pub(crate) fn into_api_error(error: OrdersServiceError) -> ApiError {
    match error {
        OrdersServiceError::EmptyCart => ApiError::bad_request("Cart is empty"),
        OrdersServiceError::ProductUnavailable { title } => ApiError::bad_request(format!(
            "Product {} is no longer available",
            title.as_deref().unwrap_or("Unknown")
        )),
        OrdersServiceError::InsufficientStock { title, available } => {
            ApiError::bad_request(format!("Only {available} items available for {title}"))
        }
        OrdersServiceError::NotFound => ApiError::not_found("Order not found"),
        OrdersServiceError::Forbidden => ApiError::forbidden("Not authorized for this order"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => ApiError::bad_request("Invalid order payload"),
        OrdersServiceError::Sql(source) => {
            error!("orders storage error: {source}");

            ApiError::internal()
        }
    }
}

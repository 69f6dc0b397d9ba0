//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::models::NewProduct;

use crate::{
    extensions::*,
    products::{errors::into_api_error, responses::ProductResponse},
    responses::{ApiError, DataResponse, FieldError},
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateProductRequest {
    /// Client-supplied identifier; generated when omitted.
    #[serde(default)]
    pub uuid: Option<Uuid>,

    #[serde(default)]
    pub title: String,

    /// Unit price in cents
    #[serde(default)]
    pub price: u64,

    #[serde(default)]
    pub stock: u64,

    /// Seller override, honored for admin callers only.
    #[serde(default)]
    pub seller_uuid: Option<Uuid>,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            uuid: request.uuid.unwrap_or_else(Uuid::now_v7),
            title: request.title,
            price: request.price,
            stock: request.stock,
            seller_uuid: request.seller_uuid,
        }
    }
}

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<DataResponse<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let body: CreateProductRequest = req
        .parse_json()
        .await
        .map_err(|_parse_error| ApiError::bad_request("Invalid request body"))?;

    if body.title.trim().is_empty() {
        return Err(ApiError::validation(vec![FieldError::new(
            "title",
            "Title is required",
        )]));
    }

    let product = state
        .app
        .products
        .create_product(identity, body.into())
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(DataResponse::new(product.into())))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{TEST_SELLER, make_product, service_as, state_with_products};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        service_as(
            TEST_SELLER,
            state_with_products(products),
            Router::with_path("products").post(handler),
        )
    }

    #[tokio::test]
    async fn test_create_product_returns_201() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(move |identity, new| {
                *identity == TEST_SELLER
                    && new.uuid == uuid
                    && new.title == "Walnut Desk"
                    && new.price == 20_00
                    && new.stock == 5
            })
            .return_once(move |_, _| Ok(make_product(uuid)));

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({
                "uuid": uuid,
                "title": "Walnut Desk",
                "price": 2000,
                "stock": 5,
            }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: DataResponse<ProductResponse> = res.take_json().await?;

        assert_eq!(body.data.uuid, uuid);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_blank_title_returns_field_error() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "title": "  ", "price": 100, "stock": 1 }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_forbidden_for_plain_users() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::Forbidden));

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "title": "Desk", "price": 100, "stock": 1 }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}

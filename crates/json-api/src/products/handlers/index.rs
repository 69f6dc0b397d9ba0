//! List Products Handler

use std::sync::Arc;

use salvo::prelude::*;

use storefront_app::domain::pagination::PageRequest;

use crate::{
    extensions::*,
    products::{errors::into_api_error, responses::ProductResponse},
    responses::{ApiError, ListResponse},
    state::State,
};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ListResponse<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = PageRequest::new(req.query::<u32>("page"), req.query::<u32>("limit"));

    let products = state
        .app
        .products
        .list_products(page)
        .await
        .map_err(into_api_error)?;

    Ok(Json(ListResponse::new(products, ProductResponse::from)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use uuid::Uuid;

    use storefront_app::domain::{pagination::Paginated, products::MockProductsService};

    use crate::test_helpers::{make_product, one_page, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_products_with_pagination() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|page| *page == PageRequest::default())
            .return_once(move |_| Ok(one_page(vec![make_product(uuid)], 1)));

        let mut res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ListResponse<ProductResponse> = res.take_json().await?;

        assert!(body.success);
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.pagination.total, 1);
        assert_eq!(body.pagination.pages, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_page_query() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|page| page.page == 2 && page.limit == 5)
            .return_once(|page| Ok(Paginated::new(vec![], page, 0)));

        let res = TestClient::get("http://example.com/products?page=2&limit=5")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}

//! Products service.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    auth::{Identity, Role, authorize},
    database::Db,
    domain::{
        pagination::{PageRequest, Paginated},
        products::{
            errors::ProductsServiceError,
            models::{NewProduct, Product},
            repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        page: PageRequest,
    ) -> Result<Paginated<Product>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self
            .repository
            .list_products(&mut tx, page.sql_limit(), page.sql_offset())
            .await?;

        let total = self.repository.count_products(&mut tx).await?;

        tx.commit().await?;

        Ok(Paginated::new(products, page, total))
    }

    async fn get_product(&self, product: Uuid) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        identity: Identity,
        product: NewProduct,
    ) -> Result<Product, ProductsServiceError> {
        if !authorize::seller_or_admin(identity) {
            return Err(ProductsServiceError::Forbidden);
        }

        // Sellers always own what they list; only admins may list on
        // behalf of another seller.
        let seller_uuid = match identity.role {
            Role::Admin => product.seller_uuid.unwrap_or(identity.user),
            _ => identity.user,
        };

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_product(&mut tx, &product, seller_uuid)
            .await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves one page of purchasable products.
    async fn list_products(
        &self,
        page: PageRequest,
    ) -> Result<Paginated<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: Uuid) -> Result<Product, ProductsServiceError>;

    /// Creates a new product owned by the calling seller.
    async fn create_product(
        &self,
        identity: Identity,
        product: NewProduct,
    ) -> Result<Product, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn create_product_returns_created_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = Uuid::now_v7();

        let product = ctx
            .products
            .create_product(
                ctx.seller,
                NewProduct {
                    uuid,
                    title: "Walnut Desk".to_string(),
                    price: 129_00,
                    stock: 4,
                    seller_uuid: None,
                },
            )
            .await?;

        assert_eq!(product.uuid, uuid);
        assert_eq!(product.title, "Walnut Desk");
        assert_eq!(product.price, 129_00);
        assert_eq!(product.stock, 4);
        assert_eq!(product.seller_uuid, ctx.seller.user);
        assert!(product.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn buyer_cannot_create_product() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(
                ctx.buyer,
                NewProduct {
                    uuid: Uuid::now_v7(),
                    title: "Nope".to_string(),
                    price: 100,
                    stock: 1,
                    seller_uuid: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );
    }

    #[tokio::test]
    async fn admin_can_create_for_another_seller() -> TestResult {
        let ctx = TestContext::new().await;
        let other_seller = Uuid::now_v7();

        let product = ctx
            .products
            .create_product(
                ctx.admin,
                NewProduct {
                    uuid: Uuid::now_v7(),
                    title: "Consigned Lamp".to_string(),
                    price: 45_00,
                    stock: 2,
                    seller_uuid: Some(other_seller),
                },
            )
            .await?;

        assert_eq!(product.seller_uuid, other_seller);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(Uuid::now_v7()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = Uuid::now_v7();

        ctx.create_product(uuid, "First", 100, 1).await?;

        let result = ctx
            .products
            .create_product(
                ctx.seller,
                NewProduct {
                    uuid,
                    title: "Second".to_string(),
                    price: 200,
                    stock: 1,
                    seller_uuid: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_products_paginates_newest_first() -> TestResult {
        let ctx = TestContext::new().await;

        for n in 0..3_u64 {
            ctx.create_product(Uuid::now_v7(), "Widget", 100 + n, 5).await?;
        }

        let page = ctx
            .products
            .list_products(PageRequest::new(Some(1), Some(2)))
            .await?;

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 3);
        assert_eq!(page.pages, 2);

        let page_two = ctx
            .products
            .list_products(PageRequest::new(Some(2), Some(2)))
            .await?;

        assert_eq!(page_two.items.len(), 1);

        Ok(())
    }
}

//! Test context for service-level integration tests.

use sqlx::{query, query_scalar};
use uuid::Uuid;

use crate::{
    auth::{Identity, PgAuthService, Role},
    database::Db,
    domain::{
        carts::{
            CartsService, CartsServiceError, PgCartsService,
            models::{Cart, NewCartItem},
        },
        orders::PgOrdersService,
        products::{
            PgProductsService, ProductsService, ProductsServiceError,
            models::{NewProduct, Product},
        },
    },
};

use super::db::TestDb;

pub(crate) struct TestContext {
    pub db: TestDb,
    pub auth: PgAuthService,
    pub products: PgProductsService,
    pub carts: PgCartsService,
    pub orders: PgOrdersService,

    /// A plain customer identity.
    pub buyer: Identity,

    /// The default seller owning products created via [`Self::create_product`].
    pub seller: Identity,

    pub admin: Identity,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let pool = test_db.pool().clone();
        let db = Db::new(pool.clone());

        Self {
            auth: PgAuthService::new(pool),
            products: PgProductsService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            orders: PgOrdersService::new(db),
            buyer: Identity::new(Uuid::now_v7(), Role::User),
            seller: Identity::new(Uuid::now_v7(), Role::Seller),
            admin: Identity::new(Uuid::now_v7(), Role::Admin),
            db: test_db,
        }
    }

    /// Create an active product owned by the default test seller.
    pub async fn create_product(
        &self,
        uuid: Uuid,
        title: &str,
        price: u64,
        stock: u64,
    ) -> Result<Product, ProductsServiceError> {
        self.products
            .create_product(
                self.seller,
                NewProduct {
                    uuid,
                    title: title.to_string(),
                    price,
                    stock,
                    seller_uuid: None,
                },
            )
            .await
    }

    /// Create a product for an arbitrary seller (via the admin identity).
    pub async fn create_product_for(
        &self,
        seller: Uuid,
        uuid: Uuid,
        title: &str,
        price: u64,
        stock: u64,
    ) -> Result<Product, ProductsServiceError> {
        self.products
            .create_product(
                self.admin,
                NewProduct {
                    uuid,
                    title: title.to_string(),
                    price,
                    stock,
                    seller_uuid: Some(seller),
                },
            )
            .await
    }

    pub async fn add_to_cart(
        &self,
        user: Uuid,
        product: Uuid,
        quantity: u64,
    ) -> Result<Cart, CartsServiceError> {
        self.carts
            .add_item(
                user,
                NewCartItem {
                    product_uuid: product,
                    quantity,
                },
            )
            .await
    }

    /// Flip a product inactive directly in storage, bypassing the
    /// services (catalog management is out of scope for them).
    pub async fn deactivate_product(&self, product: Uuid) {
        query("UPDATE products SET is_active = FALSE, updated_at = now() WHERE uuid = $1")
            .bind(product)
            .execute(self.db.pool())
            .await
            .expect("Failed to deactivate product");
    }

    /// Change a product's price directly in storage.
    pub async fn set_product_price(&self, product: Uuid, price: u64) {
        query("UPDATE products SET price = $2, updated_at = now() WHERE uuid = $1")
            .bind(product)
            .bind(i64::try_from(price).expect("price should fit in BIGINT"))
            .execute(self.db.pool())
            .await
            .expect("Failed to update product price");
    }

    /// Current stock count straight from storage.
    pub async fn product_stock(&self, product: Uuid) -> u64 {
        let stock: i64 = query_scalar("SELECT stock FROM products WHERE uuid = $1")
            .bind(product)
            .fetch_one(self.db.pool())
            .await
            .expect("Failed to read product stock");

        u64::try_from(stock).expect("stock should be non-negative")
    }
}

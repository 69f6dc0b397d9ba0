//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{Cart, NewCartItem},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        products::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }

    /// Read the cart with its items inside an open transaction.
    async fn read_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: Uuid,
    ) -> Result<Cart, CartsServiceError> {
        let Some(mut cart) = self.carts_repository.get_cart(tx, user).await? else {
            return Ok(Cart::empty(user));
        };

        let items = self.items_repository.get_cart_items(tx, user).await?;

        cart.items.extend(items);

        Ok(cart)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: Uuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self.read_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn add_item(&self, user: Uuid, item: NewCartItem) -> Result<Cart, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let product = self
            .products_repository
            .get_product(&mut tx, item.product_uuid)
            .await?;

        if !product.is_available() {
            return Err(CartsServiceError::ProductUnavailable {
                title: product.title,
            });
        }

        self.carts_repository.ensure_cart(&mut tx, user).await?;

        self.items_repository
            .upsert_cart_item(&mut tx, user, product.uuid, item.quantity, product.price)
            .await?;

        self.carts_repository
            .refresh_cart_total(&mut tx, user)
            .await?;

        let cart = self.read_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn update_item(
        &self,
        user: Uuid,
        product: Uuid,
        quantity: u64,
    ) -> Result<Cart, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .items_repository
            .update_cart_item_quantity(&mut tx, user, product, quantity)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        self.carts_repository
            .refresh_cart_total(&mut tx, user)
            .await?;

        let cart = self.read_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn remove_item(&self, user: Uuid, product: Uuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, user, product)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        self.carts_repository
            .refresh_cart_total(&mut tx, user)
            .await?;

        let cart = self.read_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn clear_cart(&self, user: Uuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.items_repository.clear_cart_items(&mut tx, user).await?;

        if self.carts_repository.get_cart(&mut tx, user).await?.is_some() {
            self.carts_repository
                .set_cart_total(&mut tx, user, 0)
                .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart; never fails for a missing cart.
    async fn get_cart(&self, user: Uuid) -> Result<Cart, CartsServiceError>;

    /// Add a product to the cart, creating the cart on first use.
    async fn add_item(&self, user: Uuid, item: NewCartItem) -> Result<Cart, CartsServiceError>;

    /// Replace the quantity of a product already in the cart.
    async fn update_item(
        &self,
        user: Uuid,
        product: Uuid,
        quantity: u64,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove one product from the cart.
    async fn remove_item(&self, user: Uuid, product: Uuid) -> Result<Cart, CartsServiceError>;

    /// Remove every item; the cart row itself survives.
    async fn clear_cart(&self, user: Uuid) -> Result<(), CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn cart_starts_empty() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = ctx.carts.get_cart(ctx.buyer.user).await?;

        assert_eq!(cart.user_uuid, ctx.buyer.user);
        assert_eq!(cart.total_amount, 0);
        assert!(cart.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn add_item_captures_price_and_total() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product(Uuid::now_v7(), "Mug", 12_50, 10).await?;

        let cart = ctx
            .carts
            .add_item(
                ctx.buyer.user,
                NewCartItem {
                    product_uuid: product.uuid,
                    quantity: 2,
                },
            )
            .await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total_amount, 25_00);

        let item = cart.items.first().expect("cart should have one item");

        assert_eq!(item.product_uuid, product.uuid);
        assert_eq!(item.title, "Mug");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.price, 12_50);

        Ok(())
    }

    #[tokio::test]
    async fn adding_same_product_increments_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product(Uuid::now_v7(), "Mug", 10_00, 10).await?;

        ctx.add_to_cart(ctx.buyer.user, product.uuid, 1).await?;
        let cart = ctx.add_to_cart(ctx.buyer.user, product.uuid, 2).await?;

        assert_eq!(cart.items.len(), 1);

        let item = cart.items.first().expect("cart should have one item");

        assert_eq!(item.quantity, 3);
        assert_eq!(cart.total_amount, 30_00);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_unknown_product_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .carts
            .add_item(
                ctx.buyer.user,
                NewCartItem {
                    product_uuid: Uuid::now_v7(),
                    quantity: 1,
                },
            )
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn add_item_inactive_product_is_unavailable() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product(Uuid::now_v7(), "Ghost", 5_00, 5).await?;

        ctx.deactivate_product(product.uuid).await;

        let result = ctx
            .carts
            .add_item(
                ctx.buyer.user,
                NewCartItem {
                    product_uuid: product.uuid,
                    quantity: 1,
                },
            )
            .await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::ProductUnavailable { ref title }) if title == "Ghost"
            ),
            "expected ProductUnavailable for Ghost, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_item_zero_quantity_is_invalid() {
        let ctx = TestContext::new().await;

        let result = ctx
            .carts
            .add_item(
                ctx.buyer.user,
                NewCartItem {
                    product_uuid: Uuid::now_v7(),
                    quantity: 0,
                },
            )
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_item_replaces_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product(Uuid::now_v7(), "Mug", 10_00, 10).await?;

        ctx.add_to_cart(ctx.buyer.user, product.uuid, 5).await?;

        let cart = ctx
            .carts
            .update_item(ctx.buyer.user, product.uuid, 1)
            .await?;

        let item = cart.items.first().expect("cart should have one item");

        assert_eq!(item.quantity, 1);
        assert_eq!(cart.total_amount, 10_00);

        Ok(())
    }

    #[tokio::test]
    async fn update_item_missing_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .carts
            .update_item(ctx.buyer.user, Uuid::now_v7(), 1)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn remove_item_updates_total() -> TestResult {
        let ctx = TestContext::new().await;
        let mug = ctx.create_product(Uuid::now_v7(), "Mug", 10_00, 10).await?;
        let pot = ctx.create_product(Uuid::now_v7(), "Pot", 20_00, 10).await?;

        ctx.add_to_cart(ctx.buyer.user, mug.uuid, 1).await?;
        ctx.add_to_cart(ctx.buyer.user, pot.uuid, 1).await?;

        let cart = ctx.carts.remove_item(ctx.buyer.user, mug.uuid).await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total_amount, 20_00);

        Ok(())
    }

    #[tokio::test]
    async fn clear_cart_empties_but_keeps_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product(Uuid::now_v7(), "Mug", 10_00, 10).await?;

        ctx.add_to_cart(ctx.buyer.user, product.uuid, 2).await?;
        ctx.carts.clear_cart(ctx.buyer.user).await?;

        let cart = ctx.carts.get_cart(ctx.buyer.user).await?;

        assert!(cart.items.is_empty());
        assert_eq!(cart.total_amount, 0);

        Ok(())
    }

    #[tokio::test]
    async fn carts_are_isolated_per_user() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product(Uuid::now_v7(), "Mug", 10_00, 10).await?;

        ctx.add_to_cart(ctx.buyer.user, product.uuid, 1).await?;

        let other = ctx.carts.get_cart(Uuid::now_v7()).await?;

        assert!(other.items.is_empty());

        Ok(())
    }
}

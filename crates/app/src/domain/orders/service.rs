//! Orders service.

use std::collections::HashMap;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{Span, info};
use uuid::Uuid;

use crate::{
    auth::{Identity, authorize},
    database::Db,
    domain::{
        carts::{PgCartItemsRepository, PgCartsRepository},
        orders::{
            data::{line_items_total, order_totals},
            errors::OrdersServiceError,
            models::{
                NewOrder, Order, OrderItem, OrderStatus, PaymentConfirmation, PaymentResult,
            },
            repositories::{OrderItemRow, PgOrderItemsRepository, PgOrdersRepository},
        },
        pagination::{PageRequest, Paginated},
        products::PgProductsRepository,
    },
};

/// Payment id recorded when the caller does not supply one.
const FALLBACK_PAYMENT_ID: &str = "dummy_payment_id";

const PAYMENT_COMPLETED: &str = "completed";

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    products_repository: PgProductsRepository,
    carts_repository: PgCartsRepository,
    cart_items_repository: PgCartItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
            carts_repository: PgCartsRepository::new(),
            cart_items_repository: PgCartItemsRepository::new(),
        }
    }

    /// Attach items to a page of orders with one batched query.
    async fn populate_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &mut [Order],
    ) -> Result<(), OrdersServiceError> {
        let uuids: Vec<Uuid> = orders.iter().map(|order| order.uuid).collect();

        let rows = self
            .items_repository
            .get_order_items_for_orders(tx, &uuids)
            .await?;

        let mut by_order = group_items(rows);

        for order in orders {
            if let Some(items) = by_order.remove(&order.uuid) {
                order.items = items;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.place_order",
        skip(self, order),
        fields(
            user_uuid = %identity.user,
            order_uuid = tracing::field::Empty,
            line_item_count = tracing::field::Empty,
            total_amount = tracing::field::Empty
        ),
        err
    )]
    async fn place_order(
        &self,
        identity: Identity,
        order: NewOrder,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart_items = self
            .cart_items_repository
            .get_cart_items(&mut tx, identity.user)
            .await?;

        if cart_items.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let mut order_items = Vec::with_capacity(cart_items.len());

        // Validate each line against the live catalog and decrement
        // stock as we go. Any rejection drops the transaction, which
        // also rolls back decrements applied to earlier lines.
        for cart_item in &cart_items {
            let product = match self
                .products_repository
                .get_product(&mut tx, cart_item.product_uuid)
                .await
            {
                Ok(product) => product,
                Err(sqlx::Error::RowNotFound) => {
                    return Err(OrdersServiceError::ProductUnavailable {
                        title: Some(cart_item.title.clone()),
                    });
                }
                Err(error) => return Err(error.into()),
            };

            if !product.is_available() {
                return Err(OrdersServiceError::ProductUnavailable {
                    title: Some(product.title),
                });
            }

            if product.stock < cart_item.quantity {
                return Err(OrdersServiceError::InsufficientStock {
                    title: product.title,
                    available: product.stock,
                });
            }

            let rows_affected = self
                .products_repository
                .decrement_stock(&mut tx, product.uuid, cart_item.quantity)
                .await?;

            if rows_affected == 0 {
                return Err(OrdersServiceError::InsufficientStock {
                    title: product.title,
                    available: product.stock,
                });
            }

            order_items.push(OrderItem {
                uuid: Uuid::now_v7(),
                product_uuid: product.uuid,
                title: product.title,
                quantity: cart_item.quantity,
                unit_price: product.price,
                seller_uuid: product.seller_uuid,
            });
        }

        let totals = order_totals(line_items_total(&order_items));

        let order_uuid = Uuid::now_v7();

        let mut created = self
            .orders_repository
            .create_order(
                &mut tx,
                order_uuid,
                identity.user,
                &order.shipping_address,
                order.payment_method,
                &totals,
            )
            .await?;

        self.items_repository
            .create_order_items(&mut tx, created.uuid, &order_items)
            .await?;

        // Empty the cart; the cart row itself survives placement.
        self.cart_items_repository
            .clear_cart_items(&mut tx, identity.user)
            .await?;

        self.carts_repository
            .set_cart_total(&mut tx, identity.user, 0)
            .await?;

        tx.commit().await?;

        created.items = order_items;

        let span = Span::current();

        span.record("order_uuid", tracing::field::display(created.uuid));
        span.record("line_item_count", created.items.len());
        span.record("total_amount", created.total_amount);

        info!(order_uuid = %created.uuid, "placed order");

        Ok(created)
    }

    async fn get_order(&self, identity: Identity, uuid: Uuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut order = self.orders_repository.get_order(&mut tx, uuid).await?;

        if !authorize::owner_or_admin(identity, order.user_uuid) {
            return Err(OrdersServiceError::Forbidden);
        }

        order.items = self.items_repository.get_order_items(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders(
        &self,
        identity: Identity,
        page: PageRequest,
    ) -> Result<Paginated<Order>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut orders = self
            .orders_repository
            .list_orders(&mut tx, identity.user, page.sql_limit(), page.sql_offset())
            .await?;

        let total = self
            .orders_repository
            .count_orders(&mut tx, identity.user)
            .await?;

        self.populate_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        Ok(Paginated::new(orders, page, total))
    }

    async fn list_seller_orders(
        &self,
        identity: Identity,
        page: PageRequest,
    ) -> Result<Paginated<Order>, OrdersServiceError> {
        if !authorize::seller_or_admin(identity) {
            return Err(OrdersServiceError::Forbidden);
        }

        let mut tx = self.db.begin_transaction().await?;

        let mut orders = self
            .orders_repository
            .list_seller_orders(&mut tx, identity.user, page.sql_limit(), page.sql_offset())
            .await?;

        let total = self
            .orders_repository
            .count_seller_orders(&mut tx, identity.user)
            .await?;

        let uuids: Vec<Uuid> = orders.iter().map(|order| order.uuid).collect();

        let rows = self
            .items_repository
            .get_seller_order_items(&mut tx, &uuids, identity.user)
            .await?;

        tx.commit().await?;

        let mut by_order = group_items(rows);

        // Project each order down to this seller's items, with the
        // total recomputed from just those items.
        for order in &mut orders {
            order.items = by_order.remove(&order.uuid).unwrap_or_default();
            order.total_amount = line_items_total(&order.items);
        }

        Ok(Paginated::new(orders, page, total))
    }

    async fn mark_paid(
        &self,
        identity: Identity,
        uuid: Uuid,
        confirmation: PaymentConfirmation,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let order = self.orders_repository.get_order(&mut tx, uuid).await?;

        if !authorize::owner_or_admin(identity, order.user_uuid) {
            return Err(OrdersServiceError::Forbidden);
        }

        // Recorded as supplied; payment verification is a collaborator
        // this system does not have.
        let payment = PaymentResult {
            id: confirmation
                .payment_id
                .unwrap_or_else(|| FALLBACK_PAYMENT_ID.to_string()),
            status: PAYMENT_COMPLETED.to_string(),
        };

        let mut updated = self
            .orders_repository
            .mark_paid(&mut tx, uuid, &payment)
            .await?;

        updated.items = self.items_repository.get_order_items(&mut tx, uuid).await?;

        tx.commit().await?;

        info!(order_uuid = %uuid, "order marked paid");

        Ok(updated)
    }

    async fn mark_delivered(
        &self,
        identity: Identity,
        uuid: Uuid,
    ) -> Result<Order, OrdersServiceError> {
        if !authorize::seller_or_admin(identity) {
            return Err(OrdersServiceError::Forbidden);
        }

        let mut tx = self.db.begin_transaction().await?;

        let mut updated = self.orders_repository.mark_delivered(&mut tx, uuid).await?;

        updated.items = self.items_repository.get_order_items(&mut tx, uuid).await?;

        tx.commit().await?;

        info!(order_uuid = %uuid, "order marked delivered");

        Ok(updated)
    }

    async fn set_status(
        &self,
        identity: Identity,
        uuid: Uuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        if !authorize::seller_or_admin(identity) {
            return Err(OrdersServiceError::Forbidden);
        }

        let mut tx = self.db.begin_transaction().await?;

        // Delivered carries delivery side effects; every other status
        // is a plain field update. No transition is disallowed.
        let mut updated = if status == OrderStatus::Delivered {
            self.orders_repository.mark_delivered(&mut tx, uuid).await?
        } else {
            self.orders_repository
                .set_status(&mut tx, uuid, status)
                .await?
        };

        updated.items = self.items_repository.get_order_items(&mut tx, uuid).await?;

        tx.commit().await?;

        info!(order_uuid = %uuid, status = %status, "order status updated");

        Ok(updated)
    }
}

fn group_items(rows: Vec<OrderItemRow>) -> HashMap<Uuid, Vec<OrderItem>> {
    let mut by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();

    for row in rows {
        by_order.entry(row.order_uuid).or_default().push(row.item);
    }

    by_order
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the caller's cart into a persisted order.
    async fn place_order(
        &self,
        identity: Identity,
        order: NewOrder,
    ) -> Result<Order, OrdersServiceError>;

    /// Retrieve one order; owner or admin only.
    async fn get_order(&self, identity: Identity, uuid: Uuid) -> Result<Order, OrdersServiceError>;

    /// The caller's own orders, newest first.
    async fn list_orders(
        &self,
        identity: Identity,
        page: PageRequest,
    ) -> Result<Paginated<Order>, OrdersServiceError>;

    /// Orders containing the calling seller's products, projected to
    /// that seller's line items.
    async fn list_seller_orders(
        &self,
        identity: Identity,
        page: PageRequest,
    ) -> Result<Paginated<Order>, OrdersServiceError>;

    /// Record a caller-supplied payment confirmation.
    async fn mark_paid(
        &self,
        identity: Identity,
        uuid: Uuid,
        confirmation: PaymentConfirmation,
    ) -> Result<Order, OrdersServiceError>;

    /// Mark an order delivered; seller or admin only.
    async fn mark_delivered(
        &self,
        identity: Identity,
        uuid: Uuid,
    ) -> Result<Order, OrdersServiceError>;

    /// Set the fulfilment status; seller or admin only.
    async fn set_status(
        &self,
        identity: Identity,
        uuid: Uuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;
}

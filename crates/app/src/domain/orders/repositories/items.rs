//! Order Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    orders::models::OrderItem,
    products::repository::{to_sql_amount, try_get_amount},
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");
const GET_ORDER_ITEMS_FOR_ORDERS_SQL: &str = include_str!("../sql/get_order_items_for_orders.sql");
const GET_SELLER_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_seller_order_items.sql");

/// An order item together with the order it belongs to, for grouping
/// after a multi-order fetch.
#[derive(Debug, Clone)]
pub(crate) struct OrderItemRow {
    pub(crate) order_uuid: Uuid,
    pub(crate) item: OrderItem,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
        items: &[OrderItem],
    ) -> Result<(), sqlx::Error> {
        for item in items {
            query(CREATE_ORDER_ITEM_SQL)
                .bind(item.uuid)
                .bind(order)
                .bind(item.product_uuid)
                .bind(&item.title)
                .bind(to_sql_amount(item.quantity, "quantity")?)
                .bind(to_sql_amount(item.unit_price, "unit_price")?)
                .bind(item.seller_uuid)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: Uuid,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        let rows = query_as::<Postgres, OrderItemRow>(GET_ORDER_ITEMS_SQL)
            .bind(order)
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().map(|row| row.item).collect())
    }

    pub(crate) async fn get_order_items_for_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[Uuid],
    ) -> Result<Vec<OrderItemRow>, sqlx::Error> {
        query_as::<Postgres, OrderItemRow>(GET_ORDER_ITEMS_FOR_ORDERS_SQL)
            .bind(orders)
            .fetch_all(&mut **tx)
            .await
    }

    /// Items for the given orders, restricted to one seller's captures.
    pub(crate) async fn get_seller_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[Uuid],
        seller: Uuid,
    ) -> Result<Vec<OrderItemRow>, sqlx::Error> {
        query_as::<Postgres, OrderItemRow>(GET_SELLER_ORDER_ITEMS_SQL)
            .bind(orders)
            .bind(seller)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_uuid: row.try_get("order_uuid")?,
            item: OrderItem {
                uuid: row.try_get("uuid")?,
                product_uuid: row.try_get("product_uuid")?,
                title: row.try_get("title")?,
                quantity: try_get_amount(row, "quantity")?,
                unit_price: try_get_amount(row, "unit_price")?,
                seller_uuid: row.try_get("seller_uuid")?,
            },
        })
    }
}

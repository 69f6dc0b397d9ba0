//! Orders Repository

use std::str::FromStr;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    orders::{
        data::OrderTotals,
        models::{
            Order, OrderStatus, PaymentMethod, PaymentResult, ShippingAddress,
        },
    },
    products::repository::{to_sql_amount, try_get_amount},
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const COUNT_ORDERS_SQL: &str = include_str!("../sql/count_orders.sql");
const LIST_SELLER_ORDERS_SQL: &str = include_str!("../sql/list_seller_orders.sql");
const COUNT_SELLER_ORDERS_SQL: &str = include_str!("../sql/count_seller_orders.sql");
const MARK_PAID_SQL: &str = include_str!("../sql/mark_paid.sql");
const MARK_DELIVERED_SQL: &str = include_str!("../sql/mark_delivered.sql");
const SET_STATUS_SQL: &str = include_str!("../sql/set_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: Uuid,
        user: Uuid,
        address: &ShippingAddress,
        payment_method: PaymentMethod,
        totals: &OrderTotals,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(uuid)
            .bind(user)
            .bind(&address.street)
            .bind(&address.city)
            .bind(&address.state)
            .bind(&address.zip_code)
            .bind(&address.country)
            .bind(payment_method.as_str())
            .bind(to_sql_amount(totals.items_total, "items_total")?)
            .bind(to_sql_amount(totals.shipping_price, "shipping_price")?)
            .bind(to_sql_amount(totals.tax_price, "tax_price")?)
            .bind(to_sql_amount(totals.total_amount, "total_amount")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: Uuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(uuid)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .bind(user)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: Uuid,
    ) -> Result<u64, sqlx::Error> {
        count(tx, COUNT_ORDERS_SQL, user).await
    }

    /// List orders containing at least one line item captured for the
    /// given seller.
    pub(crate) async fn list_seller_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_SELLER_ORDERS_SQL)
            .bind(seller)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_seller_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: Uuid,
    ) -> Result<u64, sqlx::Error> {
        count(tx, COUNT_SELLER_ORDERS_SQL, seller).await
    }

    pub(crate) async fn mark_paid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: Uuid,
        payment: &PaymentResult,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(MARK_PAID_SQL)
            .bind(uuid)
            .bind(&payment.id)
            .bind(&payment.status)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn mark_delivered(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: Uuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(MARK_DELIVERED_SQL)
            .bind(uuid)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: Uuid,
        status: OrderStatus,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(SET_STATUS_SQL)
            .bind(uuid)
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

async fn count(
    tx: &mut Transaction<'_, Postgres>,
    sql: &str,
    key: Uuid,
) -> Result<u64, sqlx::Error> {
    let count: i64 = query_scalar(sql).bind(key).fetch_one(&mut **tx).await?;

    u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
        index: "count".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let order_status =
            OrderStatus::from_str(row.try_get("order_status")?).map_err(|e| {
                sqlx::Error::ColumnDecode {
                    index: "order_status".to_string(),
                    source: Box::new(e),
                }
            })?;

        let payment_method =
            PaymentMethod::from_str(row.try_get("payment_method")?).map_err(|e| {
                sqlx::Error::ColumnDecode {
                    index: "payment_method".to_string(),
                    source: Box::new(e),
                }
            })?;

        let payment_result = match (
            row.try_get::<Option<String>, _>("payment_id")?,
            row.try_get::<Option<String>, _>("payment_status")?,
        ) {
            (Some(id), Some(status)) => Some(PaymentResult { id, status }),
            _ => None,
        };

        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            items: Vec::new(),
            shipping_address: ShippingAddress {
                street: row.try_get("shipping_street")?,
                city: row.try_get("shipping_city")?,
                state: row.try_get("shipping_state")?,
                zip_code: row.try_get("shipping_zip_code")?,
                country: row.try_get("shipping_country")?,
            },
            payment_method,
            items_total: try_get_amount(row, "items_total")?,
            shipping_price: try_get_amount(row, "shipping_price")?,
            tax_price: try_get_amount(row, "tax_price")?,
            total_amount: try_get_amount(row, "total_amount")?,
            order_status,
            is_paid: row.try_get("is_paid")?,
            paid_at: row
                .try_get::<Option<SqlxTimestamp>, _>("paid_at")?
                .map(SqlxTimestamp::to_jiff),
            payment_result,
            is_delivered: row.try_get("is_delivered")?,
            delivered_at: row
                .try_get::<Option<SqlxTimestamp>, _>("delivered_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

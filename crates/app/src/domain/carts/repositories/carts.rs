//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    carts::models::Cart,
    products::repository::{to_sql_amount, try_get_amount},
};

const GET_CART_SQL: &str = include_str!("../sql/get_cart.sql");
const ENSURE_CART_SQL: &str = include_str!("../sql/ensure_cart.sql");
const SET_CART_TOTAL_SQL: &str = include_str!("../sql/set_cart_total.sql");
const CART_ITEMS_TOTAL_SQL: &str = include_str!("../sql/cart_items_total.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: Uuid,
    ) -> Result<Option<Cart>, sqlx::Error> {
        query_as::<Postgres, Cart>(GET_CART_SQL)
            .bind(user)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Create the user's cart row if it does not exist yet.
    pub(crate) async fn ensure_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: Uuid,
    ) -> Result<(), sqlx::Error> {
        query(ENSURE_CART_SQL).bind(user).execute(&mut **tx).await?;

        Ok(())
    }

    /// Recompute the cached total from the stored items and persist it.
    pub(crate) async fn refresh_cart_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let total: i64 = query_scalar(CART_ITEMS_TOTAL_SQL)
            .bind(user)
            .fetch_one(&mut **tx)
            .await?;

        query(SET_CART_TOTAL_SQL)
            .bind(user)
            .bind(total)
            .execute(&mut **tx)
            .await?;

        u64::try_from(total).map_err(|e| sqlx::Error::ColumnDecode {
            index: "total_amount".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn set_cart_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: Uuid,
        total: u64,
    ) -> Result<(), sqlx::Error> {
        query(SET_CART_TOTAL_SQL)
            .bind(user)
            .bind(to_sql_amount(total, "total_amount")?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for Cart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_uuid: row.try_get("user_uuid")?,
            total_amount: try_get_amount(row, "total_amount")?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

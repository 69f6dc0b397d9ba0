//! Auth repository.

use std::str::FromStr;

use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::auth::{
    ApiTokenVersion, Role,
    models::{ApiToken, NewApiToken},
    token::ApiTokenSecret,
};

const FIND_ACTIVE_API_TOKEN_SQL: &str = include_str!("sql/find_active_api_token.sql");
const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");
const TOUCH_API_TOKEN_SQL: &str = include_str!("sql/touch_api_token.sql");
const REVOKE_API_TOKEN_SQL: &str = include_str!("sql/revoke_api_token.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up an unrevoked, unexpired token by uuid whose stored digest
    /// matches the presented secret. The digest comparison happens in
    /// the database, so the secret never round-trips through storage.
    pub(crate) async fn find_active_api_token(
        &self,
        token_uuid: Uuid,
        secret: &ApiTokenSecret,
    ) -> Result<Option<ApiToken>, sqlx::Error> {
        query_as::<Postgres, ApiToken>(FIND_ACTIVE_API_TOKEN_SQL)
            .bind(token_uuid)
            .bind(secret.as_hex())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn create_api_token(
        &self,
        token: &NewApiToken,
        secret: &ApiTokenSecret,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_API_TOKEN_SQL)
            .bind(token.uuid)
            .bind(token.user_uuid)
            .bind(token.role.as_str())
            .bind(token.version.as_i16())
            .bind(secret.as_hex())
            .bind(token.expires_at.map(jiff_sqlx::Timestamp::from))
            .execute(&self.pool)
            .await
            .map(|_| ())
    }

    pub(crate) async fn touch_api_token_last_used(
        &self,
        token_uuid: Uuid,
    ) -> Result<(), sqlx::Error> {
        query(TOUCH_API_TOKEN_SQL)
            .bind(token_uuid)
            .execute(&self.pool)
            .await
            .map(|_| ())
    }

    pub(crate) async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REVOKE_API_TOKEN_SQL)
            .bind(token_uuid)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ApiToken {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role = Role::from_str(row.try_get("role")?).map_err(|e| sqlx::Error::ColumnDecode {
            index: "role".to_string(),
            source: Box::new(e),
        })?;

        let version = ApiTokenVersion::try_from(row.try_get::<i16, _>("version")?).map_err(|e| {
            sqlx::Error::ColumnDecode {
                index: "version".to_string(),
                source: Box::new(e),
            }
        })?;

        Ok(Self {
            user_uuid: row.try_get("user_uuid")?,
            role,
            version,
        })
    }
}

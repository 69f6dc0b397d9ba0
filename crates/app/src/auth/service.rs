//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{
    ApiTokenVersion, AuthServiceError, Identity, IssuedApiToken, NewApiToken, Role,
    format_api_token, generate_api_token_secret, parse_api_token, repository::PgAuthRepository,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token carrying the given user and role.
    ///
    /// The raw token is returned exactly once; only its digest is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insertion fails.
    pub async fn issue_api_token(
        &self,
        user_uuid: Uuid,
        role: Role,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);

        self.repository
            .create_api_token(
                &NewApiToken {
                    uuid: token_uuid,
                    user_uuid,
                    role,
                    version,
                    expires_at,
                },
                &secret,
            )
            .await?;

        Ok(IssuedApiToken {
            uuid: token_uuid,
            user_uuid,
            role,
            token,
        })
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_api_token(token_uuid)
            .await
            .map(|rows_affected| rows_affected > 0)
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Identity, AuthServiceError> {
        let parsed = parse_api_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let token = self
            .repository
            .find_active_api_token(parsed.token_uuid, &parsed.secret)
            .await
            .map_err(AuthServiceError::from)?
            .ok_or(AuthServiceError::NotFound)?;

        if token.version != parsed.version {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort metadata update; auth success should not depend on this write.
        let _touch_result = self
            .repository
            .touch_api_token_last_used(parsed.token_uuid)
            .await;

        Ok(Identity::new(token.user_uuid, token.role))
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Identity, AuthServiceError>;
}

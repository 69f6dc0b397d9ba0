//! Auth data models.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::ApiTokenVersion;

/// Caller identity resolved from a bearer token.
///
/// Passed explicitly into every service operation that needs to make an
/// ownership or role decision — there is no ambient request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user: Uuid,
    pub role: Role,
}

impl Identity {
    #[must_use]
    pub const fn new(user: Uuid, role: Role) -> Self {
        Self { user, role }
    }
}

/// Caller role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Seller,
    Admin,
}

#[derive(Debug, Error)]
#[error("unknown role")]
pub struct UnknownRoleError;

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Seller => "seller",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "seller" => Ok(Self::Seller),
            "admin" => Ok(Self::Admin),
            _ => Err(UnknownRoleError),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API token data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ApiToken {
    /// User that owns this API token.
    pub user_uuid: Uuid,

    /// Role granted to the token's bearer.
    pub role: Role,

    /// Token format version.
    pub version: ApiTokenVersion,
}

/// New API token persistence payload.
#[derive(Debug, Clone)]
pub struct NewApiToken {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub role: Role,
    pub version: ApiTokenVersion,
    pub expires_at: Option<Timestamp>,
}

/// API token issuance result with one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub role: Role,
    pub token: String,
}

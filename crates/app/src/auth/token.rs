//! API token formatting and parsing.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

/// API token identifier prefix.
pub const API_TOKEN_PREFIX: &str = "sf";

/// Number of secret bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

const API_TOKEN_SECRET_HEX_CHARS: usize = API_TOKEN_SECRET_BYTES * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenVersion {
    V1,
}

impl ApiTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for ApiTokenVersion {
    type Error = ApiTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

impl FromStr for ApiTokenVersion {
    type Err = ApiTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

/// Hex-encoded token secret material.
///
/// The storage layer only ever sees this hex string; it is digested
/// inside the database when a token is created or verified, so the
/// secret itself is never persisted.
#[derive(Clone)]
pub struct ApiTokenSecret {
    hex: String,
}

impl ApiTokenSecret {
    #[must_use]
    pub fn as_hex(&self) -> &str {
        &self.hex
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != API_TOKEN_SECRET_HEX_CHARS
            || !hex.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return None;
        }

        Some(Self {
            hex: hex.to_ascii_lowercase(),
        })
    }
}

impl fmt::Debug for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenSecret(**redacted**)")?;
        Ok(())
    }
}

impl Drop for ApiTokenSecret {
    fn drop(&mut self) {
        self.hex.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedApiToken {
    pub token_uuid: Uuid,
    pub version: ApiTokenVersion,
    pub secret: ApiTokenSecret,
}

#[derive(Debug, Error)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token uses an unsupported version")]
    UnsupportedVersion,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn generate_api_token_secret() -> ApiTokenSecret {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut bytes = [0_u8; API_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut bytes);

    let mut hex = String::with_capacity(API_TOKEN_SECRET_HEX_CHARS);

    for byte in bytes {
        hex.push(HEX[(byte >> 4) as usize] as char);
        hex.push(HEX[(byte & 0x0f) as usize] as char);
    }

    bytes.zeroize();

    ApiTokenSecret { hex }
}

#[must_use]
pub fn format_api_token(
    token_uuid: Uuid,
    version: ApiTokenVersion,
    secret: &ApiTokenSecret,
) -> String {
    format!(
        "{API_TOKEN_PREFIX}_{}_{}.{}",
        version.segment(),
        token_uuid.simple(),
        secret.as_hex()
    )
}

/// Split a presented bearer token into its uuid, version, and secret.
///
/// # Errors
///
/// Returns an error when the token does not match the
/// `sf_<version>_<uuid>.<secret-hex>` shape.
pub fn parse_api_token(token: &str) -> Result<ParsedApiToken, ApiTokenError> {
    let (prefix_and_id, secret_hex) = token.split_once('.').ok_or(ApiTokenError::InvalidFormat)?;

    let mut id_parts = prefix_and_id.splitn(3, '_');

    let prefix = id_parts.next().ok_or(ApiTokenError::InvalidFormat)?;
    let version_segment = id_parts.next().ok_or(ApiTokenError::InvalidFormat)?;
    let token_uuid_segment = id_parts.next().ok_or(ApiTokenError::InvalidFormat)?;

    if prefix != API_TOKEN_PREFIX {
        return Err(ApiTokenError::InvalidFormat);
    }

    let version = ApiTokenVersion::from_str(version_segment)?;

    let token_uuid =
        Uuid::try_parse(token_uuid_segment).map_err(|_| ApiTokenError::InvalidFormat)?;

    let secret =
        ApiTokenSecret::from_hex(secret_hex).ok_or(ApiTokenError::InvalidSecretEncoding)?;

    Ok(ParsedApiToken {
        token_uuid,
        version,
        secret,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_format_round_trip() {
        let token_uuid = Uuid::nil();
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, ApiTokenVersion::V1, &secret);
        let parsed = parse_api_token(&token).expect("token should parse");

        assert_eq!(parsed.token_uuid, token_uuid);
        assert_eq!(parsed.version, ApiTokenVersion::V1);
        assert_eq!(parsed.secret.as_hex(), secret.as_hex());
    }

    #[test]
    fn parse_rejects_invalid_prefix() {
        let secret = "ab".repeat(API_TOKEN_SECRET_BYTES);

        assert!(parse_api_token(&format!("nope_v1_00000000000000000000000000000000.{secret}")).is_err());
    }

    #[test]
    fn parse_rejects_unsupported_version() {
        let secret = "ab".repeat(API_TOKEN_SECRET_BYTES);

        assert!(matches!(
            parse_api_token(&format!("sf_v9_00000000000000000000000000000000.{secret}")),
            Err(ApiTokenError::UnsupportedVersion)
        ));
    }

    #[test]
    fn parse_rejects_short_secret() {
        assert!(matches!(
            parse_api_token("sf_v1_00000000000000000000000000000000.abcd"),
            Err(ApiTokenError::InvalidSecretEncoding)
        ));
    }

    #[test]
    fn parse_rejects_non_hex_secret() {
        let secret = "zz".repeat(API_TOKEN_SECRET_BYTES);

        assert!(matches!(
            parse_api_token(&format!("sf_v1_00000000000000000000000000000000.{secret}")),
            Err(ApiTokenError::InvalidSecretEncoding)
        ));
    }

    #[test]
    fn generated_secrets_differ() {
        let one = generate_api_token_secret();
        let two = generate_api_token_secret();

        assert_ne!(one.as_hex(), two.as_hex(), "secrets must not repeat");
    }
}

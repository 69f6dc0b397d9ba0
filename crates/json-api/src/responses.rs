//! Response envelope shared by every API route.
//!
//! Successful responses carry `{ "success": true, "data": ... }`, list
//! responses add a `pagination` block, and failures carry either a
//! `message` or field-level `errors`.

use salvo::{
    Response,
    http::StatusCode,
    writing::{Json, Scribe},
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::pagination::Paginated;

/// Envelope for a single resource.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub(crate) fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Envelope for a paginated collection.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ListResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: PaginationBlock,
}

impl<T> ListResponse<T> {
    pub(crate) fn new<S>(page: Paginated<S>, map: impl Fn(S) -> T) -> Self {
        let pagination = PaginationBlock {
            page: page.page,
            limit: page.limit,
            total: page.total,
            pages: page.pages,
        };

        Self {
            success: true,
            data: page.items.into_iter().map(map).collect(),
            pagination,
        }
    }
}

/// Pagination block attached to list responses.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct PaginationBlock {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u64,
}

/// Envelope for message-only successes.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub(crate) fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ErrorMessageBody {
    success: bool,
    message: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ErrorFieldsBody {
    success: bool,
    errors: Vec<FieldError>,
}

#[derive(Debug)]
enum ErrorBody {
    Message(String),
    Fields(Vec<FieldError>),
}

/// An error response: HTTP status plus the failure envelope.
#[derive(Debug)]
pub(crate) struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody::Message(message.into()),
        }
    }

    pub(crate) fn validation(errors: Vec<FieldError>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody::Fields(errors),
        }
    }

    pub(crate) fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            body: ErrorBody::Message(message.into()),
        }
    }

    pub(crate) fn forbidden(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            body: ErrorBody::Message(message.into()),
        }
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: ErrorBody::Message(message.into()),
        }
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            body: ErrorBody::Message(message.into()),
        }
    }

    /// Generic internal error; details stay in the server log.
    pub(crate) fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody::Message("Server error".to_string()),
        }
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);

        match self.body {
            ErrorBody::Message(message) => res.render(Json(ErrorMessageBody {
                success: false,
                message,
            })),
            ErrorBody::Fields(errors) => res.render(Json(ErrorFieldsBody {
                success: false,
                errors,
            })),
        }
    }
}

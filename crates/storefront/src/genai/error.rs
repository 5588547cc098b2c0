//! Error types for the generative model client.

use reqwest::StatusCode;
use thiserror::Error;

/// Why a call needs a (different) visitor credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// A pro-tier call was requested without a credential.
    Missing,
    /// The credential cannot be sent as a header value.
    Malformed,
    /// The API refused the credential.
    Rejected(StatusCode),
}

/// Errors that can occur when calling the generative model API.
#[derive(Debug, Error)]
pub enum GenAiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The visitor must select an API key before retrying.
    #[error("authorization required: {0:?}")]
    AuthorizationRequired(AuthFailure),

    /// Rate limited by the API.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The API returned an error.
    #[error("API error {code} ({status}): {message}")]
    Api {
        /// HTTP status code.
        code: u16,
        /// Canonical status, e.g. `INVALID_ARGUMENT`.
        status: String,
        message: String,
    },

    /// The response held no usable content.
    #[error("empty response: {0}")]
    EmptyResponse(String),

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Failed to render a prompt template.
    #[error("prompt error: {0}")]
    Prompt(#[from] askama::Error),
}

impl GenAiError {
    /// Whether the visitor should be asked for a credential.
    #[must_use]
    pub const fn is_authorization_required(&self) -> bool {
        matches!(self, Self::AuthorizationRequired(_))
    }
}

/// Error body returned by the API.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    /// Canonical status, e.g. `PERMISSION_DENIED`.
    #[serde(default)]
    pub status: String,
}

/// Canonical statuses that mean the key itself was refused.
const AUTH_STATUSES: &[&str] = &["UNAUTHENTICATED", "PERMISSION_DENIED"];

/// Whether an error response means the credential was refused.
///
/// 401 and 403 always do. On the pro tier a 404 does too: the preview model
/// is only visible to keys from projects that enabled it. A 400 whose
/// canonical status is an auth status also counts, which covers malformed keys.
#[must_use]
pub fn is_auth_rejection(status: StatusCode, api_status: Option<&str>, pro_tier: bool) -> bool {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => true,
        StatusCode::NOT_FOUND => pro_tier,
        _ => api_status.is_some_and(|s| AUTH_STATUSES.contains(&s)),
    }
}

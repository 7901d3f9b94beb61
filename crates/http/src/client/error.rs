//! Client error types

use linkqr_core::CoreError;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// The server answered 401 (bad credentials, or a retried request still unauthorized)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The session expired and could not be refreshed; the login surface was requested
    #[error("Session expired, please log in again")]
    Unauthenticated,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The server rejected the request body
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Input rejected before anything was sent
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// A header name or value in a request descriptor is not valid HTTP
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            422 => Self::Validation(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Whether the user has to authenticate again before retrying
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::AuthenticationFailed(_))
    }
}

/// Pull a human readable message out of an error body
///
/// The backend answers errors as `{"detail": ...}` where `detail` is either a
/// string or a list of validation problems. Anything else is returned as-is.
pub(crate) fn error_message(status: reqwest::StatusCode, body: String) -> String {
    if body.trim().is_empty() {
        return status.to_string();
    }

    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(serde_json::Value::Object(mut map)) => match map.remove("detail") {
            Some(serde_json::Value::String(detail)) => detail,
            Some(detail) => detail.to_string(),
            None => body,
        },
        _ => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_mapping() {
        let msg = || "boom".to_string();
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_REQUEST, msg()),
            ClientError::BadRequest(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::UNAUTHORIZED, msg()),
            ClientError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::FORBIDDEN, msg()),
            ClientError::Forbidden(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::NOT_FOUND, msg()),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::UNPROCESSABLE_ENTITY, msg()),
            ClientError::Validation(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_GATEWAY, msg()),
            ClientError::ServerError { status: 502, .. }
        ));
    }

    #[test]
    fn test_auth_expired() {
        assert!(ClientError::Unauthenticated.is_auth_expired());
        assert!(ClientError::AuthenticationFailed("x".into()).is_auth_expired());
        assert!(!ClientError::Forbidden("x".into()).is_auth_expired());
    }

    #[test]
    fn test_error_message_extracts_detail() {
        let status = StatusCode::NOT_FOUND;
        assert_eq!(
            error_message(status, r#"{"detail":"QR code not found"}"#.into()),
            "QR code not found"
        );
        assert_eq!(
            error_message(status, r#"{"detail":[{"msg":"bad"}]}"#.into()),
            r#"[{"msg":"bad"}]"#
        );
        assert_eq!(error_message(status, "plain text".into()), "plain text");
        assert_eq!(error_message(status, String::new()), "404 Not Found");
    }
}

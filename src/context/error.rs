//! Errors returned by context operations.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::form::{BindError, FormError};

/// Everything a [`Context`](crate::Context) operation can fail with.
#[derive(Debug, Error)]
pub enum ContextError {
    /// Reading the request body failed.
    #[error("failed to read request body: {0}")]
    Body(String),

    /// Query or body could not be decoded as a form.
    #[error(transparent)]
    Form(#[from] FormError),

    /// A field failed validation or coercion.
    #[error(transparent)]
    Bind(#[from] BindError),

    /// Header name or value rejected by the HTTP layer.
    #[error("invalid header: {0}")]
    Header(String),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML encoding failed: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("ASN.1 encoding failed: {0}")]
    Asn1(rasn::error::EncodeError),
}

// `rasn::error::EncodeError` does not implement `std::error::Error`, so
// thiserror's `#[from]` (which implies `#[source]`) cannot be used here.
impl From<rasn::error::EncodeError> for ContextError {
    fn from(err: rasn::error::EncodeError) -> Self {
        ContextError::Asn1(err)
    }
}

impl ContextError {
    /// Status used when the error is sent back to the client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ContextError::Body(_) => StatusCode::BAD_REQUEST,
            ContextError::Form(FormError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            ContextError::Form(_) => StatusCode::BAD_REQUEST,
            ContextError::Bind(BindError::Pattern { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            ContextError::Bind(_) => StatusCode::BAD_REQUEST,
            ContextError::Header(_)
            | ContextError::Json(_)
            | ContextError::Xml(_)
            | ContextError::Asn1(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ContextError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Handler failed");
        } else {
            tracing::warn!(status = %status, error = %self, "Rejected request");
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::ScanError;

    #[test]
    fn test_client_errors() {
        let err = ContextError::from(FormError::Semicolon);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = ContextError::from(FormError::TooLarge { limit: 1 });
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);

        let err = ContextError::from(BindError::Validation {
            field: "email",
            message: "email is required".into(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "email is required");
    }

    #[test]
    fn test_scan_error_displays_parse_error() {
        let err = ContextError::from(BindError::Scan {
            field: "age",
            source: ScanError::Bool {
                value: "maybe".into(),
            },
        });
        assert_eq!(err.to_string(), "parsing \"maybe\": invalid boolean syntax");
    }

    #[test]
    fn test_server_errors() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = ContextError::from(BindError::Pattern { field: "x", source });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let header = ContextError::Header("bad".into());
        assert_eq!(header.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_encoder_errors_convert() {
        fn converts<E>(_: fn(E) -> ContextError) {}
        converts::<serde_json::Error>(ContextError::from);
        converts::<quick_xml::DeError>(ContextError::from);
        converts::<rasn::error::EncodeError>(ContextError::from);
    }
}

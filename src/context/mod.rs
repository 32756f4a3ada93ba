//! Request/response context for handlers.
//!
//! # Data Flow
//! ```text
//! axum Request
//!     → Context::from_request (buffer body, pick up ContextConfig extension)
//!     → handler: parse_valid_form / bind_form, status, head, json / xml / asn1
//!     → Context::into_response (status + headers + buffered body)
//! ```
//!
//! # Design Decisions
//! - The response is buffered; status and headers may be set in any order
//! - Encoders set `Content-Type` only after encoding succeeded, then write
//! - The form is parsed on first use and cached for the rest of the request
//! - An oversized body is not an extraction error; it fails form parsing only

mod error;
mod writer;

pub use error::ContextError;
pub use writer::ResponseWriter;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{header, request::Parts, HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use serde::Serialize;

use crate::config::ContextConfig;
use crate::form::{BindForm, FormValues};
use crate::render::{self, Format};

/// A request paired with the response being built for it.
#[derive(Debug)]
pub struct Context {
    parts: Parts,
    body: Option<Bytes>,
    form: Option<FormValues>,
    config: ContextConfig,
    writer: ResponseWriter,
}

impl Context {
    /// Wrap an already buffered request. `body` is `None` when it was too
    /// large to buffer.
    pub fn new(parts: Parts, body: Option<Bytes>, config: ContextConfig) -> Self {
        Self {
            parts,
            body,
            form: None,
            config,
            writer: ResponseWriter::new(),
        }
    }

    pub fn request(&self) -> &Parts {
        &self.parts
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn response(&self) -> &ResponseWriter {
        &self.writer
    }

    /// Query and urlencoded body values, parsed on first call.
    pub fn form(&mut self) -> Result<&FormValues, ContextError> {
        let values = match self.form.take() {
            Some(values) => values,
            None => FormValues::from_request(
                &self.parts,
                self.body.as_deref(),
                self.config.form.max_body_bytes,
            )
            .inspect_err(|err| tracing::debug!(error = %err, "Malformed form"))?,
        };
        Ok(&*self.form.insert(values))
    }

    /// First form value for `name`, `""` when absent.
    pub fn form_value(&mut self, name: &str) -> Result<&str, ContextError> {
        Ok(self.form()?.value(name))
    }

    /// Parse the form and bind it into `input`, validating each field.
    ///
    /// Fields bound before a failing field keep their new values.
    pub fn parse_valid_form<T: BindForm>(&mut self, input: &mut T) -> Result<(), ContextError> {
        let values = self.form()?;
        T::schema().bind(input, values)?;
        Ok(())
    }

    /// Parse the form into a fresh `T`.
    pub fn bind_form<T: BindForm + Default>(&mut self) -> Result<T, ContextError> {
        let mut input = T::default();
        self.parse_valid_form(&mut input)?;
        Ok(input)
    }

    /// Write `value` as JSON with `Content-Type: application/json`.
    pub fn json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ContextError> {
        let body = render::json::encode(value, self.config.render.escape_html)?;
        self.emit(Format::Json, &body);
        Ok(())
    }

    /// Write `value` as XML with `Content-Type: application/xml`.
    pub fn xml<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ContextError> {
        let body = render::xml::encode(value, self.config.render.xml_declaration)?;
        self.emit(Format::Xml, &body);
        Ok(())
    }

    /// Write `value` as DER with `Content-Type: application/asn1`.
    pub fn asn1<T: rasn::Encode>(&mut self, value: &T) -> Result<(), ContextError> {
        let body = render::asn1::encode(value)?;
        self.emit(Format::Asn1, &body);
        Ok(())
    }

    /// Set the response status.
    pub fn status(&mut self, code: StatusCode) {
        self.writer.set_status(code);
    }

    /// Add a response header value.
    pub fn head(&mut self, key: &str, value: &str) -> Result<(), ContextError> {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| ContextError::Header(format!("{key:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ContextError::Header(format!("{key}={value:?}: {e}")))?;
        self.writer.append_header(name, value);
        Ok(())
    }

    /// Append raw bytes to the response body.
    pub fn write(&mut self, bytes: &[u8]) {
        self.writer.write(bytes);
    }

    fn emit(&mut self, format: Format, body: &[u8]) {
        self.writer.set_header(
            header::CONTENT_TYPE,
            HeaderValue::from_static(format.content_type()),
        );
        self.writer.write(body);
        tracing::trace!(format = %format, bytes = body.len(), "Response body encoded");
    }
}

impl<S> FromRequest<S> for Context
where
    S: Send + Sync,
{
    type Rejection = ContextError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let config = parts
            .extensions
            .get::<ContextConfig>()
            .cloned()
            .unwrap_or_default();

        let limit = config.form.max_body_bytes;
        let body = match Limited::new(body, limit).collect().await {
            Ok(collected) => Some(collected.to_bytes()),
            Err(err) if err.is::<LengthLimitError>() => {
                tracing::debug!(limit, "Request body over limit, not buffered");
                None
            }
            Err(err) => return Err(ContextError::Body(err.to_string())),
        };

        Ok(Self::new(parts, body, config))
    }
}

impl IntoResponse for Context {
    fn into_response(self) -> Response {
        self.writer.into_response()
    }
}

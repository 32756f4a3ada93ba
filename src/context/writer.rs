//! Buffered response writer.
//!
//! Status, headers and body accumulate in memory and become an axum
//! `Response` once the handler returns, so the order in which a handler sets
//! them does not matter.

use axum::body::Body;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::Response;

#[derive(Debug, Clone)]
pub struct ResponseWriter {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Add a value, keeping any already present under `name`.
    pub fn append_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.append(name, value);
    }

    /// Replace every value under `name`.
    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn write(&mut self, bytes: &[u8]) {
        self.body.extend_from_slice(bytes);
    }

    pub fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn test_defaults_to_ok() {
        let writer = ResponseWriter::new();
        assert_eq!(writer.status(), StatusCode::OK);
        assert!(writer.headers().is_empty());
        assert!(writer.body().is_empty());
    }

    #[test]
    fn test_append_keeps_values() {
        let mut writer = ResponseWriter::new();
        writer.append_header(header::VARY, HeaderValue::from_static("Accept"));
        writer.append_header(header::VARY, HeaderValue::from_static("Cookie"));
        assert_eq!(writer.headers().get_all(header::VARY).iter().count(), 2);

        writer.set_header(header::VARY, HeaderValue::from_static("Origin"));
        assert_eq!(writer.headers().get_all(header::VARY).iter().count(), 1);
    }

    #[test]
    fn test_into_response() {
        let mut writer = ResponseWriter::new();
        writer.write(b"gone");
        writer.set_status(StatusCode::GONE);
        writer.set_header(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        let response = writer.into_response();
        assert_eq!(response.status(), StatusCode::GONE);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
    }
}

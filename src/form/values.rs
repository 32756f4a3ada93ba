//! Submitted form values.
//!
//! # Responsibilities
//! - Decode `application/x-www-form-urlencoded` pairs (query string and body)
//! - Reject malformed input instead of silently dropping it
//! - Merge body and query values with body values first
//!
//! # Design Decisions
//! - Values keep submission order; lookups return the first match
//! - A missing key reads as the empty string through [`FormValues::value`]
//! - Only `POST`, `PUT` and `PATCH` bodies are considered

use axum::http::{header, request::Parts, Method};
use thiserror::Error;
use url::form_urlencoded;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const OCTET_STREAM: &str = "application/octet-stream";

/// Errors raised while reading form values from a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A `%` was not followed by two hex digits.
    #[error("invalid URL escape {0:?}")]
    InvalidEscape(String),

    /// Pairs separated by `;` instead of `&`.
    #[error("invalid semicolon separator in form data")]
    Semicolon,

    /// The `Content-Type` header could not be parsed as a media type.
    #[error("malformed content type {0:?}")]
    ContentType(String),

    /// The request body exceeded the configured limit.
    #[error("form body too large (limit {limit} bytes)")]
    TooLarge { limit: usize },
}

/// Ordered multi-map of decoded form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pairs: Vec<(String, String)>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an urlencoded string such as a query or a form body.
    pub fn parse(input: &str) -> Result<Self, FormError> {
        let mut values = Self::new();
        values.extend_from(input)?;
        Ok(values)
    }

    /// Read the form of a request.
    ///
    /// `body` is `None` when the extractor gave up buffering because the body
    /// was over the limit; that only matters if the body turns out to be a form.
    pub fn from_request(
        parts: &Parts,
        body: Option<&[u8]>,
        max_body_bytes: usize,
    ) -> Result<Self, FormError> {
        let mut values = Self::new();

        if carries_form_body(&parts.method) && is_form_content(parts)? {
            let body = body.ok_or(FormError::TooLarge {
                limit: max_body_bytes,
            })?;
            if body.len() > max_body_bytes {
                return Err(FormError::TooLarge {
                    limit: max_body_bytes,
                });
            }
            values.extend_from(&String::from_utf8_lossy(body))?;
        }

        if let Some(query) = parts.uri.query() {
            values.extend_from(query)?;
        }

        Ok(values)
    }

    /// First value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First value submitted under `name`, or `""` when absent.
    pub fn value(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// Every value submitted under `name`, in order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn extend_from(&mut self, input: &str) -> Result<(), FormError> {
        for pair in input.split('&') {
            if pair.is_empty() {
                continue;
            }
            if pair.contains(';') {
                return Err(FormError::Semicolon);
            }
            check_escapes(pair)?;
            let (key, value) = form_urlencoded::parse(pair.as_bytes())
                .next()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .unwrap_or_default();
            self.pairs.push((key, value));
        }
        Ok(())
    }
}

fn carries_form_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

/// Whether the request declares an urlencoded body.
fn is_form_content(parts: &Parts) -> Result<bool, FormError> {
    let raw = match parts.headers.get(header::CONTENT_TYPE) {
        Some(value) => value
            .to_str()
            .map_err(|_| FormError::ContentType(String::from_utf8_lossy(value.as_bytes()).into()))?,
        None => OCTET_STREAM,
    };
    let media_type = media_type(raw)?;
    Ok(media_type == FORM_URLENCODED)
}

/// Lower-cased `type/subtype` of a `Content-Type` value, parameters dropped.
fn media_type(raw: &str) -> Result<String, FormError> {
    let essence = raw.split(';').next().unwrap_or("").trim();
    let malformed = || FormError::ContentType(raw.to_string());

    let (kind, subtype) = essence.split_once('/').ok_or_else(malformed)?;
    let is_token = |s: &str| !s.is_empty() && s.bytes().all(is_token_byte);
    if !is_token(kind) || !is_token(subtype) {
        return Err(malformed());
    }

    Ok(essence.to_ascii_lowercase())
}

/// RFC 2045 token character: visible ASCII other than the tspecials.
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?=".contains(&b)
}

fn check_escapes(pair: &str) -> Result<(), FormError> {
    let bytes = pair.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                let end = (i + 3).min(bytes.len());
                return Err(FormError::InvalidEscape(
                    String::from_utf8_lossy(&bytes[i..end]).into_owned(),
                ));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

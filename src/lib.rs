//! Request/response context helpers for axum handlers.
//!
//! A [`Context`] wraps one request and the response being built for it. It
//! binds submitted form fields onto typed structs (with per-field regex
//! validation) and writes JSON, XML or ASN.1 bodies with the matching
//! `Content-Type`.

pub mod config;
pub mod context;
pub mod form;
pub mod http;
pub mod lifecycle;
pub mod render;

pub use config::ZenConfig;
pub use context::{Context, ContextError};
pub use form::{BindForm, Field, FormSchema, FormValues};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use render::Format;

//! Demo HTTP server.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum Router, TraceLayer, ContextConfig extension)
//!     → handlers.rs (Context extractor → bind form → encode)
//!     → Send to client
//! ```
//!
//! Routing and connection handling stay with axum; this module only shows
//! the context helpers wired into a real server.

pub mod handlers;
pub mod server;

pub use handlers::SignUp;
pub use server::HttpServer;

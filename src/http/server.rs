//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the demo handlers
//! - Hand every request its `ContextConfig` as an extension
//! - Wire up request tracing
//! - Serve until the shutdown signal fires

use axum::{
    routing::{any, get, post},
    Extension, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ZenConfig;
use crate::http::handlers;

/// Demo HTTP server exposing context-based handlers.
pub struct HttpServer {
    router: Router,
    config: ZenConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ZenConfig) -> Self {
        let router = Self::build_router(&config);
        Self { router, config }
    }

    fn build_router(config: &ZenConfig) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/signup/{format}", post(handlers::signup))
            .route("/echo", any(handlers::echo))
            .layer(Extension(config.context.clone()))
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for serving in-process (e.g. with `tower::ServiceExt::oneshot`).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            max_form_bytes = self.config.context.form.max_body_bytes,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ZenConfig {
        &self.config
    }
}

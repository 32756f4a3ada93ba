//! Shared utilities for integration tests.

use std::net::SocketAddr;
use tokio::net::TcpListener;

use zen::{HttpServer, Shutdown, ZenConfig};

pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Start the demo server on an ephemeral port.
///
/// The listener is bound before this returns, so requests can be sent
/// right away. Trigger the returned `Shutdown` to stop it.
pub async fn start_server(config: ZenConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Client that never goes through a proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// POST an urlencoded body.
pub async fn post_form(addr: SocketAddr, path: &str, body: &'static str) -> reqwest::Response {
    client()
        .post(format!("http://{}{}", addr, path))
        .header("content-type", FORM_URLENCODED)
        .body(body)
        .send()
        .await
        .expect("server unreachable")
}

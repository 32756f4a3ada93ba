//! In-process router tests (no listener).

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;
use zen::{HttpServer, ZenConfig};

async fn call(config: ZenConfig, request: Request<Body>) -> (StatusCode, String, String) {
    let response = HttpServer::new(config)
        .router()
        .oneshot(request)
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_echo_escapes_html_by_default() {
    let request = Request::get("/echo?q=%3Cb%3E%26").body(Body::empty()).unwrap();
    let (status, content_type, body) = call(ZenConfig::default(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    assert_eq!(body, "[[\"q\",\"\\u003cb\\u003e\\u0026\"]]\n");
}

#[tokio::test]
async fn test_echo_without_html_escaping() {
    let mut config = ZenConfig::default();
    config.context.render.escape_html = false;

    let request = Request::get("/echo?q=%3Cb%3E").body(Body::empty()).unwrap();
    let (_, _, body) = call(config, request).await;
    assert_eq!(body, "[[\"q\",\"<b>\"]]\n");
}

#[tokio::test]
async fn test_echo_body_before_query() {
    let request = Request::post("/echo?b=2")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("a=1"))
        .unwrap();
    let (_, _, body) = call(ZenConfig::default(), request).await;
    assert_eq!(body, "[[\"a\",\"1\"],[\"b\",\"2\"]]\n");
}

#[tokio::test]
async fn test_semicolon_query_rejected() {
    let request = Request::get("/echo?a=1;b=2").body(Body::empty()).unwrap();
    let (status, _, body) = call(ZenConfig::default(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "invalid semicolon separator in form data");
}

#[tokio::test]
async fn test_xml_declaration_from_config() {
    let mut config = ZenConfig::default();
    config.context.render.xml_declaration = true;

    let request = Request::post("/signup/xml")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=ken&email=ken%40bell-labs.com&age=80"))
        .unwrap();
    let (status, content_type, body) = call(config, request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(content_type, "application/xml");
    assert!(body.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<SignUp>"), "{body}");
}

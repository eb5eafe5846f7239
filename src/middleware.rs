// ABOUTME: Response header middleware for the JSON API
// ABOUTME: Disables MIME sniffing, framing and caching of API responses

use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

pub async fn api_headers(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );

    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

    // Responses carry session-dependent data
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    response
}

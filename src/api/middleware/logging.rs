//! Request logging with credential redaction

use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};
use tracing::info;

/// Headers worth logging. Anything else is dropped so log lines stay short.
const LOGGED_HEADERS: [&str; 8] = [
    "content-type",
    "content-length",
    "accept",
    "user-agent",
    "x-request-id",
    "x-forwarded-for",
    "x-real-ip",
    "authorization",
];

/// Emit one log line when a request arrives and one when it finishes.
///
/// `TraceLayer` already opens a span per request; this function only
/// records events inside it, with the request id and redacted headers.
pub async fn log_requests(request: Request<Body>, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let route = route_template(&request);
    let request_id = request_id(&request);
    let headers = loggable_headers(&request);

    info!(%method, %route, %request_id, headers, "Request received");

    let response = next.run(request).await;

    info!(
        %method,
        %route,
        %request_id,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Request finished"
    );

    response
}

/// Matched route template (`/users/{id}` rather than `/users/42`) when
/// available, raw path otherwise.
fn route_template(request: &Request<Body>) -> String {
    match request.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_string(),
        None => request.uri().path().to_string(),
    }
}

/// Caller-supplied `x-request-id`, or a fresh UUID when absent
fn request_id(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// Render the whitelisted headers as `name=value` pairs.
///
/// Credential-bearing headers appear as `[REDACTED]`; a bearer token
/// must never reach the logs.
fn loggable_headers(request: &Request<Body>) -> String {
    let mut rendered = Vec::new();

    for name in LOGGED_HEADERS {
        let Some(value) = request.headers().get(name) else {
            continue;
        };

        if is_credential_header(name) {
            rendered.push(format!("{name}=[REDACTED]"));
        } else {
            rendered.push(format!("{name}={}", value.to_str().unwrap_or("[invalid]")));
        }
    }

    rendered.join(", ")
}

fn is_credential_header(name: &str) -> bool {
    matches!(
        name,
        "authorization" | "cookie" | "set-cookie" | "proxy-authorization"
    )
}

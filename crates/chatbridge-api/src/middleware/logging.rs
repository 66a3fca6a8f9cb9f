use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

/// One log line per HTTP request
///
/// Chat socket handshakes go to debug: the line only covers the upgrade,
/// the bridge logs the connection itself under its `connection_id`.
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let upgrade = is_websocket_upgrade(req.headers());
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    if upgrade {
        tracing::debug!(%method, %path, %status, elapsed_ms, "Chat socket handshake");
    } else if status.is_server_error() {
        tracing::warn!(%method, %path, %status, elapsed_ms, "Request failed");
    } else {
        tracing::info!(%method, %path, %status, elapsed_ms, "Request processed");
    }

    response
}

fn is_websocket_upgrade(headers: &HeaderMap) -> bool {
    headers
        .get(header::UPGRADE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.eq_ignore_ascii_case("websocket"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_websocket_upgrade_detected() {
        let mut headers = HeaderMap::new();
        headers.insert(header::UPGRADE, HeaderValue::from_static("WebSocket"));
        assert!(is_websocket_upgrade(&headers));
    }

    #[test]
    fn test_plain_request_is_not_upgrade() {
        let mut headers = HeaderMap::new();
        assert!(!is_websocket_upgrade(&headers));

        headers.insert(header::UPGRADE, HeaderValue::from_static("h2c"));
        assert!(!is_websocket_upgrade(&headers));
    }
}

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use chatbridge_persist::UserId;

use crate::state::AppState;

/// Resolve the caller's identity from the trusted auth header
///
/// Authentication happens upstream; this only lifts the numeric user id into
/// request extensions. Requests without one pass through unchanged.
pub async fn resolve_user(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(user_id) = user_id_from_headers(req.headers(), &state.config.auth.user_id_header) {
        req.extensions_mut().insert(user_id);
    }

    next.run(req).await
}

pub fn user_id_from_headers(headers: &HeaderMap, header_name: &str) -> Option<UserId> {
    let raw = headers.get(header_name)?;

    match raw.to_str().ok().and_then(|value| value.trim().parse::<u64>().ok()) {
        Some(id) => Some(UserId(id)),
        None => {
            tracing::warn!(header = header_name, "Ignoring unparsable user id header");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_header_present() {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", HeaderValue::from_static("42"));

        assert_eq!(user_id_from_headers(&headers, "x-user-id"), Some(UserId(42)));
    }

    #[test]
    fn test_header_missing() {
        assert_eq!(user_id_from_headers(&HeaderMap::new(), "x-user-id"), None);
    }

    #[test]
    fn test_header_not_numeric() {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", HeaderValue::from_static("alice"));

        assert_eq!(user_id_from_headers(&headers, "x-user-id"), None);
    }

    #[test]
    fn test_custom_header_name() {
        let mut headers = HeaderMap::new();
        headers.insert("x-authenticated-user", HeaderValue::from_static(" 7 "));

        assert_eq!(user_id_from_headers(&headers, "x-authenticated-user"), Some(UserId(7)));
        assert_eq!(user_id_from_headers(&headers, "x-user-id"), None);
    }
}

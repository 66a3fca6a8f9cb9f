use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
    Extension,
};
use std::sync::Arc;

use chatbridge_persist::UserId;

use crate::bridge::{ChatBridge, WebSocketConnection};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Upgrade to a chat WebSocket
///
/// Every text frame sent by the client is one turn. A successful turn is
/// answered with `{"id", "user_id", "content", "reply"}`; a failed turn gets
/// no frame at all.
#[utoipa::path(
    get,
    path = "/ws/chat",
    responses(
        (status = 101, description = "Switching to the chat WebSocket"),
        (status = 401, description = "No user identity and identity is required")
    ),
    tag = "chat"
)]
pub async fn chat_socket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    identity: Option<Extension<UserId>>,
) -> ApiResult<Response> {
    let user_id = identity.map(|Extension(user_id)| user_id);

    if user_id.is_none() && state.config.bridge.require_identity {
        return Err(ApiError::Unauthorized("missing user identity".to_string()));
    }

    let bridge = ChatBridge::from_state(&state);

    Ok(ws.on_upgrade(move |socket| async move {
        bridge.serve(WebSocketConnection::new(socket), user_id).await;
    }))
}

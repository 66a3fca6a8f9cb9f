use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use thiserror::Error;

/// Failure on the client connection itself; always ends the connection
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Receive failed: {0}")]
    Receive(String),

    #[error("Send failed: {0}")]
    Send(String),
}

/// Text-message view of a bidirectional client connection
#[async_trait]
pub trait ChatConnection: Send {
    /// Wait for the next text message; `Ok(None)` once the peer has closed
    async fn recv_text(&mut self) -> Result<Option<String>, ConnectionError>;

    async fn send_text(&mut self, text: String) -> Result<(), ConnectionError>;

    /// Close the connection; errors are not interesting at this point
    async fn close(&mut self);
}

/// Axum WebSocket adapter
pub struct WebSocketConnection {
    socket: WebSocket,
}

impl WebSocketConnection {
    pub fn new(socket: WebSocket) -> Self {
        Self { socket }
    }
}

#[async_trait]
impl ChatConnection for WebSocketConnection {
    async fn recv_text(&mut self) -> Result<Option<String>, ConnectionError> {
        loop {
            match self.socket.recv().await {
                Some(Ok(Message::Text(text))) => return Ok(Some(text)),
                Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes) {
                    Ok(text) => return Ok(Some(text)),
                    Err(_) => tracing::warn!("Ignoring binary frame that is not UTF-8"),
                },
                // Pings are answered by the socket itself
                Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {}
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Err(e)) => return Err(ConnectionError::Receive(e.to_string())),
            }
        }
    }

    async fn send_text(&mut self, text: String) -> Result<(), ConnectionError> {
        self.socket
            .send(Message::Text(text))
            .await
            .map_err(|e| ConnectionError::Send(e.to_string()))
    }

    async fn close(&mut self) {
        if let Err(e) = self.socket.send(Message::Close(None)).await {
            tracing::debug!("Close frame not sent: {}", e);
        }
    }
}

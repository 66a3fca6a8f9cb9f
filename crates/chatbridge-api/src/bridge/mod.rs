//! Per-connection chat loop
//!
//! A connection is served by exactly one task. Each inbound message runs a
//! full turn (inference, then persistence, then the reply frame) before the
//! next message is read, so replies leave in the order messages arrived.

pub mod connection;
pub mod registry;
pub mod turn;

pub use connection::{ChatConnection, ConnectionError, WebSocketConnection};
pub use registry::{ConnectionId, ConnectionInfo, ConnectionRegistry};
pub use turn::{run_turn, TurnOutcome};

use std::fmt;
use std::sync::Arc;

use chatbridge_llm::InferenceClient;
use chatbridge_persist::{ExchangeStore, UserId};

use crate::state::AppState;

/// Why a connection left the receive loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    ClientClosed,
    ReadFailed,
    WriteFailed,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            CloseReason::ClientClosed => "client_closed",
            CloseReason::ReadFailed => "read_failed",
            CloseReason::WriteFailed => "write_failed",
        };
        f.write_str(reason)
    }
}

#[derive(Clone)]
pub struct ChatBridge {
    inference: Arc<dyn InferenceClient>,
    store: Arc<dyn ExchangeStore>,
    registry: Arc<ConnectionRegistry>,
}

impl ChatBridge {
    pub fn new(
        inference: Arc<dyn InferenceClient>,
        store: Arc<dyn ExchangeStore>,
        registry: Arc<ConnectionRegistry>,
    ) -> Self {
        Self {
            inference,
            store,
            registry,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            Arc::clone(&state.inference),
            Arc::clone(&state.store),
            Arc::clone(&state.registry),
        )
    }

    /// Serve one connection until it closes or fails
    ///
    /// The connection is registered for exactly the duration of this call and
    /// is closed on every exit path.
    pub async fn serve<C: ChatConnection>(&self, mut conn: C, identity: Option<UserId>) -> CloseReason {
        let user_id = identity.unwrap_or_else(|| {
            tracing::warn!("User ID not found in session, recording exchanges as user 0");
            UserId::ANONYMOUS
        });

        let connection_id = self.registry.register(ConnectionInfo::new(identity)).await;
        tracing::info!(connection_id = %connection_id, user_id = %user_id, "Chat connection opened");

        let reason = self.receive_loop(&mut conn, connection_id, user_id).await;

        self.registry.deregister(connection_id).await;
        conn.close().await;

        tracing::info!(connection_id = %connection_id, reason = %reason, "Chat connection closed");
        reason
    }

    async fn receive_loop<C: ChatConnection>(
        &self,
        conn: &mut C,
        connection_id: ConnectionId,
        user_id: UserId,
    ) -> CloseReason {
        loop {
            let content = match conn.recv_text().await {
                Ok(Some(content)) => content,
                Ok(None) => return CloseReason::ClientClosed,
                Err(e) => {
                    tracing::warn!(connection_id = %connection_id, "Connection read failed: {}", e);
                    return CloseReason::ReadFailed;
                }
            };

            if content.is_empty() {
                tracing::debug!(connection_id = %connection_id, "Skipping empty message");
                continue;
            }

            let outcome = run_turn(self.inference.as_ref(), self.store.as_ref(), user_id, content).await;

            match outcome {
                TurnOutcome::Replied(exchange) => {
                    let frame = match serde_json::to_string(&exchange) {
                        Ok(frame) => frame,
                        Err(e) => {
                            tracing::error!(exchange_id = exchange.id, "Failed to encode reply: {}", e);
                            continue;
                        }
                    };

                    if let Err(e) = conn.send_text(frame).await {
                        tracing::warn!(connection_id = %connection_id, "Error sending response: {}", e);
                        return CloseReason::WriteFailed;
                    }

                    tracing::debug!(
                        connection_id = %connection_id,
                        exchange_id = exchange.id,
                        "Reply sent"
                    );
                }
                TurnOutcome::InferenceFailed(e) => {
                    tracing::warn!(connection_id = %connection_id, "Inference failed, no reply for this turn: {}", e);
                }
                TurnOutcome::PersistenceFailed(e) => {
                    tracing::error!(connection_id = %connection_id, "Error saving exchange, reply withheld: {}", e);
                }
            }
        }
    }
}

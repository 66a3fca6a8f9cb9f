use chatbridge_llm::{InferenceClient, InferenceError};
use chatbridge_persist::{Exchange, ExchangeStore, NewExchange, PersistError, UserId};

/// Result of one inbound-message-to-reply cycle
#[derive(Debug)]
pub enum TurnOutcome {
    /// Reply generated and stored; the exchange is what the client receives
    Replied(Exchange),
    /// No reply was generated; nothing was stored
    InferenceFailed(InferenceError),
    /// A reply was generated but could not be stored; it is withheld
    PersistenceFailed(PersistError),
}

/// Generate a reply for `content`, then store the exchange
///
/// Persistence runs before anything is sent so the reply frame can carry the
/// stored id.
pub async fn run_turn(
    inference: &dyn InferenceClient,
    store: &dyn ExchangeStore,
    user_id: UserId,
    content: String,
) -> TurnOutcome {
    let reply = match inference.generate(&content).await {
        Ok(reply) => reply,
        Err(e) => return TurnOutcome::InferenceFailed(e),
    };

    match store.record(NewExchange::new(user_id, content, reply)).await {
        Ok(exchange) => TurnOutcome::Replied(exchange),
        Err(e) => TurnOutcome::PersistenceFailed(e),
    }
}

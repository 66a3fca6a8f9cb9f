use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Exchange, NewExchange};

/// Trait for the exchange log
///
/// Write-only from the relay's point of view: exchanges are created once and
/// never updated or deleted. Implementations assign the identifier.
#[async_trait]
pub trait ExchangeStore: Send + Sync {
    /// Durably store a completed exchange and return it with its new id
    async fn record(&self, exchange: NewExchange) -> Result<Exchange>;

    /// Check that the backing store is reachable
    async fn health_check(&self) -> Result<()>;
}

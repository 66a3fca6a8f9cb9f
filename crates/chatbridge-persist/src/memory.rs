use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::models::{Exchange, NewExchange};
use crate::store::ExchangeStore;

/// Process-local exchange log
///
/// Ids start at 1 and increase by one per stored exchange. Contents are lost
/// on restart.
#[derive(Debug, Default)]
pub struct InMemoryExchangeStore {
    inner: Mutex<MemoryLog>,
}

#[derive(Debug, Default)]
struct MemoryLog {
    last_id: u64,
    exchanges: Vec<Exchange>,
}

impl InMemoryExchangeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything stored so far, in insertion order
    pub async fn exchanges(&self) -> Vec<Exchange> {
        self.inner.lock().await.exchanges.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.exchanges.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ExchangeStore for InMemoryExchangeStore {
    async fn record(&self, exchange: NewExchange) -> Result<Exchange> {
        exchange.validate()?;

        let mut log = self.inner.lock().await;
        log.last_id += 1;
        let stored = exchange.into_exchange(log.last_id);
        log.exchanges.push(stored.clone());

        tracing::debug!(exchange_id = stored.id, user_id = %stored.user_id, "Exchange stored in memory");
        Ok(stored)
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistError;
    use crate::models::UserId;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_record_assigns_sequential_ids() {
        let store = InMemoryExchangeStore::new();

        let first = store.record(NewExchange::new(UserId(1), "A", "a")).await.unwrap();
        let second = store.record(NewExchange::new(UserId(2), "B", "b")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_record_stores_text_verbatim() {
        let store = InMemoryExchangeStore::new();

        let stored = store
            .record(NewExchange::new(UserId(3), "  Apa kabar?\n", "Baik!  "))
            .await
            .unwrap();

        let all = store.exchanges().await;
        assert_eq!(all, vec![stored]);
        assert_eq!(all[0].content, "  Apa kabar?\n");
        assert_eq!(all[0].reply, "Baik!  ");
        assert_eq!(all[0].user_id, UserId(3));
    }

    #[tokio::test]
    async fn test_empty_reply_is_not_stored() {
        let store = InMemoryExchangeStore::new();

        let result = store.record(NewExchange::new(UserId(1), "A", "")).await;

        assert!(matches!(result, Err(PersistError::InvalidExchange(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_concurrent_records_get_unique_ids() {
        let store = Arc::new(InMemoryExchangeStore::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .record(NewExchange::new(UserId(i), format!("m{}", i), "r"))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=16).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn test_health_check() {
        assert!(InMemoryExchangeStore::new().health_check().await.is_ok());
    }
}

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use chatbridge_persist::UserId;

pub type ConnectionId = Uuid;

/// What the registry knows about one open chat connection
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub user_id: Option<UserId>,
    pub connected_at: DateTime<Utc>,
}

impl ConnectionInfo {
    pub fn new(user_id: Option<UserId>) -> Self {
        Self {
            user_id,
            connected_at: Utc::now(),
        }
    }
}

/// Set of open chat connections
///
/// Mutated only on connection establishment and teardown. Nothing in the
/// message flow reads it; it is the hook for fan-out to connected clients.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: Mutex<HashMap<ConnectionId, ConnectionInfo>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection and return the handle used to remove it
    pub async fn register(&self, info: ConnectionInfo) -> ConnectionId {
        let id = Uuid::new_v4();
        self.connections.lock().await.insert(id, info);
        id
    }

    /// Remove a connection; returns false if it was not registered
    pub async fn deregister(&self, id: ConnectionId) -> bool {
        self.connections.lock().await.remove(&id).is_some()
    }

    pub async fn contains(&self, id: ConnectionId) -> bool {
        self.connections.lock().await.contains_key(&id)
    }

    /// Snapshot of one connection's info, for fan-out over connected clients
    pub async fn get(&self, id: ConnectionId) -> Option<ConnectionInfo> {
        self.connections.lock().await.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.connections.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_register_and_deregister() {
        let registry = ConnectionRegistry::new();

        let id = registry.register(ConnectionInfo::new(Some(UserId(7)))).await;

        assert!(registry.contains(id).await);
        assert_eq!(registry.len().await, 1);
        assert_eq!(registry.get(id).await.unwrap().user_id, Some(UserId(7)));

        assert!(registry.deregister(id).await);
        assert!(!registry.contains(id).await);
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_deregister_twice() {
        let registry = ConnectionRegistry::new();
        let id = registry.register(ConnectionInfo::new(None)).await;

        assert!(registry.deregister(id).await);
        assert!(!registry.deregister(id).await);
    }

    #[tokio::test]
    async fn test_each_registration_gets_its_own_handle() {
        let registry = Arc::new(ConnectionRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move { registry.register(ConnectionInfo::new(Some(UserId(i)))).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }

        assert_eq!(registry.len().await, 8);
        for id in ids {
            assert!(registry.deregister(id).await);
        }
        assert!(registry.is_empty().await);
    }
}

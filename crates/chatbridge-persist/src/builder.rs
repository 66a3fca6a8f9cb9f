use crate::dbs::mongo::MongoExchangeStore;
use crate::error::{PersistError, Result};

pub struct MongoExchangeStoreBuilder {
    mongodb_uri: Option<String>,
    database: Option<String>,
}

impl MongoExchangeStoreBuilder {
    pub fn new() -> Self {
        Self {
            mongodb_uri: None,
            database: None,
        }
    }

    pub fn mongodb_uri(mut self, uri: impl Into<String>) -> Self {
        self.mongodb_uri = Some(uri.into());
        self
    }

    pub fn database(mut self, db: impl Into<String>) -> Self {
        self.database = Some(db.into());
        self
    }

    pub async fn build(self) -> Result<MongoExchangeStore> {
        let mongodb_uri = self
            .mongodb_uri
            .ok_or_else(|| PersistError::Internal("mongodb_uri is required".to_string()))?;
        let database = self
            .database
            .ok_or_else(|| PersistError::Internal("database is required".to_string()))?;

        MongoExchangeStore::connect(&mongodb_uri, &database).await
    }
}

impl Default for MongoExchangeStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_requires_uri() {
        let result = MongoExchangeStoreBuilder::new().database("chat").build().await;
        match result {
            Err(PersistError::Internal(msg)) => assert!(msg.contains("mongodb_uri")),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("expected error"),
        }
    }

    #[tokio::test]
    async fn test_build_requires_database() {
        let result = MongoExchangeStoreBuilder::new()
            .mongodb_uri("mongodb://localhost:27017")
            .build()
            .await;
        match result {
            Err(PersistError::Internal(msg)) => assert!(msg.contains("database")),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("expected error"),
        }
    }
}

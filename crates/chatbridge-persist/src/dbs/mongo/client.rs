use async_trait::async_trait;
use mongodb::{bson::doc, Client, Database};

use crate::dbs::mongo::models::MongoExchange;
use crate::dbs::mongo::repositories::{MongoCounterRepository, MongoExchangeRepository};
use crate::error::{PersistError, Result};
use crate::models::{Exchange, NewExchange};
use crate::store::ExchangeStore;

const EXCHANGE_SEQUENCE: &str = "exchanges";

pub struct MongoExchangeStore {
    database: Database,
    exchange_repo: MongoExchangeRepository,
    counter_repo: MongoCounterRepository,
}

impl MongoExchangeStore {
    /// Connect to MongoDB and create store
    pub async fn connect(mongodb_uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        Ok(Self::from_client(&client, database))
    }

    pub fn from_client(client: &Client, database: &str) -> Self {
        Self {
            database: client.database(database),
            exchange_repo: MongoExchangeRepository::new(client, database),
            counter_repo: MongoCounterRepository::new(client, database),
        }
    }

    pub fn builder() -> crate::builder::MongoExchangeStoreBuilder {
        crate::builder::MongoExchangeStoreBuilder::new()
    }
}

#[async_trait]
impl ExchangeStore for MongoExchangeStore {
    async fn record(&self, exchange: NewExchange) -> Result<Exchange> {
        exchange.validate()?;

        // A failed insert burns its sequence value; ids stay unique, not gapless
        let id = self.counter_repo.next_value(EXCHANGE_SEQUENCE).await?;
        let mongo_exchange = MongoExchange::from_new(id, exchange)?;
        self.exchange_repo.insert_exchange(&mongo_exchange).await?;

        tracing::debug!(exchange_id = id, "Exchange stored in MongoDB");
        Exchange::try_from(mongo_exchange)
    }

    async fn health_check(&self) -> Result<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

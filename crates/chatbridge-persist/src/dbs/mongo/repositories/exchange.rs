use mongodb::{Client, Collection};

use crate::dbs::mongo::models::MongoExchange;
use crate::error::Result;

#[derive(Clone)]
pub struct MongoExchangeRepository {
    collection: Collection<MongoExchange>,
}

impl MongoExchangeRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("exchanges");
        Self { collection }
    }

    /// Insert a single exchange
    pub async fn insert_exchange(&self, exchange: &MongoExchange) -> Result<i64> {
        self.collection.insert_one(exchange).await?;
        Ok(exchange.id)
    }
}

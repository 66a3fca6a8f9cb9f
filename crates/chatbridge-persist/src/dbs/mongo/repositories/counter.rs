use mongodb::options::ReturnDocument;
use mongodb::{bson::doc, Client, Collection};

use crate::dbs::mongo::models::MongoCounter;
use crate::error::{PersistError, Result};

/// Atomic sequences backed by the `counters` collection
#[derive(Clone)]
pub struct MongoCounterRepository {
    collection: Collection<MongoCounter>,
}

impl MongoCounterRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("counters");
        Self { collection }
    }

    /// Increment the named sequence and return the new value
    ///
    /// The counter document is created on first use, so the first value is 1.
    pub async fn next_value(&self, name: &str) -> Result<i64> {
        let counter = self
            .collection
            .find_one_and_update(doc! { "_id": name }, doc! { "$inc": { "seq": 1_i64 } })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| PersistError::Internal(format!("counter {} missing after upsert", name)))?;
        Ok(counter.seq)
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{PersistError, Result};
use crate::models::{Exchange, NewExchange, UserId};

/// MongoDB-specific Exchange model
///
/// BSON has no unsigned 64-bit integer, so ids are stored as `i64`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MongoExchange {
    #[serde(rename = "_id")]
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub reply: String,
}

/// Sequence document in the `counters` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoCounter {
    #[serde(rename = "_id")]
    pub name: String,
    pub seq: i64,
}

fn to_i64(value: u64, field: &str) -> Result<i64> {
    i64::try_from(value)
        .map_err(|_| PersistError::InvalidExchange(format!("{} {} does not fit in BSON int64", field, value)))
}

fn to_u64(value: i64, field: &str) -> Result<u64> {
    u64::try_from(value)
        .map_err(|_| PersistError::Internal(format!("stored {} {} is negative", field, value)))
}

impl MongoExchange {
    pub fn from_new(id: i64, exchange: NewExchange) -> Result<Self> {
        Ok(Self {
            id,
            user_id: to_i64(exchange.user_id.get(), "user_id")?,
            content: exchange.content,
            reply: exchange.reply,
        })
    }
}

impl TryFrom<MongoExchange> for Exchange {
    type Error = PersistError;

    fn try_from(exchange: MongoExchange) -> Result<Self> {
        Ok(Self {
            id: to_u64(exchange.id, "id")?,
            user_id: UserId(to_u64(exchange.user_id, "user_id")?),
            content: exchange.content,
            reply: exchange.reply,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_mongo_model() {
        let new = NewExchange::new(UserId(9), "Hai", "Halo");

        let mongo = MongoExchange::from_new(3, new).unwrap();
        let exchange = Exchange::try_from(mongo).unwrap();

        assert_eq!(exchange.id, 3);
        assert_eq!(exchange.user_id, UserId(9));
        assert_eq!(exchange.content, "Hai");
        assert_eq!(exchange.reply, "Halo");
    }

    #[test]
    fn test_user_id_out_of_range() {
        let new = NewExchange::new(UserId(u64::MAX), "Hai", "Halo");
        assert!(matches!(
            MongoExchange::from_new(1, new),
            Err(PersistError::InvalidExchange(_))
        ));
    }

    #[test]
    fn test_negative_stored_id() {
        let mongo = MongoExchange {
            id: -1,
            user_id: 1,
            content: "Hai".to_string(),
            reply: "Halo".to_string(),
        };
        assert!(matches!(Exchange::try_from(mongo), Err(PersistError::Internal(_))));
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PersistError, Result};

/// Identifier of an authenticated sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl UserId {
    /// Identity recorded when the session carries no user
    pub const ANONYMOUS: UserId = UserId(0);

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A completed turn that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExchange {
    pub user_id: UserId,
    pub content: String,
    pub reply: String,
}

impl NewExchange {
    pub fn new(user_id: UserId, content: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            user_id,
            content: content.into(),
            reply: reply.into(),
        }
    }

    /// An exchange is only stored once a non-empty reply exists
    pub fn validate(&self) -> Result<()> {
        if self.reply.is_empty() {
            return Err(PersistError::InvalidExchange("reply is empty".to_string()));
        }
        Ok(())
    }

    pub fn into_exchange(self, id: u64) -> Exchange {
        Exchange {
            id,
            user_id: self.user_id,
            content: self.content,
            reply: self.reply,
        }
    }
}

/// One stored (user, input, reply) record
///
/// Serializes to the frame sent back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub id: u64,
    pub user_id: UserId,
    pub content: String,
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_json_shape() {
        let exchange = NewExchange::new(UserId(7), "Hai", "Halo").into_exchange(42);
        let value = serde_json::to_value(&exchange).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "id": 42,
                "user_id": 7,
                "content": "Hai",
                "reply": "Halo"
            })
        );
    }

    #[test]
    fn test_empty_reply_is_rejected() {
        let result = NewExchange::new(UserId(1), "Hai", "").validate();
        assert!(matches!(result, Err(PersistError::InvalidExchange(_))));
    }

    #[test]
    fn test_empty_content_is_accepted() {
        assert!(NewExchange::new(UserId(1), "", "Halo").validate().is_ok());
    }

    #[test]
    fn test_anonymous_user() {
        assert_eq!(UserId::ANONYMOUS.get(), 0);
        assert_eq!(UserId::default(), UserId::ANONYMOUS);
        assert_eq!(UserId::from(5).to_string(), "5");
    }
}

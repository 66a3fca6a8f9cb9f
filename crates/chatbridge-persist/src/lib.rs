pub mod models;
pub mod store;
pub mod memory;
pub mod error;
#[cfg(feature = "mongodb")]
pub mod dbs;
#[cfg(feature = "mongodb")]
pub mod builder;

pub use models::{Exchange, NewExchange, UserId};
pub use store::ExchangeStore;
pub use memory::InMemoryExchangeStore;
pub use error::PersistError;
#[cfg(feature = "mongodb")]
pub use dbs::mongo::MongoExchangeStore;
#[cfg(feature = "mongodb")]
pub use builder::MongoExchangeStoreBuilder;

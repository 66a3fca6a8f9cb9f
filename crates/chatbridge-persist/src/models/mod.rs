mod exchange;

pub use exchange::{Exchange, NewExchange, UserId};

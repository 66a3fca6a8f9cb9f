pub mod counter;
pub mod exchange;

pub use counter::MongoCounterRepository;
pub use exchange::MongoExchangeRepository;

pub mod api;
pub mod config;
pub mod cryptocurrencies;
pub mod db;
pub mod error;
pub mod logging;

// Re-export common modules
pub use api::router;
pub use config::Config;
pub use cryptocurrencies::model::{BasicError, Cryptocurrency, ListRes};
pub use cryptocurrencies::repository::{CryptocurrencyStore, StoreFactory};
pub use db::MongoDb;
pub use error::AppError;

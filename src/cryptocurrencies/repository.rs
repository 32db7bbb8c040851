use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{self, Document},
    options::FindOptions,
};
use tracing::info;

use crate::{
    config::Config,
    cryptocurrencies::model::ListRes,
    db::{
        mongodb::{connect, ConnectionSettings},
        MongoDb,
    },
    error::AppError,
};

pub const COLLECTION: &str = "cryptocurrencies";

#[async_trait]
pub trait CryptocurrencyStore: Send + Sync {
    /// Lists the first page of the collection in the order the database
    /// returns it.
    async fn list(&self) -> Result<Vec<ListRes>, AppError>;
}

/// Builds a fresh store for every request.
#[async_trait]
pub trait StoreFactory: Send + Sync {
    async fn open(&self) -> Result<Box<dyn CryptocurrencyStore>, AppError>;
}

#[derive(Clone)]
pub struct CryptocurrencyRepository {
    db: MongoDb,
    page_size: i64,
}

impl CryptocurrencyRepository {
    pub async fn new(settings: &ConnectionSettings, page_size: i64) -> Result<Self, AppError> {
        let db = connect(settings).await?;
        Ok(Self { db, page_size })
    }
}

#[async_trait]
impl CryptocurrencyStore for CryptocurrencyRepository {
    async fn list(&self) -> Result<Vec<ListRes>, AppError> {
        let collection = self.db.collection(COLLECTION);
        let options = FindOptions::builder().limit(self.page_size).build();

        let page: Vec<Document> = match collection.find(None, options).await {
            Ok(cursor) => cursor.try_collect().await,
            Err(e) => Err(e),
        }
        .map_err(|e| {
            info!(error = %e, "cryptocurrencies query failed");
            AppError::from(e)
        })?;

        info!(?page, "cryptocurrencies query returned");

        decode_page(page).map_err(|e| {
            info!(error = %e, "failed to decode cryptocurrencies");
            e
        })
    }
}

/// Decodes one raw page. A single bad document fails the whole page.
///
/// Prices must stay finite once narrowed to `f32`; NaN and out-of-range
/// doubles have no JSON form.
pub fn decode_page(page: Vec<Document>) -> Result<Vec<ListRes>, AppError> {
    page.into_iter()
        .enumerate()
        .map(|(index, doc)| {
            let record = bson::from_document::<ListRes>(doc).map_err(|e| {
                AppError::MalformedResponse(format!("document {}: {}", index, e))
            })?;

            if !record.data.price.is_finite() {
                return Err(AppError::MalformedResponse(format!(
                    "document {}: price of {} is not a finite f32",
                    index, record.data.symbol
                )));
            }

            Ok(record)
        })
        .collect()
}

/// Opens a [`CryptocurrencyRepository`] from the configured secret.
#[derive(Clone, Debug)]
pub struct MongoStoreFactory {
    settings: ConnectionSettings,
    page_size: i64,
}

impl MongoStoreFactory {
    pub fn new(config: &Config) -> Self {
        Self {
            settings: ConnectionSettings::from_config(config),
            page_size: config.page_size,
        }
    }

    pub fn shared(config: &Config) -> Arc<dyn StoreFactory> {
        Arc::new(Self::new(config))
    }
}

#[async_trait]
impl StoreFactory for MongoStoreFactory {
    async fn open(&self) -> Result<Box<dyn CryptocurrencyStore>, AppError> {
        let repository = CryptocurrencyRepository::new(&self.settings, self.page_size).await?;
        Ok(Box::new(repository))
    }
}

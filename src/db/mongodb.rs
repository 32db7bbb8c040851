use std::time::Duration;

use mongodb::{
  bson::Document,
  options::{ClientOptions, ServerApi, ServerApiVersion},
  Client, Database,
};

use crate::{config::Config, error::AppError};

#[derive(Clone, Debug)]
pub struct MongoDb {
  pub client: Client,
  pub db: Database,
}

/// Everything needed to build a client for one request.
#[derive(Clone, Debug)]
pub struct ConnectionSettings {
  pub uri: String,
  pub db_name: String,
  pub server_selection_timeout: Duration,
  /// Pins the stable server API (v1). Only MongoDB 5.0+ and Atlas accept it.
  pub pin_server_api: bool,
}

impl ConnectionSettings {
  pub fn from_config(config: &Config) -> Self {
      Self {
          uri: config.mongodb_uri.clone(),
          db_name: config.mongodb_name.clone(),
          server_selection_timeout: config.server_selection_timeout,
          pin_server_api: config.mongodb_pin_server_api,
      }
  }
}

pub async fn client_options(settings: &ConnectionSettings) -> Result<ClientOptions, AppError> {
  if settings.uri.trim().is_empty() {
      return Err(AppError::StoreInit("MONGODB_URI is not set".into()));
  }

  let mut client_options = ClientOptions::parse(&settings.uri)
      .await
      .map_err(|e| AppError::StoreInit(format!("Failed to parse MongoDB connection string: {}", e)))?;

  if settings.pin_server_api {
      let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
      client_options.server_api = Some(server_api);
  }
  client_options.server_selection_timeout = Some(settings.server_selection_timeout);
  client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

  Ok(client_options)
}

/// Builds a driver client from the secret connection string.
///
/// The driver connects lazily: a malformed secret fails here, an unreachable
/// server only fails once a query runs.
pub async fn connect(settings: &ConnectionSettings) -> Result<MongoDb, AppError> {
  let client_options = client_options(settings).await?;

  let client = Client::with_options(client_options)
      .map_err(|e| AppError::StoreInit(format!("Failed to create MongoDB client: {}", e)))?;

  let db = client.database(&settings.db_name);

  Ok(MongoDb { client, db })
}

impl MongoDb {
  pub fn collection(&self, name: &str) -> mongodb::Collection<Document> {
      self.db.collection(name)
  }
}

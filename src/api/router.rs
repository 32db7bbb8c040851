use std::{io, sync::Arc};

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
  config::Config,
  cryptocurrencies::{
    repository::{MongoStoreFactory, StoreFactory},
    routes::cryptocurrency_routes,
  },
};

/// Builds the application backed by MongoDB.
pub fn create_router(config: &Config) -> Router {
  create_router_with(MongoStoreFactory::shared(config))
}

/// Builds the application around any store factory.
pub fn create_router_with(stores: Arc<dyn StoreFactory>) -> Router {
  cryptocurrency_routes(stores).layer(TraceLayer::new_for_http())
}

/// Binds `HOST:PORT`. `HOST` may be a hostname, an IPv4 or a bare IPv6 literal.
pub async fn bind(config: &Config) -> io::Result<TcpListener> {
  TcpListener::bind((config.host.as_str(), config.port)).await
}

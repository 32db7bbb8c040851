use std::sync::Arc;

use axum::{extract::State, response::Response};
use tracing::debug;

use crate::{
    cryptocurrencies::repository::StoreFactory,
    error::{json_body, AppError},
};

/// Answers every request with the first page of cryptocurrencies.
///
/// Method, path, headers and body are never read.
pub async fn list_cryptocurrencies(
    State(stores): State<Arc<dyn StoreFactory>>,
) -> Result<Response, AppError> {
    let store = stores.open().await?;
    let cryptocurrencies = store.list().await?;
    debug!(count = cryptocurrencies.len(), "listed cryptocurrencies");

    // serde_json writes NaN and infinities as null instead of failing.
    if let Some(record) = cryptocurrencies.iter().find(|r| !r.data.price.is_finite()) {
        return Err(AppError::Serialization(format!(
            "price of {} is not a finite number",
            record.data.symbol
        )));
    }

    let body = serde_json::to_vec(&cryptocurrencies)?;
    Ok(json_body(body))
}

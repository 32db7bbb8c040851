use axum::{
  http::{header, StatusCode},
  response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::cryptocurrencies::model::BasicError;

#[derive(Error, Debug)]
pub enum AppError {
  #[error("Config error: {0}")]
  Config(String),

  #[error("Failed to initialize database: {0}")]
  StoreInit(String),

  #[error("Database query error: {0}")]
  Query(String),

  #[error("Malformed database response: {0}")]
  MalformedResponse(String),

  #[error("Serialization error: {0}")]
  Serialization(String),
}

impl From<mongodb::error::Error> for AppError {
  fn from(err: mongodb::error::Error) -> Self {
      Self::Query(err.to_string())
  }
}

impl From<serde_json::Error> for AppError {
  fn from(err: serde_json::Error) -> Self {
      Self::Serialization(err.to_string())
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
      tracing::info!(error = %self, "failed to get cryptocurrencies");
      server_error()
  }
}

/// Renders the fixed `SERVER_ERROR` body.
///
/// The status stays 200 on every path; callers only look at the body. If the
/// body itself cannot be encoded the response goes out empty.
pub fn server_error() -> Response {
  match serde_json::to_vec(&BasicError::server_error()) {
      Ok(body) => json_body(body),
      Err(err) => {
          tracing::info!(error = %err, "failed to encode error body");
          StatusCode::OK.into_response()
      }
  }
}

pub fn json_body(body: Vec<u8>) -> Response {
  (
      StatusCode::OK,
      [(header::CONTENT_TYPE, "application/json")],
      body,
  )
      .into_response()
}

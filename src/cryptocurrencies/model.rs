use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cryptocurrency {
    pub name: String,
    pub price: f32,
    pub symbol: String,
}

/// One stored document as returned by a list query. Only `data` is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListRes {
    pub data: Cryptocurrency,
}

/// Error body returned to the API caller.
#[derive(Debug, Serialize, Deserialize)]
pub struct BasicError {
    pub code: String,
    pub message: String,
}

impl BasicError {
    pub fn server_error() -> Self {
        Self {
            code: "SERVER_ERROR".to_string(),
            message: "failed to get cryptocurrencies".to_string(),
        }
    }
}

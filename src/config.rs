use std::{env, time::Duration};

use crate::error::AppError;

pub const DEFAULT_PAGE_SIZE: i64 = 64;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    pub app_env: AppEnv,
    pub mongodb_uri: String,
    pub mongodb_name: String,
    pub mongodb_pin_server_api: bool,
    pub page_size: i64,
    pub server_selection_timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    /// Only the literal `dev` marker selects the development environment.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("dev") => AppEnv::Development,
            _ => AppEnv::Production,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests never touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server config
        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".into())
            .parse::<u16>()
            .map_err(|_| AppError::Config("Invalid PORT".into()))?;

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let app_env = AppEnv::from_flag(lookup("CRYPTOCURRENCIES").as_deref());

        // MongoDB config
        let mongodb_uri = lookup("MONGODB_URI").unwrap_or_default();

        let mongodb_name = lookup("MONGODB_NAME").unwrap_or_else(|| "cryptocurrencies".into());

        let mongodb_pin_server_api = match lookup("MONGODB_SERVER_API").as_deref() {
            None | Some("") => false,
            Some("1") => true,
            Some(_) => {
                return Err(AppError::Config(
                    "Invalid MONGODB_SERVER_API, only version 1 is supported".into(),
                ))
            }
        };

        let page_size = match lookup("PAGE_SIZE") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or_else(|| AppError::Config("Invalid PAGE_SIZE".into()))?,
            None => DEFAULT_PAGE_SIZE,
        };

        let timeout_secs = lookup("MONGODB_SELECTION_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".into())
            .parse::<u64>()
            .map_err(|_| AppError::Config("Invalid MONGODB_SELECTION_TIMEOUT_SECS".into()))?;

        Ok(Self {
            port,
            host,
            app_env,
            mongodb_uri,
            mongodb_name,
            mongodb_pin_server_api,
            page_size,
            server_selection_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

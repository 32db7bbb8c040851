//! Logger construction.
//!
//! The subscriber is built from [`AppEnv`] and handed back as a [`Dispatch`];
//! the entry point owns it and decides where it is installed.

use tracing::{dispatcher, level_filters::LevelFilter, Dispatch};
use tracing_subscriber::EnvFilter;

use crate::config::AppEnv;

pub fn level_for(env: AppEnv) -> LevelFilter {
    match env {
        AppEnv::Development => LevelFilter::DEBUG,
        AppEnv::Production => LevelFilter::INFO,
    }
}

/// Builds the process logger. `RUST_LOG` wins over the environment default.
pub fn build(env: AppEnv) -> Dispatch {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(env).into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .finish();

    Dispatch::new(subscriber)
}

/// Installs the logger for the whole process. A second call keeps the first
/// logger.
pub fn install(dispatch: Dispatch) {
    if dispatcher::set_global_default(dispatch).is_err() {
        tracing::warn!("logger already installed");
    }
}

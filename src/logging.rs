// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Structured logging setup for the host application.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives applied when `RUST_LOG` is not set.
pub const DEFAULT_DIRECTIVES: &str = "fitlog=debug,info";

/// Initialize structured JSON logging.
///
/// `RUST_LOG` takes precedence over `directives`. Returns an error if a
/// global subscriber is already installed.
pub fn init_logging(directives: Option<&str>) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(directives.unwrap_or(DEFAULT_DIRECTIVES))
            .map_err(|e| LoggingError::Filter(e.to_string()))?,
    };

    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}

/// Logging setup errors
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to install subscriber: {0}")]
    Install(String),
}

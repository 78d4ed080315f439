// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Store configuration loaded from environment variables.

use crate::services::calendar::DotColorRule;
use crate::time_utils::is_valid_date_format;
use std::env;
use std::path::PathBuf;

/// Default display format for entry dates (`ru-RU` short date).
pub const DEFAULT_DATE_FORMAT: &str = "%d.%m.%Y";

/// Where the key-value store keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process memory only, lost on exit.
    Memory,
    /// One file per key under this directory.
    File(PathBuf),
}

/// Store configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageBackend,
    /// chrono format used to render a draft's date into the stored display string
    pub date_format: String,
    /// Which entry colors a calendar day shared by several entries
    pub calendar_dot: DotColorRule,
}

impl Config {
    /// In-memory config for tests.
    pub fn test_default() -> Self {
        Self {
            storage: StorageBackend::Memory,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            calendar_dot: DotColorRule::default(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let data_dir = env::var("FITLOG_DATA_DIR").ok().map(PathBuf::from);
        let storage = match env::var("FITLOG_STORAGE").ok().as_deref() {
            Some("memory") => StorageBackend::Memory,
            Some("file") => StorageBackend::File(
                data_dir.ok_or(ConfigError::Missing("FITLOG_DATA_DIR"))?,
            ),
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "FITLOG_STORAGE",
                    value: other.to_string(),
                })
            }
            None => data_dir.map_or(StorageBackend::Memory, StorageBackend::File),
        };

        let date_format =
            env::var("FITLOG_DATE_FORMAT").unwrap_or_else(|_| DEFAULT_DATE_FORMAT.to_string());
        if !is_valid_date_format(&date_format) {
            return Err(ConfigError::Invalid {
                var: "FITLOG_DATE_FORMAT",
                value: date_format,
            });
        }

        let calendar_dot = match env::var("FITLOG_CALENDAR_DOT").ok() {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                var: "FITLOG_CALENDAR_DOT",
                value,
            })?,
            None => DotColorRule::default(),
        };

        Ok(Self {
            storage,
            date_format,
            calendar_dot,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

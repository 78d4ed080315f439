// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Store error types with consistent user-facing notices.

use serde::Serialize;

/// Error type shared by every store operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Password does not match")]
    Authentication,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Malformed data under key {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Notice body handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorNotice {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl StoreError {
    /// Validation and authentication failures are re-prompted in place;
    /// everything else becomes a generic failure notice.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StoreError::Validation(_) | StoreError::Authentication)
    }

    /// Build the notice shown to the user, logging failures that carry no details.
    pub fn notice(&self) -> ErrorNotice {
        let (error, details) = match self {
            StoreError::Validation(msg) => ("validation", Some(msg.clone())),
            StoreError::Authentication => ("authentication", None),
            StoreError::NotFound(msg) => ("not_found", Some(msg.clone())),
            StoreError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                ("storage_error", None)
            }
            StoreError::Corrupt { key, source } => {
                tracing::error!(key = %key, error = %source, "Malformed stored data");
                ("storage_error", None)
            }
            StoreError::Internal(err) => {
                tracing::error!(error = %err, "Internal error");
                ("internal_error", None)
            }
        };

        ErrorNotice { error, details }
    }
}

impl From<validator::ValidationErrors> for StoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        fields.sort_unstable();
        StoreError::Validation(format!("required field is empty: {}", fields.join(", ")))
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

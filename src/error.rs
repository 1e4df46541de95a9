// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error taxonomy shared by the record store and the data context.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Update target id is absent from its collection.
    #[error("{collection} record '{id}' not found")]
    NotFound { collection: &'static str, id: String },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The key-value medium refused a read or write.
    #[error("Storage medium rejected '{key}': {reason}")]
    Medium { key: String, reason: String },

    #[error("Corrupt content stored under '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Raised by callers before reaching the core; the core trusts its input.
    #[error("Invalid input: {0}")]
    Validation(String),
}

impl StoreError {
    pub fn not_found(collection: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            collection,
            id: id.into(),
        }
    }

    pub fn medium(key: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        StoreError::Medium {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub fn is_storage_fault(&self) -> bool {
        matches!(
            self,
            StoreError::Sqlite(_)
                | StoreError::Medium { .. }
                | StoreError::Corrupt { .. }
                | StoreError::Serialize(_)
        )
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types shared by every wrapper and builder.

/// Library error type.
#[derive(Debug, thiserror::Error)]
pub enum MagicError {
    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),

    #[error("No database name found in connection URL: {0}")]
    MissingDatabase(String),

    #[error("No MagicDatabase found with name {0}")]
    DatabaseNotLoaded(String),

    #[error("No MagicCollection found for {0}")]
    CollectionNotLoaded(String),

    #[error("{0} cannot be empty")]
    EmptyBuilder(&'static str),

    #[error("Inserted document has no ObjectId: {0}")]
    MissingInsertedId(String),

    #[error("Upsert returned no document")]
    UpsertReturnedNothing,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl MagicError {
    /// Whether the error came from the server or driver rather than from
    /// local misuse of a wrapper.
    pub fn is_database_error(&self) -> bool {
        matches!(self, MagicError::Database(_))
    }
}

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, MagicError>;

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use magic_mongo::{BsonBuilder, FilterBuilder, MagicError, SortBuilder, UpdateBuilder};

#[test]
fn test_error_messages() {
    let err = MagicError::MissingDatabase("mongodb://localhost".to_string());
    assert_eq!(
        err.to_string(),
        "No database name found in connection URL: mongodb://localhost"
    );

    let err = MagicError::CollectionNotLoaded("type app::User".to_string());
    assert_eq!(err.to_string(), "No MagicCollection found for type app::User");

    let err = MagicError::EmptyBuilder("sort");
    assert_eq!(err.to_string(), "sort cannot be empty");
}

#[test]
fn test_is_database_error() {
    assert!(MagicError::Database("connection reset".to_string()).is_database_error());
    assert!(!MagicError::UpsertReturnedNothing.is_database_error());
    assert!(!MagicError::DatabaseNotLoaded("app".to_string()).is_database_error());
}

#[test]
fn test_internal_from_anyhow() {
    let err: MagicError = anyhow::anyhow!("boom").into();
    assert!(matches!(err, MagicError::Internal(_)));
    assert_eq!(err.to_string(), "Internal error: boom");
}

#[test]
fn test_empty_builders() {
    assert!(matches!(
        SortBuilder::new().build(),
        Err(MagicError::EmptyBuilder("sort"))
    ));
    assert!(matches!(
        UpdateBuilder::new().build(),
        Err(MagicError::EmptyBuilder("update"))
    ));
    // Filters fall back to match-all instead of failing
    assert!(FilterBuilder::new().build().is_ok());
}

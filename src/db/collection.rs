// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed collection wrapper with shortcut operations.
//!
//! Every driver operation stays reachable through `Deref`; the methods
//! here cover the common find/insert/upsert/delete patterns so callers
//! do not have to spell out options each time.

use std::ops::Deref;

use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::results::{DeleteResult, UpdateResult};
use mongodb::{Collection, Database, IndexModel};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{MagicError, Result};

/// A driver collection of `T` documents plus helper methods.
#[derive(Debug)]
pub struct MagicCollection<T: Send + Sync> {
    collection: Collection<T>,
}

// Manual impl: `Collection<T>` is `Clone` for every `T`.
impl<T: Send + Sync> Clone for MagicCollection<T> {
    fn clone(&self) -> Self {
        Self {
            collection: self.collection.clone(),
        }
    }
}

impl<T: Send + Sync> Deref for MagicCollection<T> {
    type Target = Collection<T>;

    fn deref(&self) -> &Self::Target {
        &self.collection
    }
}

impl<T: Send + Sync> From<Collection<T>> for MagicCollection<T> {
    fn from(collection: Collection<T>) -> Self {
        Self { collection }
    }
}

impl<T: Send + Sync> MagicCollection<T> {
    /// Wrap the collection `name` of `database`.
    pub fn new(database: &Database, name: &str) -> Self {
        Self {
            collection: database.collection::<T>(name),
        }
    }

    /// The wrapped driver collection.
    pub fn inner(&self) -> &Collection<T> {
        &self.collection
    }

    /// Count documents matching `filter`.
    pub async fn count(&self, filter: Document) -> Result<u64> {
        self.collection
            .count_documents(filter)
            .await
            .map_err(|e| MagicError::Database(e.to_string()))
    }

    /// Create an index over `keys` (see `IndexBuilder`), returning its name.
    pub async fn create_index(&self, keys: Document, unique: bool) -> Result<String> {
        let options = IndexOptions::builder().unique(unique).build();
        let model = IndexModel::builder().keys(keys).options(options).build();

        let result = self.collection.create_index(model).await.map_err(|e| {
            MagicError::Database(format!(
                "Failed to create index on {}: {}",
                self.collection.name(),
                e
            ))
        })?;

        tracing::debug!(
            collection = self.collection.name(),
            index = %result.index_name,
            "Index created"
        );
        Ok(result.index_name)
    }

    /// Delete the first document whose `field` equals `value`.
    pub async fn delete_one_by(
        &self,
        field: &str,
        value: impl Into<Bson>,
    ) -> Result<DeleteResult> {
        let value: Bson = value.into();
        self.collection
            .delete_one(doc! { field: value })
            .await
            .map_err(|e| MagicError::Database(e.to_string()))
    }
}

impl<T> MagicCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    // ─── Reads ──────────────────────────────────────────────────

    /// Find the first document matching `filter`.
    pub async fn find_one(&self, filter: Document) -> Result<Option<T>> {
        self.collection
            .find_one(filter)
            .await
            .map_err(|e| MagicError::Database(e.to_string()))
    }

    /// Find the first document whose `field` equals `value`.
    pub async fn find_one_by(&self, field: &str, value: impl Into<Bson>) -> Result<Option<T>> {
        let value: Bson = value.into();
        self.find_one(doc! { field: value }).await
    }

    /// Find every document matching `filter`.
    pub async fn find_many(&self, filter: Document) -> Result<Vec<T>> {
        let cursor = self
            .collection
            .find(filter)
            .await
            .map_err(|e| MagicError::Database(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| MagicError::Database(format!("Failed to read cursor: {}", e)))
    }

    // ─── Writes ─────────────────────────────────────────────────

    /// Insert `document` and return the ObjectId the server assigned.
    ///
    /// Fails with `MissingInsertedId` if the document carried its own
    /// non-ObjectId `_id`; the insert itself has still happened then.
    pub async fn insert_one_return_id(&self, document: &T) -> Result<ObjectId> {
        let result = self
            .collection
            .insert_one(document)
            .await
            .map_err(|e| MagicError::Database(e.to_string()))?;

        match result.inserted_id {
            Bson::ObjectId(id) => Ok(id),
            other => Err(MagicError::MissingInsertedId(other.to_string())),
        }
    }

    /// Update the first document matching `filter`, inserting one if none match.
    pub async fn upsert_one(&self, filter: Document, update: Document) -> Result<UpdateResult> {
        let result = self
            .collection
            .update_one(filter, update)
            .upsert(true)
            .await
            .map_err(|e| MagicError::Database(e.to_string()))?;

        if let Some(id) = &result.upserted_id {
            tracing::debug!(collection = self.collection.name(), upserted_id = %id, "Upserted document");
        }
        Ok(result)
    }

    /// Update the first document matching `filter` and return it as it is
    /// after the update.
    pub async fn find_one_and_update_return(
        &self,
        filter: Document,
        update: Document,
    ) -> Result<Option<T>> {
        self.collection
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| MagicError::Database(e.to_string()))
    }

    /// Like `find_one_and_update_return`, inserting the document if none
    /// match. The server always returns a document for this combination.
    pub async fn find_one_and_upsert(&self, filter: Document, update: Document) -> Result<T> {
        self.collection
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .upsert(true)
            .await
            .map_err(|e| MagicError::Database(e.to_string()))?
            .ok_or(MagicError::UpsertReturnedNothing)
    }
}

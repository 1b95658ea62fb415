// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Incremental builders for filter, update, sort, projection and index
//! documents.
//!
//! Each builder starts empty (or from a document), folds further
//! documents in with its own combination rule, and produces the final
//! document with [`BsonBuilder::build`].

pub mod filter;
pub mod index;
pub mod projection;
pub mod sort;
pub mod update;

pub use filter::FilterBuilder;
pub use index::IndexBuilder;
pub use projection::ProjectionBuilder;
pub use sort::SortBuilder;
pub use update::UpdateBuilder;

use mongodb::bson::Document;

use crate::error::{MagicError, Result};

/// Shared behavior of the document builders.
pub trait BsonBuilder: Default + Sized {
    /// Human-readable kind, used in errors ("filter", "sort", ...).
    const KIND: &'static str;

    /// The document built so far.
    fn current(&self) -> Option<&Document>;

    fn current_mut(&mut self) -> &mut Option<Document>;

    /// Merge `next` into `current`.
    fn combine(current: Document, next: Document) -> Document;

    /// Document produced by [`build`](BsonBuilder::build) when nothing was added.
    fn fallback() -> Option<Document> {
        None
    }

    /// Start from all of `documents`, combined in order.
    fn from_all<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = Document>,
    {
        documents.into_iter().fold(Self::default(), Self::add)
    }

    /// Replace the document built so far.
    fn reset(mut self, bson: Option<Document>) -> Self {
        *self.current_mut() = bson;
        self
    }

    /// Combine `next` with the document built so far.
    fn add(mut self, next: Document) -> Self {
        let merged = match self.current_mut().take() {
            Some(current) => Self::combine(current, next),
            None => next,
        };
        *self.current_mut() = Some(merged);
        self
    }

    fn is_empty(&self) -> bool {
        self.current().is_none()
    }

    /// The finished document, or the fallback when nothing was added.
    fn build(mut self) -> Result<Document> {
        self.current_mut()
            .take()
            .or_else(Self::fallback)
            .ok_or(MagicError::EmptyBuilder(Self::KIND))
    }
}

/// Insert every field of `next` into `current`; re-used keys keep their
/// position and take the new value.
pub(crate) fn merge_keys(mut current: Document, next: Document) -> Document {
    for (key, value) in next {
        current.insert(key, value);
    }
    current
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Index key builder, for use with `MagicCollection::create_index`.

use mongodb::bson::{doc, Document};

use super::{merge_keys, BsonBuilder};

/// Builds the key document of a (possibly compound) index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexBuilder {
    bson: Option<Document>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ascending(self, field: &str) -> Self {
        self.add(doc! { field: 1 })
    }

    pub fn descending(self, field: &str) -> Self {
        self.add(doc! { field: -1 })
    }

    pub fn text(self, field: &str) -> Self {
        self.add(doc! { field: "text" })
    }

    pub fn hashed(self, field: &str) -> Self {
        self.add(doc! { field: "hashed" })
    }
}

impl From<Document> for IndexBuilder {
    fn from(bson: Document) -> Self {
        Self { bson: Some(bson) }
    }
}

impl BsonBuilder for IndexBuilder {
    const KIND: &'static str = "index";

    fn current(&self) -> Option<&Document> {
        self.bson.as_ref()
    }

    fn current_mut(&mut self) -> &mut Option<Document> {
        &mut self.bson
    }

    fn combine(current: Document, next: Document) -> Document {
        merge_keys(current, next)
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Projection builder.

use mongodb::bson::{doc, Document};

use super::BsonBuilder;

/// Builds a projection. An empty builder projects only `_id`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectionBuilder {
    bson: Option<Document>,
}

impl ProjectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include(self, field: &str) -> Self {
        self.add(doc! { field: 1 })
    }

    pub fn exclude(self, field: &str) -> Self {
        self.add(doc! { field: 0 })
    }
}

impl From<Document> for ProjectionBuilder {
    fn from(bson: Document) -> Self {
        Self { bson: Some(bson) }
    }
}

impl BsonBuilder for ProjectionBuilder {
    const KIND: &'static str = "projection";

    fn current(&self) -> Option<&Document> {
        self.bson.as_ref()
    }

    fn current_mut(&mut self) -> &mut Option<Document> {
        &mut self.bson
    }

    /// A field given again moves to the end with its new value.
    fn combine(mut current: Document, next: Document) -> Document {
        for (field, value) in next {
            current.remove(&field);
            current.insert(field, value);
        }
        current
    }

    fn fallback() -> Option<Document> {
        Some(doc! { "_id": 1 })
    }
}

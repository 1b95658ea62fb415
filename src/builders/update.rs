// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Update document builder.

use mongodb::bson::{doc, Bson, Document};

use super::BsonBuilder;

/// Builds an update document from several update operators.
///
/// Documents using the same operator are merged, so
/// `set("a", 1).set("b", 2)` builds `{ $set: { a: 1, b: 2 } }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateBuilder {
    bson: Option<Document>,
}

impl UpdateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(self, field: &str, value: impl Into<Bson>) -> Self {
        self.operator("$set", field, value.into())
    }

    pub fn unset(self, field: &str) -> Self {
        self.operator("$unset", field, Bson::String(String::new()))
    }

    pub fn inc(self, field: &str, amount: impl Into<Bson>) -> Self {
        self.operator("$inc", field, amount.into())
    }

    pub fn push(self, field: &str, value: impl Into<Bson>) -> Self {
        self.operator("$push", field, value.into())
    }

    /// Only applied when the update inserts a new document.
    pub fn set_on_insert(self, field: &str, value: impl Into<Bson>) -> Self {
        self.operator("$setOnInsert", field, value.into())
    }

    fn operator(self, operator: &str, field: &str, value: Bson) -> Self {
        self.add(doc! { operator: { field: value } })
    }
}

impl From<Document> for UpdateBuilder {
    fn from(bson: Document) -> Self {
        Self { bson: Some(bson) }
    }
}

impl BsonBuilder for UpdateBuilder {
    const KIND: &'static str = "update";

    fn current(&self) -> Option<&Document> {
        self.bson.as_ref()
    }

    fn current_mut(&mut self) -> &mut Option<Document> {
        &mut self.bson
    }

    fn combine(mut current: Document, next: Document) -> Document {
        for (operator, value) in next {
            match value {
                Bson::Document(fields) => {
                    if let Some(Bson::Document(existing)) = current.get_mut(&operator) {
                        for (field, value) in fields {
                            existing.insert(field, value);
                        }
                        continue;
                    }
                    current.insert(operator, Bson::Document(fields));
                }
                other => {
                    current.insert(operator, other);
                }
            }
        }
        current
    }
}

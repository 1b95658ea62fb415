// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sort specification builder.

use mongodb::bson::{doc, Document};

use super::{merge_keys, BsonBuilder};

/// Builds a sort specification; keys sort in the order they were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortBuilder {
    bson: Option<Document>,
}

impl SortBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ascending(self, field: &str) -> Self {
        self.add(doc! { field: 1 })
    }

    pub fn descending(self, field: &str) -> Self {
        self.add(doc! { field: -1 })
    }
}

impl From<Document> for SortBuilder {
    fn from(bson: Document) -> Self {
        Self { bson: Some(bson) }
    }
}

impl BsonBuilder for SortBuilder {
    const KIND: &'static str = "sort";

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_keep_insertion_order() {
        let sort = SortBuilder::new()
            .descending("created")
            .ascending("name")
            .build()
            .unwrap();

        let keys: Vec<&String> = sort.keys().collect();
        assert_eq!(keys, ["created", "name"]);
        assert_eq!(sort, doc! { "created": -1, "name": 1 });
    }

    #[test]
    fn test_repeated_key_keeps_position() {
        let sort = SortBuilder::new()
            .ascending("a")
            .ascending("b")
            .descending("a")
            .build()
            .unwrap();

        let keys: Vec<&String> = sort.keys().collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(sort.get_i32("a").unwrap(), -1);
    }

    #[test]
    fn test_empty_sort_fails() {
        assert!(SortBuilder::new().build().is_err());
        assert!(SortBuilder::from_all(Vec::new()).build().is_err());
    }
}

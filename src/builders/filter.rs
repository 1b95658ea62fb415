// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Query filter builder.

use mongodb::bson::{doc, Bson, Document};

use super::BsonBuilder;

/// Builds a query filter by chaining conditions with `$and`, `$or` or `$nor`.
///
/// An empty builder builds `{}`, which matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterBuilder {
    bson: Option<Document>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Combine `next` with the current filter using `operator`.
    pub fn add_with<F>(mut self, operator: F, next: Document) -> Self
    where
        F: FnOnce(Document, Document) -> Document,
    {
        self.bson = Some(match self.bson.take() {
            Some(current) => operator(current, next),
            None => next,
        });
        self
    }

    pub fn and(self, next: Document) -> Self {
        self.add_with(and, next)
    }

    pub fn or(self, next: Document) -> Self {
        self.add_with(or, next)
    }

    pub fn nor(self, next: Document) -> Self {
        self.add_with(nor, next)
    }

    /// `and` an equality condition on `field`.
    pub fn eq(self, field: &str, value: impl Into<Bson>) -> Self {
        self.and(eq(field, value))
    }
}

impl From<Document> for FilterBuilder {
    fn from(bson: Document) -> Self {
        Self { bson: Some(bson) }
    }
}

impl BsonBuilder for FilterBuilder {
    const KIND: &'static str = "filter";

    fn current(&self) -> Option<&Document> {
        self.bson.as_ref()
    }

    fn current_mut(&mut self) -> &mut Option<Document> {
        &mut self.bson
    }

    fn combine(current: Document, next: Document) -> Document {
        and(current, next)
    }

    fn fallback() -> Option<Document> {
        Some(Document::new())
    }
}

/// Equality filter `{ field: value }`.
pub fn eq(field: &str, value: impl Into<Bson>) -> Document {
    let value: Bson = value.into();
    doc! { field: value }
}

/// `{ $and: [current, next] }`, extending `current` if it already is an `$and`.
pub fn and(current: Document, next: Document) -> Document {
    associative("$and", current, next)
}

/// `{ $or: [current, next] }`, extending `current` if it already is an `$or`.
pub fn or(current: Document, next: Document) -> Document {
    associative("$or", current, next)
}

/// `{ $nor: [current, next] }`.
///
/// Never flattened: `nor(nor(a, b), c)` differs from `nor(a, b, c)`.
pub fn nor(current: Document, next: Document) -> Document {
    doc! { "$nor": [current, next] }
}

fn associative(operator: &str, current: Document, next: Document) -> Document {
    let existing = if current.len() == 1 {
        current.get_array(operator).ok().cloned()
    } else {
        None
    };
    let mut clauses = existing.unwrap_or_else(|| vec![Bson::Document(current)]);
    clauses.push(Bson::Document(next));
    doc! { operator: clauses }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_matches_everything() {
        assert_eq!(FilterBuilder::new().build().unwrap(), doc! {});
    }

    #[test]
    fn test_single_condition_is_not_wrapped() {
        let filter = FilterBuilder::new().eq("name", "alice").build().unwrap();
        assert_eq!(filter, doc! { "name": "alice" });
    }

    #[test]
    fn test_and_chain_flattens() {
        let filter = FilterBuilder::new()
            .eq("a", 1)
            .eq("b", 2)
            .and(doc! { "c": { "$gt": 3 } })
            .build()
            .unwrap();

        assert_eq!(
            filter,
            doc! { "$and": [{ "a": 1 }, { "b": 2 }, { "c": { "$gt": 3 } }] }
        );
    }

    #[test]
    fn test_mixed_operators_nest() {
        let filter = FilterBuilder::from(doc! { "a": 1 })
            .or(doc! { "b": 2 })
            .and(doc! { "c": 3 })
            .build()
            .unwrap();

        assert_eq!(
            filter,
            doc! { "$and": [{ "$or": [{ "a": 1 }, { "b": 2 }] }, { "c": 3 }] }
        );
    }

    #[test]
    fn test_nor_does_not_flatten() {
        let filter = FilterBuilder::from(doc! { "a": 1 })
            .nor(doc! { "b": 2 })
            .nor(doc! { "c": 3 })
            .build()
            .unwrap();

        assert_eq!(
            filter,
            doc! { "$nor": [{ "$nor": [{ "a": 1 }, { "b": 2 }] }, { "c": 3 }] }
        );
    }

    #[test]
    fn test_and_with_extra_keys_is_not_extended() {
        // `$and` alongside another field is an implicit and; keep it whole
        let current = doc! { "$and": [{ "a": 1 }], "b": 2 };
        let filter = and(current.clone(), doc! { "c": 3 });
        assert_eq!(filter, doc! { "$and": [current, { "c": 3 }] });
    }

    #[test]
    fn test_custom_operator() {
        let filter = FilterBuilder::from(doc! { "a": 1 })
            .add_with(|_, next| next, doc! { "b": 2 })
            .build()
            .unwrap();
        assert_eq!(filter, doc! { "b": 2 });
    }

    #[test]
    fn test_reset_clears_filter() {
        let builder = FilterBuilder::new().eq("a", 1).reset(None);
        assert!(builder.is_empty());
        assert_eq!(builder.build().unwrap(), doc! {});
    }
}

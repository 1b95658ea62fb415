// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Magic-Mongo: common framework for MongoDB management
//!
//! This crate wraps the official MongoDB driver with client, database and
//! collection handles that keep a registry of typed collections, plus
//! builders for filter, update, sort, projection and index documents.

pub mod builders;
pub mod codecs;
pub mod config;
pub mod db;
pub mod error;

pub use builders::{
    BsonBuilder, FilterBuilder, IndexBuilder, ProjectionBuilder, SortBuilder, UpdateBuilder,
};
pub use db::{MagicCollection, MagicDatabase, MagicMongo, MultiMongo, SingleMongo};
pub use error::{MagicError, Result};
pub use mongodb::bson;

//! Database layer (MongoDB).

pub mod client;
pub mod collection;
pub mod database;

pub use client::{MagicMongo, MultiMongo, SingleMongo};
pub use collection::MagicCollection;
pub use database::{CollectionLoader, MagicDatabase};

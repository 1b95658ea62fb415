// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database wrapper holding a registry of typed collections.
//!
//! Collections are registered once (usually at startup) and then looked
//! up by document type anywhere the database handle is available:
//!
//! ```ignore
//! db.load_magic_collection::<User>("users");
//! let users = db.get_magic_collection::<User>()?;
//! ```

use std::any::{type_name, Any, TypeId};
use std::ops::Deref;
use std::sync::Arc;

use dashmap::DashMap;
use mongodb::bson::{doc, Document};
use mongodb::Database;

use crate::db::MagicCollection;
use crate::error::{MagicError, Result};

/// Registers one collection of a fixed document type; see [`MagicDatabase::loader`].
pub type CollectionLoader = fn(&MagicDatabase, &str);

/// A registered collection plus the name of its document type (for errors).
struct Registered {
    type_name: &'static str,
    collection: Box<dyn Any + Send + Sync>,
}

/// Driver database plus typed collection registry.
///
/// Clones share the registry.
#[derive(Clone)]
pub struct MagicDatabase {
    database: Database,
    name_to_type: Arc<DashMap<String, TypeId>>,
    collections: Arc<DashMap<TypeId, Registered>>,
}

impl std::fmt::Debug for MagicDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MagicDatabase")
            .field("name", &self.database.name())
            .field("collections", &self.collection_names())
            .finish()
    }
}

impl Deref for MagicDatabase {
    type Target = Database;

    fn deref(&self) -> &Self::Target {
        &self.database
    }
}

impl MagicDatabase {
    /// Wrap a driver database with an empty registry.
    pub fn new(database: Database) -> Self {
        Self {
            database,
            name_to_type: Arc::new(DashMap::new()),
            collections: Arc::new(DashMap::new()),
        }
    }

    /// The wrapped driver database.
    pub fn inner(&self) -> &Database {
        &self.database
    }

    // ─── Collection Registry ──────────────────────────────────────

    /// Construct, but don't register, a collection of `T` named `name`.
    ///
    /// Useful when one document type backs several collections and the
    /// caller keeps track of them itself.
    pub fn new_magic_collection<T: Send + Sync>(&self, name: &str) -> MagicCollection<T> {
        MagicCollection::new(&self.database, name)
    }

    /// Construct a collection of `T` named `name` and register it.
    ///
    /// A type maps to one collection: loading a second name for the same
    /// type replaces the collection returned by `get_magic_collection`.
    pub fn load_magic_collection<T>(&self, name: &str) -> MagicCollection<T>
    where
        T: Send + Sync + 'static,
    {
        let collection = self.new_magic_collection::<T>(name);
        let type_id = TypeId::of::<T>();

        self.name_to_type.insert(name.to_string(), type_id);
        let previous = self.collections.insert(
            type_id,
            Registered {
                type_name: type_name::<T>(),
                collection: Box::new(collection.clone()),
            },
        );

        tracing::debug!(
            database = self.database.name(),
            collection = name,
            document_type = type_name::<T>(),
            replaced = previous.is_some(),
            "Loaded MagicCollection"
        );

        collection
    }

    /// Erased loader for `T`, for use with [`load_magic_collections`].
    ///
    /// [`load_magic_collections`]: MagicDatabase::load_magic_collections
    pub fn loader<T>() -> CollectionLoader
    where
        T: Send + Sync + 'static,
    {
        load_erased::<T>
    }

    /// Register many collections at once.
    ///
    /// ```ignore
    /// db.load_magic_collections([
    ///     ("users", MagicDatabase::loader::<User>()),
    ///     ("orders", MagicDatabase::loader::<Order>()),
    /// ]);
    /// ```
    pub fn load_magic_collections<'a, I>(&self, to_load: I) -> &Self
    where
        I: IntoIterator<Item = (&'a str, CollectionLoader)>,
    {
        for (name, load) in to_load {
            load(self, name);
        }
        self
    }

    /// The registered collection for document type `T`.
    pub fn get_magic_collection<T>(&self) -> Result<MagicCollection<T>>
    where
        T: Send + Sync + 'static,
    {
        self.collections
            .get(&TypeId::of::<T>())
            .and_then(|entry| {
                entry
                    .collection
                    .downcast_ref::<MagicCollection<T>>()
                    .cloned()
            })
            .ok_or_else(|| MagicError::CollectionNotLoaded(format!("type {}", type_name::<T>())))
    }

    /// Untyped view of the registered collection `name`.
    ///
    /// Prefer [`get_magic_collection`](MagicDatabase::get_magic_collection),
    /// which keeps the document type.
    pub fn get_magic_collection_by_name(&self, name: &str) -> Result<MagicCollection<Document>> {
        if !self.name_to_type.contains_key(name) {
            return Err(MagicError::CollectionNotLoaded(format!("name {}", name)));
        }
        Ok(self.new_magic_collection::<Document>(name))
    }

    /// Name of the document type registered under `name`, if any.
    pub fn collection_type_name(&self, name: &str) -> Option<&'static str> {
        let type_id = *self.name_to_type.get(name)?;
        self.collections.get(&type_id).map(|entry| entry.type_name)
    }

    /// Names of all registered collections, sorted.
    pub fn collection_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .name_to_type
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    // ─── Server Operations ────────────────────────────────────────

    /// Round-trip a `ping` command to check the server is reachable.
    pub async fn ping(&self) -> Result<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| {
                MagicError::Database(format!("Ping to {} failed: {}", self.database.name(), e))
            })?;
        Ok(())
    }

    /// Names of the collections that exist on the server.
    pub async fn list_server_collections(&self) -> Result<Vec<String>> {
        let mut names = self.database.list_collection_names().await.map_err(|e| {
            MagicError::Database(format!(
                "Failed to list collections of {}: {}",
                self.database.name(),
                e
            ))
        })?;
        names.sort();
        Ok(names)
    }
}

fn load_erased<T>(database: &MagicDatabase, name: &str)
where
    T: Send + Sync + 'static,
{
    database.load_magic_collection::<T>(name);
}

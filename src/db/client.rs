// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client wrappers that hand out [`MagicDatabase`] handles.
//!
//! - [`MagicMongo`]: a bare client; databases are constructed on demand.
//! - [`SingleMongo`]: exactly one database, named by the connection URL.
//! - [`MultiMongo`]: any number of databases loaded by name.

use std::ops::Deref;
use std::sync::Arc;

use dashmap::DashMap;
use mongodb::options::ClientOptions;
use mongodb::Client;

use crate::config::Config;
use crate::db::MagicDatabase;
use crate::error::{MagicError, Result};

/// MongoDB client plus the default database from its connection URL.
#[derive(Clone, Debug)]
pub struct MagicMongo {
    client: Client,
    default_database: Option<String>,
}

impl MagicMongo {
    /// Connect using a connection string such as `mongodb://host:27017/app`.
    ///
    /// The driver connects lazily; server errors surface on first use.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = ClientOptions::parse(url)
            .await
            .map_err(|e| MagicError::InvalidConnectionString(e.to_string()))?;
        Self::connect_with_options(options)
    }

    /// Connect using settings from a [`Config`].
    pub async fn from_config(config: &Config) -> Result<Self> {
        let options = config.client_options().await?;
        Self::connect_with_options(options)
    }

    /// Connect using already parsed driver options.
    pub fn connect_with_options(options: ClientOptions) -> Result<Self> {
        let default_database = options.default_database.clone();
        let hosts = options
            .hosts
            .iter()
            .map(|host| host.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let client = Client::with_options(options)
            .map_err(|e| MagicError::Database(format!("Failed to create MongoDB client: {}", e)))?;

        tracing::info!(
            hosts = %hosts,
            default_database = default_database.as_deref().unwrap_or("-"),
            "MongoDB client created"
        );

        Ok(Self {
            client,
            default_database,
        })
    }

    /// The wrapped driver client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Database named in the connection URL, if any.
    pub fn default_database(&self) -> Option<&str> {
        self.default_database.as_deref()
    }

    /// Construct a [`MagicDatabase`] for `name` without registering it.
    pub fn new_magic_database(&self, name: &str) -> MagicDatabase {
        MagicDatabase::new(self.client.database(name))
    }
}

// ─── Single Database ──────────────────────────────────────────────

/// A [`MagicMongo`] with one [`MagicDatabase`] taken from the connection URL.
#[derive(Clone, Debug)]
pub struct SingleMongo {
    mongo: MagicMongo,
    database: MagicDatabase,
}

impl SingleMongo {
    /// Connect to the database named in `url`.
    ///
    /// Fails with [`MagicError::MissingDatabase`] if `url` names none.
    pub async fn connect(url: &str) -> Result<Self> {
        let mongo = MagicMongo::connect(url).await?;
        Self::from_mongo(mongo, url)
    }

    /// Connect to the database named in the configured URI.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let mongo = MagicMongo::from_config(config).await?;
        Self::from_mongo(mongo, &config.uri)
    }

    fn from_mongo(mongo: MagicMongo, url: &str) -> Result<Self> {
        let name = mongo
            .default_database()
            .ok_or_else(|| MagicError::MissingDatabase(url.to_string()))?
            .to_string();
        let database = mongo.new_magic_database(&name);

        tracing::info!(database = %name, "Loaded MagicDatabase");

        Ok(Self { mongo, database })
    }

    /// The single database.
    pub fn database(&self) -> &MagicDatabase {
        &self.database
    }
}

impl Deref for SingleMongo {
    type Target = MagicMongo;

    fn deref(&self) -> &Self::Target {
        &self.mongo
    }
}

// ─── Multiple Databases ───────────────────────────────────────────

/// A [`MagicMongo`] with any number of loaded [`MagicDatabase`]s.
///
/// Clones share the set of loaded databases.
#[derive(Clone, Debug)]
pub struct MultiMongo {
    mongo: MagicMongo,
    databases: Arc<DashMap<String, MagicDatabase>>,
}

impl MultiMongo {
    /// Connect, loading the database named in `url` if there is one.
    pub async fn connect(url: &str) -> Result<Self> {
        let mongo = MagicMongo::connect(url).await?;
        Ok(Self::from_mongo(mongo))
    }

    /// Connect, loading the URI's database and every configured database.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let mongo = MagicMongo::from_config(config).await?;
        let multi = Self::from_mongo(mongo);
        multi.load_magic_databases(&config.databases);
        Ok(multi)
    }

    fn from_mongo(mongo: MagicMongo) -> Self {
        let multi = Self {
            mongo,
            databases: Arc::new(DashMap::new()),
        };
        if let Some(name) = multi.mongo.default_database().map(str::to_string) {
            multi.load_magic_database(&name);
        }
        multi
    }

    /// Construct the database `name` and load it, replacing any previous
    /// database loaded under that name.
    pub fn load_magic_database(&self, name: &str) -> MagicDatabase {
        let database = self.mongo.new_magic_database(name);
        self.databases.insert(name.to_string(), database.clone());

        tracing::info!(database = name, "Loaded MagicDatabase");
        database
    }

    /// Load every database in `names`.
    pub fn load_magic_databases<I, S>(&self, names: I) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.load_magic_database(name.as_ref());
        }
        self
    }

    /// The loaded database `name`.
    pub fn get_magic_database(&self, name: &str) -> Result<MagicDatabase> {
        self.databases
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| MagicError::DatabaseNotLoaded(name.to_string()))
    }

    /// Names of the loaded databases, sorted.
    pub fn database_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .databases
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }
}

impl Deref for MultiMongo {
    type Target = MagicMongo;

    fn deref(&self) -> &Self::Target {
        &self.mongo
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use magic_mongo::{MagicDatabase, MagicMongo, SingleMongo};
use serde::{Deserialize, Serialize};

/// Connection string for tests that do not need a running server.
/// The driver connects lazily, so constructing clients never touches the network.
#[allow(dead_code)]
pub const OFFLINE_URI: &str = "mongodb://localhost:27017/magic_mongo_test";

/// Check if a MongoDB server is available via environment variable.
#[allow(dead_code)]
pub fn mongo_available() -> bool {
    std::env::var("MONGODB_URI").is_ok()
}

/// Skip test with message if no MongoDB server is configured.
#[macro_export]
macro_rules! require_mongo {
    () => {
        if !crate::common::mongo_available() {
            eprintln!("⚠️  Skipping: MONGODB_URI not set");
            return;
        }
    };
}

/// Client for registry tests (no server needed).
#[allow(dead_code)]
pub async fn offline_mongo() -> MagicMongo {
    MagicMongo::connect(OFFLINE_URI)
        .await
        .expect("Offline URI should parse")
}

/// Connect to the server in MONGODB_URI, using a fresh database per test.
#[allow(dead_code)]
pub async fn test_db(test_name: &str) -> MagicDatabase {
    let uri = std::env::var("MONGODB_URI").expect("MONGODB_URI not set");
    let mongo = MagicMongo::connect(&uri)
        .await
        .expect("Failed to create MongoDB client");
    mongo.new_magic_database(&format!("magic_mongo_{}_{}", test_name, unique_suffix()))
}

/// Single-database client for the server in MONGODB_URI, if it names a database.
#[allow(dead_code)]
pub async fn test_single() -> Option<SingleMongo> {
    let uri = std::env::var("MONGODB_URI").ok()?;
    SingleMongo::connect(&uri).await.ok()
}

#[allow(dead_code)]
fn unique_suffix() -> u128 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}

/// Document type used across tests.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub score: i32,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Second document type, for registry tests.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub arena: String,
}

#[allow(dead_code)]
pub fn player(name: &str, score: i32) -> Player {
    Player {
        name: name.to_string(),
        score,
        tags: Vec::new(),
    }
}

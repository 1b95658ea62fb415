// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Magic-Mongo connection check
//!
//! Connects with the configured URI, pings every loaded database and
//! prints a JSON report of the collections found on the server.

use anyhow::Context;
use magic_mongo::{config::Config, MultiMongo};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Report entry for one database.
#[derive(Serialize)]
struct DatabaseReport {
    name: String,
    reachable: bool,
    collections: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let config = Config::from_env().context("Failed to load configuration")?;
    let mongo = MultiMongo::from_config(&config)
        .await
        .context("Failed to create MongoDB client")?;

    let names = mongo.database_names();
    if names.is_empty() {
        tracing::warn!("No databases configured; set a database in MONGODB_URI or MAGIC_MONGO_DATABASES");
    }

    let mut reports = Vec::with_capacity(names.len());
    for name in names {
        let database = mongo.get_magic_database(&name)?;

        let result = match database.ping().await {
            Ok(()) => database.list_server_collections().await,
            Err(e) => Err(e),
        };

        let report = match result {
            Ok(collections) => {
                tracing::info!(database = %name, count = collections.len(), "Database reachable");
                DatabaseReport {
                    name,
                    reachable: true,
                    collections,
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!(database = %name, error = %e, "Database check failed");
                DatabaseReport {
                    name,
                    reachable: false,
                    collections: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        };
        reports.push(report);
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);

    if reports.iter().any(|report| !report.reachable) {
        anyhow::bail!("One or more databases were unreachable");
    }
    Ok(())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("magic_mongo=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}

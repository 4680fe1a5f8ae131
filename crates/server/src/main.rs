// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! complaintd: HTTP server for complaint tracking.
//!
//! Reads an optional TOML config, applies command-line overrides, opens the
//! configured store and priority classifier, and serves the complaint API.

mod routes;

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ch_core::{Config, StoreBackend};

/// complaintd: Complaint tracking server
#[derive(Parser, Debug)]
#[command(name = "complaintd")]
#[command(about = "HTTP server for submitting and tracking complaints")]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind the server to
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// SQLite database file (selects the sqlite backend)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn load_config(&self) -> ch_core::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if let Some(db) = &self.db {
            config.store.backend = StoreBackend::Sqlite;
            config.store.path = db.clone();
        }
        Ok(config)
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let config = args.load_config()?;

    info!("Starting complaintd");
    info!("  Bind address: {}", config.server.bind);
    match config.store.backend {
        StoreBackend::Sqlite => info!("  Store: sqlite at {}", config.store.path.display()),
        StoreBackend::Memory => info!("  Store: memory (not persisted)"),
    }
    info!("  Collection: {}", config.store.collection);
    info!("  Classifier: {:?}", config.classifier.kind);

    // The blocking HTTP client must be created and dropped outside the runtime.
    let service = config.build_service()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(routes::serve(config.server.bind, service.clone()))?;
    drop(runtime);

    info!("complaintd stopped");
    Ok(())
}

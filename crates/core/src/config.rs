// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Service configuration.
//!
//! Configuration is read from a TOML file with three optional sections:
//! - `[store]`: backend (`sqlite` or `memory`), database path, collection
//! - `[classifier]`: kind (`http`, `keywords`, `hybrid`, `disabled`), endpoint
//! - `[server]`: bind address
//!
//! Every field has a default, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::classifier::{
    Classifier, DisabledClassifier, HttpClassifier, KeywordClassifier, DEFAULT_ENDPOINT,
};
use crate::db::SqliteStore;
use crate::error::{Error, Result};
use crate::service::{LifecycleService, DEFAULT_COLLECTION};
use crate::store::{ComplaintStore, MemoryStore};

const DEFAULT_DB_FILE: &str = "complaints.db";
const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub classifier: ClassifierConfig,
    pub server: ServerConfig,
}

/// Which store backend to open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Single-file SQLite document store.
    #[default]
    Sqlite,
    /// In-process store; contents are lost on exit.
    Memory,
}

/// Document store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Database file for the sqlite backend. Relative paths resolve against
    /// the directory of the config file.
    pub path: PathBuf,
    /// Collection complaints are stored in.
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            backend: StoreBackend::default(),
            path: PathBuf::from(DEFAULT_DB_FILE),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

/// How complaint priorities are computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    /// Remote prediction service.
    #[default]
    Http,
    /// Local keyword rules only.
    Keywords,
    /// Keyword rules first, remote prediction service for the rest.
    Hybrid,
    /// No classification; priorities read as unknown.
    Disabled,
}

/// Priority classifier settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub kind: ClassifierKind,
    /// Prediction endpoint for the `http` and `hybrid` kinds.
    pub endpoint: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            kind: ClassifierKind::default(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: DEFAULT_BIND
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 8080))),
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file. Relative store paths are resolved against
    /// the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let text = fs::read_to_string(path)?;
        let mut config = Self::from_toml(&text)?;

        if config.store.path.is_relative() {
            if let Some(dir) = path.parent() {
                config.store.path = dir.join(&config.store.path);
            }
        }
        Ok(config)
    }

    /// Check values serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        if self.store.collection.trim().is_empty() {
            return Err(Error::Config("store.collection cannot be empty".to_string()));
        }
        let needs_endpoint = matches!(
            self.classifier.kind,
            ClassifierKind::Http | ClassifierKind::Hybrid
        );
        if needs_endpoint
            && !(self.classifier.endpoint.starts_with("http://")
                || self.classifier.endpoint.starts_with("https://"))
        {
            return Err(Error::Config(format!(
                "classifier.endpoint must be an http(s) URL, got '{}'",
                self.classifier.endpoint
            )));
        }
        Ok(())
    }

    /// Open the configured store backend.
    pub fn open_store(&self) -> Result<Arc<dyn ComplaintStore>> {
        match self.store.backend {
            StoreBackend::Sqlite => Ok(Arc::new(SqliteStore::open(&self.store.path)?)),
            StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        }
    }

    /// Build the configured priority classifier.
    pub fn build_classifier(&self) -> Result<Arc<dyn Classifier>> {
        let endpoint = &self.classifier.endpoint;
        match self.classifier.kind {
            ClassifierKind::Http => Ok(Arc::new(HttpClassifier::new(endpoint.as_str())?)),
            ClassifierKind::Keywords => Ok(Arc::new(KeywordClassifier::new())),
            ClassifierKind::Hybrid => {
                let remote = HttpClassifier::new(endpoint.as_str())?;
                Ok(Arc::new(
                    KeywordClassifier::new().with_fallback(Box::new(remote)),
                ))
            }
            ClassifierKind::Disabled => Ok(Arc::new(DisabledClassifier)),
        }
    }

    /// Build the lifecycle service with its store and classifier.
    pub fn build_service(&self) -> Result<LifecycleService> {
        let store = self.open_store()?;
        let classifier = self.build_classifier()?;
        Ok(LifecycleService::new(store, classifier).with_collection(self.store.collection.as_str()))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

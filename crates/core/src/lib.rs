// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ch-core: complaint tracking library.
//!
//! This crate provides the complaint model, the document store contract and
//! its backends, the priority classifiers, and the lifecycle service that ties
//! them together. It is used by the `complaintd` HTTP server.
//!
//! # Main Components
//!
//! - [`LifecycleService`] - submit, list, status updates, and comments
//! - [`ComplaintStore`] - document store contract ([`MemoryStore`], [`SqliteStore`])
//! - [`Classifier`] - priority labels ([`HttpClassifier`], [`KeywordClassifier`])
//! - [`Config`] - TOML configuration and service construction
//! - [`Error`] - error types for all operations
//!
//! ```rust,ignore
//! use ch_core::{Config, NewComplaint};
//!
//! let service = Config::load(Path::new("complaintd.toml"))?.build_service()?;
//! let submitted = service.submit(NewComplaint::for_user("u1").with_description("broken fan"))?;
//! let mine = service.list_by_user("u1")?;
//! ```

pub mod classifier;
pub mod complaint;
pub mod config;
pub mod db;
pub mod error;
pub mod id;
pub mod service;
pub mod store;

pub use classifier::{
    Classifier, DisabledClassifier, HttpClassifier, KeywordClassifier, UNKNOWN_PRIORITY,
};
pub use complaint::{
    Comment, Complaint, Document, NewComment, NewComplaint, StatusChange, StatusUpdate, Submitted,
};
pub use config::{ClassifierKind, Config, StoreBackend};
pub use db::SqliteStore;
pub use error::{Error, ErrorKind, Result, UpdateStep};
pub use service::LifecycleService;
pub use store::{ComplaintStore, MemoryStore, StoredDocument};

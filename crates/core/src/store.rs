// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The complaint store contract and its in-memory backend.
//!
//! A store holds JSON documents grouped into named collections. Identifiers
//! are generated by the store on create. The two update primitives are a
//! field overwrite and an append to an array field. Each call is atomic on its
//! own; nothing groups calls into a transaction.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde_json::Value;

use crate::complaint::Document;
use crate::error::{Error, Result};
use crate::id::generate_unique_id;

/// A document together with its store-assigned identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub document: Document,
}

/// Document storage used by the lifecycle service.
pub trait ComplaintStore: Send + Sync {
    /// Stores a new document and returns its generated identifier.
    fn create(&self, collection: &str, document: Document) -> Result<String>;

    /// Returns one document, or [`Error::NotFound`].
    fn get(&self, collection: &str, id: &str) -> Result<StoredDocument>;

    /// Returns every document in the collection, each exactly once.
    fn get_all(&self, collection: &str) -> Result<Vec<StoredDocument>>;

    /// Returns the documents whose `field` is the string `value`.
    fn query_equal(&self, collection: &str, field: &str, value: &str)
        -> Result<Vec<StoredDocument>>;

    /// Overwrites the given top-level fields, leaving the rest untouched.
    fn update_fields(&self, collection: &str, id: &str, fields: Document) -> Result<()>;

    /// Appends `entry` to the array `field`, creating the array if absent.
    fn append_to_array(&self, collection: &str, id: &str, field: &str, entry: Value)
        -> Result<()>;
}

/// Overwrites `fields` into `document`.
pub(crate) fn merge_fields(document: &mut Document, fields: Document) {
    for (key, value) in fields {
        document.insert(key, value);
    }
}

/// Pushes `entry` onto the array `field` of `document`.
pub(crate) fn push_entry(document: &mut Document, field: &str, entry: Value) -> Result<()> {
    match document
        .entry(field.to_string())
        .or_insert_with(|| Value::Array(Vec::new()))
    {
        Value::Array(items) => {
            items.push(entry);
            Ok(())
        }
        other => Err(Error::CorruptedData(format!(
            "field '{field}' is not an array: {other}"
        ))),
    }
}

pub(crate) fn not_found(collection: &str, id: &str) -> Error {
    Error::NotFound {
        collection: collection.to_string(),
        id: id.to_string(),
    }
}

/// In-process store. Documents are kept in insertion order per collection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<StoredDocument>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<StoredDocument>>>> {
        self.collections
            .lock()
            .map_err(|_| Error::StoreUnavailable("memory store lock poisoned".to_string()))
    }

    fn with_document<T>(
        &self,
        collection: &str,
        id: &str,
        f: impl FnOnce(&mut Document) -> Result<T>,
    ) -> Result<T> {
        let mut collections = self.lock()?;
        let stored = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
            .ok_or_else(|| not_found(collection, id))?;
        f(&mut stored.document)
    }
}

impl ComplaintStore for MemoryStore {
    fn create(&self, collection: &str, document: Document) -> Result<String> {
        let seed = serde_json::to_string(&document)?;
        let mut collections = self.lock()?;
        let docs = collections.entry(collection.to_string()).or_default();
        let id = generate_unique_id(collection, &seed, &Utc::now(), |candidate| {
            Ok(docs.iter().any(|doc| doc.id == candidate))
        })?;
        docs.push(StoredDocument {
            id: id.clone(),
            document,
        });
        Ok(id)
    }

    fn get(&self, collection: &str, id: &str) -> Result<StoredDocument> {
        let collections = self.lock()?;
        collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id))
            .cloned()
            .ok_or_else(|| not_found(collection, id))
    }

    fn get_all(&self, collection: &str) -> Result<Vec<StoredDocument>> {
        let collections = self.lock()?;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    fn query_equal(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<StoredDocument>> {
        let collections = self.lock()?;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| doc.document.get(field).and_then(Value::as_str) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn update_fields(&self, collection: &str, id: &str, fields: Document) -> Result<()> {
        self.with_document(collection, id, |document| {
            merge_fields(document, fields);
            Ok(())
        })
    }

    fn append_to_array(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        entry: Value,
    ) -> Result<()> {
        self.with_document(collection, id, |document| push_entry(document, field, entry))
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
pub(crate) mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed document store.
//!
//! Each document is one row holding its JSON body, keyed by collection and
//! identifier. Rows keep an insertion sequence so listings come back in
//! creation order. Every [`ComplaintStore`] call runs under the connection
//! lock, and the read-modify-write updates run inside a transaction.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::complaint::Document;
use crate::error::{Error, Result};
use crate::id::generate_unique_id;
use crate::store::{merge_fields, not_found, push_entry, ComplaintStore, StoredDocument};

/// SQL schema for the document store.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    collection TEXT NOT NULL,
    id TEXT NOT NULL,
    body TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (collection, id)
);

CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection, seq);
"#;

/// Parse a stored JSON body into a document.
fn parse_document(body: &str) -> Result<Document> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(other) => Err(Error::CorruptedData(format!(
            "document body is not an object: {other}"
        ))),
        Err(e) => Err(Error::CorruptedData(format!("invalid document body: {e}"))),
    }
}

/// JSON path selecting a top-level field.
fn field_path(field: &str) -> String {
    format!("$.\"{field}\"")
}

fn into_stored(rows: Vec<(String, String)>) -> Result<Vec<StoredDocument>> {
    rows.into_iter()
        .map(|(id, body)| {
            Ok(StoredDocument {
                id,
                document: parse_document(&body)?,
            })
        })
        .collect()
}

/// Document store on a single SQLite connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a store at the given path, creating the file and schema if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        conn.execute_batch(SCHEMA)?;

        tracing::debug!("opened document store at {}", path.display());
        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::StoreUnavailable("database lock poisoned".to_string()))
    }

    /// Read, change, and write back one document in a single transaction.
    fn modify(
        &self,
        collection: &str,
        id: &str,
        change: impl FnOnce(&mut Document) -> Result<()>,
    ) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let body: Option<String> = tx
            .query_row(
                "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
                |row| row.get(0),
            )
            .optional()?;
        let body = body.ok_or_else(|| not_found(collection, id))?;

        let mut document = parse_document(&body)?;
        change(&mut document)?;

        tx.execute(
            "UPDATE documents SET body = ?1, updated_at = ?2 WHERE collection = ?3 AND id = ?4",
            params![
                serde_json::to_string(&document)?,
                Utc::now().to_rfc3339(),
                collection,
                id
            ],
        )?;
        tx.commit()?;
        Ok(())
    }
}

impl ComplaintStore for SqliteStore {
    fn create(&self, collection: &str, document: Document) -> Result<String> {
        let body = serde_json::to_string(&document)?;
        let now = Utc::now();
        let conn = self.lock()?;

        let id = generate_unique_id(collection, &body, &now, |candidate| {
            Ok(conn.query_row(
                "SELECT COUNT(*) > 0 FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, candidate],
                |row| row.get(0),
            )?)
        })?;

        conn.execute(
            "INSERT INTO documents (collection, id, body, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![collection, id, body, now.to_rfc3339()],
        )?;
        Ok(id)
    }

    fn get(&self, collection: &str, id: &str) -> Result<StoredDocument> {
        let conn = self.lock()?;
        let body: Option<String> = conn
            .query_row(
                "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
                |row| row.get(0),
            )
            .optional()?;

        let body = body.ok_or_else(|| not_found(collection, id))?;
        Ok(StoredDocument {
            id: id.to_string(),
            document: parse_document(&body)?,
        })
    }

    fn get_all(&self, collection: &str) -> Result<Vec<StoredDocument>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT id, body FROM documents WHERE collection = ?1 ORDER BY seq")?;
        let rows = stmt
            .query_map(params![collection], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<(String, String)>, _>>()?;
        into_stored(rows)
    }

    fn query_equal(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<StoredDocument>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, body FROM documents
             WHERE collection = ?1 AND json_extract(body, ?2) = ?3
             ORDER BY seq",
        )?;
        let rows = stmt
            .query_map(params![collection, field_path(field), value], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })?
            .collect::<std::result::Result<Vec<(String, String)>, _>>()?;
        into_stored(rows)
    }

    fn update_fields(&self, collection: &str, id: &str, fields: Document) -> Result<()> {
        self.modify(collection, id, |document| {
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
        self.modify(collection, id, |document| push_entry(document, field, entry))
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;

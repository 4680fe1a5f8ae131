// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Document identifier generation shared by the store backends.

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Length of a generated identifier in hex characters.
pub const ID_LEN: usize = 20;

/// Generate a document ID from its collection, content, and creation time.
/// Format: first 20 hex chars of SHA256(collection + seed + timestamp)
pub fn generate_id(collection: &str, seed: &str, created_at: &DateTime<Utc>) -> String {
    let input = format!(
        "{}{}{}",
        collection,
        seed,
        created_at.to_rfc3339_opts(SecondsFormat::Nanos, true)
    );
    let hash = Sha256::digest(input.as_bytes());
    hex::encode(&hash[..ID_LEN / 2])
}

/// Generate a unique ID, handling collisions by appending incrementing suffix.
/// A failed existence check stops generation and is returned.
pub fn generate_unique_id<F>(
    collection: &str,
    seed: &str,
    created_at: &DateTime<Utc>,
    exists: F,
) -> Result<String>
where
    F: Fn(&str) -> Result<bool>,
{
    let base_id = generate_id(collection, seed, created_at);

    if !exists(&base_id)? {
        return Ok(base_id);
    }

    let mut suffix = 2;
    loop {
        let id = format!("{}-{}", base_id, suffix);
        if !exists(&id)? {
            return Ok(id);
        }
        suffix += 1;
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;

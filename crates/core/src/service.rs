// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The complaint lifecycle service.
//!
//! Validates requests, forwards them to the [`ComplaintStore`], and enriches
//! the admin listing with priorities from the [`Classifier`]. Status history
//! and comments are append-only: no operation here removes or reorders them.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::classifier::{Classifier, UNKNOWN_PRIORITY};
use crate::complaint::{Complaint, NewComment, NewComplaint, StatusChange, Submitted};
use crate::error::{Error, Result, UpdateStep};
use crate::store::{ComplaintStore, StoredDocument};

/// Collection complaints are stored in unless configured otherwise.
pub const DEFAULT_COLLECTION: &str = "complaints";

const UPDATES_FIELD: &str = "updates";
const COMMENTS_FIELD: &str = "comments";

/// Complaint operations over an injected store and classifier.
#[derive(Clone)]
pub struct LifecycleService {
    store: Arc<dyn ComplaintStore>,
    classifier: Arc<dyn Classifier>,
    collection: String,
}

impl LifecycleService {
    pub fn new(store: Arc<dyn ComplaintStore>, classifier: Arc<dyn Classifier>) -> Self {
        LifecycleService {
            store,
            classifier,
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    /// Uses a different collection (builder pattern).
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Stores a new complaint stamped with the current time.
    pub fn submit(&self, submission: NewComplaint) -> Result<Submitted> {
        submission.validate()?;
        let document = submission.into_document(Utc::now())?;
        let id = self.store.create(&self.collection, document)?;
        debug!("created complaint {}", id);
        Ok(Submitted {
            id,
            message: "Complaint created successfully".to_string(),
        })
    }

    /// Lists every complaint, filling in missing priorities from descriptions.
    ///
    /// Computed priorities are not written back. A classifier failure only
    /// affects that complaint, which reads as [`UNKNOWN_PRIORITY`].
    pub fn list_all(&self) -> Result<Vec<Complaint>> {
        let mut complaints = to_complaints(self.store.get_all(&self.collection)?)?;
        for complaint in &mut complaints {
            if complaint.priority.is_some() {
                continue;
            }
            if let Some(description) = &complaint.description {
                complaint.priority = Some(self.classify(description));
            }
        }
        Ok(complaints)
    }

    /// Lists the complaints submitted by `uid`. No priority enrichment.
    pub fn list_by_user(&self, uid: &str) -> Result<Vec<Complaint>> {
        to_complaints(self.store.query_equal(&self.collection, "uid", uid)?)
    }

    /// Reads one complaint as stored.
    pub fn get(&self, id: &str) -> Result<Complaint> {
        let stored = self.store.get(&self.collection, id)?;
        Complaint::from_document(&stored.id, stored.document)
    }

    /// Overwrites status fields, then appends the change to the history.
    ///
    /// The two store calls are separate. When the append fails after the
    /// overwrite succeeded, the complaint keeps the new fields without a
    /// history entry and the error names [`UpdateStep::HistoryAppend`].
    pub fn update_status(&self, id: &str, change: StatusChange) -> Result<()> {
        let now = Utc::now();

        let fields = change.overwrite_fields(now)?;
        self.store
            .update_fields(&self.collection, id, fields)
            .map_err(|e| step_failed(UpdateStep::FieldOverwrite, e))?;

        let entry = serde_json::to_value(change.history_entry(now))?;
        self.store
            .append_to_array(&self.collection, id, UPDATES_FIELD, entry)
            .map_err(|e| {
                warn!(
                    "complaint {} status overwritten but history append failed: {}",
                    id, e
                );
                step_failed(UpdateStep::HistoryAppend, e)
            })?;

        debug!("updated status of complaint {}", id);
        Ok(())
    }

    /// Appends a comment. Blank content is rejected before the store is called.
    pub fn add_comment(&self, id: &str, request: NewComment) -> Result<()> {
        let comment = request.into_comment(Utc::now())?;
        let entry = serde_json::to_value(comment)?;
        self.store
            .append_to_array(&self.collection, id, COMMENTS_FIELD, entry)?;
        debug!("added comment to complaint {}", id);
        Ok(())
    }

    /// Classifies `text`, answering [`UNKNOWN_PRIORITY`] on any failure.
    pub fn classify(&self, text: &str) -> String {
        match self.classifier.classify(text) {
            Ok(label) if !label.trim().is_empty() => label,
            Ok(_) => {
                warn!("priority classifier returned an empty label");
                UNKNOWN_PRIORITY.to_string()
            }
            Err(e) => {
                warn!("priority classification failed: {}", e);
                UNKNOWN_PRIORITY.to_string()
            }
        }
    }
}

fn step_failed(step: UpdateStep, source: Error) -> Error {
    Error::StatusUpdate {
        step,
        source: Box::new(source),
    }
}

fn to_complaints(documents: Vec<StoredDocument>) -> Result<Vec<Complaint>> {
    documents
        .into_iter()
        .map(|stored| Complaint::from_document(&stored.id, stored.document))
        .collect()
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;

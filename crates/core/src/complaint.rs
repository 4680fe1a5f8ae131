// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Complaint types and the typed requests that create and change them.
//!
//! Complaints are stored as JSON documents. The wire and storage names are
//! camelCase (`updatedAt`, `userId`, ...). Submitted fields the model does not
//! name (title, category, location, ...) are kept verbatim in `extra`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// A stored document: a JSON object keyed by field name.
pub type Document = serde_json::Map<String, Value>;

/// Recorded as `by` on history entries when no updater is named.
pub const DEFAULT_UPDATER: &str = "admin";
/// Recorded as `userId` on comments when none is given.
pub const DEFAULT_COMMENT_USER_ID: &str = "admin";
/// Recorded as `userName` on comments when none is given.
pub const DEFAULT_COMMENT_USER_NAME: &str = "Admin";

/// Field names owned by the server. Submissions cannot set them.
pub const RESERVED_FIELDS: &[&str] = &[
    "id",
    "timestamp",
    "updatedAt",
    "updatedBy",
    "updates",
    "comments",
];

/// A complaint as read back from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    /// Store-assigned identifier.
    pub id: String,
    /// The submitting user.
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Submitted priority, or one computed at read time (never persisted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Creation time, set by the server.
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    /// Status history, oldest first.
    #[serde(default)]
    pub updates: Vec<StatusUpdate>,
    /// Comments, oldest first.
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Any other submitted fields.
    #[serde(flatten)]
    pub extra: Document,
}

impl Complaint {
    /// Maps a stored document to a complaint, attaching its identifier.
    pub fn from_document(id: &str, mut document: Document) -> Result<Self> {
        document.insert("id".to_string(), Value::String(id.to_string()));
        Ok(serde_json::from_value(Value::Object(document))?)
    }
}

/// One entry in a complaint's status history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// Who made the change.
    pub by: String,
    /// When the change was made.
    pub date: DateTime<Utc>,
    /// The status set by this change, if any.
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A comment attached to a complaint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub user_id: String,
    pub user_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A complaint submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComplaint {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Document,
}

impl NewComplaint {
    /// Creates a submission for the given user with no other fields.
    pub fn for_user(uid: impl Into<String>) -> Self {
        NewComplaint {
            uid: Some(uid.into()),
            ..Default::default()
        }
    }

    /// Sets the description (builder pattern).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority (builder pattern).
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Checks that the submission names a user.
    pub fn validate(&self) -> Result<()> {
        match self.uid.as_deref() {
            Some(uid) if !uid.trim().is_empty() => Ok(()),
            _ => Err(Error::MissingUid),
        }
    }

    /// Builds the document to store, stamped with its creation time.
    ///
    /// Reserved fields in `extra` are dropped.
    pub fn into_document(self, timestamp: DateTime<Utc>) -> Result<Document> {
        self.validate()?;

        let mut document = self.extra;
        for field in RESERVED_FIELDS {
            document.remove(*field);
        }

        let optional = [
            ("uid", self.uid),
            ("description", self.description),
            ("priority", self.priority),
            ("status", self.status),
        ];
        for (field, value) in optional {
            match value {
                Some(value) => {
                    document.insert(field.to_string(), Value::String(value));
                }
                None => {
                    document.remove(field);
                }
            }
        }
        document.insert("timestamp".to_string(), serde_json::to_value(timestamp)?);
        Ok(document)
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submitted {
    pub id: String,
    pub message: String,
}

/// A status update request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    /// `None` leaves the status alone, `Some(None)` clears it.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<Option<String>>,
    #[serde(default)]
    pub updated_by: Option<String>,
    /// Note recorded on the history entry only.
    #[serde(default)]
    pub description: Option<String>,
}

impl StatusChange {
    /// Creates a change to the given status.
    pub fn to(status: impl Into<String>) -> Self {
        StatusChange {
            status: Some(Some(status.into())),
            ..Default::default()
        }
    }

    /// Creates a change that clears the status.
    pub fn clear() -> Self {
        StatusChange {
            status: Some(None),
            ..Default::default()
        }
    }

    /// Sets who made the change (builder pattern).
    pub fn by(mut self, updated_by: impl Into<String>) -> Self {
        self.updated_by = Some(updated_by.into());
        self
    }

    /// Sets the history note (builder pattern).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Fields to overwrite on the complaint. `updatedAt` is always set.
    pub fn overwrite_fields(&self, now: DateTime<Utc>) -> Result<Document> {
        let mut fields = Document::new();
        match &self.status {
            Some(Some(status)) => {
                fields.insert("status".to_string(), Value::String(status.clone()));
            }
            Some(None) => {
                fields.insert("status".to_string(), Value::Null);
            }
            None => {}
        }
        if let Some(updated_by) = &self.updated_by {
            fields.insert("updatedBy".to_string(), Value::String(updated_by.clone()));
        }
        fields.insert("updatedAt".to_string(), serde_json::to_value(now)?);
        Ok(fields)
    }

    /// The history entry this change appends.
    pub fn history_entry(&self, now: DateTime<Utc>) -> StatusUpdate {
        StatusUpdate {
            by: self
                .updated_by
                .clone()
                .unwrap_or_else(|| DEFAULT_UPDATER.to_string()),
            date: now,
            status: self.status.clone().flatten(),
            description: self.description.clone(),
        }
    }
}

/// A comment request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl NewComment {
    /// Creates a comment with the given content and default author.
    pub fn new(content: impl Into<String>) -> Self {
        NewComment {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Sets the author (builder pattern).
    pub fn from_user(mut self, user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self.user_name = Some(user_name.into());
        self
    }

    /// Builds the comment entry, rejecting missing or blank content.
    pub fn into_comment(self, now: DateTime<Utc>) -> Result<Comment> {
        let content = match self.content {
            Some(content) if !content.trim().is_empty() => content,
            _ => return Err(Error::FieldEmpty { field: "content" }),
        };
        Ok(Comment {
            user_id: self
                .user_id
                .unwrap_or_else(|| DEFAULT_COMMENT_USER_ID.to_string()),
            user_name: self
                .user_name
                .unwrap_or_else(|| DEFAULT_COMMENT_USER_NAME.to_string()),
            content,
            created_at: now,
        })
    }
}

/// Marks a field as present, so an explicit `null` reads as `Some(None)`.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
#[path = "complaint_tests.rs"]
mod tests;

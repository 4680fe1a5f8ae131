// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Priority classifiers.
//!
//! A classifier maps complaint text to a priority label. Failures are returned
//! as errors here; the lifecycle service is the one that downgrades them to
//! [`UNKNOWN_PRIORITY`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Label used when no classification is available.
pub const UNKNOWN_PRIORITY: &str = "Unknown";

/// Prediction endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5001/predict";

/// Maps complaint text to a priority label.
pub trait Classifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    priority: Option<Value>,
}

/// Calls a remote prediction service.
///
/// Sends `{"text": ...}` by POST and reads `priority` from the JSON reply.
/// Requests use the HTTP client's default timeout and are never retried.
pub struct HttpClassifier {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpClassifier {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder().build()?;
        Ok(HttpClassifier {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// The prediction URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Classifier for HttpClassifier {
    fn classify(&self, text: &str) -> Result<String> {
        let response: PredictResponse = self
            .client
            .post(&self.endpoint)
            .json(&PredictRequest { text })
            .send()?
            .error_for_status()?
            .json()?;

        match response.priority {
            Some(Value::String(label)) => Ok(label),
            Some(Value::Null) | None => Err(Error::Classifier(format!(
                "response from {} has no priority",
                self.endpoint()
            ))),
            Some(other) => Ok(other.to_string()),
        }
    }
}

/// Keywords that mark a complaint as high priority.
const HIGH_KEYWORDS: &[&str] = &[
    "exam",
    "teacher",
    "professor",
    "grading",
    "marks",
    "syllabus",
    "assignment",
    "academic",
    "attendance",
    "lecture",
];

/// Keywords that mark a complaint as medium priority.
const MEDIUM_KEYWORDS: &[&str] = &[
    "lab",
    "lift",
    "wifi",
    "water",
    "parking",
    "fan",
    "electric",
    "infrastructure",
    "classroom",
    "hostel",
    "bathroom",
    "library",
    "security",
    "gate",
    "noise",
];

/// Keywords that mark a complaint as low priority.
const LOW_KEYWORDS: &[&str] = &[
    "canteen",
    "food",
    "mess",
    "campus",
    "parking",
    "cafeteria",
    "snack",
    "juice",
];

/// Rule-based classifier over campus complaint keywords.
///
/// Tiers are checked high, medium, then low; the first tier with a keyword
/// contained in the lowercased text wins. Text matching no keyword goes to the
/// fallback classifier when one is set, and is an error otherwise.
#[derive(Default)]
pub struct KeywordClassifier {
    fallback: Option<Box<dyn Classifier>>,
}

impl KeywordClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consults `fallback` when no keyword matches (builder pattern).
    pub fn with_fallback(mut self, fallback: Box<dyn Classifier>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Returns the label of the first matching keyword tier.
    pub fn match_rules(text: &str) -> Option<&'static str> {
        let text = text.to_lowercase();
        let tiers = [
            ("High", HIGH_KEYWORDS),
            ("Medium", MEDIUM_KEYWORDS),
            ("Low", LOW_KEYWORDS),
        ];
        tiers
            .into_iter()
            .find(|(_, keywords)| keywords.iter().any(|kw| text.contains(kw)))
            .map(|(label, _)| label)
    }
}

impl Classifier for KeywordClassifier {
    fn classify(&self, text: &str) -> Result<String> {
        if let Some(label) = Self::match_rules(text) {
            return Ok(label.to_string());
        }
        match &self.fallback {
            Some(fallback) => fallback.classify(text),
            None => Err(Error::Classifier("no keyword rule matched".to_string())),
        }
    }
}

/// A classifier that never answers. Every complaint reads as unknown priority.
#[derive(Debug, Default)]
pub struct DisabledClassifier;

impl Classifier for DisabledClassifier {
    fn classify(&self, _text: &str) -> Result<String> {
        Err(Error::Classifier("classification disabled".to_string()))
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;

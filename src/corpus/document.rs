//! Persisted corpus document
//!
//! The whole corpus round-trips through a single flat JSON document.
//! Every field defaults so documents written by older versions load as
//! empty collections instead of failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::metrics::PerformanceMetrics;
use crate::error::ImportError;
use crate::types::{FeedbackRecord, TrainingExample};

/// Wire form of a corpus: `{ examples, feedback, metrics, exported_at }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusDocument {
    #[serde(default)]
    pub examples: Vec<TrainingExample>,
    #[serde(default)]
    pub feedback: Vec<FeedbackRecord>,
    #[serde(default)]
    pub metrics: PerformanceMetrics,
    /// Stamp of the export; the only field that differs between two
    /// exports of the same corpus
    #[serde(default = "Utc::now")]
    pub exported_at: DateTime<Utc>,
}

impl Default for CorpusDocument {
    fn default() -> Self {
        Self {
            examples: Vec::new(),
            feedback: Vec::new(),
            metrics: PerformanceMetrics::default(),
            exported_at: Utc::now(),
        }
    }
}

impl CorpusDocument {
    /// Parse a document from JSON text.
    ///
    /// Missing fields degrade to empty defaults; fundamentally
    /// non-document input is an `ImportError`.
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a document from an already-decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ImportError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize as pretty JSON for on-disk storage and package embedding.
    pub fn to_json(&self) -> Result<String, ImportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let doc = CorpusDocument::from_json("{}").unwrap();
        assert!(doc.examples.is_empty());
        assert!(doc.feedback.is_empty());
        assert_eq!(doc.metrics, PerformanceMetrics::default());
    }

    #[test]
    fn test_partial_document_loads() {
        let json = r#"{"examples": [{"user_input": "hi", "actual_response": "Hello!",
            "timestamp": "2024-01-01T00:00:00Z"}]}"#;
        let doc = CorpusDocument::from_json(json).unwrap();
        assert_eq!(doc.examples.len(), 1);
        assert_eq!(doc.examples[0].user_input, "hi");
        assert!(doc.examples[0].satisfaction.is_none());
    }

    #[test]
    fn test_non_document_input_is_import_error() {
        let err = CorpusDocument::from_json("not json at all").unwrap_err();
        assert!(matches!(err, ImportError::Malformed(_)));

        // A bare array is structured JSON but not a document
        assert!(CorpusDocument::from_json("[1, 2, 3]").is_err());
    }
}

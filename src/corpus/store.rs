//! Corpus Store - owns the interaction corpus and its persistence
//!
//! The corpus is a plain value owned by the caller; persistence is a
//! whole-document read-then-replace against a single JSON file. There is
//! no locking: one local writer is assumed, and concurrent writers lose
//! the race (last save wins).

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::document::CorpusDocument;
use super::metrics::PerformanceMetrics;
use crate::types::{FeedbackRecord, TrainingExample};

/// The full set of recorded examples and feedback owned by one trainer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    /// Recorded interactions, insertion order = chronological
    pub examples: Vec<TrainingExample>,
    /// Explicit user ratings
    pub feedback: Vec<FeedbackRecord>,
    /// Last-computed metrics; a cached snapshot, not authoritative
    pub metrics: PerformanceMetrics,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interaction. Never fails for well-typed input.
    pub fn record(&mut self, example: TrainingExample) {
        self.examples.push(example);
        debug!("Recorded example, corpus now has {}", self.examples.len());
    }

    /// Append a feedback record. Never fails for well-typed input.
    pub fn record_feedback(&mut self, feedback: FeedbackRecord) {
        self.feedback.push(feedback);
        debug!("Recorded feedback, corpus now has {}", self.feedback.len());
    }

    /// Compute metrics over the trailing `window`, caching the result.
    ///
    /// If no example falls inside the window the cached metrics are
    /// returned unchanged — never a division by zero, never NaN.
    pub fn metrics(&mut self, window: Duration) -> PerformanceMetrics {
        self.metrics_at(window, Utc::now())
    }

    /// Same as [`metrics`](Self::metrics) with an explicit cutoff.
    pub fn metrics_at(&mut self, window: Duration, now: DateTime<Utc>) -> PerformanceMetrics {
        let cutoff = now - window;
        let recent: Vec<TrainingExample> = self
            .examples
            .iter()
            .filter(|e| e.timestamp >= cutoff)
            .cloned()
            .collect();

        if recent.is_empty() {
            return self.metrics.clone();
        }

        self.metrics = PerformanceMetrics::compute(&recent);
        self.metrics.clone()
    }

    /// Export the corpus as a single document.
    ///
    /// Deterministic: two exports with no intervening writes differ only
    /// in `exported_at`.
    pub fn export_document(&self) -> CorpusDocument {
        CorpusDocument {
            examples: self.examples.clone(),
            feedback: self.feedback.clone(),
            metrics: self.metrics.clone(),
            exported_at: Utc::now(),
        }
    }

    /// Replace in-memory state wholesale from a document.
    ///
    /// All-or-nothing: the previous state is fully discarded, nothing is
    /// merged. Missing collections in the document already defaulted to
    /// empty at parse time.
    pub fn load_document(&mut self, doc: CorpusDocument) {
        self.examples = doc.examples;
        self.feedback = doc.feedback;
        self.metrics = doc.metrics;
        info!(
            "Loaded corpus document: {} examples, {} feedback records",
            self.examples.len(),
            self.feedback.len()
        );
    }

    /// Clear everything; metrics fall back to zero values.
    pub fn reset(&mut self) {
        self.examples.clear();
        self.feedback.clear();
        self.metrics = PerformanceMetrics::default();
        info!("Corpus reset");
    }
}

/// Flat-document persistence for a [`Corpus`].
pub struct CorpusStore {
    path: PathBuf,
}

impl CorpusStore {
    /// Store at the default location under the data directory.
    pub fn new() -> Result<Self> {
        let path = crate::config::data_dir()?.join("corpus.json");
        Ok(Self { path })
    }

    /// Store at a custom path (used by tests and the CLI config).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted corpus.
    ///
    /// A missing file yields an empty corpus; so does a malformed one,
    /// with a warning — corpus loss must never crash the host UI.
    pub fn load(&self) -> Corpus {
        if !self.path.exists() {
            return Corpus::new();
        }

        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to read corpus file {}: {}", self.path.display(), e);
                return Corpus::new();
            }
        };

        match CorpusDocument::from_json(&json) {
            Ok(doc) => {
                let mut corpus = Corpus::new();
                corpus.load_document(doc);
                corpus
            }
            Err(e) => {
                warn!(
                    "Corpus file {} is malformed ({}), starting empty",
                    self.path.display(),
                    e
                );
                Corpus::new()
            }
        }
    }

    /// Replace the persisted document with the current corpus state.
    pub fn save(&self, corpus: &Corpus) -> Result<()> {
        let doc = corpus.export_document();
        let json = doc.to_json().context("Failed to serialize corpus")?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create corpus directory")?;
        }
        std::fs::write(&self.path, json).context("Failed to write corpus file")?;

        info!(
            "Saved corpus ({} examples, {} feedback) to {}",
            corpus.examples.len(),
            corpus.feedback.len(),
            self.path.display()
        );
        Ok(())
    }
}

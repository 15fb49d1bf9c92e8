//! Corpus Store module
//!
//! Owns the interaction corpus (examples + feedback):
//! - Append-only recording of interactions and ratings
//! - Point-in-time metrics over a sliding time window
//! - Whole-document persistence and restore

pub mod document;
pub mod metrics;
pub mod store;

pub use document::CorpusDocument;
pub use metrics::PerformanceMetrics;
pub use store::{Corpus, CorpusStore};

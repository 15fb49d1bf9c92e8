//! Bot Trainer - Training-Data Pipeline Library
//!
//! The feedback-driven training pipeline behind a rule-based
//! conversational assistant:
//! - Corpus store for recorded interactions and user ratings
//! - Windowed quality metrics with release-threshold analysis
//! - Shareable tester packages and conflict-resolving corpus merge
//!
//! # Example
//!
//! ```
//! use bot_trainer::corpus::Corpus;
//! use bot_trainer::readiness;
//! use bot_trainer::types::TrainingExample;
//!
//! let mut corpus = Corpus::new();
//! corpus.record(
//!     TrainingExample::new("add 20 for lunch", "Added 20 to lunch.")
//!         .with_intents(Some("addExpense"), Some("addExpense"))
//!         .with_satisfaction(0.9),
//! );
//! let analysis = readiness::analyze(&corpus);
//! println!("{}", analysis.performance.status);
//! ```

// Core modules (order matters for cross-module dependencies)
pub mod error;
pub mod types;
pub mod config;
pub mod corpus; // Must come before readiness/collab since both consume it
pub mod readiness;
pub mod collab;
pub mod cli;

// Re-export commonly used types for convenience
pub use corpus::{Corpus, CorpusDocument, CorpusStore, PerformanceMetrics};

pub use types::{FeedbackRecord, TrainingExample};

pub use readiness::{analyze, analyze_at, ReadinessAnalysis};

pub use collab::{build_package, merge_package, MergeOptions, MergeReport, TrainingPackage};

pub use error::ImportError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get the library info
pub fn info() -> String {
    format!("{} v{} - Training-Data Pipeline Library", NAME, VERSION)
}

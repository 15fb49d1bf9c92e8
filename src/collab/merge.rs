//! Conflict-resolving corpus merge
//!
//! Folds an externally-returned corpus into the local one: unknown inputs
//! are appended, known inputs have their satisfaction averaged, feedback
//! is always appended. No incoming data is ever silently dropped, and
//! re-merging the same package imports nothing new.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::package::TrainingPackage;
use crate::corpus::{Corpus, CorpusDocument, PerformanceMetrics};

/// What a single merge call did. Informational only, never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeReport {
    /// Examples appended because no local example shared their input
    pub imported: usize,
    /// Examples folded into an existing local example
    pub merged: usize,
    /// Merges where the two satisfaction values actually differed
    pub conflicts: usize,
    /// Human-readable deltas for every metric that improved
    pub improvements: Vec<String>,
}

/// Merge behavior switches.
#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    /// Compare merge keys after trim + casefold instead of exact string
    /// equality. Changes which inputs collide; off by default.
    pub normalize_keys: bool,
}

fn merge_key(input: &str, options: &MergeOptions) -> String {
    if options.normalize_keys {
        input.trim().to_lowercase()
    } else {
        input.to_string()
    }
}

/// Merge a returned training package with default options.
pub fn merge_package(corpus: &mut Corpus, package: &TrainingPackage) -> MergeReport {
    merge_package_with(corpus, package, &MergeOptions::default())
}

/// Merge a returned training package.
pub fn merge_package_with(
    corpus: &mut Corpus,
    package: &TrainingPackage,
    options: &MergeOptions,
) -> MergeReport {
    merge_document_with(corpus, &package.current_training_data, options)
}

/// Merge an incoming corpus document into the local corpus.
///
/// The caller is responsible for persisting the mutated corpus.
pub fn merge_document_with(
    corpus: &mut Corpus,
    incoming: &CorpusDocument,
    options: &MergeOptions,
) -> MergeReport {
    let before = PerformanceMetrics::compute(&corpus.examples);
    let mut report = MergeReport::default();

    for example in &incoming.examples {
        let key = merge_key(&example.user_input, options);
        let existing = corpus
            .examples
            .iter_mut()
            .find(|e| merge_key(&e.user_input, options) == key);

        match existing {
            None => {
                corpus.examples.push(example.clone());
                report.imported += 1;
            }
            Some(local) => {
                // Conflict rule: average, never overwrite. One-sided
                // values adopt the present side.
                match (local.satisfaction, example.satisfaction) {
                    (Some(ours), Some(theirs)) => {
                        if ours != theirs {
                            report.conflicts += 1;
                        }
                        local.satisfaction = Some(((ours + theirs) / 2.0).clamp(0.0, 1.0));
                    }
                    (None, Some(theirs)) => local.satisfaction = Some(theirs),
                    _ => {}
                }
                report.merged += 1;
            }
        }
    }

    // Feedback has no identity key; duplicates are independent human
    // judgments and are kept.
    corpus.feedback.extend(incoming.feedback.iter().cloned());

    let after = PerformanceMetrics::compute(&corpus.examples);
    report.improvements = describe_improvements(&before, &after);
    corpus.metrics = after;

    info!(
        "Merge complete: {} imported, {} merged, {} conflicts",
        report.imported, report.merged, report.conflicts
    );
    report
}

/// Deltas for metrics that got better: accuracy and satisfaction when
/// they rose, response time when it fell.
fn describe_improvements(before: &PerformanceMetrics, after: &PerformanceMetrics) -> Vec<String> {
    let mut improvements = Vec::new();
    if after.accuracy > before.accuracy {
        improvements.push(format!(
            "accuracy improved: {:.1}% → {:.1}%",
            before.accuracy, after.accuracy
        ));
    }
    if after.user_satisfaction > before.user_satisfaction {
        improvements.push(format!(
            "user satisfaction improved: {:.1}% → {:.1}%",
            before.user_satisfaction, after.user_satisfaction
        ));
    }
    if after.response_time_ms < before.response_time_ms {
        improvements.push(format!(
            "response time improved: {:.0}ms → {:.0}ms",
            before.response_time_ms, after.response_time_ms
        ));
    }
    improvements
}

//! Problem identification
//!
//! Independent sub-analyses over the recent window: intent recognition
//! errors, low-satisfaction responses, feedback polarity, and repeated
//! misclassification patterns.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{FeedbackRecord, TrainingExample};

/// Satisfaction below this (a 1-5 rating below 3) flags a response for review
pub const LOW_SATISFACTION_THRESHOLD: f64 = 0.6;

/// Cap on low-satisfaction samples surfaced for manual review
pub const MAX_REVIEW_SAMPLES: usize = 5;

/// How many problematic intents to report
const TOP_PROBLEM_INTENTS: usize = 3;

/// All identified problems, grouped by sub-analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProblemReport {
    pub intent_recognition: IntentRecognitionReport,
    pub response_quality: ResponseQualityReport,
    pub user_feedback: FeedbackSummary,
    pub patterns: Vec<PatternFinding>,
}

/// Intent recognition errors over the qualifying subset
/// (examples carrying both intent fields).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntentRecognitionReport {
    /// Examples with both intents present
    pub qualifying: usize,
    /// Of those, how many disagreed
    pub errors: usize,
    /// 100 × (qualifying − errors) / qualifying, 0 when nothing qualifies
    pub accuracy: f64,
    /// Up to three intents ranked by error frequency, descending
    pub problematic_intents: Vec<IntentErrorCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentErrorCount {
    pub intent: String,
    pub errors: usize,
}

/// Low-satisfaction responses flagged for manual review.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseQualityReport {
    pub low_satisfaction_count: usize,
    /// First few offenders in encounter order, not re-sorted
    pub samples: Vec<LowSatisfactionSample>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LowSatisfactionSample {
    pub user_input: String,
    pub response: String,
    pub satisfaction: f64,
}

/// Feedback split into positive (rating ≥ 4) and negative (rating < 3).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackSummary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    /// 100 × positive / total, 0 when there is no feedback at all
    pub feedback_ratio: f64,
}

/// A recurring failure worth a pattern rule of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternFinding {
    pub description: String,
    pub occurrences: usize,
}

/// Run every sub-analysis over the windowed examples and the feedback log.
pub fn identify(examples: &[TrainingExample], feedback: &[FeedbackRecord]) -> ProblemReport {
    ProblemReport {
        intent_recognition: analyze_intent_recognition(examples),
        response_quality: analyze_response_quality(examples, feedback),
        user_feedback: summarize_feedback(feedback),
        patterns: find_misclassification_patterns(examples),
    }
}

fn analyze_intent_recognition(examples: &[TrainingExample]) -> IntentRecognitionReport {
    let qualifying: Vec<_> = examples.iter().filter(|e| e.has_intent_pair()).collect();
    let errors: Vec<_> = qualifying.iter().filter(|e| !e.intent_matched()).collect();

    let accuracy = if qualifying.is_empty() {
        0.0
    } else {
        100.0 * (qualifying.len() - errors.len()) as f64 / qualifying.len() as f64
    };

    // Rank intents by how often they were missed
    let mut error_counts: HashMap<&str, usize> = HashMap::new();
    for example in &errors {
        if let Some(ref expected) = example.expected_intent {
            *error_counts.entry(expected.as_str()).or_default() += 1;
        }
    }
    let mut problematic: Vec<IntentErrorCount> = error_counts
        .into_iter()
        .map(|(intent, errors)| IntentErrorCount {
            intent: intent.to_string(),
            errors,
        })
        .collect();
    problematic.sort_by(|a, b| b.errors.cmp(&a.errors).then(a.intent.cmp(&b.intent)));
    problematic.truncate(TOP_PROBLEM_INTENTS);

    IntentRecognitionReport {
        qualifying: qualifying.len(),
        errors: errors.len(),
        accuracy,
        problematic_intents: problematic,
    }
}

fn analyze_response_quality(
    examples: &[TrainingExample],
    feedback: &[FeedbackRecord],
) -> ResponseQualityReport {
    let mut count = 0;
    let mut samples = Vec::new();

    for example in examples {
        if let Some(satisfaction) = example.satisfaction {
            if satisfaction < LOW_SATISFACTION_THRESHOLD {
                count += 1;
                if samples.len() < MAX_REVIEW_SAMPLES {
                    samples.push(LowSatisfactionSample {
                        user_input: example.user_input.clone(),
                        response: example.actual_response.clone(),
                        satisfaction,
                    });
                }
            }
        }
    }

    for record in feedback {
        if record.is_negative() {
            count += 1;
            if samples.len() < MAX_REVIEW_SAMPLES {
                samples.push(LowSatisfactionSample {
                    user_input: record.user_input.clone(),
                    response: record.bot_response.clone(),
                    satisfaction: record.satisfaction(),
                });
            }
        }
    }

    ResponseQualityReport {
        low_satisfaction_count: count,
        samples,
    }
}

fn summarize_feedback(feedback: &[FeedbackRecord]) -> FeedbackSummary {
    let positive = feedback.iter().filter(|f| f.is_positive()).count();
    let negative = feedback.iter().filter(|f| f.is_negative()).count();
    let ratio = if feedback.is_empty() {
        0.0
    } else {
        100.0 * positive as f64 / feedback.len() as f64
    };

    FeedbackSummary {
        total: feedback.len(),
        positive,
        negative,
        feedback_ratio: ratio,
    }
}

/// Identical inputs misclassified twice or more point at a missing or
/// overlapping pattern rule rather than a one-off miss.
fn find_misclassification_patterns(examples: &[TrainingExample]) -> Vec<PatternFinding> {
    let mut misses: HashMap<&str, usize> = HashMap::new();
    for example in examples {
        if example.has_intent_pair() && !example.intent_matched() {
            *misses.entry(example.user_input.as_str()).or_default() += 1;
        }
    }

    let mut findings: Vec<PatternFinding> = misses
        .into_iter()
        .filter(|(_, n)| *n >= 2)
        .map(|(input, n)| PatternFinding {
            description: format!("\"{}\" misclassified {} times", input, n),
            occurrences: n,
        })
        .collect();
    findings.sort_by(|a, b| b.occurrences.cmp(&a.occurrences).then(a.description.cmp(&b.description)));
    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled(input: &str, expected: &str, actual: &str) -> TrainingExample {
        TrainingExample::new(input, "response").with_intents(Some(expected), Some(actual))
    }

    #[test]
    fn test_problematic_intents_ranked_by_errors() {
        let examples = vec![
            labeled("a", "addExpense", "unknown"),
            labeled("b", "addExpense", "setBudget"),
            labeled("c", "setBudget", "unknown"),
            labeled("d", "help", "help"),
        ];
        let report = analyze_intent_recognition(&examples);
        assert_eq!(report.qualifying, 4);
        assert_eq!(report.errors, 3);
        assert_eq!(report.accuracy, 25.0);
        assert_eq!(report.problematic_intents[0].intent, "addExpense");
        assert_eq!(report.problematic_intents[0].errors, 2);
        assert_eq!(report.problematic_intents[1].intent, "setBudget");
    }

    #[test]
    fn test_feedback_ratio_zero_without_feedback() {
        let summary = summarize_feedback(&[]);
        assert_eq!(summary.feedback_ratio, 0.0);
        assert!(summary.feedback_ratio.is_finite());
    }

    #[test]
    fn test_feedback_split() {
        let feedback = vec![
            FeedbackRecord::new("c1", "a", "r", 5),
            FeedbackRecord::new("c1", "b", "r", 4),
            FeedbackRecord::new("c1", "c", "r", 3),
            FeedbackRecord::new("c1", "d", "r", 1),
        ];
        let summary = summarize_feedback(&feedback);
        assert_eq!(summary.positive, 2);
        assert_eq!(summary.negative, 1);
        assert_eq!(summary.feedback_ratio, 50.0);
    }

    #[test]
    fn test_review_samples_capped_in_encounter_order() {
        let examples: Vec<_> = (0..8)
            .map(|i| {
                TrainingExample::new(&format!("input {}", i), "response").with_satisfaction(0.2)
            })
            .collect();
        let report = analyze_response_quality(&examples, &[]);
        assert_eq!(report.low_satisfaction_count, 8);
        assert_eq!(report.samples.len(), MAX_REVIEW_SAMPLES);
        assert_eq!(report.samples[0].user_input, "input 0");
    }

    #[test]
    fn test_repeated_misses_become_patterns() {
        let examples = vec![
            labeled("show my balance", "showBalance", "unknown"),
            labeled("show my balance", "showBalance", "help"),
            labeled("one-off", "addExpense", "unknown"),
        ];
        let findings = find_misclassification_patterns(&examples);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].occurrences, 2);
        assert!(findings[0].description.contains("show my balance"));
    }
}

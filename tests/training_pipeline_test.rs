//! Integration tests for the training pipeline:
//! - Corpus metrics (windowing, NaN guards, accuracy math)
//! - Readiness analysis (thresholds, insufficient-data gate, action plan)
//! - Collaborative merge (idempotence, conflict averaging)

use bot_trainer::collab::{build_package, merge_package};
use bot_trainer::corpus::{Corpus, CorpusDocument, PerformanceMetrics};
use bot_trainer::readiness::{self, AssessmentStatus, MetricStatus};
use bot_trainer::types::{FeedbackRecord, TrainingExample};
use chrono::{Duration, Utc};

// =====================================================================
// CORPUS METRICS
// =====================================================================

#[test]
fn test_empty_corpus_metrics_never_nan() {
    let mut corpus = Corpus::new();
    let metrics = corpus.metrics(Duration::hours(48));

    assert_eq!(metrics.accuracy, 0.0);
    assert_eq!(metrics.user_satisfaction, 0.0);
    assert_eq!(metrics.response_time_ms, 0.0);
    assert!(metrics.accuracy.is_finite());
    assert!(metrics.user_satisfaction.is_finite());
    assert!(metrics.response_time_ms.is_finite());
}

#[test]
fn test_accuracy_over_qualifying_subset() {
    // (exp=a, act=a), (exp=a, act=b), (exp=b, act=b) → 2/3
    let examples = vec![
        TrainingExample::new("one", "r").with_intents(Some("a"), Some("a")),
        TrainingExample::new("two", "r").with_intents(Some("a"), Some("b")),
        TrainingExample::new("three", "r").with_intents(Some("b"), Some("b")),
    ];
    let metrics = PerformanceMetrics::compute(&examples);
    assert!((metrics.accuracy - 66.7).abs() < 0.1);
}

#[test]
fn test_rating_to_satisfaction_conversion() {
    // Ratings [5, 3, 1] → satisfactions [1.0, 0.6, 0.2] → mean 60.0
    let examples: Vec<TrainingExample> = [5u8, 3, 1]
        .iter()
        .map(|&rating| {
            let feedback = FeedbackRecord::new("c1", "input", "response", rating);
            TrainingExample::new("input", "response").with_satisfaction(feedback.satisfaction())
        })
        .collect();

    let metrics = PerformanceMetrics::compute(&examples);
    assert!((metrics.user_satisfaction - 60.0).abs() < 1e-9);
}

#[test]
fn test_window_excludes_old_examples() {
    let mut corpus = Corpus::new();
    corpus.record(
        TrainingExample::new("old", "r")
            .with_intents(Some("a"), Some("b"))
            .with_timestamp(Utc::now() - Duration::days(10)),
    );
    corpus.record(TrainingExample::new("new", "r").with_intents(Some("a"), Some("a")));

    // Only the recent (matching) example is inside the window
    let metrics = corpus.metrics(Duration::hours(48));
    assert_eq!(metrics.accuracy, 100.0);
}

#[test]
fn test_document_round_trip_preserves_sequences() {
    let mut corpus = Corpus::new();
    for i in 0..10 {
        corpus.record(
            TrainingExample::new(&format!("input {}", i), &format!("response {}", i))
                .with_intents(Some("greet"), Some(if i % 2 == 0 { "greet" } else { "other" }))
                .with_satisfaction(0.1 * i as f64),
        );
    }
    corpus.record_feedback(FeedbackRecord::new("c1", "input 0", "response 0", 4).with_note("ok"));

    let json = corpus.export_document().to_json().unwrap();
    let mut restored = Corpus::new();
    restored.load_document(CorpusDocument::from_json(&json).unwrap());

    assert_eq!(restored.examples.len(), corpus.examples.len());
    assert_eq!(restored.feedback.len(), corpus.feedback.len());
    for (a, b) in corpus.examples.iter().zip(&restored.examples) {
        assert_eq!(a.user_input, b.user_input);
        assert_eq!(a.actual_intent, b.actual_intent);
        assert_eq!(a.satisfaction, b.satisfaction);
        assert_eq!(a.timestamp, b.timestamp);
    }
    assert_eq!(restored.feedback[0].note.as_deref(), Some("ok"));
}

// =====================================================================
// READINESS ANALYSIS
// =====================================================================

#[test]
fn test_insufficient_data_gate() {
    let corpus = Corpus::new();
    let analysis = readiness::analyze(&corpus);

    assert_eq!(analysis.performance.status, AssessmentStatus::InsufficientData);
    assert!(analysis.performance.metrics.is_none());
    assert!(analysis.performance.thresholds.is_none());
    assert!(analysis
        .performance
        .message
        .as_deref()
        .unwrap()
        .contains("interactions"));
    assert!(analysis.action_plan.immediate.is_empty());
}

#[test]
fn test_boundary_accuracy_classifies_good() {
    // Exactly 80.0% accuracy: 4 of 5 matched
    let mut corpus = Corpus::new();
    for i in 0..5 {
        let actual = if i == 0 { "miss" } else { "greet" };
        corpus.record(TrainingExample::new(&format!("i{}", i), "r").with_intents(Some("greet"), Some(actual)));
    }
    let analysis = readiness::analyze(&corpus);
    let thresholds = analysis.performance.thresholds.unwrap();
    assert_eq!(thresholds.accuracy, MetricStatus::Good);
}

#[test]
fn test_just_below_boundary_needs_improvement() {
    // 79.99…% accuracy is not good enough
    let mut corpus = Corpus::new();
    for i in 0..1000 {
        let actual = if i < 201 { "miss" } else { "greet" };
        corpus.record(TrainingExample::new(&format!("i{}", i), "r").with_intents(Some("greet"), Some(actual)));
    }
    let analysis = readiness::analyze(&corpus);
    let thresholds = analysis.performance.thresholds.unwrap();
    assert_eq!(thresholds.accuracy, MetricStatus::NeedsImprovement);
}

#[test]
fn test_healthy_corpus_scenario() {
    // 25 recent examples, 22 matching intents, satisfaction 0.9,
    // response time 1500ms → everything good, immediate plan empty.
    let mut corpus = Corpus::new();
    for i in 0..25 {
        let actual = if i < 22 { "addExpense" } else { "unknown" };
        corpus.record(
            TrainingExample::new(&format!("spend {}", i), "Added.")
                .with_intents(Some("addExpense"), Some(actual))
                .with_satisfaction(0.9)
                .with_response_time(1500),
        );
    }

    let analysis = readiness::analyze(&corpus);
    assert_eq!(analysis.performance.status, AssessmentStatus::Good);

    let metrics = analysis.performance.metrics.unwrap();
    assert!((metrics.accuracy - 88.0).abs() < 0.1);
    assert!((metrics.user_satisfaction - 90.0).abs() < 1e-6);
    assert!((metrics.response_time_ms - 1500.0).abs() < 1e-6);
    assert_eq!(metrics.interaction_count, 25);

    assert!(analysis.recommendations.is_empty());
    assert!(analysis.action_plan.immediate.is_empty());
    assert!(analysis.action_plan.short_term.is_empty());
}

#[test]
fn test_failing_corpus_gets_prioritized_plan() {
    let mut corpus = Corpus::new();
    for i in 0..25 {
        // Half the intents missed, poor satisfaction, slow responses
        let actual = if i % 2 == 0 { "addExpense" } else { "unknown" };
        corpus.record(
            TrainingExample::new(&format!("spend {}", i), "Hmm?")
                .with_intents(Some("addExpense"), Some(actual))
                .with_satisfaction(0.4)
                .with_response_time(5000),
        );
    }

    let analysis = readiness::analyze(&corpus);
    assert_eq!(analysis.performance.status, AssessmentStatus::NeedsImprovement);

    // Accuracy + satisfaction are high priority, response time medium
    let high: Vec<_> = analysis
        .recommendations
        .iter()
        .filter(|r| r.priority == readiness::Priority::High)
        .collect();
    assert_eq!(high.len(), 2);

    // Two high recs × two actions each → four immediate items
    assert_eq!(analysis.action_plan.immediate.len(), 4);
    assert!(analysis
        .action_plan
        .immediate
        .iter()
        .all(|a| a.time_budget == "30 minutes"));
    assert!(!analysis.action_plan.short_term.is_empty());
    assert!(analysis.action_plan.long_term.is_empty());

    // The repeated-miss pattern detector sees nothing (all inputs unique)
    assert!(analysis.problems.patterns.is_empty());
    // But the problematic-intent ranking does
    assert_eq!(
        analysis.problems.intent_recognition.problematic_intents[0].intent,
        "addExpense"
    );
}

#[test]
fn test_analysis_document_serializes() {
    // The analysis is the display-layer document; it must serialize
    let mut corpus = Corpus::new();
    corpus.record(TrainingExample::new("hello", "Hi!").with_intents(Some("greet"), Some("greet")));

    let analysis = readiness::analyze(&corpus);
    let json = serde_json::to_value(&analysis).unwrap();
    assert_eq!(json["performance"]["status"], "needs_improvement");
    assert!(json["action_plan"]["long_term"].as_array().unwrap().is_empty());
}

// =====================================================================
// COLLABORATIVE MERGE
// =====================================================================

#[test]
fn test_merge_is_idempotent_on_imports() {
    let mut local = Corpus::new();
    local.record(TrainingExample::new("hello", "Hi!").with_satisfaction(0.5));

    let mut tester = Corpus::new();
    tester.record(TrainingExample::new("hello", "Hi!").with_satisfaction(0.9));
    tester.record(TrainingExample::new("add 20 for lunch", "Added.").with_satisfaction(1.0));
    tester.record_feedback(FeedbackRecord::new("c9", "hello", "Hi!", 5));
    let package = build_package(&tester);

    let first = merge_package(&mut local, &package);
    assert_eq!(first.imported, 1);
    assert_eq!(first.merged, 1);

    let second = merge_package(&mut local, &package);
    assert_eq!(second.imported, 0, "second merge must import nothing");
    assert_eq!(second.merged, 2);
    assert_eq!(local.examples.len(), 2, "no duplicated rows");

    // Feedback is append-always by design
    assert_eq!(local.feedback.len(), 2);
}

#[test]
fn test_merge_reports_improvements() {
    let mut local = Corpus::new();
    local.record(TrainingExample::new("a", "r").with_intents(Some("x"), Some("y")));

    let mut tester = Corpus::new();
    for i in 0..3 {
        tester.record(
            TrainingExample::new(&format!("b{}", i), "r")
                .with_intents(Some("x"), Some("x"))
                .with_satisfaction(1.0),
        );
    }

    let report = merge_package(&mut local, &build_package(&tester));
    assert_eq!(report.imported, 3);
    assert!(report
        .improvements
        .iter()
        .any(|s| s.starts_with("accuracy improved")));
    assert!(report
        .improvements
        .iter()
        .any(|s| s.starts_with("user satisfaction improved")));
}

#[test]
fn test_merge_keeps_insertion_order_for_new_examples() {
    let mut local = Corpus::new();
    local.record(TrainingExample::new("first", "r"));

    let mut tester = Corpus::new();
    tester.record(TrainingExample::new("second", "r"));
    tester.record(TrainingExample::new("third", "r"));

    merge_package(&mut local, &build_package(&tester));
    let inputs: Vec<&str> = local.examples.iter().map(|e| e.user_input.as_str()).collect();
    assert_eq!(inputs, vec!["first", "second", "third"]);
}

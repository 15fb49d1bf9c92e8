//! Readiness analysis
//!
//! A pure decision procedure over a corpus snapshot: windowed metrics,
//! threshold classification, problem identification, recommendations, and
//! a time-bucketed action plan. Stateless; the caller owns the corpus.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::problems::{self, ProblemReport};
use super::recommendations::{self, ActionPlan, Recommendation};
use crate::corpus::Corpus;
use crate::types::TrainingExample;

/// Trailing interval the analyzer evaluates (the readiness window)
pub const READINESS_WINDOW_HOURS: i64 = 48;
/// Minimum viable sample before any verdict is attempted
pub const MIN_VIABLE_SAMPLES: usize = 1;

/// Release threshold: intent accuracy
pub const ACCURACY_TARGET: f64 = 80.0;
/// Release threshold: user satisfaction
pub const SATISFACTION_TARGET: f64 = 85.0;
/// Release threshold: average response time
pub const RESPONSE_TIME_TARGET_MS: f64 = 3000.0;
/// Release threshold: interactions inside the window
pub const INTERACTION_TARGET: usize = 20;

/// Verdict for a single metric against its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricStatus {
    Good,
    NeedsImprovement,
}

impl std::fmt::Display for MetricStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricStatus::Good => write!(f, "good"),
            MetricStatus::NeedsImprovement => write!(f, "needs_improvement"),
        }
    }
}

/// Overall assessment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    /// Fewer than the minimum viable sample of recent interactions
    InsufficientData,
    /// Every threshold met
    Good,
    /// At least one threshold missed
    NeedsImprovement,
}

impl std::fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssessmentStatus::InsufficientData => write!(f, "insufficient_data"),
            AssessmentStatus::Good => write!(f, "good"),
            AssessmentStatus::NeedsImprovement => write!(f, "needs_improvement"),
        }
    }
}

/// Metrics over the readiness window, plus the sample size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowedMetrics {
    pub accuracy: f64,
    pub user_satisfaction: f64,
    pub response_time_ms: f64,
    pub interaction_count: usize,
}

/// Per-threshold classification. Boundary values classify as good.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdReport {
    pub accuracy: MetricStatus,
    pub user_satisfaction: MetricStatus,
    pub response_time: MetricStatus,
    pub interaction_count: MetricStatus,
}

impl ThresholdReport {
    fn classify(metrics: &WindowedMetrics) -> Self {
        let status = |good: bool| {
            if good {
                MetricStatus::Good
            } else {
                MetricStatus::NeedsImprovement
            }
        };
        Self {
            accuracy: status(metrics.accuracy >= ACCURACY_TARGET),
            user_satisfaction: status(metrics.user_satisfaction >= SATISFACTION_TARGET),
            response_time: status(metrics.response_time_ms <= RESPONSE_TIME_TARGET_MS),
            interaction_count: status(metrics.interaction_count >= INTERACTION_TARGET),
        }
    }

    fn all_good(&self) -> bool {
        [
            self.accuracy,
            self.user_satisfaction,
            self.response_time,
            self.interaction_count,
        ]
        .iter()
        .all(|s| *s == MetricStatus::Good)
    }
}

/// Performance section of the readiness document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceAssessment {
    pub status: AssessmentStatus,
    /// Present on `insufficient_data`, always actionable
    pub message: Option<String>,
    pub metrics: Option<WindowedMetrics>,
    pub thresholds: Option<ThresholdReport>,
}

/// The full readiness verdict. Ephemeral: recomputed on every request,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessAnalysis {
    pub performance: PerformanceAssessment,
    pub problems: ProblemReport,
    pub recommendations: Vec<Recommendation>,
    pub action_plan: ActionPlan,
}

/// Analyze a corpus snapshot against the fixed release thresholds.
pub fn analyze(corpus: &Corpus) -> ReadinessAnalysis {
    analyze_at(corpus, Utc::now())
}

/// Same as [`analyze`] with an explicit time cutoff.
pub fn analyze_at(corpus: &Corpus, now: DateTime<Utc>) -> ReadinessAnalysis {
    let cutoff = now - Duration::hours(READINESS_WINDOW_HOURS);
    let recent: Vec<TrainingExample> = corpus
        .examples
        .iter()
        .filter(|e| e.timestamp >= cutoff)
        .cloned()
        .collect();

    if recent.len() < MIN_VIABLE_SAMPLES {
        debug!("Readiness analysis aborted: {} recent examples", recent.len());
        return ReadinessAnalysis {
            performance: PerformanceAssessment {
                status: AssessmentStatus::InsufficientData,
                message: Some(format!(
                    "Not enough recent interactions to assess readiness \
                     (need at least {}). Add more interactions and re-run.",
                    MIN_VIABLE_SAMPLES
                )),
                metrics: None,
                thresholds: None,
            },
            problems: ProblemReport::default(),
            recommendations: Vec::new(),
            action_plan: ActionPlan::default(),
        };
    }

    let computed = crate::corpus::PerformanceMetrics::compute(&recent);
    let metrics = WindowedMetrics {
        accuracy: computed.accuracy,
        user_satisfaction: computed.user_satisfaction,
        response_time_ms: computed.response_time_ms,
        interaction_count: recent.len(),
    };

    let thresholds = ThresholdReport::classify(&metrics);
    let status = if thresholds.all_good() {
        AssessmentStatus::Good
    } else {
        AssessmentStatus::NeedsImprovement
    };

    let problems = problems::identify(&recent, &corpus.feedback);
    let recommendations = recommendations::generate(&metrics);
    let action_plan = recommendations::build_action_plan(&recommendations);

    debug!(
        "Readiness analysis: status={}, {} recommendations",
        status,
        recommendations.len()
    );

    ReadinessAnalysis {
        performance: PerformanceAssessment {
            status,
            message: None,
            metrics: Some(metrics),
            thresholds: Some(thresholds),
        },
        problems,
        recommendations,
        action_plan,
    }
}

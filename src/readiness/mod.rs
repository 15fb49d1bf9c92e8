//! Readiness Analyzer module
//!
//! Decides whether the assistant is ready to ship:
//! - Windowed metrics classified against fixed release thresholds
//! - Problem identification (intents, response quality, feedback, patterns)
//! - Prioritized recommendations bucketed into a time-boxed action plan

pub mod analyzer;
pub mod problems;
pub mod recommendations;

pub use analyzer::{
    analyze, analyze_at, AssessmentStatus, MetricStatus, PerformanceAssessment,
    ReadinessAnalysis, ThresholdReport, WindowedMetrics,
};
pub use problems::{ProblemReport, ResponseQualityReport};
pub use recommendations::{ActionPlan, Priority, Recommendation, RecommendationCategory};

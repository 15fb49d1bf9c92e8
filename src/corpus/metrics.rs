//! Point-in-time quality metrics
//!
//! Computed over a slice of examples; every denominator is guarded so an
//! empty subset yields 0.0 rather than NaN.

use serde::{Deserialize, Serialize};

use crate::types::TrainingExample;

/// Quality snapshot over a set of examples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Intent accuracy, 0-100, over examples carrying both intent fields
    pub accuracy: f64,
    /// Mean satisfaction, 0-100, over examples carrying a satisfaction value
    pub user_satisfaction: f64,
    /// Mean response time in milliseconds over examples carrying one
    pub response_time_ms: f64,
}

impl PerformanceMetrics {
    /// Compute metrics over a set of examples.
    ///
    /// Examples missing a field are excluded from that field's denominator;
    /// a fully-empty denominator resolves to 0.0.
    pub fn compute(examples: &[TrainingExample]) -> Self {
        let with_intents: Vec<_> = examples.iter().filter(|e| e.has_intent_pair()).collect();
        let matched = with_intents.iter().filter(|e| e.intent_matched()).count();
        let accuracy = if with_intents.is_empty() {
            0.0
        } else {
            100.0 * matched as f64 / with_intents.len() as f64
        };

        let satisfactions: Vec<f64> = examples.iter().filter_map(|e| e.satisfaction).collect();
        let user_satisfaction = if satisfactions.is_empty() {
            0.0
        } else {
            100.0 * satisfactions.iter().sum::<f64>() / satisfactions.len() as f64
        };

        let times: Vec<u64> = examples.iter().filter_map(|e| e.response_time_ms).collect();
        let response_time_ms = if times.is_empty() {
            0.0
        } else {
            times.iter().sum::<u64>() as f64 / times.len() as f64
        };

        Self {
            accuracy,
            user_satisfaction,
            response_time_ms,
        }
    }
}

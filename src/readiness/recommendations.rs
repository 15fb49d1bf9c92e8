//! Recommendation generation and action-plan bucketing
//!
//! One recommendation per metric under target, each with 2-3 concrete
//! actions, then bucketed into a time-boxed plan. All rules here are
//! fixed constants so identical input produces identical verdicts.

use serde::{Deserialize, Serialize};

use super::analyzer::{
    WindowedMetrics, ACCURACY_TARGET, INTERACTION_TARGET, RESPONSE_TIME_TARGET_MS,
    SATISFACTION_TARGET,
};

/// Time budget label for the immediate bucket
pub const IMMEDIATE_TIME_BUDGET: &str = "30 minutes";
/// Time budget label for the short-term bucket
pub const SHORT_TERM_TIME_BUDGET: &str = "1 hour";

/// Priority of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
        }
    }
}

/// Which metric the recommendation addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    IntentAccuracy,
    UserSatisfaction,
    ResponseTime,
    DataCollection,
}

impl std::fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationCategory::IntentAccuracy => write!(f, "intent accuracy"),
            RecommendationCategory::UserSatisfaction => write!(f, "user satisfaction"),
            RecommendationCategory::ResponseTime => write!(f, "response time"),
            RecommendationCategory::DataCollection => write!(f, "data collection"),
        }
    }
}

/// One actionable recommendation for a metric under target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: RecommendationCategory,
    pub title: String,
    /// Names current value vs. target
    pub description: String,
    pub actions: Vec<String>,
}

/// A single scheduled action with its time budget label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedAction {
    pub action: String,
    pub time_budget: String,
}

/// Recommendations bucketed by urgency.
///
/// `long_term` is never populated automatically; it is reserved for work
/// a human schedules manually.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionPlan {
    pub immediate: Vec<PlannedAction>,
    pub short_term: Vec<PlannedAction>,
    pub long_term: Vec<PlannedAction>,
}

/// Generate one recommendation per metric under target.
///
/// Accuracy and satisfaction shortfalls are `high` priority; response
/// time and sample size are `medium`.
pub fn generate(metrics: &WindowedMetrics) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if metrics.accuracy < ACCURACY_TARGET {
        recommendations.push(Recommendation {
            priority: Priority::High,
            category: RecommendationCategory::IntentAccuracy,
            title: "Improve intent recognition".to_string(),
            description: format!(
                "Intent accuracy is {:.1}% (target {:.0}%)",
                metrics.accuracy, ACCURACY_TARGET
            ),
            actions: vec![
                "Review the most frequently misclassified intents and add matching patterns"
                    .to_string(),
                "Add labeled examples for the top failing intents".to_string(),
                "Tighten overlapping patterns between similar intents".to_string(),
            ],
        });
    }

    if metrics.user_satisfaction < SATISFACTION_TARGET {
        recommendations.push(Recommendation {
            priority: Priority::High,
            category: RecommendationCategory::UserSatisfaction,
            title: "Raise response quality".to_string(),
            description: format!(
                "User satisfaction is {:.1}% (target {:.0}%)",
                metrics.user_satisfaction, SATISFACTION_TARGET
            ),
            actions: vec![
                "Rewrite the responses flagged in the low-satisfaction review list".to_string(),
                "Read recent negative feedback notes for recurring complaints".to_string(),
                "Add response variations for the most common intents".to_string(),
            ],
        });
    }

    if metrics.response_time_ms > RESPONSE_TIME_TARGET_MS {
        recommendations.push(Recommendation {
            priority: Priority::Medium,
            category: RecommendationCategory::ResponseTime,
            title: "Reduce response time".to_string(),
            description: format!(
                "Average response time is {:.0}ms (target {:.0}ms)",
                metrics.response_time_ms, RESPONSE_TIME_TARGET_MS
            ),
            actions: vec![
                "Profile the slowest intent handlers".to_string(),
                "Cache lookups the bot repeats on every turn".to_string(),
            ],
        });
    }

    if metrics.interaction_count < INTERACTION_TARGET {
        recommendations.push(Recommendation {
            priority: Priority::Medium,
            category: RecommendationCategory::DataCollection,
            title: "Collect more interactions".to_string(),
            description: format!(
                "Only {} interactions in the readiness window (target {})",
                metrics.interaction_count, INTERACTION_TARGET
            ),
            actions: vec![
                "Run the tester scenario package with at least one more tester".to_string(),
                "Exercise the intents that have no recent coverage".to_string(),
            ],
        });
    }

    recommendations
}

/// Bucket recommendations into a time-boxed plan.
///
/// The first two actions of every high-priority recommendation go to
/// `immediate`; the full action list of every medium-priority one goes to
/// `short_term`.
pub fn build_action_plan(recommendations: &[Recommendation]) -> ActionPlan {
    let mut plan = ActionPlan::default();

    for recommendation in recommendations {
        match recommendation.priority {
            Priority::High => {
                for action in recommendation.actions.iter().take(2) {
                    plan.immediate.push(PlannedAction {
                        action: action.clone(),
                        time_budget: IMMEDIATE_TIME_BUDGET.to_string(),
                    });
                }
            }
            Priority::Medium => {
                for action in &recommendation.actions {
                    plan.short_term.push(PlannedAction {
                        action: action.clone(),
                        time_budget: SHORT_TERM_TIME_BUDGET.to_string(),
                    });
                }
            }
        }
    }

    plan
}

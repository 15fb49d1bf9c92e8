//! Training package builder
//!
//! Bundles a fixed instruction block, the versioned static scenario
//! library, and the current corpus export into a single shareable
//! document for external testers. Deterministic given the same corpus
//! and library version.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::corpus::{Corpus, CorpusDocument};
use crate::error::ImportError;

/// Version of the bundled scenario library. Bump when the static
/// scenario data changes so returned packages stay attributable.
pub const SCENARIO_LIBRARY_VERSION: &str = "1.0.0";

/// Human-readable instruction block shipped with every package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageInstructions {
    pub title: String,
    pub description: String,
    pub steps: Vec<String>,
}

/// One scripted test case for a tester to run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestScenario {
    /// What to type at the bot
    pub input: String,
    /// Intent the bot should recognize
    pub expected_intent: Option<String>,
    /// What the tester should check for
    pub description: String,
}

/// Scenarios grouped by intent category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioGroup {
    pub category: String,
    pub scenarios: Vec<TestScenario>,
}

/// The full static scenario library: per-intent groups plus the
/// edge-case and creative groups. Constant reference data, never derived
/// from corpus content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioLibrary {
    pub basic_interactions: Vec<ScenarioGroup>,
    pub edge_cases: Vec<ScenarioGroup>,
    pub creative_tests: Vec<ScenarioGroup>,
}

/// The shareable document handed to external testers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingPackage {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub instructions: PackageInstructions,
    pub test_scenarios: ScenarioLibrary,
    pub current_training_data: CorpusDocument,
    pub export_instructions: String,
}

impl TrainingPackage {
    /// Parse a returned package. Fundamentally non-document input is an
    /// `ImportError`; missing corpus collections degrade to empty.
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ImportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build a training package around the current corpus.
pub fn build_package(corpus: &Corpus) -> TrainingPackage {
    TrainingPackage {
        version: SCENARIO_LIBRARY_VERSION.to_string(),
        timestamp: Utc::now(),
        instructions: instructions(),
        test_scenarios: scenario_library(),
        current_training_data: corpus.export_document(),
        export_instructions: "When you are done, export your corpus from the trainer \
                              and send the resulting file back. Your examples and \
                              ratings are merged without overwriting anyone else's."
            .to_string(),
    }
}

fn instructions() -> PackageInstructions {
    PackageInstructions {
        title: "Assistant Training Round".to_string(),
        description: "Work through the scenario groups below, talk to the bot \
                      naturally, and rate every answer. Wrong intent guesses are \
                      just as valuable as right ones - label what you expected."
            .to_string(),
        steps: vec![
            "Load this package into your local trainer before starting".to_string(),
            "Run each basic interaction group in order and rate the answers 1-5".to_string(),
            "Try the edge cases; note what the bot should have said".to_string(),
            "Improvise a few of your own phrasings per creative prompt".to_string(),
            "Export your corpus and send it back".to_string(),
        ],
    }
}

/// The static scenario library.
///
/// Per-intent groups cover the assistant's core commands; the edge-case
/// and creative groups probe inputs no pattern author thought of.
pub fn scenario_library() -> ScenarioLibrary {
    let scenario = |input: &str, intent: Option<&str>, description: &str| TestScenario {
        input: input.to_string(),
        expected_intent: intent.map(|s| s.to_string()),
        description: description.to_string(),
    };

    ScenarioLibrary {
        basic_interactions: vec![
            ScenarioGroup {
                category: "greetings".to_string(),
                scenarios: vec![
                    scenario("hello", Some("greet"), "Plain greeting"),
                    scenario("good morning!", Some("greet"), "Greeting with time of day"),
                    scenario("hey, are you there?", Some("greet"), "Casual check-in"),
                ],
            },
            ScenarioGroup {
                category: "expenses".to_string(),
                scenarios: vec![
                    scenario("add 20 for lunch", Some("addExpense"), "Amount then category"),
                    scenario("I spent 12.50 on coffee", Some("addExpense"), "Decimal amount, natural phrasing"),
                    scenario("log taxi 35", Some("addExpense"), "Category then amount"),
                ],
            },
            ScenarioGroup {
                category: "summaries".to_string(),
                scenarios: vec![
                    scenario("how much did I spend this week", Some("spendingSummary"), "Windowed total"),
                    scenario("show my balance", Some("showBalance"), "Current balance"),
                    scenario("what did I spend on food", Some("spendingSummary"), "Category filter"),
                ],
            },
            ScenarioGroup {
                category: "budgets".to_string(),
                scenarios: vec![
                    scenario("set a budget of 500 for groceries", Some("setBudget"), "Budget with category"),
                    scenario("am I over budget?", Some("budgetStatus"), "Status question"),
                ],
            },
            ScenarioGroup {
                category: "help".to_string(),
                scenarios: vec![
                    scenario("what can you do", Some("help"), "Capability question"),
                    scenario("help", Some("help"), "Bare help keyword"),
                ],
            },
        ],
        edge_cases: vec![ScenarioGroup {
            category: "edge cases".to_string(),
            scenarios: vec![
                scenario("add -5 for lunch", Some("addExpense"), "Negative amount"),
                scenario("add twenty dollars for lunch", Some("addExpense"), "Spelled-out number"),
                scenario("💸💸💸", None, "Emoji-only input"),
                scenario("ADD 20 FOR LUNCH", Some("addExpense"), "All caps"),
                scenario(
                    "add 20 for lunch and also how much did I spend this month",
                    None,
                    "Two intents in one utterance",
                ),
            ],
        }],
        creative_tests: vec![ScenarioGroup {
            category: "creative".to_string(),
            scenarios: vec![
                scenario("ugh, lunch cost me 20 bucks again", Some("addExpense"), "Complaint phrasing"),
                scenario("am I broke yet", Some("showBalance"), "Slang"),
                scenario("pretend you're my accountant and tell me off", None, "Roleplay request"),
            ],
        }],
    }
}

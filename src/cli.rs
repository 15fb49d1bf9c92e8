//! CLI interface for bot-trainer

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::collab::{self, MergeOptions, TrainingPackage};
use crate::config::Config;
use crate::corpus::CorpusStore;
use crate::readiness::{self, AssessmentStatus};
use crate::types::{FeedbackRecord, TrainingExample};

#[derive(Parser)]
#[command(name = "bot-trainer")]
#[command(about = "Training-data pipeline for a rule-based conversational assistant", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record one interaction (input, predicted intent, response)
    Record {
        /// What the user typed
        #[arg(short, long)]
        input: String,
        /// What the bot answered
        #[arg(short, long)]
        response: String,
        /// Intent the interaction should have been labeled with
        #[arg(long)]
        expected_intent: Option<String>,
        /// Intent the classifier actually assigned
        #[arg(long)]
        actual_intent: Option<String>,
        /// Satisfaction in 0.0-1.0 (clamped)
        #[arg(short, long)]
        satisfaction: Option<f64>,
        /// Response time in milliseconds
        #[arg(long)]
        response_time_ms: Option<u64>,
    },
    /// Record an explicit user rating of one interaction
    Feedback {
        /// The input that was rated
        #[arg(short, long)]
        input: String,
        /// The response that was rated
        #[arg(short, long)]
        response: String,
        /// Rating from 1 to 5
        #[arg(long)]
        rating: u8,
        /// Conversation ID (generated when omitted)
        #[arg(short, long)]
        conversation_id: Option<String>,
        /// Optional free-form note
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Show quality metrics over a trailing window
    Metrics {
        /// Window size in hours
        #[arg(short, long, default_value = "48")]
        window_hours: i64,
    },
    /// Run the readiness analysis and print the report
    Analyze,
    /// Write a training package for an external tester
    Export {
        /// Where to write the package document
        output: std::path::PathBuf,
    },
    /// Merge a returned training package into the local corpus
    Import {
        /// Package document to merge
        package: std::path::PathBuf,
        /// Match merge keys after trim + casefold (overrides config)
        #[arg(long)]
        normalize_keys: bool,
    },
    /// Show corpus statistics
    Stats,
    /// Clear the entire corpus
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let store = CorpusStore::with_path(config.corpus_path()?);

    match cli.command {
        Commands::Record {
            input,
            response,
            expected_intent,
            actual_intent,
            satisfaction,
            response_time_ms,
        } => {
            let mut corpus = store.load();
            let mut example = TrainingExample::new(&input, &response)
                .with_intents(expected_intent.as_deref(), actual_intent.as_deref());
            if let Some(s) = satisfaction {
                example = example.with_satisfaction(s);
            }
            if let Some(ms) = response_time_ms {
                example = example.with_response_time(ms);
            }
            corpus.record(example);
            store.save(&corpus)?;
            println!("Recorded. Corpus now holds {} example(s).", corpus.examples.len());
        }
        Commands::Feedback {
            input,
            response,
            rating,
            conversation_id,
            note,
        } => {
            let mut corpus = store.load();
            let conversation_id =
                conversation_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            let mut feedback = FeedbackRecord::new(&conversation_id, &input, &response, rating);
            if let Some(ref note) = note {
                feedback = feedback.with_note(note);
            }
            let stored_rating = feedback.rating;
            corpus.record_feedback(feedback);
            store.save(&corpus)?;
            println!("Feedback recorded: {}/5", stored_rating);
        }
        Commands::Metrics { window_hours } => {
            let mut corpus = store.load();
            let metrics = corpus.metrics(chrono::Duration::hours(window_hours));
            store.save(&corpus)?;

            println!("\nQuality metrics (last {} hours)", window_hours);
            println!("=======================================");
            println!("  Intent accuracy:     {:.1}%", metrics.accuracy);
            println!("  User satisfaction:   {:.1}%", metrics.user_satisfaction);
            println!("  Avg response time:   {:.0}ms", metrics.response_time_ms);
        }
        Commands::Analyze => {
            let corpus = store.load();
            let analysis = readiness::analyze(&corpus);
            print_analysis(&analysis);
        }
        Commands::Export { output } => {
            let corpus = store.load();
            let package = collab::build_package(&corpus);
            let json = package
                .to_json()
                .context("Failed to serialize training package")?;
            std::fs::write(&output, json)
                .with_context(|| format!("Failed to write package to {}", output.display()))?;
            println!(
                "Training package v{} written to {}",
                package.version,
                output.display()
            );
            println!(
                "  {} example(s), {} feedback record(s) included",
                package.current_training_data.examples.len(),
                package.current_training_data.feedback.len()
            );
        }
        Commands::Import {
            package,
            normalize_keys,
        } => {
            let json = std::fs::read_to_string(&package)
                .with_context(|| format!("Failed to read {}", package.display()))?;
            let package = match TrainingPackage::from_json(&json) {
                Ok(package) => package,
                Err(e) => {
                    eprintln!("Not a training package: {}", e);
                    eprintln!("Nothing was imported; the local corpus is unchanged.");
                    std::process::exit(1);
                }
            };

            let options = MergeOptions {
                normalize_keys: normalize_keys || config.merge.normalize_keys,
            };
            let mut corpus = store.load();
            let report = collab::merge_package_with(&mut corpus, &package, &options);
            store.save(&corpus)?;

            println!("Merge complete");
            println!("==============");
            println!("  Imported:  {}", report.imported);
            println!("  Merged:    {}", report.merged);
            println!("  Conflicts: {}", report.conflicts);
            if report.improvements.is_empty() {
                println!("  No metric improved.");
            } else {
                for improvement in &report.improvements {
                    println!("  ✓ {}", improvement);
                }
            }
        }
        Commands::Stats => {
            let corpus = store.load();
            println!("\nCorpus statistics");
            println!("=======================================");
            println!("  Examples:          {}", corpus.examples.len());
            println!("  Feedback records:  {}", corpus.feedback.len());
            if let Some(first) = corpus.examples.first() {
                println!("  Oldest: {}", first.timestamp.format("%Y-%m-%d %H:%M:%S"));
            }
            if let Some(last) = corpus.examples.last() {
                println!("  Newest: {}", last.timestamp.format("%Y-%m-%d %H:%M:%S"));
            }
            println!("  Store: {}", store.path().display());
        }
        Commands::Reset { yes } => {
            let mut corpus = store.load();
            if corpus.examples.is_empty() && corpus.feedback.is_empty() {
                println!("Corpus is already empty.");
                return Ok(());
            }

            if !yes {
                println!(
                    "This will delete ALL {} example(s) and {} feedback record(s)!",
                    corpus.examples.len(),
                    corpus.feedback.len()
                );
                println!("Type 'yes' to confirm:");

                let mut input = String::new();
                std::io::stdin().read_line(&mut input)?;
                if input.trim().to_lowercase() != "yes" {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            corpus.reset();
            store.save(&corpus)?;
            println!("Corpus cleared.");
        }
    }

    Ok(())
}

/// Print a readiness analysis as a dashboard-style report
fn print_analysis(analysis: &readiness::ReadinessAnalysis) {
    println!("\nReadiness Report");
    println!("=======================================");
    println!("Status: {}", analysis.performance.status);

    if analysis.performance.status == AssessmentStatus::InsufficientData {
        if let Some(ref message) = analysis.performance.message {
            println!("{}", message);
        }
        return;
    }

    if let (Some(metrics), Some(thresholds)) = (
        &analysis.performance.metrics,
        &analysis.performance.thresholds,
    ) {
        println!();
        println!(
            "  Accuracy:       {:>7.1}%   [{}]",
            metrics.accuracy, thresholds.accuracy
        );
        println!(
            "  Satisfaction:   {:>7.1}%   [{}]",
            metrics.user_satisfaction, thresholds.user_satisfaction
        );
        println!(
            "  Response time:  {:>6.0}ms   [{}]",
            metrics.response_time_ms, thresholds.response_time
        );
        println!(
            "  Interactions:   {:>8}   [{}]",
            metrics.interaction_count, thresholds.interaction_count
        );
    }

    let problems = &analysis.problems;
    if !problems.intent_recognition.problematic_intents.is_empty() {
        println!("\nProblematic intents:");
        for entry in &problems.intent_recognition.problematic_intents {
            println!("  {} — {} error(s)", entry.intent, entry.errors);
        }
    }
    if problems.response_quality.low_satisfaction_count > 0 {
        println!(
            "\nLow-satisfaction responses: {} (showing {})",
            problems.response_quality.low_satisfaction_count,
            problems.response_quality.samples.len()
        );
        for sample in &problems.response_quality.samples {
            println!(
                "  [{:.1}] \"{}\" → \"{}\"",
                sample.satisfaction, sample.user_input, sample.response
            );
        }
    }
    if problems.user_feedback.total > 0 {
        println!(
            "\nFeedback: {} total, {} positive, {} negative ({:.0}% positive)",
            problems.user_feedback.total,
            problems.user_feedback.positive,
            problems.user_feedback.negative,
            problems.user_feedback.feedback_ratio
        );
    }
    for pattern in &problems.patterns {
        println!("  Pattern: {}", pattern.description);
    }

    if !analysis.recommendations.is_empty() {
        println!("\nRecommendations:");
        for recommendation in &analysis.recommendations {
            println!(
                "  [{}] {} — {}",
                recommendation.priority, recommendation.title, recommendation.description
            );
            for action in &recommendation.actions {
                println!("      - {}", action);
            }
        }
    }

    let plan = &analysis.action_plan;
    if !plan.immediate.is_empty() || !plan.short_term.is_empty() {
        println!("\nAction plan:");
        for action in &plan.immediate {
            println!("  now ({}): {}", action.time_budget, action.action);
        }
        for action in &plan.short_term {
            println!("  soon ({}): {}", action.time_budget, action.action);
        }
    } else if analysis.performance.status == AssessmentStatus::Good {
        println!("\nAll thresholds met — ready to ship.");
    }
}

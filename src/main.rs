//! Bot Trainer - feedback-driven training-data pipeline
//!
//! Records interactions, scores assistant quality, and merges tester
//! corpora into a readiness verdict.

use bot_trainer::cli;

fn main() -> anyhow::Result<()> {
    // Initialize logging (WARN level by default, use RUST_LOG=info for debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    cli::run()
}

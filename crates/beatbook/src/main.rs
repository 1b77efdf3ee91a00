//! Beatbook CLI binary.
//!
//! - Extract entities from a story export
//! - Classify stories by topic
//! - Aggregate entity mentions into a ranked summary
//! - Generate the beat book from the summary

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    use cli::{Cli, Commands, run_aggregate, run_classify, run_extract, run_generate};

    // Load .env so LLM_MODEL can live next to the data
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logs go to stderr so --prompt-only output stays clean
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Extract {
            input,
            output,
            model,
            limit,
            dry_run,
        } => run_extract(&input, &output, model, limit, dry_run).await,

        Commands::Classify {
            input,
            output,
            model,
            dry_run,
        } => {
            let output = output.unwrap_or_else(|| input.clone());
            run_classify(&input, &output, model, dry_run).await
        }

        Commands::Aggregate {
            input,
            output,
            threshold,
        } => run_aggregate(&input, &output, threshold).await,

        Commands::Generate {
            summary,
            stories,
            output,
            beat,
            model,
            prompt_only,
        } => run_generate(&summary, &stories, &output, beat, model, prompt_only).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Stage failed");
            ExitCode::FAILURE
        }
    }
}

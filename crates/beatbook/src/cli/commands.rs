//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Beatbook - build a reporter's beat book from news stories
#[derive(Parser, Debug)]
#[command(name = "beatbook")]
#[command(about = "Build a reporter's beat book from news stories", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Pipeline stages, in the order they are run
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract people, places and organizations from each story
    Extract {
        /// Story export: a JSON array, or an object with a "stories" or "articles" array
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the enriched stories
        #[arg(short, long, default_value = "enriched_stories.json")]
        output: PathBuf,

        /// Model passed to the LLM tool (overrides LLM_MODEL and llm.model)
        #[arg(short, long)]
        model: Option<String>,

        /// Process only the first N stories
        #[arg(long)]
        limit: Option<usize>,

        /// Skip the LLM tool and write empty entity lists
        #[arg(long)]
        dry_run: bool,
    },

    /// File each story under one topic (optional; run before aggregate)
    Classify {
        /// Stories to classify: the enriched file or the raw export
        #[arg(short, long, default_value = "enriched_stories.json")]
        input: PathBuf,

        /// Where to write the classified stories (defaults to the input file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Model passed to the LLM tool (overrides LLM_MODEL and llm.model)
        #[arg(short, long)]
        model: Option<String>,

        /// Skip the LLM tool and file every story under "Other"
        #[arg(long)]
        dry_run: bool,
    },

    /// Count entity mentions and rank the frequent ones
    Aggregate {
        /// Enriched stories from the extract stage
        #[arg(short, long, default_value = "enriched_stories.json")]
        input: PathBuf,

        /// Where to write the ranked summary
        #[arg(short, long, default_value = "entity_summary.json")]
        output: PathBuf,

        /// Minimum mentions to keep a name (overrides aggregate.threshold)
        #[arg(short, long)]
        threshold: Option<usize>,
    },

    /// Write the beat book from the ranked summary
    Generate {
        /// Ranked summary from the aggregate stage
        #[arg(short, long, default_value = "entity_summary.json")]
        summary: PathBuf,

        /// Enriched stories the sample headlines are taken from
        #[arg(long, default_value = "enriched_stories.json")]
        stories: PathBuf,

        /// Where to write the beat book
        #[arg(short, long, default_value = "beatbook.md")]
        output: PathBuf,

        /// Coverage area named in the prompt (overrides generate.beat)
        #[arg(short, long)]
        beat: Option<String>,

        /// Model passed to the LLM tool (overrides LLM_MODEL and llm.model)
        #[arg(short, long)]
        model: Option<String>,

        /// Print the prompt to stdout instead of calling the LLM tool
        #[arg(long)]
        prompt_only: bool,
    },
}

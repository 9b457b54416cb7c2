//! CLI argument parsing via clap.

use clap::{Parser, Subcommand};

/// Command-line client for the GPT-3 REST API.
#[derive(Debug, Parser)]
#[command(name = "gpt3", version, long_version = gpt3::build_info::LONG_VERSION)]
pub struct Args {
    /// Path to config file (default: ./gpt3.toml or ~/.config/gpt3/gpt3.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Override API base URL.
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Override the default engine.
    #[arg(short = 'e', long = "engine", global = true)]
    pub engine: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List available engines.
    Engines,
    /// Show one engine.
    Engine {
        /// Engine id, e.g. `davinci`.
        id: String,
    },
    /// Complete a prompt.
    Complete {
        prompt: String,
        /// Maximum tokens to generate.
        #[arg(long = "max-tokens")]
        max_tokens: Option<u32>,
        /// Sampling temperature.
        #[arg(long)]
        temperature: Option<f32>,
        /// Stop sequence; repeat for several.
        #[arg(long = "stop")]
        stop: Vec<String>,
        /// Print tokens as they are generated.
        #[arg(long)]
        stream: bool,
    },
    /// Rank documents by semantic similarity to a query.
    Search {
        query: String,
        /// Candidate documents.
        #[arg(required = true)]
        documents: Vec<String>,
    },
    /// Edit input text following an instruction.
    Edit {
        instruction: String,
        /// Text to edit; empty by default.
        #[arg(long, default_value = "")]
        input: String,
        /// Edit model.
        #[arg(long, default_value = gpt3::types::TEXT_DAVINCI_EDIT_001)]
        model: String,
    },
    /// Send one user message to a chat model.
    Chat {
        message: String,
        /// Optional system message sent first.
        #[arg(long)]
        system: Option<String>,
        /// Chat model.
        #[arg(long, default_value = gpt3::types::GPT3_DOT5_TURBO)]
        model: String,
        /// Print tokens as they are generated.
        #[arg(long)]
        stream: bool,
    },
    /// Generate interview questions from a job title and/or description.
    Interview {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Maximum number of questions.
        #[arg(long)]
        cap: Option<usize>,
    },
}

//! CLI module for ytqa.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// ytqa - Ask questions about a YouTube video
///
/// Fetches the video's transcript, finds the passages most relevant to your
/// question and has a language model answer from those passages only.
#[derive(Parser, Debug)]
#[command(name = "ytqa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask one question about a video
    Ask {
        /// YouTube URL or video ID
        url: String,

        /// The question to ask
        question: String,

        /// Number of transcript chunks to use as context
        #[arg(short, long)]
        k: Option<usize>,

        /// LLM model to use for the answer
        #[arg(short, long)]
        model: Option<String>,

        /// Print the transcript passages the answer was based on
        #[arg(long)]
        show_context: bool,
    },

    /// Ask several questions about one video, reading them from stdin
    Chat {
        /// YouTube URL or video ID
        url: String,

        /// Number of transcript chunks to use as context
        #[arg(short, long)]
        k: Option<usize>,

        /// LLM model to use for answers
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Print the transcript of a video
    Transcript {
        /// YouTube URL or video ID
        url: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the default configuration file if none exists
    Init,

    /// Show configuration file path
    Path,
}

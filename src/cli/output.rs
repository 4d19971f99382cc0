//! CLI output formatting utilities.

use crate::error::{ErrorKind, YtqaError};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a retrieved passage.
    pub fn passage(rank: usize, score: f32, content: &str) {
        println!(
            "\n{} {} (score: {:.2})",
            style(">>").green(),
            style(format!("#{}", rank)).bold(),
            score
        );
        println!("   {}", content_preview(content, 300));
    }

    /// Report a pipeline failure with guidance matching its kind.
    pub fn pipeline_error(err: &YtqaError) {
        Self::error(&err.to_string());

        match err.kind() {
            Some(ErrorKind::InvalidInput) => {
                Self::info("Check the video URL and make sure the question is not empty.")
            }
            Some(ErrorKind::TranscriptUnavailable) => {
                Self::info("This video has no English captions, so it cannot be searched.")
            }
            Some(kind) if kind.is_retryable() => Self::info("This may be temporary. Please try again."),
            _ => {}
        }
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Truncate content with ellipsis, on a character boundary.
fn content_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        let truncated: String = content.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}

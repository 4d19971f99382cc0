//! Ask command implementation.

use super::apply_overrides;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::Pipeline;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(
    url: &str,
    question: &str,
    k: Option<usize>,
    model: Option<String>,
    show_context: bool,
    mut settings: Settings,
) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Ask, &settings) {
        Output::error(&e.to_string());
        return Err(e.into());
    }

    apply_overrides(&mut settings, k, model);
    // One question per process, nothing to reuse.
    settings.cache.enabled = false;

    let pipeline = Pipeline::new(&settings)?;

    let spinner = Output::spinner("Reading transcript and searching for an answer...");

    match pipeline.answer_question(url, question).await {
        Ok(answer) => {
            spinner.finish_and_clear();

            println!("\n{}\n", answer.text);

            if show_context {
                Output::header("Context");
                for (rank, source) in answer.sources.iter().enumerate() {
                    Output::passage(rank + 1, source.score, &source.chunk.text);
                }
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::pipeline_error(&e);
            return Err(e.into());
        }
    }

    Ok(())
}

//! Transcript command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::Pipeline;
use anyhow::Result;

/// Run the transcript command.
pub async fn run_transcript(url: &str, mut settings: Settings) -> Result<()> {
    preflight::check(Operation::Transcript, &settings)?;

    settings.cache.enabled = false;
    let pipeline = Pipeline::new(&settings)?;

    let spinner = Output::spinner("Fetching transcript...");
    let result = pipeline.transcript(url).await;
    spinner.finish_and_clear();

    match result {
        Ok(transcript) => {
            Output::info(&format!(
                "{} transcript ({}), {} characters",
                if transcript.is_generated { "Generated" } else { "Manual" },
                transcript.language_code,
                transcript.text.chars().count()
            ));
            println!("{}", transcript.text);
            Ok(())
        }
        Err(e) => {
            Output::pipeline_error(&e);
            Err(e.into())
        }
    }
}

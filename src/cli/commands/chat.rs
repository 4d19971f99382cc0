//! Interactive question loop over one video.

use super::apply_overrides;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::Pipeline;
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the chat command.
///
/// The video is indexed once; each question is then answered independently,
/// with no memory of earlier questions.
pub async fn run_chat(
    url: &str,
    k: Option<usize>,
    model: Option<String>,
    mut settings: Settings,
) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Ask, &settings) {
        Output::error(&e.to_string());
        return Err(e.into());
    }

    apply_overrides(&mut settings, k, model);
    let pipeline = Pipeline::new(&settings)?;

    let spinner = Output::spinner("Reading transcript and building index...");
    let session = match pipeline.open_session(url).await {
        Ok(session) => {
            spinner.finish_and_clear();
            session
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::pipeline_error(&e);
            return Err(e.into());
        }
    };

    Output::success(&format!(
        "Indexed video {} ({} chunks)",
        session.video_id(),
        session.chunk_count()
    ));
    println!("{}\n", style("Type your questions, or 'exit' to quit.").dim());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        let spinner = Output::spinner("Thinking...");
        let result = pipeline.ask(&session, input).await;
        spinner.finish_and_clear();

        match result {
            Ok(answer) => {
                println!("\n{} {}\n", style("ytqa:").cyan().bold(), answer.text);
            }
            Err(e) => {
                Output::pipeline_error(&e);
            }
        }
    }

    Ok(())
}

//! ytqa - Ask questions about a YouTube video
//!
//! Answers a natural-language question about what is said in a YouTube video
//! by retrieving the most relevant transcript passages and asking a language
//! model to answer from that context alone.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `video_id` - Video identifier extraction
//! - `transcript` - Transcript track selection and fetching
//! - `chunking` - Overlapping transcript chunks
//! - `embedding` - Embedding generation
//! - `index` - In-memory similarity index and per-video cache
//! - `retrieval` - Top-k retrieval for a question
//! - `rag` - Prompt assembly and answer generation
//! - `pipeline` - Request coordination
//! - `config` - Configuration management
//!
//! # Example
//!
//! ```rust,no_run
//! use ytqa::config::Settings;
//! use ytqa::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::new(&settings)?;
//!
//!     let answer = pipeline
//!         .answer_question("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "What is the song about?")
//!         .await?;
//!     println!("{}", answer);
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod index;
pub mod openai;
pub mod pipeline;
pub mod rag;
pub mod retrieval;
pub mod transcript;
pub mod video_id;

#[cfg(test)]
mod testing;

pub use error::{ErrorKind, Result, YtqaError};

//! Question-answering pipeline.
//!
//! Coordinates the whole request: identifier extraction, transcript
//! acquisition, chunking and indexing (once per video), then retrieval and
//! answer composition (once per question). Every stage fails fast and nothing
//! is retried here.

use crate::chunking::{split_text, ChunkingConfig};
use crate::config::{Prompts, Settings};
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::{Result, YtqaError};
use crate::index::{IndexCache, Indexer, SimilarityIndex};
use crate::rag::{Answer, AnswerComposer, LanguageModel, OpenAIChatModel};
use crate::retrieval::Retriever;
use crate::transcript::{Transcript, TranscriptAcquirer, TranscriptService, YoutubeTranscriptService};
use crate::video_id::{extract_video_id, VideoId};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// A video whose index is built and ready for questions.
///
/// Holding on to a session lets a caller ask several questions without
/// re-embedding the transcript.
#[derive(Debug, Clone)]
pub struct VideoSession {
    video_id: VideoId,
    index: Arc<SimilarityIndex>,
}

impl VideoSession {
    pub fn video_id(&self) -> &VideoId {
        &self.video_id
    }

    /// Number of indexed chunks.
    pub fn chunk_count(&self) -> usize {
        self.index.len()
    }
}

/// The main question-answering pipeline.
pub struct Pipeline {
    acquirer: TranscriptAcquirer,
    chunking: ChunkingConfig,
    indexer: Indexer,
    retriever: Retriever,
    composer: AnswerComposer,
    cache: Option<IndexCache>,
}

impl Pipeline {
    /// Create a pipeline backed by YouTube and OpenAI-compatible services.
    pub fn new(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let transcripts = Arc::new(YoutubeTranscriptService::new(Duration::from_secs(
            settings.transcript.request_timeout_seconds,
        ))?);

        let embedder = Arc::new(OpenAIEmbedder::with_config(
            &settings.embedding.model,
            settings.embedding.dimensions as usize,
            settings.embedding.api_base.as_deref(),
        )?);

        let model = Arc::new(OpenAIChatModel::new(
            &settings.generation.model,
            settings.generation.api_base.as_deref(),
        )?);

        info!(
            "Using {} for embeddings and {} for answers",
            settings.embedding.model, settings.generation.model
        );

        Self::with_components(settings, prompts, transcripts, embedder, model)
    }

    /// Create a pipeline with custom components.
    pub fn with_components(
        settings: &Settings,
        prompts: Prompts,
        transcripts: Arc<dyn TranscriptService>,
        embedder: Arc<dyn Embedder>,
        model: Arc<dyn LanguageModel>,
    ) -> Result<Self> {
        settings.validate()?;

        let cache = (settings.cache.enabled && settings.cache.max_entries > 0).then(|| {
            IndexCache::new(
                Duration::from_secs(settings.cache.ttl_seconds),
                settings.cache.max_entries as u64,
            )
        });

        Ok(Self {
            acquirer: TranscriptAcquirer::new(transcripts)
                .with_languages(settings.transcript.languages.clone()),
            chunking: settings.chunking.to_config(),
            indexer: Indexer::new(embedder.clone())
                .with_batch_size(settings.embedding.batch_size)
                .with_max_concurrent(settings.embedding.max_concurrent),
            retriever: Retriever::new(embedder).with_k(settings.retrieval.k),
            composer: AnswerComposer::new(model)
                .with_prompts(prompts)
                .with_temperature(settings.generation.temperature),
            cache,
        })
    }

    /// Override the number of retrieved chunks. Zero is raised to one.
    pub fn with_k(mut self, k: usize) -> Self {
        self.retriever = self.retriever.with_k(k);
        self
    }

    /// Answer a question about a video in one call.
    ///
    /// An empty question is rejected before any service is contacted.
    #[instrument(skip(self, question))]
    pub async fn answer_question(&self, video_url_or_id: &str, question: &str) -> Result<Answer> {
        let question = validate_question(question)?;
        let session = self.open_session(video_url_or_id).await?;
        self.ask(&session, question).await
    }

    /// Acquire, chunk and index a video, or reuse its cached index.
    ///
    /// Concurrent sessions for the same video share a single build.
    #[instrument(skip(self))]
    pub async fn open_session(&self, video_url_or_id: &str) -> Result<VideoSession> {
        let video_id = extract_video_id(video_url_or_id)?;

        let index = match &self.cache {
            Some(cache) => {
                cache
                    .get_or_build(video_id.clone(), self.load_index(&video_id))
                    .await?
            }
            None => Arc::new(self.load_index(&video_id).await?),
        };

        Ok(VideoSession { video_id, index })
    }

    /// Answer one question against an open session.
    #[instrument(skip(self, session, question), fields(video_id = %session.video_id))]
    pub async fn ask(&self, session: &VideoSession, question: &str) -> Result<Answer> {
        let question = validate_question(question)?;

        let retrieval = self.retriever.retrieve(question, &session.index).await?;
        self.composer.compose(&retrieval, question).await
    }

    /// Fetch the transcript for a video without indexing it.
    pub async fn transcript(&self, video_url_or_id: &str) -> Result<Transcript> {
        let video_id = extract_video_id(video_url_or_id)?;
        self.acquirer.acquire(&video_id).await
    }

    /// Drop a cached index so the next session rebuilds it.
    pub async fn invalidate(&self, video_id: &VideoId) -> bool {
        match &self.cache {
            Some(cache) => cache.invalidate(video_id).await,
            None => false,
        }
    }

    async fn load_index(&self, video_id: &VideoId) -> Result<SimilarityIndex> {
        let transcript = self.acquirer.acquire(video_id).await?;
        let chunks = split_text(&transcript.text, &self.chunking)?;
        info!("Split transcript into {} chunks", chunks.len());
        self.indexer.build(chunks).await
    }
}

fn validate_question(question: &str) -> Result<&str> {
    let question = question.trim();
    if question.is_empty() {
        return Err(YtqaError::InvalidInput("Please enter a question".to_string()));
    }
    Ok(question)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::{StubEmbedder, StubLanguageModel, StubTranscriptService};
    use tokio_test::{assert_err, assert_ok};

    const URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
    const QUESTION: &str = "At what temperature does water boil?";

    struct Harness {
        transcripts: Arc<StubTranscriptService>,
        embedder: Arc<StubEmbedder>,
        model: Arc<StubLanguageModel>,
        pipeline: Pipeline,
    }

    fn harness_with(settings: Settings, transcripts: StubTranscriptService) -> Harness {
        let transcripts = Arc::new(transcripts);
        let embedder = Arc::new(StubEmbedder::default());
        let model = Arc::new(StubLanguageModel::replying("Water boils at 100 degrees."));
        let pipeline = Pipeline::with_components(
            &settings,
            Prompts::default(),
            transcripts.clone(),
            embedder.clone(),
            model.clone(),
        )
        .unwrap();

        Harness {
            transcripts,
            embedder,
            model,
            pipeline,
        }
    }

    fn small_chunk_settings() -> Settings {
        let mut settings = Settings::default();
        settings.chunking.max_chunk_size = 40;
        settings.chunking.overlap = 6;
        settings
    }

    fn harness() -> Harness {
        harness_with(
            small_chunk_settings(),
            StubTranscriptService::new()
                .with_track("en", false, &["The sky is blue.", "Water boils at 100 degrees."]),
        )
    }

    #[tokio::test]
    async fn test_retrieves_relevant_sentence() {
        let h = harness();

        let answer = h.pipeline.answer_question(URL, QUESTION).await.unwrap();
        assert_eq!(answer.text, "Water boils at 100 degrees.");
        assert!(answer.sources[0].chunk.text.contains("Water boils at 100 degrees."));

        let calls = h.model.calls();
        assert_eq!(calls.len(), 1);
        let (prompt, temperature) = &calls[0];
        assert_eq!(*temperature, 0.5);

        let context = prompt
            .split("Context:\n")
            .nth(1)
            .and_then(|rest| rest.split("\n\nQuestion:").next())
            .unwrap();
        assert!(context.starts_with("blue. Water boils at 100 degrees."));
        assert!(prompt.contains(&format!("Question: {}", QUESTION)));
    }

    #[tokio::test]
    async fn test_empty_question_makes_no_calls() {
        let h = harness();

        for question in ["", "   \n"] {
            let err = h.pipeline.answer_question(URL, question).await.unwrap_err();
            assert_eq!(err.kind(), Some(ErrorKind::InvalidInput));
        }

        assert_eq!(h.transcripts.list_calls(), 0);
        assert_eq!(h.embedder.calls(), 0);
        assert!(h.model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_url_makes_no_calls() {
        let h = harness();
        let err = assert_err!(h.pipeline.answer_question("not a url", QUESTION).await);

        assert_eq!(err.kind(), Some(ErrorKind::InvalidInput));
        assert_eq!(h.transcripts.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_transcripts_disabled() {
        let h = harness_with(Settings::default(), StubTranscriptService::disabled());
        let err = h.pipeline.answer_question(URL, QUESTION).await.unwrap_err();

        assert_eq!(err.kind(), Some(ErrorKind::TranscriptUnavailable));
        assert_eq!(h.embedder.calls(), 0);
        assert!(h.model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_acquisition_failure_is_retryable() {
        let h = harness_with(Settings::default(), StubTranscriptService::failing("connection reset"));
        let err = h.pipeline.answer_question(URL, QUESTION).await.unwrap_err();

        let kind = err.kind().unwrap();
        assert_eq!(kind, ErrorKind::AcquisitionFailed);
        assert!(kind.is_retryable());
    }

    #[tokio::test]
    async fn test_deterministic_answers() {
        let first = harness();
        let second = harness();

        let a = first.pipeline.answer_question(URL, QUESTION).await.unwrap();
        let b = second.pipeline.answer_question(URL, QUESTION).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(first.model.calls(), second.model.calls());
    }

    #[tokio::test]
    async fn test_cache_reuses_built_index() {
        let h = harness();

        h.pipeline.answer_question(URL, QUESTION).await.unwrap();
        h.pipeline
            .answer_question("https://youtu.be/dQw4w9WgXcQ", "Is the sky blue?")
            .await
            .unwrap();
        assert_eq!(h.transcripts.list_calls(), 1);

        let video = VideoId::parse(URL).unwrap();
        assert!(h.pipeline.invalidate(&video).await);
        h.pipeline.answer_question(URL, QUESTION).await.unwrap();
        assert_eq!(h.transcripts.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_without_cache_rebuilds_every_time() {
        let mut settings = small_chunk_settings();
        settings.cache.enabled = false;
        let h = harness_with(
            settings,
            StubTranscriptService::new().with_track("en", true, &["Water boils at 100 degrees."]),
        );

        h.pipeline.answer_question(URL, QUESTION).await.unwrap();
        h.pipeline.answer_question(URL, QUESTION).await.unwrap();
        assert_eq!(h.transcripts.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_session_answers_several_questions() {
        let h = harness();
        let session = h.pipeline.open_session(URL).await.unwrap();
        assert_eq!(session.video_id().as_str(), "dQw4w9WgXcQ");
        assert_eq!(session.chunk_count(), 2);

        let embed_calls = h.embedder.calls();
        h.pipeline.ask(&session, QUESTION).await.unwrap();
        h.pipeline.ask(&session, "What colour is the sky?").await.unwrap();

        // One embedding call per question, no re-indexing.
        assert_eq!(h.embedder.calls(), embed_calls + 2);
        assert_eq!(h.transcripts.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_generation_failure_is_surfaced() {
        let transcripts = Arc::new(
            StubTranscriptService::new().with_track("en", false, &["Water boils at 100 degrees."]),
        );
        let model = Arc::new(StubLanguageModel::replying(""));
        let pipeline = Pipeline::with_components(
            &Settings::default(),
            Prompts::default(),
            transcripts,
            Arc::new(StubEmbedder::default()),
            model.clone(),
        )
        .unwrap();

        let err = pipeline.answer_question(URL, QUESTION).await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::GenerationFailed));
        assert_eq!(model.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_k_override() {
        let h = harness();
        let pipeline = h.pipeline.with_k(1);
        let answer = assert_ok!(pipeline.answer_question(URL, QUESTION).await);
        assert_eq!(answer.sources.len(), 1);
    }

    #[tokio::test]
    async fn test_zero_k_keeps_context() {
        let h = harness();
        let pipeline = h.pipeline.with_k(0);
        let answer = assert_ok!(pipeline.answer_question(URL, "When?").await);

        assert_eq!(answer.sources.len(), 1);
        let (prompt, _) = &h.model.calls()[0];
        assert!(!prompt.contains("Context:\n\n\nQuestion:"));
    }

    #[tokio::test]
    async fn test_concurrent_sessions_build_once() {
        let h = harness();

        let (a, b) = tokio::join!(h.pipeline.open_session(URL), h.pipeline.open_session(URL));
        assert_ok!(a);
        assert_ok!(b);
        assert_eq!(h.transcripts.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_transcript_only() {
        let h = harness();
        let transcript = assert_ok!(h.pipeline.transcript(URL).await);
        assert_eq!(transcript.text, "The sky is blue. Water boils at 100 degrees.");
        assert_eq!(h.embedder.calls(), 0);
    }
}

//! Grounding-prompt assembly and answer generation.
//!
//! The composer turns the retrieved chunks and the user's question into a
//! single prompt that restricts the model to the supplied text, then
//! delegates to a [`Generator`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use carta_gemini::GeminiClient;
use carta_rag::SearchResult;

/// Fixed phrase the model is instructed to emit when the supplied
/// excerpts do not contain the answer.
pub const FALLBACK_PHRASE: &str = "I could not find information about this in the provided text.";

/// User-visible message shown in place of an answer when the generation
/// call fails. Deliberately carries no error internals.
pub const GENERATION_FAILURE_MESSAGE: &str =
    "Something went wrong while generating the answer. Please try again.";

/// A text-generation backend.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate free text from a prompt.
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

/// A [`Generator`] backed by the Gemini `generateContent` endpoint.
pub struct GeminiGenerator {
    client: GeminiClient,
    model: String,
}

impl GeminiGenerator {
    /// Create a new generator over an existing client.
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self { client, model: model.into() }
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        Ok(self.client.generate_content(&self.model, prompt).await?)
    }
}

/// Builds grounding prompts and produces each turn's assistant answer.
pub struct AnswerComposer {
    generator: Arc<dyn Generator>,
}

impl AnswerComposer {
    /// Create a composer over the given generator.
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// Assemble the grounding prompt: a fixed instruction preamble, the
    /// numbered excerpts, and the user's question.
    ///
    /// Sections are numbered from 1 in retrieval order so the model can
    /// cite them.
    pub fn compose_prompt(query: &str, results: &[SearchResult]) -> String {
        let excerpts = results
            .iter()
            .enumerate()
            .map(|(i, r)| format!("Section {}:\n{}", i + 1, r.chunk.text))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            "You are an expert on the constitution. Answer the user's question using the \
             constitution excerpts below.\n\n\
             IMPORTANT: Base your answer only on the provided excerpts. If the excerpts do \
             not contain the answer, reply with: \"{FALLBACK_PHRASE}\"\n\n\
             Constitution excerpts:\n{excerpts}\n\n\
             User question: {query}\n\n\
             Keep your answer clear, precise, and professional. Quote the text where \
             appropriate."
        )
    }

    /// Produce the assistant answer for one turn.
    ///
    /// A generation failure is logged and converted into
    /// [`GENERATION_FAILURE_MESSAGE`]; it is not retried, and subsequent
    /// turns are unaffected.
    pub async fn answer(&self, query: &str, results: &[SearchResult]) -> String {
        let prompt = Self::compose_prompt(query, results);
        match self.generator.generate(&prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                error!(error = %e, "generation failed");
                GENERATION_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

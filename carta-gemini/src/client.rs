//! HTTP client for the Gemini generation and embedding endpoints.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{GeminiError, Result};

/// The default API base URL.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Per-request timeout applied to every call. The API has no documented
/// upper bound on generation latency, so a blocked turn is converted into
/// an error after this long instead of hanging the session.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// A client for the Google Generative Language REST API.
///
/// One instance serves both generation and embedding requests; the model
/// is chosen per call. Cloning is cheap (the underlying `reqwest::Client`
/// is reference-counted).
///
/// # Example
///
/// ```rust,ignore
/// use carta_gemini::GeminiClient;
///
/// let client = GeminiClient::new(api_key)?;
/// let answer = client.generate_content("gemini-2.0-flash", "Say hello").await?;
/// ```
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new client with the given API key.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::MissingApiKey`] if the key is empty and
    /// [`GeminiError::Http`] if the HTTP client cannot be constructed.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(GeminiError::MissingApiKey);
        }

        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self { http, api_key, base_url: DEFAULT_BASE_URL.to_string() })
    }

    /// Generate text from a single prompt.
    ///
    /// Posts the prompt to `models/{model}:generateContent` and returns the
    /// concatenated text parts of the first candidate.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::EmptyResponse`] when the API answers without
    /// any candidate text, and the usual transport/API errors otherwise.
    pub async fn generate_content(&self, model: &str, prompt: &str) -> Result<String> {
        debug!(model, prompt_len = prompt.len(), "generating content");

        let url = format!("{}/models/{model}:generateContent", self.base_url);
        let request = GenerateContentRequest {
            contents: vec![Content { parts: vec![Part { text: prompt }] }],
        };

        let response: GenerateContentResponse = self.post_json(&url, &request).await?;
        extract_text(response)
    }

    /// Embed a single text, returning its vector.
    pub async fn embed_content(&self, model: &str, text: &str) -> Result<Vec<f32>> {
        debug!(model, text_len = text.len(), "embedding single text");

        let url = format!("{}/models/{model}:embedContent", self.base_url);
        let request = EmbedContentRequest {
            model: format!("models/{model}"),
            content: Content { parts: vec![Part { text }] },
        };

        let response: EmbedContentResponse = self.post_json(&url, &request).await?;
        Ok(response.embedding.values)
    }

    /// Embed a batch of texts in a single request.
    ///
    /// Returns one vector per input, in input order. An empty input slice
    /// short-circuits to an empty result without a network call.
    pub async fn batch_embed_contents(&self, model: &str, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(model, batch_size = texts.len(), "embedding batch");

        let url = format!("{}/models/{model}:batchEmbedContents", self.base_url);
        let model_path = format!("models/{model}");
        let request = BatchEmbedRequest {
            requests: texts
                .iter()
                .map(|text| EmbedRequest {
                    model: &model_path,
                    content: Content { parts: vec![Part { text }] },
                })
                .collect(),
        };

        let response: BatchEmbedResponse = self.post_json(&url, &request).await?;
        if response.embeddings.len() != texts.len() {
            return Err(GeminiError::Parse(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                response.embeddings.len()
            )));
        }

        Ok(response.embeddings.into_iter().map(|e| e.values).collect())
    }

    /// POST a JSON body and deserialize the JSON response.
    ///
    /// Non-success status codes are decoded into the API's error message
    /// when the body carries one, falling back to the raw body text.
    async fn post_json<Req, Resp>(&self, url: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "request failed");
                GeminiError::Http(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(GeminiError::Http)?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            error!(status = status.as_u16(), "API error");
            return Err(GeminiError::Api { status: status.as_u16(), message: detail });
        }

        serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "failed to parse response");
            GeminiError::Parse(e.to_string())
        })
    }
}

/// Pull the first candidate's text out of a generation response.
pub(crate) fn extract_text(response: GenerateContentResponse) -> Result<String> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content.parts.into_iter().filter_map(|p| p.text).collect::<Vec<_>>().join("")
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(GeminiError::EmptyResponse);
    }
    Ok(text)
}

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub(crate) candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
pub(crate) struct Candidate {
    pub(crate) content: Option<CandidateContent>,
}

#[derive(Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub(crate) parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
pub(crate) struct CandidatePart {
    pub(crate) text: Option<String>,
}

#[derive(Serialize)]
struct EmbedContentRequest<'a> {
    model: String,
    content: Content<'a>,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    content: Content<'a>,
}

#[derive(Serialize)]
struct BatchEmbedRequest<'a> {
    requests: Vec<EmbedRequest<'a>>,
}

#[derive(Deserialize)]
pub(crate) struct EmbedContentResponse {
    pub(crate) embedding: ContentEmbedding,
}

#[derive(Deserialize)]
pub(crate) struct BatchEmbedResponse {
    #[serde(default)]
    pub(crate) embeddings: Vec<ContentEmbedding>,
}

#[derive(Deserialize)]
pub(crate) struct ContentEmbedding {
    pub(crate) values: Vec<f32>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

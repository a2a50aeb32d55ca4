use std::time::Duration;

use crate::ai_types::{GenerateContentRequest, GenerateContentResponse};
use crate::error::LlmError;

/// Public Gemini endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Fallback order: cheapest and fastest first.
pub const DEFAULT_MODELS: &[&str] =
    &["gemini-2.5-flash-lite", "gemini-2.5-flash", "gemini-1.5-flash", "gemini-2.0-flash-exp"];
/// Tries per model before moving to the next one.
pub const ATTEMPTS_PER_MODEL: usize = 2;
/// Pause between attempts after a 429/503.
pub const DEFAULT_RETRY_PAUSE: Duration = Duration::from_secs(2);

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) models: Vec<String>,
    pub(crate) retry_pause: Duration,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("client", &self.client)
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("models", &self.models)
            .field("retry_pause", &self.retry_pause)
            .finish()
    }
}

impl GeminiClient {
    /// Creates a client with the default model list and retry pause.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(api_key: String, base_url: String) -> Result<Self, LlmError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| LlmError::ClientInit(e.to_string()))?;
        Ok(Self {
            client,
            api_key,
            base_url,
            models: DEFAULT_MODELS.iter().map(|m| (*m).to_owned()).collect(),
            retry_pause: DEFAULT_RETRY_PAUSE,
        })
    }

    /// Replaces the fallback order. An empty list keeps the current one.
    #[must_use]
    pub fn with_models(mut self, models: Vec<String>) -> Self {
        let models: Vec<String> = models
            .into_iter()
            .map(|m| m.trim().to_owned())
            .filter(|m| !m.is_empty())
            .collect();
        if models.is_empty() {
            tracing::warn!("Empty model list ignored, keeping {:?}", self.models);
        } else {
            self.models = models;
        }
        self
    }

    #[must_use]
    pub const fn with_retry_pause(mut self, pause: Duration) -> Self {
        self.retry_pause = pause;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Send the request through the model fallback loop and return the
    /// first candidate's text.
    ///
    /// Each model gets [`ATTEMPTS_PER_MODEL`] tries. Only 429 and 503 move
    /// the loop forward; any other failure is returned immediately.
    ///
    /// # Errors
    /// Returns the first non-retryable error, or `ModelsExhausted` carrying
    /// the last 429/503 once every model has been tried.
    pub(crate) async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<String, LlmError> {
        let mut attempts = 0usize;
        let mut last_error: Option<LlmError> = None;

        for model in &self.models {
            for attempt in 1..=ATTEMPTS_PER_MODEL {
                if last_error.is_some() && !self.retry_pause.is_zero() {
                    tokio::time::sleep(self.retry_pause).await;
                }
                attempts += 1;

                match self.generate_once(model, request).await {
                    Ok(text) => {
                        if attempts > 1 {
                            tracing::info!(%model, attempts, "Classification succeeded after retry");
                        }
                        return Ok(text);
                    },
                    Err(e) if e.is_transient() => {
                        tracing::warn!(%model, attempt, error = %e, "Model busy, retrying");
                        last_error = Some(e);
                    },
                    Err(e) => {
                        tracing::warn!(%model, attempt, error = %e, "Classification aborted");
                        return Err(e);
                    },
                }
            }
        }

        Err(LlmError::ModelsExhausted {
            attempts,
            last: Box::new(last_error.unwrap_or(LlmError::EmptyResponse)),
        })
    }

    async fn generate_once(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String, LlmError> {
        let response = self
            .client
            .post(format!("{}/v1beta/models/{model}:generateContent", self.base_url))
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
            return Err(LlmError::HttpStatus { code: status.as_u16(), body });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::JsonParse {
                context: format!("generateContent response (body: {})", truncate(&body, 200)),
                source: e,
            })?;
        parsed.into_text().ok_or(LlmError::EmptyResponse)
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}

//! HTTP client for the Minimax text-to-speech API.

/// Official Minimax endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.minimax.chat";

/// Default narration voice.
pub const DEFAULT_VOICE: &str = "female-shaonv";

/// Credentials and tuning for the speech-synthesis call, constructed
/// once at process start.
#[derive(Debug, Clone)]
pub struct TtsConfig {
    /// Bearer token.
    pub api_key: String,
    /// Minimax group id, sent in the request body.
    pub group_id: String,
    /// Base URL (overridable for tests).
    pub base_url: String,
    /// Voice identifier.
    pub voice_id: String,
}

impl TtsConfig {
    pub fn new(api_key: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            group_id: group_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            voice_id: DEFAULT_VOICE.to_string(),
        }
    }
}

/// Errors from the speech-synthesis layer.
#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    /// The HTTP request itself failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Minimax returned a non-2xx status code.
    #[error("Minimax API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Textual error body.
        body: String,
    },
}

/// Client for the Minimax `text_to_speech` endpoint.
pub struct MinimaxTts {
    client: reqwest::Client,
    config: TtsConfig,
}

impl MinimaxTts {
    pub fn new(config: TtsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Synthesize narration audio for the given text.
    ///
    /// Returns the raw audio bytes (MP3) on success.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsError> {
        let body = serde_json::json!({
            "group_id": self.config.group_id,
            "text": text,
            "voice_id": self.config.voice_id,
        });

        let response = self
            .client
            .post(format!("{}/v1/text_to_speech", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(TtsError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

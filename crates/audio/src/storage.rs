//! Object-storage client for narration uploads.
//!
//! Speaks the Supabase-storage REST surface: an authenticated object
//! write plus a public-URL convention. Overwrite is always disallowed;
//! callers guarantee uniqueness through timestamped paths.

/// Bucket holding narration audio.
pub const AUDIO_BUCKET: &str = "scripts-audio";

/// Storage endpoint and credentials, constructed once at process start.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`.
    pub base_url: String,
    /// Bearer token for object writes.
    pub api_key: String,
    /// Target bucket.
    pub bucket: String,
}

impl StorageConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            bucket: AUDIO_BUCKET.to_string(),
        }
    }
}

/// Errors from the object-storage layer. These are always fatal to the
/// requesting action; a silently dropped upload would leave the user
/// believing narration succeeded.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The HTTP request itself failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The storage service rejected the write.
    #[error("Storage upload failed ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Textual error body.
        body: String,
    },
}

/// Object-storage client bound to one bucket.
pub struct ObjectStorage {
    client: reqwest::Client,
    config: StorageConfig,
}

impl ObjectStorage {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Upload an object and return its public URL.
    ///
    /// The write is sent with `x-upsert: false`, so a path collision is
    /// an error rather than a silent overwrite.
    pub async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let response = self
            .client
            .post(format!(
                "{}/storage/v1/object/{}/{path}",
                self.config.base_url, self.config.bucket
            ))
            .bearer_auth(&self.config.api_key)
            .header("content-type", content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StorageError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(self.public_url(path))
    }

    /// Public download URL for an object in the bucket.
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{path}",
            self.config.base_url, self.config.bucket
        )
    }
}

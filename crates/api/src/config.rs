use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields except the upstream credentials have defaults suitable for
/// local development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`, narration calls
    /// wait on two upstream services).
    pub request_timeout_secs: u64,
    /// Path of the preference blob file.
    pub settings_path: PathBuf,
    /// Gemini credentials and endpoint.
    pub gemini: GeminiSettings,
    /// Minimax TTS credentials and endpoint.
    pub minimax: MinimaxSettings,
    /// Object-storage endpoint and credentials.
    pub storage: StorageSettings,
}

/// Gemini upstream settings.
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    /// Override of the official endpoint, for stubbed environments.
    pub base_url: Option<String>,
}

/// Minimax TTS upstream settings.
#[derive(Debug, Clone)]
pub struct MinimaxSettings {
    pub api_key: String,
    pub group_id: String,
    pub base_url: Option<String>,
}

/// Object-storage upstream settings.
#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub base_url: String,
    pub api_key: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                        |
    /// | `PORT`                 | `3000`                           |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS` | `60`                             |
    /// | `SETTINGS_FILE`        | `data/scriptflow_settings.json`  |
    /// | `GEMINI_API_KEY`       | *(required)*                     |
    /// | `GEMINI_BASE_URL`      | official endpoint                |
    /// | `MINIMAX_API_KEY`      | *(required)*                     |
    /// | `MINIMAX_GROUP_ID`     | *(required)*                     |
    /// | `MINIMAX_BASE_URL`     | official endpoint                |
    /// | `STORAGE_URL`          | *(required)*                     |
    /// | `STORAGE_API_KEY`      | *(required)*                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let settings_path = std::env::var("SETTINGS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                PathBuf::from("data").join(scriptflow_core::prefs::DEFAULT_SETTINGS_FILE)
            });

        let gemini = GeminiSettings {
            api_key: std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set"),
            base_url: std::env::var("GEMINI_BASE_URL").ok(),
        };

        let minimax = MinimaxSettings {
            api_key: std::env::var("MINIMAX_API_KEY").expect("MINIMAX_API_KEY must be set"),
            group_id: std::env::var("MINIMAX_GROUP_ID").expect("MINIMAX_GROUP_ID must be set"),
            base_url: std::env::var("MINIMAX_BASE_URL").ok(),
        };

        let storage = StorageSettings {
            base_url: std::env::var("STORAGE_URL").expect("STORAGE_URL must be set"),
            api_key: std::env::var("STORAGE_API_KEY").expect("STORAGE_API_KEY must be set"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            settings_path,
            gemini,
            minimax,
            storage,
        }
    }
}

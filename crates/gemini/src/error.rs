//! User-facing failure taxonomy for generation calls.

use crate::api::GeminiApiError;
use crate::retry::is_transient;

/// Classified generation failure. Each variant carries a distinct
/// human-readable message suitable for a blocking UI notification.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// Could not reach the API at all.
    #[error("Network error: unable to connect to the Gemini API. Please check your connection and try again.")]
    Network(String),

    /// The requested model does not exist.
    #[error("Model \"{model}\" not found. Please check the model name in settings.")]
    ModelNotFound { model: String },

    /// The API key is invalid, missing, or not authorized.
    #[error("Invalid or missing Gemini API key. Please check the configured credentials.")]
    Auth,

    /// The call succeeded but produced no text.
    #[error("No text was generated from the Gemini API response.")]
    EmptyResult,

    /// Anything else, carrying the underlying message.
    #[error("Failed to generate text: {0}")]
    Other(String),
}

/// Map a raw API failure into the taxonomy, in priority order:
/// network, model-not-found, auth, generic.
pub(crate) fn classify(err: GeminiApiError, model: &str) -> GeminiError {
    if is_transient(&err) {
        return GeminiError::Network(err.to_string());
    }

    let (status, message) = match &err {
        GeminiApiError::Api { status, body } => (Some(*status), body.clone()),
        GeminiApiError::Request(req_err) => (
            req_err.status().map(|s| s.as_u16()),
            req_err.to_string(),
        ),
    };

    if message.contains("MODEL_NOT_FOUND") || status == Some(404) {
        return GeminiError::ModelNotFound {
            model: model.to_string(),
        };
    }

    if message.contains("API_KEY") || matches!(status, Some(401) | Some(403)) {
        return GeminiError::Auth;
    }

    GeminiError::Other(message)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn api_error(status: u16, body: &str) -> GeminiApiError {
        GeminiApiError::Api {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn network_outranks_everything() {
        // A body that also mentions API_KEY still classifies as network
        // when it carries a network marker.
        let err = api_error(500, "network failure while checking API_KEY");
        assert_matches!(classify(err, "m"), GeminiError::Network(_));
    }

    #[test]
    fn model_not_found_by_marker_or_status() {
        assert_matches!(
            classify(api_error(400, "MODEL_NOT_FOUND: no such model"), "gemini-x"),
            GeminiError::ModelNotFound { model } if model == "gemini-x"
        );
        assert_matches!(
            classify(api_error(404, "not here"), "gemini-x"),
            GeminiError::ModelNotFound { .. }
        );
    }

    #[test]
    fn auth_by_marker_or_status() {
        assert_matches!(classify(api_error(400, "API_KEY_INVALID"), "m"), GeminiError::Auth);
        assert_matches!(classify(api_error(401, "denied"), "m"), GeminiError::Auth);
        assert_matches!(classify(api_error(403, "forbidden"), "m"), GeminiError::Auth);
    }

    #[test]
    fn model_not_found_outranks_auth() {
        let err = api_error(404, "MODEL_NOT_FOUND while validating API_KEY");
        assert_matches!(classify(err, "m"), GeminiError::ModelNotFound { .. });
    }

    #[test]
    fn unclassified_carries_underlying_message() {
        let err = classify(api_error(500, "quota exhausted"), "m");
        assert_matches!(&err, GeminiError::Other(msg) if msg.contains("quota exhausted"));
    }
}

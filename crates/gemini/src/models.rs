//! Catalog of selectable Gemini models.
//!
//! Model ids must match the official API documentation exactly; a typo
//! here surfaces as a model-not-found error at generation time.

use serde::Serialize;

/// Process-wide default model, used whenever a caller supplies none.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Release maturity of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelStatus {
    Stable,
    Preview,
}

/// A selectable text-generation model.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GeminiModel {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub status: ModelStatus,
}

/// Models offered in the settings page, in display order.
pub const GEMINI_MODELS: &[GeminiModel] = &[
    GeminiModel {
        id: "gemini-3-pro-preview",
        name: "Gemini 3 Pro (Preview)",
        description: "Strongest multimodal model; best quality, higher latency.",
        status: ModelStatus::Preview,
    },
    GeminiModel {
        id: "gemini-2.5-flash",
        name: "Gemini 2.5 Flash",
        description: "Cost-effective workhorse, recommended for production use.",
        status: ModelStatus::Stable,
    },
    GeminiModel {
        id: "gemini-2.5-flash-preview-09-2025",
        name: "Gemini 2.5 Flash (Preview 09/2025)",
        description: "Preview build of 2.5 Flash with the latest updates.",
        status: ModelStatus::Preview,
    },
    GeminiModel {
        id: "gemini-2.0-flash-lite",
        name: "Gemini 2.0 Flash-Lite",
        description: "Small second-generation model tuned for cost and latency.",
        status: ModelStatus::Stable,
    },
];

/// Look up a catalog entry by model id.
pub fn model_by_id(id: &str) -> Option<&'static GeminiModel> {
    GEMINI_MODELS.iter().find(|model| model.id == id)
}

/// Catalog entries marked stable.
pub fn stable_models() -> impl Iterator<Item = &'static GeminiModel> {
    GEMINI_MODELS
        .iter()
        .filter(|model| model.status == ModelStatus::Stable)
}

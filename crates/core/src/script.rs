//! Script domain helpers: workflow status, source platform detection,
//! display fallbacks, and editor-facing derived values.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Content characters narrated per second, used for the estimated-duration
/// readout in the editor stats bar.
pub const CHARS_PER_SECOND: f64 = 4.3;

/// Maximum number of hook options offered by the rewrite-hook action.
pub const MAX_HOOK_OPTIONS: usize = 3;

/// Leading `1. ` / `2) `-style list markers on hook option lines.
static LIST_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s*").expect("valid regex"));

// ---------------------------------------------------------------------------
// Workflow status
// ---------------------------------------------------------------------------

/// Workflow state of a script, matching the `status` column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptStatus {
    New,
    Editing,
    Done,
}

impl ScriptStatus {
    /// Parse from the database `status` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "new" => Ok(Self::New),
            "editing" => Ok(Self::Editing),
            "done" => Ok(Self::Done),
            other => Err(CoreError::Validation(format!(
                "Unknown script status '{other}'. Must be one of: new, editing, done"
            ))),
        }
    }

    /// Database column value.
    pub fn name(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Editing => "editing",
            Self::Done => "done",
        }
    }

    /// Human-readable label for dashboard badges.
    pub fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Editing => "Editing",
            Self::Done => "Done",
        }
    }
}

// ---------------------------------------------------------------------------
// Source platform
// ---------------------------------------------------------------------------

/// Originating platform of a script's source material, detected by
/// substring match on the source URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Xiaohongshu,
    Douyin,
}

impl Platform {
    /// Detect the platform from an optional source URL. Unknown hosts
    /// (and absent URLs) yield `None`.
    pub fn detect(source_url: Option<&str>) -> Option<Self> {
        let url = source_url?;
        if url.contains("xiaohongshu") {
            Some(Self::Xiaohongshu)
        } else if url.contains("douyin") {
            Some(Self::Douyin)
        } else {
            None
        }
    }

    /// Badge label shown on the dashboard.
    pub fn label(self) -> &'static str {
        match self {
            Self::Xiaohongshu => "小红书",
            Self::Douyin => "抖音",
        }
    }
}

// ---------------------------------------------------------------------------
// Derived editor values
// ---------------------------------------------------------------------------

/// Working content for display: the final copy when present, otherwise the
/// immutable draft. Persisted writes always target the final copy.
pub fn display_content<'a>(content_cn_final: Option<&'a str>, content_cn_draft: &'a str) -> &'a str {
    match content_cn_final {
        Some(text) if !text.is_empty() => text,
        _ => content_cn_draft,
    }
}

/// Estimated narration length in seconds for the given content.
///
/// Characters are counted as Unicode scalar values, not bytes, so CJK
/// content is not overcounted.
pub fn estimated_seconds(content: &str) -> f64 {
    content.chars().count() as f64 / CHARS_PER_SECOND
}

/// Format a duration in whole seconds as `MM:SS`.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Parse the numbered list returned by the rewrite-hook prompt into at
/// most [`MAX_HOOK_OPTIONS`] hook strings. Blank lines and list markers
/// are stripped.
pub fn parse_hook_options(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| LIST_MARKER_RE.replace(line.trim(), "").trim().to_string())
        .filter(|line| !line.is_empty())
        .take(MAX_HOOK_OPTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_name() {
        for status in [ScriptStatus::New, ScriptStatus::Editing, ScriptStatus::Done] {
            assert_eq!(ScriptStatus::from_name(status.name()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(ScriptStatus::from_name("archived").is_err());
    }

    #[test]
    fn platform_detected_by_substring() {
        assert_eq!(
            Platform::detect(Some("https://www.xiaohongshu.com/explore/abc")),
            Some(Platform::Xiaohongshu)
        );
        assert_eq!(
            Platform::detect(Some("https://v.douyin.com/xyz")),
            Some(Platform::Douyin)
        );
        assert_eq!(Platform::detect(Some("https://example.com/post")), None);
        assert_eq!(Platform::detect(None), None);
    }

    #[test]
    fn display_content_falls_back_to_draft() {
        assert_eq!(display_content(Some("final"), "draft"), "final");
        assert_eq!(display_content(None, "draft"), "draft");
        assert_eq!(display_content(Some(""), "draft"), "draft");
    }

    #[test]
    fn duration_uses_scalar_values_not_bytes() {
        // 43 CJK characters -> 10 seconds, despite being 129 UTF-8 bytes.
        let content = "字".repeat(43);
        assert!((estimated_seconds(&content) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn duration_formats_as_mm_ss() {
        assert_eq!(format_duration(0.0), "00:00");
        assert_eq!(format_duration(59.9), "00:59");
        assert_eq!(format_duration(125.0), "02:05");
    }

    #[test]
    fn hooks_parsed_from_numbered_list() {
        let text = "1. Stop scrolling right now\n2) You won't believe this\n\n3. Last chance today\n4. extra";
        let hooks = parse_hook_options(text);
        assert_eq!(
            hooks,
            vec![
                "Stop scrolling right now",
                "You won't believe this",
                "Last chance today",
            ]
        );
    }

    #[test]
    fn hooks_without_markers_pass_through() {
        let hooks = parse_hook_options("just one hook");
        assert_eq!(hooks, vec!["just one hook"]);
    }
}

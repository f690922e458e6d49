//! Fixed instruction templates for the editor's AI actions.
//!
//! Each builder takes the current working content and produces the full
//! prompt sent to the text-generation client. The templates are part of
//! the product behavior and must not drift per call site.

/// Number of leading content characters given to the rewrite-hook action.
pub const HOOK_CONTEXT_CHARS: usize = 50;

/// Prompt for the fix-CTA action: rework only the closing call to action.
pub fn fix_cta(content: &str) -> String {
    format!(
        "Optimize the call to action at the end to be engaging for social media. \
         Keep the rest of the content unchanged. Only modify the call to action part.\n\n{content}"
    )
}

/// Prompt for the rewrite-hook action: propose three viral hooks for the
/// opening of the script. Only the first [`HOOK_CONTEXT_CHARS`] characters
/// are sent.
pub fn rewrite_hook(content: &str) -> String {
    let opening: String = content.chars().take(HOOK_CONTEXT_CHARS).collect();
    format!(
        "Give me 3 viral hooks options for this text. Format your response as a \
         numbered list (1., 2., 3.) with each hook on a new line. \
         Only return the hooks, nothing else.\n\n{opening}"
    )
}

/// Prompt for the shorten action: condense to under 200 words.
pub fn shorten(content: &str) -> String {
    format!("Condense this to under 200 words but keep the key info:\n\n{content}")
}

/// Prompt for the translation action: casual US social-media English.
pub fn translate(text: &str) -> String {
    format!(
        "Translate this Chinese social media script to English. \
         Use casual, trendy US English suitable for Instagram/TikTok.\n\n{text}"
    )
}

//! Instruction prompt and response parsing for the hosted summarizer

/// Fixed instruction sent with every summarization request.
pub const SUMMARY_PROMPT: &str = r#"Summarize the document strictly as plain bullet points.
Rules:
- Only return bullet points.
- Do not include titles, labels, "insight", "priority", or any extra headers.
- Each bullet should be short, clear, and factual.
- No numbering, no categories, no metadata - just the bullet points.
"#;

/// Split a free-text model response into ordered bullet lines: one bullet
/// per line, trimmed, empty lines dropped.
pub fn parse_bullets(response: &str) -> Vec<String> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

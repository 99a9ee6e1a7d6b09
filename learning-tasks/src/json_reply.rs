/// Strips a surrounding Markdown code fence (```` ```json ... ``` ````) from a model reply.
///
/// Replies without a fence are returned trimmed.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") up to the first newline.
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

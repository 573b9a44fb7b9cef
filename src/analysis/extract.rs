//! Pull the JSON payload out of a model completion.

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Return the JSON part of `text`.
///
/// If the text contains a fenced block opened with ```` ```json ````, the
/// body of the first such block is returned, with or without a closing fence.
/// A completion that is entirely wrapped in a bare ```` ``` ```` fence is
/// unwrapped the same way. Anything else is returned trimmed.
pub fn extract_json_payload(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some((_, after)) = trimmed.split_once(JSON_FENCE) {
        return fenced_body(after);
    }

    if let Some(after) = trimmed.strip_prefix(FENCE) {
        // Skip an info string other than json, e.g. ```JSON or ```javascript
        let after = after.split_once('\n').map_or(after, |(_, body)| body);
        return fenced_body(after);
    }

    trimmed
}

fn fenced_body(after_open: &str) -> &str {
    let body = match after_open.split_once(FENCE) {
        Some((body, _)) => body,
        None => after_open,
    };
    body.trim()
}

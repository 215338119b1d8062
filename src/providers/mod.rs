mod directive;
mod openai;
mod synthetic;
mod traits;

pub use directive::{Directive, parse_directive};
pub use openai::{ChatDirectiveClient, OpenAiImageClient};
pub use synthetic::SyntheticImage;
pub use traits::ImageGenerator;

const MAX_ERROR_BODY_CHARS: usize = 200;

/// Redact token-bearing markers and truncate an upstream error body before it
/// reaches logs or error types.
pub fn sanitize_error_body(input: &str) -> String {
    const MARKERS: [&str; 4] = ["access_token=", "api_key=", "Bearer ", "\"access_token\":\""];

    let mut scrubbed = input.to_string();
    for marker in MARKERS {
        let mut from = 0;
        while let Some(rel) = scrubbed[from..].find(marker) {
            let start = from + rel + marker.len();
            let end = scrubbed[start..]
                .find(|c: char| !(c.is_ascii_alphanumeric() || "-_.:+/=".contains(c)))
                .map_or(scrubbed.len(), |i| start + i);
            if end > start {
                scrubbed.replace_range(start..end, "[REDACTED]");
            }
            from = start;
        }
    }

    if scrubbed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return scrubbed;
    }
    let mut end = MAX_ERROR_BODY_CHARS;
    while end > 0 && !scrubbed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &scrubbed[..end])
}

// Utility functions

pub mod logger;

pub use logger::*;

const LOG_PREVIEW_CHARS: usize = 200;

/// First 200 characters of `text`, cut on a char boundary.
pub fn truncate_for_log(text: &str) -> &str {
    text.char_indices()
        .nth(LOG_PREVIEW_CHARS)
        .map_or(text, |(idx, _)| &text[..idx])
}

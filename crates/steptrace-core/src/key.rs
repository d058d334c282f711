//! Storage keys for live traces.
//!
//! A live trace is addressed by `"{tag}:{trace_id}"`, with `trace_id`
//! falling back to [`DEFAULT_TRACE_ID`] when absent or empty. Any `\` or `:`
//! inside the tag is backslash-escaped so that the first unescaped `:` always
//! separates tag from id; keys for tags without those characters are exactly
//! `"{tag}:{trace_id}"`.
//!
//! An explicit trace id of `"default"` maps to the same key as no trace id.
//! Callers that need both must pick another id.

/// Trace id used when the caller does not supply one.
pub const DEFAULT_TRACE_ID: &str = "default";

/// Build the live-trace storage key for `(tag, trace_id)`.
pub fn trace_key(tag: &str, trace_id: Option<&str>) -> String {
    let id = match trace_id {
        Some(id) if !id.is_empty() => id,
        _ => DEFAULT_TRACE_ID,
    };

    let mut key = String::with_capacity(tag.len() + id.len() + 1);
    for c in tag.chars() {
        if c == '\\' || c == ':' {
            key.push('\\');
        }
        key.push(c);
    }
    key.push(':');
    key.push_str(id);
    key
}

/// Split a key produced by [`trace_key`] back into `(tag, trace_id)`.
///
/// The id comes back as stored, so a defaulted id is returned as `"default"`.
pub fn split_key(key: &str) -> Option<(String, String)> {
    let mut tag = String::new();
    let mut chars = key.char_indices();

    while let Some((idx, c)) = chars.next() {
        match c {
            '\\' => tag.push(chars.next()?.1),
            ':' => return Some((tag, key[idx + 1..].to_string())),
            _ => tag.push(c),
        }
    }
    None
}

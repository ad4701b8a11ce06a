//! Small string helpers for report rendering.

/// First `max` characters of `s`, never splitting a code point.
pub fn take_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

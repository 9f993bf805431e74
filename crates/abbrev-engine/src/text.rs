//! Character-indexed string helpers. Lengths everywhere in the engine are
//! counted in chars, never bytes.

/// Length in characters.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of the `n`th character, or `s.len()` past the end.
pub fn byte_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len())
}

/// Character index of a byte offset that lies on a char boundary.
pub fn char_index(s: &str, byte: usize) -> usize {
    s[..byte].chars().count()
}

/// First `n` characters.
pub fn take_chars(s: &str, n: usize) -> &str {
    &s[..byte_offset(s, n)]
}

/// Collapse every whitespace run to one space and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-fold a lookup key: lowercase with normalized whitespace.
pub fn fold_key(s: &str) -> String {
    normalize_whitespace(s).to_lowercase()
}

/// Re-apply the case pattern of `source` to `replacement`.
///
/// All-uppercase source uppercases the replacement; a source starting with an
/// uppercase letter capitalizes the replacement's first letter; anything else
/// lowercases it.
pub fn apply_case(source: &str, replacement: &str) -> String {
    let mut letters = source.chars().filter(|c| c.is_alphabetic()).peekable();
    if letters.peek().is_none() {
        return replacement.to_string();
    }
    if letters.all(char::is_uppercase) {
        return replacement.to_uppercase();
    }
    if source.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = replacement.chars();
        return match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
    }
    replacement.to_lowercase()
}

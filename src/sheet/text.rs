//! String normalisation shared by the extractor and the resolver.

/// Collapses whitespace runs to one space and trims both ends.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Deduplication key: case-insensitive, whitespace-collapsed.
pub fn identity_key(value: &str) -> String {
    collapse_whitespace(value).to_uppercase()
}

/// Lookup form used by the row resolver: periods removed, whitespace
/// collapsed, upper-cased. Digits are compared literally, so `"007"`
/// and `"7"` stay different.
pub fn lookup_key(value: &str) -> String {
    identity_key(&value.replace('.', ""))
}

/// True for cells that mark a header or an explicit blank rather than data.
pub fn is_marker(value: &str) -> bool {
    let value = value.trim();
    value == "." || matches!(value.to_lowercase().as_str(), "no" | "no." | "no..")
}

// crates/geobed-core/src/text.rs

/// Convert a string into a folded key suitable for indexing and sorting.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Łódź` -> `Lodz`)
/// 2\) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use geobed_core::text::fold_key;
///
/// assert_eq!(fold_key("Łódź"), "lodz");
/// assert_eq!(fold_key("MÜNCHEN"), "munchen");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// The first `n` characters of the folded key, or `None` when the folded
/// name is shorter than `n`.
///
/// ```rust
/// use geobed_core::text::folded_prefix;
///
/// assert_eq!(folded_prefix("Zürich", 2).as_deref(), Some("zu"));
/// assert_eq!(folded_prefix("A", 2), None);
/// ```
pub fn folded_prefix(s: &str, n: usize) -> Option<String> {
    let prefix: String = fold_key(s).chars().take(n).collect();
    if prefix.chars().count() == n {
        Some(prefix)
    } else {
        None
    }
}

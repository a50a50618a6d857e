//! Case-insensitive column-name lookup.
//!
//! Comparison folds both sides to "title case" (first character uppercased,
//! the rest lowercased). This is deliberately narrower than full Unicode
//! case folding; it is the rule callers' existing column lists were written
//! against, and tests depend on it.

/// Folds a name to title case: first character uppercased, rest lowercased.
pub fn title_fold(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Looks up `candidate` against `valid_names` under title-case folding.
///
/// Returns the canonical spelling from `valid_names` on a match. When more
/// than one name collides under the folding, the first match in iteration
/// order wins; callers pass names in header-position order, which keeps the
/// result deterministic.
pub fn match_name<'a, I>(candidate: &str, valid_names: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let folded = title_fold(candidate);
    valid_names
        .into_iter()
        .find(|name| title_fold(name) == folded)
}

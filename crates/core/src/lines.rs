//! Line normalization ahead of the block parser.

/// Split raw input into trimmed, non-empty lines.
pub fn normalize(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Strip one trailing `}` (plus the whitespace before it) from a line, so
/// that `Effect: x }` reads as `Effect: x`. Lines consisting solely of `}`
/// are block terminators and are matched verbatim by the parser, before
/// cleaning.
pub fn clean(line: &str) -> &str {
    match line.strip_suffix('}') {
        Some(rest) => rest.trim_end(),
        None => line,
    }
}

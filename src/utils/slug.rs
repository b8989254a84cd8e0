//! Fragment-safe identifiers.

/// Characters that break `#fragment` references or XML ids
const FORBIDDEN_CHARS: &[char] = &[
    '<', '>', ':', '|', '?', '*', '#', '&', '%', '"', '\'', '/', '\\', '(', ')', '[', ']',
];

/// Drop forbidden characters and join the remaining words with underscores.
pub fn sanitize_fragment(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || FORBIDDEN_CHARS.contains(&c))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_fragment() {
        assert_eq!(sanitize_fragment("layout"), "layout");
        assert_eq!(sanitize_fragment("shapes_graphics"), "shapes_graphics");
        assert_eq!(sanitize_fragment("Shapes & Graphics"), "Shapes_Graphics");
        assert_eq!(sanitize_fragment("  a\tb#c  "), "a_b_c");
        assert_eq!(sanitize_fragment("#&"), "");
    }
}

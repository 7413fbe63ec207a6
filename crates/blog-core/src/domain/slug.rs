//! Slug normalization: title text to URL-safe identifier.

/// Normalize arbitrary text into a slug made of `[a-z0-9-]`.
///
/// Whitespace becomes a hyphen, anything else outside the alphabet is dropped,
/// hyphen runs collapse to one and leading/trailing hyphens are trimmed.
/// Returns an empty string when nothing alphanumeric survives.
pub fn normalize(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());

    for ch in title.chars().flat_map(char::to_lowercase) {
        let mapped = if ch.is_whitespace() { '-' } else { ch };

        match mapped {
            'a'..='z' | '0'..='9' => slug.push(mapped),
            '-' if !slug.is_empty() && !slug.ends_with('-') => slug.push('-'),
            _ => {}
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Whether `slug` is non-empty and already in normalized form.
pub fn is_canonical(slug: &str) -> bool {
    !slug.is_empty() && normalize(slug) == slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches_slug_shape(s: &str) -> bool {
        s.is_empty()
            || s.split('-').all(|part| {
                !part.is_empty()
                    && part
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            })
    }

    #[test]
    fn test_punctuation_is_dropped() {
        assert_eq!(normalize("Hello, World!"), "hello-world");
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(normalize("  Already-slug  "), "already-slug");
    }

    #[test]
    fn test_hyphen_runs_collapse() {
        assert_eq!(normalize("a -- b\t\tc"), "a-b-c");
        assert_eq!(normalize("---x---"), "x");
    }

    #[test]
    fn test_non_ascii_letters_are_dropped() {
        assert_eq!(normalize("Café Olé 2024"), "caf-ol-2024");
    }

    #[test]
    fn test_empty_and_symbol_only_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("!!! ???"), "");
    }

    #[test]
    fn test_output_shape_and_idempotence() {
        let titles = [
            "My First Post",
            "  Rust 2024: what's new?  ",
            "C++ vs. Rust -- a comparison",
            "under_score and/slash",
            "ÜBER  straße",
            "-leading and trailing-",
            "tabs\tand\nnewlines",
        ];

        for title in titles {
            let slug = normalize(title);
            assert!(matches_slug_shape(&slug), "bad slug {slug:?} for {title:?}");
            assert_eq!(normalize(&slug), slug);
        }
    }

    #[test]
    fn test_is_canonical() {
        assert!(is_canonical("my-first-post"));
        assert!(is_canonical("v2"));
        assert!(!is_canonical(""));
        assert!(!is_canonical("My-Post"));
        assert!(!is_canonical("my--post"));
        assert!(!is_canonical("-post"));
        assert!(!is_canonical("post_1"));
    }
}

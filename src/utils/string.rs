use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Runs of anything outside the slug alphabet
static NON_SLUG_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-z0-9]+").expect("slug separator pattern is valid")
});

/// Combining Diacritical Marks block
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Create a URL-safe slug from a title or label.
///
/// Lowercases, decomposes (NFD) and drops the combining marks so accented
/// letters fall back to their base letter. `đ` has no decomposition and is
/// mapped explicitly. Everything outside `[a-z0-9]` collapses into single
/// hyphens, and one hyphen is trimmed from each end.
///
/// Never fails; returns an empty string when nothing survives.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();

    let stripped: String = lowered
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'đ' => 'd',
            // Unreachable after to_lowercase, kept for odd case mappings
            'Đ' => 'd',
            other => other,
        })
        .collect();

    let replaced = NON_SLUG_RUN.replace_all(&stripped, "-");
    let hyphenated: &str = &replaced;

    let slug = hyphenated.strip_prefix('-').unwrap_or(hyphenated);
    let slug = slug.strip_suffix('-').unwrap_or(slug);

    slug.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Who are you?"), "who-are-you");
        assert_eq!(slugify("Simple"), "simple");
    }

    #[test]
    fn test_slugify_vietnamese() {
        assert_eq!(slugify("Việt Nam"), "viet-nam");
        assert_eq!(slugify("Đà Nẵng"), "da-nang");
        assert_eq!(slugify("Thành phố Hồ Chí Minh"), "thanh-pho-ho-chi-minh");
        assert_eq!(slugify("đường ĐI"), "duong-di");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  multiple   spaces  "), "multiple-spaces");
        assert_eq!(slugify("Café #1 (2024)"), "cafe-1-2024");
        assert_eq!(slugify("a -- b __ c"), "a-b-c");
    }

    #[test]
    fn test_slugify_empty_results() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify("!@#$"), "");
    }

    #[test]
    fn test_slugify_drops_letters_without_ascii_base() {
        // No decomposition to ASCII for these
        assert_eq!(slugify("straße"), "stra-e");
        assert_eq!(slugify("日本語"), "");
    }

    #[test]
    fn test_slugify_decomposed_input() {
        // Already-decomposed "é" behaves like the precomposed one
        assert_eq!(slugify("Cafe\u{0301}"), "cafe");
    }

    proptest! {
        #[test]
        fn slugify_is_idempotent(input in "\\PC{0,64}") {
            let once = slugify(&input);
            prop_assert_eq!(slugify(&once), once);
        }

        #[test]
        fn slugify_output_stays_in_domain(input in "\\PC{0,64}") {
            let slug = slugify(&input);
            prop_assert!(slug.chars().all(|c| matches!(c, 'a'..='z' | '0'..='9' | '-')));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }

        #[test]
        fn slugify_is_deterministic(input in "\\PC{0,64}") {
            prop_assert_eq!(slugify(&input), slugify(&input));
        }
    }
}

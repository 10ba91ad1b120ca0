// Content filters - pure text matching, no state, no side effects.

use std::collections::BTreeSet;

/// Tokens the link filter blocks. Deliberately kept as-is: `gg` and `/` match
/// many ordinary messages, which is a known over-blocking defect flagged for
/// product-owner review rather than silently narrowed here.
const LINK_TOKENS: &[&str] = &["http://", "https://", "discord.gg", ".gg", "gg", "/"];

/// Does the text contain any censored word?
///
/// Case-insensitive substring match, not word-bounded. An empty word set
/// never matches.
pub fn contains_banned_word(text: &str, banned_words: &BTreeSet<String>) -> bool {
    if banned_words.is_empty() {
        return false;
    }
    let lowered = text.to_lowercase();
    banned_words.iter().any(|word| lowered.contains(word.as_str()))
}

/// Does the text contain any blocked link token?
///
/// Case-insensitive substring match against [`LINK_TOKENS`]. The caller
/// decides whether the link filter is enabled at all.
pub fn contains_link(text: &str) -> bool {
    let lowered = text.to_lowercase();
    LINK_TOKENS.iter().any(|token| lowered.contains(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn banned_word_matches_case_insensitively() {
        let banned = words(&["badword"]);
        assert!(contains_banned_word("this contains BadWord here", &banned));
        assert!(contains_banned_word("BADWORD", &banned));
    }

    #[test]
    fn banned_word_matches_as_substring() {
        // Not word-bounded: a word embedded in a longer token still matches.
        let banned = words(&["spam"]);
        assert!(contains_banned_word("antispammer", &banned));
    }

    #[test]
    fn empty_word_set_never_matches() {
        assert!(!contains_banned_word("anything at all", &BTreeSet::new()));
    }

    #[test]
    fn clean_text_does_not_match() {
        let banned = words(&["badword", "worse"]);
        assert!(!contains_banned_word("a perfectly fine message", &banned));
    }

    #[test]
    fn link_filter_matches_urls() {
        assert!(contains_link("check https://example.com"));
        assert!(contains_link("see HTTP://example.com"));
        assert!(contains_link("join discord.gg/abc"));
    }

    #[test]
    fn link_filter_is_intentionally_over_broad() {
        // Bare "/" and "gg" are on the block list; these suppressions are
        // expected behavior, not bugs.
        assert!(contains_link("either/or"));
        assert!(contains_link("gg everyone"));
    }

    #[test]
    fn link_filter_passes_plain_text() {
        assert!(!contains_link("hello there"));
    }
}

use std::sync::OnceLock;

use crate::prelude::*;

/// A quoted replacement following the hint phrase: the quoted text is the
/// sole candidate.
fn quoted_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)did you mean:?\s*'([^']+)'").expect("invalid quoted suggestion pattern")
    })
}

/// An unquoted tail following the hint phrase, split on `, `.
fn list_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)did you mean:?\s*(.+)").expect("invalid suggestion list pattern")
    })
}

/// Extract replacement candidates embedded in a diagnostic message. Most
/// messages carry no hint at all; that is the empty-result case, not a
/// failure.
pub(crate) fn extract_suggestions(message: &str) -> Vec<String> {
    if let Some(caps) = quoted_pattern().captures(message) {
        return vec![caps[1].to_string()];
    }
    let Some(caps) = list_pattern().captures(message) else {
        return Vec::new();
    };
    caps[1]
        .split(", ")
        .map(|piece| {
            piece
                .trim_matches(|c: char| c.is_whitespace() || matches!(c, '\'' | '"' | '(' | ')'))
                .to_string()
        })
        .filter(|piece| !piece.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_single_quoted_candidate() {
        assert_eq!(
            extract_suggestions("unknown keyword 'strat', did you mean: 'start'"),
            vec!["start"]
        );
    }

    #[test]
    fn extracts_comma_separated_list() {
        assert_eq!(
            extract_suggestions("unknown attribute, did you mean: foo, bar, baz"),
            vec!["foo", "bar", "baz"]
        );
    }

    #[test]
    fn strips_wrapping_punctuation_and_drops_empty_pieces() {
        assert_eq!(
            extract_suggestions(r#"did you mean ("task", 'user', , end)"#),
            vec!["task", "user", "end"]
        );
    }

    #[test]
    fn trigger_phrase_is_case_insensitive() {
        assert_eq!(extract_suggestions("Did You Mean: 'pool'"), vec!["pool"]);
    }

    #[test]
    fn works_without_the_colon() {
        assert_eq!(extract_suggestions("did you mean 'lane'"), vec!["lane"]);
    }

    #[test]
    fn no_hint_means_no_candidates() {
        assert!(extract_suggestions("no hint here").is_empty());
        assert!(extract_suggestions("").is_empty());
    }
}

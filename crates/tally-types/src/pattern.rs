use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::error::TypeError;

/// A compiled regular expression used to select variable keys.
///
/// Matching is a search: the pattern may match anywhere in the key unless it
/// is anchored explicitly with `^` / `$`.
#[derive(Clone)]
pub struct KeyPattern {
    source: String,
    regex: Regex,
}

impl KeyPattern {
    /// Compile `pattern`, optionally ignoring ASCII and Unicode case.
    pub fn compile(pattern: &str, case_insensitive: bool) -> Result<Self, TypeError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|e| TypeError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Returns `true` if the pattern matches anywhere in `text`.
    pub fn search(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The pattern text this matcher was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("KeyPattern").field(&self.source).finish()
    }
}

impl PartialEq for KeyPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_is_unanchored() {
        let p = KeyPattern::compile("id", false).unwrap();
        assert!(p.search("session_id"));
        assert!(p.search("idle"));
        assert!(!p.search("name"));
    }

    #[test]
    fn anchors_are_respected() {
        let p = KeyPattern::compile("^a:", false).unwrap();
        assert!(p.search("a:1"));
        assert!(!p.search("ba:1"));
    }

    #[test]
    fn case_insensitive_flag() {
        let ci = KeyPattern::compile("^score$", true).unwrap();
        assert!(ci.search("SCORE"));

        let cs = KeyPattern::compile("^score$", false).unwrap();
        assert!(!cs.search("SCORE"));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = KeyPattern::compile("(unclosed", true).unwrap_err();
        match err {
            TypeError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "(unclosed"),
        }
    }

    #[test]
    fn keeps_source_text() {
        let p = KeyPattern::compile("^tx_", true).unwrap();
        assert_eq!(p.as_str(), "^tx_");
        assert_eq!(format!("{p:?}"), "KeyPattern(\"^tx_\")");
    }
}

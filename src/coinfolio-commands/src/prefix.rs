//! Multi-word command addresses.

use std::fmt;

/// Ordered sequence of lowercase literal words addressing one command.
///
/// Prefixes compare word-exact: `status` is not a match for `statusbar`.
/// Nested addresses are built by composition:
///
/// ```rust,ignore
/// let get = Prefix::new("settings get");
/// let profile = get.join("reporting profile");
/// assert_eq!(profile.to_string(), "settings get reporting profile");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Prefix {
    words: Vec<String>,
}

impl Prefix {
    /// Build a prefix from whitespace-separated words, lowercasing each.
    pub fn new(words: &str) -> Self {
        Self {
            words: words.split_whitespace().map(str::to_lowercase).collect(),
        }
    }

    /// Append literal suffix word(s), returning the extended prefix.
    pub fn join(&self, suffix: &str) -> Self {
        let mut words = self.words.clone();
        words.extend(suffix.split_whitespace().map(str::to_lowercase));
        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of words in the prefix.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether this prefix leads `tokens` word-for-word, ignoring case.
    pub fn matches<S: AsRef<str>>(&self, tokens: &[S]) -> bool {
        self.words.len() <= tokens.len()
            && self
                .words
                .iter()
                .zip(tokens)
                .all(|(word, token)| word_eq(word, token.as_ref()))
    }

    /// Whether `other` is a leading subsequence of this prefix.
    pub fn starts_with(&self, other: &Prefix) -> bool {
        other.words.len() <= self.words.len()
            && self.words.iter().zip(&other.words).all(|(a, b)| a == b)
    }
}

/// Compare an already-lowercase word against a raw token.
fn word_eq(word: &str, token: &str) -> bool {
    token.chars().flat_map(char::to_lowercase).eq(word.chars())
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.words.join(" "))
    }
}

impl From<&str> for Prefix {
    fn from(words: &str) -> Self {
        Self::new(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_normalizes_case_and_spacing() {
        let prefix = Prefix::new("  Settings   GET ");
        assert_eq!(prefix.words(), &["settings".to_string(), "get".to_string()]);
        assert_eq!(prefix.to_string(), "settings get");
    }

    #[test]
    fn test_join_composes_nested_address() {
        let settings = Prefix::new("settings");
        let get = settings.join("get");
        let profile = get.join("Reporting Profile");

        assert_eq!(profile.to_string(), "settings get reporting profile");
        assert_eq!(profile.len(), 4);
        assert!(profile.starts_with(&get));
        assert!(!get.starts_with(&profile));
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let prefix = Prefix::new("status connection");
        assert!(prefix.matches(&["STATUS", "Connection"]));
        assert!(prefix.matches(&["status", "connection", "extra"]));
    }

    #[test]
    fn test_matches_is_word_exact() {
        let prefix = Prefix::new("status");
        assert!(!prefix.matches(&["statusbar"]));
        assert!(!prefix.matches(&["stat"]));
    }

    #[test]
    fn test_matches_requires_enough_tokens() {
        let prefix = Prefix::new("status connection");
        assert!(!prefix.matches(&["status"]));
        assert!(!prefix.matches::<&str>(&[]));
    }

    #[test]
    fn test_empty_prefix() {
        let prefix = Prefix::new("   ");
        assert!(prefix.is_empty());
        assert_eq!(prefix, Prefix::default());
    }
}

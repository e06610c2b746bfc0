use std::collections::BTreeSet;

/// The set of characters practice text may contain. Space is always allowed.
pub struct CharFilter {
    pub allowed: BTreeSet<char>,
}

impl CharFilter {
    pub fn new(allowed: impl IntoIterator<Item = char>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    pub fn is_allowed(&self, ch: char) -> bool {
        ch == ' ' || self.allowed.contains(&ch)
    }

    pub fn allows_word(&self, word: &str) -> bool {
        word.chars().all(|ch| self.is_allowed(ch))
    }

    /// Allowed characters that can appear inside a word.
    pub fn letters(&self) -> Vec<char> {
        self.allowed.iter().copied().filter(|&ch| ch != ' ').collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_always_allowed() {
        let filter = CharFilter::new(['a', 's']);
        assert!(filter.is_allowed(' '));
        assert!(filter.allows_word("as"));
        assert!(!filter.allows_word("ask"));
        assert_eq!(filter.letters(), vec!['a', 's']);
    }
}

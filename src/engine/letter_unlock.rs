use std::collections::BTreeSet;

/// Home row and space first, then the inner keys, then the remaining
/// letters by approximate English frequency.
pub const UNLOCK_ORDER: &[char] = &[
    'a', 's', 'd', 'f', 'j', 'k', 'l', ' ', // home row + space
    'g', 'h', // inner keys
    'e', 'i', 'r', 't', 'n', 'o', // most common
    'u', 'w', 'y', 'p', 'c', 'm', // common
    'b', 'v', 'q', 'x', 'z', // less common
];

/// Keys available before any practice.
pub const STARTER_KEY_COUNT: usize = 8;

pub fn starter_keys() -> BTreeSet<char> {
    UNLOCK_ORDER[..STARTER_KEY_COUNT].iter().copied().collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnlockOrder {
    keys: Vec<char>,
}

impl UnlockOrder {
    pub fn new() -> Self {
        Self {
            keys: UNLOCK_ORDER.to_vec(),
        }
    }

    /// Default order followed by `extra` keys, skipping duplicates.
    pub fn with_extra(extra: &[char]) -> Self {
        let mut order = Self::new();
        for &ch in extra {
            if !order.keys.contains(&ch) {
                order.keys.push(ch);
            }
        }
        order
    }

    pub fn next_locked(&self, unlocked: &BTreeSet<char>) -> Option<char> {
        self.keys.iter().copied().find(|ch| !unlocked.contains(ch))
    }

    pub fn keys(&self) -> &[char] {
        &self.keys
    }

    pub fn total_keys(&self) -> usize {
        self.keys.len()
    }

    pub fn progress(&self, unlocked: &BTreeSet<char>) -> f64 {
        let done = self.keys.iter().filter(|ch| unlocked.contains(ch)).count();
        done as f64 / self.total_keys() as f64
    }
}

impl Default for UnlockOrder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_keys_are_home_row_and_space() {
        let keys = starter_keys();
        assert_eq!(keys.len(), 8);
        assert!(keys.contains(&' '));
        assert!("asdfjkl".chars().all(|c| keys.contains(&c)));
    }

    #[test]
    fn test_order_covers_alphabet_once() {
        let letters: BTreeSet<char> = UNLOCK_ORDER.iter().copied().filter(|c| *c != ' ').collect();
        assert_eq!(letters.len(), 26);
        assert_eq!(UNLOCK_ORDER.len(), 27);
    }

    #[test]
    fn test_next_locked_follows_order() {
        let order = UnlockOrder::new();
        let mut unlocked = starter_keys();
        assert_eq!(order.next_locked(&unlocked), Some('g'));
        unlocked.insert('g');
        assert_eq!(order.next_locked(&unlocked), Some('h'));
    }

    #[test]
    fn test_extra_keys_appended_after_letters() {
        let order = UnlockOrder::with_extra(&[';', 'a', ',']);
        assert_eq!(order.total_keys(), 29);
        let all_letters: BTreeSet<char> = UNLOCK_ORDER.iter().copied().collect();
        assert_eq!(order.next_locked(&all_letters), Some(';'));
    }

    #[test]
    fn test_progress_ratio() {
        let order = UnlockOrder::new();
        let expected = 8.0 / 27.0;
        assert!((order.progress(&starter_keys()) - expected).abs() < 0.001);
    }
}

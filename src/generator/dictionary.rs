use rust_embed::Embed;
use tracing::warn;

use crate::engine::filter::CharFilter;

#[derive(Embed)]
#[folder = "assets/"]
struct WordAssets;

const WORDS_EN: &str = "words-en.json";

/// Single letters are too short to practise anything.
pub const MIN_WORD_LEN: usize = 2;

/// Openers used to make advanced-stage text read like a sentence.
pub const SENTENCE_STARTERS: &[&str] = &[
    "the", "a", "this", "that", "these", "those", "my", "your", "our", "some", "many",
];

pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    pub fn load() -> Self {
        let words: Vec<String> = WordAssets::get(WORDS_EN)
            .and_then(|file| serde_json::from_slice(file.data.as_ref()).ok())
            .unwrap_or_else(|| {
                warn!("bundled word list unavailable, generating synthetic text only");
                Vec::new()
            });
        Self::from_words(words)
    }

    pub fn from_words<S: Into<String>>(words: impl IntoIterator<Item = S>) -> Self {
        let mut words: Vec<String> = words
            .into_iter()
            .map(Into::into)
            .filter(|w| w.len() >= MIN_WORD_LEN && w.chars().all(|c| c.is_ascii_lowercase()))
            .collect();
        words.sort();
        words.dedup();
        Self { words }
    }

    pub fn words_list(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn find_matching(&self, filter: &CharFilter) -> Vec<&str> {
        self.words
            .iter()
            .filter(|w| filter.allows_word(w))
            .map(|s| s.as_str())
            .collect()
    }
}

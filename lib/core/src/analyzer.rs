// Text analysis shared by every vector space: tokenization and stop words
use serde::{Deserialize, Serialize};

/// Common English function words dropped when stop-word removal is enabled.
///
/// Sorted so membership can be checked with a binary search.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "cannot", "could", "did", "do", "does",
    "doing", "down", "during", "each", "either", "else", "ever", "every", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "however", "if", "in", "into", "is",
    "it", "its", "itself", "just", "least", "less", "may", "me", "might", "more",
    "most", "much", "must", "my", "myself", "neither", "no", "nor", "not", "of",
    "off", "often", "on", "once", "only", "or", "other", "otherwise", "ought", "our",
    "ours", "ourselves", "out", "over", "own", "per", "rather", "same", "she", "should",
    "since", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "though", "through", "thus",
    "to", "too", "under", "until", "up", "upon", "us", "very", "was", "we",
    "were", "what", "whatever", "when", "where", "whether", "which", "while", "who", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your",
    "yours", "yourself", "yourselves",
];

/// Stop-word policy applied before terms enter a vocabulary
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StopWords {
    /// Keep every term
    #[default]
    None,
    /// Drop common English function words
    English,
}

impl StopWords {
    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        match self {
            StopWords::None => false,
            StopWords::English => ENGLISH_STOP_WORDS.binary_search(&term).is_ok(),
        }
    }
}

/// Splits text into lower-cased terms.
///
/// A term is a run of alphanumeric characters or underscores at least two
/// characters long; everything else is a separator.
#[inline]
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|s| s.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

/// Tokenizer bound to a stop-word policy
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Analyzer {
    stop_words: StopWords,
}

impl Analyzer {
    #[inline]
    #[must_use]
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words }
    }

    pub fn analyze(&self, text: &str) -> Vec<String> {
        tokenize(text)
            .into_iter()
            .filter(|t| !self.stop_words.contains(t))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_word_list_is_sorted() {
        let mut sorted = ENGLISH_STOP_WORDS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted, ENGLISH_STOP_WORDS);
    }

    #[test]
    fn test_tokenize_lowercases_and_splits_punctuation() {
        assert_eq!(
            tokenize("Win a FREE prize-now!!!"),
            vec!["win", "free", "prize", "now"]
        );
    }

    #[test]
    fn test_tokenize_drops_single_characters() {
        assert_eq!(tokenize("a b cd 4 42"), vec!["cd", "42"]);
    }

    #[test]
    fn test_tokenize_keeps_underscores_and_unicode() {
        assert_eq!(tokenize("wi_fi Café"), vec!["wi_fi", "café"]);
    }

    #[test]
    fn test_english_stop_words_removed() {
        let analyzer = Analyzer::new(StopWords::English);
        assert_eq!(analyzer.analyze("The house with an ocean view"), vec!["house", "ocean", "view"]);

        let keep_all = Analyzer::default();
        assert_eq!(keep_all.analyze("the house").len(), 2);
    }
}

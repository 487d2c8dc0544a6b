//! Labeled message datasets
//!
//! The reference dataset is a tab-separated file with one `label<TAB>message`
//! pair per line and no header. Labels are `ham` or `spam`.

use crate::error::{ClassifierError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// Public SMS spam collection used when no other source is configured
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/justmarkham/pycon-2016-tutorial/master/data/sms.tsv";

/// Message class; the discriminant is the classifier's class index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Ham = 0,
    Spam = 1,
}

impl Label {
    pub const ALL: [Label; 2] = [Label::Ham, Label::Spam];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Ham => "ham",
            Label::Spam => "spam",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ham" => Some(Label::Ham),
            "spam" => Some(Label::Spam),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the training dataset comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Url(String),
    File(PathBuf),
}

impl DatasetSource {
    /// `http://` and `https://` locations are URLs; anything else is a path
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            DatasetSource::Url(location.to_string())
        } else {
            DatasetSource::File(PathBuf::from(location))
        }
    }

    /// Read the raw dataset text
    pub fn fetch(&self) -> Result<String> {
        match self {
            DatasetSource::Url(url) => {
                info!(%url, "downloading training dataset");
                let fetch_err = |e: reqwest::Error| ClassifierError::Fetch {
                    url: url.clone(),
                    message: e.to_string(),
                };
                reqwest::blocking::get(url)
                    .and_then(|r| r.error_for_status())
                    .and_then(|r| r.text())
                    .map_err(fetch_err)
            }
            DatasetSource::File(path) => {
                info!(path = %path.display(), "reading training dataset");
                std::fs::read_to_string(path).map_err(|e| {
                    ClassifierError::Dataset(format!("cannot read {}: {}", path.display(), e))
                })
            }
        }
    }
}

impl Default for DatasetSource {
    fn default() -> Self {
        DatasetSource::Url(DEFAULT_DATASET_URL.to_string())
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Url(url) => f.write_str(url),
            DatasetSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A message with its label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledMessage {
    pub label: Label,
    pub text: String,
}

/// An ordered collection of labeled messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabeledDataset {
    messages: Vec<LabeledMessage>,
}

impl LabeledDataset {
    pub fn new(messages: Vec<LabeledMessage>) -> Self {
        Self { messages }
    }

    /// Parse tab-separated `label<TAB>message` lines; blank lines are skipped
    pub fn parse_tsv(text: &str) -> Result<Self> {
        let mut messages = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let (label, message) = line.split_once('\t').ok_or_else(|| {
                ClassifierError::Dataset(format!("line {}: expected label<TAB>message", line_no + 1))
            })?;
            let label = Label::parse(label).ok_or_else(|| {
                ClassifierError::Dataset(format!("line {}: unknown label '{}'", line_no + 1, label))
            })?;

            messages.push(LabeledMessage {
                label,
                text: message.to_string(),
            });
        }

        if messages.is_empty() {
            return Err(ClassifierError::Dataset("dataset contains no messages".to_string()));
        }

        Ok(Self { messages })
    }

    /// Fetch and parse a dataset
    pub fn load(source: &DatasetSource) -> Result<Self> {
        let dataset = Self::parse_tsv(&source.fetch()?)?;
        info!(
            messages = dataset.len(),
            spam = dataset.count(Label::Spam),
            "loaded training dataset"
        );
        Ok(dataset)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[LabeledMessage] {
        &self.messages
    }

    pub fn texts(&self) -> Vec<&str> {
        self.messages.iter().map(|m| m.text.as_str()).collect()
    }

    pub fn labels(&self) -> Vec<Label> {
        self.messages.iter().map(|m| m.label).collect()
    }

    /// Number of messages with `label`
    pub fn count(&self, label: Label) -> usize {
        self.messages.iter().filter(|m| m.label == label).count()
    }

    /// Shuffle with a fixed seed and split into `(train, test)`.
    ///
    /// The test set holds `ceil(test_fraction * len)` messages, capped so the
    /// training set is never empty.
    pub fn split(&self, test_fraction: f64, seed: u64) -> Result<(Self, Self)> {
        if !(0.0..1.0).contains(&test_fraction) {
            return Err(ClassifierError::Dataset(format!(
                "test fraction must be within [0, 1), got {}",
                test_fraction
            )));
        }

        let n = self.messages.len();
        let n_test = ((test_fraction * n as f64).ceil() as usize).min(n.saturating_sub(1));

        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let pick = |idx: &[usize]| Self {
            messages: idx.iter().map(|&i| self.messages[i].clone()).collect(),
        };
        let (test_idx, train_idx) = indices.split_at(n_test);
        Ok((pick(train_idx), pick(test_idx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "ham\tGo until jurong point\nspam\tFree entry in 2 a wkly comp\r\n\nham\tOk lar... Joking wif u oni\n";

    #[test]
    fn test_parse_tsv() {
        let dataset = LabeledDataset::parse_tsv(SAMPLE).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.labels(), vec![Label::Ham, Label::Spam, Label::Ham]);
        assert_eq!(dataset.texts()[1], "Free entry in 2 a wkly comp");
        assert_eq!(dataset.count(Label::Spam), 1);
    }

    #[test]
    fn test_message_keeps_embedded_tabs() {
        let dataset = LabeledDataset::parse_tsv("spam\tcall\tnow").unwrap();
        assert_eq!(dataset.texts()[0], "call\tnow");
    }

    #[test]
    fn test_unknown_label_rejected() {
        let err = LabeledDataset::parse_tsv("eggs\thello").unwrap_err();
        assert!(matches!(err, ClassifierError::Dataset(msg) if msg.contains("line 1")));
    }

    #[test]
    fn test_missing_tab_rejected() {
        assert!(LabeledDataset::parse_tsv("ham hello").is_err());
        assert!(LabeledDataset::parse_tsv("\n\n").is_err());
    }

    #[test]
    fn test_split_is_deterministic_and_sized() {
        let lines: Vec<String> = (0..10).map(|i| format!("ham\tmessage {}", i)).collect();
        let dataset = LabeledDataset::parse_tsv(&lines.join("\n")).unwrap();

        let (train, test) = dataset.split(0.2, 42).unwrap();
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);

        let (train_again, test_again) = dataset.split(0.2, 42).unwrap();
        assert_eq!(train, train_again);
        assert_eq!(test, test_again);
    }

    #[test]
    fn test_split_rounds_test_size_up() {
        let lines: Vec<String> = (0..11).map(|i| format!("spam\tmessage {}", i)).collect();
        let dataset = LabeledDataset::parse_tsv(&lines.join("\n")).unwrap();
        let (train, test) = dataset.split(0.2, 42).unwrap();
        assert_eq!(test.len(), 3);
        assert_eq!(train.len(), 8);
    }

    #[test]
    fn test_split_keeps_training_data() {
        let dataset = LabeledDataset::parse_tsv("ham\tonly one").unwrap();
        let (train, test) = dataset.split(0.5, 42).unwrap();
        assert_eq!(train.len(), 1);
        assert!(test.is_empty());
        assert!(dataset.split(1.0, 42).is_err());
    }

    #[test]
    fn test_source_parse() {
        assert_eq!(
            DatasetSource::parse("https://example.com/sms.tsv"),
            DatasetSource::Url("https://example.com/sms.tsv".to_string())
        );
        assert_eq!(
            DatasetSource::parse("data/sms.tsv"),
            DatasetSource::File(PathBuf::from("data/sms.tsv"))
        );
    }

    #[test]
    fn test_missing_file_is_dataset_error() {
        let source = DatasetSource::File(PathBuf::from("/nonexistent/sms.tsv"));
        assert!(matches!(LabeledDataset::load(&source), Err(ClassifierError::Dataset(_))));
    }
}

//! Spam pipeline: TF-IDF features fed to multinomial naive Bayes

use crate::dataset::{Label, LabeledDataset};
use crate::error::{ClassifierError, Result};
use crate::naive_bayes::{MultinomialNb, DEFAULT_ALPHA};
use serde::{Deserialize, Serialize};
use sift_core::{TfidfOptions, TfidfVectorizer};
use tracing::debug;

/// Outcome of classifying one message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SpamPrediction {
    pub label: Label,
    /// Always `label == Label::Spam`
    pub is_spam: bool,
    /// Estimated probability of spam, rounded to two decimals
    pub confidence: f64,
}

/// A trained vectorizer + classifier pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpamPipeline {
    vectorizer: TfidfVectorizer,
    classifier: MultinomialNb,
}

impl SpamPipeline {
    /// Fit the vectorizer and classifier on every message in `dataset`
    pub fn train(dataset: &LabeledDataset) -> Result<Self> {
        let texts = dataset.texts();
        let labels: Vec<usize> = dataset.labels().into_iter().map(Label::index).collect();

        let mut vectorizer = TfidfVectorizer::new(TfidfOptions::default());
        let features = vectorizer.fit_transform(&texts)?;

        let classifier = MultinomialNb::fit(
            &features,
            &labels,
            Label::ALL.len(),
            vectorizer.vocabulary_len(),
            DEFAULT_ALPHA,
        )?;

        debug!(
            messages = texts.len(),
            vocabulary = vectorizer.vocabulary_len(),
            "trained spam pipeline"
        );

        Ok(Self { vectorizer, classifier })
    }

    /// Classify a message
    pub fn predict(&self, text: &str) -> Result<SpamPrediction> {
        let features = self.vectorizer.transform(text)?;

        let label = match self.classifier.predict(&features) {
            0 => Label::Ham,
            1 => Label::Spam,
            other => {
                return Err(ClassifierError::Training(format!("unexpected class index {}", other)));
            }
        };
        let spam_probability = self
            .classifier
            .predict_proba(&features)
            .get(Label::Spam.index())
            .copied()
            .unwrap_or(0.0);

        Ok(SpamPrediction {
            label,
            is_spam: label == Label::Spam,
            confidence: round2(spam_probability),
        })
    }

    /// Share of `dataset` classified correctly; `None` for an empty dataset
    pub fn accuracy(&self, dataset: &LabeledDataset) -> Result<Option<f64>> {
        if dataset.is_empty() {
            return Ok(None);
        }

        let mut correct = 0usize;
        for message in dataset.messages() {
            if self.predict(&message.text)?.label == message.label {
                correct += 1;
            }
        }
        Ok(Some(correct as f64 / dataset.len() as f64))
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vectorizer.vocabulary_len()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRAINING_TSV: &str = "\
spam\tWin a free prize now, claim your cash reward
spam\tFree entry to win a prize draw, text WIN now
spam\tURGENT you have won a free holiday, call now to claim
spam\tCongratulations you won cash, claim your free prize now
spam\tWin free tickets now, reply WIN to claim
ham\tAre we still meeting for lunch tomorrow
ham\tI will be home late tonight, save me some dinner
ham\tCan you pick up milk on the way back
ham\tThanks for the notes from class today
ham\tSee you at the game on Saturday
ham\tMy meeting ran late, sorry about that
ham\tDid you finish the report for work";

    fn trained() -> SpamPipeline {
        SpamPipeline::train(&LabeledDataset::parse_tsv(TRAINING_TSV).unwrap()).unwrap()
    }

    #[test]
    fn test_obvious_spam() {
        let prediction = trained().predict("Win a free prize now!!!").unwrap();
        assert_eq!(prediction.label, Label::Spam);
        assert!(prediction.is_spam);
        assert!(prediction.confidence > 0.5);
    }

    #[test]
    fn test_obvious_ham() {
        let prediction = trained().predict("see you at lunch tomorrow").unwrap();
        assert_eq!(prediction.label, Label::Ham);
        assert!(!prediction.is_spam);
        assert!(prediction.confidence < 0.5);
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let pipeline = trained();
        let first = pipeline.predict("claim your reward").unwrap();
        for _ in 0..5 {
            assert_eq!(pipeline.predict("claim your reward").unwrap(), first);
        }
    }

    #[test]
    fn test_confidence_is_rounded() {
        let prediction = trained().predict("free lunch tomorrow").unwrap();
        let scaled = prediction.confidence * 100.0;
        assert!((scaled - scaled.round()).abs() < 1e-9);
        assert!((0.0..=1.0).contains(&prediction.confidence));
        assert_eq!(prediction.is_spam, prediction.label == Label::Spam);
    }

    #[test]
    fn test_unknown_words_fall_back_to_prior() {
        // ham is the majority class
        let prediction = trained().predict("zzz qqq").unwrap();
        assert_eq!(prediction.label, Label::Ham);
    }

    #[test]
    fn test_training_accuracy() {
        let dataset = LabeledDataset::parse_tsv(TRAINING_TSV).unwrap();
        let pipeline = SpamPipeline::train(&dataset).unwrap();
        assert_eq!(pipeline.accuracy(&dataset).unwrap(), Some(1.0));
        assert_eq!(pipeline.accuracy(&LabeledDataset::default()).unwrap(), None);
    }

    #[test]
    fn test_single_class_dataset_fails() {
        let dataset = LabeledDataset::parse_tsv("ham\thello there\nham\tgood morning").unwrap();
        assert!(matches!(SpamPipeline::train(&dataset), Err(ClassifierError::Training(_))));
    }

    #[test]
    fn test_prediction_serialization() {
        let prediction = trained().predict("Win a free prize now!!!").unwrap();
        let json = serde_json::to_value(prediction).unwrap();
        assert_eq!(json["label"], serde_json::json!("spam"));
        assert_eq!(json["is_spam"], serde_json::json!(true));
        assert!(json["confidence"].as_f64().unwrap() > 0.5);
    }
}

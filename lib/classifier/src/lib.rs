//! # sift-classifier
//!
//! Spam detection for short messages: a TF-IDF vectorizer feeding a
//! multinomial naive Bayes classifier, trained once from a labeled SMS
//! dataset and persisted as a compressed, checksummed artifact.
//!
//! ```no_run
//! use sift_classifier::{ClassifierConfig, SpamClassifier};
//!
//! let classifier = SpamClassifier::install(ClassifierConfig::default());
//! let prediction = classifier.predict("Win a free prize now!!!").unwrap();
//! println!("{} ({})", prediction.label, prediction.confidence);
//! ```

pub mod artifact;
pub mod dataset;
pub mod error;
pub mod naive_bayes;
pub mod pipeline;
pub mod service;

pub use artifact::{ArtifactDescription, ModelArtifact, ARTIFACT_FORMAT_VERSION, DEFAULT_MODEL_PATH};
pub use dataset::{DatasetSource, Label, LabeledDataset, LabeledMessage, DEFAULT_DATASET_URL};
pub use error::{ClassifierError, Result};
pub use naive_bayes::MultinomialNb;
pub use pipeline::{SpamPipeline, SpamPrediction};
pub use service::{predict_spam, ClassifierConfig, Lifecycle, ModelOrigin, SpamClassifier};

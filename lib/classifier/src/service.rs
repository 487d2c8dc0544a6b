//! Spam classifier service with a lazy train-or-load lifecycle
//!
//! The first caller that needs the model either loads the persisted artifact
//! or trains a new pipeline from the labeled dataset and persists it. Other
//! callers block on the same barrier and then share the read-only model.
//! A failed initialization is remembered and never retried.

use crate::artifact::{ModelArtifact, DEFAULT_MODEL_PATH};
use crate::dataset::{DatasetSource, LabeledDataset};
use crate::error::{ClassifierError, Result};
use crate::pipeline::{SpamPipeline, SpamPrediction};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{error, info, warn};

/// Share of the dataset held out for accuracy evaluation
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Seed for the holdout shuffle
pub const DEFAULT_SPLIT_SEED: u64 = 42;

/// Where the service keeps its artifact and how it trains when there is none
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    pub model_path: PathBuf,
    pub dataset: DatasetSource,
    pub test_fraction: f64,
    pub seed: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            dataset: DatasetSource::default(),
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: DEFAULT_SPLIT_SEED,
        }
    }
}

impl ClassifierConfig {
    pub fn with_model_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.model_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_dataset(mut self, dataset: DatasetSource) -> Self {
        self.dataset = dataset;
        self
    }
}

/// Initialization state of a classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "lowercase")]
pub enum Lifecycle {
    Uninitialized,
    Loading,
    Training,
    Ready,
    Failed(String),
}

impl Lifecycle {
    pub fn is_ready(&self) -> bool {
        matches!(self, Lifecycle::Ready)
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifecycle::Uninitialized => f.write_str("uninitialized"),
            Lifecycle::Loading => f.write_str("loading"),
            Lifecycle::Training => f.write_str("training"),
            Lifecycle::Ready => f.write_str("ready"),
            Lifecycle::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// How the ready model was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelOrigin {
    Loaded,
    Trained,
}

struct ReadyModel {
    pipeline: Arc<SpamPipeline>,
    origin: ModelOrigin,
}

pub struct SpamClassifier {
    config: ClassifierConfig,
    // held for the whole load-or-train step
    init: Mutex<()>,
    state: RwLock<Lifecycle>,
    model: OnceLock<ReadyModel>,
}

static GLOBAL: OnceLock<SpamClassifier> = OnceLock::new();

impl SpamClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            init: Mutex::new(()),
            state: RwLock::new(Lifecycle::Uninitialized),
            model: OnceLock::new(),
        }
    }

    /// Install the process-wide classifier.
    ///
    /// The first installation wins; later calls return the existing instance.
    pub fn install(config: ClassifierConfig) -> &'static SpamClassifier {
        let mut installed = false;
        let classifier = GLOBAL.get_or_init(|| {
            installed = true;
            SpamClassifier::new(config.clone())
        });
        if !installed && classifier.config != config {
            warn!("spam classifier already installed, ignoring new configuration");
        }
        classifier
    }

    /// The process-wide classifier, installed with defaults if needed
    pub fn global() -> &'static SpamClassifier {
        GLOBAL.get_or_init(|| SpamClassifier::new(ClassifierConfig::default()))
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn state(&self) -> Lifecycle {
        self.state.read().clone()
    }

    /// `None` until the model is ready
    pub fn origin(&self) -> Option<ModelOrigin> {
        self.model.get().map(|m| m.origin)
    }

    /// Load or train the model if that has not happened yet
    pub fn ensure_ready(&self) -> Result<Arc<SpamPipeline>> {
        if let Some(model) = self.model.get() {
            return Ok(Arc::clone(&model.pipeline));
        }

        let _guard = self.init.lock();

        // another caller may have finished while we waited
        if let Some(model) = self.model.get() {
            return Ok(Arc::clone(&model.pipeline));
        }
        if let Lifecycle::Failed(reason) = &*self.state.read() {
            return Err(ClassifierError::Unavailable(reason.clone()));
        }

        match self.load_or_train() {
            Ok((pipeline, origin)) => {
                let pipeline = Arc::new(pipeline);
                let _ = self.model.set(ReadyModel {
                    pipeline: Arc::clone(&pipeline),
                    origin,
                });
                self.set_state(Lifecycle::Ready);
                Ok(pipeline)
            }
            Err(e) => {
                error!(error = %e, "spam classifier initialization failed");
                self.set_state(Lifecycle::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Classify `text`, initializing the model on first use
    pub fn predict(&self, text: &str) -> Result<SpamPrediction> {
        self.ensure_ready()?.predict(text)
    }

    fn load_or_train(&self) -> Result<(SpamPipeline, ModelOrigin)> {
        let artifact = ModelArtifact::new(&self.config.model_path);

        if artifact.exists() {
            self.set_state(Lifecycle::Loading);
            let (pipeline, description) = artifact.load()?;
            info!(
                path = %description.path.display(),
                holdout_accuracy = ?description.holdout_accuracy,
                vocabulary = pipeline.vocabulary_len(),
                "spam classifier loaded"
            );
            return Ok((pipeline, ModelOrigin::Loaded));
        }

        self.set_state(Lifecycle::Training);
        info!(dataset = %self.config.dataset, "no model artifact found, training spam classifier");

        let dataset = LabeledDataset::load(&self.config.dataset)?;
        let (train, test) = dataset.split(self.config.test_fraction, self.config.seed)?;
        let pipeline = SpamPipeline::train(&train)?;

        let accuracy = pipeline.accuracy(&test)?;
        match accuracy {
            Some(accuracy) => info!(
                accuracy,
                train = train.len(),
                test = test.len(),
                "spam classifier holdout accuracy"
            ),
            None => warn!("holdout set is empty, accuracy not evaluated"),
        }

        artifact.save(&pipeline, accuracy)?;
        Ok((pipeline, ModelOrigin::Trained))
    }

    fn set_state(&self, state: Lifecycle) {
        info!(%state, "spam classifier state");
        *self.state.write() = state;
    }
}

impl fmt::Debug for SpamClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpamClassifier")
            .field("config", &self.config)
            .field("state", &self.state())
            .finish()
    }
}

/// Classify `text` with the process-wide classifier
pub fn predict_spam(text: &str) -> Result<SpamPrediction> {
    SpamClassifier::global().predict(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Label;
    use std::fs;
    use std::thread;
    use tempfile::TempDir;

    const DATASET: &str = "\
spam\tWin a free prize now, claim your cash reward
spam\tFree entry to win a prize draw, text WIN now
spam\tURGENT you have won a free holiday, call now to claim
spam\tCongratulations you won cash, claim your free prize now
spam\tWin free tickets now, reply WIN to claim
spam\tFree prize waiting, call now to win
ham\tAre we still meeting for lunch tomorrow
ham\tI will be home late tonight, save me some dinner
ham\tCan you pick up milk on the way back
ham\tThanks for the notes from class today
ham\tSee you at the game on Saturday
ham\tMy meeting ran late, sorry about that
ham\tDid you finish the report for work
ham\tLet me know when you get home";

    fn setup() -> (TempDir, ClassifierConfig) {
        let dir = TempDir::new().unwrap();
        let dataset_path = dir.path().join("sms.tsv");
        fs::write(&dataset_path, DATASET).unwrap();
        let config = ClassifierConfig::default()
            .with_model_path(dir.path().join("models").join("spam_model.bin"))
            .with_dataset(DatasetSource::File(dataset_path));
        (dir, config)
    }

    #[test]
    fn test_trains_persists_then_loads() {
        let (_dir, config) = setup();

        let first = SpamClassifier::new(config.clone());
        assert_eq!(first.state(), Lifecycle::Uninitialized);
        assert_eq!(first.origin(), None);

        let prediction = first.predict("Win a free prize now!!!").unwrap();
        assert_eq!(first.state(), Lifecycle::Ready);
        assert_eq!(first.origin(), Some(ModelOrigin::Trained));
        assert!(config.model_path.is_file());

        // the dataset is no longer needed once the artifact exists
        fs::remove_file(match &config.dataset {
            DatasetSource::File(path) => path,
            DatasetSource::Url(_) => unreachable!(),
        })
        .unwrap();

        let second = SpamClassifier::new(config);
        assert_eq!(second.predict("Win a free prize now!!!").unwrap(), prediction);
        assert_eq!(second.origin(), Some(ModelOrigin::Loaded));
        assert!(second.state().is_ready());
    }

    #[test]
    fn test_predicts_spam_and_ham() {
        let (_dir, config) = setup();
        let classifier = SpamClassifier::new(config);

        let spam = classifier.predict("Win a free prize now!!!").unwrap();
        assert_eq!(spam.label, Label::Spam);
        assert!(spam.is_spam);
        assert!(spam.confidence > 0.5);

        let ham = classifier.predict("are we meeting for lunch tomorrow").unwrap();
        assert_eq!(ham.label, Label::Ham);
        assert!(!ham.is_spam);
    }

    #[test]
    fn test_failure_is_not_retried() {
        let dir = TempDir::new().unwrap();
        let dataset_path = dir.path().join("missing.tsv");
        let config = ClassifierConfig::default()
            .with_model_path(dir.path().join("spam_model.bin"))
            .with_dataset(DatasetSource::File(dataset_path.clone()));
        let classifier = SpamClassifier::new(config);

        assert!(matches!(classifier.ensure_ready(), Err(ClassifierError::Dataset(_))));
        assert!(matches!(classifier.state(), Lifecycle::Failed(_)));

        // a dataset showing up later does not revive the classifier
        fs::write(&dataset_path, DATASET).unwrap();
        assert!(matches!(classifier.predict("hello"), Err(ClassifierError::Unavailable(_))));
        assert!(!dir.path().join("spam_model.bin").exists());
    }

    #[test]
    fn test_corrupt_artifact_fails() {
        let (_dir, config) = setup();
        fs::create_dir_all(config.model_path.parent().unwrap()).unwrap();
        fs::write(&config.model_path, b"garbage").unwrap();

        let classifier = SpamClassifier::new(config);
        assert!(classifier.ensure_ready().is_err());
        assert!(matches!(classifier.state(), Lifecycle::Failed(_)));
    }

    #[test]
    fn test_concurrent_callers_share_one_model() {
        let (_dir, config) = setup();
        let classifier = Arc::new(SpamClassifier::new(config));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let classifier = Arc::clone(&classifier);
                thread::spawn(move || classifier.ensure_ready().unwrap())
            })
            .collect();
        let models: Vec<Arc<SpamPipeline>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        for model in &models[1..] {
            assert!(Arc::ptr_eq(&models[0], model));
        }
        assert_eq!(classifier.origin(), Some(ModelOrigin::Trained));
    }

    #[test]
    fn test_lifecycle_serialization() {
        assert_eq!(
            serde_json::to_value(Lifecycle::Ready).unwrap(),
            serde_json::json!({"state": "ready"})
        );
        assert_eq!(
            serde_json::to_value(Lifecycle::Failed("boom".into())).unwrap(),
            serde_json::json!({"state": "failed", "reason": "boom"})
        );
    }
}

// Persistence for the trained spam pipeline
use crate::error::{ClassifierError, Result};
use crate::pipeline::SpamPipeline;
use atomicwrites::{AtomicFile, OverwriteBehavior};
use chrono::Utc;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Default artifact location, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "models/spam_model.bin";

/// Bumped whenever the envelope or pipeline layout changes
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// On-disk envelope; the whole envelope is gzip-compressed bincode
#[derive(Debug, Serialize, Deserialize)]
struct ArtifactEnvelope {
    format_version: u32,
    created_at: String,
    holdout_accuracy: Option<f64>,
    /// Hex SHA-256 of `pipeline`
    checksum: String,
    /// bincode-encoded `SpamPipeline`
    pipeline: Vec<u8>,
}

/// Metadata describing a stored artifact
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtifactDescription {
    pub path: PathBuf,
    pub size: u64,
    pub created_at: String,
    pub checksum: String,
    pub holdout_accuracy: Option<f64>,
}

/// Reads and writes the spam pipeline artifact at a fixed path
#[derive(Debug, Clone)]
pub struct ModelArtifact {
    path: PathBuf,
}

impl ModelArtifact {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Atomically write `pipeline`, replacing any previous artifact
    pub fn save(&self, pipeline: &SpamPipeline, holdout_accuracy: Option<f64>) -> Result<ArtifactDescription> {
        let pipeline_bytes = bincode::serialize(pipeline)?;
        let checksum = format!("{:x}", Sha256::digest(&pipeline_bytes));

        let envelope = ArtifactEnvelope {
            format_version: ARTIFACT_FORMAT_VERSION,
            created_at: Utc::now().to_rfc3339(),
            holdout_accuracy,
            checksum,
            pipeline: pipeline_bytes,
        };

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&bincode::serialize(&envelope)?)?;
        let data = encoder.finish()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        AtomicFile::new(&self.path, OverwriteBehavior::AllowOverwrite)
            .write(|f| f.write_all(&data))
            .map_err(|e| ClassifierError::Artifact(format!("cannot write {}: {}", self.path.display(), e)))?;

        info!(path = %self.path.display(), bytes = data.len(), "saved spam model artifact");

        Ok(ArtifactDescription {
            path: self.path.clone(),
            size: data.len() as u64,
            created_at: envelope.created_at,
            checksum: envelope.checksum,
            holdout_accuracy,
        })
    }

    /// Read and verify the artifact
    pub fn load(&self) -> Result<(SpamPipeline, ArtifactDescription)> {
        let file = fs::File::open(&self.path)?;
        let size = file.metadata()?.len();

        let mut raw = Vec::new();
        GzDecoder::new(file)
            .read_to_end(&mut raw)
            .map_err(|e| ClassifierError::Artifact(format!("corrupt artifact {}: {}", self.path.display(), e)))?;

        let envelope: ArtifactEnvelope = bincode::deserialize(&raw)?;

        if envelope.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ClassifierError::Artifact(format!(
                "unsupported artifact version {} (expected {})",
                envelope.format_version, ARTIFACT_FORMAT_VERSION
            )));
        }

        let checksum = format!("{:x}", Sha256::digest(&envelope.pipeline));
        if checksum != envelope.checksum {
            return Err(ClassifierError::Artifact(format!(
                "checksum mismatch for {}",
                self.path.display()
            )));
        }

        let pipeline: SpamPipeline = bincode::deserialize(&envelope.pipeline)?;

        info!(path = %self.path.display(), created_at = %envelope.created_at, "loaded spam model artifact");

        Ok((
            pipeline,
            ArtifactDescription {
                path: self.path.clone(),
                size,
                created_at: envelope.created_at,
                checksum,
                holdout_accuracy: envelope.holdout_accuracy,
            },
        ))
    }
}

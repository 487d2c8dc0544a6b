//! Content-based recommendation
//!
//! Ranks candidate service records by TF-IDF similarity to a base record.
//! Unlike search, the base document takes part in fitting the vocabulary,
//! since there is no external query to keep apart from the corpus.

use crate::config::RecommendConfig;
use crate::corpus::CorpusBuilder;
use crate::record::ServiceRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sift_core::{Error, Result, TfidfOptions, TfidfVectorizer};
use tracing::debug;

/// A ranked candidate with the fields surfaced to callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub similarity: f32,
    pub category: String,
    pub cover_image: Option<String>,
    pub description: Option<Value>,
    pub business_name: Option<Value>,
    /// The candidate's `availableLocations` additional field
    pub locations: Option<Value>,
}

impl Recommendation {
    fn from_candidate(candidate: &ServiceRecord, similarity: f32) -> Self {
        Self {
            id: candidate.id.clone(),
            similarity,
            category: candidate.category.clone(),
            cover_image: candidate.cover_image().map(str::to_string),
            description: candidate.field("description").cloned(),
            business_name: candidate.field("businessName").cloned(),
            locations: candidate.field("availableLocations").cloned(),
        }
    }
}

/// Recommends similar services
#[derive(Debug, Clone)]
pub struct Recommender {
    config: RecommendConfig,
    corpus: CorpusBuilder,
}

impl Recommender {
    /// Create a recommender, rejecting invalid configuration
    pub fn new(config: RecommendConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            corpus: CorpusBuilder::new(config.max_depth)?,
        })
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &RecommendConfig {
        &self.config
    }

    /// Similarity of every candidate to `base`, index-aligned with `candidates`.
    ///
    /// Empty when there are no candidates or no record has indexable text.
    pub fn similarities(&self, base: &ServiceRecord, candidates: &[ServiceRecord]) -> Result<Vec<f32>> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let mut documents = Vec::with_capacity(candidates.len() + 1);
        documents.push(self.corpus.build(base));
        documents.extend(self.corpus.build_all(candidates));

        let options = TfidfOptions::default().with_stop_words(self.config.stop_words);
        let mut vectorizer = TfidfVectorizer::new(options);
        let vectors = match vectorizer.fit_transform(&documents) {
            Ok(vectors) => vectors,
            Err(Error::EmptyVocabulary) => {
                debug!(candidates = candidates.len(), "no service text to compare");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let (base_vector, candidate_vectors) = vectors.split_first().ok_or(Error::EmptyVocabulary)?;
        Ok(candidate_vectors
            .iter()
            .map(|v| base_vector.cosine_similarity(v))
            .collect())
    }

    /// Rank `candidates` by similarity to `base`, most similar first.
    ///
    /// Every candidate is returned unless `min_similarity` is configured.
    pub fn recommend(&self, base: &ServiceRecord, candidates: &[ServiceRecord]) -> Result<Vec<Recommendation>> {
        let similarities = self.similarities(base, candidates)?;

        let mut ranked: Vec<(&ServiceRecord, f32)> = candidates.iter().zip(similarities).collect();

        // Stable sort keeps input order on ties
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        if let Some(min) = self.config.min_similarity {
            ranked.retain(|(_, score)| *score >= min);
        }

        debug!(
            base = %base.id,
            candidates = candidates.len(),
            returned = ranked.len(),
            "ranked recommendations"
        );

        Ok(ranked
            .into_iter()
            .map(|(candidate, score)| Recommendation::from_candidate(candidate, score))
            .collect())
    }
}

/// Rank `candidates` by similarity to `base` with the given configuration
pub fn recommend(
    base: &ServiceRecord,
    candidates: &[ServiceRecord],
    config: &RecommendConfig,
) -> Result<Vec<Recommendation>> {
    Recommender::new(*config)?.recommend(base, candidates)
}

//! Hybrid search ranking
//!
//! Scores listings by TF-IDF similarity to a free-text query, drops those
//! below the similarity threshold, and orders the rest by a linear blend of
//! similarity with popularity, review count and distance.

use crate::config::SearchConfig;
use crate::record::Listing;
use serde::{Deserialize, Serialize};
use sift_core::{Error, Result, TfidfOptions, TfidfVectorizer};
use tracing::debug;

/// A listing with its scores
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedListing {
    /// The original listing
    #[serde(flatten)]
    pub listing: Listing,
    /// Cosine similarity between query and listing text
    pub tfidf_score: f32,
    /// Blended score the results are ordered by
    pub final_score: f64,
}

/// Ranks listings against free-text queries
#[derive(Debug, Clone)]
pub struct SearchRanker {
    config: SearchConfig,
}

impl SearchRanker {
    /// Create a ranker, rejecting invalid configuration
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Text a listing is matched on: name, description and the boosted
    /// location tags, lower-cased.
    pub fn listing_document(&self, listing: &Listing) -> String {
        let locations = if listing.locations.is_empty() {
            String::new()
        } else {
            vec![listing.locations.join(" "); self.config.location_boost].join(" ")
        };

        format!(
            "{} {} {}",
            listing.name,
            listing.description.as_deref().unwrap_or(""),
            locations
        )
        .trim()
        .to_lowercase()
    }

    /// Rank `listings` for `query`.
    ///
    /// The vocabulary is fit over the listing documents only; the query is
    /// transformed against it. Returns an empty list when no listing has any
    /// indexable text.
    pub fn rank(&self, query: &str, listings: &[Listing]) -> Result<Vec<RankedListing>> {
        let documents: Vec<String> = listings.iter().map(|l| self.listing_document(l)).collect();

        if documents.iter().all(|d| d.is_empty()) {
            debug!(listings = listings.len(), "no listing text to rank");
            return Ok(Vec::new());
        }

        let options = TfidfOptions::default().with_stop_words(self.config.stop_words);
        let mut vectorizer = TfidfVectorizer::new(options);
        let vectors = match vectorizer.fit_transform(&documents) {
            Ok(vectors) => vectors,
            Err(Error::EmptyVocabulary) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        let query_vector = vectorizer.transform(&query.to_lowercase())?;

        let weights = &self.config.weights;
        let mut results: Vec<RankedListing> = listings
            .iter()
            .zip(&vectors)
            .filter_map(|(listing, vector)| {
                let similarity = query_vector.cosine_similarity(vector);
                if similarity < self.config.threshold {
                    return None;
                }

                let final_score = weights.text * similarity as f64
                    + weights.popularity * listing.popularity as f64
                    + weights.reviews * listing.reviews as f64
                    - weights.distance * listing.distance;

                Some(RankedListing {
                    listing: listing.clone(),
                    tfidf_score: similarity,
                    final_score,
                })
            })
            .collect();

        // Stable sort keeps input order on ties
        results.sort_by(|a, b| {
            b.final_score
                .partial_cmp(&a.final_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(
            listings = listings.len(),
            ranked = results.len(),
            vocabulary = vectorizer.vocabulary_len(),
            "ranked search results"
        );

        Ok(results)
    }
}

/// Rank `listings` for `query` with the given configuration
pub fn search(query: &str, listings: &[Listing], config: &SearchConfig) -> Result<Vec<RankedListing>> {
    SearchRanker::new(*config)?.rank(query, listings)
}

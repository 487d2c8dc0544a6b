//! Ranking configuration
//!
//! Weights and thresholds for the search and recommend paths. Values are
//! validated before use and rejected, never clamped.

use crate::corpus::{DEFAULT_MAX_DEPTH, MIN_MAX_DEPTH};
use serde::{Deserialize, Serialize};
use sift_core::{Error, Result, StopWords};

/// Signal weights for the hybrid search score
///
/// `final = text * similarity + popularity * popularity_count
///        + reviews * review_count - distance * distance`
///
/// Signals enter at their raw scale. Popularity and review counts are not
/// normalized against the [0, 1] similarity, so callers must supply weights
/// that make the units comparable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SearchWeights {
    #[serde(default = "default_text_weight")]
    pub text: f64,
    #[serde(default = "default_popularity_weight")]
    pub popularity: f64,
    #[serde(default = "default_reviews_weight")]
    pub reviews: f64,
    /// Penalty per unit of distance; subtracted from the score
    #[serde(default = "default_distance_weight")]
    pub distance: f64,
}

fn default_text_weight() -> f64 {
    0.6
}

fn default_popularity_weight() -> f64 {
    0.2
}

fn default_reviews_weight() -> f64 {
    0.15
}

fn default_distance_weight() -> f64 {
    0.05
}

impl Default for SearchWeights {
    fn default() -> Self {
        Self {
            text: default_text_weight(),
            popularity: default_popularity_weight(),
            reviews: default_reviews_weight(),
            distance: default_distance_weight(),
        }
    }
}

impl SearchWeights {
    pub fn validate(&self) -> Result<()> {
        for (name, weight) in [
            ("text", self.text),
            ("popularity", self.popularity),
            ("reviews", self.reviews),
            ("distance", self.distance),
        ] {
            if !weight.is_finite() {
                return Err(Error::InvalidConfig(format!("weight '{}' is not finite", name)));
            }
            if weight < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "weight '{}' must be non-negative, got {}",
                    name, weight
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for hybrid search
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// Minimum text similarity a listing needs to be ranked
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    #[serde(default)]
    pub weights: SearchWeights,
    /// How many times location tags are repeated in a listing document
    #[serde(default = "default_location_boost")]
    pub location_boost: usize,
    /// English stop words are dropped by default. The reference search path
    /// kept every term; set `StopWords::None` to match it.
    #[serde(default = "default_search_stop_words")]
    pub stop_words: StopWords,
}

fn default_threshold() -> f32 {
    0.1
}

fn default_location_boost() -> usize {
    5
}

fn default_search_stop_words() -> StopWords {
    StopWords::English
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            weights: SearchWeights::default(),
            location_boost: default_location_boost(),
            stop_words: default_search_stop_words(),
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_weights(mut self, weights: SearchWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_unit_interval("threshold", self.threshold)?;
        if self.location_boost == 0 {
            return Err(Error::InvalidConfig("location_boost must be at least 1".to_string()));
        }
        self.weights.validate()
    }
}

/// Configuration for content-based recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendConfig {
    /// Drop candidates below this similarity; no filtering when unset
    #[serde(default)]
    pub min_similarity: Option<f32>,
    #[serde(default)]
    pub stop_words: StopWords,
    /// Nesting depth followed inside additional fields
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            min_similarity: None,
            stop_words: StopWords::None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RecommendConfig {
    #[must_use]
    pub fn with_min_similarity(mut self, min_similarity: f32) -> Self {
        self.min_similarity = Some(min_similarity);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(min) = self.min_similarity {
            validate_unit_interval("min_similarity", min)?;
        }
        if self.max_depth < MIN_MAX_DEPTH {
            return Err(Error::InvalidConfig(format!(
                "max_depth must be at least {}, got {}",
                MIN_MAX_DEPTH, self.max_depth
            )));
        }
        Ok(())
    }
}

fn validate_unit_interval(name: &str, value: f32) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(Error::InvalidConfig(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

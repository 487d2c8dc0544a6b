//! Request bodies accepted by the `sift` binary

use serde::Deserialize;
use sift_similarity::{
    record::null_as_default, Listing, RecommendConfig, SearchConfig, SearchWeights, ServiceRecord,
};

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub listings: Vec<Listing>,
    #[serde(default)]
    pub weights: Option<SearchWeights>,
    #[serde(default)]
    pub threshold: Option<f32>,
}

impl SearchRequest {
    /// Defaults overridden by whatever the request carries
    pub fn config(&self) -> SearchConfig {
        let mut config = SearchConfig::default();
        if let Some(weights) = self.weights {
            config = config.with_weights(weights);
        }
        if let Some(threshold) = self.threshold {
            config = config.with_threshold(threshold);
        }
        config
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    pub base_service: ServiceRecord,
    #[serde(default, deserialize_with = "null_as_default")]
    pub candidates: Vec<ServiceRecord>,
    #[serde(default)]
    pub min_similarity: Option<f32>,
}

impl RecommendRequest {
    pub fn config(&self) -> RecommendConfig {
        match self.min_similarity {
            Some(min) => RecommendConfig::default().with_min_similarity(min),
            None => RecommendConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_request_overrides() {
        let request: SearchRequest = serde_json::from_value(json!({
            "query": "ocean view",
            "listings": [{"name": "Beach House"}],
            "weights": {"text": 1.0},
            "threshold": 0.3
        }))
        .unwrap();

        let config = request.config();
        assert_eq!(request.listings.len(), 1);
        assert_eq!(config.threshold, 0.3);
        assert_eq!(config.weights.text, 1.0);
        assert_eq!(config.weights.popularity, SearchWeights::default().popularity);
    }

    #[test]
    fn test_search_request_defaults() {
        let request: SearchRequest =
            serde_json::from_value(json!({"query": "x", "listings": null})).unwrap();
        assert!(request.listings.is_empty());
        assert_eq!(request.config(), SearchConfig::default());
    }

    #[test]
    fn test_recommend_request() {
        let request: RecommendRequest = serde_json::from_value(json!({
            "baseService": {"_id": "a", "category": "Spa"},
            "candidates": [{"id": "b", "category": "Spa"}],
            "minSimilarity": 0.4
        }))
        .unwrap();

        assert_eq!(request.base_service.id, "a");
        assert_eq!(request.candidates.len(), 1);
        assert_eq!(request.config().min_similarity, Some(0.4));
    }
}

//! Response envelopes and ranking summaries
//!
//! Wraps ranked results in the shapes callers serialize, and summarizes a
//! ranking for logs.

use crate::recommend::Recommendation;
use crate::search::RankedListing;
use serde::{Deserialize, Serialize};

/// Response body for a search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub ranked_listings: Vec<RankedListing>,
}

impl SearchResponse {
    pub fn new(ranked_listings: Vec<RankedListing>) -> Self {
        Self { ranked_listings }
    }
}

/// Summary statistics for a ranking
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankingStats {
    /// Number of candidates considered
    pub candidates_count: usize,
    /// Number of results returned
    pub results_count: usize,
    /// Average score of results
    pub avg_score: f64,
    /// Score of best result
    pub best_score: f64,
}

impl RankingStats {
    /// Compute stats from scores that are already sorted best-first
    pub fn compute(sorted_scores: &[f64], candidates_count: usize) -> Self {
        if sorted_scores.is_empty() {
            return Self {
                candidates_count,
                results_count: 0,
                avg_score: 0.0,
                best_score: 0.0,
            };
        }

        Self {
            candidates_count,
            results_count: sorted_scores.len(),
            avg_score: sorted_scores.iter().sum::<f64>() / sorted_scores.len() as f64,
            best_score: sorted_scores[0],
        }
    }

    /// Stats over search results, scored by final score
    pub fn for_search(results: &[RankedListing], candidates_count: usize) -> Self {
        let scores: Vec<f64> = results.iter().map(|r| r.final_score).collect();
        Self::compute(&scores, candidates_count)
    }

    /// Stats over recommendations, scored by similarity
    pub fn for_recommendations(results: &[Recommendation], candidates_count: usize) -> Self {
        let scores: Vec<f64> = results.iter().map(|r| r.similarity as f64).collect();
        Self::compute(&scores, candidates_count)
    }
}

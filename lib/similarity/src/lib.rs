//! # sift Similarity
//!
//! Ranking engines built on the sift TF-IDF vector space.
//!
//! ## Features
//!
//! - **Hybrid Search**: Text similarity blended with popularity, reviews and distance
//! - **Recommendation**: "Find similar" over service records with arbitrary nested attributes
//! - **Corpus Builder**: Linearizes heterogeneous records into comparable documents
//! - **Validated Configuration**: Weights and thresholds are rejected, never clamped
//!
//! Each call fits its own vector space over the records it is given, so
//! rankers hold no mutable state and can be shared freely across threads.
//!
//! ## Example
//!
//! ```rust
//! use sift_similarity::{search, Listing, SearchConfig};
//!
//! let listings = vec![
//!     Listing::new("Beach House")
//!         .with_description("ocean view")
//!         .with_locations(["Malibu"])
//!         .with_signals(5, 10, 2.0),
//! ];
//!
//! let ranked = search("ocean view house", &listings, &SearchConfig::default()).unwrap();
//! assert_eq!(ranked.len(), 1);
//! assert!(ranked[0].tfidf_score > 0.0);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Listings   │────>│   TF-IDF    │────>│   Hybrid    │
//! │  (+ query)  │     │ (fit/trans) │     │   scorer    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Services   │────>│   Corpus    │────>│   TF-IDF    │──> Recommender
//! │ (base+cand) │     │   builder   │     │ (joint fit) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```

pub mod config;
pub mod corpus;
pub mod explain;
pub mod recommend;
pub mod record;
pub mod search;

// Re-export main types for convenience
pub use config::{RecommendConfig, SearchConfig, SearchWeights};
pub use corpus::{build_document, CorpusBuilder, DEFAULT_MAX_DEPTH};
pub use explain::{RankingStats, SearchResponse};
pub use recommend::{recommend, Recommendation, Recommender};
pub use record::{Listing, ServiceRecord};
pub use search::{search, RankedListing, SearchRanker};

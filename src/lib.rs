//! # sift
//!
//! Text vectorization and scoring for a services marketplace.
//!
//! sift turns free text and loosely structured records into TF-IDF vectors
//! and scores them three ways:
//!
//! - **Search ranking**: text similarity to a query blended with popularity,
//!   review count and a distance penalty
//! - **Recommendations**: "find similar" over service records with arbitrary
//!   nested attributes
//! - **Spam detection**: a naive Bayes classifier trained once and persisted
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! sift search --request search.json
//! sift recommend --request recommend.json
//! sift predict --text "Win a free prize now!!!"
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use sift::prelude::*;
//!
//! let listings = vec![
//!     Listing::new("Beach House").with_description("ocean view").with_locations(["Malibu"]),
//!     Listing::new("Mountain Cabin").with_description("quiet forest retreat"),
//! ];
//! let ranked = search("ocean view house", &listings, &SearchConfig::default()).unwrap();
//! assert_eq!(ranked[0].listing.name, "Beach House");
//! ```
//!
//! ## Crate Structure
//!
//! - [`sift-core`](https://docs.rs/sift-core) - Tokenizer, sparse vectors, TF-IDF vectorizer
//! - [`sift-similarity`](https://docs.rs/sift-similarity) - Search ranking, recommendations, corpus builder
//! - [`sift-classifier`](https://docs.rs/sift-classifier) - Spam pipeline, artifact persistence, lifecycle service

pub mod request;

// Re-export core types
pub use sift_core::{
    cosine_similarity, tokenize, Analyzer, Error, Result, SparseVector, StopWords, TfidfOptions,
    TfidfVectorizer,
};

// Re-export ranking
pub use sift_similarity::{
    build_document, recommend, search, CorpusBuilder, Listing, RankedListing, RankingStats,
    RecommendConfig, Recommendation, Recommender, SearchConfig, SearchRanker, SearchResponse,
    SearchWeights, ServiceRecord,
};

// Re-export classifier
pub use sift_classifier::{
    predict_spam, ClassifierConfig, ClassifierError, DatasetSource, Label, Lifecycle, SpamClassifier,
    SpamPrediction,
};

pub use request::{RecommendRequest, SearchRequest};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        predict_spam, recommend, search, ClassifierConfig, Error, Listing, RankedListing,
        RecommendConfig, Recommendation, Result, SearchConfig, SearchWeights, ServiceRecord,
        SpamClassifier, SpamPrediction,
    };
}

//! # sift Core
//!
//! Core library for the sift ranking services.
//!
//! This crate provides the text primitives every ranking path shares:
//!
//! - [`Analyzer`] - Tokenization with an optional English stop-word filter
//! - [`SparseVector`] - Sorted sparse weight vector with cosine similarity
//! - [`TfidfVectorizer`] - TF-IDF vector space fit over a single corpus
//!
//! ## Example
//!
//! ```rust
//! use sift_core::{TfidfVectorizer, TfidfOptions};
//!
//! let docs = ["beach house ocean view", "mountain cabin", "ocean front condo"];
//! let mut vectorizer = TfidfVectorizer::new(TfidfOptions::default());
//! let vectors = vectorizer.fit_transform(&docs).unwrap();
//!
//! let query = vectorizer.transform("ocean view").unwrap();
//! let best = vectors
//!     .iter()
//!     .map(|v| query.cosine_similarity(v))
//!     .fold(0.0f32, f32::max);
//! assert!(best > 0.5);
//! ```

pub mod analyzer;
pub mod error;
pub mod sparse;
pub mod tfidf;

pub use analyzer::{tokenize, Analyzer, StopWords};
pub use error::{Error, Result};
pub use sparse::{cosine_similarity, SparseVector};
pub use tfidf::{TfidfOptions, TfidfVectorizer};

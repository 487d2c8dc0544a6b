//! TF-IDF vector space
//!
//! Fits a vocabulary and inverse document frequencies over a corpus and maps
//! documents to L2-normalized sparse weight vectors:
//!
//! - `tf(t, d)` is the raw count of `t` in `d` (or `1 + ln(count)` when sublinear)
//! - smooth idf: `ln((1 + n) / (1 + df(t))) + 1`
//! - plain idf: `ln(n / df(t)) + 1`
//!
//! A vectorizer is meant to be fit once per corpus. Fitting again replaces
//! the previous vocabulary.

use crate::analyzer::{Analyzer, StopWords};
use crate::error::{Error, Result};
use crate::sparse::SparseVector;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Options controlling term weighting
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TfidfOptions {
    /// Stop-word policy applied before counting
    #[serde(default)]
    pub stop_words: StopWords,

    /// Add one to document frequencies, as if an extra document held every term once
    #[serde(default = "default_smooth_idf")]
    pub smooth_idf: bool,

    /// Replace raw term counts with `1 + ln(count)`
    #[serde(default)]
    pub sublinear_tf: bool,
}

fn default_smooth_idf() -> bool {
    true
}

impl Default for TfidfOptions {
    fn default() -> Self {
        Self {
            stop_words: StopWords::None,
            smooth_idf: true,
            sublinear_tf: false,
        }
    }
}

impl TfidfOptions {
    #[must_use]
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }
}

/// TF-IDF vectorizer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TfidfVectorizer {
    options: TfidfOptions,
    // term -> column
    vocabulary: HashMap<String, u32>,
    // column -> idf
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    #[must_use]
    pub fn new(options: TfidfOptions) -> Self {
        Self {
            options,
            vocabulary: HashMap::new(),
            idf: Vec::new(),
        }
    }

    #[inline]
    pub fn options(&self) -> &TfidfOptions {
        &self.options
    }

    #[inline]
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        !self.idf.is_empty()
    }

    /// Number of terms in the fitted vocabulary
    #[inline]
    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }

    /// Column index of a term, if it is part of the vocabulary
    pub fn column(&self, term: &str) -> Option<u32> {
        self.vocabulary.get(term).copied()
    }

    /// Inverse document frequency of a term, if it is part of the vocabulary
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.column(term).map(|col| self.idf[col as usize])
    }

    fn analyzer(&self) -> Analyzer {
        Analyzer::new(self.options.stop_words)
    }

    /// Learn vocabulary and document frequencies from `documents`.
    ///
    /// Fails with [`Error::EmptyVocabulary`] when no document contains a term,
    /// leaving the vectorizer unfitted.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        let analyzer = self.analyzer();
        let mut doc_freqs: BTreeMap<String, u32> = BTreeMap::new();

        for doc in documents {
            let mut terms = analyzer.analyze(doc.as_ref());
            terms.sort_unstable();
            terms.dedup();
            for term in terms {
                *doc_freqs.entry(term).or_insert(0) += 1;
            }
        }

        if doc_freqs.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let n = documents.len() as f32;
        let smooth = if self.options.smooth_idf { 1.0 } else { 0.0 };

        let mut vocabulary = HashMap::with_capacity(doc_freqs.len());
        let mut idf = Vec::with_capacity(doc_freqs.len());
        // BTreeMap iteration is sorted, so columns follow term order
        for (col, (term, df)) in doc_freqs.into_iter().enumerate() {
            idf.push(((n + smooth) / (df as f32 + smooth)).ln() + 1.0);
            vocabulary.insert(term, col as u32);
        }

        debug!(
            documents = documents.len(),
            vocabulary = idf.len(),
            "fitted tf-idf vocabulary"
        );

        self.vocabulary = vocabulary;
        self.idf = idf;
        Ok(())
    }

    /// Map a document onto the fitted vocabulary.
    ///
    /// Terms outside the vocabulary are ignored, so a document sharing no
    /// terms with the corpus maps to the zero vector.
    pub fn transform(&self, document: &str) -> Result<SparseVector> {
        if !self.is_fitted() {
            return Err(Error::NotFitted);
        }

        let mut counts: AHashMap<u32, u32> = AHashMap::new();
        for term in self.analyzer().analyze(document) {
            if let Some(&col) = self.vocabulary.get(&term) {
                *counts.entry(col).or_insert(0) += 1;
            }
        }

        let entries = counts
            .into_iter()
            .map(|(col, count)| {
                let tf = if self.options.sublinear_tf {
                    1.0 + (count as f32).ln()
                } else {
                    count as f32
                };
                (col, tf * self.idf[col as usize])
            })
            .collect();

        let mut vector = SparseVector::new(entries);
        vector.normalize();
        Ok(vector)
    }

    pub fn transform_all<S: AsRef<str>>(&self, documents: &[S]) -> Result<Vec<SparseVector>> {
        documents.iter().map(|d| self.transform(d.as_ref())).collect()
    }

    /// Fit on `documents` and return one vector per document, index-aligned
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<Vec<SparseVector>> {
        self.fit(documents)?;
        self.transform_all(documents)
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(TfidfOptions::default())
    }
}

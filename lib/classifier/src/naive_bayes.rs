//! Multinomial naive Bayes over sparse feature vectors
//!
//! `log P(x_j | c) = ln(N_cj + alpha) - ln(N_c + alpha * n_features)` where
//! `N_cj` is the summed weight of feature `j` over samples of class `c`.
//! Class priors are learned from class frequencies.

use crate::error::{ClassifierError, Result};
use serde::{Deserialize, Serialize};
use sift_core::SparseVector;

/// Default additive (Laplace) smoothing
pub const DEFAULT_ALPHA: f64 = 1.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MultinomialNb {
    class_log_prior: Vec<f64>,
    // [class][feature]
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Fit on `features` with class indices `labels` in `0..n_classes`.
    ///
    /// Every class must have at least one sample.
    pub fn fit(
        features: &[SparseVector],
        labels: &[usize],
        n_classes: usize,
        n_features: usize,
        alpha: f64,
    ) -> Result<Self> {
        if features.len() != labels.len() {
            return Err(ClassifierError::Training(format!(
                "{} samples but {} labels",
                features.len(),
                labels.len()
            )));
        }
        if !(alpha > 0.0 && alpha.is_finite()) {
            return Err(ClassifierError::Training(format!("alpha must be positive, got {}", alpha)));
        }
        if n_features == 0 {
            return Err(ClassifierError::Training("no features".to_string()));
        }

        let mut class_counts = vec![0usize; n_classes];
        let mut feature_counts = vec![vec![0.0f64; n_features]; n_classes];

        for (x, &label) in features.iter().zip(labels) {
            let counts = feature_counts.get_mut(label).ok_or_else(|| {
                ClassifierError::Training(format!("label {} out of range 0..{}", label, n_classes))
            })?;
            class_counts[label] += 1;
            for &(col, weight) in x.entries() {
                if let Some(slot) = counts.get_mut(col as usize) {
                    *slot += weight as f64;
                }
            }
        }

        if let Some(missing) = class_counts.iter().position(|&c| c == 0) {
            return Err(ClassifierError::Training(format!("class {} has no samples", missing)));
        }

        let total = features.len() as f64;
        let class_log_prior = class_counts
            .iter()
            .map(|&c| (c as f64).ln() - total.ln())
            .collect();

        let feature_log_prob = feature_counts
            .into_iter()
            .map(|counts| {
                let denom = (counts.iter().sum::<f64>() + alpha * n_features as f64).ln();
                counts.into_iter().map(|c| (c + alpha).ln() - denom).collect()
            })
            .collect();

        Ok(Self {
            class_log_prior,
            feature_log_prob,
        })
    }

    #[inline]
    pub fn n_classes(&self) -> usize {
        self.class_log_prior.len()
    }

    /// Unnormalized log posterior of each class
    pub fn joint_log_likelihood(&self, x: &SparseVector) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| {
                prior
                    + x.entries()
                        .iter()
                        .filter_map(|&(col, w)| log_probs.get(col as usize).map(|lp| w as f64 * lp))
                        .sum::<f64>()
            })
            .collect()
    }

    /// Posterior probability of each class
    pub fn predict_proba(&self, x: &SparseVector) -> Vec<f64> {
        let jll = self.joint_log_likelihood(x);
        let max = jll.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let log_norm = max + jll.iter().map(|v| (v - max).exp()).sum::<f64>().ln();
        jll.iter().map(|v| (v - log_norm).exp()).collect()
    }

    /// Most probable class; ties go to the lowest index
    pub fn predict(&self, x: &SparseVector) -> usize {
        let jll = self.joint_log_likelihood(x);
        let mut best = 0;
        for (i, v) in jll.iter().enumerate().skip(1) {
            if *v > jll[best] {
                best = i;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(entries: &[(u32, f32)]) -> SparseVector {
        SparseVector::new(entries.to_vec())
    }

    #[test]
    fn test_fit_learns_priors_and_likelihoods() {
        // feature 0 marks class 0, feature 1 marks class 1
        let features = vec![v(&[(0, 1.0)]), v(&[(0, 1.0)]), v(&[(1, 1.0)])];
        let labels = vec![0, 0, 1];
        let nb = MultinomialNb::fit(&features, &labels, 2, 2, 1.0).unwrap();

        assert_eq!(nb.n_classes(), 2);
        assert!((nb.class_log_prior[0] - (2.0f64 / 3.0).ln()).abs() < 1e-12);
        // class 0: counts [2, 0] -> (2+1)/(2+2), (0+1)/(2+2)
        assert!((nb.feature_log_prob[0][0] - 0.75f64.ln()).abs() < 1e-12);
        assert!((nb.feature_log_prob[0][1] - 0.25f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_predict_and_proba() {
        let features = vec![v(&[(0, 1.0)]), v(&[(0, 0.8), (2, 0.2)]), v(&[(1, 1.0)]), v(&[(1, 0.9), (2, 0.1)])];
        let labels = vec![0, 0, 1, 1];
        let nb = MultinomialNb::fit(&features, &labels, 2, 3, 1.0).unwrap();

        assert_eq!(nb.predict(&v(&[(0, 1.0)])), 0);
        assert_eq!(nb.predict(&v(&[(1, 1.0)])), 1);

        let proba = nb.predict_proba(&v(&[(1, 1.0)]));
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(proba[1] > 0.5);
    }

    #[test]
    fn test_ties_resolve_to_first_class() {
        let features = vec![v(&[(0, 1.0)]), v(&[(1, 1.0)])];
        let nb = MultinomialNb::fit(&features, &[0, 1], 2, 2, 1.0).unwrap();
        // zero vector: only the equal priors speak
        assert_eq!(nb.predict(&SparseVector::empty()), 0);
        let proba = nb.predict_proba(&SparseVector::empty());
        assert!((proba[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_training_input() {
        let features = vec![v(&[(0, 1.0)])];
        assert!(MultinomialNb::fit(&features, &[0, 1], 2, 1, 1.0).is_err());
        assert!(MultinomialNb::fit(&features, &[0], 2, 1, 1.0).is_err());
        assert!(MultinomialNb::fit(&features, &[5], 2, 1, 1.0).is_err());
        assert!(MultinomialNb::fit(&features, &[0], 1, 1, 0.0).is_err());
        assert!(MultinomialNb::fit(&features, &[0], 1, 0, 1.0).is_err());
    }
}

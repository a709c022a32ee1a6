//! Bag-of-words intent classifier.
//!
//! A multinomial logistic model over binary bag-of-words vectors, trained
//! from scratch on every pass with full-batch gradient descent. The corpus
//! is tens of utterances, so retraining is effectively free.
//!
//! The fitted state (vocabulary, class labels, weights) is serde-serializable
//! and persisted to disk as an opaque bincode blob.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::brain::tokenize::preprocess;
use crate::error::AppError;
use crate::models::IntentFile;

/// Minimum softmax probability (strictly greater than) for a prediction
/// to be accepted instead of falling back to the LLM.
pub const CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Step size for gradient descent.
const LEARNING_RATE: f64 = 0.5;

/// Iteration cap for the solver.
const MAX_ITERATIONS: usize = 1000;

/// A fitted bag-of-words intent classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentClassifier {
    /// Deduplicated, sorted lemmatized tokens from all patterns.
    vocab: Vec<String>,
    /// Sorted intent tags the model can predict.
    classes: Vec<String>,
    /// Weight matrix, one row per class.
    weights: Vec<Vec<f64>>,
    /// Bias term per class.
    bias: Vec<f64>,
}

impl IntentClassifier {
    /// Trains a classifier from scratch over the given intents corpus.
    ///
    /// The vocabulary and class list are fully regenerated; intents with no
    /// patterns contribute no class.
    pub fn fit(intents: &IntentFile) -> Result<Self, AppError> {
        let mut vocab_set = BTreeSet::new();
        let mut class_set = BTreeSet::new();
        let mut documents = Vec::new();

        for intent in &intents.intents {
            for pattern in &intent.patterns {
                let tokens = preprocess(pattern);
                vocab_set.extend(tokens.iter().cloned());
                documents.push((tokens, intent.tag.clone()));
                class_set.insert(intent.tag.clone());
            }
        }

        if documents.is_empty() {
            return Err(AppError::Training(
                "intents corpus contains no patterns".to_string(),
            ));
        }

        let vocab: Vec<String> = vocab_set.into_iter().collect();
        let classes: Vec<String> = class_set.into_iter().collect();

        // Encode each document as the sorted set of present vocabulary
        // indices plus its class index.
        let rows: Vec<(Vec<usize>, usize)> = documents
            .iter()
            .map(|(tokens, tag)| {
                let mut indices: Vec<usize> = tokens
                    .iter()
                    .filter_map(|token| vocab.binary_search(token).ok())
                    .collect();
                indices.sort_unstable();
                indices.dedup();
                let class = classes
                    .binary_search(tag)
                    .expect("class list built from the same corpus");
                (indices, class)
            })
            .collect();

        let mut model = Self {
            vocab,
            classes,
            weights: Vec::new(),
            bias: Vec::new(),
        };
        model.weights = vec![vec![0.0; model.vocab.len()]; model.classes.len()];
        model.bias = vec![0.0; model.classes.len()];
        model.descend(&rows);

        info!(
            "Classifier trained: {} documents, {} classes, vocabulary of {}",
            rows.len(),
            model.classes.len(),
            model.vocab.len()
        );

        Ok(model)
    }

    /// Full-batch gradient descent on the cross-entropy objective.
    fn descend(&mut self, rows: &[(Vec<usize>, usize)]) {
        let n_classes = self.classes.len();
        let n_samples = rows.len() as f64;

        for _ in 0..MAX_ITERATIONS {
            let mut grad_w = vec![vec![0.0; self.vocab.len()]; n_classes];
            let mut grad_b = vec![0.0; n_classes];

            for (indices, target) in rows {
                let probs = self.probabilities(indices);
                for c in 0..n_classes {
                    let err = probs[c] - if c == *target { 1.0 } else { 0.0 };
                    grad_b[c] += err;
                    for &j in indices {
                        grad_w[c][j] += err;
                    }
                }
            }

            for c in 0..n_classes {
                self.bias[c] -= LEARNING_RATE * grad_b[c] / n_samples;
                for (w, g) in self.weights[c].iter_mut().zip(&grad_w[c]) {
                    *w -= LEARNING_RATE * g / n_samples;
                }
            }
        }
    }

    /// Softmax class probabilities for a set of active feature indices.
    fn probabilities(&self, indices: &[usize]) -> Vec<f64> {
        let logits: Vec<f64> = self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| b + indices.iter().map(|&j| row[j]).sum::<f64>())
            .collect();

        softmax(&logits)
    }

    /// Converts text to its active vocabulary indices (binary bag-of-words).
    fn featurize(&self, text: &str) -> Vec<usize> {
        let mut indices: Vec<usize> = preprocess(text)
            .iter()
            .filter_map(|token| self.vocab.binary_search(token).ok())
            .collect();
        indices.sort_unstable();
        indices.dedup();
        indices
    }

    /// Softmax class probabilities for raw text, aligned with `classes()`.
    pub fn predict_proba(&self, text: &str) -> Vec<f64> {
        self.probabilities(&self.featurize(text))
    }

    /// Classifies text, returning the predicted tag only when the model is
    /// confident. `None` means the caller should fall back to the LLM.
    pub fn classify(&self, text: &str) -> Option<&str> {
        let probs = self.predict_proba(text);
        let (best, max_prob) = probs
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))?;

        if is_confident(*max_prob) {
            Some(&self.classes[best])
        } else {
            None
        }
    }

    /// The fitted vocabulary, sorted and deduplicated.
    #[allow(dead_code)]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocab
    }

    /// The sorted intent tags the model can predict.
    #[allow(dead_code)]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Persists the fitted model as an opaque blob.
    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bincode::serialize(self)?)?;
        Ok(())
    }

    /// Reloads a previously persisted model.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let bytes = fs::read(path)?;
        Ok(bincode::deserialize(&bytes)?)
    }
}

/// The confidence cutoff is strict: exactly 0.7 is not confident.
fn is_confident(probability: f64) -> bool {
    probability > CONFIDENCE_THRESHOLD
}

/// Numerically stable softmax.
fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

//! # Brain Module
//!
//! Local, non-LLM analysis for CareLink. The agent tries this module first
//! and only calls the remote LLM when the classifier is not confident.
//!
//! ## Components
//! - `tokenize`: lowercasing, tokenization and rule-based lemmatization
//! - `classifier`: bag-of-words multinomial logistic classifier
//! - `responder`: canned-response picker

pub mod classifier;
pub mod responder;
pub mod tokenize;

pub use classifier::IntentClassifier;
pub use responder::Responder;

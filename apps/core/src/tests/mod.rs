//! Test Module
//!
//! Cross-module test suite for the CareLink backend.
//!
//! ## Test Categories
//! - `agent_tests`: classify → respond → LLM fallback → feedback loop
//! - `config_tests`: environment-driven configuration
//! - `startup_tests`: load-or-train recovery and the `train` subcommand
//!
//! Unit tests for the tokenizer, classifier, responder, store and LLM client
//! live in `#[cfg(test)]` blocks inside their modules.

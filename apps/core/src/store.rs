//! Persistence of the intents corpus.
//!
//! The corpus lives in a single pretty-printed JSON document. Feedback from
//! successful LLM fallbacks is appended under a distinguished catch-all tag
//! so the classifier can learn it on the next training pass.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::AppError;
use crate::models::{Intent, IntentFile};

/// Tag that collects query/answer pairs learned from the LLM.
pub const CATCH_ALL_TAG: &str = "general_healthcare";

/// Loads the intents document from disk.
pub fn load_intents(path: &Path) -> Result<IntentFile, AppError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Writes the intents document back to disk, pretty-printed.
pub fn save_intents(path: &Path, intents: &IntentFile) -> Result<(), AppError> {
    let contents = serde_json::to_string_pretty(intents)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Appends one query/response pair under the catch-all tag and persists the
/// document, creating the catch-all intent if it does not exist yet.
///
/// Returns the updated corpus so callers can retrain without re-reading.
pub fn record_feedback(path: &Path, query: &str, response: &str) -> Result<IntentFile, AppError> {
    let mut intents = load_intents(path)?;

    let index = match intents.intents.iter().position(|i| i.tag == CATCH_ALL_TAG) {
        Some(index) => index,
        None => {
            intents.intents.push(Intent {
                tag: CATCH_ALL_TAG.to_string(),
                patterns: vec![],
                responses: vec![],
            });
            intents.intents.len() - 1
        }
    };

    let catch_all = &mut intents.intents[index];
    catch_all.patterns.push(query.to_string());
    catch_all.responses.push(response.to_string());

    save_intents(path, &intents)?;
    info!("Recorded feedback under '{}': {}", CATCH_ALL_TAG, query);

    Ok(intents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SEED: &str = r#"{
        "intents": [
            { "tag": "greeting", "patterns": ["hello"], "responses": ["Hi!"] }
        ]
    }"#;

    #[test]
    fn test_load_and_save_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("intents.json");
        fs::write(&path, SEED).unwrap();

        let intents = load_intents(&path).unwrap();
        assert_eq!(intents.intents.len(), 1);

        save_intents(&path, &intents).unwrap();
        let reloaded = load_intents(&path).unwrap();
        assert_eq!(reloaded.intents[0].tag, "greeting");
    }

    #[test]
    fn test_feedback_creates_catch_all() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("intents.json");
        fs::write(&path, SEED).unwrap();

        let updated = record_feedback(&path, "what is a fever", "A fever is ...").unwrap();

        let catch_all = updated.find(CATCH_ALL_TAG).unwrap();
        assert_eq!(catch_all.patterns, vec!["what is a fever"]);
        assert_eq!(catch_all.responses, vec!["A fever is ..."]);

        // Persisted too, not just in memory.
        let reloaded = load_intents(&path).unwrap();
        assert!(reloaded.find(CATCH_ALL_TAG).is_some());
    }

    #[test]
    fn test_feedback_appends_exactly_one_pair() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("intents.json");
        fs::write(&path, SEED).unwrap();

        record_feedback(&path, "first query", "first answer").unwrap();
        let updated = record_feedback(&path, "second query", "second answer").unwrap();

        let catch_all = updated.find(CATCH_ALL_TAG).unwrap();
        assert_eq!(catch_all.patterns.len(), 2);
        assert_eq!(catch_all.responses.len(), 2);
        assert_eq!(catch_all.patterns[1], "second query");
        assert_eq!(catch_all.responses[1], "second answer");
    }

    #[test]
    fn test_missing_file_propagates_io_error() {
        let dir = tempdir().unwrap();
        let result = load_intents(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}

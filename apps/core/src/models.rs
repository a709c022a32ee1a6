use serde::{Deserialize, Serialize};

/// Represents a labeled category of user query.
///
/// Each intent carries the example utterances the classifier trains on and
/// the canned replies the responder picks from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    /// The string identifier for the intent (e.g., "greeting").
    pub tag: String,
    /// Example utterances belonging to this intent.
    pub patterns: Vec<String>,
    /// Canned replies returned when this intent is detected.
    pub responses: Vec<String>,
}

/// The persisted intents document: `{ "intents": [ ... ] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntentFile {
    pub intents: Vec<Intent>,
}

impl IntentFile {
    /// Looks up an intent by its tag.
    pub fn find(&self, tag: &str) -> Option<&Intent> {
        self.intents.iter().find(|intent| intent.tag == tag)
    }
}

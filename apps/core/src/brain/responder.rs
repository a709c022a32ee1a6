//! Canned-response picker.
//!
//! Maps a predicted intent tag to one of its canned replies, chosen
//! uniformly at random. Unknown tags (and tags with no replies) get a
//! fixed fallback string.

use rand::seq::SliceRandom;

use crate::models::IntentFile;

/// Reply used when a tag has no canned responses to offer.
pub const FALLBACK_RESPONSE: &str = "I’m not sure how to respond to that!";

/// Picks canned responses for classified intents.
pub struct Responder {
    intents: IntentFile,
}

impl Responder {
    pub fn new(intents: IntentFile) -> Self {
        Self { intents }
    }

    /// Returns a random canned response for the tag, or the fixed fallback
    /// string when the tag is absent or has no responses.
    pub fn pick(&self, tag: &str) -> String {
        self.intents
            .find(tag)
            .and_then(|intent| intent.responses.choose(&mut rand::thread_rng()))
            .cloned()
            .unwrap_or_else(|| FALLBACK_RESPONSE.to_string())
    }

    /// Replaces the backing intents document after a feedback update.
    pub fn reload(&mut self, intents: IntentFile) {
        self.intents = intents;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Intent;

    fn responder() -> Responder {
        Responder::new(IntentFile {
            intents: vec![
                Intent {
                    tag: "thanks".to_string(),
                    patterns: vec!["thank you".to_string()],
                    responses: vec![
                        "You're welcome!".to_string(),
                        "Happy to help!".to_string(),
                        "Any time!".to_string(),
                    ],
                },
                Intent {
                    tag: "empty".to_string(),
                    patterns: vec![],
                    responses: vec![],
                },
            ],
        })
    }

    #[test]
    fn test_pick_always_returns_a_member() {
        let responder = responder();
        let expected = [
            "You're welcome!".to_string(),
            "Happy to help!".to_string(),
            "Any time!".to_string(),
        ];

        for _ in 0..50 {
            let reply = responder.pick("thanks");
            assert!(expected.contains(&reply));
        }
    }

    #[test]
    fn test_unknown_tag_returns_fallback() {
        assert_eq!(responder().pick("no_such_tag"), FALLBACK_RESPONSE);
    }

    #[test]
    fn test_empty_responses_return_fallback() {
        assert_eq!(responder().pick("empty"), FALLBACK_RESPONSE);
    }

    #[test]
    fn test_reload_swaps_corpus() {
        let mut responder = responder();
        responder.reload(IntentFile {
            intents: vec![Intent {
                tag: "thanks".to_string(),
                patterns: vec![],
                responses: vec!["Updated reply.".to_string()],
            }],
        });

        assert_eq!(responder.pick("thanks"), "Updated reply.");
    }
}

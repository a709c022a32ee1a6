//! Agent orchestration: classifier first, canned response when confident,
//! LLM fallback otherwise, with the feedback loop that grows the corpus.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::brain::{IntentClassifier, Responder};
use crate::error::AppError;
use crate::llm::{ChatModel, LlmReply, REFUSAL_SENTINEL};
use crate::store;

/// The conversational agent. Holds the fitted classifier, the canned
/// responses and the LLM client, plus the paths needed to persist feedback.
pub struct Agent<M: ChatModel> {
    classifier: IntentClassifier,
    responder: Responder,
    llm: M,
    intents_path: PathBuf,
    model_path: PathBuf,
}

impl<M: ChatModel> Agent<M> {
    pub fn new(
        classifier: IntentClassifier,
        responder: Responder,
        llm: M,
        intents_path: PathBuf,
        model_path: PathBuf,
    ) -> Self {
        Self {
            classifier,
            responder,
            llm,
            intents_path,
            model_path,
        }
    }

    /// Handles one user utterance and produces the agent's reply.
    ///
    /// Known intents are answered from the canned-response table. Everything
    /// else goes to the LLM; a non-refusal answer is appended to the corpus,
    /// the classifier is retrained from scratch and re-persisted, and the
    /// responder picks up the updated corpus.
    pub async fn handle(&mut self, input: &str) -> Result<String, AppError> {
        if let Some(tag) = self.classifier.classify(input) {
            debug!("Classified '{}' as '{}'", input, tag);
            let tag = tag.to_string();
            return Ok(self.responder.pick(&tag));
        }

        match self.llm.ask(input).await? {
            LlmReply::Refusal => Ok(REFUSAL_SENTINEL.to_string()),
            LlmReply::Answer(answer) => {
                let updated = store::record_feedback(&self.intents_path, input, &answer)?;
                self.classifier = IntentClassifier::fit(&updated)?;
                self.classifier.save(&self.model_path)?;
                self.responder.reload(updated);
                info!("Corpus updated and classifier retrained");
                Ok(answer)
            }
        }
    }

    /// The current classifier (retrained in place after feedback).
    #[allow(dead_code)]
    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }
}

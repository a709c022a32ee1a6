//! Text preprocessing for the bag-of-words pipeline.
//!
//! Lowercases, splits on non-alphanumeric characters and applies a light
//! rule-based lemmatizer so that "doctors" and "doctor" share a vocabulary
//! entry. Good enough for short helpdesk utterances; no external models.

/// Preprocesses raw text into lemmatized tokens.
pub fn preprocess(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(lemmatize)
        .collect()
}

/// Reduces a lowercase word to a base form with simple suffix rules.
fn lemmatize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        // "pharmacies" -> "pharmacy"
        if stem.len() > 1 {
            return format!("{}y", stem);
        }
    }

    if word.ends_with("sses") {
        // "illnesses" -> "illness"
        return word[..word.len() - 2].to_string();
    }

    for suffix in ["xes", "ches", "shes", "zes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }

    if word.len() > 3 && word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") {
        // Plain plural: "doctors" -> "doctor"
        return word[..word.len() - 1].to_string();
    }

    word.to_string()
}

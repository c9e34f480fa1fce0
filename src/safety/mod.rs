/// Safety filter gating the wellness chat
///
/// The filter is a pure text classifier over an injected trigger-term table
/// (medical conditions, drug names, crisis terms). Any term appearing as a
/// case-insensitive substring anywhere in the message blocks it with a fixed
/// locale-selected refusal. The assistant never answers medical queries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::Locale;

/// Built-in refusal shown when a locale has no configured message
const FALLBACK_REFUSAL: &str = "I am a wellness assistant, not a medical professional. \
    I cannot give advice on medical conditions. Please consult your doctor.";

/// Result of classifying one chat message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafetyVerdict {
    /// Whether the message may be answered
    pub safe: bool,
    /// The refusal to show the user; empty when safe
    pub block_message: String,
}

/// Serializable filter configuration
///
/// Kept as data rather than a hard-coded module constant so the term table
/// can be versioned and swapped without redeploying logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Terms that block a message when found as a substring
    pub trigger_terms: Vec<String>,
    /// Refusal text per locale
    pub refusals: HashMap<Locale, String>,
}

/// The chat safety filter
pub struct SafetyFilter {
    trigger_terms: Vec<String>,
    refusals: HashMap<Locale, String>,
}

impl SafetyFilter {
    /// Build a filter from an injected configuration table
    ///
    /// Terms are lowercased once here so `classify` only lowercases the
    /// message.
    pub fn from_config(config: SafetyConfig) -> Self {
        Self {
            trigger_terms: config
                .trigger_terms
                .into_iter()
                .map(|t| t.to_lowercase())
                .collect(),
            refusals: config.refusals,
        }
    }

    /// Classify a chat message
    ///
    /// Substring match, not word-boundary: a term inside a longer word still
    /// triggers. The first match short-circuits; list order never changes
    /// the outcome, only whether some match exists. Total over any string,
    /// no side effects.
    pub fn classify(&self, message: &str, locale: Locale) -> SafetyVerdict {
        let lowered = message.to_lowercase();

        for term in &self.trigger_terms {
            if lowered.contains(term.as_str()) {
                return SafetyVerdict {
                    safe: false,
                    block_message: self.refusal_for(locale).to_string(),
                };
            }
        }

        SafetyVerdict {
            safe: true,
            block_message: String::new(),
        }
    }

    /// Convenience check without producing a refusal
    pub fn is_medical_query(&self, message: &str) -> bool {
        !self.classify(message, Locale::En).safe
    }

    fn refusal_for(&self, locale: Locale) -> &str {
        self.refusals
            .get(&locale)
            .or_else(|| self.refusals.get(&Locale::En))
            .map(String::as_str)
            .unwrap_or(FALLBACK_REFUSAL)
    }
}

impl Default for SafetyFilter {
    /// The built-in bilingual (French + English) trigger table
    fn default() -> Self {
        let trigger_terms = [
            // French
            "diabète",
            "cancer",
            "hypertension",
            "médicament",
            "médicaments",
            "douleur",
            "insuline",
            "maladie",
            "maladies",
            "symptôme",
            "symptômes",
            "traitement",
            "prescription",
            "ordonnance",
            "diagnostic",
            "diagnostique",
            "médecin",
            "docteur",
            "hôpital",
            "urgence",
            "chirurgie",
            "opération",
            "thérapie",
            "pathologie",
            "chronique",
            "aiguë",
            "infection",
            "inflammation",
            "tumeur",
            "métastase",
            "chimiothérapie",
            "radiothérapie",
            // English
            "diabetes",
            "medical",
            "suicide",
            "depression",
            "medicine",
            "drug",
            "pain",
            "disease",
            "illness",
            "treatment",
            "medication",
            "diagnose",
            "diagnosis",
            "therapy",
            "symptoms",
            "condition",
            "sick",
            "doctor",
            "physician",
            "hospital",
            "emergency",
            "surgery",
            "chronic",
            "acute",
            "tumor",
            "metastasis",
            "chemotherapy",
            "radiotherapy",
            // Specific medications
            "metformin",
            "insulin",
            "aspirin",
            "ibuprofen",
            "paracetamol",
            "antibiotique",
            "antibiotic",
            "antidépresseur",
            "antidepressant",
            // Mental health (high risk)
            "suicidal",
            "self-harm",
            "harm myself",
            "kill myself",
            "mourir",
            "mort",
            "tuer",
            "suicidaire",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let mut refusals = HashMap::new();
        refusals.insert(
            Locale::En,
            "I am a wellness assistant, not a medical professional. I cannot give \
             advice on medical conditions. Please consult your doctor."
                .to_string(),
        );
        refusals.insert(
            Locale::Fr,
            "Je suis un assistant de bien-être, pas un professionnel de santé. Je ne \
             peux pas donner de conseils sur des conditions médicales. Veuillez \
             consulter votre médecin."
                .to_string(),
        );

        Self::from_config(SafetyConfig {
            trigger_terms,
            refusals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medical_message_is_blocked_case_insensitive() {
        let filter = SafetyFilter::default();

        let verdict = filter.classify("I have DIABETES", Locale::En);
        assert!(!verdict.safe);
        assert!(verdict.block_message.contains("wellness assistant"));
    }

    #[test]
    fn test_wellness_message_is_safe() {
        let filter = SafetyFilter::default();

        let verdict = filter.classify("How can I sleep better?", Locale::En);
        assert!(verdict.safe);
        assert!(verdict.block_message.is_empty());
    }

    #[test]
    fn test_substring_inside_longer_word_triggers() {
        let filter = SafetyFilter::default();

        // "condition" occurs inside "preconditions"
        assert!(filter.is_medical_query("what are the preconditions for this plan"));
    }

    #[test]
    fn test_french_refusal_selected() {
        let filter = SafetyFilter::default();

        let verdict = filter.classify("j'ai un diabète", Locale::Fr);
        assert!(!verdict.safe);
        assert!(verdict.block_message.contains("bien-être"));
    }

    #[test]
    fn test_missing_locale_falls_back_to_english() {
        let mut refusals = HashMap::new();
        refusals.insert(Locale::En, "english refusal".to_string());
        let filter = SafetyFilter::from_config(SafetyConfig {
            trigger_terms: vec!["cancer".to_string()],
            refusals,
        });

        let verdict = filter.classify("cancer", Locale::Fr);
        assert_eq!(verdict.block_message, "english refusal");
    }

    #[test]
    fn test_injected_table_replaces_builtin() {
        let filter = SafetyFilter::from_config(SafetyConfig {
            trigger_terms: vec!["forbidden".to_string()],
            refusals: HashMap::new(),
        });

        assert!(filter.classify("diabetes", Locale::En).safe);
        assert!(!filter.classify("this is FORBIDDEN", Locale::En).safe);
    }
}

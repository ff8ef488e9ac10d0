//! Meeting intent classification.
//!
//! Decides whether a chat message proposes a meeting using an ordered set of
//! compiled patterns. Negative patterns (past-tense or hypothetical mentions)
//! are always checked first and veto any positive match.

mod patterns;

pub use patterns::{IntentPattern, Polarity, DEFAULT_PATTERNS};

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct IntentDecision {
    pub has_intent: bool,
    /// Name of the pattern that decided the outcome, if any matched.
    pub matched_pattern: Option<&'static str>,
}

#[derive(Clone, Debug)]
pub struct IntentClassifier {
    patterns: Vec<IntentPattern>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::with_patterns(DEFAULT_PATTERNS.clone())
    }
}

impl IntentClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patterns(patterns: Vec<IntentPattern>) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &[IntentPattern] {
        &self.patterns
    }

    pub fn classify(&self, text: &str) -> bool {
        self.evaluate(text).has_intent
    }

    pub fn evaluate(&self, text: &str) -> IntentDecision {
        let normalized = normalize(text);
        if normalized.trim().is_empty() {
            return IntentDecision { has_intent: false, matched_pattern: None };
        }

        if let Some(pattern) = self.first_match(&normalized, Polarity::Negative) {
            return IntentDecision { has_intent: false, matched_pattern: Some(pattern.name()) };
        }

        match self.first_match(&normalized, Polarity::Positive) {
            Some(pattern) => IntentDecision { has_intent: true, matched_pattern: Some(pattern.name()) },
            None => IntentDecision { has_intent: false, matched_pattern: None },
        }
    }

    fn first_match(&self, normalized: &str, polarity: Polarity) -> Option<&IntentPattern> {
        self.patterns
            .iter()
            .filter(|pattern| pattern.polarity() == polarity)
            .find(|pattern| pattern.is_match(normalized))
    }
}

/// Classify with the built-in pattern set.
pub fn classify(text: &str) -> bool {
    IntentClassifier::default().classify(text)
}

fn normalize(text: &str) -> String {
    text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
}

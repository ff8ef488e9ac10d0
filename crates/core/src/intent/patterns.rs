use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// A match vetoes the message regardless of any positive match.
    Negative,
    Positive,
}

/// A named, compiled pattern applied to normalized message text.
#[derive(Clone, Debug)]
pub struct IntentPattern {
    name: &'static str,
    polarity: Polarity,
    regex: Regex,
}

impl IntentPattern {
    pub fn new(name: &'static str, polarity: Polarity, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self { name, polarity, regex: Regex::new(pattern)? })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn is_match(&self, normalized_text: &str) -> bool {
        self.regex.is_match(normalized_text)
    }
}

const PROPOSAL_PHRASES: &str =
    r"let's|lets|can\s+we|could\s+we|shall\s+we|schedule|set\s+up|arrange|organize|fix";
const PROPOSAL_MEETING_NOUNS: &str =
    r"meet|meeting|call|discussion|sync\s+up|connect|catch\s+up|get\s+together|plan";
const MEETING_NOUNS: &str = r"meet|meeting|call|discussion|connect|sync\s+up|catch\s+up";
const TIME_CUES: &str = r"now|today|tomorrow|next|this";
const DESIRE_VERBS: &str = r"plan|planning|try|want|need|like";
const DESIRED_MEETINGS: &str = r"meet|schedule|connect|have\s+a\s+call";
const HYPOTHETICAL_PHRASES: &str =
    r"should\s+have|would\s+have|could\s+have|should've|could've|would've|wish|wished";
const PAST_MEETING_PHRASES: &str = r"we\s+had|had\s+a\s+meeting|was\s+a\s+call";

/// Built-in patterns in evaluation order. Loose matching: the two halves of a
/// pattern may be separated by any text on the same line.
pub static DEFAULT_PATTERNS: Lazy<Vec<IntentPattern>> = Lazy::new(|| {
    let specs = [
        (
            "hypothetical_meeting",
            Polarity::Negative,
            format!(r"\b(?:{HYPOTHETICAL_PHRASES})\b.*\b(?:meeting|call|met)\b"),
        ),
        ("past_meeting", Polarity::Negative, format!(r"\b(?:{PAST_MEETING_PHRASES})\b")),
        (
            "proposal_then_meeting",
            Polarity::Positive,
            format!(r"\b(?:{PROPOSAL_PHRASES})\b.*\b(?:{PROPOSAL_MEETING_NOUNS})\b"),
        ),
        (
            "meeting_then_time_cue",
            Polarity::Positive,
            format!(r"\b(?:{MEETING_NOUNS})\b.*(?:\b(?:{TIME_CUES})\b|\bat\s+[0-9]{{1,2}})"),
        ),
        (
            "desire_then_meeting",
            Polarity::Positive,
            format!(r"\b(?:{DESIRE_VERBS})\b.*\b(?:to\s+)?(?:{DESIRED_MEETINGS})\b"),
        ),
    ];

    specs
        .into_iter()
        .map(|(name, polarity, pattern)| {
            IntentPattern::new(name, polarity, &pattern)
                .expect("built-in intent pattern should compile - this is a bug")
        })
        .collect()
});

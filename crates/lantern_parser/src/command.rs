//! Structured commands produced by the parser.

use std::fmt;

use crate::vocabulary::{WordKinds, WordRef};

/// A parsed command.
///
/// Built fresh for each input line and consumed once by dispatch. The raw
/// input is kept verbatim for diagnostics and for the fallback interpreter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructuredCommand {
    /// The verb, absent for a bare direction
    pub verb: Option<WordRef>,
    /// Direct object
    pub direct_object: Option<WordRef>,
    /// Adjective qualifying the direct object
    pub direct_adjective: Option<WordRef>,
    /// Preposition
    pub preposition: Option<WordRef>,
    /// Indirect object
    pub indirect_object: Option<WordRef>,
    /// Adjective qualifying the indirect object
    pub indirect_adjective: Option<WordRef>,
    /// Direction
    pub direction: Option<WordRef>,
    /// The original input, verbatim
    pub raw_text: String,
}

impl StructuredCommand {
    /// Creates an empty command for the given input.
    #[must_use]
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            verb: None,
            direct_object: None,
            direct_adjective: None,
            preposition: None,
            indirect_object: None,
            indirect_adjective: None,
            direction: None,
            raw_text: raw_text.into(),
        }
    }

    /// Canonical verb word, if any.
    #[must_use]
    pub fn verb_word(&self) -> Option<&str> {
        self.verb.as_ref().map(|w| w.word.as_str())
    }

    /// Canonical direct object word, if any.
    #[must_use]
    pub fn object_word(&self) -> Option<&str> {
        self.direct_object.as_ref().map(|w| w.word.as_str())
    }

    /// Canonical indirect object word, if any.
    #[must_use]
    pub fn indirect_word(&self) -> Option<&str> {
        self.indirect_object.as_ref().map(|w| w.word.as_str())
    }

    /// Canonical direction word, if any.
    #[must_use]
    pub fn direction_word(&self) -> Option<&str> {
        self.direction.as_ref().map(|w| w.word.as_str())
    }

    /// Where the command points: the direction slot, or else a direct object
    /// that is also tagged as a direction ("go north" when `north` is a noun
    /// too).
    #[must_use]
    pub fn heading(&self) -> Option<&str> {
        self.direction_word().or_else(|| {
            self.direct_object
                .as_ref()
                .filter(|w| w.is(WordKinds::DIRECTION))
                .map(|w| w.word.as_str())
        })
    }

    /// Compares every slot, ignoring the raw text.
    #[must_use]
    pub fn same_intent(&self, other: &Self) -> bool {
        self.verb == other.verb
            && self.direct_object == other.direct_object
            && self.direct_adjective == other.direct_adjective
            && self.preposition == other.preposition
            && self.indirect_object == other.indirect_object
            && self.indirect_adjective == other.indirect_adjective
            && self.direction == other.direction
    }
}

impl fmt::Display for StructuredCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = [
            ("verb", &self.verb),
            ("adj", &self.direct_adjective),
            ("obj", &self.direct_object),
            ("prep", &self.preposition),
            ("iadj", &self.indirect_adjective),
            ("iobj", &self.indirect_object),
            ("dir", &self.direction),
        ];
        let parts: Vec<String> = slots
            .iter()
            .filter_map(|(name, slot)| slot.as_ref().map(|w| format!("{name}={}", w.word)))
            .collect();
        write!(f, "[{}]", parts.join(" "))
    }
}

//! Fixed-shape command matching.
//!
//! After article removal every command is between one and six words long and
//! must fit one of the [`SHAPES`]. Shapes are tried in order and the first
//! one whose slots all accept the corresponding word wins, so a word carrying
//! several kinds takes whichever role completes a shape.

use crate::command::StructuredCommand;
use crate::vocabulary::{WordKinds, WordRef};

/// Longest command, in words, after article removal.
pub const MAX_WORDS: usize = 6;

/// The command slot a matched word fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// The verb
    Verb,
    /// Adjective of the direct object
    DirectAdjective,
    /// Direct object
    DirectObject,
    /// Preposition
    Preposition,
    /// Adjective of the indirect object
    IndirectAdjective,
    /// Indirect object
    IndirectObject,
    /// Direction
    Direction,
}

/// One position in a shape: the kind a word must carry and the role it fills.
#[derive(Clone, Copy, Debug)]
pub struct Slot {
    /// Required word kind
    pub kind: WordKinds,
    /// Role the word fills
    pub role: Role,
}

impl Slot {
    const fn new(kind: WordKinds, role: Role) -> Self {
        Self { kind, role }
    }
}

const VERB: Slot = Slot::new(WordKinds::VERB, Role::Verb);
const DIR: Slot = Slot::new(WordKinds::DIRECTION, Role::Direction);
const ADJ: Slot = Slot::new(WordKinds::ADJECTIVE, Role::DirectAdjective);
const OBJ: Slot = Slot::new(WordKinds::NOUN, Role::DirectObject);
const PREP: Slot = Slot::new(WordKinds::PREPOSITION, Role::Preposition);
const IADJ: Slot = Slot::new(WordKinds::ADJECTIVE, Role::IndirectAdjective);
const IOBJ: Slot = Slot::new(WordKinds::NOUN, Role::IndirectObject);

/// A recognized command shape.
#[derive(Clone, Copy, Debug)]
pub struct Shape {
    /// Short name, used in logs
    pub name: &'static str,
    /// Slots in word order
    pub slots: &'static [Slot],
}

impl Shape {
    /// Number of words the shape consumes.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if every word carries the kind its slot requires.
    #[must_use]
    pub fn accepts(&self, words: &[WordRef]) -> bool {
        words.len() == self.slots.len()
            && self
                .slots
                .iter()
                .zip(words)
                .all(|(slot, word)| word.is(slot.kind))
    }

    /// Fills a command from words this shape accepts.
    #[must_use]
    pub fn bind(&self, words: &[WordRef], raw_text: &str) -> StructuredCommand {
        let mut command = StructuredCommand::new(raw_text);
        for (slot, word) in self.slots.iter().zip(words) {
            let target = match slot.role {
                Role::Verb => &mut command.verb,
                Role::DirectAdjective => &mut command.direct_adjective,
                Role::DirectObject => &mut command.direct_object,
                Role::Preposition => &mut command.preposition,
                Role::IndirectAdjective => &mut command.indirect_adjective,
                Role::IndirectObject => &mut command.indirect_object,
                Role::Direction => &mut command.direction,
            };
            *target = Some(WordRef::clone(word));
        }
        command
    }
}

/// All recognized shapes, shortest and simplest first.
///
/// `verb noun noun` is the dative form ("give troll sword"): the first noun
/// is the recipient.
pub const SHAPES: &[Shape] = &[
    Shape { name: "direction", slots: &[DIR] },
    Shape { name: "verb", slots: &[VERB] },
    Shape { name: "verb-object", slots: &[VERB, OBJ] },
    Shape { name: "verb-direction", slots: &[VERB, DIR] },
    Shape { name: "verb-adjective-object", slots: &[VERB, ADJ, OBJ] },
    Shape { name: "verb-recipient-object", slots: &[VERB, IOBJ, OBJ] },
    Shape { name: "verb-preposition-object", slots: &[VERB, PREP, OBJ] },
    Shape { name: "verb-preposition-adjective-object", slots: &[VERB, PREP, ADJ, OBJ] },
    Shape { name: "verb-object-preposition-object", slots: &[VERB, OBJ, PREP, IOBJ] },
    Shape {
        name: "verb-adjective-object-preposition-object",
        slots: &[VERB, ADJ, OBJ, PREP, IOBJ],
    },
    Shape {
        name: "verb-object-preposition-adjective-object",
        slots: &[VERB, OBJ, PREP, IADJ, IOBJ],
    },
    Shape {
        name: "verb-adjective-object-preposition-adjective-object",
        slots: &[VERB, ADJ, OBJ, PREP, IADJ, IOBJ],
    },
];

/// Matches word sequences against [`SHAPES`].
pub struct ShapeMatcher;

impl ShapeMatcher {
    /// Returns the first shape that accepts the words.
    #[must_use]
    pub fn match_words(words: &[WordRef]) -> Option<&'static Shape> {
        if words.is_empty() || words.len() > MAX_WORDS {
            return None;
        }
        SHAPES.iter().find(|shape| shape.accepts(words))
    }
}

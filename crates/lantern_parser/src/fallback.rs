//! Natural-language fallback seam.
//!
//! When the fixed shapes fail, the parser may hand the raw text to an
//! external interpreter (a language model, a rule-based rewriter, ...). The
//! interpreter answers with plain words, which are resolved back through the
//! vocabulary table before anything is dispatched.

use crate::vocabulary::VocabularyTable;

/// Words an interpreter extracted from free-form input.
///
/// Every slot mirrors a [`StructuredCommand`](crate::command::StructuredCommand)
/// slot, plus the actor the command is addressed to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InterpretedCommand {
    /// Verb
    pub verb: Option<String>,
    /// Direct object
    pub object: Option<String>,
    /// Adjective of the direct object
    pub adjective: Option<String>,
    /// Preposition
    pub preposition: Option<String>,
    /// Indirect object
    pub indirect_object: Option<String>,
    /// Adjective of the indirect object
    pub indirect_adjective: Option<String>,
    /// Direction
    pub direction: Option<String>,
    /// Who the command is addressed to
    pub actor: Option<String>,
}

/// Interprets input the fixed-shape parser could not.
///
/// Calls are blocking; the interpreter owns any timeout policy.
pub trait FallbackInterpreter {
    /// Interprets `raw_text` using the active vocabulary, or returns `None`
    /// if it cannot make sense of it either.
    fn interpret(&mut self, raw_text: &str, table: &VocabularyTable)
    -> Option<InterpretedCommand>;
}

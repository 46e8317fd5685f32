//! Main parser pipeline.
//!
//! Tokenize, drop articles, look up every word, match a shape. When that
//! fails an optional [`FallbackInterpreter`] gets a chance at the raw text.

use thiserror::Error;
use tracing::debug;

use crate::command::StructuredCommand;
use crate::fallback::{FallbackInterpreter, InterpretedCommand};
use crate::syntax::ShapeMatcher;
use crate::tokenizer::InputTokenizer;
use crate::vocabulary::{VocabularyTable, WordKinds, WordRef};

/// Why an input line could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseFailure {
    /// A token has no vocabulary entry
    #[error("unknown word: {0:?}")]
    UnknownWord(String),
    /// The words are known but fit no shape
    #[error("no command shape matches")]
    NoPatternMatch,
}

/// A parse failure together with the input that caused it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{failure} in {raw_text:?}")]
pub struct ParseError {
    /// What went wrong
    pub failure: ParseFailure,
    /// The original input, verbatim
    pub raw_text: String,
}

impl ParseError {
    fn new(failure: ParseFailure, raw_text: &str) -> Self {
        Self {
            failure,
            raw_text: raw_text.to_string(),
        }
    }
}

/// How a command was obtained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseRoute {
    /// Matched one of the fixed shapes
    Pattern,
    /// Produced by the fallback interpreter
    Fallback {
        /// Who the interpreter says the command is addressed to, if anyone
        actor: Option<String>,
    },
}

/// A successfully parsed line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedInput {
    /// The command
    pub command: StructuredCommand,
    /// How it was obtained
    pub route: ParseRoute,
}

/// Parses player input against a vocabulary table.
#[derive(Clone, Copy, Debug)]
pub struct CommandParser<'t> {
    table: &'t VocabularyTable,
}

impl<'t> CommandParser<'t> {
    /// Creates a parser over the given table.
    #[must_use]
    pub fn new(table: &'t VocabularyTable) -> Self {
        Self { table }
    }

    /// Parses one line of input with the fixed shapes only.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFailure::UnknownWord`] for the first token with no
    /// entry, or [`ParseFailure::NoPatternMatch`] for empty, article-only,
    /// overlong or unshaped input.
    pub fn parse(&self, raw_text: &str) -> Result<StructuredCommand, ParseError> {
        let words = self.lookup_words(raw_text)?;

        match ShapeMatcher::match_words(&words) {
            Some(shape) => {
                let command = shape.bind(&words, raw_text);
                debug!(input = raw_text, shape = shape.name, %command, "parsed");
                Ok(command)
            }
            None => {
                debug!(input = raw_text, words = words.len(), "no shape matched");
                Err(ParseError::new(ParseFailure::NoPatternMatch, raw_text))
            }
        }
    }

    /// Parses with the fixed shapes, handing failures to the fallback.
    ///
    /// If the fallback cannot interpret the input either, or names a word the
    /// table does not know, the original failure is returned.
    ///
    /// # Errors
    ///
    /// Returns the fixed-shape [`ParseError`] when no route succeeds.
    pub fn parse_or_interpret(
        &self,
        raw_text: &str,
        fallback: Option<&mut dyn FallbackInterpreter>,
    ) -> Result<ParsedInput, ParseError> {
        let error = match self.parse(raw_text) {
            Ok(command) => {
                return Ok(ParsedInput {
                    command,
                    route: ParseRoute::Pattern,
                });
            }
            Err(error) => error,
        };

        let Some(fallback) = fallback else {
            return Err(error);
        };

        let Some(interpreted) = fallback.interpret(raw_text, self.table) else {
            debug!(input = raw_text, "fallback declined");
            return Err(error);
        };

        match self.resolve_interpreted(&interpreted, raw_text) {
            Some(command) => {
                debug!(input = raw_text, %command, "fallback interpreted");
                Ok(ParsedInput {
                    command,
                    route: ParseRoute::Fallback {
                        actor: interpreted.actor,
                    },
                })
            }
            None => {
                debug!(input = raw_text, "fallback produced unknown words");
                Err(error)
            }
        }
    }

    /// Lowercases the input and strips articles, keeping unknown words.
    ///
    /// Parsing the canonical form of a parsed command yields the same command.
    #[must_use]
    pub fn canonicalize(&self, raw_text: &str) -> String {
        InputTokenizer::tokenize(raw_text)
            .into_iter()
            .filter(|token| !self.is_article(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn is_article(&self, token: &str) -> bool {
        self.table
            .lookup(token)
            .is_some_and(|w| w.is(WordKinds::ARTICLE))
    }

    fn lookup_words(&self, raw_text: &str) -> Result<Vec<WordRef>, ParseError> {
        let mut words = Vec::new();
        for token in InputTokenizer::tokenize(raw_text) {
            match self.table.lookup(&token) {
                Some(word) if word.is(WordKinds::ARTICLE) => {}
                Some(word) => words.push(WordRef::clone(word)),
                None => {
                    debug!(input = raw_text, token = %token, "unknown word");
                    return Err(ParseError::new(ParseFailure::UnknownWord(token), raw_text));
                }
            }
        }
        Ok(words)
    }

    fn resolve_interpreted(
        &self,
        interpreted: &InterpretedCommand,
        raw_text: &str,
    ) -> Option<StructuredCommand> {
        let resolve = |slot: &Option<String>, kinds: WordKinds| -> Option<Option<WordRef>> {
            match slot {
                None => Some(None),
                Some(text) => {
                    let word = self.table.lookup(text)?;
                    word.is(kinds).then(|| Some(WordRef::clone(word)))
                }
            }
        };

        let command = StructuredCommand {
            verb: resolve(&interpreted.verb, WordKinds::VERB)?,
            direct_object: resolve(&interpreted.object, WordKinds::NOUN)?,
            direct_adjective: resolve(&interpreted.adjective, WordKinds::ADJECTIVE)?,
            preposition: resolve(&interpreted.preposition, WordKinds::PREPOSITION)?,
            indirect_object: resolve(&interpreted.indirect_object, WordKinds::NOUN)?,
            indirect_adjective: resolve(&interpreted.indirect_adjective, WordKinds::ADJECTIVE)?,
            direction: resolve(&interpreted.direction, WordKinds::DIRECTION)?,
            raw_text: raw_text.to_string(),
        };

        (command.verb.is_some() || command.direction.is_some()).then_some(command)
    }
}

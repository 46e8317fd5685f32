//! Command parser for interactive fiction.
//!
//! This crate turns player input like "take the rusty sword" or
//! "put lamp in box" into a [`StructuredCommand`].
//!
//! # Architecture
//!
//! ```text
//! "take the rusty sword"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   TOKENIZER     │  → ["take", "the", "rusty", "sword"]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ VOCABULARY      │  → [Verb(take), Article, Adj(rusty), Noun(sword)]
//! │ LOOKUP          │     (articles dropped, unknown word = failure)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ SHAPE           │  → verb-adjective-object
//! │ MATCHING        │
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ STRUCTURED      │  → { verb: take, direct_adjective: rusty,
//! │ COMMAND         │      direct_object: sword, raw_text: ... }
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`vocabulary`] - Word records, tiered fragments, and the merged table
//! - [`tokenizer`] - Convert raw input to lowercase words
//! - [`syntax`] - The fixed command shapes and the matcher
//! - [`parser`] - Parser pipeline and typed failures
//! - [`command`] - The structured command
//! - [`fallback`] - Seam for an external natural-language interpreter
//! - [`stdlib`] - Standard core-tier vocabulary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod fallback;
pub mod parser;
pub mod stdlib;
pub mod syntax;
pub mod tokenizer;
pub mod vocabulary;

// Re-export main types for convenience
pub use command::StructuredCommand;
pub use fallback::{FallbackInterpreter, InterpretedCommand};
pub use parser::{CommandParser, ParseError, ParseFailure, ParseRoute, ParsedInput};
pub use vocabulary::{VocabularyFragment, VocabularyTable, WordKinds, WordRecord, WordRef};

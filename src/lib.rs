//! Lantern - Command interpretation core for interactive fiction
//!
//! This crate re-exports all layers of the Lantern system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: lantern_runtime    - REPL, CLI, session undo, demo game
//! Layer 2: lantern_engine     - Module registry, handler chains, entity behaviors
//! Layer 1: lantern_parser     - Vocabulary, tokenizer, syntax patterns, parser
//! Layer 0: lantern_foundation - Core types (EntityId, Error)
//! ```

pub use lantern_engine as engine;
pub use lantern_foundation as foundation;
pub use lantern_parser as parser;
pub use lantern_runtime as runtime;

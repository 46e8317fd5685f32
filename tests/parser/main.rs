//! Integration tests for the lantern_parser crate.
//!
//! Tests for the command parsing pipeline:
//! - Tokenization and article removal
//! - Tiered vocabulary merge
//! - Shape matching
//! - Fallback interpretation
//! - Parsing invariants (property tests)

mod common;
mod fallback_tests;
mod properties;
mod scenario_tests;
mod vocabulary_tests;

//! Integration tests across all Lantern layers.
//!
//! Tests that exercise the full turn cycle on the demo game:
//! - Parsing through the merged module vocabulary
//! - Tiered dispatch with declining overrides
//! - Entity behaviors vetoing staged changes
//! - Session undo and reload

mod demo_scenarios;
mod session_tests;

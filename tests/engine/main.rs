//! Integration tests for the lantern_engine crate.
//!
//! Tests for tiered behavior dispatch:
//! - Module discovery and registry build
//! - Handler chain order, decline and delegation
//! - Entity behaviors, vetoes and the behavior cache
//! - Full turns through the engine

mod common;
mod registry_tests;

//! REPL, CLI, and demo game for Lantern.
//!
//! This crate provides:
//! - [`Repl`] - Interactive read-eval-print loop over a [`Session`]
//! - [`Session`] - Engine, world, and undo history
//! - [`DemoWorld`] - A small persistent world implementing [`BehaviorSource`]
//! - [`demo`] - Built-in, library, and game behavior modules for the forge demo
//!
//! [`BehaviorSource`]: lantern_engine::BehaviorSource

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod demo;
pub mod editor;
pub mod logging;
pub mod repl;
pub mod session;
pub mod world;

pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::{Repl, run_batch};
pub use session::{META_COMMANDS, Session, SessionConfig};
pub use world::{DemoWorld, Placement, Reach, Room, Thing};

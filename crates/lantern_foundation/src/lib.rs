//! Core identifiers and error types for Lantern.
//!
//! This crate provides:
//! - [`EntityId`] - Generational entity identifiers handed out by world storage
//! - [`Error`] - Authoring errors with context, raised at load or first use

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod error;

pub use entity::EntityId;
pub use error::{Error, ErrorContext, ErrorKind, Result};

//! Tiered behavior dispatch for Lantern.
//!
//! This crate provides:
//! - [`ModuleRegistry`] - Module discovery, tier assignment, vocabulary merge
//! - [`HandlerChain`] - Per-verb handlers in tier order, with [`Next`] delegation
//! - [`BehaviorCache`] - Resolution of per-entity `on_<verb>` bindings
//! - [`Engine`] - Parse, dispatch, veto, apply: one turn at a time
//!
//! The engine is generic over an opaque world type `W`. Handlers and entity
//! event functions receive `&mut W`; the engine itself only asks the world for
//! an entity's bindings, through [`BehaviorSource`].
//!
//! ```text
//! game/                     root
//! ├── anvil                 tier 1  game modules win
//! └── lib/
//!     ├── proximity         tier 2  shared libraries
//!     └── core/
//!         └── take          tier 3  engine built-ins
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod behavior;
pub mod chain;
pub mod config;
pub mod engine;
pub mod handler;
pub mod module;
pub mod registry;

pub use behavior::{
    BehaviorCache, BehaviorRef, BehaviorSource, EntityBehaviors, EntityEventFn, EventContext,
    EventKind, EventResult, invoke_entity_event,
};
pub use chain::{Dispatch, HandlerChain, HandlerEntry, Next};
pub use config::EngineConfig;
pub use engine::{ActionReport, Engine, TurnOutcome};
pub use handler::{CommandHandler, HandlerOutcome, HandlerResult, StateChange, handler};
pub use module::{
    BehaviorModule, ModuleFactory, ModuleSource, StaticModuleSource, Tier, normalize_path,
    relative_path, tier_of,
};
pub use registry::{ModuleDescriptor, ModuleRegistry, RegistryBuilder, discover};

//! Behavior modules and where they come from.
//!
//! A module bundles an optional vocabulary fragment, verb handlers keyed by
//! verb, and named entity event functions. Modules are collected from a
//! [`ModuleSource`]; a module's tier is its depth below the behavior root.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use lantern_foundation::{EntityId, Error, ErrorKind, Result};
use lantern_parser::{StructuredCommand, VocabularyFragment};

use crate::behavior::{EntityEventFn, EventContext, EventResult};
use crate::chain::Next;
use crate::handler::{CommandHandler, HandlerOutcome};

// =============================================================================
// Tier
// =============================================================================

/// A precedence tier. Tier 1 is the most specific and wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tier(u32);

impl Tier {
    /// The game's own modules, directly under the behavior root.
    pub const GAME: Self = Self(1);

    /// Creates a tier.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidTier`] for zero.
    pub fn new(tier: u32) -> Result<Self> {
        if tier == 0 {
            return Err(Error::new(ErrorKind::InvalidTier(tier)));
        }
        Ok(Self(tier))
    }

    /// The numeric tier.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Paths
// =============================================================================

/// Normalizes a module path: forward slashes, no empty segments.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    path.split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Returns the module's path relative to the behavior root.
///
/// An empty root accepts every path unchanged.
///
/// # Errors
///
/// Returns [`ErrorKind::ModuleOutsideRoot`] if the path does not lie under
/// the root, or names the root itself.
pub fn relative_path(path: &str, root: &str) -> Result<String> {
    let path = normalize_path(path);
    let root = normalize_path(root);
    let outside = || {
        Error::new(ErrorKind::ModuleOutsideRoot {
            path: path.clone(),
            root: root.clone(),
        })
    };

    if root.is_empty() {
        return if path.is_empty() { Err(outside()) } else { Ok(path.clone()) };
    }
    match path.strip_prefix(&root).and_then(|rest| rest.strip_prefix('/')) {
        Some(rest) if !rest.is_empty() => Ok(rest.to_string()),
        _ => Err(outside()),
    }
}

/// Computes a module's tier: its depth below the root, plus one.
///
/// `game/anvil` under root `game` is tier 1, `game/lib/core/take` is tier 3.
///
/// # Errors
///
/// Returns [`ErrorKind::ModuleOutsideRoot`] if the path does not lie under
/// the root.
pub fn tier_of(path: &str, root: &str) -> Result<Tier> {
    let relative = relative_path(path, root)?;
    let depth = relative.matches('/').count();
    let depth = u32::try_from(depth)
        .map_err(|_| Error::new(ErrorKind::Internal(format!("module path too deep: {relative}"))))?;
    Tier::new(depth + 1)
}

// =============================================================================
// Behavior Module
// =============================================================================

/// One behavior module.
pub struct BehaviorModule<W> {
    path: String,
    vocabulary: Option<VocabularyFragment>,
    handlers: Vec<(String, CommandHandler<W>)>,
    events: BTreeMap<String, EntityEventFn<W>>,
}

impl<W> BehaviorModule<W> {
    /// Creates an empty module at the given path.
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self {
            path: normalize_path(path),
            vocabulary: None,
            handlers: Vec::new(),
            events: BTreeMap::new(),
        }
    }

    /// Sets the module's vocabulary fragment.
    #[must_use]
    pub fn with_vocabulary(mut self, fragment: VocabularyFragment) -> Self {
        self.vocabulary = Some(fragment);
        self
    }

    /// Registers a handler for a verb. The verb may be any spelling the merged
    /// vocabulary knows; it is canonicalized when the registry is built.
    ///
    /// Registering the same verb again adds a second handler behind the
    /// first.
    #[must_use]
    pub fn with_handler<F>(mut self, verb: &str, f: F) -> Self
    where
        F: Fn(&mut W, &StructuredCommand, Next<'_, W>) -> HandlerOutcome<W> + 'static,
    {
        let handler: CommandHandler<W> = Rc::new(f);
        self.handlers.push((verb.to_lowercase(), handler));
        self
    }

    /// Exports an entity event function under the given name.
    #[must_use]
    pub fn with_event<F>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(EntityId, &mut W, &EventContext<'_>) -> EventResult + 'static,
    {
        self.events.insert(name.to_string(), Rc::new(f));
        self
    }

    /// The module path as declared.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The vocabulary fragment, if any.
    #[must_use]
    pub fn vocabulary(&self) -> Option<&VocabularyFragment> {
        self.vocabulary.as_ref()
    }

    /// Handlers with their verbs, in declaration order.
    pub fn handlers(&self) -> impl Iterator<Item = (&str, &CommandHandler<W>)> {
        self.handlers.iter().map(|(verb, h)| (verb.as_str(), h))
    }

    /// Looks up an exported entity event function.
    #[must_use]
    pub fn event(&self, name: &str) -> Option<&EntityEventFn<W>> {
        self.events.get(name)
    }
}

impl<W> fmt::Debug for BehaviorModule<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorModule")
            .field("path", &self.path)
            .field("words", &self.vocabulary.as_ref().map_or(0, VocabularyFragment::len))
            .field("handlers", &self.handlers.iter().map(|(verb, _)| verb).collect::<Vec<_>>())
            .field("events", &self.events.keys().collect::<Vec<_>>())
            .finish()
    }
}

// =============================================================================
// Module Sources
// =============================================================================

/// Something that can enumerate behavior modules.
///
/// Called once per registry build, so a reload sees fresh modules.
pub trait ModuleSource<W> {
    /// Produces every module, in discovery order.
    fn modules(&self) -> Vec<BehaviorModule<W>>;
}

/// Builds one module.
pub type ModuleFactory<W> = fn() -> BehaviorModule<W>;

/// A compiled-in table of module factories.
pub struct StaticModuleSource<W> {
    factories: Vec<ModuleFactory<W>>,
}

impl<W> StaticModuleSource<W> {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Adds a factory.
    #[must_use]
    pub fn with(mut self, factory: ModuleFactory<W>) -> Self {
        self.factories.push(factory);
        self
    }

    /// Number of registered factories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl<W> Default for StaticModuleSource<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> ModuleSource<W> for StaticModuleSource<W> {
    fn modules(&self) -> Vec<BehaviorModule<W>> {
        self.factories.iter().map(|factory| factory()).collect()
    }
}

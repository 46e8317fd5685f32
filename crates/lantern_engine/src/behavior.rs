//! Entity behaviors: per-entity `on_<verb>` bindings and their resolution.
//!
//! An entity carries a map from event name to a `module:function` reference.
//! After a handler targets the entity, the engine looks up the binding for
//! the verb's event, resolves it through the registry (memoized in a
//! [`BehaviorCache`]), and lets the function allow, veto, or re-narrate.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use lantern_foundation::{EntityId, Error, Result};
use lantern_parser::StructuredCommand;

use crate::module::normalize_path;
use crate::registry::ModuleRegistry;

// =============================================================================
// Event Kinds
// =============================================================================

/// The entity event raised for a verb, named `on_<verb>`.
///
/// The registry builds one per canonical verb when it loads, so turn
/// processing never formats event names.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventKind {
    verb: String,
    name: String,
}

impl EventKind {
    /// The event for a canonical verb.
    #[must_use]
    pub fn for_verb(verb: &str) -> Self {
        Self {
            verb: verb.to_string(),
            name: format!("on_{verb}"),
        }
    }

    /// The verb that raises this event.
    #[must_use]
    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// The binding name, e.g. `on_take`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// =============================================================================
// Bindings
// =============================================================================

/// An entity's event bindings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityBehaviors {
    bindings: BTreeMap<String, String>,
}

impl EntityBehaviors {
    /// Creates an empty binding map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds an event name to a `module:function` reference.
    #[must_use]
    pub fn bind(mut self, event: &str, reference: &str) -> Self {
        self.insert(event, reference);
        self
    }

    /// Binds in place, replacing any previous binding for the event.
    pub fn insert(&mut self, event: &str, reference: &str) {
        self.bindings.insert(event.to_string(), reference.to_string());
    }

    /// The reference bound to an event, if any.
    #[must_use]
    pub fn get(&self, event: &str) -> Option<&str> {
        self.bindings.get(event).map(String::as_str)
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// `(event, reference)` pairs in event-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(e, r)| (e.as_str(), r.as_str()))
    }
}

/// A parsed `module:function` reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BehaviorRef {
    /// Module identifier, relative to the behavior root
    pub module: String,
    /// Exported function name
    pub function: String,
}

impl BehaviorRef {
    /// Parses a reference.
    ///
    /// # Errors
    ///
    /// Returns a malformed-reference error unless the text is exactly one
    /// non-empty module and one non-empty function joined by a colon.
    pub fn parse(reference: &str) -> Result<Self> {
        let malformed = || Error::malformed_reference(reference);
        let (module, function) = reference.split_once(':').ok_or_else(malformed)?;
        let module = normalize_path(module.trim());
        let function = function.trim();
        if module.is_empty() || function.is_empty() || function.contains(':') {
            return Err(malformed());
        }
        Ok(Self {
            module,
            function: function.to_string(),
        })
    }
}

impl fmt::Display for BehaviorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.function)
    }
}

/// Access to entity bindings in the game world.
pub trait BehaviorSource {
    /// The bindings carried by an entity, if it has any.
    fn behaviors(&self, entity: EntityId) -> Option<&EntityBehaviors>;
}

// =============================================================================
// Event Functions
// =============================================================================

/// What an entity event function decided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventResult {
    /// False vetoes the action
    pub allow: bool,
    /// Replacement narration, if any
    pub message: Option<String>,
}

impl EventResult {
    /// Lets the action proceed unchanged.
    #[must_use]
    pub fn allow() -> Self {
        Self {
            allow: true,
            message: None,
        }
    }

    /// Lets the action proceed with new narration.
    #[must_use]
    pub fn allow_with(message: impl Into<String>) -> Self {
        Self {
            allow: true,
            message: Some(message.into()),
        }
    }

    /// Vetoes the action with a message.
    #[must_use]
    pub fn deny(message: impl Into<String>) -> Self {
        Self {
            allow: false,
            message: Some(message.into()),
        }
    }

    /// Vetoes the action, leaving the message to the engine default.
    #[must_use]
    pub fn deny_silently() -> Self {
        Self {
            allow: false,
            message: None,
        }
    }
}

/// What an event function sees besides the entity and the world.
#[derive(Clone, Copy, Debug)]
pub struct EventContext<'a> {
    /// The event being raised
    pub event: &'a EventKind,
    /// The command that triggered it
    pub command: &'a StructuredCommand,
    /// The handler's narration, before any override
    pub message: &'a str,
}

/// An exported entity event function.
pub type EntityEventFn<W> = Rc<dyn Fn(EntityId, &mut W, &EventContext<'_>) -> EventResult>;

// =============================================================================
// Behavior Cache
// =============================================================================

/// Memoizes reference resolution across turns.
///
/// Cleared whenever the registry is rebuilt.
pub struct BehaviorCache<W> {
    resolved: HashMap<String, EntityEventFn<W>>,
}

impl<W> BehaviorCache<W> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            resolved: HashMap::new(),
        }
    }

    /// Resolves a reference, consulting the registry on a miss.
    ///
    /// # Errors
    ///
    /// Returns the registry's resolution error. Failures are not cached.
    pub fn resolve(
        &mut self,
        reference: &str,
        registry: &ModuleRegistry<W>,
    ) -> Result<EntityEventFn<W>> {
        if let Some(function) = self.resolved.get(reference) {
            trace!(reference, "behavior cache hit");
            return Ok(EntityEventFn::clone(function));
        }
        let parsed = BehaviorRef::parse(reference)?;
        let function = registry.resolve_event(&parsed)?;
        debug!(reference, "behavior resolved");
        self.resolved
            .insert(reference.to_string(), EntityEventFn::clone(&function));
        Ok(function)
    }

    /// Returns true if the reference has been resolved before.
    #[must_use]
    pub fn contains(&self, reference: &str) -> bool {
        self.resolved.contains_key(reference)
    }

    /// Number of cached references.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// Forgets every resolution.
    pub fn clear(&mut self) {
        debug!(entries = self.resolved.len(), "behavior cache cleared");
        self.resolved.clear();
    }
}

impl<W> Default for BehaviorCache<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> fmt::Debug for BehaviorCache<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.resolved.keys().collect();
        keys.sort();
        f.debug_struct("BehaviorCache").field("resolved", &keys).finish()
    }
}

/// Raises an entity event.
///
/// Returns `Ok(None)` when the entity has no binding for the event, so the
/// action proceeds untouched.
///
/// # Errors
///
/// Returns an authoring error if the binding cannot be resolved.
pub fn invoke_entity_event<W: BehaviorSource>(
    entity: EntityId,
    world: &mut W,
    context: &EventContext<'_>,
    registry: &ModuleRegistry<W>,
    cache: &mut BehaviorCache<W>,
) -> Result<Option<EventResult>> {
    let Some(reference) = world
        .behaviors(entity)
        .and_then(|b| b.get(context.event.name()))
        .map(str::to_string)
    else {
        return Ok(None);
    };

    let function = cache
        .resolve(&reference, registry)
        .map_err(|e| e.with_frame(format!("resolving {} for {entity}", context.event)))?;
    let result = function(entity, world, context);
    debug!(%entity, event = %context.event, allow = result.allow, "entity event");
    Ok(Some(result))
}

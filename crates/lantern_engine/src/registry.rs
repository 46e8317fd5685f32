//! The behavior registry.
//!
//! Modules are collected with their tiers, then built once into an immutable
//! [`ModuleRegistry`]: the merged vocabulary, one [`HandlerChain`] per
//! canonical verb, the [`EventKind`] for each verb, and an index for
//! resolving `module:function` references.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use lantern_foundation::{Error, ErrorContext, ErrorKind, Result};
use lantern_parser::{VocabularyTable, WordKinds};

use crate::behavior::{BehaviorRef, EntityEventFn, EventKind};
use crate::chain::{HandlerChain, HandlerEntry};
use crate::module::{BehaviorModule, ModuleSource, Tier, normalize_path, relative_path, tier_of};

/// A module placed at a tier.
#[derive(Debug)]
pub struct ModuleDescriptor<W> {
    /// Identifier used in behavior references
    pub id: String,
    /// Precedence tier
    pub tier: Tier,
    /// The module itself
    pub module: BehaviorModule<W>,
}

/// Collects modules from a source and assigns tiers by depth below `root`.
///
/// The result is ordered by tier, most specific first, keeping source order
/// within a tier.
///
/// # Errors
///
/// Returns [`ErrorKind::ModuleOutsideRoot`] for any module not under `root`.
pub fn discover<W>(source: &dyn ModuleSource<W>, root: &str) -> Result<Vec<ModuleDescriptor<W>>> {
    let mut descriptors = Vec::new();
    for module in source.modules() {
        let id = relative_path(module.path(), root)?;
        let tier = tier_of(module.path(), root)?;
        debug!(module = %id, %tier, "discovered module");
        descriptors.push(ModuleDescriptor { id, tier, module });
    }
    descriptors.sort_by_key(|d| d.tier);
    Ok(descriptors)
}

// =============================================================================
// Registry Builder
// =============================================================================

/// Accumulates modules before building a [`ModuleRegistry`].
pub struct RegistryBuilder<W> {
    descriptors: Vec<ModuleDescriptor<W>>,
}

impl<W> RegistryBuilder<W> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    /// Adds every module from a source, tiered by depth below `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ModuleOutsideRoot`] for any module not under `root`.
    pub fn discover(mut self, source: &dyn ModuleSource<W>, root: &str) -> Result<Self> {
        self.descriptors.extend(discover(source, root)?);
        Ok(self)
    }

    /// Adds a module at an explicit tier. Its path is used as its identifier.
    #[must_use]
    pub fn register(mut self, tier: Tier, module: BehaviorModule<W>) -> Self {
        let id = normalize_path(module.path());
        self.descriptors.push(ModuleDescriptor { id, tier, module });
        self
    }

    /// Builds the registry.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::DuplicateModule`] if two modules share an identifier.
    /// - Vocabulary merge errors from the combined module fragments.
    pub fn build(mut self) -> Result<ModuleRegistry<W>> {
        self.descriptors.sort_by_key(|d| d.tier);

        let mut by_id = HashMap::new();
        for (index, descriptor) in self.descriptors.iter().enumerate() {
            if by_id.insert(descriptor.id.clone(), index).is_some() {
                return Err(Error::new(ErrorKind::DuplicateModule(descriptor.id.clone()))
                    .with_context(ErrorContext::new().with_tier(descriptor.tier.get())));
            }
        }

        let vocabulary = VocabularyTable::merge(
            self.descriptors
                .iter()
                .filter_map(|d| d.module.vocabulary().map(|v| (d.tier.get(), v))),
        )
        .map_err(|e| e.with_frame("merging module vocabularies"))?;

        let mut chains: HashMap<String, HandlerChain<W>> = HashMap::new();
        for descriptor in &self.descriptors {
            for (verb, handler) in descriptor.module.handlers() {
                let canonical = match vocabulary.lookup(verb) {
                    Some(record) if record.is(WordKinds::VERB) => record.word.clone(),
                    _ => {
                        warn!(
                            module = %descriptor.id,
                            verb,
                            "handler registered for a word that is not a known verb"
                        );
                        verb.to_string()
                    }
                };
                chains
                    .entry(canonical.clone())
                    .or_insert_with(|| HandlerChain::new(canonical))
                    .push(HandlerEntry::new(
                        descriptor.tier,
                        descriptor.id.clone(),
                        handler.clone(),
                    ));
            }
        }

        let events = vocabulary
            .verbs()
            .iter()
            .map(|record| (record.word.clone(), EventKind::for_verb(&record.word)))
            .collect();

        info!(
            modules = self.descriptors.len(),
            words = vocabulary.len(),
            verbs = chains.len(),
            "behavior registry built"
        );

        Ok(ModuleRegistry {
            descriptors: self.descriptors,
            by_id,
            vocabulary,
            chains,
            events,
        })
    }
}

impl<W> Default for RegistryBuilder<W> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Module Registry
// =============================================================================

/// Everything loaded from the behavior modules. Immutable once built.
pub struct ModuleRegistry<W> {
    descriptors: Vec<ModuleDescriptor<W>>,
    by_id: HashMap<String, usize>,
    vocabulary: VocabularyTable,
    chains: HashMap<String, HandlerChain<W>>,
    events: HashMap<String, EventKind>,
}

impl<W> ModuleRegistry<W> {
    /// Starts a builder.
    #[must_use]
    pub fn builder() -> RegistryBuilder<W> {
        RegistryBuilder::new()
    }

    /// Discovers and builds in one step.
    ///
    /// # Errors
    ///
    /// Returns any discovery or build error.
    pub fn load(source: &dyn ModuleSource<W>, root: &str) -> Result<Self> {
        RegistryBuilder::new().discover(source, root)?.build()
    }

    /// The merged vocabulary.
    #[must_use]
    pub fn vocabulary(&self) -> &VocabularyTable {
        &self.vocabulary
    }

    /// The handler chain for a canonical verb.
    #[must_use]
    pub fn chain(&self, verb: &str) -> Option<&HandlerChain<W>> {
        self.chains.get(verb)
    }

    /// Canonical verbs that have at least one handler, sorted.
    #[must_use]
    pub fn handled_verbs(&self) -> Vec<&str> {
        let mut verbs: Vec<&str> = self.chains.keys().map(String::as_str).collect();
        verbs.sort_unstable();
        verbs
    }

    /// The entity event raised for a canonical verb.
    #[must_use]
    pub fn event_for(&self, verb: &str) -> Option<&EventKind> {
        self.events.get(verb)
    }

    /// Loaded modules, most specific tier first.
    #[must_use]
    pub fn modules(&self) -> &[ModuleDescriptor<W>] {
        &self.descriptors
    }

    /// Looks up a module by identifier.
    #[must_use]
    pub fn module(&self, id: &str) -> Option<&ModuleDescriptor<W>> {
        self.by_id.get(id).map(|&index| &self.descriptors[index])
    }

    /// Resolves a behavior reference to the exported function.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnknownModule`] or [`ErrorKind::UnknownFunction`].
    pub fn resolve_event(&self, reference: &BehaviorRef) -> Result<EntityEventFn<W>> {
        let descriptor = self
            .module(&reference.module)
            .ok_or_else(|| Error::unknown_module(&reference.module))?;
        descriptor
            .module
            .event(&reference.function)
            .cloned()
            .ok_or_else(|| {
                Error::unknown_function(&reference.module, &reference.function).with_context(
                    ErrorContext::new()
                        .with_module(&descriptor.id)
                        .with_tier(descriptor.tier.get()),
                )
            })
    }
}

impl<W> std::fmt::Debug for ModuleRegistry<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("modules", &self.descriptors.iter().map(|d| &d.id).collect::<Vec<_>>())
            .field("words", &self.vocabulary.len())
            .field("verbs", &self.handled_verbs())
            .finish()
    }
}

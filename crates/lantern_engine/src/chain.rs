//! Per-verb handler chains.
//!
//! A chain lists every handler registered for one canonical verb, grouped by
//! tier with tier 1 first. Within a tier handlers keep registration order.
//! Dispatch walks the chain until a handler claims the command; a handler
//! may also delegate explicitly by running its [`Next`].

use tracing::trace;

use lantern_parser::StructuredCommand;

use crate::handler::{CommandHandler, HandlerOutcome, HandlerResult};
use crate::module::Tier;

/// One handler in a chain, with the module that contributed it.
pub struct HandlerEntry<W> {
    /// Precedence tier of the contributing module
    pub tier: Tier,
    /// Identifier of the contributing module
    pub module: String,
    handler: CommandHandler<W>,
}

impl<W> HandlerEntry<W> {
    /// Creates an entry.
    #[must_use]
    pub fn new(tier: Tier, module: impl Into<String>, handler: CommandHandler<W>) -> Self {
        Self {
            tier,
            module: module.into(),
            handler,
        }
    }
}

impl<W> Clone for HandlerEntry<W> {
    fn clone(&self) -> Self {
        Self {
            tier: self.tier,
            module: self.module.clone(),
            handler: CommandHandler::clone(&self.handler),
        }
    }
}

impl<W> std::fmt::Debug for HandlerEntry<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("tier", &self.tier)
            .field("module", &self.module)
            .finish_non_exhaustive()
    }
}

/// Ordered handlers for a single canonical verb.
#[derive(Debug)]
pub struct HandlerChain<W> {
    verb: String,
    entries: Vec<HandlerEntry<W>>,
}

impl<W> HandlerChain<W> {
    /// Creates an empty chain.
    #[must_use]
    pub fn new(verb: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            entries: Vec::new(),
        }
    }

    /// Adds an entry after every entry of the same or a more specific tier.
    pub fn push(&mut self, entry: HandlerEntry<W>) {
        let at = self.entries.partition_point(|e| e.tier <= entry.tier);
        self.entries.insert(at, entry);
    }

    /// The canonical verb.
    #[must_use]
    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// Entries in dispatch order.
    #[must_use]
    pub fn entries(&self) -> &[HandlerEntry<W>] {
        &self.entries
    }

    /// Number of handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Offers the command to each handler in order.
    pub fn dispatch(&self, world: &mut W, command: &StructuredCommand) -> Dispatch<W> {
        run(&self.entries, world, command)
    }
}

fn run<W>(entries: &[HandlerEntry<W>], world: &mut W, command: &StructuredCommand) -> Dispatch<W> {
    for (index, entry) in entries.iter().enumerate() {
        trace!(tier = %entry.tier, module = %entry.module, "offering command");
        let next = Next {
            rest: &entries[index + 1..],
        };
        match (entry.handler)(world, command, next) {
            HandlerOutcome::Handled(result) => {
                return Dispatch::Handled {
                    result,
                    tier: entry.tier,
                    module: entry.module.clone(),
                };
            }
            HandlerOutcome::Declined => {
                trace!(module = %entry.module, "declined");
            }
        }
    }
    Dispatch::NoHandler
}

// =============================================================================
// Delegation
// =============================================================================

/// The remainder of a chain, handed to each handler.
///
/// Running it offers the command to every less specific handler, which lets
/// an override wrap or post-process the default behavior.
pub struct Next<'a, W> {
    rest: &'a [HandlerEntry<W>],
}

impl<W> Next<'_, W> {
    /// Dispatches the command to the remaining handlers.
    pub fn run(self, world: &mut W, command: &StructuredCommand) -> Dispatch<W> {
        run(self.rest, world, command)
    }

    /// Number of handlers left.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rest.len()
    }

    /// Returns true at the end of the chain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }
}

/// Result of walking a chain.
#[derive(Debug)]
pub enum Dispatch<W> {
    /// A handler claimed the command
    Handled {
        /// What the handler decided
        result: HandlerResult<W>,
        /// Tier of the module that claimed it
        tier: Tier,
        /// Module that claimed it
        module: String,
    },
    /// Every handler declined, or the chain was empty
    NoHandler,
}

impl<W> Dispatch<W> {
    /// Returns true if some handler claimed the command.
    #[must_use]
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled { .. })
    }

    /// Drops the provenance, keeping only the handler result.
    #[must_use]
    pub fn into_result(self) -> Option<HandlerResult<W>> {
        match self {
            Self::Handled { result, .. } => Some(result),
            Self::NoHandler => None,
        }
    }

    /// Converts back into a handler outcome, so a delegating handler can
    /// return whatever the rest of the chain decided.
    #[must_use]
    pub fn into_outcome(self) -> HandlerOutcome<W> {
        match self.into_result() {
            Some(result) => HandlerOutcome::Handled(result),
            None => HandlerOutcome::Declined,
        }
    }
}

//! Turn processing.
//!
//! One call to [`Engine::process`] runs the phases this core owns, in order:
//! 1. Parse the line (fixed shapes, then the fallback interpreter)
//! 2. Dispatch through the verb's handler chain
//! 3. Raise the target entity's `on_<verb>` event, which may veto
//! 4. Apply the handler's staged change unless vetoed
//!
//! Everything after that (NPC turns, timers, death checks) belongs to the
//! caller's turn loop.

use tracing::{debug, info};

use lantern_foundation::{EntityId, Result};
use lantern_parser::{
    CommandParser, FallbackInterpreter, ParseError, ParseFailure, ParseRoute, ParsedInput,
    StructuredCommand, WordKinds,
};

use crate::behavior::{
    BehaviorCache, BehaviorSource, EventContext, EventKind, EventResult, invoke_entity_event,
};
use crate::chain::Dispatch;
use crate::config::EngineConfig;
use crate::module::{ModuleSource, Tier};
use crate::registry::ModuleRegistry;

// =============================================================================
// Turn Outcome
// =============================================================================

/// What happened to one line of input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The line could not be parsed
    ParseFailed {
        /// Why
        error: ParseError,
        /// Narration for the player
        message: String,
    },
    /// The line parsed but no handler claimed it
    NoHandler {
        /// The canonical verb that went unhandled
        verb: String,
        /// Narration for the player
        message: String,
    },
    /// A handler claimed the command
    Completed(ActionReport),
}

impl TurnOutcome {
    /// Narration for the player.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::ParseFailed { message, .. } | Self::NoHandler { message, .. } => message,
            Self::Completed(report) => &report.message,
        }
    }

    /// Returns true only for a completed, successful action.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed(report) if report.success)
    }

    /// The action report, if a handler claimed the command.
    #[must_use]
    pub fn report(&self) -> Option<&ActionReport> {
        match self {
            Self::Completed(report) => Some(report),
            _ => None,
        }
    }
}

/// The result of a claimed command after the entity event phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionReport {
    /// Canonical verb dispatched
    pub verb: String,
    /// Whether the action succeeded
    pub success: bool,
    /// Final narration
    pub message: String,
    /// Target entity named by the handler
    pub target: Option<EntityId>,
    /// True if an entity behavior blocked the action
    pub vetoed: bool,
    /// True if a staged change was applied to the world
    pub changed: bool,
    /// Tier of the handler that claimed the command
    pub tier: Tier,
    /// Module of the handler that claimed the command
    pub module: String,
    /// How the command was parsed
    pub route: ParseRoute,
}

// =============================================================================
// Engine
// =============================================================================

/// Parses, dispatches and applies player commands against a world `W`.
pub struct Engine<W> {
    registry: ModuleRegistry<W>,
    cache: BehaviorCache<W>,
    config: EngineConfig,
    fallback: Option<Box<dyn FallbackInterpreter>>,
}

impl<W> Engine<W> {
    /// Creates an engine over a built registry.
    #[must_use]
    pub fn new(registry: ModuleRegistry<W>, config: EngineConfig) -> Self {
        Self {
            registry,
            cache: BehaviorCache::new(),
            config,
            fallback: None,
        }
    }

    /// Discovers modules under `root` and builds the engine.
    ///
    /// # Errors
    ///
    /// Returns any authoring error raised while loading modules.
    pub fn load(source: &dyn ModuleSource<W>, root: &str, config: EngineConfig) -> Result<Self> {
        Ok(Self::new(ModuleRegistry::load(source, root)?, config))
    }

    /// Installs a fallback interpreter for lines the fixed shapes reject.
    #[must_use]
    pub fn with_fallback(mut self, interpreter: impl FallbackInterpreter + 'static) -> Self {
        self.fallback = Some(Box::new(interpreter));
        self
    }

    /// The loaded registry.
    #[must_use]
    pub fn registry(&self) -> &ModuleRegistry<W> {
        &self.registry
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The resolved-behavior cache.
    #[must_use]
    pub fn cache(&self) -> &BehaviorCache<W> {
        &self.cache
    }

    /// Rebuilds the registry from the source and clears the behavior cache.
    ///
    /// The cache is cleared first, so even a failed reload never serves a
    /// function resolved against the old modules. On failure the previous
    /// registry stays active.
    ///
    /// # Errors
    ///
    /// Returns any authoring error raised while loading modules.
    pub fn reload(&mut self, source: &dyn ModuleSource<W>, root: &str) -> Result<()> {
        self.cache.clear();
        let registry = ModuleRegistry::load(source, root)?;
        info!(modules = registry.modules().len(), "behavior modules reloaded");
        self.registry = registry;
        Ok(())
    }

    /// Parses a line, trying the fallback interpreter if enabled.
    ///
    /// # Errors
    ///
    /// Returns the fixed-shape failure when no route produces a command.
    pub fn parse(&mut self, input: &str) -> std::result::Result<ParsedInput, ParseError> {
        let parser = CommandParser::new(self.registry.vocabulary());
        let fallback = if self.config.use_fallback {
            self.fallback
                .as_deref_mut()
                .map(|f| f as &mut dyn FallbackInterpreter)
        } else {
            None
        };
        parser.parse_or_interpret(input, fallback)
    }

    /// The canonical verb a command dispatches through.
    ///
    /// A bare direction routes through the movement verb.
    #[must_use]
    pub fn verb_for(&self, command: &StructuredCommand) -> String {
        if let Some(verb) = command.verb_word() {
            return verb.to_string();
        }
        let movement = &self.config.movement_verb;
        self.registry
            .vocabulary()
            .lookup(movement)
            .filter(|record| record.is(WordKinds::VERB))
            .map_or_else(|| movement.clone(), |record| record.word.clone())
    }

    /// Offers a command to its verb's handler chain.
    pub fn dispatch(&self, world: &mut W, command: &StructuredCommand) -> Dispatch<W> {
        self.dispatch_verb(&self.verb_for(command), world, command)
    }

    fn dispatch_verb(&self, verb: &str, world: &mut W, command: &StructuredCommand) -> Dispatch<W> {
        match self.registry.chain(verb) {
            Some(chain) => chain.dispatch(world, command),
            None => Dispatch::NoHandler,
        }
    }
}

impl<W: BehaviorSource> Engine<W> {
    /// Processes one line of player input.
    ///
    /// Parse failures, unhandled verbs and vetoes are ordinary outcomes.
    ///
    /// # Errors
    ///
    /// Returns an authoring error if the target entity's binding cannot be
    /// resolved. The world is left untouched in that case.
    pub fn process(&mut self, world: &mut W, input: &str) -> Result<TurnOutcome> {
        let ParsedInput { command, route } = match self.parse(input) {
            Ok(parsed) => parsed,
            Err(error) => {
                let message = match &error.failure {
                    ParseFailure::UnknownWord(word) => format!("I don't know the word \"{word}\"."),
                    ParseFailure::NoPatternMatch => self.config.no_match_message.clone(),
                };
                return Ok(TurnOutcome::ParseFailed { error, message });
            }
        };

        let verb = self.verb_for(&command);
        let (mut result, tier, module) = match self.dispatch_verb(&verb, world, &command) {
            Dispatch::Handled { result, tier, module } => (result, tier, module),
            Dispatch::NoHandler => {
                debug!(%verb, "no handler");
                return Ok(TurnOutcome::NoHandler {
                    verb,
                    message: self.config.no_handler_message.clone(),
                });
            }
        };
        debug!(%verb, %tier, %module, success = result.success, "handled");

        let mut vetoed = false;
        if let Some(target) = result.target.filter(|_| result.success) {
            let event = self
                .registry
                .event_for(&verb)
                .cloned()
                .unwrap_or_else(|| EventKind::for_verb(&verb));
            let context = EventContext {
                event: &event,
                command: &command,
                message: &result.message,
            };
            let decision =
                invoke_entity_event(target, world, &context, &self.registry, &mut self.cache)?;

            match decision {
                Some(EventResult { allow: false, message }) => {
                    debug!(%target, %event, "vetoed");
                    vetoed = true;
                    drop(result.take_change());
                    result.success = false;
                    result.message = message.unwrap_or_else(|| self.config.denial_message.clone());
                }
                Some(EventResult {
                    allow: true,
                    message: Some(message),
                }) => result.message = message,
                Some(EventResult { allow: true, message: None }) | None => {}
            }
        }

        let changed = match result.take_change() {
            Some(change) => {
                change(world);
                true
            }
            None => false,
        };

        Ok(TurnOutcome::Completed(ActionReport {
            verb,
            success: result.success,
            message: result.message,
            target: result.target,
            vetoed,
            changed,
            tier,
            module,
            route,
        }))
    }
}

impl<W> std::fmt::Debug for Engine<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("registry", &self.registry)
            .field("cache", &self.cache)
            .field("config", &self.config)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

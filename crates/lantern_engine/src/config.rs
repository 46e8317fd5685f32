//! Configuration for turn processing.

/// Engine settings.
///
/// Controls how bare directions are routed, the stock narration for
/// unhandled and vetoed commands, and whether the fallback interpreter runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Canonical verb a bare direction dispatches through.
    pub movement_verb: String,

    /// Narration when no handler claims a command.
    pub no_handler_message: String,

    /// Narration when an entity vetoes an action without saying why.
    pub denial_message: String,

    /// Narration when a line fits no command shape.
    pub no_match_message: String,

    /// Offer unparseable lines to the fallback interpreter, if one is set.
    pub use_fallback: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            movement_verb: "go".to_string(),
            no_handler_message: "I don't understand that.".to_string(),
            denial_message: "You can't do that.".to_string(),
            no_match_message: "I don't understand that.".to_string(),
            use_fallback: true,
        }
    }
}

impl EngineConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the movement verb.
    #[must_use]
    pub fn with_movement_verb(mut self, verb: impl Into<String>) -> Self {
        self.movement_verb = verb.into();
        self
    }

    /// Builder method to set the no-handler narration.
    #[must_use]
    pub fn with_no_handler_message(mut self, message: impl Into<String>) -> Self {
        self.no_handler_message = message.into();
        self
    }

    /// Builder method to set the default veto narration.
    #[must_use]
    pub fn with_denial_message(mut self, message: impl Into<String>) -> Self {
        self.denial_message = message.into();
        self
    }

    /// Builder method to set the no-match narration.
    #[must_use]
    pub fn with_no_match_message(mut self, message: impl Into<String>) -> Self {
        self.no_match_message = message.into();
        self
    }

    /// Builder method to enable or disable the fallback interpreter.
    #[must_use]
    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.use_fallback = enabled;
        self
    }
}

//! Session state for the REPL.
//!
//! A session owns the engine, the world, and an undo history of world
//! snapshots. Two meta commands are handled here rather than by the engine:
//! `undo` restores the snapshot taken before the last world-changing turn,
//! and `reload` rebuilds the behavior registry from its module table.

use std::collections::VecDeque;

use tracing::{debug, info};

use lantern_engine::{Engine, EngineConfig, StaticModuleSource};
use lantern_foundation::Result;

use crate::demo;
use crate::world::DemoWorld;

/// Words handled by the session itself.
pub const META_COMMANDS: &[&str] = &["undo", "reload", "quit"];

/// Session settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Undo snapshots to retain.
    pub history_size: usize,

    /// Whether the REPL prints a banner on start.
    pub show_banner: bool,

    /// REPL prompt.
    pub prompt: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_size: 100,
            show_banner: true,
            prompt: "> ".to_string(),
        }
    }
}

impl SessionConfig {
    /// Builder method to set the undo depth.
    #[must_use]
    pub fn with_history_size(mut self, size: usize) -> Self {
        self.history_size = size;
        self
    }

    /// Builder method to show or hide the banner.
    #[must_use]
    pub fn with_banner(mut self, show: bool) -> Self {
        self.show_banner = show;
        self
    }

    /// Builder method to set the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }
}

/// A running game.
pub struct Session {
    engine: Engine<DemoWorld>,
    source: StaticModuleSource<DemoWorld>,
    root: String,
    world: DemoWorld,
    history: VecDeque<DemoWorld>,
    config: SessionConfig,
    turns: u64,
}

impl Session {
    /// Starts the built-in demo game.
    ///
    /// # Errors
    ///
    /// Returns an authoring error if the demo modules fail to load.
    pub fn demo(config: SessionConfig) -> Result<Self> {
        let source = demo::modules();
        let engine = Engine::load(&source, demo::ROOT, EngineConfig::default())?;
        Ok(Self::with_parts(engine, source, demo::ROOT, demo::world(), config))
    }

    /// Assembles a session from its parts.
    #[must_use]
    pub fn with_parts(
        engine: Engine<DemoWorld>,
        source: StaticModuleSource<DemoWorld>,
        root: &str,
        world: DemoWorld,
        config: SessionConfig,
    ) -> Self {
        Self {
            engine,
            source,
            root: root.to_string(),
            world,
            history: VecDeque::new(),
            config,
            turns: 0,
        }
    }

    /// The current world.
    #[must_use]
    pub fn world(&self) -> &DemoWorld {
        &self.world
    }

    /// The engine.
    #[must_use]
    pub fn engine(&self) -> &Engine<DemoWorld> {
        &self.engine
    }

    /// The session settings.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Turns processed by the engine so far.
    #[must_use]
    pub const fn turns(&self) -> u64 {
        self.turns
    }

    /// Snapshots available to undo.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Every spelling worth completing: vocabulary plus meta commands.
    #[must_use]
    pub fn completions(&self) -> Vec<String> {
        let mut words: Vec<String> = self
            .engine
            .registry()
            .vocabulary()
            .spellings()
            .into_iter()
            .map(str::to_string)
            .collect();
        words.extend(META_COMMANDS.iter().map(|w| (*w).to_string()));
        words.sort_unstable();
        words.dedup();
        words
    }

    /// Describes the player's surroundings.
    #[must_use]
    pub fn describe(&self) -> String {
        self.world.describe_here()
    }

    /// Runs one line of input and returns the narration.
    ///
    /// # Errors
    ///
    /// Returns authoring errors from the engine or from a reload.
    pub fn execute(&mut self, line: &str) -> Result<String> {
        match line.trim().to_lowercase().as_str() {
            "undo" => return Ok(self.undo()),
            "reload" => {
                self.reload()?;
                return Ok("Behavior modules reloaded.".to_string());
            }
            _ => {}
        }

        let before = self.world.clone();
        let outcome = self.engine.process(&mut self.world, line)?;
        self.turns += 1;
        // Handlers and events may also write through `&mut W` directly, so
        // the snapshot is kept whenever the world differs, staged or not.
        if self.world != before {
            self.remember(before);
        }
        Ok(outcome.message().to_string())
    }

    /// Restores the world to before the last change.
    pub fn undo(&mut self) -> String {
        match self.history.pop_back() {
            Some(previous) => {
                self.world = previous;
                debug!(remaining = self.history.len(), "undo");
                "Undone.".to_string()
            }
            None => "There is nothing to undo.".to_string(),
        }
    }

    /// Rebuilds the behavior registry and clears resolved behaviors.
    ///
    /// # Errors
    ///
    /// Returns any authoring error raised while loading modules.
    pub fn reload(&mut self) -> Result<()> {
        self.engine.reload(&self.source, &self.root)?;
        info!(root = %self.root, "session reloaded behavior modules");
        Ok(())
    }

    fn remember(&mut self, snapshot: DemoWorld) {
        if self.config.history_size == 0 {
            return;
        }
        if self.history.len() >= self.config.history_size {
            self.history.pop_front();
        }
        self.history.push_back(snapshot);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("root", &self.root)
            .field("turns", &self.turns)
            .field("undo_depth", &self.history.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

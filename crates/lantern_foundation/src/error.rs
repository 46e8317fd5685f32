//! Error types for the Lantern system.
//!
//! Only authoring mistakes are errors: vocabulary collisions, bad behavior
//! references, misplaced modules. Expected misses during play (unknown words,
//! unmatched shapes, verbs with no handler, vetoes) are returned as typed
//! values by the layers that produce them.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// Result alias for Lantern operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Lantern operations.
///
/// Displays the kind followed by any context, so a printed error names the
/// module, tier and frames it was raised under.
#[derive(Debug, Error)]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        match &self.context {
            Some(context) if context.module.is_some() => write!(f, " {context}"),
            Some(context) => write!(f, "{context}"),
            None => Ok(()),
        }
    }
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Pushes a stack frame, keeping any context already attached.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.context
            .get_or_insert_with(ErrorContext::new)
            .stack
            .push(frame.into());
        self
    }

    /// Creates a same-pass vocabulary conflict error.
    #[must_use]
    pub fn vocabulary_conflict(
        word: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::VocabularyConflict {
            word: word.into(),
            first: first.into(),
            second: second.into(),
        })
    }

    /// Creates a malformed behavior reference error.
    #[must_use]
    pub fn malformed_reference(reference: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedBehaviorRef(reference.into()))
    }

    /// Creates an unknown module error.
    #[must_use]
    pub fn unknown_module(module: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownModule(module.into()))
    }

    /// Creates an unknown function error.
    #[must_use]
    pub fn unknown_function(module: impl Into<String>, function: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownFunction {
            module: module.into(),
            function: function.into(),
        })
    }

    /// Returns true for the authoring-error kinds that must halt a load.
    #[must_use]
    pub fn is_authoring_error(&self) -> bool {
        !matches!(self.kind, ErrorKind::Internal(_))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// One string resolves to two different canonical words within a single
    /// merge pass.
    #[error("vocabulary conflict: {word:?} maps to both {first:?} and {second:?}")]
    VocabularyConflict {
        /// The colliding word or synonym.
        word: String,
        /// Canonical word of the first record.
        first: String,
        /// Canonical word of the second record.
        second: String,
    },

    /// Two tiers declare different verbs for the same word.
    #[error(
        "verb conflict across tiers: {word:?} is verb {existing:?} in tier {existing_tier} \
         and verb {incoming:?} in tier {incoming_tier}"
    )]
    CrossTierVerbConflict {
        /// The colliding word or synonym.
        word: String,
        /// Canonical verb already in the table.
        existing: String,
        /// Tier that contributed the existing verb.
        existing_tier: u32,
        /// Canonical verb being merged.
        incoming: String,
        /// Tier contributing the incoming verb.
        incoming_tier: u32,
    },

    /// A behavior reference is not of the form `module:function`.
    #[error("malformed behavior reference: {0:?} (expected \"module:function\")")]
    MalformedBehaviorRef(String),

    /// A behavior reference names a module that was never registered.
    #[error("unknown behavior module: {0:?}")]
    UnknownModule(String),

    /// A behavior reference names a function the module does not export.
    #[error("module {module:?} does not export entity event {function:?}")]
    UnknownFunction {
        /// The module path.
        module: String,
        /// The missing function name.
        function: String,
    },

    /// Two modules were registered under the same path.
    #[error("duplicate behavior module: {0:?}")]
    DuplicateModule(String),

    /// A discovered module does not live under the behavior root.
    #[error("module {path:?} is not under behavior root {root:?}")]
    ModuleOutsideRoot {
        /// The module path.
        path: String,
        /// The behavior root.
        root: String,
    },

    /// Tiers start at 1.
    #[error("invalid tier: {0}")]
    InvalidTier(u32),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Module path that was being loaded.
    pub module: Option<String>,
    /// Tier of that module.
    pub tier: Option<u32>,
    /// Stack of load steps that led to the error.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the module being loaded.
    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Sets the tier of the module being loaded.
    #[must_use]
    pub fn with_tier(mut self, tier: u32) -> Self {
        self.tier = Some(tier);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(module) = &self.module {
            write!(f, "in module {module}")?;
            if let Some(tier) = self.tier {
                write!(f, " (tier {tier})")?;
            }
        }
        for frame in &self.stack {
            write!(f, "\n  while {frame}")?;
        }
        Ok(())
    }
}

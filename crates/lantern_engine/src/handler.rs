//! Verb handlers and the results they produce.
//!
//! A handler receives the world, the parsed command, and a [`Next`] that
//! invokes the rest of its chain. It either claims the command with a
//! [`HandlerResult`] or declines, letting dispatch move on.

use std::fmt;
use std::rc::Rc;

use lantern_foundation::EntityId;
use lantern_parser::StructuredCommand;

use crate::chain::Next;

/// A deferred world mutation.
///
/// Handlers stage their effects instead of applying them so that the target
/// entity's `on_<verb>` behavior can still veto the action.
pub type StateChange<W> = Box<dyn FnOnce(&mut W)>;

/// A registered verb handler.
pub type CommandHandler<W> =
    Rc<dyn Fn(&mut W, &StructuredCommand, Next<'_, W>) -> HandlerOutcome<W>>;

/// Wraps a closure or function as a [`CommandHandler`].
pub fn handler<W, F>(f: F) -> CommandHandler<W>
where
    F: Fn(&mut W, &StructuredCommand, Next<'_, W>) -> HandlerOutcome<W> + 'static,
{
    Rc::new(f)
}

// =============================================================================
// Handler Result
// =============================================================================

/// What a handler decided about a command.
pub struct HandlerResult<W> {
    /// Whether the action succeeded
    pub success: bool,
    /// Narration for the player
    pub message: String,
    /// The entity the action was aimed at, if any
    pub target: Option<EntityId>,
    change: Option<StateChange<W>>,
}

impl<W> HandlerResult<W> {
    /// A successful result.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            target: None,
            change: None,
        }
    }

    /// A failed result. Failures still count as handled.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::success(message)
        }
    }

    /// Names the target entity, making the action subject to its behaviors.
    #[must_use]
    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    /// Stages a world mutation, applied once entity behaviors allow it.
    ///
    /// Staging twice runs both changes in order.
    #[must_use]
    pub fn with_change<F>(mut self, change: F) -> Self
    where
        F: FnOnce(&mut W) + 'static,
        W: 'static,
    {
        self.change = Some(match self.change.take() {
            None => Box::new(change),
            Some(first) => Box::new(move |world: &mut W| {
                first(world);
                change(world);
            }),
        });
        self
    }

    /// Replaces the narration.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Returns true if a mutation is staged.
    #[must_use]
    pub fn has_change(&self) -> bool {
        self.change.is_some()
    }

    /// Removes the staged mutation, leaving the result otherwise intact.
    pub fn take_change(&mut self) -> Option<StateChange<W>> {
        self.change.take()
    }
}

impl<W> fmt::Debug for HandlerResult<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerResult")
            .field("success", &self.success)
            .field("message", &self.message)
            .field("target", &self.target)
            .field("has_change", &self.change.is_some())
            .finish()
    }
}

// =============================================================================
// Handler Outcome
// =============================================================================

/// A handler either claims a command or passes on it.
#[derive(Debug)]
pub enum HandlerOutcome<W> {
    /// The handler produced a result; dispatch stops here
    Handled(HandlerResult<W>),
    /// Not applicable; dispatch tries the next handler
    Declined,
}

impl<W> HandlerOutcome<W> {
    /// Returns true for [`HandlerOutcome::Handled`].
    #[must_use]
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled(_))
    }
}

impl<W> From<HandlerResult<W>> for HandlerOutcome<W> {
    fn from(result: HandlerResult<W>) -> Self {
        Self::Handled(result)
    }
}

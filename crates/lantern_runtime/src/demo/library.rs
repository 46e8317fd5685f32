//! Shared library modules, one tier above the built-ins.

use lantern_engine::{BehaviorModule, HandlerOutcome, HandlerResult, Next};
use lantern_parser::StructuredCommand;

use super::builtin::direct_object;
use crate::world::{DemoWorld, Reach};

/// Close-up examination: adds detail for things within reach and otherwise
/// leaves the command to the generic handler.
pub fn proximity() -> BehaviorModule<DemoWorld> {
    BehaviorModule::new("game/lib/proximity").with_handler("examine", examine_up_close)
}

fn examine_up_close(
    world: &mut DemoWorld,
    command: &StructuredCommand,
    _next: Next<'_, DemoWorld>,
) -> HandlerOutcome<DemoWorld> {
    let Some(id) = direct_object(world, command) else {
        return HandlerOutcome::Declined;
    };
    match world.thing(id) {
        Some(thing) if thing.reach == Reach::Near => match &thing.detail {
            Some(detail) => HandlerResult::success(format!("{} {detail}", thing.description))
                .with_target(id)
                .into(),
            None => HandlerOutcome::Declined,
        },
        _ => HandlerOutcome::Declined,
    }
}

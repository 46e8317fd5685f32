//! The game's own modules, directly under the behavior root.

use lantern_engine::{BehaviorModule, EventResult, HandlerOutcome, HandlerResult, Next};
use lantern_parser::{StructuredCommand, VocabularyFragment};

use super::builtin::direct_object;
use crate::world::DemoWorld;

/// Story flag set once the lever has been pulled down.
pub const GATE_OPEN: &str = "gate_open";

/// Words and entity events for the forge.
pub fn forge() -> BehaviorModule<DemoWorld> {
    BehaviorModule::new("game/forge")
        .with_vocabulary(
            VocabularyFragment::new()
                .noun("sword", &["blade"])
                .noun("anvil", &[])
                .noun("lever", &["handle"])
                .noun("tapestry", &["hanging"])
                .noun("hammer", &["mallet"])
                .adjective("rusty")
                .adjective("iron")
                .adjective("faded"),
        )
        .with_event("admire_weave", |_, _, context| {
            EventResult::allow_with(format!(
                "{} Squinting, you make out a smith forging a lantern.",
                context.message
            ))
        })
}

/// The anvil refuses to move.
pub fn anvil() -> BehaviorModule<DemoWorld> {
    BehaviorModule::new("game/anvil")
        .with_event("deny_take", |_, _, _| EventResult::deny("It's bolted down."))
}

/// Pushing the lever opens the yard gate. Pushing anything else is declined,
/// so the generic handler answers.
pub fn lever() -> BehaviorModule<DemoWorld> {
    BehaviorModule::new("game/lever").with_handler("push", push_lever)
}

fn push_lever(
    world: &mut DemoWorld,
    command: &StructuredCommand,
    _next: Next<'_, DemoWorld>,
) -> HandlerOutcome<DemoWorld> {
    let Some(id) = direct_object(world, command)
        .filter(|&id| world.thing(id).is_some_and(|t| t.noun == "lever"))
    else {
        return HandlerOutcome::Declined;
    };

    if world.has_flag(GATE_OPEN) {
        return HandlerResult::failure("The lever is already down.").with_target(id).into();
    }

    HandlerResult::success("The lever clunks down. Somewhere to the north, a gate grinds open.")
        .with_target(id)
        .with_change(|w: &mut DemoWorld| {
            if let (Some(forge), Some(yard)) = (w.room_named("Forge"), w.room_named("Yard")) {
                w.connect(forge, "north", yard);
                w.connect(yard, "south", forge);
            }
            w.set_flag(GATE_OPEN);
        })
        .into()
}

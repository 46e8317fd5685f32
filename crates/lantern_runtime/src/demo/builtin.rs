//! Built-in verbs, mounted deepest so every other tier can override them.

use lantern_engine::{BehaviorModule, HandlerOutcome, HandlerResult, Next};
use lantern_foundation::EntityId;
use lantern_parser::StructuredCommand;
use lantern_parser::stdlib::core_vocabulary;

use crate::world::{DemoWorld, Reach};

type Outcome = HandlerOutcome<DemoWorld>;

const HELP: &str =
    "Try LOOK, EXAMINE, TAKE, DROP, PUSH, INVENTORY, or a direction. UNDO takes back a move.";

/// Resolves the command's direct object against what the player can see.
pub(crate) fn direct_object(world: &DemoWorld, command: &StructuredCommand) -> Option<EntityId> {
    let noun = command.object_word()?;
    let adjective = command.direct_adjective.as_ref().map(|w| w.word.as_str());
    world.find(noun, adjective)
}

// =============================================================================
// Movement
// =============================================================================

/// `go` and the core vocabulary.
pub fn movement() -> BehaviorModule<DemoWorld> {
    BehaviorModule::new("game/lib/core/movement")
        .with_vocabulary(core_vocabulary())
        .with_handler("go", go)
}

fn go(world: &mut DemoWorld, command: &StructuredCommand, _next: Next<'_, DemoWorld>) -> Outcome {
    let Some(direction) = command.heading() else {
        return HandlerResult::failure("Go where?").into();
    };
    match world.exit(direction) {
        Some(to) => HandlerResult::success(world.describe_room(to))
            .with_change(move |w: &mut DemoWorld| w.move_player(to))
            .into(),
        None => HandlerResult::failure("You can't go that way.").into(),
    }
}

// =============================================================================
// Senses
// =============================================================================

/// `look` and `examine`.
pub fn senses() -> BehaviorModule<DemoWorld> {
    BehaviorModule::new("game/lib/core/senses")
        .with_handler("look", look)
        .with_handler("examine", examine)
}

fn look(
    world: &mut DemoWorld,
    _command: &StructuredCommand,
    _next: Next<'_, DemoWorld>,
) -> Outcome {
    HandlerResult::success(world.describe_here()).into()
}

fn examine(
    world: &mut DemoWorld,
    command: &StructuredCommand,
    _next: Next<'_, DemoWorld>,
) -> Outcome {
    if command.object_word().is_none() {
        return HandlerResult::failure("Examine what?").into();
    }
    match direct_object(world, command).and_then(|id| Some((id, world.thing(id)?))) {
        Some((id, thing)) => HandlerResult::success(thing.description.clone())
            .with_target(id)
            .into(),
        None => HandlerResult::failure("You see no such thing here.").into(),
    }
}

// =============================================================================
// Items
// =============================================================================

/// `take`, `drop` and `inventory`.
pub fn items() -> BehaviorModule<DemoWorld> {
    BehaviorModule::new("game/lib/core/items")
        .with_handler("take", take)
        .with_handler("drop", drop_item)
        .with_handler("inventory", inventory)
}

fn take(world: &mut DemoWorld, command: &StructuredCommand, _next: Next<'_, DemoWorld>) -> Outcome {
    if command.object_word().is_none() {
        return HandlerResult::failure("Take what?").into();
    }
    let Some(id) = direct_object(world, command) else {
        return HandlerResult::failure("You see no such thing here.").into();
    };
    if world.carried().contains(&id) {
        return HandlerResult::failure("You already have that.").into();
    }
    if world.thing(id).is_some_and(|t| t.reach == Reach::Far) {
        return HandlerResult::failure("It's out of reach.").into();
    }
    HandlerResult::success("Taken.")
        .with_target(id)
        .with_change(move |w: &mut DemoWorld| w.carry(id))
        .into()
}

fn drop_item(
    world: &mut DemoWorld,
    command: &StructuredCommand,
    _next: Next<'_, DemoWorld>,
) -> Outcome {
    if command.object_word().is_none() {
        return HandlerResult::failure("Drop what?").into();
    }
    match direct_object(world, command) {
        Some(id) if world.carried().contains(&id) => HandlerResult::success("Dropped.")
            .with_target(id)
            .with_change(move |w: &mut DemoWorld| w.put_down(id))
            .into(),
        _ => HandlerResult::failure("You aren't carrying that.").into(),
    }
}

fn inventory(
    world: &mut DemoWorld,
    _command: &StructuredCommand,
    _next: Next<'_, DemoWorld>,
) -> Outcome {
    let names: Vec<String> = world
        .carried()
        .into_iter()
        .filter_map(|id| world.thing(id).map(|t| format!("  a {}", t.name())))
        .collect();
    if names.is_empty() {
        HandlerResult::success("You are empty-handed.").into()
    } else {
        HandlerResult::success(format!("You are carrying:\n{}", names.join("\n"))).into()
    }
}

// =============================================================================
// Everything Else
// =============================================================================

/// `push`, `pull`, `wait` and `help`.
pub fn actions() -> BehaviorModule<DemoWorld> {
    BehaviorModule::new("game/lib/core/actions")
        .with_handler("push", nothing_happens)
        .with_handler("pull", nothing_happens)
        .with_handler("wait", |_: &mut DemoWorld, _: &StructuredCommand, _: Next<'_, DemoWorld>| {
            HandlerResult::success("Time passes.").into()
        })
        .with_handler("help", |_: &mut DemoWorld, _: &StructuredCommand, _: Next<'_, DemoWorld>| {
            HandlerResult::success(HELP).into()
        })
}

fn nothing_happens(
    world: &mut DemoWorld,
    command: &StructuredCommand,
    _next: Next<'_, DemoWorld>,
) -> Outcome {
    match direct_object(world, command) {
        Some(id) => HandlerResult::success("Nothing happens.").with_target(id).into(),
        None if command.object_word().is_none() => {
            HandlerResult::failure("What do you want to move?").into()
        }
        None => HandlerResult::failure("You see no such thing here.").into(),
    }
}

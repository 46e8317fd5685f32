//! A two-room demo game.
//!
//! Modules are laid out in three tiers under [`ROOT`]:
//!
//! ```text
//! game/forge, game/anvil, game/lever      tier 1
//! game/lib/proximity                      tier 2
//! game/lib/core/{movement,senses,...}     tier 3
//! ```

pub mod builtin;
pub mod game;
pub mod library;

use lantern_engine::StaticModuleSource;

use crate::world::{DemoWorld, Thing};

/// Behavior root of the demo modules.
pub const ROOT: &str = "game";

/// The demo's module registration table.
#[must_use]
pub fn modules() -> StaticModuleSource<DemoWorld> {
    StaticModuleSource::new()
        .with(builtin::movement)
        .with(builtin::senses)
        .with(builtin::items)
        .with(builtin::actions)
        .with(library::proximity)
        .with(game::forge)
        .with(game::anvil)
        .with(game::lever)
}

/// The demo's starting world.
#[must_use]
pub fn world() -> DemoWorld {
    let mut world = DemoWorld::new();
    let forge = world.add_room(
        "Forge",
        "Soot blackens every wall. A gate in the north wall is shut tight.",
    );
    let yard = world.add_room("Yard", "A muddy yard behind the forge.");

    world.add_thing(
        Thing::new("sword", "A notched sword, more rust than steel.")
            .with_adjective("rusty")
            .with_detail("Someone has scratched a name near the hilt: ARDEN.")
            .in_room(forge),
    );
    world.add_thing(
        Thing::new("anvil", "A squat iron anvil.")
            .with_adjective("iron")
            .with_detail("Four thick bolts pin it to the floor.")
            .with_behavior("on_take", "anvil:deny_take")
            .in_room(forge),
    );
    world.add_thing(
        Thing::new("lever", "A long lever set into the wall beside the gate.").in_room(forge),
    );
    world.add_thing(
        Thing::new("tapestry", "A faded tapestry hangs high above the hearth.")
            .with_adjective("faded")
            .with_behavior("on_examine", "forge:admire_weave")
            .far()
            .in_room(forge),
    );
    world.add_thing(Thing::new("hammer", "A heavy smithing hammer.").in_room(yard));
    world
}

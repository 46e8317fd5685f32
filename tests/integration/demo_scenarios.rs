//! Scenarios played against the demo game's engine directly.

use lantern_engine::{Engine, EngineConfig, TurnOutcome};
use lantern_runtime::demo::{self, game::GATE_OPEN};
use lantern_runtime::{DemoWorld, Placement};

fn start() -> (Engine<DemoWorld>, DemoWorld) {
    let engine = Engine::load(&demo::modules(), demo::ROOT, EngineConfig::default()).unwrap();
    (engine, demo::world())
}

fn play(engine: &mut Engine<DemoWorld>, world: &mut DemoWorld, input: &str) -> TurnOutcome {
    engine.process(world, input).unwrap()
}

// =============================================================================
// Tiered Overrides
// =============================================================================

#[test]
fn far_tapestry_is_still_examined_by_core_handler() {
    let (mut engine, mut world) = start();

    let outcome = play(&mut engine, &mut world, "examine the faded hanging");

    assert!(outcome.is_success());
    let report = outcome.report().unwrap();
    assert_eq!(report.module, "lib/core/senses");
    assert_eq!(report.tier.get(), 3);
    assert!(report.message.starts_with("A faded tapestry hangs high above the hearth."));
    assert!(report.message.ends_with("a smith forging a lantern."));
}

#[test]
fn near_sword_gets_library_detail() {
    let (mut engine, mut world) = start();

    let outcome = play(&mut engine, &mut world, "x rusty blade");

    let report = outcome.report().unwrap();
    assert_eq!(report.module, "lib/proximity");
    assert!(report.message.contains("ARDEN"));
}

#[test]
fn two_push_handlers_and_first_claim_wins() {
    let (mut engine, mut world) = start();

    let chain = engine.registry().chain("push").unwrap();
    let modules: Vec<&str> = chain.entries().iter().map(|e| e.module.as_str()).collect();
    assert_eq!(modules, ["lever", "lib/core/actions"]);

    let pushed = play(&mut engine, &mut world, "push lever");
    assert_eq!(pushed.report().unwrap().module, "lever");
    assert!(world.has_flag(GATE_OPEN));

    let nudged = play(&mut engine, &mut world, "shove sword");
    assert_eq!(nudged.report().unwrap().module, "lib/core/actions");
    assert_eq!(nudged.message(), "Nothing happens.");
}

// =============================================================================
// Entity Behaviors
// =============================================================================

#[test]
fn bolted_anvil_does_not_move() {
    let (mut engine, mut world) = start();
    let anvil = world.find("anvil", None).unwrap();
    let before = world.thing(anvil).unwrap().placement;

    let outcome = play(&mut engine, &mut world, "take the iron anvil");

    assert!(!outcome.is_success());
    assert_eq!(outcome.message(), "It's bolted down.");
    assert!(outcome.report().unwrap().vetoed);
    assert_eq!(world.thing(anvil).unwrap().placement, before);
    assert!(world.carried().is_empty());
}

#[test]
fn sword_can_be_carried_north_once_gate_opens() {
    let (mut engine, mut world) = start();

    assert!(play(&mut engine, &mut world, "take sword").is_success());
    assert_eq!(play(&mut engine, &mut world, "n").message(), "You can't go that way.");

    play(&mut engine, &mut world, "press handle");
    let moved = play(&mut engine, &mut world, "go north");
    assert!(moved.message().starts_with("Yard"));
    assert!(moved.message().contains("You see a hammer."));

    play(&mut engine, &mut world, "drop blade");
    let sword = world.find("sword", None).unwrap();
    assert_eq!(
        world.thing(sword).unwrap().placement,
        Placement::Room(world.room_named("yard").unwrap())
    );
}

// =============================================================================
// Misses
// =============================================================================

#[test]
fn misses_are_narrated_not_raised() {
    let (mut engine, mut world) = start();
    let snapshot = world.clone();

    assert_eq!(
        play(&mut engine, &mut world, "xyzzy").message(),
        "I don't know the word \"xyzzy\"."
    );
    assert_eq!(
        play(&mut engine, &mut world, "sword rusty").message(),
        "I don't understand that."
    );
    assert!(matches!(
        play(&mut engine, &mut world, "wear sword"),
        TurnOutcome::NoHandler { ref verb, .. } if verb == "wear"
    ));
    assert_eq!(world, snapshot);
}

//! A minimal world and module set for engine tests.

use std::collections::HashMap;

use lantern_engine::{
    BehaviorModule, BehaviorSource, EntityBehaviors, HandlerOutcome, HandlerResult, Next,
};
use lantern_foundation::EntityId;
use lantern_parser::StructuredCommand;
use lantern_parser::stdlib::core_vocabulary;

pub const SWORD: EntityId = EntityId::new(1);
pub const ANVIL: EntityId = EntityId::new(2);

/// Records which handlers ran and where things are.
#[derive(Clone, Debug, Default)]
pub struct Bench {
    pub calls: Vec<String>,
    pub held: Vec<EntityId>,
    pub near: Vec<EntityId>,
    pub behaviors: HashMap<EntityId, EntityBehaviors>,
}

impl Bench {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, entity: EntityId, event: &str, reference: &str) -> Self {
        self.behaviors.entry(entity).or_default().insert(event, reference);
        self
    }
}

impl BehaviorSource for Bench {
    fn behaviors(&self, entity: EntityId) -> Option<&EntityBehaviors> {
        self.behaviors.get(&entity)
    }
}

/// Maps the test nouns to entities.
pub fn entity_for(command: &StructuredCommand) -> Option<EntityId> {
    match command.object_word()? {
        "sword" => Some(SWORD),
        "anvil" => Some(ANVIL),
        _ => None,
    }
}

/// A handler that logs its name and claims the command.
pub fn claims(
    name: &'static str,
) -> impl Fn(&mut Bench, &StructuredCommand, Next<'_, Bench>) -> HandlerOutcome<Bench> + 'static {
    move |world: &mut Bench, _: &StructuredCommand, _: Next<'_, Bench>| {
        world.calls.push(name.to_string());
        HandlerResult::success(name).into()
    }
}

/// A handler that logs its name and declines.
pub fn declines(
    name: &'static str,
) -> impl Fn(&mut Bench, &StructuredCommand, Next<'_, Bench>) -> HandlerOutcome<Bench> + 'static {
    move |world: &mut Bench, _: &StructuredCommand, _: Next<'_, Bench>| {
        world.calls.push(name.to_string());
        HandlerOutcome::Declined
    }
}

/// Core-tier module: vocabulary plus a `take` that stages picking up the
/// named entity.
pub fn core_module(path: &str) -> BehaviorModule<Bench> {
    BehaviorModule::new(path)
        .with_vocabulary(core_vocabulary().noun("sword", &["blade"]).noun("anvil", &[]))
        .with_handler(
            "take",
            |_: &mut Bench, command: &StructuredCommand, _: Next<'_, Bench>| {
                let Some(target) = entity_for(command) else {
                    return HandlerResult::failure("Take what?").into();
                };
                HandlerResult::success("Taken.")
                    .with_target(target)
                    .with_change(move |world: &mut Bench| world.held.push(target))
                    .into()
            },
        )
}

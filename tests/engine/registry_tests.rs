//! Module discovery, tier assignment and registry build.

use lantern_engine::{
    BehaviorModule, ModuleRegistry, StaticModuleSource, Tier, discover, tier_of,
};
use lantern_foundation::ErrorKind;
use lantern_parser::VocabularyFragment;

use crate::common::{Bench, core_module};

const ROOT: &str = "game";

fn layered() -> StaticModuleSource<Bench> {
    StaticModuleSource::new()
        .with(|| core_module("game/lib/core/items"))
        .with(|| BehaviorModule::new("game/lib/proximity"))
        .with(|| BehaviorModule::new("game/anvil"))
        .with(|| BehaviorModule::new("game\\lever"))
}

#[test]
fn discovery_assigns_tiers_by_depth() {
    let descriptors = discover(&layered(), ROOT).unwrap();

    let placed: Vec<(&str, u32)> = descriptors
        .iter()
        .map(|d| (d.id.as_str(), d.tier.get()))
        .collect();
    assert_eq!(
        placed,
        [("anvil", 1), ("lever", 1), ("lib/proximity", 2), ("lib/core/items", 3)]
    );
}

#[test]
fn tier_of_counts_segments_below_root() {
    assert_eq!(tier_of("game/a", ROOT).unwrap(), Tier::GAME);
    assert_eq!(tier_of("./game//lib/a/", ROOT).unwrap().get(), 2);
    assert!(tier_of("game", ROOT).is_err());
    assert!(Tier::new(0).is_err());
}

#[test]
fn module_outside_root_is_rejected() {
    let source = StaticModuleSource::new().with(|| BehaviorModule::<Bench>::new("gamer/anvil"));
    let error = ModuleRegistry::load(&source, ROOT).unwrap_err();
    assert!(matches!(error.kind, ErrorKind::ModuleOutsideRoot { .. }));
}

#[test]
fn duplicate_module_is_rejected() {
    let source = StaticModuleSource::new()
        .with(|| BehaviorModule::<Bench>::new("game/anvil"))
        .with(|| BehaviorModule::<Bench>::new("game/anvil/"));
    let error = ModuleRegistry::load(&source, ROOT).unwrap_err();
    assert!(matches!(error.kind, ErrorKind::DuplicateModule(ref id) if id == "anvil"));
    assert_eq!(error.context.unwrap().tier, Some(1));
}

#[test]
fn explicit_registration_uses_declared_tier() {
    let registry = ModuleRegistry::builder()
        .register(Tier::new(3).unwrap(), core_module("builtin/items"))
        .register(Tier::GAME, BehaviorModule::new("anvil"))
        .build()
        .unwrap();

    let ids: Vec<&str> = registry.modules().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, ["anvil", "builtin/items"]);
    assert!(registry.chain("take").is_some());
}

#[test]
fn game_verb_stealing_core_synonym_fails_to_load() {
    let source = StaticModuleSource::new()
        .with(|| core_module("game/lib/core/items"))
        .with(|| {
            BehaviorModule::new("game/shop")
                .with_vocabulary(VocabularyFragment::new().verb("purchase", &["get"]))
        });

    let error = ModuleRegistry::load(&source, ROOT).unwrap_err();

    assert!(matches!(
        error.kind,
        ErrorKind::CrossTierVerbConflict { existing_tier: 3, incoming_tier: 1, .. }
    ));
    assert_eq!(error.context.unwrap().stack, ["merging module vocabularies"]);
}

#[test]
fn game_noun_may_shadow_core_word() {
    let source = StaticModuleSource::new()
        .with(|| core_module("game/lib/core/items"))
        .with(|| {
            BehaviorModule::new("game/runes")
                .with_vocabulary(VocabularyFragment::new().noun("rune", &["n"]))
        });

    let registry = ModuleRegistry::load(&source, ROOT).unwrap();
    assert_eq!(registry.vocabulary().lookup("n").unwrap().word, "rune");
    assert_eq!(registry.vocabulary().tier_of("n"), Some(1));
}

#[test]
fn every_verb_has_a_precomputed_event() {
    let registry = ModuleRegistry::load(&layered(), ROOT).unwrap();
    for record in registry.vocabulary().verbs() {
        let event = registry.event_for(&record.word).unwrap();
        assert_eq!(event.verb(), record.word);
        assert_eq!(event.name(), format!("on_{}", record.word));
    }
    assert!(registry.event_for("sword").is_none());
}

#[test]
fn handled_verbs_lists_chains() {
    let registry = ModuleRegistry::load(&layered(), ROOT).unwrap();
    assert_eq!(registry.handled_verbs(), ["take"]);
}

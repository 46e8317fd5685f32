//! Tiered vocabulary merge.

use lantern_foundation::ErrorKind;
use lantern_parser::stdlib::core_vocabulary;
use lantern_parser::{CommandParser, VocabularyFragment, VocabularyTable, WordKinds};

use crate::common::{game_fragment, table};

#[test]
fn lookup_is_case_insensitive_and_reports_tier() {
    let table = table();
    assert_eq!(table.lookup("BLADE").unwrap().word, "sword");
    assert_eq!(table.tier_of("sword"), Some(1));
    assert_eq!(table.tier_of("take"), Some(3));
    assert!(!table.contains("xyzzy"));
}

#[test]
fn more_specific_tier_overrides_non_verb_word() {
    let core = core_vocabulary();
    // The game turns "n" into a noun (a rune carved on a door).
    let game = VocabularyFragment::new().noun("rune", &["n"]);
    let table = VocabularyTable::merge([(3, &core), (1, &game)]).unwrap();

    let n = table.lookup("n").unwrap();
    assert_eq!(n.word, "rune");
    assert!(n.is(WordKinds::NOUN));
    // The direction keeps its other spelling.
    assert_eq!(table.lookup("north").unwrap().word, "north");
    assert!(!table.lookup("north").unwrap().synonyms.contains("n"));
}

#[test]
fn overriding_a_canonical_word_carries_its_synonyms() {
    let core = VocabularyFragment::new().verb("take", &[]).noun("lamp", &["lantern"]);
    let game = VocabularyFragment::new().noun("torch", &["lamp"]);
    let table = VocabularyTable::merge([(3, &core), (1, &game)]).unwrap();

    assert_eq!(table.lookup("lamp").unwrap().word, "torch");
    assert_eq!(table.lookup("lantern").unwrap().word, "torch");
    assert_eq!(table.tier_of("lantern"), Some(1));
    assert!(table.lookup("torch").unwrap().synonyms.contains("lantern"));

    let parser = CommandParser::new(&table);
    let by_synonym = parser.parse("take lantern").unwrap();
    let by_old_name = parser.parse("take lamp").unwrap();
    assert_eq!(by_synonym.object_word(), Some("torch"));
    assert!(by_synonym.same_intent(&by_old_name));
}

#[test]
fn verb_synonym_claimed_by_two_tiers_is_an_authoring_error() {
    let core = core_vocabulary();
    // "get" already means "take" in the core tier.
    let game = VocabularyFragment::new().verb("obtain", &["get"]);
    let error = VocabularyTable::merge([(3, &core), (1, &game)]).unwrap_err();

    match error.kind {
        ErrorKind::CrossTierVerbConflict {
            word,
            existing,
            incoming,
            ..
        } => {
            assert_eq!(word, "get");
            assert_eq!(existing, "take");
            assert_eq!(incoming, "obtain");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn same_pass_collision_is_an_authoring_error() {
    let a = VocabularyFragment::new().noun("lamp", &["light"]);
    let b = VocabularyFragment::new().noun("torch", &["light"]);
    let error = VocabularyTable::merge([(2, &a), (2, &b)]).unwrap_err();
    assert!(matches!(error.kind, ErrorKind::VocabularyConflict { .. }));
}

#[test]
fn tier_zero_is_rejected() {
    let fragment = game_fragment();
    let error = VocabularyTable::merge([(0, &fragment)]).unwrap_err();
    assert!(matches!(error.kind, ErrorKind::InvalidTier(0)));
}

#[test]
fn fragments_of_one_tier_combine_kinds() {
    let a = VocabularyFragment::new().noun("light", &[]);
    let b = VocabularyFragment::new().verb("light", &["ignite"]);
    let table = VocabularyTable::merge([(1, &a), (1, &b)]).unwrap();

    let light = table.lookup("ignite").unwrap();
    assert!(light.is(WordKinds::NOUN));
    assert!(light.is(WordKinds::VERB));

    let command = CommandParser::new(&table).parse("ignite light").unwrap();
    assert_eq!(command.verb_word(), Some("light"));
    assert_eq!(command.object_word(), Some("light"));
}

#[test]
fn spellings_are_sorted_for_completion() {
    let table = table();
    let spellings = table.spellings();
    assert!(spellings.windows(2).all(|w| w[0] < w[1]));
    assert!(spellings.contains(&"lantern"));
}

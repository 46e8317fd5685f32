//! End-to-end parsing of representative player input.

use lantern_parser::{
    CommandParser, ParseFailure, VocabularyFragment, VocabularyTable, WordKinds, WordRecord,
};

use crate::common::table;

// =============================================================================
// Accepted Input
// =============================================================================

#[test]
fn take_the_rusty_sword_and_shouted_synonym_agree() {
    let table = table();
    let parser = CommandParser::new(&table);

    let polite = parser.parse("take the rusty sword").unwrap();
    let shouted = parser.parse("GET RUSTY SWORD").unwrap();

    for command in [&polite, &shouted] {
        assert_eq!(command.verb_word(), Some("take"));
        assert_eq!(command.direct_adjective.as_ref().unwrap().word, "rusty");
        assert_eq!(command.object_word(), Some("sword"));
    }
    assert!(polite.same_intent(&shouted));
    assert_eq!(shouted.raw_text, "GET RUSTY SWORD");
}

#[test]
fn put_with_both_adjectives() {
    let table = table();
    let command = CommandParser::new(&table)
        .parse("put the brass lamp into the wooden box")
        .unwrap();

    assert_eq!(command.verb_word(), Some("put"));
    assert_eq!(command.direct_adjective.as_ref().unwrap().word, "brass");
    assert_eq!(command.object_word(), Some("lamp"));
    assert_eq!(command.preposition.as_ref().unwrap().word, "into");
    assert_eq!(command.indirect_adjective.as_ref().unwrap().word, "wooden");
    assert_eq!(command.indirect_word(), Some("box"));
}

#[test]
fn dative_give_names_recipient_first() {
    let table = table();
    let command = CommandParser::new(&table).parse("give troll the blade").unwrap();

    assert_eq!(command.verb_word(), Some("give"));
    assert_eq!(command.indirect_word(), Some("troll"));
    assert_eq!(command.object_word(), Some("sword"));
}

#[test]
fn directions_bare_and_with_verb() {
    let table = table();
    let parser = CommandParser::new(&table);

    let bare = parser.parse("n").unwrap();
    assert_eq!(bare.verb, None);
    assert_eq!(bare.direction_word(), Some("north"));

    let walked = parser.parse("walk north").unwrap();
    assert_eq!(walked.verb_word(), Some("go"));
    assert_eq!(walked.direction_word(), Some("north"));
}

#[test]
fn direction_that_is_also_a_noun_fills_the_object_after_a_verb() {
    let fragment = VocabularyFragment::new().verb("go", &["walk"]).word(
        WordRecord::new("north", WordKinds::DIRECTION | WordKinds::NOUN).with_synonyms(["n"]),
    );
    let table = VocabularyTable::from_fragment(&fragment).unwrap();
    let parser = CommandParser::new(&table);

    let walked = parser.parse("walk north").unwrap();
    assert_eq!(walked.object_word(), Some("north"));
    assert_eq!(walked.direction, None);
    assert_eq!(walked.heading(), Some("north"));

    let bare = parser.parse("n").unwrap();
    assert_eq!(bare.direction_word(), Some("north"));
    assert_eq!(bare.object_word(), None);
}

#[test]
fn in_is_a_direction_after_go_and_a_preposition_after_an_object() {
    let table = table();
    let parser = CommandParser::new(&table);

    let entered = parser.parse("go in").unwrap();
    assert_eq!(entered.direction_word(), Some("in"));
    assert_eq!(entered.preposition, None);

    let stowed = parser.parse("put lamp in box").unwrap();
    assert_eq!(stowed.direction, None);
    assert_eq!(stowed.preposition.as_ref().unwrap().word, "in");
}

#[test]
fn look_at_adjective_noun() {
    let table = table();
    let command = CommandParser::new(&table).parse("look at the rusty sword").unwrap();

    assert_eq!(command.verb_word(), Some("look"));
    assert_eq!(command.preposition.as_ref().unwrap().word, "at");
    assert_eq!(command.direct_adjective.as_ref().unwrap().word, "rusty");
    assert_eq!(command.object_word(), Some("sword"));
}

// =============================================================================
// Rejected Input
// =============================================================================

#[test]
fn empty_input_matches_no_pattern() {
    let table = table();
    let error = CommandParser::new(&table).parse("").unwrap_err();
    assert_eq!(error.failure, ParseFailure::NoPatternMatch);
    assert_eq!(error.raw_text, "");
}

#[test]
fn unknown_word_is_named() {
    let table = table();
    let error = CommandParser::new(&table).parse("xyzzy").unwrap_err();
    assert_eq!(error.failure, ParseFailure::UnknownWord("xyzzy".to_string()));
}

#[test]
fn first_unknown_word_wins() {
    let table = table();
    let error = CommandParser::new(&table)
        .parse("take the plugh frobozz")
        .unwrap_err();
    assert_eq!(error.failure, ParseFailure::UnknownWord("plugh".to_string()));
}

#[test]
fn known_words_in_the_wrong_order() {
    let table = table();
    let parser = CommandParser::new(&table);

    for input in ["sword take", "rusty", "take sword rusty", "the the the"] {
        let error = parser.parse(input).unwrap_err();
        assert_eq!(error.failure, ParseFailure::NoPatternMatch, "{input}");
    }
}

#[test]
fn seven_words_is_too_long() {
    let table = table();
    let error = CommandParser::new(&table)
        .parse("put rusty sword in wooden box north")
        .unwrap_err();
    assert_eq!(error.failure, ParseFailure::NoPatternMatch);
}

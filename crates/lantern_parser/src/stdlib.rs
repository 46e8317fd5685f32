//! Standard vocabulary for adventure games.
//!
//! The engine's built-in modules contribute this fragment at the lowest
//! precedence tier; games override or extend it with their own fragments.

use crate::vocabulary::VocabularyFragment;

/// Articles dropped before matching.
pub const ARTICLES: &[&str] = &["the", "a", "an"];

/// Directions as `(canonical, synonyms)`.
pub const DIRECTIONS: &[(&str, &[&str])] = &[
    // Cardinal directions
    ("north", &["n"]),
    ("south", &["s"]),
    ("east", &["e"]),
    ("west", &["w"]),
    // Vertical directions
    ("up", &["u"]),
    ("down", &["d"]),
    // Diagonal directions
    ("northeast", &["ne"]),
    ("northwest", &["nw"]),
    ("southeast", &["se"]),
    ("southwest", &["sw"]),
    // Special directions
    ("in", &["inside"]),
    ("out", &["outside"]),
];

/// Prepositions. `in` is also a direction; the two merge into one record.
pub const PREPOSITIONS: &[&str] = &[
    "in", "on", "with", "to", "from", "at", "about", "through", "under", "behind", "into", "onto",
];

/// Verbs as `(canonical, synonyms)`.
pub const VERBS: &[(&str, &[&str])] = &[
    // Movement
    ("go", &["walk", "run", "travel", "head"]),
    ("climb", &["scale", "ascend"]),
    // Looking
    ("look", &["l"]),
    ("examine", &["x", "inspect", "describe"]),
    ("read", &["peruse"]),
    // Manipulation
    ("take", &["get", "grab", "acquire"]),
    ("drop", &["discard"]),
    ("put", &["place", "insert"]),
    ("give", &["hand"]),
    ("show", &["display", "present"]),
    ("throw", &["toss", "hurl"]),
    // Containers
    ("open", &[]),
    ("close", &["shut"]),
    ("lock", &[]),
    ("unlock", &[]),
    // Combat
    ("attack", &["kill", "hit", "strike", "fight"]),
    // Interaction
    ("use", &["operate", "activate"]),
    ("push", &["press", "shove"]),
    ("pull", &["tug", "yank"]),
    ("turn", &["rotate", "twist"]),
    ("touch", &["feel", "poke"]),
    // Inventory
    ("inventory", &["i", "inv"]),
    ("wear", &["don"]),
    ("remove", &["doff"]),
    // Meta
    ("wait", &["z"]),
    ("help", &[]),
];

/// Builds the standard core-tier vocabulary fragment.
#[must_use]
pub fn core_vocabulary() -> VocabularyFragment {
    let mut fragment = VocabularyFragment::new();
    for article in ARTICLES {
        fragment = fragment.article(article);
    }
    for (direction, synonyms) in DIRECTIONS {
        fragment = fragment.direction(direction, synonyms);
    }
    for preposition in PREPOSITIONS {
        fragment = fragment.preposition(preposition);
    }
    for (verb, synonyms) in VERBS {
        fragment = fragment.verb(verb, synonyms);
    }
    fragment
}

//! Shared vocabulary for parser tests.

use lantern_parser::stdlib::core_vocabulary;
use lantern_parser::{VocabularyFragment, VocabularyTable};

/// Game-tier words layered over the core vocabulary.
pub fn game_fragment() -> VocabularyFragment {
    VocabularyFragment::new()
        .noun("sword", &["blade"])
        .noun("lamp", &["lantern"])
        .noun("box", &["crate"])
        .noun("troll", &[])
        .adjective("rusty")
        .adjective("brass")
        .adjective("wooden")
}

/// Core vocabulary at tier 3 plus the game fragment at tier 1.
pub fn table() -> VocabularyTable {
    let core = core_vocabulary();
    let game = game_fragment();
    VocabularyTable::merge([(3, &core), (1, &game)]).unwrap()
}

//! Sessions: undo history, reload and batch transcripts.

use lantern_runtime::{Session, SessionConfig, run_batch};
use proptest::prelude::*;

const COMMANDS: &[&str] = &[
    "take sword",
    "take anvil",
    "drop sword",
    "push lever",
    "n",
    "s",
    "take hammer",
    "drop hammer",
    "look",
    "x tapestry",
    "i",
    "xyzzy",
];

fn session() -> Session {
    Session::demo(SessionConfig::default().with_banner(false)).unwrap()
}

#[test]
fn undo_walks_back_through_the_gate() {
    let mut session = session();
    session.execute("push lever").unwrap();
    session.execute("north").unwrap();
    assert_eq!(
        session.world().player_room(),
        session.world().room_named("Yard")
    );

    session.execute("undo").unwrap();
    assert_eq!(
        session.world().player_room(),
        session.world().room_named("Forge")
    );
    session.execute("undo").unwrap();
    assert_eq!(session.execute("n").unwrap(), "You can't go that way.");
}

#[test]
fn batch_transcript_plays_the_demo() {
    let mut session = session();
    let script = "take rusty sword\ntake anvil\npush lever\nnorth\ntake mallet\ninventory\n";
    let mut transcript = Vec::new();

    run_batch(&mut session, script.as_bytes(), &mut transcript).unwrap();

    let transcript = String::from_utf8(transcript).unwrap();
    assert!(transcript.contains("> take anvil\nIt's bolted down.\n"));
    assert!(transcript.contains("a gate grinds open"));
    assert!(transcript.contains("You are carrying:\n  a rusty sword\n  a hammer"));
}

proptest! {
    #[test]
    fn undoing_every_change_restores_the_start(
        script in proptest::collection::vec(proptest::sample::select(COMMANDS), 0..20)
    ) {
        let mut session = session();
        let start = session.world().clone();

        for line in &script {
            session.execute(line).unwrap();
        }
        while session.undo_depth() > 0 {
            prop_assert_eq!(session.execute("undo").unwrap(), "Undone.");
        }

        prop_assert_eq!(session.world(), &start);
    }
}

//! Fallback interpretation of input the fixed shapes reject.

use lantern_parser::{
    CommandParser, FallbackInterpreter, InterpretedCommand, ParseFailure, ParseRoute,
    VocabularyTable,
};

use crate::common::table;

/// Understands "could you please <verb> the <noun>" and nothing else.
struct PoliteRewriter {
    calls: usize,
}

impl FallbackInterpreter for PoliteRewriter {
    fn interpret(&mut self, raw_text: &str, table: &VocabularyTable) -> Option<InterpretedCommand> {
        self.calls += 1;
        let rest = raw_text.to_lowercase();
        let rest = rest.strip_prefix("could you please ")?;
        let mut words = rest.split_whitespace().filter(|w| *w != "the");
        let verb = words.next()?.to_string();
        let object = words.next().map(str::to_string);
        table.contains(&verb).then(|| InterpretedCommand {
            verb: Some(verb),
            object,
            actor: Some("butler".to_string()),
            ..InterpretedCommand::default()
        })
    }
}

#[test]
fn rewriter_rescues_free_form_input() {
    let table = table();
    let parser = CommandParser::new(&table);
    let mut rewriter = PoliteRewriter { calls: 0 };

    let parsed = parser
        .parse_or_interpret("Could you please grab the lantern", Some(&mut rewriter))
        .unwrap();

    assert_eq!(parsed.command.verb_word(), Some("take"));
    assert_eq!(parsed.command.object_word(), Some("lamp"));
    assert_eq!(parsed.command.raw_text, "Could you please grab the lantern");
    assert_eq!(
        parsed.route,
        ParseRoute::Fallback {
            actor: Some("butler".to_string())
        }
    );
}

#[test]
fn rewriter_is_not_consulted_for_valid_input() {
    let table = table();
    let mut rewriter = PoliteRewriter { calls: 0 };

    let parsed = CommandParser::new(&table)
        .parse_or_interpret("take lamp", Some(&mut rewriter))
        .unwrap();

    assert_eq!(parsed.route, ParseRoute::Pattern);
    assert_eq!(rewriter.calls, 0);
}

#[test]
fn declined_rewrite_keeps_original_failure() {
    let table = table();
    let mut rewriter = PoliteRewriter { calls: 0 };

    let error = CommandParser::new(&table)
        .parse_or_interpret("xyzzy", Some(&mut rewriter))
        .unwrap_err();

    assert_eq!(error.failure, ParseFailure::UnknownWord("xyzzy".to_string()));
    assert_eq!(rewriter.calls, 1);
}

#[test]
fn rewrite_with_unknown_object_keeps_original_failure() {
    let table = table();
    let mut rewriter = PoliteRewriter { calls: 0 };

    let error = CommandParser::new(&table)
        .parse_or_interpret("could you please take the moon", Some(&mut rewriter))
        .unwrap_err();

    assert_eq!(error.failure, ParseFailure::UnknownWord("could".to_string()));
}

//! Parsing invariants over generated input.

use lantern_parser::CommandParser;
use lantern_parser::stdlib::ARTICLES;
use proptest::prelude::*;

use crate::common::table;

/// Verb spellings paired with their canonical verb.
const VERBS: &[(&str, &str)] = &[
    ("take", "take"),
    ("get", "take"),
    ("grab", "take"),
    ("drop", "drop"),
    ("examine", "examine"),
    ("x", "examine"),
    ("push", "push"),
    ("press", "push"),
];

/// Noun spellings paired with their canonical noun.
const NOUNS: &[(&str, &str)] = &[
    ("sword", "sword"),
    ("blade", "sword"),
    ("lamp", "lamp"),
    ("lantern", "lamp"),
    ("box", "box"),
    ("crate", "box"),
];

const ADJECTIVES: &[&str] = &["rusty", "brass", "wooden"];

/// A well-formed `verb [article] [adjective] noun` command.
#[derive(Clone, Debug)]
struct Phrase {
    verb: usize,
    noun: usize,
    adjective: Option<usize>,
    article: Option<usize>,
    shout: bool,
}

impl Phrase {
    fn render(&self, canonical: bool) -> String {
        let pick = |pair: (&'static str, &'static str)| if canonical { pair.1 } else { pair.0 };
        let mut words = vec![pick(VERBS[self.verb])];
        if let Some(article) = self.article {
            words.push(ARTICLES[article]);
        }
        if let Some(adjective) = self.adjective {
            words.push(ADJECTIVES[adjective]);
        }
        words.push(pick(NOUNS[self.noun]));

        let text = words.join(" ");
        if self.shout { text.to_uppercase() } else { text }
    }
}

fn phrase() -> impl Strategy<Value = Phrase> {
    (
        0..VERBS.len(),
        0..NOUNS.len(),
        proptest::option::of(0..ADJECTIVES.len()),
        proptest::option::of(0..ARTICLES.len()),
        any::<bool>(),
    )
        .prop_map(|(verb, noun, adjective, article, shout)| Phrase {
            verb,
            noun,
            adjective,
            article,
            shout,
        })
}

/// Surrounds words with arbitrary runs of spaces and tabs.
fn padded(text: &str, gaps: &[usize]) -> String {
    let mut out = String::new();
    for (i, word) in text.split(' ').enumerate() {
        let gap = gaps.get(i).copied().unwrap_or(1);
        out.extend((0..gap).map(|j| if j % 2 == 0 { ' ' } else { '\t' }));
        out.push_str(word);
    }
    out.push_str("  ");
    out
}

proptest! {
    #[test]
    fn raw_text_is_kept_verbatim(p in phrase(), gaps in proptest::collection::vec(1usize..4, 5)) {
        let table = table();
        let input = padded(&p.render(false), &gaps);
        let command = CommandParser::new(&table).parse(&input).unwrap();
        prop_assert_eq!(command.raw_text, input);
    }

    #[test]
    fn parsing_the_canonical_form_is_idempotent(p in phrase()) {
        let table = table();
        let parser = CommandParser::new(&table);
        let input = p.render(false);

        let first = parser.parse(&input).unwrap();
        let canonical = parser.canonicalize(&input);
        let second = parser.parse(&canonical).unwrap();

        prop_assert!(first.same_intent(&second));
        prop_assert_eq!(parser.canonicalize(&canonical), canonical);
    }

    #[test]
    fn synonyms_parse_like_their_canonical_word(p in phrase()) {
        let table = table();
        let parser = CommandParser::new(&table);

        let with_synonyms = parser.parse(&p.render(false)).unwrap();
        let with_canonical = parser.parse(&p.render(true)).unwrap();

        prop_assert!(with_synonyms.same_intent(&with_canonical));
        prop_assert_eq!(with_synonyms.verb_word(), Some(VERBS[p.verb].1));
        prop_assert_eq!(with_synonyms.object_word(), Some(NOUNS[p.noun].1));
    }

    #[test]
    fn articles_never_change_the_match(p in phrase(), article in 0..ARTICLES.len()) {
        let table = table();
        let parser = CommandParser::new(&table);

        let bare = Phrase { article: None, ..p.clone() };
        let with_article = Phrase { article: Some(article), ..p };

        let a = parser.parse(&bare.render(false)).unwrap();
        let b = parser.parse(&with_article.render(false)).unwrap();
        prop_assert!(a.same_intent(&b));
    }

    #[test]
    fn parser_never_panics(input in "\\PC{0,40}") {
        let table = table();
        let _ = CommandParser::new(&table).parse(&input);
    }
}

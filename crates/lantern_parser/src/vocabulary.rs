//! Vocabulary table for parser word lookup.
//!
//! Every module tier may contribute a [`VocabularyFragment`]. Fragments are
//! merged into a single [`VocabularyTable`] in which each word and synonym
//! resolves to exactly one [`WordRecord`].

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use lantern_foundation::{Error, ErrorKind, Result};
use tracing::debug;

bitflags! {
    /// The grammatical roles a word may play.
    ///
    /// A word may carry several kinds, e.g. `in` is both a direction and a
    /// preposition.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct WordKinds: u8 {
        /// Verb (always the first token of a non-direction command)
        const VERB = 1;
        /// Noun
        const NOUN = 1 << 1;
        /// Adjective qualifying a noun
        const ADJECTIVE = 1 << 2;
        /// Preposition
        const PREPOSITION = 1 << 3;
        /// Direction
        const DIRECTION = 1 << 4;
        /// Article, dropped before matching
        const ARTICLE = 1 << 5;
    }
}

impl fmt::Display for WordKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter_names().map(|(name, _)| name).collect();
        write!(f, "{}", names.join("|").to_lowercase())
    }
}

/// A canonical vocabulary entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordRecord {
    /// Canonical word text (lowercase)
    pub word: String,
    /// Kinds this word may play
    pub kinds: WordKinds,
    /// Synonyms that resolve to this record
    pub synonyms: BTreeSet<String>,
    /// Opaque numeric tag for game-specific use
    pub tag: Option<i64>,
}

impl WordRecord {
    /// Creates a record with no synonyms.
    #[must_use]
    pub fn new(word: impl Into<String>, kinds: WordKinds) -> Self {
        Self {
            word: word.into().to_lowercase(),
            kinds,
            synonyms: BTreeSet::new(),
            tag: None,
        }
    }

    /// Adds synonyms.
    #[must_use]
    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.synonyms
            .extend(synonyms.into_iter().map(|s| s.as_ref().to_lowercase()));
        self.synonyms.remove(&self.word);
        self
    }

    /// Sets the numeric tag.
    #[must_use]
    pub fn with_tag(mut self, tag: i64) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Returns true if the word carries any of the given kinds.
    #[must_use]
    pub fn is(&self, kinds: WordKinds) -> bool {
        self.kinds.intersects(kinds)
    }

    /// The canonical word followed by all synonyms.
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.word.as_str()).chain(self.synonyms.iter().map(String::as_str))
    }
}

/// Shared handle to a record in a merged table.
pub type WordRef = Arc<WordRecord>;

/// A set of words contributed by one module.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VocabularyFragment {
    /// Records in declaration order
    pub records: Vec<WordRecord>,
}

impl VocabularyFragment {
    /// Creates an empty fragment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record.
    #[must_use]
    pub fn word(mut self, record: WordRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Adds a verb with synonyms.
    #[must_use]
    pub fn verb(self, word: &str, synonyms: &[&str]) -> Self {
        self.word(WordRecord::new(word, WordKinds::VERB).with_synonyms(synonyms))
    }

    /// Adds a noun with synonyms.
    #[must_use]
    pub fn noun(self, word: &str, synonyms: &[&str]) -> Self {
        self.word(WordRecord::new(word, WordKinds::NOUN).with_synonyms(synonyms))
    }

    /// Adds an adjective.
    #[must_use]
    pub fn adjective(self, word: &str) -> Self {
        self.word(WordRecord::new(word, WordKinds::ADJECTIVE))
    }

    /// Adds a preposition.
    #[must_use]
    pub fn preposition(self, word: &str) -> Self {
        self.word(WordRecord::new(word, WordKinds::PREPOSITION))
    }

    /// Adds a direction with synonyms.
    #[must_use]
    pub fn direction(self, word: &str, synonyms: &[&str]) -> Self {
        self.word(WordRecord::new(word, WordKinds::DIRECTION).with_synonyms(synonyms))
    }

    /// Adds an article.
    #[must_use]
    pub fn article(self, word: &str) -> Self {
        self.word(WordRecord::new(word, WordKinds::ARTICLE))
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the fragment has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Clone, Debug)]
struct TableEntry {
    record: WordRef,
    tier: u32,
}

/// Merged, case-folded mapping from every known spelling to its record.
#[derive(Clone, Debug, Default)]
pub struct VocabularyTable {
    words: HashMap<String, TableEntry>,
}

impl VocabularyTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from a single fragment at tier 1.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::VocabularyConflict`] if one spelling resolves to
    /// two different canonical words.
    pub fn from_fragment(fragment: &VocabularyFragment) -> Result<Self> {
        Self::merge([(1, fragment)])
    }

    /// Merges tiered fragments into one table.
    ///
    /// Tiers are applied from the highest number (least specific) down to
    /// tier 1, so more specific tiers overwrite less specific ones on exact
    /// collisions. All fragments of one tier form a single merge pass.
    /// When a pass takes over a record's canonical spelling, that record's
    /// other spellings follow it to the new record.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::VocabularyConflict`] if, within one pass, a spelling
    ///   resolves to two different canonical words.
    /// - [`ErrorKind::CrossTierVerbConflict`] if a spelling is a verb in one
    ///   tier and a different verb in another.
    pub fn merge<'a, I>(fragments: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, &'a VocabularyFragment)>,
    {
        let mut by_tier: BTreeMap<u32, Vec<&VocabularyFragment>> = BTreeMap::new();
        for (tier, fragment) in fragments {
            if tier == 0 {
                return Err(Error::new(ErrorKind::InvalidTier(tier)));
            }
            by_tier.entry(tier).or_default().push(fragment);
        }

        // spelling -> canonical word, canonical word -> (record, tier)
        let mut index: HashMap<String, String> = HashMap::new();
        let mut records: HashMap<String, (WordRecord, u32)> = HashMap::new();

        for (&tier, fragments) in by_tier.iter().rev() {
            let pass = MergePass::collect(fragments)?;
            // old canonical word -> the pass record that took its spelling
            let mut displaced: Vec<(String, String)> = Vec::new();

            for (spelling, incoming) in &pass.index {
                let Some(existing) = index.get(spelling) else {
                    continue;
                };
                if existing == incoming {
                    continue;
                }
                let (existing_record, existing_tier) = &records[existing];
                let incoming_record = &pass.records[incoming];
                if existing_record.is(WordKinds::VERB) && incoming_record.is(WordKinds::VERB) {
                    return Err(Error::new(ErrorKind::CrossTierVerbConflict {
                        word: spelling.clone(),
                        existing: existing.clone(),
                        existing_tier: *existing_tier,
                        incoming: incoming.clone(),
                        incoming_tier: tier,
                    }));
                }
                debug!(
                    word = %spelling,
                    from = %existing,
                    to = %incoming,
                    tier,
                    "vocabulary override"
                );
                if existing == spelling {
                    displaced.push((existing.clone(), incoming.clone()));
                }
            }

            for (word, record) in pass.records {
                records.insert(word, (record, tier));
            }
            // A record whose canonical spelling was taken hands its remaining
            // synonyms to the new owner.
            for (old, new) in &displaced {
                for canonical in index.values_mut().filter(|c| c.as_str() == old.as_str()) {
                    canonical.clone_from(new);
                }
            }
            index.extend(pass.index);
        }

        Ok(Self::assemble(index, records))
    }

    /// Rebuilds records so each lists exactly the spellings that resolve to it.
    fn assemble(
        index: HashMap<String, String>,
        mut records: HashMap<String, (WordRecord, u32)>,
    ) -> Self {
        let mut spellings: HashMap<&str, Vec<&str>> = HashMap::new();
        for (spelling, canonical) in &index {
            spellings
                .entry(canonical.as_str())
                .or_default()
                .push(spelling.as_str());
        }

        let mut shared: HashMap<&str, (WordRef, u32)> = HashMap::new();
        for (canonical, owned) in &spellings {
            let Some((mut record, tier)) = records.remove(*canonical) else {
                continue;
            };
            record.synonyms = owned
                .iter()
                .filter(|s| **s != record.word)
                .map(|s| (*s).to_string())
                .collect();
            shared.insert(*canonical, (Arc::new(record), tier));
        }

        let words = index
            .iter()
            .filter_map(|(spelling, canonical)| {
                shared.get(canonical.as_str()).map(|(record, tier)| {
                    (
                        spelling.clone(),
                        TableEntry {
                            record: Arc::clone(record),
                            tier: *tier,
                        },
                    )
                })
            })
            .collect();

        Self { words }
    }

    /// Looks up a token, case-insensitively.
    #[must_use]
    pub fn lookup(&self, token: &str) -> Option<&WordRef> {
        self.entry(token).map(|e| &e.record)
    }

    /// Returns the tier that contributed the record a token resolves to.
    #[must_use]
    pub fn tier_of(&self, token: &str) -> Option<u32> {
        self.entry(token).map(|e| e.tier)
    }

    fn entry(&self, token: &str) -> Option<&TableEntry> {
        let key: Cow<'_, str> = if token.chars().any(char::is_uppercase) {
            Cow::Owned(token.to_lowercase())
        } else {
            Cow::Borrowed(token)
        };
        self.words.get(key.as_ref())
    }

    /// Returns true if the token is known.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.entry(token).is_some()
    }

    /// Number of known spellings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if no words are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Distinct records, sorted by canonical word.
    #[must_use]
    pub fn records(&self) -> Vec<WordRef> {
        let mut seen: BTreeMap<&str, &WordRef> = BTreeMap::new();
        for entry in self.words.values() {
            seen.entry(entry.record.word.as_str()).or_insert(&entry.record);
        }
        seen.into_values().map(Arc::clone).collect()
    }

    /// Canonical verbs, sorted.
    #[must_use]
    pub fn verbs(&self) -> Vec<WordRef> {
        self.records()
            .into_iter()
            .filter(|r| r.is(WordKinds::VERB))
            .collect()
    }

    /// All known spellings, sorted. Used for line-editor completion.
    #[must_use]
    pub fn spellings(&self) -> Vec<&str> {
        let mut all: Vec<&str> = self.words.keys().map(String::as_str).collect();
        all.sort_unstable();
        all
    }
}

/// The records and spellings contributed by all fragments of one tier.
struct MergePass {
    records: BTreeMap<String, WordRecord>,
    index: BTreeMap<String, String>,
}

impl MergePass {
    fn collect(fragments: &[&VocabularyFragment]) -> Result<Self> {
        let mut records: BTreeMap<String, WordRecord> = BTreeMap::new();
        for record in fragments.iter().flat_map(|f| &f.records) {
            match records.get_mut(&record.word) {
                Some(existing) => {
                    existing.kinds |= record.kinds;
                    existing.synonyms.extend(record.synonyms.iter().cloned());
                    if record.tag.is_some() {
                        existing.tag = record.tag;
                    }
                }
                None => {
                    records.insert(record.word.clone(), record.clone());
                }
            }
        }

        let mut index: BTreeMap<String, String> = BTreeMap::new();
        // Canonical words first, so a synonym shadowing another record's
        // canonical word is reported against that word.
        for word in records.keys() {
            index.insert(word.clone(), word.clone());
        }
        for record in records.values() {
            for synonym in &record.synonyms {
                match index.get(synonym) {
                    Some(existing) if existing != &record.word => {
                        return Err(Error::vocabulary_conflict(
                            synonym.clone(),
                            existing.clone(),
                            record.word.clone(),
                        ));
                    }
                    _ => {
                        index.insert(synonym.clone(), record.word.clone());
                    }
                }
            }
        }

        Ok(Self { records, index })
    }
}

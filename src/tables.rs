//! In-memory reference tables, built from [`BackingStore`] rows.
//!
//! Every table is immutable once built. Keys are normalized on the way in so
//! lookups never have to trim or case-fold.
use crate::day::Day;
use crate::pair::{PairClass, PairMeaning};
use crate::store::{BackingStore, DayForbiddenRow, SchemeRow, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, trace};

// ─────────────────────────────────────────────────────────────────────────────
// Scheme tables
// ─────────────────────────────────────────────────────────────────────────────

/// Character → value for one numbering scheme. Missing characters are worth 0.
#[derive(Debug, Clone, Default)]
pub struct SchemeTable {
    values: HashMap<char, i64>,
}

impl SchemeTable {
    pub fn from_rows(rows: Vec<SchemeRow>) -> Result<Self, StoreError> {
        let mut values = HashMap::with_capacity(rows.len());
        for row in rows {
            let key = row.character.trim();
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    values.insert(c, row.value);
                }
                _ => {
                    return Err(StoreError::Schema(format!(
                        "scheme key `{}` is not a single code point",
                        row.character
                    )));
                }
            }
        }
        Ok(Self { values })
    }

    #[inline]
    pub fn value(&self, c: char) -> i64 {
        match self.values.get(&c) {
            Some(&v) => v,
            None => {
                trace!(code_point = %c, "no scheme value, counting 0");
                0
            }
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Forbidden characters per day
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ForbiddenTable {
    by_day: [HashSet<char>; 8],
}

impl ForbiddenTable {
    /// Rows for the same day are merged. Unknown day keys are a schema error.
    pub fn from_rows(rows: Vec<DayForbiddenRow>) -> Result<Self, StoreError> {
        let mut table = Self::default();
        for row in rows {
            let day = Day::parse_with_aliases(&row.day)
                .map_err(|e| StoreError::Schema(format!("day forbidden table: {e}")))?;
            table.by_day[day.index()].extend(row.chars);
        }
        Ok(table)
    }

    #[inline]
    pub fn is_forbidden(&self, day: Day, c: char) -> bool {
        self.by_day[day.index()].contains(&c)
    }

    pub fn chars(&self, day: Day) -> &HashSet<char> {
        &self.by_day[day.index()]
    }

    /// Bitmap of the days on which any of `chars` is forbidden.
    pub fn day_mask(&self, chars: impl IntoIterator<Item = char> + Clone) -> u8 {
        Day::ALL
            .into_iter()
            .filter(|&day| chars.clone().into_iter().any(|c| self.is_forbidden(day, c)))
            .fold(0, |mask, day| mask | day.bit())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pair meanings
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct PairTable {
    by_pair: HashMap<String, PairMeaning>,
}

impl PairTable {
    pub fn from_rows(rows: Vec<PairMeaning>) -> Self {
        let by_pair = rows
            .into_iter()
            .map(|mut m| {
                m.pair = m.pair.trim().to_owned();
                (m.pair.clone(), m.recolored())
            })
            .collect();
        Self { by_pair }
    }

    pub fn get(&self, pair: &str) -> Option<&PairMeaning> {
        self.by_pair.get(pair)
    }

    /// Stored meaning, or the neutral record when the pair is unknown.
    pub fn meaning(&self, pair: &str) -> PairMeaning {
        match self.by_pair.get(pair) {
            Some(m) => m.clone(),
            None => {
                trace!(pair, "no pair meaning, using neutral");
                PairMeaning::neutral(pair)
            }
        }
    }

    pub fn resolve<S: AsRef<str>>(&self, pairs: &[S]) -> Vec<PairMeaning> {
        pairs.iter().map(|p| self.meaning(p.as_ref())).collect()
    }

    pub fn class_of(&self, pair: &str) -> PairClass {
        self.by_pair
            .get(pair)
            .map(|m| m.class)
            .unwrap_or(PairClass::Neutral)
    }

    /// Σ `pair_score`; unknown pairs add 0.
    pub fn score<S: AsRef<str>>(&self, pairs: &[S]) -> i64 {
        pairs
            .iter()
            .filter_map(|p| self.by_pair.get(p.as_ref()))
            .map(|m| m.pair_score)
            .sum()
    }

    pub fn len(&self) -> usize {
        self.by_pair.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pair.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Name corpus
// ─────────────────────────────────────────────────────────────────────────────

/// A pre-analyzed reference name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusName {
    pub id: u64,
    pub text: String,
    #[serde(default)]
    pub primary_pairs: Vec<String>,
    #[serde(default)]
    pub shadow_pairs: Vec<String>,
    #[serde(default)]
    pub primary_classes: Vec<PairClass>,
    #[serde(default)]
    pub shadow_classes: Vec<PairClass>,
    #[serde(default)]
    pub forbidden_by_day: BTreeMap<Day, bool>,
}

impl CorpusName {
    #[inline]
    pub fn is_forbidden_on(&self, day: Day) -> bool {
        self.forbidden_by_day.get(&day).copied().unwrap_or(false)
    }

    /// Every class of both pillars is D10/D8/D5 (vacuously true when empty).
    pub fn all_auspicious(&self) -> bool {
        self.primary_classes
            .iter()
            .chain(&self.shadow_classes)
            .all(|c| c.is_auspicious())
    }

    /// Both pillars have classes and all of them are auspicious.
    pub fn is_top_tier(&self) -> bool {
        !self.primary_classes.is_empty() && !self.shadow_classes.is_empty() && self.all_auspicious()
    }

    pub fn has_bad_pair(&self) -> bool {
        self.primary_classes
            .iter()
            .chain(&self.shadow_classes)
            .any(|c| c.is_inauspicious())
    }
}

/// A corpus entry with its search filters precomputed.
#[derive(Debug, Clone)]
pub(crate) struct CorpusEntry {
    pub(crate) name: CorpusName,
    pub(crate) chars: Vec<char>,
    pub(crate) forbidden_mask: u8,
    pub(crate) all_auspicious: bool,
    pub(crate) has_bad_pair: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub(crate) entries: Vec<CorpusEntry>,
}

impl Corpus {
    pub fn from_names(names: Vec<CorpusName>) -> Self {
        let entries = names
            .into_iter()
            .map(|mut name| {
                name.text = name.text.trim().to_owned();
                let forbidden_mask = Day::ALL
                    .into_iter()
                    .filter(|&d| name.is_forbidden_on(d))
                    .fold(0u8, |mask, d| mask | d.bit());
                CorpusEntry {
                    chars: name.text.chars().collect(),
                    forbidden_mask,
                    all_auspicious: name.all_auspicious(),
                    has_bad_pair: name.has_bad_pair(),
                    name,
                }
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &CorpusName> {
        self.entries.iter().map(|e| &e.name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Loaders
// ─────────────────────────────────────────────────────────────────────────────

/// All five tables, loaded eagerly in one go.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    pub scheme_a: SchemeTable,
    pub scheme_b: SchemeTable,
    pub forbidden: ForbiddenTable,
    pub pairs: PairTable,
    pub corpus: Corpus,
}

impl ReferenceTables {
    pub fn load(store: &dyn BackingStore) -> Result<Self, StoreError> {
        Ok(Self {
            scheme_a: load_scheme_a(store)?,
            scheme_b: load_scheme_b(store)?,
            forbidden: load_forbidden(store)?,
            pairs: load_pairs(store)?,
            corpus: load_corpus(store)?,
        })
    }
}

pub fn load_scheme_a(store: &dyn BackingStore) -> Result<SchemeTable, StoreError> {
    let table = SchemeTable::from_rows(store.read_scheme_a()?)?;
    debug!(rows = table.len(), "loaded scheme A");
    Ok(table)
}

pub fn load_scheme_b(store: &dyn BackingStore) -> Result<SchemeTable, StoreError> {
    let table = SchemeTable::from_rows(store.read_scheme_b()?)?;
    debug!(rows = table.len(), "loaded scheme B");
    Ok(table)
}

pub fn load_forbidden(store: &dyn BackingStore) -> Result<ForbiddenTable, StoreError> {
    let table = ForbiddenTable::from_rows(store.read_day_forbidden()?)?;
    debug!(
        days = Day::ALL.iter().filter(|&&d| !table.chars(d).is_empty()).count(),
        "loaded day forbidden sets"
    );
    Ok(table)
}

pub fn load_pairs(store: &dyn BackingStore) -> Result<PairTable, StoreError> {
    let table = PairTable::from_rows(store.read_pair_meanings()?);
    debug!(rows = table.len(), "loaded pair meanings");
    Ok(table)
}

pub fn load_corpus(store: &dyn BackingStore) -> Result<Corpus, StoreError> {
    let corpus = Corpus::from_names(store.read_corpus()?);
    debug!(rows = corpus.len(), "loaded name corpus");
    Ok(corpus)
}

//! Nearest-name search over the corpus.
//!
//! * Edit distance is Levenshtein with unit costs, counted in code points
//! * Day and pair-class filters are precomputed per entry (see [`Corpus`])
//! * A bounded max-heap keeps the best `offset + limit` candidates seen so
//!   far; its worst key bounds every later distance computation
//!
//! Results are ordered by `(distance, id)`, after names starting with the
//! preferred consonant when one is given.
use crate::day::Day;
use crate::tables::{Corpus, CorpusEntry, CorpusName, PairTable};
use crate::thai::is_leading_vowel;
use serde::{Deserialize, Serialize};
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation flag, checked between candidates.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub name: CorpusName,
    pub distance: usize,
    /// Σ pair score over the stored primary pairs.
    pub overall_score: i64,
    pub is_top_tier: bool,
    pub has_bad_pair: bool,
}

/// Which pair classes a candidate may carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PairFilter {
    #[default]
    Any,
    /// No R10/R7/R5 class on either pillar. Neutral pairs pass.
    NoBadPairs,
    /// Every class on both pillars is D10/D8/D5.
    AuspiciousOnly,
}

impl From<bool> for PairFilter {
    /// `true` is the auspicious-only filter.
    fn from(auspicious_only: bool) -> Self {
        if auspicious_only {
            PairFilter::AuspiciousOnly
        } else {
            PairFilter::Any
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimilarOptions {
    pub limit: usize,
    /// Ranked candidates skipped before the first one returned.
    pub offset: usize,
    pub filter: PairFilter,
    /// Keep names carrying a character forbidden on the query day.
    pub allow_forbidden: bool,
    /// Names starting with this consonant, bare or behind เ แ โ ใ ไ, rank
    /// ahead of every other name.
    pub preferred_consonant: Option<char>,
}

impl SimilarOptions {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            offset: 0,
            filter: PairFilter::Any,
            allow_forbidden: false,
            preferred_consonant: None,
        }
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn filter(mut self, filter: PairFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn allow_forbidden(mut self, on: bool) -> Self {
        self.allow_forbidden = on;
        self
    }

    pub fn prefer(mut self, consonant: char) -> Self {
        self.preferred_consonant = Some(consonant);
        self
    }
}

impl Default for SimilarOptions {
    fn default() -> Self {
        Self::new(10)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Query<'a> {
    pub text: &'a str,
    pub day: Day,
    pub options: SimilarOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

// ─────────────────────────────────────────────────────────────────────────────
// Edit distance
// ─────────────────────────────────────────────────────────────────────────────

/// Two-row Levenshtein DP with reusable buffers.
#[derive(Debug, Default)]
pub struct EditDistance {
    prev: Vec<usize>,
    curr: Vec<usize>,
}

impl EditDistance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distance between `a` and `b`, or `None` as soon as it is certain to
    /// exceed `max`.
    pub fn within(&mut self, a: &[char], b: &[char], max: usize) -> Option<usize> {
        if a.len().abs_diff(b.len()) > max {
            return None;
        }
        if a.is_empty() || b.is_empty() {
            return Some(a.len().max(b.len()));
        }

        self.prev.clear();
        self.prev.extend(0..=b.len());
        self.curr.clear();
        self.curr.resize(b.len() + 1, 0);

        for (i, &ca) in a.iter().enumerate() {
            self.curr[0] = i + 1;
            let mut row_min = self.curr[0];
            for (j, &cb) in b.iter().enumerate() {
                let substitute = self.prev[j] + usize::from(ca != cb);
                let delete = self.prev[j + 1] + 1;
                let insert = self.curr[j] + 1;
                let d = substitute.min(delete).min(insert);
                self.curr[j + 1] = d;
                row_min = row_min.min(d);
            }
            if row_min > max {
                return None;
            }
            std::mem::swap(&mut self.prev, &mut self.curr);
        }

        let d = self.prev[b.len()];
        (d <= max).then_some(d)
    }
}

/// Unbounded Levenshtein distance in code points.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    EditDistance::new()
        .within(&a, &b, usize::MAX)
        .unwrap_or(usize::MAX)
}

// ─────────────────────────────────────────────────────────────────────────────
// Search
// ─────────────────────────────────────────────────────────────────────────────

/// Heap key: the greatest `(other_initial, distance, id)` sits on top and is
/// evicted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Ranked {
    other_initial: bool,
    distance: usize,
    id: u64,
    index: usize,
}

pub fn search(
    corpus: &Corpus,
    pairs: &PairTable,
    query: Query<'_>,
    cancel: Option<&CancelToken>,
) -> Result<Vec<ScoredCandidate>, Cancelled> {
    let options = query.options;
    if options.limit == 0 {
        return Ok(Vec::new());
    }

    let needle: Vec<char> = query.text.chars().collect();
    let day_mask = if options.allow_forbidden {
        0
    } else {
        query.day.bit()
    };
    let keep = options.offset.saturating_add(options.limit);
    let mut dp = EditDistance::new();
    let mut best: BinaryHeap<Ranked> = BinaryHeap::with_capacity(keep.min(corpus.len()) + 1);

    for (index, entry) in corpus.entries.iter().enumerate() {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(Cancelled);
        }
        if !admits(entry, day_mask, options.filter) {
            continue;
        }
        let other_initial = options
            .preferred_consonant
            .is_some_and(|c| !starts_with_consonant(&entry.chars, c));

        // Once the heap is full only strictly better keys can get in; a tie
        // on distance still wins on a smaller id.
        let bound = match best.peek() {
            Some(worst) if best.len() == keep => match (other_initial, worst.other_initial) {
                (true, false) => continue,
                (false, true) => usize::MAX,
                _ => worst.distance,
            },
            _ => usize::MAX,
        };
        let Some(distance) = dp.within(&needle, &entry.chars, bound) else {
            continue;
        };

        let ranked = Ranked {
            other_initial,
            distance,
            id: entry.name.id,
            index,
        };
        if best.len() < keep {
            best.push(ranked);
        } else if best.peek().is_some_and(|worst| ranked < *worst) {
            best.pop();
            best.push(ranked);
        }
    }

    Ok(best
        .into_sorted_vec()
        .into_iter()
        .skip(options.offset)
        .map(|r| {
            let name = &corpus.entries[r.index].name;
            ScoredCandidate {
                overall_score: pairs.score(&name.primary_pairs),
                is_top_tier: name.is_top_tier(),
                has_bad_pair: name.has_bad_pair(),
                distance: r.distance,
                name: name.clone(),
            }
        })
        .collect())
}

#[inline]
fn admits(entry: &CorpusEntry, day_mask: u8, filter: PairFilter) -> bool {
    entry.forbidden_mask & day_mask == 0
        && match filter {
            PairFilter::Any => true,
            PairFilter::NoBadPairs => !entry.has_bad_pair,
            PairFilter::AuspiciousOnly => entry.all_auspicious,
        }
}

/// `c` is the first character, or the second after a leading vowel.
fn starts_with_consonant(chars: &[char], c: char) -> bool {
    match chars {
        [first, ..] if *first == c => true,
        [lead, second, ..] => is_leading_vowel(*lead) && *second == c,
        _ => false,
    }
}

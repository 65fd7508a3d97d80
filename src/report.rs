//! The value returned by [`crate::Engine::analyze`].
use crate::day::Day;
use crate::pair::{PairMeaning, pairs_of};
use crate::score::{GraphemeScore, Scored};
use crate::tables::PairTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// The name as given, before whitespace removal or sanitizing.
    pub input: String,
    pub day: Day,
    pub per_grapheme: Vec<GraphemeScore>,
    pub primary_total: i64,
    pub shadow_total: i64,
    pub primary_pairs: Vec<PairMeaning>,
    pub shadow_pairs: Vec<PairMeaning>,
    pub forbidden_chars: Vec<char>,
    /// Σ pair score over the primary pairs.
    pub overall_score: i64,
    /// Σ pair score over the shadow pairs.
    pub shadow_score: i64,
    /// Positive pair scores of both pillars.
    pub positive_score: i64,
    /// Negative pair scores of both pillars (≤ 0).
    pub negative_score: i64,
    /// Pair count per category across both pillars. Pairs without a category
    /// are not counted.
    pub category_counts: BTreeMap<String, usize>,
    pub is_top_tier: bool,
}

impl Report {
    pub(crate) fn assemble(input: String, day: Day, scored: Scored, pairs: &PairTable) -> Self {
        let primary_pairs = pairs.resolve(&pairs_of(scored.primary_total));
        let shadow_pairs = pairs.resolve(&pairs_of(scored.shadow_total));

        let overall_score = primary_pairs.iter().map(|m| m.pair_score).sum();
        let shadow_score = shadow_pairs.iter().map(|m| m.pair_score).sum();

        let mut positive_score = 0;
        let mut negative_score = 0;
        let mut category_counts = BTreeMap::new();
        for m in primary_pairs.iter().chain(&shadow_pairs) {
            if m.pair_score >= 0 {
                positive_score += m.pair_score;
            } else {
                negative_score += m.pair_score;
            }
            if !m.category.is_empty() {
                *category_counts.entry(m.category.clone()).or_insert(0) += 1;
            }
        }

        let is_top_tier = !primary_pairs.is_empty()
            && !shadow_pairs.is_empty()
            && primary_pairs
                .iter()
                .chain(&shadow_pairs)
                .all(|m| m.class.is_auspicious());

        Self {
            input,
            day,
            per_grapheme: scored.per_grapheme,
            primary_total: scored.primary_total,
            shadow_total: scored.shadow_total,
            primary_pairs,
            shadow_pairs,
            forbidden_chars: scored.forbidden_chars,
            overall_score,
            shadow_score,
            positive_score,
            negative_score,
            category_counts,
            is_top_tier,
        }
    }

    pub fn has_forbidden_chars(&self) -> bool {
        !self.forbidden_chars.is_empty()
    }
}

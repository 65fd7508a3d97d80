//! Dual-scheme scoring of a grapheme sequence.
use crate::day::Day;
use crate::grapheme::Grapheme;
use crate::tables::{ForbiddenTable, SchemeTable};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One grapheme with the sum of its code point values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphemeScore {
    pub grapheme: Grapheme,
    pub primary_value: i64,
    pub shadow_value: i64,
    pub forbidden: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scored {
    pub primary_total: i64,
    pub shadow_total: i64,
    pub per_grapheme: Vec<GraphemeScore>,
    /// First-seen order, no duplicates.
    pub forbidden_chars: Vec<char>,
}

/// Borrowed view over the three tables scoring needs.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    pub primary: &'a SchemeTable,
    pub shadow: &'a SchemeTable,
    pub forbidden: &'a ForbiddenTable,
}

impl<'a> Scorer<'a> {
    pub fn new(
        primary: &'a SchemeTable,
        shadow: &'a SchemeTable,
        forbidden: &'a ForbiddenTable,
    ) -> Self {
        Self {
            primary,
            shadow,
            forbidden,
        }
    }

    pub fn score(&self, graphemes: &[Grapheme], day: Day) -> Scored {
        let mut scored = Scored {
            per_grapheme: Vec::with_capacity(graphemes.len()),
            ..Scored::default()
        };

        for g in graphemes {
            let mut row = GraphemeScore {
                grapheme: g.clone(),
                primary_value: 0,
                shadow_value: 0,
                forbidden: false,
            };

            if g.is_thai {
                let parts: SmallVec<[char; 6]> = g.scored_chars().collect();
                for c in parts {
                    row.primary_value += self.primary.value(c);
                    row.shadow_value += self.shadow.value(c);
                    if self.forbidden.is_forbidden(day, c) {
                        row.forbidden = true;
                        if !scored.forbidden_chars.contains(&c) {
                            scored.forbidden_chars.push(c);
                        }
                    }
                }
            }

            scored.primary_total += row.primary_value;
            scored.shadow_total += row.shadow_value;
            scored.per_grapheme.push(row);
        }

        scored
    }

    /// Totals only; skips building per-grapheme rows.
    pub fn totals(&self, graphemes: &[Grapheme]) -> (i64, i64) {
        graphemes
            .iter()
            .filter(|g| g.is_thai)
            .flat_map(Grapheme::scored_chars)
            .fold((0, 0), |(a, b), c| {
                (a + self.primary.value(c), b + self.shadow.value(c))
            })
    }
}

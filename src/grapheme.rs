//! grapheme.rs – **Thai orthographic grapheme tokenizer**
//! * One left-to-right pass, no look-behind, no allocation beyond the output
//! * Pre-posed vowels (เ แ โ ใ ไ) are buffered and attached to the next consonant
//! * Trailing vowels and tone marks are consumed greedily after a consonant
//! * Whitespace is skipped entirely; every other code point lands in exactly one grapheme
//!
//! The concatenation of every [`Grapheme::original`] equals the input with all
//! whitespace removed.
use crate::thai::{is_attached_mark, is_consonant, is_thai, is_tone_mark, is_vowel_or_mark};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::iter::{Filter, FusedIterator, Peekable};
use std::str::Chars;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grapheme {
    /// Source text of this grapheme, in source order.
    pub original: String,
    pub initial_consonant: Option<char>,
    /// Leading vowels followed by trailing vowels/diacritics. Empty when absent.
    pub vowel_cluster: String,
    /// Tone marks from the trailing run. Empty when absent.
    pub tone_mark: String,
    pub is_thai: bool,
}

impl Grapheme {
    fn single(c: char, is_thai: bool) -> Self {
        Self {
            original: c.to_string(),
            initial_consonant: None,
            vowel_cluster: String::new(),
            tone_mark: String::new(),
            is_thai,
        }
    }

    fn vowel_only(cluster: String) -> Self {
        Self {
            original: cluster.clone(),
            initial_consonant: None,
            vowel_cluster: cluster,
            tone_mark: String::new(),
            is_thai: true,
        }
    }

    #[inline]
    pub fn is_vowel_only(&self) -> bool {
        self.is_thai && self.initial_consonant.is_none() && !self.vowel_cluster.is_empty()
    }

    /// Code points that carry a numeric value: the consonant and every
    /// vowel/diacritic in the cluster. Tone marks never count, even when they
    /// were buffered into a vowel-only cluster.
    pub fn scored_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.initial_consonant
            .into_iter()
            .chain(self.vowel_cluster.chars())
            .filter(|&c| !is_tone_mark(c))
    }
}

type CharStream<'a> = Peekable<Filter<Chars<'a>, fn(&char) -> bool>>;

#[inline(always)]
fn not_whitespace(c: &char) -> bool {
    !c.is_whitespace()
}

/// Lazy tokenizer over a borrowed string.
#[derive(Clone)]
pub struct Graphemes<'a> {
    chars: CharStream<'a>,
    pending: String,
    queued: Option<Grapheme>,
}

impl<'a> Graphemes<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text
                .chars()
                .filter(not_whitespace as fn(&char) -> bool)
                .peekable(),
            pending: String::new(),
            queued: None,
        }
    }

    /// Emit the buffered vowels first (if any), holding `next` back for the
    /// following call.
    #[inline]
    fn after_pending(&mut self, next: Grapheme) -> Option<Grapheme> {
        if self.pending.is_empty() {
            return Some(next);
        }
        self.queued = Some(next);
        Some(Grapheme::vowel_only(std::mem::take(&mut self.pending)))
    }

    fn consonant(&mut self, consonant: char) -> Grapheme {
        let mut original = String::with_capacity(self.pending.len() + 12);
        original.push_str(&self.pending);
        original.push(consonant);

        let mut vowel_cluster = std::mem::take(&mut self.pending);
        let mut tone_mark = String::new();

        while let Some(&next) = self.chars.peek() {
            if !is_attached_mark(next) {
                break;
            }
            self.chars.next();
            original.push(next);
            if is_tone_mark(next) {
                tone_mark.push(next);
            } else {
                vowel_cluster.push(next);
            }
        }

        Grapheme {
            original,
            initial_consonant: Some(consonant),
            vowel_cluster,
            tone_mark,
            is_thai: true,
        }
    }
}

impl Iterator for Graphemes<'_> {
    type Item = Grapheme;

    fn next(&mut self) -> Option<Grapheme> {
        if let Some(queued) = self.queued.take() {
            return Some(queued);
        }

        loop {
            let Some(c) = self.chars.next() else {
                return (!self.pending.is_empty())
                    .then(|| Grapheme::vowel_only(std::mem::take(&mut self.pending)));
            };

            if !is_thai(c) {
                return self.after_pending(Grapheme::single(c, false));
            }
            if is_consonant(c) {
                return Some(self.consonant(c));
            }
            if is_vowel_or_mark(c) {
                self.pending.push(c);
                continue;
            }
            return self.after_pending(Grapheme::single(c, true));
        }
    }
}

impl FusedIterator for Graphemes<'_> {}

#[inline]
pub fn tokenize(text: &str) -> Vec<Grapheme> {
    Graphemes::new(text).collect()
}

/// `text` without any whitespace; borrowed when there is nothing to remove.
pub fn strip_whitespace(text: &str) -> Cow<'_, str> {
    if text.chars().any(char::is_whitespace) {
        Cow::Owned(text.chars().filter(not_whitespace).collect())
    } else {
        Cow::Borrowed(text)
    }
}

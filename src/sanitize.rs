//! Input cleanup for names typed by people.
//!
//! NFC first so marks typed out of order land in canonical order, then drop
//! everything that is not a space, an ASCII letter or a Thai letter/mark, then
//! trim. Borrowed when nothing changes.
use crate::thai::is_thai;
use icu_normalizer::{ComposingNormalizer, ComposingNormalizerBorrowed};
use std::borrow::Cow;
use std::sync::LazyLock;

static ICU4X_NFC: LazyLock<ComposingNormalizerBorrowed> =
    LazyLock::new(ComposingNormalizer::new_nfc);

const BAHT_SIGN: char = '\u{0E3F}';

#[inline(always)]
const fn keep(c: char) -> bool {
    c == ' ' || c.is_ascii_alphabetic() || (is_thai(c) && c != BAHT_SIGN)
}

pub fn sanitize(text: &str) -> Cow<'_, str> {
    let normalized = ICU4X_NFC.normalize(text);
    let filtered = if normalized.chars().all(keep) {
        normalized
    } else {
        Cow::Owned(normalized.chars().filter(|&c| keep(c)).collect())
    };

    match filtered {
        Cow::Borrowed(s) => Cow::Borrowed(s.trim_matches(' ')),
        Cow::Owned(s) => {
            let trimmed = s.trim_matches(' ');
            if trimmed.len() == s.len() {
                Cow::Owned(s)
            } else {
                Cow::Owned(trimmed.to_owned())
            }
        }
    }
}

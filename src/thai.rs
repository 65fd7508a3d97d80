// Code point classification for the Thai block.
//
// Everything here is a `const fn` over `char`; the tokenizer calls these in its
// inner loop, so keep them branch-light and free of table lookups.

/// U+0E00..=U+0E7B.
#[inline(always)]
pub const fn is_thai(c: char) -> bool {
    matches!(c as u32, 0x0E00..=0x0E7B)
}

/// ก (U+0E01) through ฮ (U+0E2E).
#[inline(always)]
pub const fn is_consonant(c: char) -> bool {
    matches!(c as u32, 0x0E01..=0x0E2E)
}

/// Vowels and diacritics that attach after (above, below or right of) a consonant.
#[inline(always)]
pub const fn is_attached_mark(c: char) -> bool {
    matches!(c as u32,
        0x0E30..=0x0E3A | // ะ ั า ำ ิ ี ึ ื ุ ู ฺ
        0x0E47..=0x0E4E   // ็ ่ ้ ๊ ๋ ์ ํ ๎
    )
}

/// ่ ้ ๊ ๋
#[inline(always)]
pub const fn is_tone_mark(c: char) -> bool {
    matches!(c as u32, 0x0E48..=0x0E4B)
}

/// เ แ โ ใ ไ: written before the consonant they are pronounced after.
#[inline(always)]
pub const fn is_leading_vowel(c: char) -> bool {
    matches!(c as u32, 0x0E40..=0x0E44)
}

/// Anything the tokenizer buffers while waiting for a consonant.
#[inline(always)]
pub const fn is_vowel_or_mark(c: char) -> bool {
    is_attached_mark(c) || is_leading_vowel(c)
}

#[inline]
pub fn contains_thai(text: &str) -> bool {
    text.chars().any(is_thai)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consonant_range_edges() {
        assert!(is_consonant('ก'));
        assert!(is_consonant('ฮ'));
        assert!(!is_consonant('ฯ'));
        assert!(!is_consonant('ะ'));
    }

    #[test]
    fn tones_are_attached_marks() {
        for c in ['\u{0E48}', '\u{0E49}', '\u{0E4A}', '\u{0E4B}'] {
            assert!(is_tone_mark(c));
            assert!(is_attached_mark(c));
        }
        assert!(!is_tone_mark('\u{0E4C}'));
        assert!(is_attached_mark('\u{0E4C}'));
    }

    #[test]
    fn leading_vowels_are_not_attached() {
        for c in ['เ', 'แ', 'โ', 'ใ', 'ไ'] {
            assert!(is_leading_vowel(c));
            assert!(!is_attached_mark(c));
            assert!(is_vowel_or_mark(c));
        }
        assert!(!is_vowel_or_mark('ๆ'));
    }

    #[test]
    fn block_bounds() {
        assert!(is_thai('\u{0E00}'));
        assert!(is_thai('\u{0E7B}'));
        assert!(!is_thai('\u{0E7C}'));
        assert!(!is_thai('A'));
        assert!(contains_thai("abcก"));
        assert!(!contains_thai("abc"));
    }
}

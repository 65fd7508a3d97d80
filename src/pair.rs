//! Digit-pair decomposition of scheme totals and pair meanings.
use phf::{Map, phf_map};
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use std::fmt;

/// Pairs of one total. Totals of real names rarely exceed three digits.
pub type Pairs = SmallVec<[String; 4]>;

pub const NEUTRAL_COLOR: &str = "#9E9E9E";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PairClass {
    D10,
    D8,
    D5,
    R10,
    R7,
    R5,
    #[default]
    Neutral,
}

static CLASS_CODES: Map<&'static str, PairClass> = phf_map! {
    "D10" => PairClass::D10,
    "D8" => PairClass::D8,
    "D5" => PairClass::D5,
    "R10" => PairClass::R10,
    "R7" => PairClass::R7,
    "R5" => PairClass::R5,
};

static CLASS_COLORS: Map<&'static str, &'static str> = phf_map! {
    "D10" => "#2E7D32",
    "D8" => "#43A047",
    "D5" => "#66BB6A",
    "R10" => "#C62828",
    "R7" => "#E53935",
    "R5" => "#EF5350",
};

impl PairClass {
    /// Unknown codes are neutral.
    pub fn parse(raw: &str) -> PairClass {
        let code = raw.trim().to_ascii_uppercase();
        CLASS_CODES
            .get(code.as_str())
            .copied()
            .unwrap_or(PairClass::Neutral)
    }

    pub const fn code(self) -> &'static str {
        match self {
            PairClass::D10 => "D10",
            PairClass::D8 => "D8",
            PairClass::D5 => "D5",
            PairClass::R10 => "R10",
            PairClass::R7 => "R7",
            PairClass::R5 => "R5",
            PairClass::Neutral => "neutral",
        }
    }

    /// The only source of pair colors; stored colors are ignored.
    #[inline]
    pub fn color_hex(self) -> &'static str {
        CLASS_COLORS.get(self.code()).copied().unwrap_or(NEUTRAL_COLOR)
    }

    #[inline]
    pub const fn is_auspicious(self) -> bool {
        matches!(self, PairClass::D10 | PairClass::D8 | PairClass::D5)
    }

    #[inline]
    pub const fn is_inauspicious(self) -> bool {
        matches!(self, PairClass::R10 | PairClass::R7 | PairClass::R5)
    }
}

impl From<String> for PairClass {
    fn from(raw: String) -> Self {
        PairClass::parse(&raw)
    }
}

impl From<PairClass> for String {
    fn from(class: PairClass) -> Self {
        class.code().to_owned()
    }
}

impl fmt::Display for PairClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairMeaning {
    pub pair: String,
    #[serde(default)]
    pub class: PairClass,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub pair_score: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub color_hex: String,
}

impl PairMeaning {
    /// Stand-in for a pair with no stored meaning.
    pub fn neutral(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            class: PairClass::Neutral,
            description: String::new(),
            long_description: String::new(),
            pair_score: 0,
            category: String::new(),
            keywords: Vec::new(),
            color_hex: NEUTRAL_COLOR.to_owned(),
        }
    }

    /// Re-derive `color_hex` from `class`.
    pub fn recolored(mut self) -> Self {
        self.color_hex = self.class.color_hex().to_owned();
        self
    }
}

/// Split a scheme total into two-digit pairs.
///
/// | digits | rule |
/// |--------|------|
/// | 1      | zero-padded single pair (`7` → `07`) |
/// | 2      | the number itself |
/// | odd ≥3 | overlapping windows (`123` → `12`, `23`) |
/// | even ≥4| disjoint windows (`1234` → `12`, `34`) |
///
/// Negative totals have no pairs.
pub fn pairs_of(total: i64) -> Pairs {
    if total < 0 {
        return Pairs::new();
    }
    let digits = total.to_string();
    let len = digits.len();
    match len {
        1 => smallvec![format!("0{digits}")],
        2 => smallvec![digits],
        _ if len % 2 == 1 => (0..len - 1).map(|i| digits[i..i + 2].to_owned()).collect(),
        _ => (0..len)
            .step_by(2)
            .map(|i| digits[i..i + 2].to_owned())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_boundaries() {
        assert_eq!(pairs_of(7).to_vec(), vec!["07"]);
        assert_eq!(pairs_of(0).to_vec(), vec!["00"]);
        assert_eq!(pairs_of(42).to_vec(), vec!["42"]);
        assert_eq!(pairs_of(123).to_vec(), vec!["12", "23"]);
        assert_eq!(pairs_of(1234).to_vec(), vec!["12", "34"]);
        assert_eq!(pairs_of(12345).to_vec(), vec!["12", "23", "34", "45"]);
        assert!(pairs_of(-1).is_empty());
    }

    #[test]
    fn colors_follow_class() {
        assert_eq!(PairClass::D10.color_hex(), "#2E7D32");
        assert_eq!(PairClass::D8.color_hex(), "#43A047");
        assert_eq!(PairClass::D5.color_hex(), "#66BB6A");
        assert_eq!(PairClass::R10.color_hex(), "#C62828");
        assert_eq!(PairClass::R7.color_hex(), "#E53935");
        assert_eq!(PairClass::R5.color_hex(), "#EF5350");
        assert_eq!(PairClass::Neutral.color_hex(), NEUTRAL_COLOR);
    }

    #[test]
    fn class_parse_is_lenient() {
        assert_eq!(PairClass::parse(" d10 "), PairClass::D10);
        assert_eq!(PairClass::parse("R7"), PairClass::R7);
        assert_eq!(PairClass::parse("ดี"), PairClass::Neutral);
        assert_eq!(PairClass::parse(""), PairClass::Neutral);
    }

    #[test]
    fn stored_color_is_overridden() {
        let m = PairMeaning {
            color_hex: "#000000".into(),
            class: PairClass::R5,
            ..PairMeaning::neutral("13")
        }
        .recolored();
        assert_eq!(m.color_hex, "#EF5350");
    }

    #[test]
    fn neutral_record() {
        let m = PairMeaning::neutral("99");
        assert_eq!(m.pair, "99");
        assert_eq!(m.class, PairClass::Neutral);
        assert_eq!(m.pair_score, 0);
        assert_eq!(m.color_hex, NEUTRAL_COLOR);
    }

    #[test]
    fn class_serde_round_trip() {
        let json = serde_json::to_string(&[PairClass::D5, PairClass::Neutral]).unwrap();
        assert_eq!(json, r#"["D5","neutral"]"#);
        let back: Vec<PairClass> = serde_json::from_str(r#"["r10","whatever"]"#).unwrap();
        assert_eq!(back, vec![PairClass::R10, PairClass::Neutral]);
    }
}

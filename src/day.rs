//! Weekday keys used by the klakini (forbidden character) rules.
//!
//! Wednesday is split into a daytime and a night-time birth day, so there are
//! eight keys rather than seven. Keys are matched case-insensitively after
//! trimming. The similar-name query also accepts the legacy column aliases
//! `wednesday1` / `wednesday2`.
use phf::{Map, phf_map};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DayError {
    #[error("unknown day `{0}`")]
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Day {
    Sunday,
    Monday,
    Tuesday,
    #[serde(alias = "wednesday1")]
    Wednesday,
    #[serde(alias = "wednesday2")]
    WednesdayNight,
    Thursday,
    Friday,
    Saturday,
}

static DAY_KEYS: Map<&'static str, Day> = phf_map! {
    "sunday" => Day::Sunday,
    "monday" => Day::Monday,
    "tuesday" => Day::Tuesday,
    "wednesday" => Day::Wednesday,
    "wednesday-night" => Day::WednesdayNight,
    "thursday" => Day::Thursday,
    "friday" => Day::Friday,
    "saturday" => Day::Saturday,
};

static DAY_ALIASES: Map<&'static str, Day> = phf_map! {
    "wednesday1" => Day::Wednesday,
    "wednesday2" => Day::WednesdayNight,
};

impl Day {
    pub const ALL: [Day; 8] = [
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::WednesdayNight,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Parse one of the eight canonical keys.
    pub fn parse(raw: &str) -> Result<Day, DayError> {
        let key = normalize_key(raw);
        DAY_KEYS
            .get(key.as_str())
            .copied()
            .ok_or(DayError::Unknown(key))
    }

    /// Like [`Day::parse`], but also accepts `wednesday1` and `wednesday2`.
    pub fn parse_with_aliases(raw: &str) -> Result<Day, DayError> {
        let key = normalize_key(raw);
        DAY_KEYS
            .get(key.as_str())
            .or_else(|| DAY_ALIASES.get(key.as_str()))
            .copied()
            .ok_or(DayError::Unknown(key))
    }

    #[inline(always)]
    pub const fn key(self) -> &'static str {
        match self {
            Day::Sunday => "sunday",
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::WednesdayNight => "wednesday-night",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
        }
    }

    /// Display label used on result pages.
    pub const fn thai_name(self) -> &'static str {
        match self {
            Day::Sunday => "วันอาทิตย์",
            Day::Monday => "วันจันทร์",
            Day::Tuesday => "วันอังคาร",
            Day::Wednesday => "วันพุธ (กลางวัน)",
            Day::WednesdayNight => "วันพุธ (กลางคืน)",
            Day::Thursday => "วันพฤหัสบดี",
            Day::Friday => "วันศุกร์",
            Day::Saturday => "วันเสาร์",
        }
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Bit used in per-candidate day bitmaps.
    #[inline(always)]
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

#[inline]
fn normalize_key(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

impl FromStr for Day {
    type Err = DayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Day::parse(s)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_keys_round_trip() {
        for day in Day::ALL {
            assert_eq!(Day::parse(day.key()), Ok(day));
            assert_eq!(day.to_string(), day.key());
        }
    }

    #[test]
    fn parse_trims_and_ignores_case() {
        assert_eq!(Day::parse("  MONDAY "), Ok(Day::Monday));
        assert_eq!(Day::parse("Wednesday-Night"), Ok(Day::WednesdayNight));
    }

    #[test]
    fn aliases_only_with_alias_parser() {
        assert_eq!(
            Day::parse("wednesday1"),
            Err(DayError::Unknown("wednesday1".into()))
        );
        assert_eq!(Day::parse_with_aliases("Wednesday1"), Ok(Day::Wednesday));
        assert_eq!(
            Day::parse_with_aliases(" wednesday2"),
            Ok(Day::WednesdayNight)
        );
        assert_eq!(Day::parse_with_aliases("friday"), Ok(Day::Friday));
    }

    #[test]
    fn unknown_day() {
        assert!(Day::parse("funday").is_err());
        assert!(Day::parse("").is_err());
        assert!(Day::parse_with_aliases("wednesday3").is_err());
    }

    #[test]
    fn bits_are_distinct() {
        let mut seen = 0u8;
        for day in Day::ALL {
            assert_eq!(seen & day.bit(), 0);
            seen |= day.bit();
        }
        assert_eq!(seen, 0xFF);
    }

    #[test]
    fn serde_uses_kebab_keys_and_accepts_aliases() {
        let json = serde_json::to_string(&Day::WednesdayNight).unwrap();
        assert_eq!(json, "\"wednesday-night\"");
        let day: Day = serde_json::from_str("\"wednesday2\"").unwrap();
        assert_eq!(day, Day::WednesdayNight);
    }
}

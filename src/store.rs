//! Read-only backing store for the reference tables.
//!
//! The engine never writes; a store is read once per table, the first time
//! that table is needed (see [`crate::cache`]).
use crate::pair::PairMeaning;
use crate::tables::CorpusName;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in `{path}`: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("schema mismatch: {0}")]
    Schema(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// One character → value row of a numbering scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeRow {
    pub character: String,
    pub value: i64,
}

impl SchemeRow {
    pub fn new(character: impl Into<String>, value: i64) -> Self {
        Self {
            character: character.into(),
            value,
        }
    }
}

/// The forbidden code points of one day. `day` is free text, normalized on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayForbiddenRow {
    pub day: String,
    pub chars: Vec<char>,
}

impl DayForbiddenRow {
    pub fn new(day: impl Into<String>, chars: &str) -> Self {
        Self {
            day: day.into(),
            chars: chars.chars().filter(|c| !c.is_whitespace()).collect(),
        }
    }
}

pub trait BackingStore: Send + Sync {
    fn read_scheme_a(&self) -> Result<Vec<SchemeRow>, StoreError>;
    fn read_scheme_b(&self) -> Result<Vec<SchemeRow>, StoreError>;
    fn read_day_forbidden(&self) -> Result<Vec<DayForbiddenRow>, StoreError>;
    fn read_pair_meanings(&self) -> Result<Vec<PairMeaning>, StoreError>;
    fn read_corpus(&self) -> Result<Vec<CorpusName>, StoreError>;
}

/// In-process rows. Cloned out on every read.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub scheme_a: Vec<SchemeRow>,
    pub scheme_b: Vec<SchemeRow>,
    pub day_forbidden: Vec<DayForbiddenRow>,
    pub pair_meanings: Vec<PairMeaning>,
    pub corpus: Vec<CorpusName>,
}

impl BackingStore for MemoryStore {
    fn read_scheme_a(&self) -> Result<Vec<SchemeRow>, StoreError> {
        Ok(self.scheme_a.clone())
    }

    fn read_scheme_b(&self) -> Result<Vec<SchemeRow>, StoreError> {
        Ok(self.scheme_b.clone())
    }

    fn read_day_forbidden(&self) -> Result<Vec<DayForbiddenRow>, StoreError> {
        Ok(self.day_forbidden.clone())
    }

    fn read_pair_meanings(&self) -> Result<Vec<PairMeaning>, StoreError> {
        Ok(self.pair_meanings.clone())
    }

    fn read_corpus(&self) -> Result<Vec<CorpusName>, StoreError> {
        Ok(self.corpus.clone())
    }
}

/// A directory of JSON files, one array per table:
///
/// ```text
/// scheme_a.json        [{"character": "ก", "value": 1}, ...]
/// scheme_b.json        [{"character": "ก", "value": 2}, ...]
/// day_forbidden.json   [{"day": "sunday", "chars": ["ศ", ...]}, ...]
/// pair_meanings.json   [{"pair": "15", "class": "D10", ...}, ...]
/// corpus.json          [{"id": 1, "text": "...", ...}, ...]
/// ```
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub const SCHEME_A: &'static str = "scheme_a.json";
    pub const SCHEME_B: &'static str = "scheme_b.json";
    pub const DAY_FORBIDDEN: &'static str = "day_forbidden.json";
    pub const PAIR_MEANINGS: &'static str = "pair_meanings.json";
    pub const CORPUS: &'static str = "corpus.json";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read<T: DeserializeOwned>(&self, file: &str) -> Result<T, StoreError> {
        let path = self.dir.join(file);
        debug!(path = %path.display(), "reading table file");
        let reader = File::open(&path)
            .map(BufReader::new)
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
        serde_json::from_reader(reader).map_err(|source| StoreError::Json { path, source })
    }
}

impl BackingStore for JsonStore {
    fn read_scheme_a(&self) -> Result<Vec<SchemeRow>, StoreError> {
        self.read(Self::SCHEME_A)
    }

    fn read_scheme_b(&self) -> Result<Vec<SchemeRow>, StoreError> {
        self.read(Self::SCHEME_B)
    }

    fn read_day_forbidden(&self) -> Result<Vec<DayForbiddenRow>, StoreError> {
        self.read(Self::DAY_FORBIDDEN)
    }

    fn read_pair_meanings(&self) -> Result<Vec<PairMeaning>, StoreError> {
        self.read(Self::PAIR_MEANINGS)
    }

    fn read_corpus(&self) -> Result<Vec<CorpusName>, StoreError> {
        self.read(Self::CORPUS)
    }
}

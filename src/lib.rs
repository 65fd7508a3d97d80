//! thainum – **Thai name numerology engine**
//! * Thai orthographic grapheme tokenizer (leading vowels, tone marks)
//! * Two parallel character → number schemes, summed per grapheme
//! * Digit-pair decomposition of both totals with meaning, class and color
//! * Day-specific forbidden characters (klakini)
//! * Nearest-name search over a pre-analyzed corpus
//!
//! Reference tables come from a [`BackingStore`] and are loaded lazily, once
//! per [`Engine`].
pub mod cache;
pub mod day;
pub mod engine;
pub mod grapheme;
pub mod pair;
pub mod report;
pub mod sanitize;
pub mod score;
pub mod similar;
pub mod store;
pub mod tables;
pub mod thai;

#[cfg(test)]
mod testing;

pub use day::{Day, DayError};
pub use engine::{Engine, EngineBuilder, EngineConfig, EngineError};
pub use grapheme::{Grapheme, Graphemes, tokenize};
pub use pair::{PairClass, PairMeaning, pairs_of};
pub use report::Report;
pub use sanitize::sanitize;
pub use score::GraphemeScore;
pub use similar::{CancelToken, PairFilter, ScoredCandidate, SimilarOptions, levenshtein};
pub use store::{BackingStore, DayForbiddenRow, JsonStore, MemoryStore, SchemeRow, StoreError};
pub use tables::{CorpusName, ReferenceTables};

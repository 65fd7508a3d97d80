//! The name analysis engine.
//!
//! An [`Engine`] owns a backing store and one [`LazyTable`] per reference
//! table. Nothing is read until the first request needs it (or [`Engine::warm`]
//! is called); after that every request is a pure function of its inputs.
//!
//! ```no_run
//! use thainum::{Engine, JsonStore};
//!
//! let engine = Engine::builder(JsonStore::new("data")).sanitize_input(true).build();
//! let report = engine.analyze("สมชาย", "monday")?;
//! println!("{} → {:?}", report.overall_score, report.forbidden_chars);
//! # Ok::<(), thainum::EngineError>(())
//! ```
use crate::cache::LazyTable;
use crate::day::{Day, DayError};
use crate::grapheme::{Grapheme, tokenize};
use crate::pair::{PairMeaning, pairs_of};
use crate::report::Report;
use crate::sanitize::sanitize;
use crate::score::Scorer;
use crate::similar::{self, CancelToken, PairFilter, Query, ScoredCandidate, SimilarOptions};
use crate::store::{BackingStore, MemoryStore, StoreError};
use crate::tables::{
    Corpus, CorpusName, ForbiddenTable, PairTable, ReferenceTables, SchemeTable, load_corpus,
    load_forbidden, load_pairs, load_scheme_a, load_scheme_b,
};
use crate::thai::contains_thai;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, debug_span, info};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("day error: {0}")]
    Day(#[from] DayError),
    #[error("limit must be at least 1")]
    InvalidLimit,
    #[error("limit {limit} exceeds the configured maximum of {max}")]
    LimitTooLarge { limit: usize, max: usize },
    #[error("similar-name search was cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Run [`sanitize`] over every incoming name.
    pub sanitize_input: bool,
    /// Result count front ends use when the caller gives none.
    pub default_limit: usize,
    /// Larger limits are rejected with [`EngineError::LimitTooLarge`].
    /// `None` accepts any limit.
    pub max_limit: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sanitize_input: false,
            default_limit: 10,
            max_limit: None,
        }
    }
}

pub struct Engine {
    store: Arc<dyn BackingStore>,
    config: EngineConfig,
    scheme_a: LazyTable<SchemeTable>,
    scheme_b: LazyTable<SchemeTable>,
    forbidden: LazyTable<ForbiddenTable>,
    pairs: LazyTable<PairTable>,
    corpus: LazyTable<Corpus>,
}

impl Engine {
    pub fn builder<S: BackingStore + 'static>(store: S) -> EngineBuilder {
        EngineBuilder::new(Arc::new(store))
    }

    pub fn new<S: BackingStore + 'static>(store: S) -> Self {
        Self::builder(store).build()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Load every table that is not loaded yet.
    pub fn warm(&self) -> Result<(), EngineError> {
        self.scheme_a()?;
        self.scheme_b()?;
        self.forbidden()?;
        self.pairs()?;
        let corpus = self.corpus()?;
        info!(corpus = corpus.len(), "engine warm");
        Ok(())
    }

    pub fn is_warm(&self) -> bool {
        self.scheme_a.is_loaded()
            && self.scheme_b.is_loaded()
            && self.forbidden.is_loaded()
            && self.pairs.is_loaded()
            && self.corpus.is_loaded()
    }

    /// Full analysis of `name` for someone born on `day`.
    ///
    /// `day` must be one of the eight canonical keys; the
    /// `wednesday1`/`wednesday2` aliases are only accepted by [`Engine::similar`].
    pub fn analyze(&self, name: &str, day: &str) -> Result<Report, EngineError> {
        self.analyze_on(name, Day::parse(day)?)
    }

    pub fn analyze_on(&self, name: &str, day: Day) -> Result<Report, EngineError> {
        let _span = debug_span!("analyze", %day).entered();
        let text = self.prepare(name);
        if !contains_thai(&text) {
            debug!("no Thai code points, report will be zeroed");
        }
        let graphemes = tokenize(&text);
        let scored = self.scorer()?.score(&graphemes, day);
        debug!(
            graphemes = graphemes.len(),
            primary = scored.primary_total,
            shadow = scored.shadow_total,
            "name scored"
        );
        Ok(Report::assemble(name.to_owned(), day, scored, self.pairs()?))
    }

    /// Corpus names closest to `name` that carry no forbidden character for
    /// `day`, ordered by `(distance, id)`.
    pub fn similar(
        &self,
        name: &str,
        day: &str,
        limit: usize,
        auspicious_only: bool,
    ) -> Result<Vec<ScoredCandidate>, EngineError> {
        let options = SimilarOptions::new(limit).filter(PairFilter::from(auspicious_only));
        self.similar_with(name, day, options, None)
    }

    pub fn similar_with_cancel(
        &self,
        name: &str,
        day: &str,
        limit: usize,
        auspicious_only: bool,
        cancel: &CancelToken,
    ) -> Result<Vec<ScoredCandidate>, EngineError> {
        let options = SimilarOptions::new(limit).filter(PairFilter::from(auspicious_only));
        self.similar_with(name, day, options, Some(cancel))
    }

    /// [`Engine::similar`] with paging, the day filter switch, the pair
    /// filter and a preferred initial consonant.
    pub fn similar_with(
        &self,
        name: &str,
        day: &str,
        options: SimilarOptions,
        cancel: Option<&CancelToken>,
    ) -> Result<Vec<ScoredCandidate>, EngineError> {
        let day = Day::parse_with_aliases(day)?;
        let limit = options.limit;
        if limit == 0 {
            return Err(EngineError::InvalidLimit);
        }
        if let Some(max) = self.config.max_limit.filter(|&max| limit > max) {
            return Err(EngineError::LimitTooLarge { limit, max });
        }
        let _span = debug_span!(
            "similar",
            %day,
            limit,
            offset = options.offset,
            filter = ?options.filter,
            allow_forbidden = options.allow_forbidden
        )
        .entered();

        let text = self.prepare(name);
        let query = Query {
            text: text.trim(),
            day,
            options,
        };
        let found = similar::search(self.corpus()?, self.pairs()?, query, cancel)
            .map_err(|_| EngineError::Cancelled)?;
        debug!(found = found.len(), "similar names ranked");
        Ok(found)
    }

    /// Stored meaning of a two-digit pair, or the neutral record.
    pub fn pair_meaning(&self, pair: &str) -> Result<PairMeaning, EngineError> {
        Ok(self.pairs()?.meaning(pair.trim()))
    }

    /// A corpus record for any name: pairs and classes of both totals and a
    /// forbidden flag for every day.
    pub fn profile(&self, id: u64, name: &str) -> Result<CorpusName, EngineError> {
        let text = self.prepare(name);
        let graphemes = tokenize(&text);
        let (primary_total, shadow_total) = self.scorer()?.totals(&graphemes);
        let pairs = self.pairs()?;
        let primary_pairs: Vec<String> = pairs_of(primary_total).into_vec();
        let shadow_pairs: Vec<String> = pairs_of(shadow_total).into_vec();
        let mask = self.forbidden_mask(&graphemes)?;

        Ok(CorpusName {
            id,
            text: text.trim().to_owned(),
            primary_classes: primary_pairs.iter().map(|p| pairs.class_of(p)).collect(),
            shadow_classes: shadow_pairs.iter().map(|p| pairs.class_of(p)).collect(),
            primary_pairs,
            shadow_pairs,
            forbidden_by_day: Day::ALL
                .into_iter()
                .map(|d| (d, mask & d.bit() != 0))
                .collect(),
        })
    }

    /// Every day on which `name` carries a forbidden character.
    pub fn forbidden_days(&self, name: &str) -> Result<Vec<Day>, EngineError> {
        let text = self.prepare(name);
        let mask = self.forbidden_mask(&tokenize(&text))?;
        Ok(Day::ALL
            .into_iter()
            .filter(|d| mask & d.bit() != 0)
            .collect())
    }

    // ── internals ──

    fn prepare<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if self.config.sanitize_input {
            sanitize(name)
        } else {
            Cow::Borrowed(name)
        }
    }

    fn forbidden_mask(&self, graphemes: &[Grapheme]) -> Result<u8, EngineError> {
        let chars: SmallVec<[char; 16]> = graphemes
            .iter()
            .filter(|g| g.is_thai)
            .flat_map(Grapheme::scored_chars)
            .collect();
        Ok(self.forbidden()?.day_mask(chars.iter().copied()))
    }

    fn scorer(&self) -> Result<Scorer<'_>, StoreError> {
        Ok(Scorer::new(self.scheme_a()?, self.scheme_b()?, self.forbidden()?))
    }

    fn scheme_a(&self) -> Result<&SchemeTable, StoreError> {
        self.scheme_a.get_or_load(|| load_scheme_a(self.store.as_ref()))
    }

    fn scheme_b(&self) -> Result<&SchemeTable, StoreError> {
        self.scheme_b.get_or_load(|| load_scheme_b(self.store.as_ref()))
    }

    fn forbidden(&self) -> Result<&ForbiddenTable, StoreError> {
        self.forbidden.get_or_load(|| load_forbidden(self.store.as_ref()))
    }

    fn pairs(&self) -> Result<&PairTable, StoreError> {
        self.pairs.get_or_load(|| load_pairs(self.store.as_ref()))
    }

    fn corpus(&self) -> Result<&Corpus, StoreError> {
        self.corpus.get_or_load(|| load_corpus(self.store.as_ref()))
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("scheme_a", &self.scheme_a)
            .field("scheme_b", &self.scheme_b)
            .field("forbidden", &self.forbidden)
            .field("pairs", &self.pairs)
            .field("corpus", &self.corpus)
            .finish_non_exhaustive()
    }
}

pub struct EngineBuilder {
    store: Arc<dyn BackingStore>,
    config: EngineConfig,
    tables: Option<ReferenceTables>,
}

impl EngineBuilder {
    fn new(store: Arc<dyn BackingStore>) -> Self {
        Self {
            store,
            config: EngineConfig::default(),
            tables: None,
        }
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn sanitize_input(mut self, on: bool) -> Self {
        self.config.sanitize_input = on;
        self
    }

    pub fn default_limit(mut self, limit: usize) -> Self {
        self.config.default_limit = limit;
        self
    }

    pub fn max_limit(mut self, limit: usize) -> Self {
        self.config.max_limit = Some(limit);
        self
    }

    /// Start with every table already published; the store is never read.
    pub fn tables(mut self, tables: ReferenceTables) -> Self {
        self.tables = Some(tables);
        self
    }

    pub fn build(self) -> Engine {
        let config = self.config;
        let store = self.store;
        match self.tables {
            Some(t) => Engine {
                store,
                config,
                scheme_a: LazyTable::loaded("scheme_a", t.scheme_a),
                scheme_b: LazyTable::loaded("scheme_b", t.scheme_b),
                forbidden: LazyTable::loaded("day_forbidden", t.forbidden),
                pairs: LazyTable::loaded("pair_meanings", t.pairs),
                corpus: LazyTable::loaded("corpus", t.corpus),
            },
            None => Engine {
                store,
                config,
                scheme_a: LazyTable::new("scheme_a"),
                scheme_b: LazyTable::new("scheme_b"),
                forbidden: LazyTable::new("day_forbidden"),
                pairs: LazyTable::new("pair_meanings"),
                corpus: LazyTable::new("corpus"),
            },
        }
    }
}

impl From<ReferenceTables> for Engine {
    fn from(tables: ReferenceTables) -> Self {
        Engine::builder(MemoryStore::default()).tables(tables).build()
    }
}

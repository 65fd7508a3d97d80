//! Single-flight lazy loading of reference tables.
//!
//! A [`LazyTable`] is empty until the first reader asks for it. That reader
//! runs the loader while holding the table's load lock; concurrent first
//! readers queue on the lock and pick up the published value. Once published,
//! reads go through `OnceLock::get` and never touch the lock.
//!
//! A failed load publishes nothing. The error goes back to the caller that ran
//! the loader and the next access tries again.
use parking_lot::Mutex;
use std::fmt;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{info, warn};

pub struct LazyTable<T> {
    name: &'static str,
    slot: OnceLock<T>,
    load_lock: Mutex<()>,
    attempts: AtomicUsize,
}

impl<T> LazyTable<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: OnceLock::new(),
            load_lock: Mutex::new(()),
            attempts: AtomicUsize::new(0),
        }
    }

    /// A table that starts out published; the loader never runs.
    pub fn loaded(name: &'static str, table: T) -> Self {
        Self {
            name,
            slot: OnceLock::from(table),
            load_lock: Mutex::new(()),
            attempts: AtomicUsize::new(0),
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The published table, without triggering a load.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.slot.get()
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }

    /// How many times a loader has actually run (successful or not).
    pub fn load_attempts(&self) -> usize {
        self.attempts.load(Ordering::Acquire)
    }

    pub fn get_or_load<E, F>(&self, load: F) -> Result<&T, E>
    where
        E: fmt::Display,
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(table) = self.slot.get() {
            return Ok(table);
        }

        let _guard = self.load_lock.lock();
        // Another reader may have published while we waited.
        if let Some(table) = self.slot.get() {
            return Ok(table);
        }

        self.attempts.fetch_add(1, Ordering::AcqRel);
        let started = Instant::now();
        match load() {
            Ok(table) => {
                info!(
                    table = self.name,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "reference table loaded"
                );
                Ok(self.slot.get_or_init(|| table))
            }
            Err(e) => {
                warn!(table = self.name, error = %e, "reference table load failed");
                Err(e)
            }
        }
    }
}

impl<T> fmt::Debug for LazyTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyTable")
            .field("name", &self.name)
            .field("loaded", &self.is_loaded())
            .field("attempts", &self.load_attempts())
            .finish()
    }
}

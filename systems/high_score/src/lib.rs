#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! High-score tracking system backed by an injected persistence capability.

use std::io;

use snake_arcade_core::Event;
use thiserror::Error;
use tracing::{info, warn};

/// Errors reported by high-score stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying storage could not be read or written.
    #[error("high score storage is unavailable")]
    Io(#[from] io::Error),
    /// The stored value is not a valid score.
    #[error("stored high score `{value}` is not a non-negative integer")]
    Unparsable {
        /// Raw value found in storage.
        value: String,
    },
}

/// Persistence capability used to remember the best length across sessions.
pub trait HighScoreStore {
    /// Reads the stored record, returning `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<u32>, StoreError>;

    /// Replaces the stored record.
    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

/// In-memory store that forgets everything when dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryHighScoreStore {
    value: Option<u32>,
}

impl MemoryHighScoreStore {
    /// Creates a store that already holds `value`.
    #[must_use]
    pub const fn with_value(value: u32) -> Self {
        Self { value: Some(value) }
    }

    /// Value most recently saved, if any.
    #[must_use]
    pub const fn value(&self) -> Option<u32> {
        self.value
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.value)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        self.value = Some(score);
        Ok(())
    }
}

/// Parses a stored record, treating blank content as "no record".
pub fn parse_stored_score(raw: &str) -> Result<Option<u32>, StoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| StoreError::Unparsable {
            value: trimmed.to_owned(),
        })
}

/// Tracks the best body length seen and persists new records.
#[derive(Debug)]
pub struct HighScore<S> {
    store: S,
    record: u32,
}

impl<S> HighScore<S>
where
    S: HighScoreStore,
{
    /// Creates the system, loading the stored record once.
    ///
    /// A store that fails to load starts the record at zero.
    pub fn new(store: S) -> Self {
        let record = match store.load() {
            Ok(value) => value.unwrap_or(0),
            Err(error) => {
                warn!(%error, "failed to load high score; starting from zero");
                0
            }
        };
        Self { store, record }
    }

    /// Best length recorded so far.
    #[must_use]
    pub const fn record(&self) -> u32 {
        self.record
    }

    /// Store backing this system.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consumes world events and returns the new record when one was set.
    ///
    /// A failed save keeps the record in memory so the session still shows it.
    pub fn handle(&mut self, events: &[Event]) -> Option<u32> {
        let best = events
            .iter()
            .filter_map(|event| match event {
                Event::ScoreChanged { length } => Some(*length),
                _ => None,
            })
            .max()?;
        if best <= self.record {
            return None;
        }

        self.record = best;
        match self.store.save(best) {
            Ok(()) => info!(record = best, "new high score saved"),
            Err(error) => warn!(%error, record = best, "failed to save high score"),
        }
        Some(best)
    }
}

use std::time::Duration;

use serde::Deserialize;
use snake_arcade_core::{Board, Cell};
use thiserror::Error;

const DEFAULT_COLUMNS: u32 = 20;
const DEFAULT_ROWS: u32 = 12;
const DEFAULT_SPAWN: Cell = Cell::new(0, 6);
const DEFAULT_MOVE_INTERVAL: Duration = Duration::from_millis(140);
const DEFAULT_STARTER_GROWTH: u32 = 3;
const DEFAULT_GROWTH_INCREMENT: u32 = 3;
const DEFAULT_WIN_LENGTH: u32 = 240;
const DEFAULT_COUNTDOWN_SECONDS: u32 = 3;
const DEFAULT_COUNTDOWN_STEP: Duration = Duration::from_millis(1000);
const DEFAULT_START_DELAY: Duration = Duration::from_millis(3000);
const DEFAULT_GAME_OVER_REVEAL_DELAY: Duration = Duration::from_millis(2400);
const DEFAULT_RESTART_DELAY: Duration = Duration::from_millis(100);
const DEFAULT_RNG_SEED: u64 = 0x5eed_f00d_2024_0001;

/// Tunables supplied when a session is constructed.
///
/// Durations are expressed in whole milliseconds when deserialised, so a
/// settings file reads `move_interval = 140`. Missing keys fall back to the
/// defaults.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Number of board columns.
    pub columns: u32,
    /// Number of board rows.
    pub rows: u32,
    /// Cell the head occupies when a run starts.
    pub spawn: Cell,
    /// Minimum time between two movement steps.
    #[serde(with = "millis")]
    pub move_interval: Duration,
    /// Cells appended to the lone head when a run starts.
    pub starter_growth: u32,
    /// Cells appended each time food is consumed.
    pub growth_increment: u32,
    /// Body length at which a run counts as a win.
    pub win_length: u32,
    /// Value the countdown starts from.
    pub countdown_seconds: u32,
    /// Time between two countdown values.
    #[serde(with = "millis")]
    pub countdown_step: Duration,
    /// Delay between leaving the menu and the first movement.
    #[serde(with = "millis")]
    pub start_delay: Duration,
    /// Delay between a collision and the outcome reveal.
    #[serde(with = "millis")]
    pub game_over_reveal_delay: Duration,
    /// Delay between a restart request and the reset.
    #[serde(with = "millis")]
    pub restart_delay: Duration,
    /// Seed for the food placement generator.
    pub rng_seed: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            spawn: DEFAULT_SPAWN,
            move_interval: DEFAULT_MOVE_INTERVAL,
            starter_growth: DEFAULT_STARTER_GROWTH,
            growth_increment: DEFAULT_GROWTH_INCREMENT,
            win_length: DEFAULT_WIN_LENGTH,
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
            countdown_step: DEFAULT_COUNTDOWN_STEP,
            start_delay: DEFAULT_START_DELAY,
            game_over_reveal_delay: DEFAULT_GAME_OVER_REVEAL_DELAY,
            restart_delay: DEFAULT_RESTART_DELAY,
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

impl SessionSettings {
    /// Board described by the configured dimensions.
    #[must_use]
    pub const fn board(&self) -> Board {
        Board::new(self.columns, self.rows)
    }

    /// Checks that the settings describe a playable session.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(SettingsError::EmptyBoard {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if i32::try_from(self.columns).is_err() || i32::try_from(self.rows).is_err() {
            return Err(SettingsError::BoardTooLarge {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if !self.board().contains(self.spawn) {
            return Err(SettingsError::SpawnOutOfBounds { spawn: self.spawn });
        }
        if self.move_interval.is_zero() {
            return Err(SettingsError::ZeroMoveInterval);
        }
        if self.win_length == 0 {
            return Err(SettingsError::ZeroWinLength);
        }
        Ok(())
    }
}

/// Reasons a [`SessionSettings`] value is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The board has no cells.
    #[error("board must have at least one cell (got {columns}x{rows})")]
    EmptyBoard {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// The board cannot be addressed with signed cell coordinates.
    #[error("board of {columns}x{rows} cells is too large")]
    BoardTooLarge {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// The spawn cell lies outside the board.
    #[error("spawn cell ({}, {}) lies outside the board", .spawn.column(), .spawn.row())]
    SpawnOutOfBounds {
        /// Configured spawn cell.
        spawn: Cell,
    },
    /// The movement interval is zero.
    #[error("move interval must be positive")]
    ZeroMoveInterval,
    /// The win length is zero.
    #[error("win length must be positive")]
    ZeroWinLength,
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

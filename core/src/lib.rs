#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Snake Arcade engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. Systems consume event streams, query immutable snapshots, and
//! respond exclusively with new command batches or adapter-facing outputs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Snake Arcade.";

/// Lifecycle phase of a play session.
///
/// Movement only executes while the session is [`SessionPhase::Running`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Start menu is shown; the snake and food are prepared but idle.
    Menu,
    /// Countdown before play begins; controls are locked.
    Countdown,
    /// Simulation advances on every eligible tick.
    Running,
    /// Simulation is suspended with all state retained.
    Paused,
    /// The run ended and the outcome reveal is pending.
    Halted,
    /// The outcome has been revealed; a restart may be requested.
    GameOver,
}

impl SessionPhase {
    /// Reports whether directional and pause input is accepted in this phase.
    #[must_use]
    pub const fn accepts_input(self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Leaves the start menu and begins the countdown.
    StartSession {
        /// Monotonic time at which the request was made.
        now: Duration,
    },
    /// Toggles between running and paused play.
    TogglePause,
    /// Requests a fresh run after the outcome has been revealed.
    Restart {
        /// Monotonic time at which the request was made.
        now: Duration,
    },
    /// Buffers a directional input for a later tick.
    QueueDirection {
        /// Direction requested by the player.
        direction: Direction,
    },
    /// Drives scheduled transitions and, when due, one simulation step.
    Tick {
        /// Monotonic time of the current frame.
        now: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Announces that the session entered a new phase.
    PhaseChanged {
        /// Phase that became active.
        phase: SessionPhase,
    },
    /// Reports the number of countdown steps left before play begins.
    CountdownAdvanced {
        /// Remaining countdown value; zero once the countdown finished.
        remaining: u32,
    },
    /// Confirms that a direction was accepted into the input queue.
    DirectionQueued {
        /// Direction that was queued.
        direction: Direction,
        /// Whether the direction reverses the last drained direction.
        contradicting: bool,
    },
    /// Confirms that the snake head advanced between two cells.
    HeadAdvanced {
        /// Cell the head occupied before moving.
        from: Cell,
        /// Cell the head occupies after moving.
        to: Cell,
    },
    /// Movement cue emitted when a queued turn was consumed audibly.
    Moved {
        /// Direction drained from the queue.
        direction: Direction,
    },
    /// Confirms that the snake consumed the food item.
    FoodEaten {
        /// Cell where the food was consumed.
        cell: Cell,
    },
    /// Confirms that a new food item was placed.
    FoodPlaced {
        /// Cell the food now occupies.
        cell: Cell,
    },
    /// Reports that the snake body grew.
    SnakeGrew {
        /// Body length after growing.
        length: u32,
    },
    /// Reports that the displayed score increased.
    ScoreChanged {
        /// Body length that became the new score.
        length: u32,
    },
    /// Reports that the body reached the configured win length.
    WinLengthReached {
        /// Body length when the threshold was crossed.
        length: u32,
    },
    /// Reports that the snake collided and the run stopped.
    SnakeHit {
        /// Reason the move was fatal.
        cause: CollisionCause,
        /// Cell the head attempted to enter.
        cell: Cell,
    },
    /// Reports that no free cell remains for food.
    BoardFilled,
    /// Reveals the final outcome of the run.
    GameOver {
        /// Whether the run counts as a win.
        won: bool,
        /// Final body length.
        length: u32,
    },
    /// Confirms that the session was reset for a new run.
    SessionReset,
}

/// Reasons a move ends the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionCause {
    /// The head left the board.
    OutOfBounds,
    /// The head entered a cell occupied by the body.
    SelfCollision,
}

/// Cardinal movement directions available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Returns the direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Reports whether `other` points exactly the other way.
    #[must_use]
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Column and row offsets applied by a single step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates are signed so that a head stepping off the board is still
/// representable for bounds checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    column: i32,
    row: i32,
}

impl Cell {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            column: self.column.saturating_add(dx),
            row: self.row.saturating_add(dy),
        }
    }
}

/// Fixed rectangular play area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    columns: u32,
    rows: u32,
}

impl Board {
    /// Creates a board with the provided dimensions.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of columns on the board.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows on the board.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the cell lies within `[0, columns) x [0, rows)`.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        u32::try_from(cell.column()).map_or(false, |column| column < self.columns)
            && u32::try_from(cell.row()).map_or(false, |row| row < self.rows)
    }

    /// Iterates every cell column by column, top to bottom within a column.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let rows = self.rows;
        (0..self.columns).flat_map(move |column| {
            (0..rows).map(move |row| Cell::new(column as i32, row as i32))
        })
    }
}

/// Read-only snapshot of the snake used for queries and rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeView {
    cells: Vec<Cell>,
    heading: Direction,
}

impl SnakeView {
    /// Captures a view from body cells listed head first.
    #[must_use]
    pub fn new(cells: Vec<Cell>, heading: Direction) -> Self {
        Self { cells, heading }
    }

    /// Cell occupied by the head, if the body is not empty.
    #[must_use]
    pub fn head(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    /// Direction applied on the most recent tick.
    #[must_use]
    pub const fn heading(&self) -> Direction {
        self.heading
    }

    /// Number of body cells, counting stacked growth cells individually.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the view holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterator over the body cells, head first.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Reports whether any body cell occupies `cell`.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Consumes the view, yielding the underlying cells.
    #[must_use]
    pub fn into_vec(self) -> Vec<Cell> {
        self.cells
    }
}

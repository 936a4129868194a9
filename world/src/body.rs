use std::collections::{HashSet, VecDeque};

use snake_arcade_core::{Cell, Direction};

/// Ordered cells occupied by the snake, head first.
///
/// Growth appends copies of the tail, so the trailing cells may repeat until
/// the body has moved far enough to spread them out.
#[derive(Clone, Debug)]
pub(crate) struct SnakeBody {
    cells: VecDeque<Cell>,
}

impl SnakeBody {
    /// Places a lone head at `head` and grows it by `starter_growth` cells.
    pub(crate) fn spawn(head: Cell, starter_growth: u32) -> Self {
        let mut body = Self {
            cells: VecDeque::from([head]),
        };
        body.grow(starter_growth);
        body
    }

    #[cfg(test)]
    pub(crate) fn from_cells(cells: Vec<Cell>) -> Self {
        assert!(!cells.is_empty(), "snake body must hold at least one cell");
        Self {
            cells: cells.into(),
        }
    }

    pub(crate) fn head(&self) -> Cell {
        debug_assert!(!self.cells.is_empty(), "snake body is never empty");
        self.cells.front().copied().unwrap_or(Cell::new(-1, -1))
    }

    fn tail(&self) -> Cell {
        debug_assert!(!self.cells.is_empty(), "snake body is never empty");
        self.cells.back().copied().unwrap_or(Cell::new(-1, -1))
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    /// Cell the head enters when stepping toward `heading`.
    pub(crate) fn next_head(&self, heading: Direction) -> Cell {
        self.head().step(heading)
    }

    /// Reports whether `cell` is still occupied once the tail has vacated its
    /// cell for this step.
    ///
    /// Exactly one instance of the tail is ignored, so stacked growth cells at
    /// the tail keep blocking.
    pub(crate) fn collides_after_tail_shift(&self, cell: Cell) -> bool {
        let remaining = self.cells.len().saturating_sub(1);
        self.cells.iter().take(remaining).any(|segment| *segment == cell)
    }

    /// Moves the head into `new_head` and drops the tail cell.
    pub(crate) fn advance(&mut self, new_head: Cell) {
        self.cells.push_front(new_head);
        let _ = self.cells.pop_back();
    }

    /// Appends `amount` copies of the current tail.
    pub(crate) fn grow(&mut self, amount: u32) {
        let tail = self.tail();
        for _ in 0..amount {
            self.cells.push_back(tail);
        }
    }

    /// Self-overlap test used for collision and food exclusion.
    pub(crate) fn contains(&self, cell: Cell, excluding_head: bool) -> bool {
        let skip = usize::from(excluding_head);
        self.cells.iter().skip(skip).any(|segment| *segment == cell)
    }

    /// Distinct cells covered by the body.
    pub(crate) fn occupied(&self) -> HashSet<Cell> {
        self.cells.iter().copied().collect()
    }

    pub(crate) fn cells(&self) -> Vec<Cell> {
        self.cells.iter().copied().collect()
    }
}

use std::collections::VecDeque;

use snake_arcade_core::Direction;

/// Pending directional inputs, oldest first.
///
/// Reversals are accepted at enqueue time and filtered when drained, so a
/// quick opposite press cannot fold the snake into its neck. The queue also
/// tracks when a drained turn should stay silent.
#[derive(Clone, Debug)]
pub(crate) struct DirectionQueue {
    pending: VecDeque<Direction>,
    last_drained: Option<Direction>,
    contradicting: bool,
    first_move_pending: bool,
}

/// Result of draining one queued direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Drained {
    /// Direction taken from the queue.
    pub(crate) direction: Direction,
    /// Heading in effect after the drain.
    pub(crate) heading: Direction,
    /// Whether a movement cue should accompany the step.
    pub(crate) cue: bool,
}

impl DirectionQueue {
    pub(crate) fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            last_drained: None,
            contradicting: false,
            first_move_pending: true,
        }
    }

    /// Forgets all pending input and cue bookkeeping.
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }

    /// Queues `direction` unless input is already pending.
    pub(crate) fn seed(&mut self, direction: Direction) {
        if self.pending.is_empty() {
            self.pending.push_back(direction);
        }
    }

    /// Appends `candidate` unless it repeats the direction that will be in
    /// effect right before it.
    ///
    /// Returns `Some(contradicting)` when accepted, where `contradicting`
    /// reports a reversal of the last drained direction.
    pub(crate) fn enqueue(&mut self, candidate: Direction, heading: Direction) -> Option<bool> {
        let reference = self.pending.back().copied().unwrap_or(heading);
        if candidate == reference {
            return None;
        }

        let contradicting = self
            .last_drained
            .map_or(false, |last| candidate.is_opposite(last));
        if contradicting {
            self.contradicting = true;
        }
        self.pending.push_back(candidate);
        Some(contradicting)
    }

    /// Pops the oldest direction and resolves the heading against it.
    pub(crate) fn drain(&mut self, heading: Direction) -> Option<Drained> {
        let direction = self.pending.pop_front()?;

        let cue = self.last_drained != Some(direction)
            && !self.first_move_pending
            && !self.contradicting;
        let heading = if direction.is_opposite(heading) {
            heading
        } else {
            direction
        };

        self.last_drained = Some(direction);
        self.contradicting = false;
        self.first_move_pending = false;

        Some(Drained {
            direction,
            heading,
            cue,
        })
    }

    pub(crate) fn pending(&self) -> Vec<Direction> {
        self.pending.iter().copied().collect()
    }
}

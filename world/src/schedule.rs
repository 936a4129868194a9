use std::time::Duration;

/// Phase changes that happen a fixed delay after their trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Transition {
    /// Lowers the countdown to `remaining`.
    CountdownStep { remaining: u32 },
    /// Ends the countdown and starts movement.
    BeginPlay,
    /// Reveals the outcome of a halted run.
    RevealOutcome { won: bool },
    /// Starts a fresh run after a restart request.
    ResetSession,
}

#[derive(Clone, Copy, Debug)]
struct ScheduledTransition {
    due: Duration,
    sequence: u64,
    transition: Transition,
}

/// Pending transitions keyed by the monotonic time they become due.
#[derive(Debug, Default)]
pub(crate) struct Schedule {
    pending: Vec<ScheduledTransition>,
    next_sequence: u64,
}

impl Schedule {
    pub(crate) fn schedule(&mut self, due: Duration, transition: Transition) {
        self.pending.push(ScheduledTransition {
            due,
            sequence: self.next_sequence,
            transition,
        });
        self.next_sequence = self.next_sequence.wrapping_add(1);
    }

    /// Removes and returns every transition due at `now`, oldest first.
    ///
    /// Transitions sharing a due time keep the order they were scheduled in.
    pub(crate) fn drain_due(&mut self, now: Duration) -> Vec<Transition> {
        let mut due: Vec<ScheduledTransition> = Vec::new();
        self.pending.retain(|entry| {
            if entry.due <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|entry| (entry.due, entry.sequence));
        due.into_iter().map(|entry| entry.transition).collect()
    }

    pub(crate) fn contains(&self, transition: Transition) -> bool {
        self.pending
            .iter()
            .any(|entry| entry.transition == transition)
    }
}

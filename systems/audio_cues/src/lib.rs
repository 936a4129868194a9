#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure audio cue system mapping world events to sounds adapters may play.

use snake_arcade_core::{Event, SessionPhase};

/// Discrete sound an adapter should play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Countdown towards a new session started.
    StartGame,
    /// The snake turned.
    SnakeMove,
    /// The snake ate the food item.
    EatFood,
    /// The snake hit a wall or itself.
    SnakeHit,
}

/// Audio cue system owning the mute state.
#[derive(Clone, Debug, Default)]
pub struct AudioCues {
    muted: bool,
}

impl AudioCues {
    /// Creates an unmuted cue system.
    #[must_use]
    pub const fn new() -> Self {
        Self { muted: false }
    }

    /// Flips the mute state and returns the new value.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Translates world events into sound cues, in event order.
    pub fn handle(&self, events: &[Event], out: &mut Vec<SoundCue>) {
        if self.muted {
            return;
        }

        out.extend(events.iter().filter_map(cue_for));
    }
}

fn cue_for(event: &Event) -> Option<SoundCue> {
    match event {
        Event::PhaseChanged {
            phase: SessionPhase::Countdown,
        } => Some(SoundCue::StartGame),
        Event::Moved { .. } => Some(SoundCue::SnakeMove),
        Event::FoodEaten { .. } => Some(SoundCue::EatFood),
        Event::SnakeHit { .. } => Some(SoundCue::SnakeHit),
        _ => None,
    }
}

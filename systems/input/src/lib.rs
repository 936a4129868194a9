#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input system translating raw key tokens into Snake Arcade commands.

use snake_arcade_core::{Command, Direction, Event, SessionPhase};

/// Logical key recognised by the input system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Steers the snake in the provided direction.
    Steer(Direction),
    /// Toggles between running and paused play.
    Pause,
    /// Toggles the audio mute state.
    Mute,
}

impl Key {
    /// Resolves an adapter-provided key token such as `ArrowUp`, `w` or `Space`.
    ///
    /// Returns `None` for tokens the game does not react to.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let key = match token {
            "ArrowUp" | "w" | "W" => Self::Steer(Direction::Up),
            "ArrowDown" | "s" | "S" => Self::Steer(Direction::Down),
            "ArrowLeft" | "a" | "A" => Self::Steer(Direction::Left),
            "ArrowRight" | "d" | "D" => Self::Steer(Direction::Right),
            " " | "Space" => Self::Pause,
            "f" | "F" => Self::Mute,
            _ => return None,
        };
        Some(key)
    }

    const fn is_control(self) -> bool {
        matches!(self, Self::Pause | Self::Mute)
    }
}

/// Key transition reported by the adapter for a single frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyTransition {
    /// The key went down, or the platform repeated a held key.
    Pressed(Key),
    /// The key was released.
    Released(Key),
}

/// Side effects of a frame of input that do not travel through the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct InputEffects {
    /// Indicates whether the audio mute state should flip.
    pub mute_toggled: bool,
}

/// Input system that tracks the session phase and latches control keys.
#[derive(Clone, Debug)]
pub struct Input {
    phase: SessionPhase,
    pause_latched: bool,
    mute_latched: bool,
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Input {
    /// Creates an input system expecting the session to start in the menu.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: SessionPhase::Menu,
            pause_latched: false,
            mute_latched: false,
        }
    }

    /// Session phase most recently observed through world events.
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Consumes world events and key transitions, emitting world commands.
    ///
    /// Control keys act once per press: holding them down or receiving
    /// platform key repeats does nothing until the key is released.
    pub fn handle(
        &mut self,
        events: &[Event],
        keys: &[KeyTransition],
        out: &mut Vec<Command>,
    ) -> InputEffects {
        for event in events {
            if let Event::PhaseChanged { phase } = event {
                self.phase = *phase;
            }
        }

        let mut effects = InputEffects::default();
        for transition in keys {
            match *transition {
                KeyTransition::Pressed(key) => {
                    if key.is_control() && !self.latch(key) {
                        continue;
                    }
                    match key {
                        Key::Steer(direction) => {
                            if self.phase.accepts_input() {
                                out.push(Command::QueueDirection { direction });
                            }
                        }
                        Key::Pause => {
                            if self.phase.accepts_input() {
                                out.push(Command::TogglePause);
                            }
                        }
                        Key::Mute => effects.mute_toggled = !effects.mute_toggled,
                    }
                }
                KeyTransition::Released(key) => self.release(key),
            }
        }
        effects
    }

    /// Marks a control key as held, returning `false` if it already was.
    fn latch(&mut self, key: Key) -> bool {
        let latched = match key {
            Key::Pause => &mut self.pause_latched,
            Key::Mute => &mut self.mute_latched,
            Key::Steer(_) => return true,
        };
        !std::mem::replace(latched, true)
    }

    fn release(&mut self, key: Key) {
        match key {
            Key::Pause => self.pause_latched = false,
            Key::Mute => self.mute_latched = false,
            Key::Steer(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_resolve_to_keys() {
        assert_eq!(
            Key::from_token("ArrowLeft"),
            Some(Key::Steer(Direction::Left))
        );
        assert_eq!(Key::from_token("W"), Some(Key::Steer(Direction::Up)));
        assert_eq!(Key::from_token("s"), Some(Key::Steer(Direction::Down)));
        assert_eq!(Key::from_token("D"), Some(Key::Steer(Direction::Right)));
        assert_eq!(Key::from_token(" "), Some(Key::Pause));
        assert_eq!(Key::from_token("Space"), Some(Key::Pause));
        assert_eq!(Key::from_token("F"), Some(Key::Mute));
        assert_eq!(Key::from_token("Escape"), None);
        assert_eq!(Key::from_token(""), None);
    }

    #[test]
    fn latch_only_applies_to_control_keys() {
        let mut input = Input::new();
        assert!(input.latch(Key::Steer(Direction::Up)));
        assert!(input.latch(Key::Steer(Direction::Up)));
        assert!(input.latch(Key::Pause));
        assert!(!input.latch(Key::Pause));
        input.release(Key::Pause);
        assert!(input.latch(Key::Pause));
    }
}

use std::{collections::VecDeque, time::Duration};

use anyhow::{bail, Context, Result};
use snake_arcade_system_input::{Key, KeyTransition};

/// Key press scheduled at a session time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ScriptedPress {
    at: Duration,
    key: Key,
}

/// Timeline of key presses replayed against the simulated clock.
///
/// Every press is released on the following frame.
#[derive(Debug, Default)]
pub(crate) struct InputScript {
    presses: VecDeque<ScriptedPress>,
    held: Vec<Key>,
}

impl InputScript {
    /// Parses `KEY@MILLIS` entries separated by commas, e.g. `s@3300,Space@4000`.
    pub(crate) fn parse(raw: &str) -> Result<Self> {
        let mut presses = Vec::new();
        for entry in raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            let Some((token, millis)) = entry.split_once('@') else {
                bail!("move `{entry}` is not of the form KEY@MILLIS");
            };
            let Some(key) = Key::from_token(token) else {
                bail!("unknown key `{token}` in move `{entry}`");
            };
            let millis: u64 = millis
                .parse()
                .with_context(|| format!("invalid time in move `{entry}`"))?;
            presses.push(ScriptedPress {
                at: Duration::from_millis(millis),
                key,
            });
        }
        presses.sort_by_key(|press| press.at);

        Ok(Self {
            presses: presses.into(),
            held: Vec::new(),
        })
    }

    /// Releases keys pressed on the previous frame, then presses every key due at `now`.
    pub(crate) fn transitions(&mut self, now: Duration) -> Vec<KeyTransition> {
        let mut transitions: Vec<KeyTransition> =
            self.held.drain(..).map(KeyTransition::Released).collect();
        while let Some(press) = self.presses.front().copied() {
            if press.at > now {
                break;
            }
            let _ = self.presses.pop_front();
            self.held.push(press.key);
            transitions.push(KeyTransition::Pressed(press.key));
        }
        transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_arcade_core::Direction;

    #[test]
    fn presses_are_replayed_in_time_order() {
        let mut script = InputScript::parse("d@500, s@200,Space@500").expect("valid script");

        assert!(script.transitions(Duration::from_millis(100)).is_empty());
        assert_eq!(
            script.transitions(Duration::from_millis(200)),
            vec![KeyTransition::Pressed(Key::Steer(Direction::Down))]
        );
        assert_eq!(
            script.transitions(Duration::from_millis(516)),
            vec![
                KeyTransition::Released(Key::Steer(Direction::Down)),
                KeyTransition::Pressed(Key::Steer(Direction::Right)),
                KeyTransition::Pressed(Key::Pause),
            ]
        );
        assert_eq!(
            script.transitions(Duration::from_millis(532)),
            vec![
                KeyTransition::Released(Key::Steer(Direction::Right)),
                KeyTransition::Released(Key::Pause),
            ]
        );
    }

    #[test]
    fn empty_script_has_no_presses() {
        let mut script = InputScript::parse("").expect("empty script is valid");
        assert!(script.transitions(Duration::from_secs(60)).is_empty());
    }

    #[test]
    fn malformed_entries_are_rejected() {
        assert!(InputScript::parse("d").is_err());
        assert!(InputScript::parse("q@100").is_err());
        assert!(InputScript::parse("w@soon").is_err());
    }
}

use snake_arcade_core::{Command, Direction, Event, SessionPhase};
use snake_arcade_system_input::{Input, InputEffects, Key, KeyTransition};

fn running() -> Event {
    Event::PhaseChanged {
        phase: SessionPhase::Running,
    }
}

#[test]
fn steering_is_locked_outside_play() {
    let mut input = Input::default();
    let mut commands = Vec::new();

    let _ = input.handle(
        &[],
        &[KeyTransition::Pressed(Key::Steer(Direction::Up))],
        &mut commands,
    );
    let _ = input.handle(
        &[Event::PhaseChanged {
            phase: SessionPhase::Countdown,
        }],
        &[KeyTransition::Pressed(Key::Steer(Direction::Up))],
        &mut commands,
    );

    assert!(
        commands.is_empty(),
        "directions must not be issued before play begins"
    );
}

#[test]
fn steering_is_forwarded_while_running_and_paused() {
    let mut input = Input::default();
    let mut commands = Vec::new();

    let _ = input.handle(
        &[running()],
        &[KeyTransition::Pressed(Key::Steer(Direction::Down))],
        &mut commands,
    );
    let _ = input.handle(
        &[Event::PhaseChanged {
            phase: SessionPhase::Paused,
        }],
        &[KeyTransition::Pressed(Key::Steer(Direction::Left))],
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![
            Command::QueueDirection {
                direction: Direction::Down
            },
            Command::QueueDirection {
                direction: Direction::Left
            },
        ]
    );
}

#[test]
fn held_pause_key_toggles_once() {
    let mut input = Input::default();
    let mut commands = Vec::new();

    let _ = input.handle(
        &[running()],
        &[
            KeyTransition::Pressed(Key::Pause),
            KeyTransition::Pressed(Key::Pause),
        ],
        &mut commands,
    );
    let _ = input.handle(&[], &[KeyTransition::Pressed(Key::Pause)], &mut commands);
    assert_eq!(commands, vec![Command::TogglePause]);

    let _ = input.handle(
        &[],
        &[
            KeyTransition::Released(Key::Pause),
            KeyTransition::Pressed(Key::Pause),
        ],
        &mut commands,
    );
    assert_eq!(commands, vec![Command::TogglePause, Command::TogglePause]);
}

#[test]
fn pause_is_ignored_after_game_over() {
    let mut input = Input::default();
    let mut commands = Vec::new();

    let _ = input.handle(
        &[
            running(),
            Event::PhaseChanged {
                phase: SessionPhase::GameOver,
            },
        ],
        &[KeyTransition::Pressed(Key::Pause)],
        &mut commands,
    );

    assert!(commands.is_empty());
    assert_eq!(input.phase(), SessionPhase::GameOver);
}

#[test]
fn mute_is_available_in_every_phase() {
    let mut input = Input::default();
    let mut commands = Vec::new();

    let effects = input.handle(&[], &[KeyTransition::Pressed(Key::Mute)], &mut commands);
    assert_eq!(effects, InputEffects { mute_toggled: true });

    let held = input.handle(&[], &[KeyTransition::Pressed(Key::Mute)], &mut commands);
    assert_eq!(held, InputEffects::default());

    let again = input.handle(
        &[],
        &[
            KeyTransition::Released(Key::Mute),
            KeyTransition::Pressed(Key::Mute),
        ],
        &mut commands,
    );
    assert!(again.mute_toggled);
    assert!(commands.is_empty(), "mute never reaches the world");
}

use std::time::Duration;

use anyhow::{Context, Result};
use snake_arcade_core::{Command, Event};
use snake_arcade_rendering::{BoardPresentation, RenderingBackend, Scene};
use snake_arcade_system_audio_cues::AudioCues;
use snake_arcade_system_high_score::{HighScore, HighScoreStore};
use snake_arcade_system_input::Input;
use snake_arcade_world::{self as world, query, SessionSettings, World};
use tracing::{debug, info};

use crate::script::InputScript;

/// Parameters of a headless run.
#[derive(Debug)]
pub(crate) struct RunOptions {
    pub(crate) frames: u32,
    pub(crate) frame_interval: Duration,
    pub(crate) restarts: u32,
}

/// Summary reported once the run finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub(crate) frames_presented: u64,
    pub(crate) games_finished: u32,
    pub(crate) high_score: u32,
}

/// Drives a session frame by frame on a simulated clock.
///
/// Each frame feeds the previous frame's events and the scripted keys to the
/// input system, applies the resulting commands and one tick, then lets the
/// remaining systems observe the new events. Frames where nothing happened
/// are not presented.
pub(crate) fn run<S, B>(
    settings: SessionSettings,
    mut script: InputScript,
    store: S,
    backend: &mut B,
    options: &RunOptions,
) -> Result<RunSummary>
where
    S: HighScoreStore,
    B: RenderingBackend,
{
    let mut world = World::new(settings).context("failed to create session")?;
    let presentation = BoardPresentation::new(
        query::board(&world),
        BoardPresentation::DEFAULT_TILE_SIZE,
    )
    .context("failed to lay out the board")?;
    let size = presentation.pixel_size();
    info!(width = size.x, height = size.y, "board layout");

    let mut input = Input::new();
    let mut audio = AudioCues::new();
    let mut high_score = HighScore::new(store);
    let mut restarts_left = options.restarts;
    let mut games_finished = 0;
    let mut frames_presented = 0;
    let mut commands = Vec::new();
    let mut cues = Vec::new();

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::StartSession {
            now: Duration::ZERO,
        },
        &mut events,
    );

    for frame in 0..options.frames {
        let now = options.frame_interval.saturating_mul(frame);

        let effects = input.handle(&events, &script.transitions(now), &mut commands);
        if effects.mute_toggled {
            let muted = audio.toggle_mute();
            info!(muted, "audio mute toggled");
        }

        let changed = !events.is_empty() || !commands.is_empty();
        events.clear();
        for command in commands.drain(..) {
            world::apply(&mut world, command, &mut events);
        }
        world::apply(&mut world, Command::Tick { now }, &mut events);

        if let Some(record) = high_score.handle(&events) {
            debug!(record, "high score raised");
        }
        audio.handle(&events, &mut cues);
        for cue in cues.drain(..) {
            debug!(?cue, "sound cue");
        }

        for event in &events {
            if let Event::GameOver { won, length } = event {
                games_finished += 1;
                info!(won, length, record = high_score.record(), "run finished");
                if restarts_left > 0 {
                    restarts_left -= 1;
                    commands.push(Command::Restart { now });
                }
            }
        }

        if changed || !events.is_empty() || frame == 0 {
            let scene = Scene::new(
                presentation,
                query::snake_view(&world),
                query::food(&world),
                query::phase(&world),
                query::score(&world),
                high_score.record(),
                query::countdown(&world),
                query::outcome(&world),
            );
            backend
                .present(&scene)
                .with_context(|| format!("failed to present frame {frame}"))?;
            frames_presented += 1;
        }
    }

    Ok(RunSummary {
        frames_presented,
        games_finished,
        high_score: high_score.record(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_arcade_core::{Cell, SessionPhase};
    use snake_arcade_system_high_score::MemoryHighScoreStore;

    #[derive(Debug, Default)]
    struct RecordingBackend {
        scenes: Vec<Scene>,
    }

    impl RenderingBackend for RecordingBackend {
        fn present(&mut self, scene: &Scene) -> Result<()> {
            self.scenes.push(scene.clone());
            Ok(())
        }
    }

    fn options(frames: u32, restarts: u32) -> RunOptions {
        RunOptions {
            frames,
            frame_interval: Duration::from_millis(20),
            restarts,
        }
    }

    #[test]
    fn straight_run_ends_at_the_wall() {
        let mut backend = RecordingBackend::default();
        let summary = run(
            SessionSettings::default(),
            InputScript::default(),
            MemoryHighScoreStore::default(),
            &mut backend,
            &options(1000, 0),
        )
        .expect("run succeeds");

        assert_eq!(summary.games_finished, 1);
        let last = backend.scenes.last().expect("frames were presented");
        assert_eq!(last.phase, SessionPhase::GameOver);
        assert_eq!(last.outcome, Some(false));
        assert!(last.status_line().ends_with("game over"));
        assert_eq!(last.snake.head(), Some(Cell::new(19, 6)));
        assert_eq!(
            backend.scenes.first().map(|scene| scene.phase),
            Some(SessionPhase::Countdown)
        );
    }

    #[test]
    fn scripted_turn_is_applied() {
        let mut backend = RecordingBackend::default();
        let script = InputScript::parse("s@3100").expect("valid script");
        let _ = run(
            SessionSettings::default(),
            script,
            MemoryHighScoreStore::default(),
            &mut backend,
            &options(180, 0),
        )
        .expect("run succeeds");

        let last = backend.scenes.last().expect("frames were presented");
        assert_eq!(last.phase, SessionPhase::Running);
        let head = last.snake.head().expect("snake has a head");
        assert_eq!(head.column(), 1);
        assert!(head.row() > 6);
    }

    #[test]
    fn restarts_start_another_run() {
        let mut backend = RecordingBackend::default();
        let summary = run(
            SessionSettings::default(),
            InputScript::default(),
            MemoryHighScoreStore::with_value(3),
            &mut backend,
            &options(2000, 1),
        )
        .expect("run succeeds");

        assert_eq!(summary.games_finished, 2);
        assert!(summary.frames_presented > 0);
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for Snake Arcade.
//!
//! The [`World`] owns the snake body, the direction queue, the food cell, the
//! session phase and every pending timed transition. Adapters mutate it only
//! through [`apply`] and observe it through the [`query`] functions and the
//! emitted events.

mod body;
mod food;
mod queue;
mod schedule;
mod settings;

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snake_arcade_core::{
    Board, Cell, CollisionCause, Command, Direction, Event, SessionPhase,
};
use tracing::{debug, info};

use self::{
    body::SnakeBody,
    queue::DirectionQueue,
    schedule::{Schedule, Transition},
};

pub use self::settings::{SessionSettings, SettingsError};

const INITIAL_HEADING: Direction = Direction::Right;

/// Represents the authoritative Snake Arcade session state.
#[derive(Debug)]
pub struct World {
    settings: SessionSettings,
    board: Board,
    phase: SessionPhase,
    body: SnakeBody,
    heading: Direction,
    queue: DirectionQueue,
    food: Option<Cell>,
    target_score: u32,
    win_announced: bool,
    countdown: Option<u32>,
    last_move: Option<Duration>,
    outcome: Option<bool>,
    schedule: Schedule,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a session in the menu phase with the snake and food prepared.
    pub fn new(settings: SessionSettings) -> Result<Self, SettingsError> {
        settings.validate()?;

        let board = settings.board();
        let body = SnakeBody::spawn(settings.spawn, settings.starter_growth);
        let mut rng = ChaCha8Rng::seed_from_u64(settings.rng_seed);
        let food = food::place_food(&board, &body, None, &mut rng);
        let target_score = length_of(&body);

        Ok(Self {
            board,
            phase: SessionPhase::Menu,
            body,
            heading: INITIAL_HEADING,
            queue: DirectionQueue::new(),
            food,
            target_score,
            win_announced: false,
            countdown: None,
            last_move: None,
            outcome: None,
            schedule: Schedule::default(),
            rng,
            settings,
        })
    }

    fn set_phase(&mut self, phase: SessionPhase, out_events: &mut Vec<Event>) {
        if self.phase == phase {
            return;
        }
        debug!(from = ?self.phase, to = ?phase, "session phase changed");
        self.phase = phase;
        out_events.push(Event::PhaseChanged { phase });
    }

    fn begin_countdown(&mut self, now: Duration, out_events: &mut Vec<Event>) {
        let steps = self.settings.countdown_seconds;
        self.set_phase(SessionPhase::Countdown, out_events);
        self.countdown = Some(steps);
        out_events.push(Event::CountdownAdvanced { remaining: steps });

        for elapsed in 1..=steps {
            let due = now.saturating_add(self.settings.countdown_step.saturating_mul(elapsed));
            self.schedule.schedule(
                due,
                Transition::CountdownStep {
                    remaining: steps - elapsed,
                },
            );
        }
        self.schedule.schedule(
            now.saturating_add(self.settings.start_delay),
            Transition::BeginPlay,
        );
    }

    fn fire_due_transitions(&mut self, now: Duration, out_events: &mut Vec<Event>) {
        for transition in self.schedule.drain_due(now) {
            debug!(?transition, ?now, "scheduled transition fired");
            match transition {
                Transition::CountdownStep { remaining } => {
                    if self.phase == SessionPhase::Countdown {
                        self.countdown = (remaining > 0).then_some(remaining);
                        out_events.push(Event::CountdownAdvanced { remaining });
                    }
                }
                Transition::BeginPlay => {
                    if self.phase == SessionPhase::Countdown {
                        self.countdown = None;
                        self.last_move = None;
                        self.queue.seed(INITIAL_HEADING);
                        self.enter_play(now, out_events);
                    }
                }
                Transition::RevealOutcome { won } => {
                    if self.phase == SessionPhase::Halted {
                        let length = length_of(&self.body);
                        info!(won, length, "game over");
                        self.outcome = Some(won);
                        self.set_phase(SessionPhase::GameOver, out_events);
                        out_events.push(Event::GameOver { won, length });
                    }
                }
                Transition::ResetSession => {
                    if self.phase == SessionPhase::GameOver {
                        self.reset_session(now, out_events);
                    }
                }
            }
        }
    }

    fn reset_session(&mut self, now: Duration, out_events: &mut Vec<Event>) {
        self.body = SnakeBody::spawn(self.settings.spawn, self.settings.starter_growth);
        self.heading = INITIAL_HEADING;
        self.queue.reset();
        self.queue.seed(INITIAL_HEADING);
        self.target_score = 0;
        self.win_announced = false;
        self.last_move = None;
        self.outcome = None;
        out_events.push(Event::SessionReset);

        let _ = self.replace_food(out_events);
        self.announce_score(out_events);
        self.enter_play(now, out_events);
    }

    /// Starts movement, or ends the run as a win when the body already
    /// covers every cell and no food could be placed.
    fn enter_play(&mut self, now: Duration, out_events: &mut Vec<Event>) {
        self.set_phase(SessionPhase::Running, out_events);
        if self.food.is_none() {
            info!(length = length_of(&self.body), "board filled before the first move");
            out_events.push(Event::BoardFilled);
            self.halt(now, true, out_events);
        }
    }

    /// Places a new food item, skipping the cell the current one occupies.
    ///
    /// Returns `false` when the board has no free cell left.
    fn replace_food(&mut self, out_events: &mut Vec<Event>) -> bool {
        let previous = self.food;
        self.food = food::place_food(&self.board, &self.body, previous, &mut self.rng);
        match self.food {
            Some(cell) => {
                debug_assert!(!self.body.contains(cell, false), "food placed on the body");
                debug!(?cell, "food placed");
                out_events.push(Event::FoodPlaced { cell });
                true
            }
            None => {
                debug!("no free cell left for food");
                false
            }
        }
    }

    fn announce_score(&mut self, out_events: &mut Vec<Event>) {
        let length = length_of(&self.body);
        if length <= self.target_score {
            return;
        }

        self.target_score = length;
        out_events.push(Event::ScoreChanged { length });

        if length >= self.settings.win_length && !self.win_announced {
            self.win_announced = true;
            out_events.push(Event::WinLengthReached { length });
        }
    }

    fn halt(&mut self, now: Duration, won: bool, out_events: &mut Vec<Event>) {
        self.set_phase(SessionPhase::Halted, out_events);
        self.schedule.schedule(
            now.saturating_add(self.settings.game_over_reveal_delay),
            Transition::RevealOutcome { won },
        );
    }

    fn step_if_due(&mut self, now: Duration, out_events: &mut Vec<Event>) {
        if let Some(last_move) = self.last_move {
            if now.saturating_sub(last_move) < self.settings.move_interval {
                return;
            }
        }
        self.last_move = Some(now);

        let mut cue = None;
        if let Some(drained) = self.queue.drain(self.heading) {
            self.heading = drained.heading;
            if drained.cue {
                cue = Some(drained.direction);
            }
        }

        let from = self.body.head();
        let new_head = self.body.next_head(self.heading);

        let collision = if !self.board.contains(new_head) {
            Some(CollisionCause::OutOfBounds)
        } else if self.body.collides_after_tail_shift(new_head) {
            Some(CollisionCause::SelfCollision)
        } else {
            None
        };

        if let Some(cause) = collision {
            let length = length_of(&self.body);
            info!(?cause, cell = ?new_head, length, "snake hit");
            out_events.push(Event::SnakeHit {
                cause,
                cell: new_head,
            });
            let won = length >= self.settings.win_length;
            self.halt(now, won, out_events);
            return;
        }

        self.body.advance(new_head);
        out_events.push(Event::HeadAdvanced { from, to: new_head });

        let mut board_filled = false;
        if self.food == Some(new_head) {
            out_events.push(Event::FoodEaten { cell: new_head });
            board_filled = !self.replace_food(out_events);
            self.body.grow(self.settings.growth_increment);
            out_events.push(Event::SnakeGrew {
                length: length_of(&self.body),
            });
            self.announce_score(out_events);
        }

        if let Some(direction) = cue {
            out_events.push(Event::Moved { direction });
        }

        if board_filled {
            info!(length = length_of(&self.body), "board filled");
            out_events.push(Event::BoardFilled);
            self.halt(now, true, out_events);
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartSession { now } => {
            if world.phase == SessionPhase::Menu {
                world.begin_countdown(now, out_events);
            }
        }
        Command::TogglePause => match world.phase {
            SessionPhase::Running => world.set_phase(SessionPhase::Paused, out_events),
            SessionPhase::Paused => world.set_phase(SessionPhase::Running, out_events),
            _ => {}
        },
        Command::Restart { now } => {
            if world.phase == SessionPhase::GameOver
                && !world.schedule.contains(Transition::ResetSession)
            {
                world.schedule.schedule(
                    now.saturating_add(world.settings.restart_delay),
                    Transition::ResetSession,
                );
            }
        }
        Command::QueueDirection { direction } => {
            if world.phase.accepts_input() {
                if let Some(contradicting) = world.queue.enqueue(direction, world.heading) {
                    out_events.push(Event::DirectionQueued {
                        direction,
                        contradicting,
                    });
                }
            }
        }
        Command::Tick { now } => {
            world.fire_due_transitions(now, out_events);
            if world.phase == SessionPhase::Running {
                world.step_if_due(now, out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use snake_arcade_core::{Board, Cell, Direction, SessionPhase, SnakeView};

    use super::{SessionSettings, World};

    /// Settings the session was constructed with.
    #[must_use]
    pub fn settings(world: &World) -> &SessionSettings {
        &world.settings
    }

    /// Board the session is played on.
    #[must_use]
    pub fn board(world: &World) -> Board {
        world.board
    }

    /// Current session phase.
    #[must_use]
    pub fn phase(world: &World) -> SessionPhase {
        world.phase
    }

    /// Captures a read-only view of the snake, head first.
    #[must_use]
    pub fn snake_view(world: &World) -> SnakeView {
        SnakeView::new(world.body.cells(), world.heading)
    }

    /// Heading applied on the most recent tick.
    #[must_use]
    pub fn heading(world: &World) -> Direction {
        world.heading
    }

    /// Cell holding the food item, or `None` once the board is full.
    #[must_use]
    pub fn food(world: &World) -> Option<Cell> {
        world.food
    }

    /// Directions waiting to be drained, oldest first.
    #[must_use]
    pub fn pending_directions(world: &World) -> Vec<Direction> {
        world.queue.pending()
    }

    /// Highest body length announced during the current run.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.target_score
    }

    /// Remaining countdown value while the countdown is shown.
    #[must_use]
    pub fn countdown(world: &World) -> Option<u32> {
        world.countdown
    }

    /// Whether the revealed run was won; `None` until the outcome is revealed.
    #[must_use]
    pub fn outcome(world: &World) -> Option<bool> {
        world.outcome
    }
}

fn length_of(body: &SnakeBody) -> u32 {
    u32::try_from(body.len()).unwrap_or(u32::MAX)
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Snake Arcade adapters.

use std::{error::Error, fmt, io::Write};

use anyhow::{Context, Result as AnyResult};
use glam::Vec2;
use snake_arcade_core::{Board, Cell, SessionPhase, SnakeView};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Converts the color channels back to bytes, ignoring alpha.
    #[must_use]
    pub fn to_rgb_u8(self) -> [u8; 3] {
        [
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
        ]
    }
}

fn channel_to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Colors used for each kind of board content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Empty cells.
    pub background: Color,
    /// Cell occupied by the snake's head.
    pub head: Color,
    /// Cells occupied by the rest of the body.
    pub body: Color,
    /// Cell holding the food item.
    pub food: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::from_rgb_u8(24, 24, 32),
            head: Color::from_rgb_u8(120, 220, 110),
            body: Color::from_rgb_u8(60, 160, 70),
            food: Color::from_rgb_u8(230, 70, 60),
        }
    }
}

/// Pixel layout of the board, one square tile per cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardPresentation {
    /// Number of columns on the board.
    pub columns: u32,
    /// Number of rows on the board.
    pub rows: u32,
    /// Side length of a single tile in pixels.
    pub tile_size: f32,
}

impl BoardPresentation {
    /// Tile side length used by the reference layout.
    pub const DEFAULT_TILE_SIZE: f32 = 28.0;

    /// Creates a layout for `board`.
    ///
    /// Returns an error when `tile_size` is not a positive finite number.
    pub fn new(board: Board, tile_size: f32) -> Result<Self, RenderingError> {
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(RenderingError::InvalidTileSize { tile_size });
        }

        Ok(Self {
            columns: board.columns(),
            rows: board.rows(),
            tile_size,
        })
    }

    /// Total size of the board in pixels.
    #[must_use]
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.columns as f32, self.rows as f32) * self.tile_size
    }

    /// Top-left pixel corner of `cell`.
    #[must_use]
    pub fn cell_origin(&self, cell: Cell) -> Vec2 {
        Vec2::new(cell.column() as f32, cell.row() as f32) * self.tile_size
    }

    /// Cell under a pixel position, or `None` outside the board.
    #[must_use]
    pub fn cell_at(&self, position: Vec2) -> Option<Cell> {
        let size = self.pixel_size();
        if position.x < 0.0 || position.y < 0.0 || position.x >= size.x || position.y >= size.y {
            return None;
        }

        let tile = (position / self.tile_size).floor();
        Some(Cell::new(tile.x as i32, tile.y as i32))
    }
}

/// Scene description combining the board, the snake and the session status.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Layout of the play area.
    pub board: BoardPresentation,
    /// Snake body cells, head first.
    pub snake: SnakeView,
    /// Cell holding the food item, if any.
    pub food: Option<Cell>,
    /// Current session phase.
    pub phase: SessionPhase,
    /// Length announced for the current run.
    pub score: u32,
    /// Best length recorded across sessions.
    pub high_score: u32,
    /// Remaining countdown value while it is shown.
    pub countdown: Option<u32>,
    /// Whether the revealed run was won, once the outcome is shown.
    pub outcome: Option<bool>,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        board: BoardPresentation,
        snake: SnakeView,
        food: Option<Cell>,
        phase: SessionPhase,
        score: u32,
        high_score: u32,
        countdown: Option<u32>,
        outcome: Option<bool>,
    ) -> Self {
        Self {
            board,
            snake,
            food,
            phase,
            score,
            high_score,
            countdown,
            outcome,
        }
    }

    /// Resolves what occupies `cell`. The head wins over the body and the
    /// body wins over food.
    #[must_use]
    pub fn content_at(&self, cell: Cell) -> CellContent {
        if self.snake.head() == Some(cell) {
            CellContent::Head
        } else if self.snake.contains(cell) {
            CellContent::Body
        } else if self.food == Some(cell) {
            CellContent::Food
        } else {
            CellContent::Empty
        }
    }

    /// Single-line status summary shown under the board.
    #[must_use]
    pub fn status_line(&self) -> String {
        let phase = match (self.phase, self.countdown) {
            (SessionPhase::Countdown, Some(remaining)) => format!("starting in {remaining}"),
            (SessionPhase::Countdown, None) => "go".to_owned(),
            (SessionPhase::Menu, _) => "press start".to_owned(),
            (SessionPhase::Running, _) => "running".to_owned(),
            (SessionPhase::Paused, _) => "paused".to_owned(),
            (SessionPhase::Halted, _) => "ouch".to_owned(),
            (SessionPhase::GameOver, _) if self.outcome == Some(true) => "you won".to_owned(),
            (SessionPhase::GameOver, _) => "game over".to_owned(),
        };
        format!(
            "length {} | best {} | {}",
            self.score, self.high_score, phase
        )
    }
}

/// Occupant of a single board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellContent {
    /// Nothing occupies the cell.
    Empty,
    /// The snake's head.
    Head,
    /// Any other snake segment.
    Body,
    /// The food item.
    Food,
}

impl CellContent {
    /// Glyph used by the text backend.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Head => '@',
            Self::Body => 'o',
            Self::Food => '*',
        }
    }

    /// Palette entry used to draw the content.
    #[must_use]
    pub const fn color(self, palette: &Palette) -> Color {
        match self {
            Self::Empty => palette.background,
            Self::Head => palette.head,
            Self::Body => palette.body,
            Self::Food => palette.food,
        }
    }
}

/// Rendering backend capable of presenting Snake Arcade scenes.
pub trait RenderingBackend {
    /// Presents a single frame.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}

/// Backend that writes each frame as a character grid followed by a status line.
#[derive(Debug)]
pub struct TextBackend<W> {
    writer: W,
    palette: Option<Palette>,
    frames: u64,
}

impl<W> TextBackend<W>
where
    W: Write,
{
    /// Creates a backend writing plain glyphs to `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            palette: None,
            frames: 0,
        }
    }

    /// Colors each glyph with 24-bit ANSI escapes taken from `palette`.
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Number of frames presented so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Consumes the backend, returning the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn render(&self, scene: &Scene) -> String {
        let mut frame = String::new();
        for row in 0..scene.board.rows {
            for column in 0..scene.board.columns {
                let content = scene.content_at(Cell::new(column as i32, row as i32));
                match self.palette {
                    Some(palette) => {
                        let [red, green, blue] = content.color(&palette).to_rgb_u8();
                        frame.push_str(&format!(
                            "\x1b[38;2;{red};{green};{blue}m{}\x1b[0m",
                            content.glyph()
                        ));
                    }
                    None => frame.push(content.glyph()),
                }
            }
            frame.push('\n');
        }
        frame.push_str(&scene.status_line());
        frame.push('\n');
        frame
    }
}

impl<W> RenderingBackend for TextBackend<W>
where
    W: Write,
{
    fn present(&mut self, scene: &Scene) -> AnyResult<()> {
        let frame = self.render(scene);
        self.writer
            .write_all(frame.as_bytes())
            .and_then(|()| self.writer.flush())
            .with_context(|| format!("failed to write frame {}", self.frames))?;
        self.frames += 1;
        Ok(())
    }
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Tiles must have a positive, finite side length.
    InvalidTileSize {
        /// Provided tile size that failed validation.
        tile_size: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileSize { tile_size } => {
                write!(f, "tile_size must be positive (received {tile_size})")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_arcade_core::Direction;

    fn presentation(columns: u32, rows: u32) -> BoardPresentation {
        BoardPresentation::new(
            Board::new(columns, rows),
            BoardPresentation::DEFAULT_TILE_SIZE,
        )
        .expect("default tile size is valid")
    }

    fn scene() -> Scene {
        Scene::new(
            presentation(4, 2),
            SnakeView::new(
                vec![Cell::new(1, 0), Cell::new(0, 0), Cell::new(0, 0)],
                Direction::Right,
            ),
            Some(Cell::new(3, 1)),
            SessionPhase::Running,
            3,
            9,
            None,
            None,
        )
    }

    #[test]
    fn board_presentation_rejects_degenerate_tiles() {
        for tile_size in [0.0, -4.0, f32::NAN, f32::INFINITY] {
            let error = BoardPresentation::new(Board::new(3, 3), tile_size)
                .expect_err("degenerate tile must be rejected");
            assert!(matches!(error, RenderingError::InvalidTileSize { .. }));
        }
    }

    #[test]
    fn reference_board_is_560_by_336_pixels() {
        assert_eq!(presentation(20, 12).pixel_size(), Vec2::new(560.0, 336.0));
    }

    #[test]
    fn cell_origin_and_hit_test_agree() {
        let layout = presentation(20, 12);
        let cell = Cell::new(7, 4);
        let origin = layout.cell_origin(cell);

        assert_eq!(origin, Vec2::new(196.0, 112.0));
        assert_eq!(layout.cell_at(origin + Vec2::splat(27.5)), Some(cell));
        assert_eq!(layout.cell_at(Vec2::new(560.0, 10.0)), None);
        assert_eq!(layout.cell_at(Vec2::new(-0.5, 10.0)), None);
    }

    #[test]
    fn text_backend_draws_glyphs_and_status() {
        let mut backend = TextBackend::new(Vec::new());
        backend.present(&scene()).expect("writing to memory succeeds");

        assert_eq!(backend.frames(), 1);
        let output = String::from_utf8(backend.into_inner()).expect("utf-8 frame");
        assert_eq!(output, "o@..\n...*\nlength 3 | best 9 | running\n");
    }

    #[test]
    fn palette_wraps_glyphs_in_ansi_colors() {
        let mut backend = TextBackend::new(Vec::new()).with_palette(Palette::default());
        backend.present(&scene()).expect("writing to memory succeeds");

        let output = String::from_utf8(backend.into_inner()).expect("utf-8 frame");
        assert!(output.starts_with("\x1b[38;2;60;160;70mo\x1b[0m"));
        assert!(output.contains("\x1b[38;2;230;70;60m*\x1b[0m"));
    }

    #[test]
    fn countdown_status_shows_remaining_seconds() {
        let mut scene = scene();
        scene.phase = SessionPhase::Countdown;
        scene.countdown = Some(2);
        assert_eq!(scene.status_line(), "length 3 | best 9 | starting in 2");
    }

    #[test]
    fn game_over_status_tells_wins_from_losses() {
        let mut scene = scene();
        scene.phase = SessionPhase::GameOver;

        scene.outcome = Some(false);
        assert_eq!(scene.status_line(), "length 3 | best 9 | game over");

        scene.outcome = Some(true);
        assert_eq!(scene.status_line(), "length 3 | best 9 | you won");
    }
}

//! Render output model: what one frame of the game looks like.
//!
//! Everything here is expressed in window pixels with the origin at the
//! top-left corner and y growing downward. The drawing plugins convert these
//! into Bevy world and UI coordinates.

use bevy::prelude::*;

use crate::components::GridPosition;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

pub const CLEAR_COLOR: Color = Color::srgb_u8(20, 20, 25);
pub const CELL_EVEN_COLOR: Color = Color::srgb_u8(35, 35, 45);
pub const CELL_ODD_COLOR: Color = Color::srgb_u8(45, 45, 60);
pub const PLAYER_COLOR: Color = Color::srgb_u8(80, 200, 120);
pub const ENEMY_COLOR: Color = Color::srgb_u8(220, 80, 80);
pub const STATUS_COLOR: Color = Color::WHITE;
pub const OVERLAY_FILL: Color = Color::srgba_u8(0, 0, 0, 160);
pub const OVERLAY_OUTLINE: Color = Color::srgb_u8(200, 200, 220);
pub const TITLE_COLOR: Color = Color::srgb_u8(255, 200, 200);
pub const HINT_COLOR: Color = Color::srgb_u8(230, 230, 230);

// ---------------------------------------------------------------------------
// Text and overlay geometry
// ---------------------------------------------------------------------------

pub const STATUS_TEXT: &str = "MOVE: WASD --- GOOD LUCK  |   ticks: ";
pub const STATUS_GAME_OVER_SUFFIX: &str = "   |   game over";
pub const TITLE_TEXT: &str = "GAME OVER!!!";
pub const HINT_TEXT: &str = "press 'r' to retry, 'q' to quit";

const STATUS_ORIGIN: Vec2 = Vec2::new(8.0, 8.0);
const STATUS_FONT_SIZE: f32 = 18.0;
const TITLE_FONT_SIZE: f32 = 28.0;
const HINT_FONT_SIZE: f32 = 18.0;

const OVERLAY_HEIGHT: f32 = 120.0;
const OVERLAY_OUTLINE_THICKNESS: f32 = 2.0;
const TITLE_OFFSET: f32 = 38.0;
const HINT_OFFSET: f32 = 82.0;

/// Gap left between neighbouring cells.
const CELL_GAP: f32 = 1.0;
/// Inset of a token inside its cell on each side.
const TOKEN_INSET: f32 = 2.0;

// ---------------------------------------------------------------------------
// Board layout
// ---------------------------------------------------------------------------

/// Grid dimensions plus the pixel geometry used to draw them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub columns: i32,
    pub rows: i32,
    pub cell_size: f32,
    pub hud_height: f32,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            columns: 20,
            rows: 20,
            cell_size: 32.0,
            hud_height: 40.0,
        }
    }
}

impl BoardLayout {
    /// Whether `pos` lies inside the grid.
    pub fn contains(&self, pos: GridPosition) -> bool {
        (0..self.columns).contains(&pos.x) && (0..self.rows).contains(&pos.y)
    }

    /// Saturate `pos` to the grid bounds.
    pub fn clamp(&self, pos: GridPosition) -> GridPosition {
        GridPosition {
            x: pos.x.clamp(0, self.columns - 1),
            y: pos.y.clamp(0, self.rows - 1),
        }
    }

    /// Pixel size of the grid area.
    pub fn board_size(&self) -> Vec2 {
        Vec2::new(
            self.columns as f32 * self.cell_size,
            self.rows as f32 * self.cell_size,
        )
    }

    /// Pixel size of the whole window: grid plus the HUD strip above it.
    pub fn window_size(&self) -> Vec2 {
        self.board_size() + Vec2::new(0.0, self.hud_height)
    }

    /// Top-left pixel of a cell.
    pub fn cell_origin(&self, pos: GridPosition) -> Vec2 {
        Vec2::new(
            pos.x as f32 * self.cell_size,
            pos.y as f32 * self.cell_size + self.hud_height,
        )
    }

    fn cell_rect(&self, pos: GridPosition) -> PixelRect {
        let color = if (pos.x + pos.y) % 2 == 0 {
            CELL_EVEN_COLOR
        } else {
            CELL_ODD_COLOR
        };
        PixelRect {
            origin: self.cell_origin(pos),
            size: Vec2::splat(self.cell_size - CELL_GAP),
            color,
        }
    }

    /// A token inset inside the cell at `pos`.
    pub fn token_rect(&self, pos: GridPosition, color: Color) -> PixelRect {
        PixelRect {
            origin: self.cell_origin(pos) + Vec2::splat(TOKEN_INSET),
            size: Vec2::splat(self.cell_size - 2.0 * TOKEN_INSET),
            color,
        }
    }

    /// Convert a pixel rect to the world-space center of a sprite, for a
    /// `Camera2d` centered on the window.
    pub fn world_center(&self, rect: &PixelRect) -> Vec2 {
        let window = self.window_size();
        let center = rect.origin + rect.size / 2.0;
        Vec2::new(center.x - window.x / 2.0, window.y / 2.0 - center.y)
    }
}

// ---------------------------------------------------------------------------
// Frame description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PixelRect {
    /// Top-left corner.
    pub origin: Vec2,
    pub size: Vec2,
    pub color: Color,
}

/// How a text line is placed relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    /// Centered on the anchor using the engine's text measurement.
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub position: Vec2,
    pub anchor: TextAnchor,
    pub font_size: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameOverOverlay {
    pub panel: PixelRect,
    pub outline: Color,
    pub outline_thickness: f32,
    pub title: TextLine,
    pub hint: TextLine,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameDescription {
    pub clear: Color,
    /// Row-major, `columns * rows` entries.
    pub cells: Vec<PixelRect>,
    pub player: PixelRect,
    pub enemy: PixelRect,
    pub status: TextLine,
    /// Present only once the player has been caught.
    pub overlay: Option<GameOverOverlay>,
}

impl FrameDescription {
    pub fn build(
        layout: &BoardLayout,
        player: GridPosition,
        enemy: GridPosition,
        ticks: u64,
        game_over: bool,
    ) -> Self {
        let cells = (0..layout.rows)
            .flat_map(|y| (0..layout.columns).map(move |x| GridPosition::new(x, y)))
            .map(|pos| layout.cell_rect(pos))
            .collect();

        Self {
            clear: CLEAR_COLOR,
            cells,
            player: layout.token_rect(player, PLAYER_COLOR),
            enemy: layout.token_rect(enemy, ENEMY_COLOR),
            status: status_line(ticks, game_over),
            overlay: game_over.then(|| game_over_overlay(layout)),
        }
    }
}

pub fn status_line(ticks: u64, game_over: bool) -> TextLine {
    TextLine {
        text: status_text(ticks, game_over),
        position: STATUS_ORIGIN,
        anchor: TextAnchor::TopLeft,
        font_size: STATUS_FONT_SIZE,
        color: STATUS_COLOR,
    }
}

/// Status line shown in the HUD strip.
pub fn status_text(ticks: u64, game_over: bool) -> String {
    let mut text = format!("{STATUS_TEXT}{ticks}");
    if game_over {
        text.push_str(STATUS_GAME_OVER_SUFFIX);
    }
    text
}

fn game_over_overlay(layout: &BoardLayout) -> GameOverOverlay {
    let board = layout.board_size();
    let top = layout.hud_height + (board.y - OVERLAY_HEIGHT) * 0.5;
    let center_x = board.x / 2.0;

    GameOverOverlay {
        panel: PixelRect {
            origin: Vec2::new(0.0, top),
            size: Vec2::new(board.x, OVERLAY_HEIGHT),
            color: OVERLAY_FILL,
        },
        outline: OVERLAY_OUTLINE,
        outline_thickness: OVERLAY_OUTLINE_THICKNESS,
        title: TextLine {
            text: TITLE_TEXT.to_string(),
            position: Vec2::new(center_x, top + TITLE_OFFSET),
            anchor: TextAnchor::Center,
            font_size: TITLE_FONT_SIZE,
            color: TITLE_COLOR,
        },
        hint: TextLine {
            text: HINT_TEXT.to_string(),
            position: Vec2::new(center_x, top + HINT_OFFSET),
            anchor: TextAnchor::Center,
            font_size: HINT_FONT_SIZE,
            color: HINT_COLOR,
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::color::ColorToPacked;

    fn frame(game_over: bool) -> FrameDescription {
        FrameDescription::build(
            &BoardLayout::default(),
            GridPosition::new(2, 2),
            GridPosition::new(15, 15),
            42,
            game_over,
        )
    }

    #[test]
    fn window_size_matches_reference() {
        assert_eq!(BoardLayout::default().window_size(), Vec2::new(640.0, 680.0));
    }

    #[test]
    fn cells_form_a_checkerboard() {
        let f = frame(false);
        assert_eq!(f.cells.len(), 400);
        assert_eq!(f.cells[0].color, CELL_EVEN_COLOR);
        assert_eq!(f.cells[1].color, CELL_ODD_COLOR);
        // Row 1 starts with the odd color.
        assert_eq!(f.cells[20].color, CELL_ODD_COLOR);
        assert_eq!(f.cells[21].color, CELL_EVEN_COLOR);
    }

    #[test]
    fn cells_sit_below_the_hud() {
        let f = frame(false);
        assert_eq!(f.cells[0].origin, Vec2::new(0.0, 40.0));
        assert_eq!(f.cells[0].size, Vec2::splat(31.0));
        assert_eq!(f.cells[21].origin, Vec2::new(32.0, 72.0));
    }

    #[test]
    fn tokens_are_inset_in_their_cells() {
        let f = frame(false);
        assert_eq!(f.player.origin, Vec2::new(66.0, 106.0));
        assert_eq!(f.player.size, Vec2::splat(28.0));
        assert_eq!(f.player.color, PLAYER_COLOR);
        assert_eq!(f.enemy.origin, Vec2::new(482.0, 522.0));
        assert_eq!(f.enemy.color, ENEMY_COLOR);
    }

    #[test]
    fn status_line_reports_ticks() {
        assert_eq!(
            frame(false).status.text,
            "MOVE: WASD --- GOOD LUCK  |   ticks: 42"
        );
        assert_eq!(
            frame(true).status.text,
            "MOVE: WASD --- GOOD LUCK  |   ticks: 42   |   game over"
        );
    }

    #[test]
    fn overlay_only_when_game_over() {
        assert!(frame(false).overlay.is_none());

        let overlay = frame(true).overlay.unwrap();
        assert_eq!(overlay.panel.origin, Vec2::new(0.0, 300.0));
        assert_eq!(overlay.panel.size, Vec2::new(640.0, 120.0));
        assert_eq!(overlay.title.text, "GAME OVER!!!");
        assert_eq!(overlay.title.position, Vec2::new(320.0, 338.0));
        assert_eq!(overlay.title.anchor, TextAnchor::Center);
        assert_eq!(overlay.hint.position, Vec2::new(320.0, 382.0));
    }

    #[test]
    fn palette_keeps_reference_bytes() {
        let f = frame(true);
        assert_eq!(f.clear.to_srgba().to_u8_array(), [20, 20, 25, 255]);
        assert_eq!(f.player.color.to_srgba().to_u8_array(), [80, 200, 120, 255]);
        let overlay = f.overlay.unwrap();
        assert_eq!(overlay.panel.color.to_srgba().to_u8_array(), [0, 0, 0, 160]);
        assert_eq!(overlay.outline.to_srgba().to_u8_array(), [200, 200, 220, 255]);
        assert_eq!(f.status.color, Color::WHITE);
    }

    #[test]
    fn world_center_flips_y_around_window_center() {
        let layout = BoardLayout::default();
        let rect = PixelRect {
            origin: Vec2::ZERO,
            size: Vec2::new(640.0, 680.0),
            color: CLEAR_COLOR,
        };
        assert_eq!(layout.world_center(&rect), Vec2::ZERO);

        let top_left_cell = layout.cell_rect(GridPosition::new(0, 0));
        let center = layout.world_center(&top_left_cell);
        assert_eq!(center, Vec2::new(-320.0 + 15.5, 340.0 - 40.0 - 15.5));
    }

    #[test]
    fn clamp_saturates_at_edges() {
        let layout = BoardLayout::default();
        assert_eq!(
            layout.clamp(GridPosition::new(-1, 25)),
            GridPosition::new(0, 19)
        );
        assert!(layout.contains(GridPosition::new(19, 0)));
        assert!(!layout.contains(GridPosition::new(20, 0)));
    }
}

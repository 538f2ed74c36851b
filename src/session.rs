//! The chase session: player and enemy positions, tick counter and state.
//!
//! The session is engine-agnostic. Plugins feed it discrete events and held
//! movement keys once per frame, and draw whatever `render` returns.

use bevy::prelude::*;

use crate::ai;
use crate::app_state::SessionState;
use crate::components::{Direction, GridPosition};
use crate::config::GameConfig;
use crate::frame::{
    self, BoardLayout, ENEMY_COLOR, FrameDescription, PLAYER_COLOR, PixelRect, TextLine,
};

/// One-shot input, as opposed to held movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscreteEvent {
    Quit,
    Retry,
    PointerPress,
}

/// What the caller should do after a discrete event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Ignored,
    Reset,
    Quit,
}

/// Result of one `update` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The session is not playing; nothing changed.
    Frozen,
    Advanced,
    /// The enemy reached the player on this frame.
    Caught,
}

/// Movement keys held during a logical frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    #[cfg(test)]
    pub(crate) fn from_directions(dirs: &[Direction]) -> Self {
        let mut keys = Self::default();
        for dir in dirs {
            match dir {
                Direction::Up => keys.up = true,
                Direction::Down => keys.down = true,
                Direction::Left => keys.left = true,
                Direction::Right => keys.right = true,
            }
        }
        keys
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameSession {
    layout: BoardLayout,
    player_start: GridPosition,
    enemy_start: GridPosition,
    player: GridPosition,
    enemy: GridPosition,
    ticks: u64,
    state: SessionState,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl GameSession {
    /// Build a session from a config that has passed `GameConfig::validate`.
    /// Start cells outside the grid are clamped onto it.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.layout(), config.player_start, config.enemy_start)
    }

    pub fn new(layout: BoardLayout, player_start: GridPosition, enemy_start: GridPosition) -> Self {
        let player_start = layout.clamp(player_start);
        let enemy_start = layout.clamp(enemy_start);
        Self {
            layout,
            player_start,
            enemy_start,
            player: player_start,
            enemy: enemy_start,
            ticks: 0,
            state: SessionState::Playing,
        }
    }

    pub fn player(&self) -> GridPosition {
        self.player
    }

    pub fn enemy(&self) -> GridPosition {
        self.enemy
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Manhattan distance between enemy and player.
    pub fn distance(&self) -> u32 {
        ai::manhattan(self.enemy, self.player)
    }

    /// Restore the initial positions, zero the ticks and resume play.
    pub fn reset(&mut self) {
        self.player = self.player_start;
        self.enemy = self.enemy_start;
        self.ticks = 0;
        self.state = SessionState::Playing;
    }

    pub fn handle_discrete_event(&mut self, event: DiscreteEvent) -> EventOutcome {
        match (event, self.state) {
            (DiscreteEvent::Quit, _) => EventOutcome::Quit,
            (DiscreteEvent::Retry | DiscreteEvent::PointerPress, SessionState::GameOver) => {
                self.reset();
                EventOutcome::Reset
            }
            (DiscreteEvent::Retry | DiscreteEvent::PointerPress, SessionState::Playing) => {
                EventOutcome::Ignored
            }
        }
    }

    /// Advance one logical frame: move the player, step the enemy, check for
    /// a catch, count the tick.
    pub fn update(&mut self, held: HeldKeys) -> StepOutcome {
        if self.state != SessionState::Playing {
            return StepOutcome::Frozen;
        }

        for dir in Direction::ALL {
            if held.is_held(dir) {
                self.player = self.layout.clamp(self.player.step(dir));
            }
        }

        if let Some(dir) = ai::pursuit_step(self.enemy, self.player) {
            self.enemy = self.enemy.step(dir);
        }

        let outcome = if self.player == self.enemy {
            self.state = SessionState::GameOver;
            StepOutcome::Caught
        } else {
            StepOutcome::Advanced
        };

        self.ticks += 1;
        outcome
    }

    /// Player token rect, without building the whole frame.
    pub fn player_rect(&self) -> PixelRect {
        self.layout.token_rect(self.player, PLAYER_COLOR)
    }

    pub fn enemy_rect(&self) -> PixelRect {
        self.layout.token_rect(self.enemy, ENEMY_COLOR)
    }

    pub fn status_line(&self) -> TextLine {
        frame::status_line(self.ticks, self.state == SessionState::GameOver)
    }

    pub fn render(&self) -> FrameDescription {
        FrameDescription::build(
            &self.layout,
            self.player,
            self.enemy,
            self.ticks,
            self.state == SessionState::GameOver,
        )
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, player: GridPosition, enemy: GridPosition) {
        self.player = player;
        self.enemy = enemy;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

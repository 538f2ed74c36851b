pub mod board;
pub mod camera;
pub mod font;
pub mod game_over;
pub mod hud;
pub mod input;
pub mod simulation;
pub mod telemetry;

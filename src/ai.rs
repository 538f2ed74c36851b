//! Enemy pursuit: a greedy, axis-priority step toward the player.
//!
//! The enemy closes the larger axis gap first. On an exact tie the vertical
//! axis wins, so the enemy never moves diagonally.

use crate::components::{Direction, GridPosition};

/// Direction of the enemy's next one-cell step toward `target`.
/// Returns `None` when both already share a cell.
pub fn pursuit_step(from: GridPosition, target: GridPosition) -> Option<Direction> {
    let dx = target.x - from.x;
    let dy = target.y - from.y;

    if dx.abs() > dy.abs() {
        horizontal(dx)
    } else if dy != 0 {
        vertical(dy)
    } else {
        None
    }
}

fn horizontal(dx: i32) -> Option<Direction> {
    match dx.signum() {
        1 => Some(Direction::Right),
        -1 => Some(Direction::Left),
        _ => None,
    }
}

fn vertical(dy: i32) -> Option<Direction> {
    match dy.signum() {
        1 => Some(Direction::Down),
        -1 => Some(Direction::Up),
        _ => None,
    }
}

/// Manhattan distance between two cells.
pub fn manhattan(a: GridPosition, b: GridPosition) -> u32 {
    (a.x - b.x).unsigned_abs() + (a.y - b.y).unsigned_abs()
}

//! Grid Placement
//!
//! Cosmetic placement of users and tweets on a rectangular grid. Positions
//! only feed snapshots and renderers; no behavior reads them.

use bevy_ecs::prelude::*;
use rand::Rng;
use social_events::GridPosition;

/// Component: cell an agent was placed in
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl From<Position> for GridPosition {
    fn from(p: Position) -> Self {
        GridPosition { x: p.x, y: p.y }
    }
}

/// Resource: grid bounds
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpatialGrid {
    pub width: u32,
    pub height: u32,
}

impl SpatialGrid {
    /// Zero-sized dimensions are bumped to 1 so a cell always exists.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Square grid with one row and column per user, as the renderer expects.
    pub fn for_users(num_users: usize) -> Self {
        let side = u32::try_from(num_users).unwrap_or(u32::MAX);
        Self::new(side, side)
    }

    /// Uniformly random cell.
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position {
            x: rng.gen_range(0..self.width),
            y: rng.gen_range(0..self.height),
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x < self.width && position.y < self.height
    }
}

//! Read-only view of a [`State`] for presentation consumers.
//!
//! Flattens the fixed shapes into a logical occupancy grid and keeps the falling
//! and preview shapes separate, like a renderer or logger wants them.

use serde::{Deserialize, Serialize};

use crate::shape::Shape;
use crate::state::{State, Stats};
use crate::types::{Angle, ShapeId, ShapeKind, GRID_HEIGHT, GRID_WIDTH};

/// Cell codes: 0 empty, 1..=7 catalog kinds, 8 obstacle
pub type BoardCells = [[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeSnapshot {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub angle: Angle,
    pub x: i32,
    pub y: i32,
}

impl From<&Shape> for ShapeSnapshot {
    fn from(value: &Shape) -> Self {
        Self {
            id: value.id(),
            kind: value.kind(),
            angle: value.angle(),
            x: value.x(),
            y: value.y(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub board: BoardCells,
    pub current: Option<ShapeSnapshot>,
    pub next: ShapeSnapshot,
    pub stats: Stats,
    pub fixed_shapes: usize,
    pub obstacles: usize,
    pub game_end: bool,
    pub level_up: bool,
}

impl BoardSnapshot {
    /// Number of occupied cells on the visible board
    pub fn filled_cells(&self) -> usize {
        self.board.iter().flatten().filter(|&&c| c != 0).count()
    }

    pub fn playable(&self) -> bool {
        !self.game_end && !self.level_up
    }
}

impl From<&State> for BoardSnapshot {
    fn from(state: &State) -> Self {
        let mut board = [[0u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize];
        for shape in &state.fixed_shapes {
            for block in shape.blocks() {
                let (col, row) = block.cell();
                if (0..GRID_WIDTH).contains(&col) && (0..GRID_HEIGHT).contains(&row) {
                    board[row as usize][col as usize] = shape.kind().code();
                }
            }
        }

        Self {
            board,
            current: state.current_shape.as_ref().map(ShapeSnapshot::from),
            next: ShapeSnapshot::from(&state.next_shape),
            stats: state.stats,
            fixed_shapes: state.fixed_shapes.len(),
            obstacles: state.obstacles().count(),
            game_end: state.game_end,
            level_up: state.level_up,
        }
    }
}

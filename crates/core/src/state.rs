//! Game state module - the immutable snapshot threaded through the reducer
//!
//! A [`State`] is a plain value. Actions take one by value and hand back the
//! next one; nothing is mutated behind a consumer's back, and a presentation
//! layer only ever sees a fully settled snapshot.

use serde::{Deserialize, Serialize};

use crate::rng::RngPair;
use crate::shape::{create_shape, Shape};
use crate::types::{ShapeId, SingleBlock, DROP_RATE, PREVIEW_POSITION};

/// Level, score and best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stats {
    pub level: u32,
    pub score: u32,
    pub high_score: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            level: 1,
            score: 0,
            high_score: 0,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub game_end: bool,
    pub current_shape: Option<Shape>,
    pub next_shape: Shape,
    /// Settled shapes, in settle order. Obstacles are the ones with negative ids.
    pub fixed_shapes: Vec<Shape>,
    pub stats: Stats,
    /// Pixels the current shape falls per tick
    pub drop_rate: i32,
    pub level_up: bool,
    /// Shapes spawned on this board (feeds shape ids)
    pub spawned: u32,
    /// Obstacles placed on this board (offsets shape ids)
    pub obstacles_placed: u32,
}

impl State {
    /// The starting board: nothing falling, nothing fixed, default stats.
    pub fn initial() -> Self {
        Self::initial_with_stats(Stats::default())
    }

    /// A fresh board carrying over `stats`.
    pub fn initial_with_stats(stats: Stats) -> Self {
        let (px, py) = PREVIEW_POSITION;
        Self {
            game_end: false,
            current_shape: None,
            next_shape: create_shape(RngPair::new(0, 0), ShapeId(1)).moved_to(px, py),
            fixed_shapes: Vec::new(),
            stats,
            drop_rate: DROP_RATE,
            level_up: false,
            spawned: 0,
            obstacles_placed: 0,
        }
    }

    /// Id for the next generated shape, offset past the obstacles of this board
    pub fn next_shape_id(&self) -> ShapeId {
        ShapeId(i64::from(self.spawned) + i64::from(self.obstacles_placed) + 1)
    }

    /// Fixed shapes that were placed as obstacles
    pub fn obstacles(&self) -> impl Iterator<Item = &Shape> {
        self.fixed_shapes.iter().filter(|s| s.is_obstacle())
    }

    /// Every block of every fixed shape
    pub fn fixed_blocks(&self) -> impl Iterator<Item = &SingleBlock> {
        self.fixed_shapes.iter().flat_map(|s| s.blocks().iter())
    }
}

impl Default for State {
    fn default() -> Self {
        Self::initial()
    }
}

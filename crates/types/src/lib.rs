//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behaviour beyond small conversions, so they
//! can be used by the core reducer, the runtime and any presentation layer.
//!
//! # Coordinates
//!
//! Positions are measured in canvas pixels. Every coordinate is an integer
//! multiple of [`BLOCK_SIZE`]; dividing by it yields the logical grid cell.
//!
//! - **Grid**: 10 columns x 20 rows
//! - **Canvas**: 200 x 400 pixels
//! - **Spawn**: shapes enter at `x = SPAWN_X`, just above the top edge
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 300 | Interval between gravity ticks |
//! | `CYCLE_TICKS` | 4 | Ticks between level-cycle events |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Angle, ShapeKind, GRID_WIDTH, BLOCK_SIZE, CANVAS_WIDTH};
//!
//! assert_eq!(GRID_WIDTH * BLOCK_SIZE, CANVAS_WIDTH);
//! assert_eq!(Angle::Deg270.rotate_cw(), Angle::Deg0);
//! assert_eq!(ShapeKind::from_name("t"), Some(ShapeKind::T));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Side length of one block in canvas pixels
pub const BLOCK_SIZE: i32 = 20;

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: i32 = 10;

/// Grid height in cells (20 rows)
pub const GRID_HEIGHT: i32 = 20;

/// Canvas width in pixels
pub const CANVAS_WIDTH: i32 = GRID_WIDTH * BLOCK_SIZE;

/// Canvas height in pixels
pub const CANVAS_HEIGHT: i32 = GRID_HEIGHT * BLOCK_SIZE;

/// Horizontal spawn coordinate for new shapes.
///
/// The vertical spawn coordinate depends on the shape: it starts with its
/// bottom row just above the canvas.
pub const SPAWN_X: i32 = (GRID_WIDTH / 2 - 2) * BLOCK_SIZE;

/// Where the upcoming shape is parked for preview (outside the canvas).
pub const PREVIEW_POSITION: (i32, i32) = (CANVAS_WIDTH + 2 * BLOCK_SIZE, 2 * BLOCK_SIZE);

/// Pixels a shape falls per tick
pub const DROP_RATE: i32 = BLOCK_SIZE;

/// Score needed per level before a level-up (`score >= level * LEVEL_UP_STEP`)
pub const LEVEL_UP_STEP: u32 = 10;

/// Interval between gravity ticks in milliseconds
pub const TICK_MS: u64 = 300;

/// Number of ticks between level-cycle events
pub const CYCLE_TICKS: u32 = 4;

/// Default seed of the first RNG stream
pub const DEFAULT_SEED_A: u32 = 1;

/// Default seed of the second RNG stream
pub const DEFAULT_SEED_B: u32 = 7;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_is_whole_number_of_blocks() {
        assert_eq!(CANVAS_WIDTH % BLOCK_SIZE, 0);
        assert_eq!(CANVAS_HEIGHT % BLOCK_SIZE, 0);
        assert_eq!(SPAWN_X % BLOCK_SIZE, 0);
        assert!(SPAWN_X >= 0 && SPAWN_X + 4 * BLOCK_SIZE <= CANVAS_WIDTH);
    }
}

/// An RGB color used to tag a shape kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Color used for procedurally placed obstacles
pub const OBSTACLE_COLOR: Rgb = Rgb::new(128, 128, 128);

/// Base matrix of a shape kind: rows of 0/1 cells, top to bottom
pub type Matrix = &'static [&'static [u8]];

/// The shape catalog
///
/// Each kind has a tight base matrix and a color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
/// - **Block**: single cell, only used for obstacles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
    Block,
}

impl ShapeKind {
    /// Kinds a falling shape can be drawn from, in selection order
    pub const CATALOG: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Base (angle 0) matrix of this kind
    pub fn matrix(&self) -> Matrix {
        match self {
            ShapeKind::I => &[&[1, 1, 1, 1]],
            ShapeKind::O => &[&[1, 1], &[1, 1]],
            ShapeKind::T => &[&[1, 1, 1], &[0, 1, 0]],
            ShapeKind::S => &[&[0, 1, 1], &[1, 1, 0]],
            ShapeKind::Z => &[&[1, 1, 0], &[0, 1, 1]],
            ShapeKind::J => &[&[1, 0, 0], &[1, 1, 1]],
            ShapeKind::L => &[&[0, 0, 1], &[1, 1, 1]],
            ShapeKind::Block => &[&[1]],
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            ShapeKind::I => Rgb::new(0, 240, 240),
            ShapeKind::O => Rgb::new(240, 240, 0),
            ShapeKind::T => Rgb::new(160, 0, 240),
            ShapeKind::S => Rgb::new(0, 240, 0),
            ShapeKind::Z => Rgb::new(240, 0, 0),
            ShapeKind::J => Rgb::new(0, 0, 240),
            ShapeKind::L => Rgb::new(240, 160, 0),
            ShapeKind::Block => OBSTACLE_COLOR,
        }
    }

    /// Lowercase name
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::I.name(), "i");
    /// assert_eq!(ShapeKind::Block.name(), "block");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::T => "t",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
            ShapeKind::Block => "block",
        }
    }

    /// Parse a kind from its name (case-insensitive)
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            "block" => Some(ShapeKind::Block),
            _ => None,
        }
    }

    /// Compact cell code for occupancy grids: 1..=7 for the catalog, 8 for obstacles
    pub fn code(&self) -> u8 {
        match self {
            ShapeKind::I => 1,
            ShapeKind::O => 2,
            ShapeKind::T => 3,
            ShapeKind::S => 4,
            ShapeKind::Z => 5,
            ShapeKind::J => 6,
            ShapeKind::L => 7,
            ShapeKind::Block => 8,
        }
    }
}

/// Clockwise rotation of a shape, one of the four canonical angles
///
/// The rotation cycle goes: 0 → 90 → 180 → 270 → 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Angle {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Angle {
    /// All angles, in selection order
    pub const ALL: [Angle; 4] = [Angle::Deg0, Angle::Deg90, Angle::Deg180, Angle::Deg270];

    pub fn degrees(&self) -> u16 {
        match self {
            Angle::Deg0 => 0,
            Angle::Deg90 => 90,
            Angle::Deg180 => 180,
            Angle::Deg270 => 270,
        }
    }

    /// Number of clockwise quarter turns from the base matrix (`(angle / 90) mod 4`)
    pub fn quarter_turns(&self) -> usize {
        (self.degrees() / 90 % 4) as usize
    }

    /// Rotate clockwise (angle + 90 mod 360)
    ///
    /// ```
    /// use blockfall_types::Angle;
    ///
    /// assert_eq!(Angle::Deg0.rotate_cw(), Angle::Deg90);
    /// assert_eq!(Angle::Deg90.rotate_cw(), Angle::Deg180);
    /// assert_eq!(Angle::Deg180.rotate_cw(), Angle::Deg270);
    /// assert_eq!(Angle::Deg270.rotate_cw(), Angle::Deg0);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Angle::Deg0 => Angle::Deg90,
            Angle::Deg90 => Angle::Deg180,
            Angle::Deg180 => Angle::Deg270,
            Angle::Deg270 => Angle::Deg0,
        }
    }
}

/// The atomic occupancy unit: one block in absolute canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SingleBlock {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl SingleBlock {
    /// A block of the standard block size at (x, y)
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            width: BLOCK_SIZE,
            height: BLOCK_SIZE,
        }
    }

    /// Right edge (exclusive)
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Logical grid cell (column, row); rows above the canvas are negative
    pub fn cell(&self) -> (i32, i32) {
        (self.x.div_euclid(BLOCK_SIZE), self.y.div_euclid(BLOCK_SIZE))
    }

    pub fn same_position(&self, other: &SingleBlock) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// Identifier of a shape.
///
/// Falling shapes get positive ids; procedurally placed obstacles get negative
/// ids so the two ranges never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub i64);

impl ShapeId {
    pub fn is_obstacle(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discrete player keys, each mapped 1:1 to a movement or rotation action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Down,
    Rotate,
}

impl Key {
    /// Parse key from string
    ///
    /// ```
    /// use blockfall_types::Key;
    ///
    /// assert_eq!(Key::from_str("left"), Some(Key::Left));
    /// assert_eq!(Key::from_str("ROTATE"), Some(Key::Rotate));
    /// assert_eq!(Key::from_str("hold"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "down" => Some(Key::Down),
            "rotate" => Some(Key::Rotate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Key::Left => "left",
            Key::Right => "right",
            Key::Down => "down",
            Key::Rotate => "rotate",
        }
    }
}

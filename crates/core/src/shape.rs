//! Shape module - catalog geometry, rasterization, collision and wall kicks
//!
//! A [`Shape`] is a kind, an angle and a canvas position. Its blocks are the
//! rasterization of those three fields and are recomputed by every method that
//! changes one of them, so a falling shape can never carry stale blocks.
//!
//! Once a shape settles its block list becomes authoritative: line clears
//! remove or shift individual blocks of fixed shapes (see [`Shape::clear_rows`]).

use arrayvec::ArrayVec;

use crate::rng::{scale_to_range, RngPair};
use crate::state::State;
use crate::types::{
    Angle, Rgb, ShapeId, ShapeKind, SingleBlock, BLOCK_SIZE, CANVAS_HEIGHT, CANVAS_WIDTH,
};

/// Blocks of one shape. No catalog kind has more than four cells.
pub type Blocks = ArrayVec<SingleBlock, 4>;

/// Rotate a matrix 90° clockwise
pub fn rotate_matrix(matrix: &[Vec<u8>]) -> Vec<Vec<u8>> {
    let rows = matrix.len();
    let cols = matrix.first().map_or(0, Vec::len);
    (0..cols)
        .map(|c| (0..rows).rev().map(|r| matrix[r][c]).collect())
        .collect()
}

/// The base matrix of `kind` rotated to `angle`
pub fn rotated_matrix(kind: ShapeKind, angle: Angle) -> Vec<Vec<u8>> {
    let mut matrix: Vec<Vec<u8>> = kind.matrix().iter().map(|row| row.to_vec()).collect();
    for _ in 0..angle.quarter_turns() {
        matrix = rotate_matrix(&matrix);
    }
    matrix
}

/// Rasterize a kind at an angle and position into absolute blocks
pub fn render_blocks(kind: ShapeKind, angle: Angle, x: i32, y: i32) -> Blocks {
    let mut blocks = Blocks::new();
    for (row, cells) in rotated_matrix(kind, angle).iter().enumerate() {
        for (col, &cell) in cells.iter().enumerate() {
            if cell == 1 {
                blocks.push(SingleBlock::new(
                    x + col as i32 * BLOCK_SIZE,
                    y + row as i32 * BLOCK_SIZE,
                ));
            }
        }
    }
    blocks
}

/// Rasterize a shape from its kind, angle and position
pub fn render_blocks_from_shape(shape: &Shape) -> Blocks {
    render_blocks(shape.kind, shape.angle, shape.x, shape.y)
}

/// A falling or settled shape
///
/// Blocks only ever come from rasterization or a row clear, so there is no
/// way to build a shape from serialized fields:
///
/// ```compile_fail
/// let shape: blockfall_core::Shape = serde_json::from_str("{}").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    id: ShapeId,
    kind: ShapeKind,
    angle: Angle,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    blocks: Blocks,
    fix: bool,
}

impl Shape {
    /// Build a shape and rasterize it
    pub fn new(id: ShapeId, kind: ShapeKind, angle: Angle, x: i32, y: i32) -> Self {
        let matrix = rotated_matrix(kind, angle);
        let height = matrix.len() as i32 * BLOCK_SIZE;
        let width = matrix.first().map_or(0, Vec::len) as i32 * BLOCK_SIZE;
        Self {
            id,
            kind,
            angle,
            x,
            y,
            width,
            height,
            blocks: render_blocks(kind, angle, x, y),
            fix: false,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn angle(&self) -> Angle {
        self.angle
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn color(&self) -> Rgb {
        self.kind.color()
    }

    pub fn blocks(&self) -> &[SingleBlock] {
        &self.blocks
    }

    pub fn is_fixed(&self) -> bool {
        self.fix
    }

    pub fn is_obstacle(&self) -> bool {
        self.id.is_obstacle()
    }

    /// Same shape placed at (x, y)
    #[must_use]
    pub fn moved_to(&self, x: i32, y: i32) -> Self {
        Self::new(self.id, self.kind, self.angle, x, y).with_fix(self.fix)
    }

    /// Same shape shifted by (dx, dy)
    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        self.moved_to(self.x + dx, self.y + dy)
    }

    /// Same shape turned 90° clockwise about its origin (no kicks)
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self::new(self.id, self.kind, self.angle.rotate_cw(), self.x, self.y).with_fix(self.fix)
    }

    #[must_use]
    pub fn with_fix(mut self, fix: bool) -> Self {
        self.fix = fix;
        self
    }

    /// Leftmost block edge
    pub fn left_edge(&self) -> Option<i32> {
        self.blocks.iter().map(|b| b.x).min()
    }

    /// Rightmost block edge (exclusive)
    pub fn right_edge(&self) -> Option<i32> {
        self.blocks.iter().map(SingleBlock::right).max()
    }

    /// Remove the blocks lying on `rows` (pixel y values) and drop every
    /// surviving block by one block height per cleared row below it.
    ///
    /// Returns `None` once the shape has no blocks left.
    pub fn clear_rows(&self, rows: &[i32]) -> Option<Self> {
        let blocks: Blocks = self
            .blocks
            .iter()
            .filter(|b| !rows.contains(&b.y))
            .map(|b| {
                let below = rows.iter().filter(|&&row| row > b.y).count() as i32;
                SingleBlock {
                    y: b.y + below * BLOCK_SIZE,
                    ..*b
                }
            })
            .collect();

        if blocks.is_empty() {
            return None;
        }
        Some(Self {
            blocks,
            ..self.clone()
        })
    }
}

/// Create a new falling shape from a random pair.
///
/// The first value picks the kind uniformly from the catalog, the second picks
/// the angle uniformly. The shape starts at (0, 0); the caller places it.
pub fn create_shape(pair: RngPair, id: ShapeId) -> Shape {
    let (v_kind, v_angle) = pair.values();
    let catalog = &ShapeKind::CATALOG;
    let kind = catalog[scale_to_range(v_kind, 0, catalog.len() as i32 - 1) as usize];
    let angle = Angle::ALL[scale_to_range(v_angle, 0, Angle::ALL.len() as i32 - 1) as usize];
    Shape::new(id, kind, angle, 0, 0)
}

/// Create a 1x1 fixed obstacle at (x, y).
///
/// Obstacle ids are negative (`-(index + 1)`) so they never meet shape ids.
pub fn create_obstacle(index: u32, x: i32, y: i32) -> Shape {
    Shape::new(
        ShapeId(-(index as i64) - 1),
        ShapeKind::Block,
        Angle::Deg0,
        x,
        y,
    )
    .with_fix(true)
}

/// Every block is inside the canvas horizontally, above the floor, and clear
/// of every fixed block.
///
/// Blocks above the top edge are allowed: shapes enter from there.
pub fn can_update<'a>(
    candidate: &Shape,
    mut fixed: impl Iterator<Item = &'a SingleBlock>,
) -> bool {
    let in_bounds = candidate
        .blocks()
        .iter()
        .all(|b| b.x >= 0 && b.x < CANVAS_WIDTH && b.y < CANVAS_HEIGHT);
    in_bounds
        && !fixed.any(|f| candidate.blocks().iter().any(|b| b.same_position(f)))
}

/// The candidate rests on a fixed block or on the bottom row
pub fn is_fix<'a>(candidate: &Shape, mut fixed: impl Iterator<Item = &'a SingleBlock>) -> bool {
    let bottom_row = CANVAS_HEIGHT - BLOCK_SIZE;
    candidate.blocks().iter().any(|b| b.y == bottom_row)
        || fixed.any(|f| {
            candidate
                .blocks()
                .iter()
                .any(|b| b.x == f.x && b.y + b.height == f.y)
        })
}

/// Validate a candidate against the board.
///
/// A rejected candidate is not an error: the state's current shape is
/// returned unchanged. An accepted one comes back with its settle flag set.
pub fn update_shape(state: &State, candidate: Shape) -> Option<Shape> {
    if !can_update(&candidate, state.fixed_blocks()) {
        return state.current_shape.clone();
    }
    let fix = is_fix(&candidate, state.fixed_blocks());
    Some(candidate.with_fix(fix))
}

/// Push a freshly rotated shape back inside the canvas.
///
/// Left edge first, then right edge.
#[must_use]
pub fn wall_kick(shape: Shape) -> Shape {
    let shape = match shape.left_edge() {
        Some(left) if left < BLOCK_SIZE => shape.translated(-left, 0),
        _ => shape,
    };
    match shape.right_edge() {
        Some(right) if right > CANVAS_WIDTH - BLOCK_SIZE => {
            shape.translated(CANVAS_WIDTH - right, 0)
        }
        _ => shape,
    }
}

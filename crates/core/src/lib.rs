//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules and state transitions.
//! It has **no dependencies** on terminals, timers, or I/O, making it:
//!
//! - **Deterministic**: The same seeds and action stream produce the same game
//! - **Testable**: Every rule is a pure `State -> State` function
//! - **Portable**: Can run headless, in a terminal, or behind any renderer
//!
//! # Module Structure
//!
//! - [`rng`]: LCG streams and scaling helpers for reproducible randomness
//! - [`shape`]: Shape catalog geometry, rasterization, collisions and wall kicks
//! - [`grid`]: Occupancy grid and full-row clearing
//! - [`state`]: The immutable game snapshot
//! - [`action`]: The closed action set and the fold that drives a game
//! - [`snapshot`]: Read-only flattened view for presentation
//!
//! # Game Rules
//!
//! - A cycle event spawns the preview shape just above the canvas
//! - Each tick drops the falling shape by the drop rate
//! - A shape settles when it rests on the floor or on a fixed block
//! - Full rows are removed and everything above falls; each row scores `level`
//! - Reaching `level * 10` points advances the level and scatters `level`
//!   obstacles over the lower half of a fresh board
//! - A shape that cannot enter the canvas ends the game
//!
//! # Example
//!
//! ```
//! use blockfall_core::{fold, Action, RngPair, State};
//! use blockfall_core::types::Key;
//!
//! let state = fold(
//!     State::initial(),
//!     [
//!         Action::GameCycle(RngPair::new(17, 42)),
//!         Action::Tick,
//!         Action::from_key(Key::Left),
//!         Action::Tick,
//!     ],
//! );
//!
//! assert!(state.current_shape.is_some());
//! assert!(!state.game_end);
//! ```

pub mod action;
pub mod grid;
pub mod rng;
pub mod shape;
pub mod snapshot;
pub mod state;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use action::{fold, Action};
pub use grid::{clear_full_rows, construct_grid, find_full_rows, Grid, LineClear};
pub use rng::{hash, scale, scale_to_range, Lcg, PairStream, RngPair};
pub use shape::{
    create_obstacle, create_shape, render_blocks, render_blocks_from_shape, rotate_matrix,
    update_shape, wall_kick, Shape,
};
pub use snapshot::{BoardSnapshot, ShapeSnapshot};
pub use state::{State, Stats};

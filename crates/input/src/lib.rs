//! Terminal input module.
//!
//! Maps `crossterm` key events onto the four game keys (left, right, down,
//! rotate) and their actions. Independent of any rendering.

pub mod map;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use map::{handle_key_event, map_key, should_quit};

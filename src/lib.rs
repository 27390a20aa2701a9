//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates as `blockfall::{types,core,engine,input}` so
//! the binary, integration tests and benches share one import path.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_types as types;

//! Engine module - drives the core reducer from action sources.
//!
//! The core crate only knows how to apply one action to one state. This crate
//! decides *which* actions arrive and *when*:
//!
//! - [`schedule`]: deterministic merged streams and headless simulations
//! - [`runtime`]: the tokio loop merging ticks, cycles and key presses
//! - [`config`]: environment-driven seeds and timing
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{EngineConfig, Schedule, Simulation};
//!
//! let config = EngineConfig::default();
//! let mut a = Simulation::new(Schedule::new(&config));
//! let mut b = Simulation::new(Schedule::new(&config));
//!
//! // Same seeds, same game.
//! assert_eq!(a.run(200), b.run(200));
//! ```

pub mod config;
pub mod runtime;
pub mod schedule;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::EngineConfig;
pub use runtime::{run_game, snapshot_channel};
pub use schedule::{Autopilot, Schedule, Simulation};

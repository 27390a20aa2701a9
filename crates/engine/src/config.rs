//! Engine configuration
//!
//! Defaults come from the shared constants; every field can be overridden with
//! an environment variable:
//!
//! - `BLOCKFALL_SEED_A`: seed of the first RNG stream
//! - `BLOCKFALL_SEED_B`: seed of the second RNG stream
//! - `BLOCKFALL_TICK_MS`: gravity tick interval in milliseconds
//! - `BLOCKFALL_CYCLE_TICKS`: ticks between level-cycle events

use std::str::FromStr;
use std::time::Duration;

use anyhow::{ensure, Context, Result};

use crate::types::{CYCLE_TICKS, DEFAULT_SEED_A, DEFAULT_SEED_B, TICK_MS};

/// Longest accepted tick or cycle interval (one hour)
pub const MAX_INTERVAL_MS: u64 = 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub seed_a: u32,
    pub seed_b: u32,
    pub tick_ms: u64,
    pub cycle_ticks: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed_a: DEFAULT_SEED_A,
            seed_b: DEFAULT_SEED_B,
            tick_ms: TICK_MS,
            cycle_ticks: CYCLE_TICKS,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create from an arbitrary variable lookup (unset or blank means default)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            seed_a: parse_var(&lookup, "BLOCKFALL_SEED_A", defaults.seed_a)?,
            seed_b: parse_var(&lookup, "BLOCKFALL_SEED_B", defaults.seed_b)?,
            tick_ms: parse_var(&lookup, "BLOCKFALL_TICK_MS", defaults.tick_ms)?,
            cycle_ticks: parse_var(&lookup, "BLOCKFALL_CYCLE_TICKS", defaults.cycle_ticks)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.tick_ms > 0, "tick interval must be positive");
        ensure!(self.cycle_ticks > 0, "cycle must be at least one tick");
        ensure!(
            self.tick_ms <= MAX_INTERVAL_MS,
            "tick interval of {}ms exceeds {MAX_INTERVAL_MS}ms",
            self.tick_ms
        );
        let cycle_ms = self.tick_ms.checked_mul(u64::from(self.cycle_ticks));
        ensure!(
            cycle_ms.is_some_and(|ms| ms <= MAX_INTERVAL_MS),
            "cycle of {} ticks at {}ms exceeds {MAX_INTERVAL_MS}ms",
            self.cycle_ticks,
            self.tick_ms
        );
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn cycle_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.saturating_mul(u64::from(self.cycle_ticks)))
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name).map(|s| s.trim().to_string()) {
        Some(s) if !s.is_empty() => s
            .parse()
            .with_context(|| format!("invalid value for {name}: {s:?}")),
        _ => Ok(default),
    }
}

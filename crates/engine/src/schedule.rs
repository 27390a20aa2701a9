//! Deterministic action sources for headless runs.
//!
//! [`Schedule`] produces the same merged stream the async runtime produces in
//! real time, one step per tick: queued key actions first, then a level cycle
//! every `cycle_ticks` steps, then the tick itself.

use std::collections::VecDeque;

use crate::config::EngineConfig;
use crate::core::{fold, scale_to_range, Action, BoardSnapshot, Lcg, PairStream, State};
use crate::types::Key;

/// Seeded random key presses, at most one per step
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Lcg,
}

impl Autopilot {
    pub fn new(seed: u32) -> Self {
        Self { rng: Lcg::new(seed) }
    }

    /// Next key press, or None for an idle step
    pub fn next_key(&mut self) -> Option<Key> {
        match scale_to_range(self.rng.next_scaled(), 0, 5) {
            0 => Some(Key::Left),
            1 => Some(Key::Right),
            2 => Some(Key::Rotate),
            3 => Some(Key::Down),
            _ => None,
        }
    }
}

/// Merged tick / cycle / key stream
#[derive(Debug, Clone)]
pub struct Schedule {
    pairs: PairStream,
    cycle_ticks: u32,
    step: u64,
    keys: VecDeque<Key>,
    autopilot: Option<Autopilot>,
}

impl Schedule {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            pairs: PairStream::new(config.seed_a, config.seed_b),
            cycle_ticks: config.cycle_ticks.max(1),
            step: 0,
            keys: VecDeque::new(),
            autopilot: None,
        }
    }

    pub fn with_autopilot(mut self, autopilot: Autopilot) -> Self {
        self.autopilot = Some(autopilot);
        self
    }

    /// Queue a key press for the next step
    pub fn push_key(&mut self, key: Key) {
        self.keys.push_back(key);
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    /// Actions of the next step, in merge order
    pub fn next_step(&mut self) -> Vec<Action> {
        let mut actions: Vec<Action> = self.keys.drain(..).map(Action::from_key).collect();
        if let Some(key) = self.autopilot.as_mut().and_then(Autopilot::next_key) {
            actions.push(Action::from_key(key));
        }
        if self.step % u64::from(self.cycle_ticks) == 0 {
            actions.push(Action::GameCycle(self.pairs.next_pair()));
        }
        actions.push(Action::Tick);
        self.step += 1;
        actions
    }
}

/// A headless game: a schedule folded step by step into a state
#[derive(Debug, Clone)]
pub struct Simulation {
    schedule: Schedule,
    state: State,
}

impl Simulation {
    pub fn new(schedule: Schedule) -> Self {
        Self::from_state(schedule, State::initial())
    }

    /// Continue a game from an arbitrary state
    pub fn from_state(schedule: Schedule, state: State) -> Self {
        Self { schedule, state }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Advance one step
    pub fn step(&mut self) -> &State {
        let actions = self.schedule.next_step();
        let state = std::mem::take(&mut self.state);
        self.state = fold(state, actions);
        &self.state
    }

    /// Advance `steps` steps
    pub fn run(&mut self, steps: u64) -> &State {
        for _ in 0..steps {
            self.step();
        }
        &self.state
    }
}

impl Iterator for Simulation {
    type Item = (u64, BoardSnapshot);

    fn next(&mut self) -> Option<Self::Item> {
        let snapshot = BoardSnapshot::from(self.step());
        Some((self.schedule.step(), snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_every_n_steps() {
        let config = EngineConfig {
            cycle_ticks: 3,
            ..EngineConfig::default()
        };
        let mut schedule = Schedule::new(&config);
        let cycles: Vec<bool> = (0..7)
            .map(|_| {
                schedule
                    .next_step()
                    .iter()
                    .any(|a| matches!(a, Action::GameCycle(_)))
            })
            .collect();
        assert_eq!(cycles, vec![true, false, false, true, false, false, true]);
    }

    #[test]
    fn test_merge_order_keys_cycle_tick() {
        let mut schedule = Schedule::new(&EngineConfig::default());
        schedule.push_key(Key::Rotate);
        let actions = schedule.next_step();
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0], Action::Rotate);
        assert!(matches!(actions[1], Action::GameCycle(_)));
        assert_eq!(actions[2], Action::Tick);
    }

    #[test]
    fn test_autopilot_deterministic() {
        let mut a = Autopilot::new(5);
        let mut b = Autopilot::new(5);
        for _ in 0..100 {
            assert_eq!(a.next_key(), b.next_key());
        }
    }

    #[test]
    fn test_first_step_spawns() {
        let mut sim = Simulation::new(Schedule::new(&EngineConfig::default()));
        let state = sim.step();
        assert!(state.current_shape.is_some());
        assert_eq!(state.spawned, 1);
    }
}

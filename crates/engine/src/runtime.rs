//! Real-time game loop.
//!
//! Merges three action sources into one totally ordered stream and folds it
//! into the game state:
//!
//! - key presses from an `mpsc` channel
//! - level-cycle events every `tick_ms * cycle_ticks`
//! - gravity ticks every `tick_ms`
//!
//! Sources that are ready at the same time are taken in that order, the same
//! order [`Schedule`](crate::schedule::Schedule) uses. Every settled state is
//! published through a `watch` channel; consumers only read it.

use log::{debug, info};
use tokio::sync::{mpsc, watch};
use tokio::time::{interval, MissedTickBehavior};

use crate::config::EngineConfig;
use crate::core::{Action, PairStream, State};
use crate::types::Key;

/// Create the snapshot channel a game publishes into
pub fn snapshot_channel() -> (watch::Sender<State>, watch::Receiver<State>) {
    watch::channel(State::initial())
}

/// Run a game until the key channel closes or every snapshot receiver is gone.
///
/// Returns the final state.
pub async fn run_game(
    config: EngineConfig,
    mut keys: mpsc::Receiver<Key>,
    snapshots: watch::Sender<State>,
) -> State {
    let mut pairs = PairStream::new(config.seed_a, config.seed_b);
    let mut state = State::initial();

    let mut ticks = interval(config.tick_interval());
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut cycles = interval(config.cycle_interval());
    cycles.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        "[Engine] starting: seeds=({}, {}) tick={}ms cycle={} ticks",
        config.seed_a, config.seed_b, config.tick_ms, config.cycle_ticks
    );

    loop {
        let action = tokio::select! {
            biased;
            key = keys.recv() => match key {
                Some(key) => Action::from_key(key),
                None => break,
            },
            _ = cycles.tick() => Action::GameCycle(pairs.next_pair()),
            _ = ticks.tick() => Action::Tick,
        };

        let before = Transition::of(&state);
        state = action.apply(state);
        Transition::of(&state).log_changes(&before);

        if snapshots.send(state.clone()).is_err() {
            debug!("[Engine] no snapshot receivers left, stopping");
            break;
        }
    }

    info!(
        "[Engine] stopped: level={} score={} high={}",
        state.stats.level, state.stats.score, state.stats.high_score
    );
    state
}

/// The parts of a state worth logging when they change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Transition {
    level: u32,
    score: u32,
    fixed: usize,
    game_end: bool,
    level_up: bool,
}

impl Transition {
    fn of(state: &State) -> Self {
        Self {
            level: state.stats.level,
            score: state.stats.score,
            fixed: state.fixed_shapes.len(),
            game_end: state.game_end,
            level_up: state.level_up,
        }
    }

    fn log_changes(&self, before: &Transition) {
        if self.score != before.score {
            info!("[Engine] rows cleared: score {} -> {}", before.score, self.score);
        }
        if self.level_up && !before.level_up {
            info!("[Engine] level {} complete", self.level);
        }
        if self.level != before.level {
            info!("[Engine] entering level {}", self.level);
        }
        if self.game_end && !before.game_end {
            info!("[Engine] game over at score {}", self.score);
        }
        if before.game_end && !self.game_end {
            info!("[Engine] restarted");
        }
        if self.fixed > before.fixed && self.level == before.level {
            debug!("[Engine] shape settled ({} fixed)", self.fixed);
        }
    }
}

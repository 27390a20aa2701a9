//! Action module - the closed set of state transitions
//!
//! Every input the engine understands is an [`Action`]. Each one is a pure
//! `State -> State` transform; a game is a left fold of an ordered action
//! stream over [`State::initial`].
//!
//! Two flags gate the machine:
//!
//! - `level_up`: ticks stop until the next cycle runs [`Action::NextLevel`]
//! - `game_end`: ticks stop until the next cycle runs [`Action::RestartGame`]
//!
//! Geometrically invalid moves and rotations are not errors. The shape simply
//! stays where it was.

use crate::grid::clear_full_rows;
use crate::rng::{scale_to_range, RngPair};
use crate::shape::{create_obstacle, create_shape, update_shape, wall_kick, Shape};
use crate::state::{State, Stats};
use crate::types::{
    Key, BLOCK_SIZE, GRID_HEIGHT, GRID_WIDTH, LEVEL_UP_STEP, PREVIEW_POSITION, SPAWN_X,
};

/// A state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Gravity step: level check, fall by the drop rate, clear rows, end check
    Tick,
    /// Translate the current shape by (dx, dy) pixels
    Move { dx: i32, dy: i32 },
    /// Turn the current shape 90° clockwise, with wall kicks
    Rotate,
    /// Promote the preview shape and generate a new one from the pair
    AddShape(RngPair),
    /// Raise the level-up flag once the score reaches the threshold
    CheckLevelUp,
    /// Advance a level: fresh board with `level` obstacles placed from the pair
    NextLevel(RngPair),
    /// Raise the end flag if the current shape could not enter the canvas
    EndGame,
    /// Fresh board at level 1, keeping the best score
    RestartGame,
    /// Clear full rows and add `rows * level` to the score
    Score,
    /// Periodic arbiter: next level, restart, or spawn
    GameCycle(RngPair),
}

impl Action {
    /// Map a player key to its action
    pub fn from_key(key: Key) -> Self {
        match key {
            Key::Left => Action::Move {
                dx: -BLOCK_SIZE,
                dy: 0,
            },
            Key::Right => Action::Move {
                dx: BLOCK_SIZE,
                dy: 0,
            },
            Key::Down => Action::Move {
                dx: 0,
                dy: BLOCK_SIZE,
            },
            Key::Rotate => Action::Rotate,
        }
    }

    /// Apply this action, producing the next state
    pub fn apply(&self, state: State) -> State {
        match *self {
            Action::Tick => tick(state),
            Action::Move { dx, dy } => move_shape(state, dx, dy),
            Action::Rotate => rotate(state),
            Action::AddShape(pair) => add_shape(state, pair),
            Action::CheckLevelUp => check_level_up(state),
            Action::NextLevel(pair) => next_level(state, pair),
            Action::EndGame => end_game(state),
            Action::RestartGame => restart_game(state),
            Action::Score => score(state),
            Action::GameCycle(pair) => game_cycle(state, pair),
        }
    }
}

/// Fold an ordered action stream into `state`
pub fn fold<I>(state: State, actions: I) -> State
where
    I: IntoIterator<Item = Action>,
{
    actions
        .into_iter()
        .fold(state, |state, action| action.apply(state))
}

fn tick(state: State) -> State {
    if state.game_end || state.level_up {
        return state;
    }
    let dy = state.drop_rate;
    fold(
        state,
        [
            Action::CheckLevelUp,
            Action::Move { dx: 0, dy },
            Action::Score,
            Action::EndGame,
        ],
    )
}

/// Validate a candidate and either keep it falling or settle it
fn settle(mut state: State, candidate: Shape) -> State {
    match update_shape(&state, candidate) {
        Some(shape) if shape.is_fixed() => {
            state.fixed_shapes.push(shape);
            state.current_shape = None;
        }
        other => state.current_shape = other,
    }
    state
}

fn move_shape(state: State, dx: i32, dy: i32) -> State {
    let Some(current) = &state.current_shape else {
        return state;
    };
    let candidate = current.translated(dx, dy);
    settle(state, candidate)
}

fn rotate(state: State) -> State {
    let Some(current) = &state.current_shape else {
        return state;
    };
    let candidate = wall_kick(current.rotated());
    settle(state, candidate)
}

fn add_shape(mut state: State, pair: RngPair) -> State {
    // A shape is still falling; the next cycle will try again.
    if state.current_shape.is_some() {
        return state;
    }

    let spawn = state
        .next_shape
        .moved_to(SPAWN_X, -state.next_shape.height());
    state.current_shape = Some(spawn);
    state.spawned += 1;

    let (px, py) = PREVIEW_POSITION;
    state.next_shape = create_shape(pair, state.next_shape_id()).moved_to(px, py);
    state
}

fn check_level_up(mut state: State) -> State {
    state.level_up = state.stats.score >= state.stats.level * LEVEL_UP_STEP;
    state
}

fn next_level(state: State, pair: RngPair) -> State {
    let stats = Stats {
        level: state.stats.level + 1,
        ..state.stats
    };
    let mut next = State::initial_with_stats(stats);
    place_obstacles(&mut next, stats.level, pair);
    next
}

/// Drop `count` 1x1 obstacles onto free cells of the lower half of the grid.
///
/// A taken cell is re-rolled with the following pair; after
/// `4 * lower-half cells` draws the remaining obstacles are skipped.
fn place_obstacles(state: &mut State, count: u32, pair: RngPair) {
    let top = GRID_HEIGHT / 2;
    let max_draws = 4 * (GRID_WIDTH * (GRID_HEIGHT - top)) as u32;

    let mut pair = pair;
    let mut draws = 0;
    while state.obstacles_placed < count && draws < max_draws {
        let (vx, vy) = pair.values();
        let x = scale_to_range(vx, 0, GRID_WIDTH - 1) * BLOCK_SIZE;
        let y = scale_to_range(vy, top, GRID_HEIGHT - 1) * BLOCK_SIZE;

        if !state.fixed_blocks().any(|b| b.x == x && b.y == y) {
            let obstacle = create_obstacle(state.obstacles_placed, x, y);
            state.fixed_shapes.push(obstacle);
            state.obstacles_placed += 1;
        }
        pair = pair.next();
        draws += 1;
    }
}

fn end_game(mut state: State) -> State {
    state.game_end = state
        .current_shape
        .as_ref()
        .is_some_and(|shape| shape.blocks().iter().all(|b| b.y < 0));
    state
}

fn restart_game(state: State) -> State {
    State::initial_with_stats(Stats {
        level: 1,
        score: 0,
        high_score: state.stats.high_score.max(state.stats.score),
    })
}

fn score(mut state: State) -> State {
    let cleared = clear_full_rows(
        &state.fixed_shapes,
        GRID_WIDTH as usize,
        GRID_HEIGHT as usize,
    );
    if cleared.rows.is_empty() {
        return state;
    }
    state.stats.score += cleared.rows.len() as u32 * state.stats.level;
    state.fixed_shapes = cleared.shapes;
    state
}

fn game_cycle(state: State, pair: RngPair) -> State {
    if state.level_up {
        next_level(state, pair)
    } else if state.game_end {
        restart_game(state)
    } else {
        add_shape(state, pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Angle, ShapeId, ShapeKind, CANVAS_HEIGHT};

    fn with_current(shape: Shape) -> State {
        State {
            current_shape: Some(shape),
            ..State::initial()
        }
    }

    #[test]
    fn test_from_key() {
        assert_eq!(
            Action::from_key(Key::Left),
            Action::Move {
                dx: -BLOCK_SIZE,
                dy: 0
            }
        );
        assert_eq!(Action::from_key(Key::Rotate), Action::Rotate);
    }

    #[test]
    fn test_move_without_shape_is_noop() {
        let state = State::initial();
        assert_eq!(Action::Move { dx: 20, dy: 0 }.apply(state.clone()), state);
        assert_eq!(Action::Rotate.apply(state.clone()), state);
    }

    #[test]
    fn test_move_rejected_at_wall() {
        let shape = Shape::new(ShapeId(1), ShapeKind::O, Angle::Deg0, 0, 100);
        let state = with_current(shape.clone());
        let next = Action::Move { dx: -20, dy: 0 }.apply(state);
        assert_eq!(next.current_shape, Some(shape));
    }

    #[test]
    fn test_move_settles_on_floor() {
        let shape = Shape::new(ShapeId(1), ShapeKind::O, Angle::Deg0, 0, CANVAS_HEIGHT - 60);
        let next = Action::Move { dx: 0, dy: 20 }.apply(with_current(shape));
        assert!(next.current_shape.is_none());
        assert_eq!(next.fixed_shapes.len(), 1);
        assert!(next.fixed_shapes[0].is_fixed());
        assert!(next.fixed_shapes[0]
            .blocks()
            .iter()
            .any(|b| b.y == CANVAS_HEIGHT - BLOCK_SIZE));
    }

    #[test]
    fn test_rotate_kicks_off_right_wall() {
        // Vertical I against the right wall; turning it flat must pull it left.
        let shape = Shape::new(ShapeId(1), ShapeKind::I, Angle::Deg90, 180, 100);
        let next = Action::Rotate.apply(with_current(shape));
        let current = next.current_shape.unwrap();
        assert_eq!(current.angle(), Angle::Deg180);
        assert_eq!(current.right_edge(), Some(200));
    }

    #[test]
    fn test_add_shape_promotes_preview() {
        let state = State::initial();
        let preview_kind = state.next_shape.kind();
        let next = Action::AddShape(RngPair::new(5, 6)).apply(state);
        let current = next.current_shape.as_ref().unwrap();
        assert_eq!(current.kind(), preview_kind);
        assert_eq!(current.x(), SPAWN_X);
        assert_eq!(current.y(), -current.height());
        assert_eq!(next.spawned, 1);
        assert_ne!(next.next_shape.id(), current.id());
    }

    #[test]
    fn test_add_shape_waits_for_falling_shape() {
        let state = Action::AddShape(RngPair::new(5, 6)).apply(State::initial());
        let again = Action::AddShape(RngPair::new(7, 8)).apply(state.clone());
        assert_eq!(again, state);
    }

    #[test]
    fn test_end_game_while_shape_above_canvas() {
        let state = Action::AddShape(RngPair::new(1, 1)).apply(State::initial());
        let ended = Action::EndGame.apply(state.clone());
        assert!(ended.game_end);

        let fallen = Action::Move { dx: 0, dy: 20 }.apply(state);
        assert!(!Action::EndGame.apply(fallen).game_end);
    }

    #[test]
    fn test_next_level_places_level_obstacles() {
        let mut state = State::initial();
        state.stats.score = 10;
        state.level_up = true;
        let next = Action::GameCycle(RngPair::new(11, 22)).apply(state);
        assert_eq!(next.stats.level, 2);
        assert_eq!(next.stats.score, 10);
        assert!(!next.level_up);
        assert_eq!(next.obstacles().count(), 2);
        for block in next.fixed_blocks() {
            assert!(block.y >= (GRID_HEIGHT / 2) * BLOCK_SIZE);
            assert!(block.y < CANVAS_HEIGHT);
        }
    }
}

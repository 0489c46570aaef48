use crate::{ActionId, GoalTable, GoalTables, StateSpace, TransitionModel};

mod episode_tests;
mod scoring_tests;

/// Cells `0..len` on a line. Actions: 0 = left, 1 = right, 2 = stay.
#[derive(Debug, Clone)]
pub(super) struct LineWorld {
    pub len: i64,
    pub start: i64,
    pub goals: Vec<i64>,
}

impl LineWorld {
    /// Seven cells, goals at both ends, start in the middle.
    pub fn standard() -> Self {
        LineWorld {
            len: 7,
            start: 3,
            goals: vec![0, 6],
        }
    }
}

pub(super) const LEFT: usize = 0;
pub(super) const RIGHT: usize = 1;
pub(super) const STAY: usize = 2;

impl TransitionModel for LineWorld {
    type State = i64;

    fn initial_state(&self) -> i64 {
        self.start
    }

    fn num_actions(&self) -> usize {
        3
    }

    fn goals(&self) -> &[i64] {
        &self.goals
    }

    fn transition(&self, action: ActionId, state: &i64) -> i64 {
        match action.index() {
            0 => (state - 1).max(0),
            1 => (state + 1).min(self.len - 1),
            _ => *state,
        }
    }

    fn distance(&self, goal: &i64, state: &i64) -> f64 {
        (goal - state).abs() as f64
    }
}

/// Value `10 - distance` per goal, terminal worth 0, policy walks toward the goal.
pub(super) fn line_tables(model: &LineWorld, space: &StateSpace<i64>) -> Vec<GoalTable> {
    model
        .goals
        .iter()
        .map(|goal| {
            let mut values = vec![0.0; space.index_count()];
            let mut policy = vec![ActionId::from(STAY); space.index_count()];
            for (index, state) in space.iter() {
                values[index.index()] = 10.0 - (goal - state).abs() as f64;
                policy[index.index()] = ActionId::from(if goal < state {
                    LEFT
                } else if goal > state {
                    RIGHT
                } else {
                    STAY
                });
            }
            GoalTable { values, policy }
        })
        .collect()
}

pub(super) fn line_setup() -> (LineWorld, StateSpace<i64>, GoalTables) {
    let model = LineWorld::standard();
    let space = StateSpace::enumerate(&model);
    let tables = GoalTables::load(&model, &space, line_tables(&model, &space))
        .expect("line tables should load");
    (model, space, tables)
}

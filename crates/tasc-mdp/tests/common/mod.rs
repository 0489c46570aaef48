#![allow(dead_code)]

use std::collections::VecDeque;

use tasc_core::{ActionId, GoalTable, GoalTables, StateIndex, StateSpace, TransitionModel};

pub const GOAL_REWARD: f64 = 100.0;
pub const STEP_REWARD: f64 = -1.0;
pub const GAMMA: f64 = 0.9;

/// Solve every goal of `model` and load the tables.
pub fn solve_and_load<M: TransitionModel>(model: &M, space: &StateSpace<M::State>) -> GoalTables {
    GoalTables::load(model, space, solve(model, space)).expect("solved tables load")
}

/// Discounted shortest-path tables for every goal, in goal order.
///
/// Stands in for the offline planner: the goal state pays `GOAL_REWARD`,
/// every other step costs `STEP_REWARD`, and the terminal state is worth 0.
pub fn solve<M: TransitionModel>(model: &M, space: &StateSpace<M::State>) -> Vec<GoalTable> {
    space
        .goal_indices(model)
        .expect("goals are reachable")
        .into_iter()
        .map(|goal| solve_goal(model, space, goal))
        .collect()
}

fn solve_goal<M: TransitionModel>(
    model: &M,
    space: &StateSpace<M::State>,
    goal: StateIndex,
) -> GoalTable {
    let count = space.index_count();
    let terminal = space.terminal();
    let actions: Vec<ActionId> = (0..model.num_actions()).map(ActionId::from).collect();

    let successors: Vec<Vec<StateIndex>> = (0..count)
        .map(|s| {
            actions
                .iter()
                .map(|&a| {
                    space
                        .apply(model, a, StateIndex::from(s), Some(goal))
                        .expect("enumerated successor")
                })
                .collect()
        })
        .collect();

    // Steps to the goal along the goal-aware transition graph.
    let mut predecessors = vec![Vec::new(); count];
    for (s, next) in successors.iter().enumerate() {
        for t in next {
            if *t != terminal && t.index() != s {
                predecessors[t.index()].push(s);
            }
        }
    }
    let mut steps = vec![None; count];
    steps[goal.index()] = Some(0u32);
    let mut queue = VecDeque::from([goal.index()]);
    while let Some(t) = queue.pop_front() {
        let d = steps[t].expect("queued states have a distance");
        for &s in &predecessors[t] {
            if steps[s].is_none() {
                steps[s] = Some(d + 1);
                queue.push_back(s);
            }
        }
    }

    let values: Vec<f64> = (0..count)
        .map(|s| {
            if s == terminal.index() {
                return 0.0;
            }
            match steps[s] {
                Some(d) => {
                    let discount = GAMMA.powi(d as i32);
                    STEP_REWARD * (1.0 - discount) / (1.0 - GAMMA) + discount * GOAL_REWARD
                }
                // Only other goals end here: one step, then the terminal state.
                None if successors[s].iter().all(|t| *t == terminal) => STEP_REWARD,
                None => STEP_REWARD / (1.0 - GAMMA),
            }
        })
        .collect();

    // Greedy policy, lowest action on ties.
    let policy = successors
        .iter()
        .map(|next| {
            let mut best = 0;
            for (a, t) in next.iter().enumerate() {
                if values[t.index()] > values[next[best].index()] {
                    best = a;
                }
            }
            ActionId::from(best)
        })
        .collect();

    GoalTable { values, policy }
}

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
/// Error type for enumeration lookups, oracle loading, and episode execution.
pub enum EngineError {
    #[error("state index {index} is not part of the enumerated state space")]
    UnmappedIndex { index: usize },

    #[error("state {state} is not part of the enumerated state space")]
    UnmappedState { state: String },

    #[error("goal {goal} is not reachable from the initial state")]
    UnreachableGoal { goal: String },

    #[error("expected tables for {expected} goals, got {got}")]
    GoalCount { expected: usize, got: usize },

    #[error("goal {goal} {table} table covers {got} indices, expected {expected}")]
    TableSize {
        goal: usize,
        table: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("goal {goal} value at index {index} is not finite: {value}")]
    NonFiniteValue { goal: usize, index: usize, value: f64 },

    #[error("goal {goal} policy at index {index} selects action {action}, only {num_actions} exist")]
    InvalidPolicyAction {
        goal: usize,
        index: usize,
        action: usize,
        num_actions: usize,
    },

    #[error("goal {goal} does not exist, only {count} goals are configured")]
    UnknownGoal { goal: usize, count: usize },

    #[error("action {action} does not exist, only {num_actions} actions are defined")]
    UnknownAction { action: usize, num_actions: usize },

    #[error("the model defines no actions to choose from")]
    NoActions,

    #[error("episode did not reach the terminal state within {max_ticks} ticks")]
    TickLimitExceeded { max_ticks: usize },
}

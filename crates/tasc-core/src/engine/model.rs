use std::{fmt::Debug, hash::Hash};

use crate::engine::ids::ActionId;

/// Result of applying an action to a concrete state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Successor<S> {
    /// The task continues in this state (possibly the input state itself).
    State(S),
    /// The absorbing pseudo-state entered once a goal has been reached.
    Terminal,
}

impl<S> Successor<S> {
    /// Borrow the concrete successor state, if any.
    pub fn state(&self) -> Option<&S> {
        match self {
            Successor::State(state) => Some(state),
            Successor::Terminal => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Successor::Terminal)
    }
}

/// Problem-specific dynamics of a shared task with several candidate goals.
///
/// Implementations never fail: an action whose preconditions do not hold in
/// a state maps that state onto itself.
pub trait TransitionModel {
    type State: Clone + Eq + Hash + Debug;

    /// Return the state every episode starts from by default.
    fn initial_state(&self) -> Self::State;

    /// Return the size of the fixed action set.
    fn num_actions(&self) -> usize;

    /// Return the candidate goals in their canonical order.
    fn goals(&self) -> &[Self::State];

    /// Raw successor of `state` under `action`, ignoring goals entirely.
    fn transition(&self, action: ActionId, state: &Self::State) -> Self::State;

    /// Domain-specific distance from `state` to `goal`. Smaller is closer.
    fn distance(&self, goal: &Self::State, state: &Self::State) -> f64;

    /// Human readable name of an action, used in logs.
    fn action_label(&self, action: ActionId) -> String {
        format!("action {}", action.index())
    }

    /// Check whether a state belongs to the candidate goal set.
    fn is_goal(&self, state: &Self::State) -> bool {
        self.goals().contains(state)
    }

    /// Apply `action` to `state`.
    ///
    /// Goal states, and the specific `goal` when one is supplied, lead to
    /// `Terminal` regardless of the action.
    fn apply(
        &self,
        action: ActionId,
        state: &Self::State,
        goal: Option<&Self::State>,
    ) -> Successor<Self::State> {
        if self.is_goal(state) || goal.is_some_and(|goal| goal == state) {
            return Successor::Terminal;
        }
        Successor::State(self.transition(action, state))
    }
}

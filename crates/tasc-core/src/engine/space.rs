use std::{collections::HashMap, fmt::Debug, hash::Hash};

use crate::engine::{
    error::EngineError,
    ids::{ActionId, StateIndex},
    model::{Successor, TransitionModel},
};

/// External view of a dense index: a concrete state or the terminal sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projected<'a, S> {
    State(&'a S),
    Terminal,
}

/// Bidirectional mapping between every reachable state and a dense index.
///
/// Built once by reachability closure and read-only afterwards. Index
/// `len()` is reserved for the terminal pseudo-state.
#[derive(Debug, Clone)]
pub struct StateSpace<S>
where
    S: Clone + Eq + Hash,
{
    states: Vec<S>,
    state_to_index: HashMap<S, StateIndex>,
}

impl<S> StateSpace<S>
where
    S: Clone + Eq + Hash + Debug,
{
    /// Enumerate every state reachable from the model's initial state.
    pub fn enumerate<M>(model: &M) -> Self
    where
        M: TransitionModel<State = S>,
    {
        Self::enumerate_from(model, model.initial_state())
    }

    /// Enumerate every state reachable from `initial` under all actions.
    ///
    /// Indices follow discovery order of a depth-first closure, so they are
    /// stable for a given model and initial state.
    pub fn enumerate_from<M>(model: &M, initial: S) -> Self
    where
        M: TransitionModel<State = S>,
    {
        let mut space = StateSpace {
            states: Vec::new(),
            state_to_index: HashMap::new(),
        };
        space.insert_new(&initial);

        let mut frontier = vec![initial];
        while let Some(state) = frontier.pop() {
            for action in (0..model.num_actions()).map(ActionId::from) {
                // Terminal successors are the sentinel, never real entries.
                if let Successor::State(next) = model.apply(action, &state, None) {
                    if space.insert_new(&next) {
                        tracing::trace!(index = space.len() - 1, state = ?next, "discovered state");
                        frontier.push(next);
                    }
                }
            }
        }

        tracing::debug!(states = space.len(), "state space enumerated");
        space
    }

    /// Insert the state if unseen. Returns whether it was new.
    fn insert_new(&mut self, state: &S) -> bool {
        if self.state_to_index.contains_key(state) {
            return false;
        }

        let index = StateIndex::from(self.states.len());
        self.states.push(state.clone());
        self.state_to_index.insert(state.clone(), index);
        true
    }

    /// Number of real (non-terminal) states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of indices tables must cover, terminal included.
    pub fn index_count(&self) -> usize {
        self.states.len() + 1
    }

    /// The reserved terminal index, one past the last real state.
    pub fn terminal(&self) -> StateIndex {
        StateIndex::from(self.states.len())
    }

    pub fn is_terminal(&self, index: StateIndex) -> bool {
        index == self.terminal()
    }

    /// Convert an index back to its state.
    pub fn state(&self, index: StateIndex) -> Result<&S, EngineError> {
        self.states
            .get(index.index())
            .ok_or(EngineError::UnmappedIndex {
                index: index.index(),
            })
    }

    /// Convert a state into its dense index.
    pub fn index_of(&self, state: &S) -> Result<StateIndex, EngineError> {
        self.state_to_index
            .get(state)
            .copied()
            .ok_or_else(|| EngineError::UnmappedState {
                state: format!("{state:?}"),
            })
    }

    pub fn contains(&self, state: &S) -> bool {
        self.state_to_index.contains_key(state)
    }

    /// Iterate over `(index, state)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (StateIndex, &S)> {
        self.states
            .iter()
            .enumerate()
            .map(|(idx, state)| (StateIndex::from(idx), state))
    }

    /// External representation of an index, for trajectories and logs.
    pub fn project(&self, index: StateIndex) -> Result<Projected<'_, S>, EngineError> {
        if self.is_terminal(index) {
            return Ok(Projected::Terminal);
        }
        self.state(index).map(Projected::State)
    }

    /// Index-level transition. The terminal index absorbs every action.
    pub fn apply<M>(
        &self,
        model: &M,
        action: ActionId,
        index: StateIndex,
        goal: Option<StateIndex>,
    ) -> Result<StateIndex, EngineError>
    where
        M: TransitionModel<State = S>,
    {
        if action.index() >= model.num_actions() {
            return Err(EngineError::UnknownAction {
                action: action.index(),
                num_actions: model.num_actions(),
            });
        }
        if self.is_terminal(index) {
            return Ok(self.terminal());
        }

        let state = self.state(index)?;
        let goal = goal.map(|goal| self.state(goal)).transpose()?;

        match model.apply(action, state, goal) {
            Successor::Terminal => Ok(self.terminal()),
            Successor::State(next) => self.index_of(&next),
        }
    }

    /// Resolve the model's candidate goals to indices, in goal order.
    pub fn goal_indices<M>(&self, model: &M) -> Result<Vec<StateIndex>, EngineError>
    where
        M: TransitionModel<State = S>,
    {
        model
            .goals()
            .iter()
            .map(|goal| {
                self.index_of(goal)
                    .map_err(|_| EngineError::UnreachableGoal {
                        goal: format!("{goal:?}"),
                    })
            })
            .collect()
    }
}

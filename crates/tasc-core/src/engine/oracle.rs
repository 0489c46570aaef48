use crate::engine::{
    error::EngineError,
    ids::{ActionId, GoalId, StateIndex},
    model::TransitionModel,
    space::StateSpace,
};

/// Value table and greedy policy for one goal, indexed by `StateIndex`.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalTable {
    pub values: Vec<f64>,
    pub policy: Vec<ActionId>,
}

/// Per-goal tables produced offline by an MDP solver.
///
/// Only accepted against a finished enumeration, and read-only afterwards.
/// Convergence and optimality are trusted, not re-verified.
#[derive(Debug, Clone)]
pub struct GoalTables {
    goal_states: Vec<StateIndex>,
    tables: Vec<GoalTable>,
}

impl GoalTables {
    /// Validate `tables` against the enumerated space and the model's goals.
    ///
    /// `tables[i]` belongs to `model.goals()[i]`.
    pub fn load<M>(
        model: &M,
        space: &StateSpace<M::State>,
        tables: Vec<GoalTable>,
    ) -> Result<Self, EngineError>
    where
        M: TransitionModel,
    {
        let goal_states = space.goal_indices(model)?;
        if tables.len() != goal_states.len() {
            return Err(EngineError::GoalCount {
                expected: goal_states.len(),
                got: tables.len(),
            });
        }

        let expected = space.index_count();
        let num_actions = model.num_actions();
        for (goal, table) in tables.iter().enumerate() {
            if table.values.len() != expected {
                return Err(EngineError::TableSize {
                    goal,
                    table: "value",
                    expected,
                    got: table.values.len(),
                });
            }
            if table.policy.len() != expected {
                return Err(EngineError::TableSize {
                    goal,
                    table: "policy",
                    expected,
                    got: table.policy.len(),
                });
            }

            if let Some((index, value)) = table
                .values
                .iter()
                .copied()
                .enumerate()
                .find(|(_, value)| !value.is_finite())
            {
                return Err(EngineError::NonFiniteValue { goal, index, value });
            }

            if let Some((index, action)) = table
                .policy
                .iter()
                .enumerate()
                .find(|(_, action)| action.index() >= num_actions)
            {
                return Err(EngineError::InvalidPolicyAction {
                    goal,
                    index,
                    action: action.index(),
                    num_actions,
                });
            }
        }

        tracing::debug!(
            goals = goal_states.len(),
            indices = expected,
            "goal tables loaded"
        );

        Ok(GoalTables {
            goal_states,
            tables,
        })
    }

    /// Number of candidate goals.
    pub fn goal_count(&self) -> usize {
        self.tables.len()
    }

    /// Iterate over all goal ids in canonical order.
    pub fn goal_ids(&self) -> impl Iterator<Item = GoalId> {
        (0..self.tables.len()).map(GoalId::from)
    }

    /// Indices of the candidate goal states, in goal order.
    pub fn goal_states(&self) -> &[StateIndex] {
        &self.goal_states
    }

    /// Index of the state a goal id stands for.
    pub fn goal_state(&self, goal: GoalId) -> Result<StateIndex, EngineError> {
        self.goal_states
            .get(goal.index())
            .copied()
            .ok_or(EngineError::UnknownGoal {
                goal: goal.index(),
                count: self.goal_states.len(),
            })
    }

    fn table(&self, goal: GoalId) -> Result<&GoalTable, EngineError> {
        self.tables.get(goal.index()).ok_or(EngineError::UnknownGoal {
            goal: goal.index(),
            count: self.tables.len(),
        })
    }

    /// State value of `state` when pursuing `goal`.
    pub fn value(&self, goal: GoalId, state: StateIndex) -> Result<f64, EngineError> {
        self.table(goal)?
            .values
            .get(state.index())
            .copied()
            .ok_or(EngineError::UnmappedIndex {
                index: state.index(),
            })
    }

    /// Greedy action in `state` when pursuing `goal`.
    pub fn policy(&self, goal: GoalId, state: StateIndex) -> Result<ActionId, EngineError> {
        self.table(goal)?
            .policy
            .get(state.index())
            .copied()
            .ok_or(EngineError::UnmappedIndex {
                index: state.index(),
            })
    }

    /// `value(goal, to) - value(goal, from)`; positive means progress.
    pub fn value_delta(
        &self,
        goal: GoalId,
        from: StateIndex,
        to: StateIndex,
    ) -> Result<f64, EngineError> {
        Ok(self.value(goal, to)? - self.value(goal, from)?)
    }
}

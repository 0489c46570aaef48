/// Dense index of a reachable state. One past the last real state is the terminal sentinel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateIndex(usize);

impl StateIndex {
    /// Return the underlying dense index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for StateIndex {
    fn from(value: usize) -> Self {
        StateIndex(value)
    }
}

/// Identifier drawn from the fixed, finite action set `[0, num_actions)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(usize);

impl ActionId {
    /// Return the underlying action number.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for ActionId {
    fn from(value: usize) -> Self {
        ActionId(value)
    }
}

/// Position of a goal in the candidate goal list.
/// Every per-goal table is a parallel `Vec` indexed by this id.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GoalId(usize);

impl GoalId {
    /// Return the position of this goal in the candidate list.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for GoalId {
    fn from(value: usize) -> Self {
        GoalId(value)
    }
}

use std::fmt;

use tasc_core::{ActionId, TransitionModel};

use crate::error::DomainError;
use crate::spec::TowerSpec;

/// Where a single block currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockState {
    Storage,
    Bin,
    /// On the tower, `1` being the bottom position.
    Table(usize),
}

/// Configuration of every block, indexed by block number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TowerState(Vec<BlockState>);

impl TowerState {
    pub fn new(blocks: Vec<BlockState>) -> Self {
        TowerState(blocks)
    }

    /// Every block sitting in storage.
    pub fn all_in_storage(num_blocks: usize) -> Self {
        TowerState(vec![BlockState::Storage; num_blocks])
    }

    /// Build a finished tower from per-block heights.
    pub fn stacked(heights: &[usize]) -> Self {
        TowerState(heights.iter().map(|&h| BlockState::Table(h)).collect())
    }

    pub fn blocks(&self) -> &[BlockState] {
        &self.0
    }

    pub fn block(&self, block: usize) -> Option<BlockState> {
        self.0.get(block).copied()
    }

    /// Height of the tower, zero when the table is empty.
    pub fn height(&self) -> usize {
        self.0
            .iter()
            .filter_map(|block| match block {
                BlockState::Table(h) => Some(*h),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Block on top of the tower, if any.
    pub fn top_block(&self) -> Option<usize> {
        let height = self.height();
        if height == 0 {
            return None;
        }
        self.0
            .iter()
            .position(|block| *block == BlockState::Table(height))
    }

    fn with_block(&self, block: usize, state: BlockState) -> Self {
        let mut blocks = self.0.clone();
        blocks[block] = state;
        TowerState(blocks)
    }
}

/// Operation applied to one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockOp {
    PickFromStorage,
    PlaceOnTable,
    Idle,
    RemoveFromTable,
    RemoveFromBin,
}

impl BlockOp {
    pub const ALL: [BlockOp; 5] = [
        BlockOp::PickFromStorage,
        BlockOp::PlaceOnTable,
        BlockOp::Idle,
        BlockOp::RemoveFromTable,
        BlockOp::RemoveFromBin,
    ];

    fn index(self) -> usize {
        match self {
            BlockOp::PickFromStorage => 0,
            BlockOp::PlaceOnTable => 1,
            BlockOp::Idle => 2,
            BlockOp::RemoveFromTable => 3,
            BlockOp::RemoveFromBin => 4,
        }
    }
}

impl fmt::Display for BlockOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockOp::PickFromStorage => "pick from storage",
            BlockOp::PlaceOnTable => "place on table",
            BlockOp::Idle => "idle",
            BlockOp::RemoveFromTable => "remove from table",
            BlockOp::RemoveFromBin => "remove from bin",
        };
        f.write_str(name)
    }
}

/// Decoded tower action: action `i` addresses block `i / 5` with op `i % 5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TowerAction {
    pub block: usize,
    pub op: BlockOp,
}

impl TowerAction {
    pub fn new(block: usize, op: BlockOp) -> Self {
        TowerAction { block, op }
    }

    pub fn decode(action: ActionId) -> Self {
        let ops = BlockOp::ALL.len();
        TowerAction {
            block: action.index() / ops,
            op: BlockOp::ALL[action.index() % ops],
        }
    }

    pub fn encode(&self) -> ActionId {
        ActionId::from(self.block * BlockOp::ALL.len() + self.op.index())
    }
}

/// Building a coloured block tower from storage through a staging bin.
#[derive(Debug, Clone)]
pub struct TowerAssembly {
    num_blocks: usize,
    initial: TowerState,
    goals: Vec<TowerState>,
}

impl TowerAssembly {
    /// Validate and assemble a tower task.
    pub fn new(initial: TowerState, goals: Vec<TowerState>) -> Result<Self, DomainError> {
        let num_blocks = initial.blocks().len();
        if num_blocks == 0 {
            return Err(DomainError::NoBlocks);
        }
        if goals.is_empty() {
            return Err(DomainError::NoGoals);
        }

        check_layout("initial state", &initial, num_blocks)?;
        for (i, goal) in goals.iter().enumerate() {
            let which = format!("goal {i}");
            check_layout(&which, goal, num_blocks)?;
            if goals[..i].contains(goal) {
                return Err(DomainError::DuplicateGoal { which });
            }
        }

        tracing::debug!(num_blocks, goals = goals.len(), "tower assembly task ready");
        Ok(TowerAssembly {
            num_blocks,
            initial,
            goals,
        })
    }

    /// Build from a validated YAML description.
    pub fn from_spec(spec: &TowerSpec) -> Result<Self, DomainError> {
        spec.compile()
    }

    /// The seven-block, three-goal assembly task.
    pub fn standard() -> Result<Self, DomainError> {
        TowerSpec::from_default_yaml()?.compile()
    }

    pub fn num_blocks(&self) -> usize {
        self.num_blocks
    }

    fn block_distance(goal: BlockState, current: BlockState) -> f64 {
        match (goal, current) {
            (goal, current) if goal == current => 0.0,
            (BlockState::Storage | BlockState::Bin, _) => 1.0,
            (BlockState::Table(_), BlockState::Bin) => 1.0,
            (BlockState::Table(_), _) => 2.0,
        }
    }
}

fn check_layout(which: &str, state: &TowerState, num_blocks: usize) -> Result<(), DomainError> {
    let got = state.blocks().len();
    if got != num_blocks {
        return Err(DomainError::BlockCount {
            which: which.to_string(),
            expected: num_blocks,
            got,
        });
    }

    let mut heights: Vec<usize> = state
        .blocks()
        .iter()
        .filter_map(|block| match block {
            BlockState::Table(h) => Some(*h),
            _ => None,
        })
        .collect();
    if heights.contains(&0) {
        return Err(DomainError::ZeroHeight {
            which: which.to_string(),
        });
    }

    // Table blocks must form one gap-free stack.
    heights.sort_unstable();
    if heights.iter().enumerate().any(|(i, &h)| h != i + 1) {
        return Err(DomainError::BrokenStack {
            which: which.to_string(),
            blocks: heights.len(),
        });
    }
    Ok(())
}

impl TransitionModel for TowerAssembly {
    type State = TowerState;

    fn initial_state(&self) -> TowerState {
        self.initial.clone()
    }

    fn num_actions(&self) -> usize {
        self.num_blocks * BlockOp::ALL.len()
    }

    fn goals(&self) -> &[TowerState] {
        &self.goals
    }

    fn transition(&self, action: ActionId, state: &TowerState) -> TowerState {
        let TowerAction { block, op } = TowerAction::decode(action);
        let Some(current) = state.block(block) else {
            return state.clone();
        };

        match (op, current) {
            (BlockOp::PickFromStorage, BlockState::Storage) => {
                state.with_block(block, BlockState::Bin)
            }
            (BlockOp::PlaceOnTable, BlockState::Bin) if state.height() < self.num_blocks => {
                state.with_block(block, BlockState::Table(state.height() + 1))
            }
            (BlockOp::RemoveFromTable, BlockState::Table(_))
                if state.top_block() == Some(block) =>
            {
                state.with_block(block, BlockState::Bin)
            }
            (BlockOp::RemoveFromBin, BlockState::Bin) => {
                state.with_block(block, BlockState::Storage)
            }
            _ => state.clone(),
        }
    }

    fn distance(&self, goal: &TowerState, state: &TowerState) -> f64 {
        goal.blocks()
            .iter()
            .zip(state.blocks())
            .map(|(&g, &s)| Self::block_distance(g, s))
            .sum()
    }

    fn action_label(&self, action: ActionId) -> String {
        let TowerAction { block, op } = TowerAction::decode(action);
        format!("{op} (block {block})")
    }
}

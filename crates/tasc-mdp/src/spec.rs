use serde::{Deserialize, Serialize};

use crate::{
    DomainError,
    grid::GridWorld,
    tower::{BlockState, TowerAssembly, TowerState},
};

const DEFAULT_TOWER_YAML: &str = include_str!("../config/tower.default.yaml");
const DEFAULT_GRID_YAML: &str = include_str!("../config/grid.default.yaml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Off-table block location.
pub enum Placement {
    Storage,
    Bin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
/// One block in a YAML tower layout: a table height, or `storage` / `bin`.
pub enum BlockSpec {
    Height(usize),
    Place(Placement),
}

impl From<BlockSpec> for BlockState {
    fn from(value: BlockSpec) -> Self {
        match value {
            BlockSpec::Height(h) => BlockState::Table(h),
            BlockSpec::Place(Placement::Storage) => BlockState::Storage,
            BlockSpec::Place(Placement::Bin) => BlockState::Bin,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Serializable tower assembly description.
pub struct TowerSpec {
    pub num_blocks: usize,
    /// Starting layout; every block in storage when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<Vec<BlockSpec>>,
    /// Candidate goal layouts in canonical order.
    pub goals: Vec<Vec<BlockSpec>>,
}

impl TowerSpec {
    /// Parse the embedded seven-block description.
    pub fn from_default_yaml() -> Result<Self, DomainError> {
        Ok(serde_yaml::from_str(DEFAULT_TOWER_YAML)?)
    }

    /// Check block counts and stack shapes without keeping the result.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.compile().map(|_| ())
    }

    pub fn compile(&self) -> Result<TowerAssembly, DomainError> {
        if self.num_blocks == 0 {
            return Err(DomainError::NoBlocks);
        }

        let initial = match &self.initial {
            Some(layout) => layout_state("initial state", layout, self.num_blocks)?,
            None => TowerState::all_in_storage(self.num_blocks),
        };
        let goals = self
            .goals
            .iter()
            .enumerate()
            .map(|(i, layout)| layout_state(&format!("goal {i}"), layout, self.num_blocks))
            .collect::<Result<Vec<_>, _>>()?;

        TowerAssembly::new(initial, goals)
    }
}

fn layout_state(
    which: &str,
    layout: &[BlockSpec],
    num_blocks: usize,
) -> Result<TowerState, DomainError> {
    if layout.len() != num_blocks {
        return Err(DomainError::BlockCount {
            which: which.to_string(),
            expected: num_blocks,
            got: layout.len(),
        });
    }
    Ok(TowerState::new(
        layout.iter().copied().map(BlockState::from).collect(),
    ))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Serializable grid navigation description.
pub struct GridSpec {
    /// Side length of the square grid.
    pub width: usize,
    pub start: usize,
    pub goals: Vec<usize>,
    #[serde(default)]
    pub obstacles: Vec<usize>,
}

impl GridSpec {
    /// Parse the embedded 10x10 description.
    pub fn from_default_yaml() -> Result<Self, DomainError> {
        Ok(serde_yaml::from_str(DEFAULT_GRID_YAML)?)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.compile().map(|_| ())
    }

    pub fn compile(&self) -> Result<GridWorld, DomainError> {
        GridWorld::new(
            self.width,
            self.start,
            self.goals.clone(),
            self.obstacles.clone(),
        )
    }
}

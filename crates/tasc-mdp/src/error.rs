use thiserror::Error;

#[derive(Debug, Error)]
/// Error type for loading and validating domain descriptions.
pub enum DomainError {
    #[error("failed to read YAML file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("a tower needs at least one block")]
    NoBlocks,

    #[error("at least one goal is required")]
    NoGoals,

    #[error("{which} describes {got} blocks, expected {expected}")]
    BlockCount {
        which: String,
        expected: usize,
        got: usize,
    },

    #[error("{which} places a block at height 0; table heights start at 1")]
    ZeroHeight { which: String },

    #[error("{which} does not stack its table blocks at heights 1..={blocks} exactly once")]
    BrokenStack { which: String, blocks: usize },

    #[error("duplicate goal {which}")]
    DuplicateGoal { which: String },

    #[error("grid width must be at least 2, got {width}")]
    InvalidWidth { width: usize },

    #[error("{which} cell {cell} is outside the {cells}-cell grid")]
    CellOutOfBounds {
        which: String,
        cell: usize,
        cells: usize,
    },

    #[error("{which} cell {cell} is an obstacle")]
    BlockedCell { which: String, cell: usize },
}

mod error;
mod grid;
mod io;
mod spec;
mod tower;

pub use error::DomainError;
pub use grid::{GridCell, GridMove, GridWorld};
pub use io::{load_grid, load_tower, load_yaml, save_yaml};
pub use spec::{BlockSpec, GridSpec, Placement, TowerSpec};
pub use tower::{BlockOp, BlockState, TowerAction, TowerAssembly, TowerState};

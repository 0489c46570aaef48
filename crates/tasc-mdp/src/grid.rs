use std::collections::BTreeSet;

use tasc_core::{ActionId, TransitionModel};

use crate::error::DomainError;
use crate::spec::GridSpec;

/// A cell of a square grid, numbered row-major from the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCell(usize);

impl GridCell {
    pub fn index(&self) -> usize {
        self.0
    }

    /// Column and row of this cell on a grid `width` cells wide.
    pub fn coords(&self, width: usize) -> (usize, usize) {
        (self.0 % width, self.0 / width)
    }
}

impl From<usize> for GridCell {
    fn from(value: usize) -> Self {
        GridCell(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridMove {
    North,
    NorthEast,
    East,
    West,
    NorthWest,
    Stay,
}

impl GridMove {
    pub const ALL: [GridMove; 6] = [
        GridMove::North,
        GridMove::NorthEast,
        GridMove::East,
        GridMove::West,
        GridMove::NorthWest,
        GridMove::Stay,
    ];

    pub fn from_action(action: ActionId) -> Option<Self> {
        Self::ALL.get(action.index()).copied()
    }

    pub fn action(self) -> ActionId {
        let index = match self {
            GridMove::North => 0,
            GridMove::NorthEast => 1,
            GridMove::East => 2,
            GridMove::West => 3,
            GridMove::NorthWest => 4,
            GridMove::Stay => 5,
        };
        ActionId::from(index)
    }

    /// Column and row offsets of this move.
    fn offset(self) -> (isize, isize) {
        match self {
            GridMove::North => (0, 1),
            GridMove::NorthEast => (1, 1),
            GridMove::East => (1, 0),
            GridMove::West => (-1, 0),
            GridMove::NorthWest => (-1, 1),
            GridMove::Stay => (0, 0),
        }
    }

    fn label(self) -> &'static str {
        match self {
            GridMove::North => "up",
            GridMove::NorthEast => "up right",
            GridMove::East => "right",
            GridMove::West => "left",
            GridMove::NorthWest => "up left",
            GridMove::Stay => "stay",
        }
    }
}

/// Navigation on a square grid with static obstacles.
#[derive(Debug, Clone)]
pub struct GridWorld {
    width: usize,
    start: GridCell,
    goals: Vec<GridCell>,
    obstacles: BTreeSet<GridCell>,
}

impl GridWorld {
    pub fn new(
        width: usize,
        start: usize,
        goals: Vec<usize>,
        obstacles: Vec<usize>,
    ) -> Result<Self, DomainError> {
        if width < 2 {
            return Err(DomainError::InvalidWidth { width });
        }
        if goals.is_empty() {
            return Err(DomainError::NoGoals);
        }

        let cells = width * width;
        let in_bounds = |which: &str, cell: usize| {
            if cell < cells {
                Ok(GridCell(cell))
            } else {
                Err(DomainError::CellOutOfBounds {
                    which: which.to_string(),
                    cell,
                    cells,
                })
            }
        };

        let obstacles = obstacles
            .into_iter()
            .map(|cell| in_bounds("obstacle", cell))
            .collect::<Result<BTreeSet<_>, _>>()?;
        let open = |which: &str, cell: usize| {
            let cell = in_bounds(which, cell)?;
            if obstacles.contains(&cell) {
                return Err(DomainError::BlockedCell {
                    which: which.to_string(),
                    cell: cell.index(),
                });
            }
            Ok(cell)
        };

        let start = open("start", start)?;
        let mut goal_cells = Vec::with_capacity(goals.len());
        for (i, goal) in goals.into_iter().enumerate() {
            let which = format!("goal {i}");
            let cell = open(&which, goal)?;
            if goal_cells.contains(&cell) {
                return Err(DomainError::DuplicateGoal { which });
            }
            goal_cells.push(cell);
        }

        tracing::debug!(
            width,
            goals = goal_cells.len(),
            obstacles = obstacles.len(),
            "grid navigation task ready"
        );
        Ok(GridWorld {
            width,
            start,
            goals: goal_cells,
            obstacles,
        })
    }

    pub fn from_spec(spec: &GridSpec) -> Result<Self, DomainError> {
        spec.compile()
    }

    /// The 10x10 grid with two goals on the top row.
    pub fn standard() -> Result<Self, DomainError> {
        GridSpec::from_default_yaml()?.compile()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_obstacle(&self, cell: GridCell) -> bool {
        self.obstacles.contains(&cell)
    }

    fn shifted(&self, cell: GridCell, step: GridMove) -> Option<GridCell> {
        let (x, y) = cell.coords(self.width);
        let (dx, dy) = step.offset();
        let x = x.checked_add_signed(dx).filter(|x| *x < self.width)?;
        let y = y.checked_add_signed(dy).filter(|y| *y < self.width)?;
        let target = GridCell(y * self.width + x);
        (!self.is_obstacle(target)).then_some(target)
    }
}

impl TransitionModel for GridWorld {
    type State = GridCell;

    fn initial_state(&self) -> GridCell {
        self.start
    }

    fn num_actions(&self) -> usize {
        GridMove::ALL.len()
    }

    fn goals(&self) -> &[GridCell] {
        &self.goals
    }

    fn transition(&self, action: ActionId, state: &GridCell) -> GridCell {
        GridMove::from_action(action)
            .and_then(|step| self.shifted(*state, step))
            .unwrap_or(*state)
    }

    fn distance(&self, goal: &GridCell, state: &GridCell) -> f64 {
        let (gx, gy) = goal.coords(self.width);
        let (sx, sy) = state.coords(self.width);
        let dx = gx.abs_diff(sx) as f64;
        let dy = gy.abs_diff(sy) as f64;
        dx.hypot(dy)
    }

    fn action_label(&self, action: ActionId) -> String {
        match GridMove::from_action(action) {
            Some(step) => step.label().to_string(),
            None => format!("action {}", action.index()),
        }
    }
}

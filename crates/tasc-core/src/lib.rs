mod engine;

pub use engine::config::{ConfigError, EffortLevels, EngineConfig, InferenceStrategy, Weights};
pub use engine::episode::{
    Actor, Episode, EpisodeStatus, RobotTurn, Teammate, Trajectory, TrajectoryStep,
};
pub use engine::error::EngineError;
pub use engine::ids::{ActionId, GoalId, StateIndex};
pub use engine::inference::{GoalBelief, GoalInference, Observation, legibility};
pub use engine::model::{Successor, TransitionModel};
pub use engine::oracle::{GoalTable, GoalTables};
pub use engine::schedule::{Alternating, FnSchedule, TurnSchedule};
pub use engine::scoring::{ActionChoice, ActionScore, ActionScorer};
pub use engine::space::{Projected, StateSpace};
pub use engine::tiebreak::TieBreaker;

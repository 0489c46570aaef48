//! Turn-by-turn interaction between a simulated or teleoperated human and
//! the robot.
//!
//! [`Teammate`] holds everything that is fixed for a run: the model, its
//! enumerated state space, the goal tables, configuration, the human's goal
//! and the tie-break source. [`Episode`] is the explicit, owned state of one
//! interaction, and every step operation takes it by mutable reference.

use crate::engine::{
    config::EngineConfig,
    error::EngineError,
    ids::{ActionId, GoalId, StateIndex},
    inference::{GoalBelief, GoalInference, Observation},
    model::TransitionModel,
    oracle::GoalTables,
    schedule::TurnSchedule,
    scoring::{ActionChoice, ActionScorer},
    space::{Projected, StateSpace},
    tiebreak::TieBreaker,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actor {
    Human,
    Robot,
}

/// One appended entry of a trajectory: the state reached and who moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrajectoryStep {
    pub state: StateIndex,
    pub actor: Actor,
    pub action: ActionId,
}

/// Append-only record of one episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trajectory {
    start: StateIndex,
    steps: Vec<TrajectoryStep>,
}

impl Trajectory {
    fn new(start: StateIndex) -> Self {
        Trajectory {
            start,
            steps: Vec::new(),
        }
    }

    pub fn start(&self) -> StateIndex {
        self.start
    }

    pub fn steps(&self) -> &[TrajectoryStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Convert every step to its external state representation.
    pub fn project<'s, S>(
        &self,
        space: &'s StateSpace<S>,
    ) -> Result<Vec<(Projected<'s, S>, Actor)>, EngineError>
    where
        S: Clone + Eq + std::hash::Hash + std::fmt::Debug,
    {
        self.steps
            .iter()
            .map(|step| Ok((space.project(step.state)?, step.actor)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeStatus {
    Running,
    Terminal,
}

/// Mutable state of one interaction episode.
#[derive(Debug, Clone)]
pub struct Episode {
    current: StateIndex,
    previous: Option<StateIndex>,
    terminal: StateIndex,
    last_human: Option<Observation>,
    last_belief: Option<GoalBelief>,
    ticks: usize,
    trajectory: Trajectory,
}

impl Episode {
    fn new(start: StateIndex, terminal: StateIndex) -> Self {
        Episode {
            current: start,
            previous: None,
            terminal,
            last_human: None,
            last_belief: None,
            ticks: 0,
            trajectory: Trajectory::new(start),
        }
    }

    pub fn current(&self) -> StateIndex {
        self.current
    }

    /// State before the human's most recent move.
    pub fn previous(&self) -> Option<StateIndex> {
        self.previous
    }

    pub fn last_human_move(&self) -> Option<&Observation> {
        self.last_human.as_ref()
    }

    /// Belief computed on the robot's most recent turn.
    pub fn last_belief(&self) -> Option<&GoalBelief> {
        self.last_belief.as_ref()
    }

    /// Ticks elapsed under `Teammate::run`.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn status(&self) -> EpisodeStatus {
        if self.current == self.terminal {
            EpisodeStatus::Terminal
        } else {
            EpisodeStatus::Running
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status() == EpisodeStatus::Terminal
    }

    fn advance(&mut self, actor: Actor, action: ActionId, next: StateIndex) {
        if actor == Actor::Human {
            self.previous = Some(self.current);
            self.last_human = Some(Observation {
                action,
                before: self.current,
                after: next,
            });
        }

        self.trajectory.steps.push(TrajectoryStep {
            state: next,
            actor,
            action,
        });
        self.current = next;
    }
}

/// Result of one robot turn.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotTurn {
    pub belief: GoalBelief,
    pub choice: ActionChoice,
}

/// Robot decision engine paired with a human pursuing a known goal.
pub struct Teammate<'a, M>
where
    M: TransitionModel,
{
    model: &'a M,
    space: &'a StateSpace<M::State>,
    tables: &'a GoalTables,
    config: EngineConfig,
    human_goal: GoalId,
    tiebreak: TieBreaker,
}

impl<'a, M> Teammate<'a, M>
where
    M: TransitionModel,
{
    /// Create a teammate whose tie-breaks are seeded from `config.seed`.
    pub fn new(
        model: &'a M,
        space: &'a StateSpace<M::State>,
        tables: &'a GoalTables,
        config: EngineConfig,
        human_goal: GoalId,
    ) -> Result<Self, EngineError> {
        for goal in [human_goal.index(), config.default_goal] {
            if goal >= tables.goal_count() {
                return Err(EngineError::UnknownGoal {
                    goal,
                    count: tables.goal_count(),
                });
            }
        }

        let tiebreak = TieBreaker::from_seed(config.seed);
        Ok(Teammate {
            model,
            space,
            tables,
            config,
            human_goal,
            tiebreak,
        })
    }

    /// Replace the tie-break source.
    pub fn with_tiebreaker(mut self, tiebreak: TieBreaker) -> Self {
        self.tiebreak = tiebreak;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn human_goal(&self) -> GoalId {
        self.human_goal
    }

    fn pursuing(&self) -> Result<StateIndex, EngineError> {
        self.tables.goal_state(self.human_goal)
    }

    fn inference(&self) -> Result<GoalInference<'a, M>, EngineError> {
        GoalInference::new(
            self.model,
            self.space,
            self.tables,
            self.config.inference,
            GoalId::from(self.config.default_goal),
        )
    }

    fn scorer(&self) -> ActionScorer<'a, M> {
        ActionScorer::new(
            self.model,
            self.space,
            self.tables,
            self.config.weights,
            self.config.effort,
        )
    }

    /// Start an episode at `start`, or at the model's initial state.
    pub fn start_episode(&self, start: Option<&M::State>) -> Result<Episode, EngineError> {
        let start = match start {
            Some(state) => self.space.index_of(state)?,
            None => self.space.index_of(&self.model.initial_state())?,
        };
        Ok(Episode::new(start, self.space.terminal()))
    }

    /// Infer the human's goal from the episode's last human move.
    pub fn infer_goal(&mut self, episode: &Episode) -> Result<GoalBelief, EngineError> {
        self.inference()?
            .infer(episode.last_human_move(), &mut self.tiebreak)
    }

    /// Let the robot infer the human's goal, then take its best scoring action.
    ///
    /// Returns `None` without acting once the episode is terminal.
    pub fn robot_step(&mut self, episode: &mut Episode) -> Result<Option<RobotTurn>, EngineError> {
        if episode.is_terminal() {
            return Ok(None);
        }

        let belief = self.infer_goal(episode)?;
        let pursuing = self.pursuing()?;
        let choice = self.scorer().select(
            episode.current,
            &belief,
            Some(pursuing),
            &mut self.tiebreak,
        )?;

        tracing::info!(
            action = %self.model.action_label(choice.action),
            from = episode.current.index(),
            to = choice.successor.index(),
            predicted_goal = belief.predicted.index(),
            probability = belief.probability,
            "robot turn"
        );

        episode.advance(Actor::Robot, choice.action, choice.successor);
        episode.last_belief = Some(belief.clone());
        Ok(Some(RobotTurn { belief, choice }))
    }

    /// Apply an explicitly chosen human action.
    ///
    /// Returns the new current state, or `None` once the episode is terminal.
    pub fn human_step(
        &mut self,
        episode: &mut Episode,
        action: ActionId,
    ) -> Result<Option<StateIndex>, EngineError> {
        if episode.is_terminal() {
            return Ok(None);
        }

        let next = self
            .space
            .apply(self.model, action, episode.current, Some(self.pursuing()?))?;

        tracing::info!(
            action = %self.model.action_label(action),
            from = episode.current.index(),
            to = next.index(),
            "human turn"
        );

        episode.advance(Actor::Human, action, next);
        Ok(Some(next))
    }

    /// Let the simulated human follow its goal's policy for one move.
    pub fn human_policy_step(
        &mut self,
        episode: &mut Episode,
    ) -> Result<Option<StateIndex>, EngineError> {
        if episode.is_terminal() {
            return Ok(None);
        }

        let action = self.tables.policy(self.human_goal, episode.current)?;
        self.human_step(episode, action)
    }

    /// Run a whole episode under `schedule` until the terminal state.
    ///
    /// Within a tick the robot moves before the human.
    pub fn run<T>(
        &mut self,
        schedule: &T,
        start: Option<&M::State>,
    ) -> Result<Episode, EngineError>
    where
        T: TurnSchedule,
    {
        let mut episode = self.start_episode(start)?;

        while !episode.is_terminal() {
            if episode.ticks >= self.config.max_ticks {
                return Err(EngineError::TickLimitExceeded {
                    max_ticks: self.config.max_ticks,
                });
            }

            let tick = episode.ticks;
            if schedule.robot_acts(tick) {
                self.robot_step(&mut episode)?;
            }
            if schedule.human_acts(tick) {
                self.human_policy_step(&mut episode)?;
            }
            episode.ticks += 1;
        }

        tracing::info!(
            ticks = episode.ticks,
            steps = episode.trajectory.len(),
            "episode reached terminal state"
        );
        Ok(episode)
    }
}

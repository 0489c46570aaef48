//! Goal inference from the human's most recent move.
//!
//! Two interchangeable strategies produce a [`GoalBelief`]:
//!
//! - **Value delta**: how much each goal's state value changed because of
//!   the move. Goals gaining the most value are the most likely.
//! - **Geometric**: the legibility of the move toward each goal under the
//!   model's distance function (see [`legibility`]).
//!
//! Before any move has been observed both strategies report a uniform
//! belief and the configured default goal.

use crate::engine::{
    config::InferenceStrategy,
    error::EngineError,
    ids::{ActionId, GoalId, StateIndex},
    model::TransitionModel,
    oracle::GoalTables,
    space::StateSpace,
    tiebreak::TieBreaker,
};

/// One observed human move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub action: ActionId,
    pub before: StateIndex,
    pub after: StateIndex,
}

/// Belief over the candidate goals at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalBelief {
    /// The single most likely goal, tie-broken uniformly.
    pub predicted: GoalId,
    /// Probability attached to `predicted`.
    pub probability: f64,
    /// Per-goal probabilities, indexed by `GoalId`.
    ///
    /// Value-delta beliefs are not renormalized when some goals lose value,
    /// so the entries may sum to less than one.
    pub distribution: Vec<f64>,
}

impl GoalBelief {
    /// Uniform belief reporting `predicted` as the most likely goal.
    pub fn uniform(goal_count: usize, predicted: GoalId) -> Self {
        let p = 1.0 / goal_count as f64;
        GoalBelief {
            predicted,
            probability: p,
            distribution: vec![p; goal_count],
        }
    }

    /// Probability attached to `goal`, zero for unknown goals.
    pub fn probability_of(&self, goal: GoalId) -> f64 {
        self.distribution.get(goal.index()).copied().unwrap_or(0.0)
    }
}

/// Probability that an observer attributes `hypothesis` to `action` taken in `state`.
///
/// The successor is computed with the goal-aware transition toward
/// `pursuing`. `hypothesis` is expected to be one of `goals`.
pub fn legibility<M>(
    model: &M,
    space: &StateSpace<M::State>,
    goals: &[StateIndex],
    hypothesis: StateIndex,
    action: ActionId,
    state: StateIndex,
    pursuing: Option<StateIndex>,
) -> Result<f64, EngineError>
where
    M: TransitionModel,
{
    let next = space.apply(model, action, state, pursuing)?;
    move_legibility(model, space, goals, hypothesis, state, next)
}

/// Legibility of an already known move `before -> after`.
///
/// Moving away from `hypothesis` never signals it. Progress toward it is
/// normalized by the summed positive progress over all goals, and a move
/// that approaches no goal at all is uninformative.
pub(crate) fn move_legibility<M>(
    model: &M,
    space: &StateSpace<M::State>,
    goals: &[StateIndex],
    hypothesis: StateIndex,
    before: StateIndex,
    after: StateIndex,
) -> Result<f64, EngineError>
where
    M: TransitionModel,
{
    // Distances are undefined once the task has ended.
    if space.is_terminal(before) || space.is_terminal(after) {
        return Ok(0.0);
    }

    let before = space.state(before)?;
    let after = space.state(after)?;
    let progress = |goal: StateIndex| -> Result<f64, EngineError> {
        let goal = space.state(goal)?;
        Ok(model.distance(goal, before) - model.distance(goal, after))
    };

    let toward = progress(hypothesis)?;
    if toward < 0.0 {
        return Ok(0.0);
    }

    let mut total = 0.0;
    for goal in goals {
        let d = progress(*goal)?;
        if d > 0.0 {
            total += d;
        }
    }

    if total == 0.0 {
        return Ok(0.0);
    }
    Ok(toward / total)
}

/// Goals whose score equals the maximum score.
fn maxima(scores: &[f64]) -> Vec<GoalId> {
    let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    scores
        .iter()
        .enumerate()
        .filter(|(_, score)| **score == best)
        .map(|(idx, _)| GoalId::from(idx))
        .collect()
}

/// Goal inference over a fixed model, state space, and goal tables.
#[derive(Debug, Clone)]
pub struct GoalInference<'a, M>
where
    M: TransitionModel,
{
    model: &'a M,
    space: &'a StateSpace<M::State>,
    tables: &'a GoalTables,
    strategy: InferenceStrategy,
    default_goal: GoalId,
}

impl<'a, M> GoalInference<'a, M>
where
    M: TransitionModel,
{
    pub fn new(
        model: &'a M,
        space: &'a StateSpace<M::State>,
        tables: &'a GoalTables,
        strategy: InferenceStrategy,
        default_goal: GoalId,
    ) -> Result<Self, EngineError> {
        if default_goal.index() >= tables.goal_count() {
            return Err(EngineError::UnknownGoal {
                goal: default_goal.index(),
                count: tables.goal_count(),
            });
        }

        Ok(GoalInference {
            model,
            space,
            tables,
            strategy,
            default_goal,
        })
    }

    pub fn strategy(&self) -> InferenceStrategy {
        self.strategy
    }

    /// Infer the human's goal from the last observed move, if any.
    pub fn infer(
        &self,
        observation: Option<&Observation>,
        tiebreak: &mut TieBreaker,
    ) -> Result<GoalBelief, EngineError> {
        let Some(observation) = observation else {
            return Ok(GoalBelief::uniform(
                self.tables.goal_count(),
                self.default_goal,
            ));
        };

        let belief = match self.strategy {
            InferenceStrategy::ValueDelta => self.value_delta(observation, tiebreak)?,
            InferenceStrategy::Geometric => self.geometric(observation, tiebreak)?,
        };

        tracing::debug!(
            strategy = ?self.strategy,
            predicted = belief.predicted.index(),
            probability = belief.probability,
            distribution = ?belief.distribution,
            "inferred human goal"
        );
        Ok(belief)
    }

    fn value_delta(
        &self,
        observation: &Observation,
        tiebreak: &mut TieBreaker,
    ) -> Result<GoalBelief, EngineError> {
        let deltas = self
            .tables
            .goal_ids()
            .map(|goal| {
                self.tables
                    .value_delta(goal, observation.before, observation.after)
            })
            .collect::<Result<Vec<f64>, EngineError>>()?;

        let non_negative_sum: f64 = deltas.iter().filter(|d| **d >= 0.0).sum();

        if non_negative_sum == 0.0 {
            // No goal gained value: goals that did not lose any share evenly.
            let kept: Vec<GoalId> = deltas
                .iter()
                .enumerate()
                .filter(|(_, d)| **d >= 0.0)
                .map(|(idx, _)| GoalId::from(idx))
                .collect();

            if kept.is_empty() {
                let candidates = maxima(&deltas);
                return Ok(GoalBelief {
                    predicted: self.pick(&candidates, tiebreak),
                    probability: 0.0,
                    distribution: vec![0.0; deltas.len()],
                });
            }

            let p = 1.0 / kept.len() as f64;
            let distribution = deltas
                .iter()
                .map(|d| if *d >= 0.0 { p } else { 0.0 })
                .collect();
            return Ok(GoalBelief {
                predicted: self.pick(&kept, tiebreak),
                probability: p,
                distribution,
            });
        }

        let distribution: Vec<f64> = deltas
            .iter()
            .map(|d| if *d > 0.0 { d / non_negative_sum } else { 0.0 })
            .collect();
        let predicted = self.pick(&maxima(&deltas), tiebreak);

        Ok(GoalBelief {
            predicted,
            probability: distribution[predicted.index()],
            distribution,
        })
    }

    fn geometric(
        &self,
        observation: &Observation,
        tiebreak: &mut TieBreaker,
    ) -> Result<GoalBelief, EngineError> {
        let goals = self.tables.goal_states();
        let distribution = goals
            .iter()
            .map(|goal| {
                move_legibility(
                    self.model,
                    self.space,
                    goals,
                    *goal,
                    observation.before,
                    observation.after,
                )
            })
            .collect::<Result<Vec<f64>, EngineError>>()?;

        let predicted = self.pick(&maxima(&distribution), tiebreak);
        Ok(GoalBelief {
            predicted,
            probability: distribution[predicted.index()],
            distribution,
        })
    }

    fn pick(&self, candidates: &[GoalId], tiebreak: &mut TieBreaker) -> GoalId {
        tiebreak.choose(candidates).unwrap_or(self.default_goal)
    }
}

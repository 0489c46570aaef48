//! Multi-objective scoring of candidate robot actions.
//!
//! Each action is rated on three criteria, each mapped into `[0, 1]`:
//!
//! - **Effort**: a two-level perceived effort, low when nothing moves.
//! - **Legibility**: how clearly the move signals the predicted goal.
//! - **Value**: belief-weighted change in state value, rescaled per turn
//!   by the largest absolute change over all actions and goals.
//!
//! The weighted sum picks the action; ties are broken uniformly.

use crate::engine::{
    config::{EffortLevels, Weights},
    error::EngineError,
    ids::{ActionId, GoalId, StateIndex},
    inference::{GoalBelief, move_legibility},
    model::TransitionModel,
    oracle::GoalTables,
    space::StateSpace,
    tiebreak::TieBreaker,
};

/// Score breakdown for one candidate action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionScore {
    pub action: ActionId,
    pub successor: StateIndex,
    pub effort: f64,
    pub legibility: f64,
    pub value: f64,
    pub total: f64,
}

/// The selected action together with every candidate's score.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionChoice {
    pub action: ActionId,
    pub successor: StateIndex,
    pub scores: Vec<ActionScore>,
}

pub struct ActionScorer<'a, M>
where
    M: TransitionModel,
{
    model: &'a M,
    space: &'a StateSpace<M::State>,
    tables: &'a GoalTables,
    weights: Weights,
    effort: EffortLevels,
}

impl<'a, M> ActionScorer<'a, M>
where
    M: TransitionModel,
{
    pub fn new(
        model: &'a M,
        space: &'a StateSpace<M::State>,
        tables: &'a GoalTables,
        weights: Weights,
        effort: EffortLevels,
    ) -> Self {
        ActionScorer {
            model,
            space,
            tables,
            weights,
            effort,
        }
    }

    /// Score every action available in `state`.
    ///
    /// Successors use the goal-aware transition toward `pursuing`.
    pub fn score_all(
        &self,
        state: StateIndex,
        belief: &GoalBelief,
        pursuing: Option<StateIndex>,
    ) -> Result<Vec<ActionScore>, EngineError> {
        let actions: Vec<ActionId> = (0..self.model.num_actions()).map(ActionId::from).collect();

        let successors = actions
            .iter()
            .map(|action| self.space.apply(self.model, *action, state, pursuing))
            .collect::<Result<Vec<StateIndex>, EngineError>>()?;

        // deltas[action][goal]
        let deltas = successors
            .iter()
            .map(|next| {
                self.tables
                    .goal_ids()
                    .map(|goal| self.tables.value_delta(goal, state, *next))
                    .collect::<Result<Vec<f64>, EngineError>>()
            })
            .collect::<Result<Vec<Vec<f64>>, EngineError>>()?;

        let max_delta = deltas
            .iter()
            .flatten()
            .fold(0.0_f64, |max, delta| max.max(delta.abs()));

        let predicted = self.tables.goal_state(belief.predicted)?;
        let goals = self.tables.goal_states();

        let mut scores = Vec::with_capacity(actions.len());
        for ((action, next), action_deltas) in actions.iter().zip(&successors).zip(&deltas) {
            let effort = if *next == state {
                self.effort.still
            } else {
                self.effort.moving
            };

            let legibility =
                move_legibility(self.model, self.space, goals, predicted, state, *next)?;

            let value = if max_delta > 0.0 {
                let expected: f64 = action_deltas
                    .iter()
                    .enumerate()
                    .map(|(goal, delta)| belief.probability_of(GoalId::from(goal)) * delta / max_delta)
                    .sum();
                expected / 2.0 + 0.5
            } else {
                0.0
            };

            let total = self.weights.effort * effort
                + self.weights.legibility * legibility
                + self.weights.value * value;

            tracing::debug!(
                action = %self.model.action_label(*action),
                effort,
                legibility,
                value,
                total,
                "scored action"
            );

            scores.push(ActionScore {
                action: *action,
                successor: *next,
                effort,
                legibility,
                value,
                total,
            });
        }

        Ok(scores)
    }

    /// Pick the best scoring action, breaking ties uniformly at random.
    pub fn select(
        &self,
        state: StateIndex,
        belief: &GoalBelief,
        pursuing: Option<StateIndex>,
        tiebreak: &mut TieBreaker,
    ) -> Result<ActionChoice, EngineError> {
        let scores = self.score_all(state, belief, pursuing)?;

        let best = scores
            .iter()
            .map(|score| score.total)
            .fold(f64::NEG_INFINITY, f64::max);
        let tied: Vec<usize> = scores
            .iter()
            .enumerate()
            .filter(|(_, score)| score.total == best)
            .map(|(idx, _)| idx)
            .collect();

        let pick = tiebreak.choose(&tied).ok_or(EngineError::NoActions)?;
        let chosen = scores[pick];

        Ok(ActionChoice {
            action: chosen.action,
            successor: chosen.successor,
            scores,
        })
    }
}

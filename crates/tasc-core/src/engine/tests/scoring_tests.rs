use super::{LEFT, RIGHT, STAY, line_setup};
use crate::{
    ActionId, ActionScorer, EffortLevels, GoalBelief, GoalId, GoalTable, GoalTables, TieBreaker,
    Weights,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn confident_belief_selects_progress_toward_goal() {
    let (model, space, tables) = line_setup();
    let scorer = ActionScorer::new(
        &model,
        &space,
        &tables,
        Weights::default(),
        EffortLevels::default(),
    );
    let belief = GoalBelief {
        predicted: GoalId::from(1),
        probability: 1.0,
        distribution: vec![0.0, 1.0],
    };
    let three = space.index_of(&3).expect("mapped");
    let mut tiebreak = TieBreaker::from_seed(5);

    let choice = scorer
        .select(three, &belief, None, &mut tiebreak)
        .expect("select");

    assert_eq!(choice.action, ActionId::from(RIGHT));
    assert_eq!(choice.successor, space.index_of(&4).expect("mapped"));

    let right = choice.scores[RIGHT];
    assert!(close(right.effort, 0.9));
    assert!(close(right.legibility, 1.0));
    assert!(close(right.value, 1.0));
    assert!(close(right.total, 0.05 * 0.9 + 0.05 * 1.0 + 0.9 * 1.0));

    let left = choice.scores[LEFT];
    assert!(close(left.value, 0.0));
    assert!(close(left.legibility, 0.0));
}

#[test]
fn uniform_belief_leans_on_legibility_toward_predicted_goal() {
    let (model, space, tables) = line_setup();
    let scorer = ActionScorer::new(
        &model,
        &space,
        &tables,
        Weights::default(),
        EffortLevels::default(),
    );
    let belief = GoalBelief::uniform(2, GoalId::from(0));
    let three = space.index_of(&3).expect("mapped");

    let scores = scorer.score_all(three, &belief, None).expect("score");

    // Value cancels out under a uniform belief.
    for score in &scores {
        assert!(close(score.value, 0.5));
    }
    assert!(scores[LEFT].total > scores[RIGHT].total);
    assert!(scores[RIGHT].total > scores[STAY].total);
}

#[test]
fn idle_action_has_low_effort_and_no_legibility() {
    let (model, space, tables) = line_setup();
    let scorer = ActionScorer::new(
        &model,
        &space,
        &tables,
        Weights::default(),
        EffortLevels::default(),
    );
    let three = space.index_of(&3).expect("mapped");

    for predicted in [GoalId::from(0), GoalId::from(1)] {
        let belief = GoalBelief::uniform(2, predicted);
        let scores = scorer.score_all(three, &belief, None).expect("score");
        let idle = scores[STAY];

        assert_eq!(idle.successor, three);
        assert_eq!(idle.effort, 0.1);
        assert_eq!(idle.legibility, 0.0);
    }
}

#[test]
fn flat_value_tables_give_zero_value_score() {
    let (model, space, _) = line_setup();
    let flat: Vec<GoalTable> = (0..2)
        .map(|_| GoalTable {
            values: vec![1.0; space.index_count()],
            policy: vec![ActionId::from(STAY); space.index_count()],
        })
        .collect();
    let tables = GoalTables::load(&model, &space, flat).expect("valid");
    let scorer = ActionScorer::new(
        &model,
        &space,
        &tables,
        Weights::default(),
        EffortLevels::default(),
    );
    let belief = GoalBelief::uniform(2, GoalId::from(1));
    let three = space.index_of(&3).expect("mapped");

    let scores = scorer.score_all(three, &belief, None).expect("score");

    assert!(scores.iter().all(|score| score.value == 0.0));
}

#[test]
fn equal_scores_are_broken_reproducibly() {
    let (model, space, _) = line_setup();
    let flat: Vec<GoalTable> = (0..2)
        .map(|_| GoalTable {
            values: vec![0.0; space.index_count()],
            policy: vec![ActionId::from(STAY); space.index_count()],
        })
        .collect();
    let tables = GoalTables::load(&model, &space, flat).expect("valid");
    // Only effort counts, so left and right tie.
    let weights = Weights {
        value: 0.0,
        effort: 1.0,
        legibility: 0.0,
    };
    let scorer = ActionScorer::new(&model, &space, &tables, weights, EffortLevels::default());
    let belief = GoalBelief::uniform(2, GoalId::from(0));
    let three = space.index_of(&3).expect("mapped");

    let picks = |seed: u64| -> Vec<ActionId> {
        let mut tiebreak = TieBreaker::from_seed(seed);
        (0..32)
            .map(|_| {
                scorer
                    .select(three, &belief, None, &mut tiebreak)
                    .expect("select")
                    .action
            })
            .collect()
    };

    let first = picks(9);
    assert_eq!(first, picks(9));
    assert!(first.iter().all(|action| action.index() != STAY));
    assert!(first.contains(&ActionId::from(LEFT)));
    assert!(first.contains(&ActionId::from(RIGHT)));
}

#[test]
fn scoring_outside_the_space_fails() {
    let (model, space, tables) = line_setup();
    let scorer = ActionScorer::new(
        &model,
        &space,
        &tables,
        Weights::default(),
        EffortLevels::default(),
    );
    let belief = GoalBelief::uniform(2, GoalId::from(0));

    assert!(
        scorer
            .score_all(crate::StateIndex::from(50), &belief, None)
            .is_err()
    );
}

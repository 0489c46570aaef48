use super::{LEFT, RIGHT, STAY, line_setup};
use crate::{
    ActionId, Actor, Alternating, EngineConfig, EngineError, EpisodeStatus, FnSchedule, GoalId,
    Projected, Teammate, TieBreaker,
};

#[test]
fn alternating_run_reaches_terminal_along_expected_path() {
    let (model, space, tables) = line_setup();
    let mut teammate = Teammate::new(
        &model,
        &space,
        &tables,
        EngineConfig::default(),
        GoalId::from(1),
    )
    .expect("valid teammate");

    let episode = teammate.run(&Alternating, None).expect("run");

    assert_eq!(episode.status(), EpisodeStatus::Terminal);
    assert_eq!(episode.ticks(), 6);

    let steps: Vec<(Projected<'_, i64>, Actor)> =
        episode.trajectory().project(&space).expect("project");
    assert_eq!(
        steps,
        vec![
            (Projected::State(&2), Actor::Robot),
            (Projected::State(&3), Actor::Human),
            (Projected::State(&4), Actor::Robot),
            (Projected::State(&5), Actor::Human),
            (Projected::State(&6), Actor::Robot),
            (Projected::Terminal, Actor::Human),
        ]
    );
    assert_eq!(
        episode.trajectory().start(),
        space.index_of(&3).expect("mapped")
    );
}

#[test]
fn runs_with_equal_seeds_are_identical() {
    let (model, space, tables) = line_setup();
    let config = EngineConfig {
        seed: 77,
        ..EngineConfig::default()
    };
    // Human acts every tick, robot every third tick.
    let schedule = FnSchedule::new(|_tick| true, |tick| tick % 3 == 0);

    let run = || {
        let mut teammate =
            Teammate::new(&model, &space, &tables, config.clone(), GoalId::from(0))
                .expect("valid teammate");
        teammate
            .run(&schedule, None)
            .expect("run")
            .trajectory()
            .clone()
    };

    assert_eq!(run(), run());
}

#[test]
fn first_robot_turn_uses_default_goal() {
    let (model, space, tables) = line_setup();
    let config = EngineConfig {
        default_goal: 1,
        ..EngineConfig::default()
    };
    let mut teammate = Teammate::new(&model, &space, &tables, config, GoalId::from(0))
        .expect("valid teammate");
    let mut episode = teammate.start_episode(None).expect("start");

    let turn = teammate
        .robot_step(&mut episode)
        .expect("robot step")
        .expect("episode is running");

    assert_eq!(turn.belief.predicted, GoalId::from(1));
    assert_eq!(turn.belief.distribution, vec![0.5, 0.5]);
    assert_eq!(turn.choice.action, ActionId::from(RIGHT));
    assert_eq!(episode.last_belief(), Some(&turn.belief));
    assert_eq!(episode.previous(), None);
}

#[test]
fn teleoperated_human_move_is_observed() {
    let (model, space, tables) = line_setup();
    let mut teammate = Teammate::new(
        &model,
        &space,
        &tables,
        EngineConfig::default(),
        GoalId::from(1),
    )
    .expect("valid teammate");
    let mut episode = teammate.start_episode(None).expect("start");
    let three = space.index_of(&3).expect("mapped");
    let two = space.index_of(&2).expect("mapped");

    let next = teammate
        .human_step(&mut episode, ActionId::from(LEFT))
        .expect("human step");

    assert_eq!(next, Some(two));
    assert_eq!(episode.previous(), Some(three));
    let observed = episode.last_human_move().expect("observed");
    assert_eq!(observed.before, three);
    assert_eq!(observed.after, two);

    let belief = teammate.infer_goal(&episode).expect("infer");
    assert_eq!(belief.predicted, GoalId::from(0));
    assert_eq!(belief.probability, 1.0);
}

#[test]
fn steps_after_terminal_are_no_ops() {
    let (model, space, tables) = line_setup();
    let mut teammate = Teammate::new(
        &model,
        &space,
        &tables,
        EngineConfig::default(),
        GoalId::from(1),
    )
    .expect("valid teammate");
    let mut episode = teammate.start_episode(Some(&6)).expect("start");

    teammate
        .human_step(&mut episode, ActionId::from(STAY))
        .expect("human step");
    assert!(episode.is_terminal());
    let len = episode.trajectory().len();

    assert_eq!(teammate.robot_step(&mut episode), Ok(None));
    assert_eq!(teammate.human_policy_step(&mut episode), Ok(None));
    assert_eq!(
        teammate.human_step(&mut episode, ActionId::from(LEFT)),
        Ok(None)
    );
    assert_eq!(episode.trajectory().len(), len);
}

#[test]
fn idle_schedule_hits_tick_limit() {
    let (model, space, tables) = line_setup();
    let config = EngineConfig {
        max_ticks: 5,
        ..EngineConfig::default()
    };
    let mut teammate = Teammate::new(&model, &space, &tables, config, GoalId::from(1))
        .expect("valid teammate");

    let err = teammate
        .run(&FnSchedule::new(|_| false, |_| false), None)
        .expect_err("nobody acts");

    assert_eq!(err, EngineError::TickLimitExceeded { max_ticks: 5 });
}

#[test]
fn invalid_goals_and_starts_are_rejected() {
    let (model, space, tables) = line_setup();

    assert!(matches!(
        Teammate::new(
            &model,
            &space,
            &tables,
            EngineConfig::default(),
            GoalId::from(4)
        ),
        Err(EngineError::UnknownGoal { goal: 4, count: 2 })
    ));

    let teammate = Teammate::new(
        &model,
        &space,
        &tables,
        EngineConfig::default(),
        GoalId::from(0),
    )
    .expect("valid teammate")
    .with_tiebreaker(TieBreaker::from_seed(2));
    assert!(matches!(
        teammate.start_episode(Some(&12)),
        Err(EngineError::UnmappedState { .. })
    ));
}

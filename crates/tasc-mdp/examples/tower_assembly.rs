#[path = "../tests/common/mod.rs"]
mod common;

use tasc_core::{
    Actor, Alternating, EngineConfig, GoalId, Projected, StateSpace, Teammate, TransitionModel,
};
use tasc_mdp::{BlockState, TowerAssembly, TowerState, load_tower};
use tracing_subscriber::EnvFilter;

fn render(state: &TowerState) -> String {
    let mut tower: Vec<(usize, usize)> = Vec::new();
    let mut bin = Vec::new();
    for (block, place) in state.blocks().iter().enumerate() {
        match place {
            BlockState::Table(h) => tower.push((*h, block)),
            BlockState::Bin => bin.push(block),
            BlockState::Storage => {}
        }
    }
    tower.sort_unstable();
    let tower: Vec<usize> = tower.into_iter().map(|(_, block)| block).collect();
    format!("tower {tower:?} bin {bin:?}")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Usage: tower_assembly [TOWER_YAML] [HUMAN_GOAL]
    let mut args = std::env::args().skip(1);
    let tower = match args.next() {
        Some(path) => load_tower(path).expect("tower description should load"),
        None => TowerAssembly::standard().expect("default tower should parse"),
    };
    let human_goal = args
        .next()
        .map(|goal| goal.parse::<usize>().expect("goal should be a number"))
        .unwrap_or(0);

    // Step 1: Enumerate every reachable block layout.
    let space = StateSpace::enumerate(&tower);
    println!(
        "{} blocks, {} goals, {} states",
        tower.num_blocks(),
        tower.goals().len(),
        space.len()
    );

    // Step 2: Solve one value table per goal offline.
    let tables = common::solve_and_load(&tower, &space);

    // Step 3: Pair the robot with a human building `human_goal`.
    let config = EngineConfig::from_default_yaml().expect("default engine config should parse");
    let mut teammate = Teammate::new(&tower, &space, &tables, config, GoalId::from(human_goal))
        .expect("human goal should exist");

    // Step 4: Alternate turns until the tower is finished.
    let episode = teammate
        .run(&Alternating, None)
        .expect("episode should terminate");

    let projected = episode
        .trajectory()
        .project(&space)
        .expect("trajectory should project");
    for (tick, (state, actor)) in projected.iter().enumerate() {
        let who = match actor {
            Actor::Human => "human",
            Actor::Robot => "robot",
        };
        match state {
            Projected::State(state) => println!("{tick:>3} {who:<5} {}", render(state)),
            Projected::Terminal => println!("{tick:>3} {who:<5} done"),
        }
    }

    if let Some(belief) = episode.last_belief() {
        println!(
            "robot's final guess: goal {} (p = {:.2})",
            belief.predicted.index(),
            belief.probability
        );
    }
}

/// Decides, per tick, whether each teammate acts.
///
/// Both, either, or neither may act in one tick.
pub trait TurnSchedule {
    fn human_acts(&self, tick: usize) -> bool;
    fn robot_acts(&self, tick: usize) -> bool;
}

/// Robot acts on even ticks, human on odd ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Alternating;

impl TurnSchedule for Alternating {
    fn human_acts(&self, tick: usize) -> bool {
        tick % 2 == 1
    }

    fn robot_acts(&self, tick: usize) -> bool {
        tick % 2 == 0
    }
}

/// Schedule built from two predicates over the tick counter.
#[derive(Debug, Clone, Copy)]
pub struct FnSchedule<H, R> {
    human: H,
    robot: R,
}

impl<H, R> FnSchedule<H, R>
where
    H: Fn(usize) -> bool,
    R: Fn(usize) -> bool,
{
    pub fn new(human: H, robot: R) -> Self {
        FnSchedule { human, robot }
    }
}

impl<H, R> TurnSchedule for FnSchedule<H, R>
where
    H: Fn(usize) -> bool,
    R: Fn(usize) -> bool,
{
    fn human_acts(&self, tick: usize) -> bool {
        (self.human)(tick)
    }

    fn robot_acts(&self, tick: usize) -> bool {
        (self.robot)(tick)
    }
}

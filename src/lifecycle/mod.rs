//! Unit lifecycle: step primitives and the cycle state machine

pub mod cycle;
pub mod steps;

pub use cycle::{oos_tier, process_unit_cycle, UnitCycleOutcome};
pub use steps::{add_step, kill_steps, recover_steps, scrap_step, suppress_all, suppress_steps};

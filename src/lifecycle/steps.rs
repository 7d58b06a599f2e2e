//! Step-array mutation primitives
//!
//! All of these walk the array front to back. Plain steps sit at the
//! front, so they absorb damage and recover first.

use crate::galaxy::unit::{Step, Unit};

/// Suppress up to `count` active steps, front first
///
/// Returns how many were suppressed. Excess suppression is dropped; it
/// never turns into kills.
pub fn suppress_steps(unit: &mut Unit, count: usize) -> usize {
    let mut suppressed = 0;
    for step in unit.steps.iter_mut() {
        if suppressed == count {
            break;
        }
        if step.is_active() {
            step.is_suppressed = true;
            suppressed += 1;
        }
    }
    suppressed
}

/// Suppress every remaining step
pub fn suppress_all(unit: &mut Unit) -> usize {
    suppress_steps(unit, usize::MAX)
}

/// Permanently remove up to `count` steps from the front
pub fn kill_steps(unit: &mut Unit, count: usize) -> usize {
    let killed = count.min(unit.steps.len());
    unit.steps.drain(..killed);
    killed
}

/// Un-suppress up to `count` steps, oldest first
pub fn recover_steps(unit: &mut Unit, count: usize) -> usize {
    let mut recovered = 0;
    for step in unit.steps.iter_mut() {
        if recovered == count {
            break;
        }
        if step.is_suppressed {
            step.is_suppressed = false;
            recovered += 1;
        }
    }
    recovered
}

/// Reinforce at the back of the array
pub fn add_step(unit: &mut Unit, step: Step) {
    unit.steps.push_back(step);
}

/// Remove the step at `index`, if any
pub fn scrap_step(unit: &mut Unit, index: usize) -> Option<Step> {
    unit.steps.remove(index)
}

//! Combat results table
//!
//! Deterministic: every net score maps to exactly one outcome.

use serde::{Deserialize, Serialize};

use crate::galaxy::unit::CombatOperation;

/// Lowest score on the table; anything below reads this row
pub const MIN_SCORE: i32 = -3;

/// Highest score on the table; anything above reads this row
pub const MAX_SCORE: i32 = 5;

/// Suppression large enough to silence every step of any unit
pub const SHATTER_SUPPRESSION: usize = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CombatResultType {
    Miss,
    Suppress,
    Retreat,
    Shattered,
}

/// Losses for both sides from one engagement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatResult {
    pub attacker_kills: usize,
    pub attacker_suppress: usize,
    pub defender_kills: usize,
    pub defender_suppress: usize,
    pub result_type: CombatResultType,
    pub retreat: bool,
    pub shattered: bool,
}

impl CombatResult {
    const fn row(
        attacker_suppress: usize,
        defender_kills: usize,
        defender_suppress: usize,
        result_type: CombatResultType,
    ) -> Self {
        let retreat = matches!(result_type, CombatResultType::Retreat | CombatResultType::Shattered);
        Self {
            attacker_kills: 0,
            attacker_suppress,
            defender_kills,
            defender_suppress,
            result_type,
            retreat,
            shattered: matches!(result_type, CombatResultType::Shattered),
        }
    }
}

/// Table lookup; `score` is clamped to `[MIN_SCORE, MAX_SCORE]`
pub fn lookup(score: i32) -> CombatResult {
    use CombatResultType::*;

    match score.clamp(MIN_SCORE, MAX_SCORE) {
        -3 => CombatResult::row(2, 0, 0, Miss),
        -2 => CombatResult::row(1, 0, 0, Miss),
        -1 => CombatResult::row(2, 0, 1, Suppress),
        0 => CombatResult::row(1, 0, 1, Suppress),
        1 => CombatResult::row(1, 0, 2, Suppress),
        2 => CombatResult::row(1, 0, 1, Retreat),
        3 => CombatResult::row(0, 1, 1, Retreat),
        4 => CombatResult::row(0, 2, 2, Retreat),
        _ => CombatResult::row(0, 0, SHATTER_SUPPRESSION, Shattered),
    }
}

/// Fixed outcome for operations that skip the table
pub fn forced_result(operation: CombatOperation) -> Option<CombatResult> {
    match operation {
        CombatOperation::Standard => None,
        // Symmetric single suppress
        CombatOperation::Feint => Some(CombatResult::row(1, 0, 1, CombatResultType::Suppress)),
        CombatOperation::SuppressiveFire => {
            Some(CombatResult::row(0, 0, 2, CombatResultType::Suppress))
        }
    }
}

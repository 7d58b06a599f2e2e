//! Combat: prediction, results table, resolution and reports

pub mod calculator;
pub mod engine;
pub mod report;
pub mod results;

pub use calculator::{
    calculate, odds_label, odds_score, side_profile, CombatPrediction, CombatShift,
    CombatShiftType, SideProfile,
};
pub use engine::{find_retreat_hex, resolve, CombatResolution};
pub use report::{CombatReport, StepLosses};
pub use results::{forced_result, lookup, CombatResult, CombatResultType, SHATTER_SUPPRESSION};

//! Combat report emitted for every engagement

use serde::{Deserialize, Serialize};

use crate::combat::calculator::CombatShift;
use crate::combat::results::CombatResultType;
use crate::core::types::{PlayerId, UnitId};
use crate::galaxy::hex::HexCoords;
use crate::galaxy::unit::CombatOperation;

/// Step losses suffered by one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StepLosses {
    pub killed: usize,
    pub suppressed: usize,
}

/// Outcome of one engagement, for consumers outside the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatReport {
    pub attacker_id: UnitId,
    pub attacker_player_id: PlayerId,
    pub defender_id: UnitId,
    pub defender_player_id: PlayerId,
    pub location: HexCoords,
    pub operation: CombatOperation,
    pub attack_power: i32,
    pub defense_power: i32,
    pub odds: String,
    pub odds_score: i32,
    pub shifts: Vec<CombatShift>,
    pub final_score: i32,
    pub result_type: CombatResultType,
    pub attacker_losses: StepLosses,
    pub defender_losses: StepLosses,
    pub retreated_to: Option<HexCoords>,
    pub shattered: bool,
    pub defender_destroyed: bool,
    pub attacker_destroyed: bool,
    pub attacker_advanced: bool,
}

impl CombatReport {
    /// One-line summary for logs
    pub fn summary(&self) -> String {
        let mut text = format!(
            "{} -> {} at {}: {} vs {} ({}), score {} => {:?}",
            self.attacker_id,
            self.defender_id,
            self.location,
            self.attack_power,
            self.defense_power,
            self.odds,
            self.final_score,
            self.result_type
        );
        if let Some(to) = self.retreated_to {
            text.push_str(&format!(", retreated to {}", to));
        }
        if self.shattered {
            text.push_str(", shattered");
        }
        if self.defender_destroyed {
            text.push_str(", defender destroyed");
        }
        if self.attacker_advanced {
            text.push_str(", attacker advanced");
        }
        text
    }
}

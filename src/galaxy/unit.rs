//! Fleet units and their ordered step arrays
//!
//! Step order is a FIFO contract: damage and recovery work from the front,
//! reinforcements join at the back, so specialists are the last to die.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::types::{CatalogId, GameId, PlayerId, SpecialistId, UnitId};
use crate::galaxy::hex::HexCoords;

/// One strength step of a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Step {
    #[serde(default)]
    pub specialist_id: Option<SpecialistId>,
    #[serde(default)]
    pub is_suppressed: bool,
}

impl Step {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn specialist(id: impl Into<SpecialistId>) -> Self {
        Self {
            specialist_id: Some(id.into()),
            is_suppressed: false,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.is_suppressed
    }
}

/// Unit status state machine
///
/// IDLE -> MOVING -> IDLE | REGROUPING, IDLE -> PREPARING -> REGROUPING,
/// REGROUPING -> IDLE once the unit is left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitStatus {
    #[default]
    Idle,
    Moving,
    Preparing,
    Regrouping,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UnitState {
    pub status: UnitStatus,
    pub ap: u32,
    pub mp: u32,
}

/// Queued movement order, consumed from the front
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Movement {
    #[serde(default)]
    pub path: VecDeque<HexCoords>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CombatOperation {
    #[default]
    Standard,
    Feint,
    SuppressiveFire,
}

/// Declared attack, cleared once resolved or cancelled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatOrder {
    pub target: HexCoords,
    #[serde(default)]
    pub operation: CombatOperation,
    #[serde(default)]
    pub advance_on_victory: bool,
}

/// Supply counters, measured in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UnitSupply {
    pub ticks_since_last_supply: u64,
    pub ticks_out_of_supply: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub catalog_id: CatalogId,
    pub location: HexCoords,
    pub steps: VecDeque<Step>,
    #[serde(default)]
    pub state: UnitState,
    #[serde(default)]
    pub movement: Movement,
    #[serde(default)]
    pub combat: Option<CombatOrder>,
    #[serde(default)]
    pub supply: UnitSupply,
}

impl Unit {
    pub fn new(
        id: UnitId,
        game_id: GameId,
        player_id: PlayerId,
        catalog_id: impl Into<CatalogId>,
        location: HexCoords,
    ) -> Self {
        Self {
            id,
            game_id,
            player_id,
            catalog_id: catalog_id.into(),
            location,
            steps: VecDeque::new(),
            state: UnitState::default(),
            movement: Movement::default(),
            combat: None,
            supply: UnitSupply::default(),
        }
    }

    pub fn status(&self) -> UnitStatus {
        self.state.status
    }

    pub fn set_status(&mut self, status: UnitStatus) {
        self.state.status = status;
    }

    /// A unit with no steps left is removed from the game
    pub fn is_alive(&self) -> bool {
        !self.steps.is_empty()
    }

    pub fn active_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.is_active()).count()
    }

    pub fn suppressed_steps(&self) -> usize {
        self.steps.len() - self.active_steps()
    }

    /// Specialist ids on non-suppressed steps, front to back
    pub fn active_specialists(&self) -> impl Iterator<Item = &SpecialistId> {
        self.steps
            .iter()
            .filter(|s| s.is_active())
            .filter_map(|s| s.specialist_id.as_ref())
    }

    /// Drop the remaining path and stop
    pub fn halt(&mut self) {
        self.movement.path.clear();
        if self.state.status == UnitStatus::Moving {
            self.state.status = UnitStatus::Idle;
        }
    }
}

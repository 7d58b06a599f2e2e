//! Domain events emitted by a tick
//!
//! The engine never interprets these; transport and notification layers do.
//! Serialized shape: `{game_id, player_id, tick, type, data}`.

use serde::Serialize;

use crate::combat::report::CombatReport;
use crate::core::types::{CatalogId, GameId, PlanetId, PlayerId, StationId, Tick, UnitId};
use crate::galaxy::hex::HexCoords;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameEvent {
    pub game_id: GameId,
    pub player_id: Option<PlayerId>,
    pub tick: Tick,
    #[serde(flatten)]
    pub kind: GameEventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameEventKind {
    CombatReport(Box<CombatReport>),
    UnitDeployed {
        unit_id: UnitId,
        planet_id: PlanetId,
        catalog_id: CatalogId,
        location: HexCoords,
    },
    UnitStarved {
        unit_id: UnitId,
        steps_lost: usize,
        destroyed: bool,
    },
    PlanetCaptured {
        planet_id: PlanetId,
        previous_owner: Option<PlayerId>,
        location: HexCoords,
    },
    StationDecommissioned {
        station_id: StationId,
        location: HexCoords,
    },
    CombatAttackCancelled {
        unit_id: UnitId,
        target: HexCoords,
    },
    PlayerAfk {
        last_seen_at_ms: Option<u64>,
    },
    PlayerDefeated,
    GameCompleted {
        winner_player_id: PlayerId,
        victory_points: i64,
    },
}

impl GameEventKind {
    /// Wire name of the event type
    pub fn type_name(&self) -> &'static str {
        match self {
            GameEventKind::CombatReport(_) => "COMBAT_REPORT",
            GameEventKind::UnitDeployed { .. } => "UNIT_DEPLOYED",
            GameEventKind::UnitStarved { .. } => "UNIT_STARVED",
            GameEventKind::PlanetCaptured { .. } => "PLANET_CAPTURED",
            GameEventKind::StationDecommissioned { .. } => "STATION_DECOMMISSIONED",
            GameEventKind::CombatAttackCancelled { .. } => "COMBAT_ATTACK_CANCELLED",
            GameEventKind::PlayerAfk { .. } => "PLAYER_AFK",
            GameEventKind::PlayerDefeated => "PLAYER_DEFEATED",
            GameEventKind::GameCompleted { .. } => "GAME_COMPLETED",
        }
    }
}

impl GameEvent {
    /// Human-readable one-liner
    pub fn describe(&self) -> String {
        let who = self
            .player_id
            .map(|p| format!("player {}", p))
            .unwrap_or_else(|| "-".to_string());
        let detail = match &self.kind {
            GameEventKind::CombatReport(report) => report.summary(),
            GameEventKind::UnitDeployed {
                unit_id,
                catalog_id,
                location,
                ..
            } => format!("{} {} deployed at {}", catalog_id, unit_id, location),
            GameEventKind::UnitStarved {
                unit_id,
                steps_lost,
                destroyed,
            } => format!(
                "unit {} lost {} steps to starvation{}",
                unit_id,
                steps_lost,
                if *destroyed { " and was destroyed" } else { "" }
            ),
            GameEventKind::PlanetCaptured {
                planet_id,
                previous_owner,
                location,
            } => match previous_owner {
                Some(prev) => format!("planet {} at {} taken from player {}", planet_id, location, prev),
                None => format!("planet {} at {} claimed", planet_id, location),
            },
            GameEventKind::StationDecommissioned { station_id, location } => {
                format!("station {} at {} decommissioned", station_id, location)
            }
            GameEventKind::CombatAttackCancelled { unit_id, target } => {
                format!("attack by unit {} on {} cancelled", unit_id, target)
            }
            GameEventKind::PlayerAfk { .. } => "marked AFK".to_string(),
            GameEventKind::PlayerDefeated => "defeated".to_string(),
            GameEventKind::GameCompleted {
                winner_player_id,
                victory_points,
            } => format!("game won by player {} with {} VP", winner_player_id, victory_points),
        };
        format!(
            "[tick {}] {} {}: {}",
            self.tick,
            who,
            self.kind.type_name(),
            detail
        )
    }
}

//! Planets, stations, players and the game record

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{CatalogId, GameId, PlanetId, PlayerId, StationId, Tick, UnitId};
use crate::galaxy::hex::HexCoords;
use crate::galaxy::map::Hex;
use crate::galaxy::unit::Unit;

/// Supply role of a planet or station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SupplySource {
    /// Projects supply without being connected itself
    #[serde(default)]
    pub is_root: bool,
    /// Relay reached by the network this tick (recomputed every tick)
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub id: PlanetId,
    pub game_id: GameId,
    #[serde(default)]
    pub owner: Option<PlayerId>,
    pub location: HexCoords,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_capital: bool,
    #[serde(default)]
    pub supply: SupplySource,
    /// Units waiting to be deployed, one per cycle
    #[serde(default)]
    pub deploy_queue: VecDeque<CatalogId>,
}

impl Planet {
    /// Capitals are always roots
    pub fn is_supply_root(&self) -> bool {
        self.is_capital || self.supply.is_root
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub game_id: GameId,
    #[serde(default)]
    pub owner: Option<PlayerId>,
    pub location: HexCoords,
    #[serde(default)]
    pub supply: SupplySource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerStatus {
    #[default]
    Active,
    Defeated,
    Afk,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub game_id: GameId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: PlayerStatus,
    #[serde(default)]
    pub is_ai_controlled: bool,
    #[serde(default)]
    pub prestige: i64,
    #[serde(default)]
    pub victory_points: i64,
    #[serde(default)]
    pub renown_to_distribute: i64,
    /// Last time (epoch ms) the player was seen; `None` means never
    #[serde(default)]
    pub last_seen_at_ms: Option<u64>,
}

impl Player {
    pub fn new(id: PlayerId, game_id: GameId, name: impl Into<String>) -> Self {
        Self {
            id,
            game_id,
            name: name.into(),
            status: PlayerStatus::Active,
            is_ai_controlled: false,
            prestige: 0,
            victory_points: 0,
            renown_to_distribute: 0,
            last_seen_at_ms: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    #[default]
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    /// Last processed tick
    #[serde(default)]
    pub tick: Tick,
    pub ticks_per_cycle: Tick,
    pub victory_points_to_win: i64,
    #[serde(default)]
    pub started_at_ms: u64,
    #[serde(default)]
    pub status: GameStatus,
    #[serde(default)]
    pub winner_player_id: Option<PlayerId>,
    /// Highest unit id ever issued in this game
    #[serde(default)]
    pub last_unit_id: u64,
}

impl Game {
    pub fn is_cycle_boundary(&self) -> bool {
        self.ticks_per_cycle > 0 && self.tick % self.ticks_per_cycle == 0
    }

    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }
}

/// Full snapshot of one game, the unit of persistence for callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub game: Game,
    pub players: Vec<Player>,
    pub hexes: Vec<Hex>,
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub planets: Vec<Planet>,
    #[serde(default)]
    pub stations: Vec<Station>,
}

impl GameState {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Highest unit id ever used, for seeding id generators
    pub fn max_unit_id(&self) -> u64 {
        self.units
            .iter()
            .map(|u| u.id.0)
            .max()
            .unwrap_or(0)
            .max(self.game.last_unit_id)
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn hex(&self, coords: HexCoords) -> Option<&Hex> {
        self.hexes.iter().find(|h| h.coords == coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_boundary() {
        let mut game = Game {
            id: GameId(1),
            tick: 0,
            ticks_per_cycle: 4,
            victory_points_to_win: 10,
            started_at_ms: 0,
            status: GameStatus::Active,
            winner_player_id: None,
            last_unit_id: 0,
        };
        game.tick = 3;
        assert!(!game.is_cycle_boundary());
        game.tick = 8;
        assert!(game.is_cycle_boundary());
    }

    #[test]
    fn test_capital_is_root() {
        let planet = Planet {
            id: PlanetId(1),
            game_id: GameId(1),
            owner: Some(PlayerId(1)),
            location: HexCoords::ORIGIN,
            name: "Home".into(),
            is_capital: true,
            supply: SupplySource::default(),
            deploy_queue: VecDeque::new(),
        };
        assert!(planet.is_supply_root());
    }
}

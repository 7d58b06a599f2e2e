//! Galaxy model: hex geometry, terrain, map and game entities

pub mod entities;
pub mod hex;
pub mod map;
pub mod terrain;
pub mod unit;

pub use entities::{Game, GameState, GameStatus, Planet, Player, PlayerStatus, Station, SupplySource};
pub use hex::{HexCoords, HexDirection};
pub use map::{GalaxyMap, Hex, HexGrid, ZocEntry};
pub use terrain::Terrain;
pub use unit::{CombatOperation, CombatOrder, Movement, Step, Unit, UnitState, UnitStatus, UnitSupply};

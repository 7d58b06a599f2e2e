//! Tick orchestration: working set, phases, events and entry points

pub mod batch;
pub mod combat_phase;
pub mod context;
pub mod cycle;
pub mod events;
pub mod movement;
pub mod processor;

pub use batch::{advance_games, advance_ticks};
pub use context::{TickContext, TickOutput};
pub use events::{GameEvent, GameEventKind};
pub use processor::{process_tick, run_tick};

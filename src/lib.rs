//! Starfront - deterministic tick engine for a hex-grid space wargame

pub mod catalog;
pub mod combat;
pub mod core;
pub mod galaxy;
pub mod lifecycle;
pub mod navigation;
pub mod scenario;
pub mod supply;
pub mod tick;

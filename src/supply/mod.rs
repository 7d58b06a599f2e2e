//! Logistics: per-player supply networks

pub mod network;

pub use network::SupplyNetwork;

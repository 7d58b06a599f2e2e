//! Zone of control and movement-cost pathfinding

pub mod pathfinding;
pub mod zoc;

pub use pathfinding::{
    find_path, movement_range, path_cost, reachable, validate_path, CostModel, PathError,
    Reachability, ZOC_COST_MULTIPLIER,
};
pub use zoc::ZocIndex;

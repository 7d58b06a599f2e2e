//! Cost-aware pathfinding on the galaxy map
//!
//! Costs are integer movement points. Entering enemy ZOC doubles the
//! terrain cost. Ties in the open set break on coordinates so results
//! never depend on hash order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::AHashMap;
use thiserror::Error;

use crate::core::types::PlayerId;
use crate::galaxy::hex::HexCoords;
use crate::galaxy::map::HexGrid;
use crate::navigation::zoc::ZocIndex;

/// Cost multiplier for entering a hex under enemy control
pub const ZOC_COST_MULTIPLIER: u32 = 2;

/// Why a path was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("path step {index} is not adjacent to the previous hex")]
    NotAdjacent { index: usize },

    #[error("hex {0} is not on the map")]
    HexNotFound(HexCoords),

    #[error("hex {0} is impassable")]
    Impassable(HexCoords),

    #[error("path costs {required} MP but only {available} available")]
    TooExpensive { required: u32, available: u32 },
}

/// Movement cost of entering hexes, seen from one player
pub struct CostModel<'a, G: HexGrid> {
    pub grid: &'a G,
    pub player: PlayerId,
    pub zoc: Option<&'a ZocIndex>,
}

impl<'a, G: HexGrid> CostModel<'a, G> {
    pub fn new(grid: &'a G, player: PlayerId) -> Self {
        Self {
            grid,
            player,
            zoc: None,
        }
    }

    pub fn with_zoc(mut self, zoc: &'a ZocIndex) -> Self {
        self.zoc = Some(zoc);
        self
    }

    /// Cost to enter `coords`, `None` if off-map or impassable
    pub fn cost(&self, coords: HexCoords) -> Option<u32> {
        let base = self.grid.terrain_at(coords)?.movement_cost()?;
        match self.zoc {
            Some(zoc) if zoc.is_enemy_zoc(coords, self.player) => Some(base * ZOC_COST_MULTIPLIER),
            _ => Some(base),
        }
    }
}

/// Node in the open set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PathNode {
    coords: HexCoords,
    cost: u32, // g for Dijkstra, g + heuristic for A*
}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.coords.cmp(&self.coords))
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find the cheapest path from `start` to `goal` using A*
///
/// The returned path excludes `start`. With a budget, paths costing more
/// are not considered. Returns None if no path exists.
pub fn find_path<G: HexGrid>(
    model: &CostModel<'_, G>,
    start: HexCoords,
    goal: HexCoords,
    budget: Option<u32>,
) -> Option<Vec<HexCoords>> {
    if start == goal {
        return Some(Vec::new());
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: AHashMap<HexCoords, HexCoords> = AHashMap::new();
    let mut g_scores: AHashMap<HexCoords, u32> = AHashMap::new();

    g_scores.insert(start, 0);
    open_set.push(PathNode {
        coords: start,
        cost: start.distance(goal),
    });

    while let Some(current) = open_set.pop() {
        if current.coords == goal {
            let mut path = reconstruct_path(&came_from, goal);
            path.remove(0);
            return Some(path);
        }

        let current_g = g_scores[&current.coords];
        // Stale heap entry
        if current.cost > current_g + current.coords.distance(goal) {
            continue;
        }

        for neighbor in current.coords.neighbors() {
            let Some(step_cost) = model.cost(neighbor) else {
                continue;
            };

            let tentative_g = current_g + step_cost;
            if budget.is_some_and(|b| tentative_g > b) {
                continue;
            }

            let better = g_scores.get(&neighbor).map_or(true, |&g| tentative_g < g);
            if better {
                came_from.insert(neighbor, current.coords);
                g_scores.insert(neighbor, tentative_g);
                open_set.push(PathNode {
                    coords: neighbor,
                    cost: tentative_g + neighbor.distance(goal),
                });
            }
        }
    }

    None
}

/// Reconstruct path from came_from map, start included
fn reconstruct_path(
    came_from: &AHashMap<HexCoords, HexCoords>,
    mut current: HexCoords,
) -> Vec<HexCoords> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Hexes reachable within a budget and the cheapest cost to each
#[derive(Debug, Clone, Default)]
pub struct Reachability {
    pub distances: AHashMap<HexCoords, u32>,
}

impl Reachability {
    pub fn contains(&self, coords: HexCoords) -> bool {
        self.distances.contains_key(&coords)
    }

    pub fn distance(&self, coords: HexCoords) -> Option<u32> {
        self.distances.get(&coords).copied()
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Reachable hexes in coordinate order
    pub fn coords(&self) -> Vec<HexCoords> {
        let mut coords: Vec<HexCoords> = self.distances.keys().copied().collect();
        coords.sort();
        coords
    }

    /// Canonical `"q,r,s"` keys in coordinate order
    pub fn keys(&self) -> Vec<String> {
        self.coords().iter().map(HexCoords::key).collect()
    }
}

/// Dijkstra flood fill from `start` within `budget`
///
/// `cost` returns the price of entering a hex, `None` if it cannot be
/// entered. The start hex is always reachable at cost 0.
pub fn reachable(
    start: HexCoords,
    budget: u32,
    cost: impl Fn(HexCoords) -> Option<u32>,
) -> Reachability {
    let mut distances: AHashMap<HexCoords, u32> = AHashMap::new();
    let mut open_set = BinaryHeap::new();

    distances.insert(start, 0);
    open_set.push(PathNode {
        coords: start,
        cost: 0,
    });

    while let Some(current) = open_set.pop() {
        if distances.get(&current.coords).is_some_and(|&d| current.cost > d) {
            continue;
        }

        for neighbor in current.coords.neighbors() {
            let Some(step_cost) = cost(neighbor) else {
                continue;
            };
            let next = current.cost + step_cost;
            if next > budget {
                continue;
            }
            if distances.get(&neighbor).map_or(true, |&d| next < d) {
                distances.insert(neighbor, next);
                open_set.push(PathNode {
                    coords: neighbor,
                    cost: next,
                });
            }
        }
    }

    Reachability { distances }
}

/// Hexes a unit with `mp` movement points could reach from `start`
pub fn movement_range<G: HexGrid>(model: &CostModel<'_, G>, start: HexCoords, mp: u32) -> Reachability {
    reachable(start, mp, |coords| model.cost(coords))
}

/// Total cost of walking `path` (start excluded), None if any hex is impassable
pub fn path_cost<G: HexGrid>(model: &CostModel<'_, G>, path: &[HexCoords]) -> Option<u32> {
    path.iter().map(|&coords| model.cost(coords)).sum()
}

/// Check a path step by step and return its total cost
pub fn validate_path<G: HexGrid>(
    model: &CostModel<'_, G>,
    start: HexCoords,
    path: &[HexCoords],
    available_mp: u32,
) -> Result<u32, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }

    let mut previous = start;
    let mut required = 0;
    for (index, &coords) in path.iter().enumerate() {
        if !previous.is_adjacent(coords) {
            return Err(PathError::NotAdjacent { index });
        }
        if !model.grid.contains(coords) {
            return Err(PathError::HexNotFound(coords));
        }
        let Some(cost) = model.cost(coords) else {
            return Err(PathError::Impassable(coords));
        };
        required += cost;
        previous = coords;
    }

    if required > available_mp {
        return Err(PathError::TooExpensive {
            required,
            available: available_mp,
        });
    }
    Ok(required)
}

//! Property tests for cube-coordinate arithmetic

use proptest::prelude::*;
use starfront::galaxy::hex::{HexCoords, HexDirection};

fn coords() -> impl Strategy<Value = HexCoords> {
    (-50i32..=50, -50i32..=50).prop_map(|(q, r)| HexCoords::from_axial(q, r))
}

fn direction() -> impl Strategy<Value = HexDirection> {
    (0usize..6).prop_map(|i| HexDirection::all()[i])
}

proptest! {
    #[test]
    fn test_cube_sum_is_zero(a in coords(), b in coords()) {
        prop_assert!(a.is_valid());
        prop_assert!((a + b).is_valid());
        prop_assert!((a - b).is_valid());
    }

    #[test]
    fn test_distance_is_symmetric(a in coords(), b in coords()) {
        prop_assert_eq!(a.distance(b), b.distance(a));
        prop_assert_eq!(a.distance(a), 0);
    }

    #[test]
    fn test_triangle_inequality(a in coords(), b in coords(), c in coords()) {
        prop_assert!(a.distance(c) <= a.distance(b) + b.distance(c));
    }

    #[test]
    fn test_neighbors_are_adjacent(a in coords()) {
        for n in a.neighbors() {
            prop_assert_eq!(a.distance(n), 1);
            prop_assert!(a.is_adjacent(n));
        }
    }

    #[test]
    fn test_opposite_direction_returns(a in coords(), dir in direction()) {
        prop_assert_eq!(a.neighbor(dir).neighbor(dir.opposite()), a);
        prop_assert_eq!(dir.opposite().opposite(), dir);
    }

    #[test]
    fn test_key_round_trips(a in coords()) {
        let parsed: HexCoords = a.key().parse().unwrap();
        prop_assert_eq!(parsed, a);
    }

    #[test]
    fn test_ring_hexes_are_at_radius(center in coords(), radius in 1u32..8) {
        let ring = center.ring(radius);
        prop_assert_eq!(ring.len(), 6 * radius as usize);
        for hex in ring {
            prop_assert_eq!(center.distance(hex), radius);
        }
    }
}

#[test]
fn test_malformed_keys_rejected() {
    assert!("1,2".parse::<HexCoords>().is_err());
    assert!("1,1,1".parse::<HexCoords>().is_err());
    assert!("a,b,c".parse::<HexCoords>().is_err());
    assert_eq!("2,-1,-1".parse::<HexCoords>().unwrap(), HexCoords::new(2, -1, -1));
}

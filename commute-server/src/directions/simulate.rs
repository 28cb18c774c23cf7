//! Offline route simulation.
//!
//! Used when no directions provider is configured or the provider keeps
//! failing. The result is a pure function of its inputs: straight-line
//! distance corrected by a per-mode path factor, a per-mode average speed,
//! and a two-point geometry.

use crate::domain::{Coordinate, LineString, ModeClass, RouteResult};

/// Straight-line distance used when origin and destination coincide, in km.
pub const MIN_BASE_DISTANCE_KM: f64 = 1.2;

/// Straight-line distance between the endpoints, floored for zero-length trips.
pub fn base_distance_km(origin: Coordinate, dest: Coordinate) -> f64 {
    let d = origin.haversine_km(&dest);
    // `> 0.0` is false for NaN as well as zero
    if d > 0.0 { d } else { MIN_BASE_DISTANCE_KM }
}

/// Simulate a route between two points for a mode class.
pub fn simulate_route(origin: Coordinate, dest: Coordinate, class: ModeClass) -> RouteResult {
    let distance_km = base_distance_km(origin, dest) * class.path_factor();
    let duration_min = distance_km / class.speed_kmh() * 60.0;

    RouteResult {
        distance_km,
        duration_min,
        geometry: Some(LineString::straight(origin, dest)),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_coord() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| Coordinate { lat, lng })
    }

    fn any_class() -> impl Strategy<Value = ModeClass> {
        prop_oneof![
            Just(ModeClass::Walking),
            Just(ModeClass::Cycling),
            Just(ModeClass::Motorbike),
            Just(ModeClass::Bus),
            Just(ModeClass::ElectricCar),
            Just(ModeClass::Driving),
            Just(ModeClass::Other),
        ]
    }

    proptest! {
        /// Distances and durations are never negative.
        #[test]
        fn non_negative(a in any_coord(), b in any_coord(), class in any_class()) {
            let route = simulate_route(a, b, class);
            prop_assert!(route.distance_km >= 0.0);
            prop_assert!(route.duration_min >= 0.0);
        }

        /// Identical inputs give bit-identical outputs.
        #[test]
        fn deterministic(a in any_coord(), b in any_coord(), class in any_class()) {
            let first = simulate_route(a, b, class);
            let second = simulate_route(a, b, class);
            prop_assert_eq!(first.distance_km.to_bits(), second.distance_km.to_bits());
            prop_assert_eq!(first.duration_min.to_bits(), second.duration_min.to_bits());
        }

        /// For the same endpoints, walking takes longest and driving shortest.
        #[test]
        fn speed_ordering(a in any_coord(), b in any_coord()) {
            let walk = simulate_route(a, b, ModeClass::Walking).duration_min;
            let cycle = simulate_route(a, b, ModeClass::Cycling).duration_min;
            let drive = simulate_route(a, b, ModeClass::Driving).duration_min;
            prop_assert!(walk > cycle);
            prop_assert!(cycle > drive);
        }
    }
}

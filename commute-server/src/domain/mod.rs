//! Domain types for the commute planner.
//!
//! Coordinates, travel modes, emission factors and route candidates. Types
//! with invariants check them at construction time.

mod coordinate;
mod emission;
mod mode;
mod route;

pub use coordinate::{Coordinate, EARTH_RADIUS_KM, InvalidCoordinate, Place};
pub use emission::{EMISSION_FACTORS, VehicleCategory, emission_factor, estimate_emission};
pub use mode::{ModeClass, TravelMode};
pub use route::{LineString, Provenance, RouteCandidate, RouteResult, Source, round_to};

//! Directions: live OpenRouteService client and offline simulation.
//!
//! The live client answers two-point directions queries for an ORS profile
//! (`driving-car`, `cycling-regular`, `foot-walking`, ...). When it is not
//! configured or keeps failing, the pipeline falls back to [`simulate_route`],
//! which needs no network and is fully deterministic.

mod client;
mod error;
mod simulate;
mod types;

pub use client::{DEFAULT_BASE_URL, OrsClient, OrsConfig};
pub use error::DirectionsError;
pub use simulate::{MIN_BASE_DISTANCE_KM, base_distance_km, simulate_route};
pub use types::{DirectionsRequest, DirectionsResponse, RouteFeature, RouteProperties, RouteSummary};

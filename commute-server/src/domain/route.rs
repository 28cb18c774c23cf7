//! Route results and candidates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::coordinate::Coordinate;

/// A GeoJSON `LineString`: vertices as `[lng, lat]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "LineString")]
pub struct LineString {
    pub coordinates: Vec<[f64; 2]>,
}

impl LineString {
    /// A two-vertex straight line from `from` to `to`.
    pub fn straight(from: Coordinate, to: Coordinate) -> Self {
        Self {
            coordinates: vec![from.lng_lat(), to.lng_lat()],
        }
    }
}

/// Output of the route geometry step.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    /// Path length in kilometres, never negative.
    pub distance_km: f64,
    /// Travel time in minutes, never negative.
    pub duration_min: f64,
    /// Path geometry, if known.
    pub geometry: Option<LineString>,
}

/// Whether a value came from a live upstream or a local fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Source {
    #[default]
    Live,
    Fallback,
}

/// Which steps of a candidate were degraded. Not part of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Provenance {
    pub route: Source,
    pub delay: Source,
}

impl Provenance {
    pub fn is_degraded(&self) -> bool {
        self.route == Source::Fallback || self.delay == Source::Fallback
    }
}

/// One proposed route for a single travel mode.
///
/// Numeric fields are rounded on construction: distance to 3 decimals,
/// durations and emissions to 2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCandidate {
    /// Fresh per request; candidates are never deduplicated.
    #[serde(rename = "routeId")]
    pub route_id: Uuid,

    /// Mode identifier as requested.
    pub mode: String,

    pub distance_km: f64,

    /// Duration reported by the route geometry step.
    pub duration_min: f64,

    /// Delay-adjusted duration; equals `duration_min` when no usable
    /// prediction was available.
    pub predicted_duration_min: f64,

    pub emission_g: f64,

    /// Route geometry, absent when unknown.
    #[serde(default)]
    pub polyline: Option<LineString>,

    pub origin: Coordinate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_name: Option<String>,

    pub dest: Coordinate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_name: Option<String>,

    #[serde(skip)]
    pub provenance: Provenance,
}

/// Round `value` to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

//! Stored documents.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, LineString};

use super::error::StoreError;

pub const UNKNOWN_ORIGIN: &str = "Unknown Origin";
pub const UNKNOWN_DESTINATION: &str = "Unknown Destination";

/// A route a user picked, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRoute {
    #[serde(rename = "routeId")]
    pub route_id: String,

    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    pub origin: Coordinate,
    pub origin_name: String,
    pub dest: Coordinate,
    pub dest_name: String,
    pub mode: String,
    pub distance_km: f64,

    /// Predicted duration when one was available, else the route duration.
    pub duration_min: f64,

    pub emission_g: f64,

    #[serde(default)]
    pub polyline: Option<LineString>,

    pub created_at_secs: u64,
}

/// A user picking a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(rename = "routeId")]
    pub route_id: String,

    pub chosen_at_secs: u64,
}

/// Aggregate emissions over a set of saved routes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EmissionTotals {
    pub total_emission_g: f64,
    pub route_count: usize,
}

impl EmissionTotals {
    pub(crate) fn over<'a>(routes: impl IntoIterator<Item = &'a SavedRoute>) -> Self {
        routes
            .into_iter()
            .fold(Self::default(), |acc, route| Self {
                total_emission_g: acc.total_emission_g + route.emission_g,
                route_count: acc.route_count + 1,
            })
    }
}

/// Seconds since the unix epoch.
pub fn now_secs() -> Result<u64, StoreError> {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| StoreError::Clock)
}

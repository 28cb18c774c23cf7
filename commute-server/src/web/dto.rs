//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, LineString};
use crate::store::{SavedRoute, UNKNOWN_DESTINATION, UNKNOWN_ORIGIN};

/// Query for route candidates.
#[derive(Debug, Default, Deserialize)]
pub struct RoutesQuery {
    /// `"lat,lng"` or a place name
    pub origin: Option<String>,

    /// `"lat,lng"` or a place name
    pub dest: Option<String>,

    /// Comma-separated mode identifiers (defaults when absent)
    pub modes: Option<String>,
}

impl RoutesQuery {
    /// Requested modes; empty when none were given.
    pub fn mode_list(&self) -> Vec<String> {
        self.modes
            .as_deref()
            .map(|m| m.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_default()
    }
}

/// Query naming a user.
#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Body of a route choice.
#[derive(Debug, Default, Deserialize)]
pub struct ChooseRequest {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,

    #[serde(rename = "routeId", default)]
    pub route_id: Option<String>,

    #[serde(default)]
    pub route: Option<ChosenRoute>,
}

/// A candidate as sent back by the client. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ChosenRoute {
    pub origin: Option<Coordinate>,
    pub origin_name: Option<String>,
    pub dest: Option<Coordinate>,
    pub dest_name: Option<String>,
    pub mode: Option<String>,
    pub distance_km: Option<f64>,
    pub duration_min: Option<f64>,
    pub predicted_duration_min: Option<f64>,
    pub emission_g: Option<f64>,

    /// Kept loose: clients may send `{}` or `null` for "no geometry".
    pub polyline: Option<serde_json::Value>,
}

impl ChosenRoute {
    /// Convert to a stored route.
    ///
    /// Missing names become "Unknown Origin"/"Unknown Destination", missing
    /// numbers become zero, and the predicted duration wins when present.
    pub fn into_saved(
        self,
        route_id: String,
        user_id: Option<String>,
        created_at_secs: u64,
    ) -> SavedRoute {
        let zero = Coordinate { lat: 0.0, lng: 0.0 };
        let named = |name: Option<String>, fallback: &str| {
            name.filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string())
        };

        SavedRoute {
            route_id,
            user_id,
            origin: self.origin.unwrap_or(zero),
            origin_name: named(self.origin_name, UNKNOWN_ORIGIN),
            dest: self.dest.unwrap_or(zero),
            dest_name: named(self.dest_name, UNKNOWN_DESTINATION),
            mode: self.mode.unwrap_or_else(|| "unknown".to_string()),
            distance_km: self.distance_km.unwrap_or(0.0),
            duration_min: self
                .predicted_duration_min
                .or(self.duration_min)
                .unwrap_or(0.0),
            emission_g: self.emission_g.unwrap_or(0.0),
            polyline: self
                .polyline
                .and_then(|v| serde_json::from_value::<LineString>(v).ok()),
            created_at_secs,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// RFC 3339
    pub timestamp: String,
}

/// Plain acknowledgement.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// City-wide emission total.
#[derive(Debug, Serialize)]
pub struct CitySavingsResponse {
    pub total_emission_g: f64,
}

/// Emission total for one user.
#[derive(Debug, Serialize)]
pub struct UserSavingsResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub total_emission_g: f64,
    pub route_count: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

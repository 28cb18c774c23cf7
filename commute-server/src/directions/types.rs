//! OpenRouteService directions request/response DTOs.
//!
//! These map the `/v2/directions/{profile}/geojson` endpoint. ORS omits
//! fields rather than sending nulls in several places, so most of the
//! response is optional.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, LineString, RouteResult};

/// Distance and duration substituted when the response has no summary.
const MISSING_SUMMARY_VALUE: f64 = 1.0;

/// Request body for a two-point directions query.
#[derive(Debug, Clone, Serialize)]
pub struct DirectionsRequest {
    /// `[lng, lat]` pairs, origin first.
    pub coordinates: Vec<[f64; 2]>,

    /// Turn-by-turn instructions are never needed.
    pub instructions: bool,
}

impl DirectionsRequest {
    pub fn between(origin: Coordinate, dest: Coordinate) -> Self {
        Self {
            coordinates: vec![origin.lng_lat(), dest.lng_lat()],
            instructions: false,
        }
    }
}

/// GeoJSON feature collection returned by ORS.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub features: Vec<RouteFeature>,
}

/// One route in the response.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteFeature {
    pub geometry: Option<LineString>,
    pub properties: Option<RouteProperties>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteProperties {
    pub summary: Option<RouteSummary>,
}

/// Route totals. ORS leaves out zero-valued fields.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RouteSummary {
    /// Metres.
    #[serde(default)]
    pub distance: f64,

    /// Seconds.
    #[serde(default)]
    pub duration: f64,
}

impl RouteFeature {
    /// Convert to a [`RouteResult`]: metres to km, seconds to minutes.
    pub fn into_route_result(self) -> RouteResult {
        let summary = self.properties.and_then(|p| p.summary);
        let (distance_km, duration_min) = match summary {
            Some(s) => (s.distance / 1000.0, s.duration / 60.0),
            None => (MISSING_SUMMARY_VALUE, MISSING_SUMMARY_VALUE),
        };

        RouteResult {
            distance_km: distance_km.max(0.0),
            duration_min: duration_min.max(0.0),
            geometry: self.geometry,
        }
    }
}

/// Error body ORS sends with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct OrsErrorPayload {
    pub error: OrsErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrsErrorDetail {
    pub code: u32,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_response() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "bbox": [77.59, 12.93, 77.62, 12.97],
                "properties": {
                    "summary": {"distance": 6543.2, "duration": 912.0},
                    "way_points": [0, 41]
                },
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[77.5946, 12.9716], [77.61, 12.95], [77.6245, 12.9352]]
                }
            }]
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        let route = response
            .features
            .into_iter()
            .next()
            .unwrap()
            .into_route_result();

        assert!((route.distance_km - 6.5432).abs() < 1e-9);
        assert!((route.duration_min - 15.2).abs() < 1e-9);
        assert_eq!(route.geometry.unwrap().coordinates.len(), 3);
    }

    #[test]
    fn missing_summary_substitutes_one() {
        let json = r#"{
            "features": [{
                "properties": {},
                "geometry": {"type": "LineString", "coordinates": [[1.0, 2.0], [3.0, 4.0]]}
            }]
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        let route = response.features[0].clone().into_route_result();

        assert_eq!(route.distance_km, 1.0);
        assert_eq!(route.duration_min, 1.0);
        assert!(route.geometry.is_some());
    }

    #[test]
    fn empty_summary_fields_default_to_zero() {
        let json = r#"{"features": [{"properties": {"summary": {}}, "geometry": null}]}"#;

        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        let route = response.features[0].clone().into_route_result();

        assert_eq!(route.distance_km, 0.0);
        assert_eq!(route.duration_min, 0.0);
        assert!(route.geometry.is_none());
    }

    #[test]
    fn request_body_shape() {
        let origin = Coordinate::new(12.9716, 77.5946).unwrap();
        let dest = Coordinate::new(12.9352, 77.6245).unwrap();
        let body = serde_json::to_value(DirectionsRequest::between(origin, dest)).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "coordinates": [[77.5946, 12.9716], [77.6245, 12.9352]],
                "instructions": false
            })
        );
    }

    #[test]
    fn parse_error_payload() {
        let json = r#"{"error": {"code": 2010, "message": "Could not find routable point"}}"#;
        let payload: OrsErrorPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.error.code, 2010);
    }
}

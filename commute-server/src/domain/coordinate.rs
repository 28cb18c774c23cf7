//! Geographic coordinate types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for great-circle distances, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Error returned when a coordinate is out of range or unparseable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// A WGS84 latitude/longitude pair in degrees.
///
/// Values built through [`Coordinate::new`], parsed from text or
/// deserialized are always finite and within `lat ∈ [-90, 90]`,
/// `lng ∈ [-180, 180]`.
///
/// # Examples
///
/// ```
/// use commute_server::domain::Coordinate;
///
/// let mg_road: Coordinate = "12.9716,77.5946".parse().unwrap();
/// assert_eq!(mg_road.lat, 12.9716);
/// assert_eq!(mg_road.lng, 77.5946);
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Unchecked wire form, validated on the way in.
#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lng)
    }
}

impl Coordinate {
    /// Create a coordinate, checking range and finiteness.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidCoordinate {
                reason: "latitude and longitude must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate {
                reason: "latitude must be within [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidCoordinate {
                reason: "longitude must be within [-180, 180]",
            });
        }
        Ok(Self { lat, lng })
    }

    /// Great-circle distance to `other` in kilometres (haversine).
    pub fn haversine_km(&self, other: &Coordinate) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos()
                * other.lat.to_radians().cos()
                * (d_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// The `[lng, lat]` pair used by GeoJSON and the directions API.
    pub fn lng_lat(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

impl FromStr for Coordinate {
    type Err = InvalidCoordinate;

    /// Parse the `"lat,lng"` form used in query strings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s.split_once(',').ok_or(InvalidCoordinate {
            reason: "expected \"lat,lng\"",
        })?;
        let lat = lat.trim().parse::<f64>().map_err(|_| InvalidCoordinate {
            reason: "latitude is not a number",
        })?;
        let lng = lng.trim().parse::<f64>().map_err(|_| InvalidCoordinate {
            reason: "longitude is not a number",
        })?;
        Self::new(lat, lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Where a trip starts or ends, as supplied by a caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Place {
    /// Already-resolved coordinates.
    Coordinates(Coordinate),
    /// A free-text place name that must go through the geocoder.
    Name(String),
}

impl Place {
    /// Interpret request text: `"lat,lng"` becomes coordinates, anything
    /// else is treated as a place name.
    ///
    /// Returns `None` for blank input.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        match s.parse::<Coordinate>() {
            Ok(coord) => Some(Place::Coordinates(coord)),
            Err(_) => Some(Place::Name(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_coordinate() {
        let c: Coordinate = "12.9716, 77.5946".parse().unwrap();
        assert_eq!(c, Coordinate { lat: 12.9716, lng: 77.5946 });
    }

    #[test]
    fn reject_out_of_range() {
        assert!(Coordinate::new(90.1, 0.0).is_err());
        assert!(Coordinate::new(-90.1, 0.0).is_err());
        assert!(Coordinate::new(0.0, 180.5).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
        assert!(Coordinate::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn reject_malformed_text() {
        assert!("12.9716".parse::<Coordinate>().is_err());
        assert!("abc,77.59".parse::<Coordinate>().is_err());
        assert!("12.97,".parse::<Coordinate>().is_err());
    }

    #[test]
    fn deserialize_checks_range() {
        let c: Coordinate = serde_json::from_str(r#"{"lat": 12.9716, "lng": 77.5946}"#).unwrap();
        assert_eq!(c, Coordinate::new(12.9716, 77.5946).unwrap());

        let err = serde_json::from_str::<Coordinate>(r#"{"lat": 123.0, "lng": 0.0}"#).unwrap_err();
        assert!(err.to_string().contains("latitude must be within"));
        assert!(serde_json::from_str::<Coordinate>(r#"{"lat": 0.0, "lng": -200.0}"#).is_err());
    }

    #[test]
    fn haversine_same_point_is_zero() {
        let c = Coordinate::new(12.9716, 77.5946).unwrap();
        assert_eq!(c.haversine_km(&c), 0.0);
    }

    #[test]
    fn haversine_known_distance() {
        // MG Road to Koramangala, Bengaluru
        let a = Coordinate::new(12.9716, 77.5946).unwrap();
        let b = Coordinate::new(12.9352, 77.6245).unwrap();
        let d = a.haversine_km(&b);
        assert!((d - 5.1847).abs() < 1e-3, "got {d}");
        assert!((d - b.haversine_km(&a)).abs() < 1e-12);
    }

    #[test]
    fn place_parse() {
        assert_eq!(
            Place::parse("12.9716,77.5946"),
            Some(Place::Coordinates(Coordinate {
                lat: 12.9716,
                lng: 77.5946
            }))
        );
        assert_eq!(
            Place::parse("  MG Road, Bengaluru "),
            Some(Place::Name("MG Road, Bengaluru".to_string()))
        );
        assert_eq!(Place::parse("   "), None);
    }
}

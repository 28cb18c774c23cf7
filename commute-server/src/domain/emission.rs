//! CO₂ emission estimates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Emission bucket a travel mode is charged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleCategory {
    PetrolCar,
    ElectricCar,
    Bus,
    /// Two-wheelers and walking; zero tailpipe emissions in this model.
    Bike,
}

impl VehicleCategory {
    /// The name used in the factor table.
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleCategory::PetrolCar => "petrol_car",
            VehicleCategory::ElectricCar => "electric_car",
            VehicleCategory::Bus => "bus",
            VehicleCategory::Bike => "bike",
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Petrol car factor, also charged for anything missing from the table.
const PETROL_CAR_G_PER_KM: f64 = 192.0;

/// Grams of CO₂ per kilometre, by category.
pub const EMISSION_FACTORS: [(VehicleCategory, f64); 4] = [
    (VehicleCategory::PetrolCar, PETROL_CAR_G_PER_KM),
    (VehicleCategory::ElectricCar, 50.0),
    (VehicleCategory::Bus, 105.0),
    (VehicleCategory::Bike, 0.0),
];

/// Grams of CO₂ per kilometre for `category`.
pub fn emission_factor(category: VehicleCategory) -> f64 {
    EMISSION_FACTORS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, factor)| *factor)
        .unwrap_or(PETROL_CAR_G_PER_KM)
}

/// Estimated grams of CO₂ for travelling `distance_km` in `category`.
///
/// Pure and total; never performs I/O.
///
/// # Examples
///
/// ```
/// use commute_server::domain::{VehicleCategory, estimate_emission};
///
/// assert_eq!(estimate_emission(10.0, VehicleCategory::Bus), 1050.0);
/// assert_eq!(estimate_emission(10.0, VehicleCategory::Bike), 0.0);
/// ```
pub fn estimate_emission(distance_km: f64, category: VehicleCategory) -> f64 {
    distance_km * emission_factor(category)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_category() -> impl Strategy<Value = VehicleCategory> {
        prop_oneof![
            Just(VehicleCategory::PetrolCar),
            Just(VehicleCategory::ElectricCar),
            Just(VehicleCategory::Bus),
            Just(VehicleCategory::Bike),
        ]
    }

    proptest! {
        /// More distance never means less CO₂.
        #[test]
        fn monotonic_in_distance(
            category in any_category(),
            a in 0.0f64..10_000.0,
            b in 0.0f64..10_000.0,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(estimate_emission(lo, category) <= estimate_emission(hi, category));
        }

        /// Bikes are free at any distance.
        #[test]
        fn bike_is_zero(d in 0.0f64..10_000.0) {
            prop_assert_eq!(estimate_emission(d, VehicleCategory::Bike), 0.0);
        }

        /// Emissions are never negative.
        #[test]
        fn non_negative(category in any_category(), d in 0.0f64..10_000.0) {
            prop_assert!(estimate_emission(d, category) >= 0.0);
        }
    }
}

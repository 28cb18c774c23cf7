//! Travel mode classification.
//!
//! Mode identifiers arrive as free text ("driving-car", "cycling-regular",
//! "foot-walking", "bus", ...). They are kept verbatim for display and for
//! the upstream APIs, and classified once into a closed [`ModeClass`] that
//! drives every speed, path and emission assumption.

use std::fmt;

use super::emission::VehicleCategory;

/// The class a mode identifier falls into.
///
/// Classification is a case-insensitive substring match with a fixed
/// precedence; the first rule that matches wins:
///
/// 1. `foot` or `walk` → [`Walking`](ModeClass::Walking)
/// 2. `cycling` → [`Cycling`](ModeClass::Cycling)
/// 3. `bike` or `motor` → [`Motorbike`](ModeClass::Motorbike)
/// 4. `bus` → [`Bus`](ModeClass::Bus)
/// 5. `electric` → [`ElectricCar`](ModeClass::ElectricCar)
/// 6. `driving` or `car` → [`Driving`](ModeClass::Driving)
/// 7. anything else → [`Other`](ModeClass::Other)
///
/// So "electric-cycling" is cycling, and "driving-electric" is an electric car.
///
/// # Examples
///
/// ```
/// use commute_server::domain::{ModeClass, VehicleCategory};
///
/// assert_eq!(ModeClass::classify("driving-car"), ModeClass::Driving);
/// assert_eq!(ModeClass::classify("Cycling-Regular"), ModeClass::Cycling);
/// assert_eq!(ModeClass::classify("teleport"), ModeClass::Other);
/// assert_eq!(
///     ModeClass::classify("teleport").vehicle_category(),
///     VehicleCategory::PetrolCar
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeClass {
    Walking,
    Cycling,
    Motorbike,
    Bus,
    ElectricCar,
    Driving,
    Other,
}

/// Precedence-ordered substring rules.
const RULES: &[(&[&str], ModeClass)] = &[
    (&["foot", "walk"], ModeClass::Walking),
    (&["cycling"], ModeClass::Cycling),
    (&["bike", "motor"], ModeClass::Motorbike),
    (&["bus"], ModeClass::Bus),
    (&["electric"], ModeClass::ElectricCar),
    (&["driving", "car"], ModeClass::Driving),
];

impl ModeClass {
    /// Classify a mode identifier. Total: every string maps to exactly one class.
    pub fn classify(mode: &str) -> Self {
        let mode = mode.to_ascii_lowercase();
        RULES
            .iter()
            .find(|(needles, _)| needles.iter().any(|n| mode.contains(n)))
            .map(|(_, class)| *class)
            .unwrap_or(ModeClass::Other)
    }

    /// Average travel speed used by the offline simulation, in km/h.
    pub fn speed_kmh(self) -> f64 {
        match self {
            ModeClass::Walking => 5.0,
            ModeClass::Cycling => 18.0,
            ModeClass::Motorbike => 35.0,
            ModeClass::Bus => 45.0,
            ModeClass::ElectricCar | ModeClass::Driving => 50.0,
            ModeClass::Other => 40.0,
        }
    }

    /// Ratio of network path length to straight-line distance.
    ///
    /// Road modes exceed 1 (network indirection); walking is below 1
    /// because footpaths cut corners roads cannot.
    pub fn path_factor(self) -> f64 {
        match self {
            ModeClass::Walking => 0.9,
            ModeClass::Cycling => 1.05,
            ModeClass::Motorbike => 1.1,
            ModeClass::ElectricCar | ModeClass::Driving => 1.2,
            ModeClass::Bus => 1.3,
            ModeClass::Other => 1.0,
        }
    }

    /// Emission bucket for this class.
    pub fn vehicle_category(self) -> VehicleCategory {
        match self {
            ModeClass::Walking | ModeClass::Cycling | ModeClass::Motorbike => {
                VehicleCategory::Bike
            }
            ModeClass::Bus => VehicleCategory::Bus,
            ModeClass::ElectricCar => VehicleCategory::ElectricCar,
            ModeClass::Driving | ModeClass::Other => VehicleCategory::PetrolCar,
        }
    }
}

impl fmt::Display for ModeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModeClass::Walking => "walking",
            ModeClass::Cycling => "cycling",
            ModeClass::Motorbike => "motorbike",
            ModeClass::Bus => "bus",
            ModeClass::ElectricCar => "electric-car",
            ModeClass::Driving => "driving",
            ModeClass::Other => "other",
        };
        f.write_str(s)
    }
}

/// A requested travel mode: the caller's identifier plus its class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelMode {
    id: String,
    class: ModeClass,
}

impl TravelMode {
    /// Wrap a mode identifier, classifying it.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let class = ModeClass::classify(&id);
        Self { id, class }
    }

    /// The identifier exactly as requested.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn class(&self) -> ModeClass {
        self.class
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

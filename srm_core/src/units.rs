//! # Unit Types
//!
//! Newtype wrappers for the display units a front-end collects from a
//! designer, and their conversions into the SI base units the solvers use.
//!
//! The solvers themselves take plain `f64` fields in SI (m, kg, s, Pa, N,
//! rad). Conversion happens once, at the boundary, through these types:
//!
//! ```rust
//! use srm_core::units::{Millimeters, Meters, Megapascals, Pascals};
//!
//! let diameter: Meters = Millimeters(76.2).into();
//! assert!((diameter.0 - 0.0762).abs() < 1e-12);
//!
//! let pressure: Pascals = Megapascals(7.0).into();
//! assert_eq!(pressure.0, 7.0e6);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters (SI)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square meters (SI)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMeters(pub f64);

/// Area in square millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMillimeters(pub f64);

/// Area in square centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqCentimeters(pub f64);

impl From<SqMeters> for SqMillimeters {
    fn from(m2: SqMeters) -> Self {
        SqMillimeters(m2.0 * 1.0e6)
    }
}

impl From<SqMeters> for SqCentimeters {
    fn from(m2: SqMeters) -> Self {
        SqCentimeters(m2.0 * 1.0e4)
    }
}

// ============================================================================
// Pressure / Stress Units
// ============================================================================

/// Pressure or stress in pascals (SI)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pascals(pub f64);

/// Pressure or stress in megapascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

impl From<Megapascals> for Pascals {
    fn from(mpa: Megapascals) -> Self {
        Pascals(mpa.0 * 1.0e6)
    }
}

impl From<Pascals> for Megapascals {
    fn from(pa: Pascals) -> Self {
        Megapascals(pa.0 / 1.0e6)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms (SI)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Mass in grams
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grams(pub f64);

impl From<Grams> for Kilograms {
    fn from(g: Grams) -> Self {
        Kilograms(g.0 / 1000.0)
    }
}

impl From<Kilograms> for Grams {
    fn from(kg: Kilograms) -> Self {
        Grams(kg.0 * 1000.0)
    }
}

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in radians (SI)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0.to_radians())
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0.to_degrees())
    }
}

// ============================================================================
// Burn Rate Coefficient
// ============================================================================

/// Saint-Robert burn-rate coefficient in m/s/MPa^n (SI length)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetersPerSecondPerMpaN(pub f64);

/// Saint-Robert burn-rate coefficient in mm/s/MPa^n, as propellant tables list it
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MillimetersPerSecondPerMpaN(pub f64);

impl From<MillimetersPerSecondPerMpaN> for MetersPerSecondPerMpaN {
    fn from(a: MillimetersPerSecondPerMpaN) -> Self {
        MetersPerSecondPerMpaN(a.0 / 1000.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Millimeters);
impl_arithmetic!(SqMeters);
impl_arithmetic!(SqMillimeters);
impl_arithmetic!(SqCentimeters);
impl_arithmetic!(Pascals);
impl_arithmetic!(Megapascals);
impl_arithmetic!(Kilograms);
impl_arithmetic!(Grams);
impl_arithmetic!(Radians);
impl_arithmetic!(Degrees);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_millimeters_to_meters() {
        let m: Meters = Millimeters(12.7).into();
        assert_relative_eq!(m.0, 0.0127);
        let back: Millimeters = m.into();
        assert_relative_eq!(back.0, 12.7);
    }

    #[test]
    fn test_megapascals_to_pascals() {
        let pa: Pascals = Megapascals(150.0).into();
        assert_eq!(pa.0, 150.0e6);
    }

    #[test]
    fn test_degrees_to_radians() {
        let rad: Radians = Degrees(180.0).into();
        assert_relative_eq!(rad.0, std::f64::consts::PI);
    }

    #[test]
    fn test_area_conversions() {
        let mm2: SqMillimeters = SqMeters(1.0e-4).into();
        assert_relative_eq!(mm2.0, 100.0);
        let cm2: SqCentimeters = SqMeters(1.0e-4).into();
        assert_relative_eq!(cm2.0, 1.0);
    }

    #[test]
    fn test_burn_rate_coefficient() {
        let a: MetersPerSecondPerMpaN = MillimetersPerSecondPerMpaN(8.26).into();
        assert_relative_eq!(a.0, 0.00826);
    }

    #[test]
    fn test_arithmetic() {
        let a = Millimeters(10.0);
        let b = Millimeters(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_serialization() {
        let kg = Kilograms(1.5);
        let json = serde_json::to_string(&kg).unwrap();
        assert_eq!(json, "1.5");

        let roundtrip: Kilograms = serde_json::from_str(&json).unwrap();
        assert_eq!(kg, roundtrip);
    }
}

//! Physical constants shared by the solvers.
//!
//! Calibration values that a designer may want to tune (specific impulse,
//! thrust coefficient, screw spacing...) are NOT here; they live in the
//! per-calculation constants structs so they can be overridden per call.

/// Standard gravity used throughout the engine (m/s²)
pub const GRAVITY: f64 = 9.8;

/// Sea-level air density (kg/m³)
pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.2;

/// Universal gas constant (J/(mol·K))
pub const UNIVERSAL_GAS_CONSTANT: f64 = 8.314_462_618;

/// Pascals per megapascal
pub const PA_PER_MPA: f64 = 1.0e6;

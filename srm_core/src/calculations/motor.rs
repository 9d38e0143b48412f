//! # Motor Requirements
//!
//! Sizes a solid motor from either a target apogee or a target average
//! thrust: required thrust, total impulse, propellant and motor mass, and
//! thrust-to-weight at liftoff.
//!
//! ## Assumptions
//!
//! - Fixed nominal burn time (2.5 s)
//! - Fixed specific impulse (100 s, typical of sugar propellants)
//! - Motor mass = propellant mass × casing factor (1.3)
//! - The apogee branch estimates impulse from a one-shot energy balance with
//!   quadratic drag, not an iterative trajectory fit
//!
//! All of the above are fields of [`MotorConstants`] and can be overridden.
//!
//! ## Example
//!
//! ```rust
//! use srm_core::calculations::motor::{calculate, MotorRequirementsConfig, MotorTarget};
//!
//! let target = MotorTarget::Apogee { apogee: 1000.0 };
//! let config = MotorRequirementsConfig::new(target, 1.5, 0.0762, 0.75);
//! let result = calculate(&config).unwrap();
//!
//! assert!(result.total_impulse > 300.0);
//! assert!(result.advisory.is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::constants::{AIR_DENSITY_SEA_LEVEL, GRAVITY};
use crate::errors::{require_non_negative, require_positive, CalcResult};

/// Which quantity drives the sizing. Exactly one is ever present.
///
/// ```json
/// { "mode": "apogee", "apogee": 1000.0 }
/// { "mode": "average_thrust", "thrust": 120.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MotorTarget {
    /// Target apogee (m)
    Apogee { apogee: f64 },
    /// Target average thrust (N)
    AverageThrust { thrust: f64 },
}

/// Calibration constants for motor sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorConstants {
    /// Air density (kg/m³)
    pub air_density: f64,
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Nominal burn time (s)
    pub burn_time: f64,
    /// Specific impulse (s)
    pub specific_impulse: f64,
    /// Motor mass / propellant mass
    pub casing_mass_factor: f64,
    /// Propellant/motor mass ratio above which the casing is considered weak
    pub max_propellant_fraction: f64,
    /// Thrust-to-weight below which liftoff margin is insufficient
    pub min_thrust_to_weight: f64,
    /// Motor/rocket mass ratio above which the motor is oversized (apogee mode)
    pub max_motor_mass_ratio: f64,
    /// Thrust above which the motor is unusual for amateur work (thrust mode, N)
    pub max_amateur_thrust: f64,
}

impl Default for MotorConstants {
    fn default() -> Self {
        MotorConstants {
            air_density: AIR_DENSITY_SEA_LEVEL,
            gravity: GRAVITY,
            burn_time: 2.5,
            specific_impulse: 100.0,
            casing_mass_factor: 1.3,
            max_propellant_fraction: 0.9,
            min_thrust_to_weight: 1.2,
            max_motor_mass_ratio: 0.8,
            max_amateur_thrust: 500.0,
        }
    }
}

/// Input parameters for motor sizing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Sugar motor",
///   "target": { "mode": "apogee", "apogee": 1000.0 },
///   "rocket_mass": 1.5,
///   "diameter": 0.0762,
///   "drag_coefficient": 0.75
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotorRequirementsConfig {
    /// User label for this calculation
    #[serde(default)]
    pub label: String,

    /// Apogee or thrust target
    pub target: MotorTarget,

    /// Rocket mass without motor (kg)
    pub rocket_mass: f64,

    /// Body diameter (m)
    pub diameter: f64,

    /// Drag coefficient of the whole rocket
    pub drag_coefficient: f64,

    /// Calibration constants
    #[serde(default)]
    pub constants: MotorConstants,
}

impl MotorRequirementsConfig {
    /// Create a config with default constants.
    pub fn new(
        target: MotorTarget,
        rocket_mass: f64,
        diameter: f64,
        drag_coefficient: f64,
    ) -> Self {
        MotorRequirementsConfig {
            label: String::new(),
            target,
            rocket_mass,
            diameter,
            drag_coefficient,
            constants: MotorConstants::default(),
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        match self.target {
            MotorTarget::Apogee { apogee } => require_positive("apogee", apogee)?,
            MotorTarget::AverageThrust { thrust } => require_positive("thrust", thrust)?,
        }
        require_positive("rocket_mass", self.rocket_mass)?;
        require_positive("diameter", self.diameter)?;
        require_non_negative("drag_coefficient", self.drag_coefficient)?;

        let c = &self.constants;
        require_non_negative("constants.air_density", c.air_density)?;
        require_positive("constants.gravity", c.gravity)?;
        require_positive("constants.burn_time", c.burn_time)?;
        require_positive("constants.specific_impulse", c.specific_impulse)?;
        require_positive("constants.casing_mass_factor", c.casing_mass_factor)?;
        Ok(())
    }

    /// Frontal area A = π(D/2)² (m²)
    pub fn frontal_area(&self) -> f64 {
        PI * (self.diameter / 2.0).powi(2)
    }

    /// Quadratic drag constant k = ½·ρ·Cd·A (kg/m)
    pub fn drag_constant(&self) -> f64 {
        0.5 * self.constants.air_density * self.drag_coefficient * self.frontal_area()
    }
}

/// Non-fatal design advisory. At most one is reported per result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotorAdvisory {
    /// Propellant makes up too much of the motor mass
    WeakCasing,
    /// Thrust-to-weight too low for a clean liftoff
    LowThrustToWeight,
    /// Motor too heavy relative to the rocket (apogee mode)
    OversizedMotor,
    /// Thrust unusually high for amateur motors (thrust mode)
    HighThrust,
}

impl MotorAdvisory {
    /// Human-readable advisory text
    pub fn message(&self) -> &'static str {
        match self {
            MotorAdvisory::WeakCasing => {
                "WARNING: propellant/motor mass ratio too high (>90%). The casing would be structurally weak."
            }
            MotorAdvisory::LowThrustToWeight => {
                "WARNING: thrust-to-weight ratio too low (<1.2). The rocket may not leave the rail safely."
            }
            MotorAdvisory::OversizedMotor => {
                "WARNING: motor too heavy relative to the rocket (>80% of its mass). Consider a lower target apogee."
            }
            MotorAdvisory::HighThrust => {
                "NOTICE: thrust very high for typical amateur motors. Check the structural requirements."
            }
        }
    }
}

/// Results from motor sizing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "thrust": 129.3,
///   "burn_time": 2.5,
///   "total_impulse": 323.2,
///   "propellant_mass": 0.330,
///   "motor_mass": 0.429,
///   "thrust_to_weight": 6.84,
///   "advisory": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorRequirementsResult {
    /// Average thrust (N)
    pub thrust: f64,
    /// Burn time (s)
    pub burn_time: f64,
    /// Total impulse (N·s)
    pub total_impulse: f64,
    /// Propellant mass (kg)
    pub propellant_mass: f64,
    /// Loaded motor mass (kg)
    pub motor_mass: f64,
    /// Liftoff thrust-to-weight ratio
    pub thrust_to_weight: f64,
    /// First design advisory that applies, if any
    pub advisory: Option<MotorAdvisory>,
}

impl MotorRequirementsResult {
    /// Advisory text, if any
    pub fn warning(&self) -> Option<&'static str> {
        self.advisory.map(|a| a.message())
    }
}

/// Size a motor for the configured target.
///
/// # Returns
///
/// * `Ok(MotorRequirementsResult)` - Sizing, with an advisory if a design ratio is out of bounds
/// * `Err(CalcError)` - If any input is non-finite or non-positive
pub fn calculate(config: &MotorRequirementsConfig) -> CalcResult<MotorRequirementsResult> {
    config.validate()?;

    let c = &config.constants;
    let mass = config.rocket_mass;
    let burn_time = c.burn_time;

    let (total_impulse, thrust) = match config.target {
        MotorTarget::Apogee { apogee } => {
            // I ≈ M·sqrt(2gh(1 + kh/M))
            let k = config.drag_constant();
            let impulse = mass * (2.0 * c.gravity * apogee * (1.0 + k * apogee / mass)).sqrt();
            (impulse, impulse / burn_time)
        }
        MotorTarget::AverageThrust { thrust } => (thrust * burn_time, thrust),
    };

    let propellant_mass = total_impulse / (c.specific_impulse * c.gravity);
    let motor_mass = propellant_mass * c.casing_mass_factor;
    let thrust_to_weight = thrust / ((mass + motor_mass) * c.gravity);

    // Priority order: propellant fraction, then T/W, then the mode-specific outlier
    let advisory = if propellant_mass / motor_mass > c.max_propellant_fraction {
        Some(MotorAdvisory::WeakCasing)
    } else if thrust_to_weight < c.min_thrust_to_weight {
        Some(MotorAdvisory::LowThrustToWeight)
    } else {
        match config.target {
            MotorTarget::Apogee { .. } if motor_mass / mass > c.max_motor_mass_ratio => {
                Some(MotorAdvisory::OversizedMotor)
            }
            MotorTarget::AverageThrust { thrust } if thrust > c.max_amateur_thrust => {
                Some(MotorAdvisory::HighThrust)
            }
            _ => None,
        }
    };

    Ok(MotorRequirementsResult {
        thrust,
        burn_time,
        total_impulse,
        propellant_mass,
        motor_mass,
        thrust_to_weight,
        advisory,
    })
}

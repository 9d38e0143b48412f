//! # Motor Design Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Config` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(config) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`motor`] - Required impulse, thrust and motor mass for a mission
//! - [`grain`] - Grain burning area, chamber pressure and thrust
//! - [`structural`] - Case, bulkhead, screw and nozzle checks
//! - [`aerodynamics`] - Stability margin, drag and flight estimate
//!
//! [`chamber_pressure`] holds the pressure root-finder used by [`grain`].

pub mod aerodynamics;
pub mod chamber_pressure;
pub mod grain;
pub mod motor;
pub mod structural;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

// Re-export commonly used types
pub use aerodynamics::{AeroConfig, AeroResult, FinModel, NoseShape, StabilityStatus};
pub use chamber_pressure::{PressurePolicy, PressureSolution};
pub use grain::{GrainConfig, GrainGeometry, GrainResult, ImpulseClass};
pub use motor::{MotorRequirementsConfig, MotorRequirementsResult, MotorTarget};
pub use structural::{CaseStatus, StructuralConfig, StructuralResult};

/// Enum wrapper for all calculation types.
///
/// Lets a caller describe which calculation to run in a single JSON
/// document:
///
/// ```json
/// { "type": "Structural", "case_thickness": 0.003175, ... }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DesignCalculation {
    /// Motor requirements from mission targets
    Motor(MotorRequirementsConfig),
    /// Grain ballistics
    Grain(GrainConfig),
    /// Case and closure structural checks
    Structural(StructuralConfig),
    /// Stability, drag and trajectory
    Aero(AeroConfig),
}

impl DesignCalculation {
    /// Parse a calculation from JSON.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            DesignCalculation::Motor(c) => &c.label,
            DesignCalculation::Grain(c) => &c.label,
            DesignCalculation::Structural(c) => &c.label,
            DesignCalculation::Aero(c) => &c.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            DesignCalculation::Motor(_) => "Motor",
            DesignCalculation::Grain(_) => "Grain",
            DesignCalculation::Structural(_) => "Structural",
            DesignCalculation::Aero(_) => "Aero",
        }
    }

    /// Run the wrapped calculation.
    pub fn run(&self) -> CalcResult<DesignOutput> {
        Ok(match self {
            DesignCalculation::Motor(c) => DesignOutput::Motor(motor::calculate(c)?),
            DesignCalculation::Grain(c) => DesignOutput::Grain(grain::calculate(c)?),
            DesignCalculation::Structural(c) => {
                DesignOutput::Structural(structural::calculate(c)?)
            }
            DesignCalculation::Aero(c) => DesignOutput::Aero(aerodynamics::calculate(c)?),
        })
    }
}

/// Result of a [`DesignCalculation`], tagged the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DesignOutput {
    Motor(MotorRequirementsResult),
    Grain(GrainResult),
    Structural(StructuralResult),
    Aero(AeroResult),
}

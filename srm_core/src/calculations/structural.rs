//! # Motor Case Structural Analysis
//!
//! Checks a cylindrical motor case, its forward bulkhead, the radial
//! retaining screws, and sizes the nozzle exit.
//!
//! ## Assumptions
//!
//! - Thick-walled cylinder (Lamé) under uniform internal pressure, zero
//!   external pressure
//! - Closed-end longitudinal stress
//! - Flat circular bulkhead, clamped edge
//! - Retaining screws in single shear, spaced around the internal
//!   circumference
//!
//! ## Example
//!
//! ```rust
//! use srm_core::calculations::structural::{calculate, CaseStatus, StructuralConfig};
//!
//! let config = StructuralConfig::default();
//! let result = calculate(&config).unwrap();
//!
//! assert_eq!(result.case_status, CaseStatus::Acceptable);
//! println!("σ_vm = {:.1} MPa, {} screws", result.von_mises_stress / 1e6, result.screw_count);
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::errors::{require_positive, CalcError, CalcResult};

/// Case safety verdict against the target safety factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    /// Safety factor meets the target
    Safe,
    /// Within the acceptable fraction of the target
    Acceptable,
    /// Below the acceptable fraction
    Unsafe,
}

impl CaseStatus {
    /// Classify an achieved safety factor.
    pub fn classify(safety_factor: f64, target: f64, acceptable_fraction: f64) -> Self {
        if safety_factor >= target {
            CaseStatus::Safe
        } else if safety_factor >= target * acceptable_fraction {
            CaseStatus::Acceptable
        } else {
            CaseStatus::Unsafe
        }
    }

    /// Safe or acceptable
    pub fn is_ok(&self) -> bool {
        !matches!(self, CaseStatus::Unsafe)
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            CaseStatus::Safe => "Safe",
            CaseStatus::Acceptable => "Acceptable",
            CaseStatus::Unsafe => "Unsafe",
        }
    }
}

/// Layout constants for the structural checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuralConstants {
    /// Circumferential spacing between retaining screws (m)
    pub screw_spacing: f64,
    /// Fraction of the target safety factor still rated acceptable
    pub acceptable_fraction: f64,
}

impl Default for StructuralConstants {
    fn default() -> Self {
        StructuralConstants {
            screw_spacing: 0.025,
            acceptable_fraction: 0.8,
        }
    }
}

/// Input parameters for the case, bulkhead, screws and nozzle.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "76 mm aluminium case",
///   "case_thickness": 0.003175,
///   "case_outer_diameter": 0.0762,
///   "max_pressure": 7000000.0,
///   "case_yield_strength": 150000000.0,
///   "target_safety_factor": 2.0,
///   "bulkhead_yield_strength": 205000000.0,
///   "bulkhead_radial_thickness": 0.007,
///   "screw_diameter": 0.00903,
///   "screw_hole_diameter": 0.01,
///   "screw_shear_strength": 207000000.0,
///   "throat_diameter": 0.0127,
///   "expansion_ratio": 6.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralConfig {
    /// User label for this calculation
    #[serde(default)]
    pub label: String,

    /// Case wall thickness (m)
    pub case_thickness: f64,

    /// Case outer diameter (m)
    pub case_outer_diameter: f64,

    /// Maximum expected chamber pressure (Pa)
    pub max_pressure: f64,

    /// Case material yield strength (Pa)
    pub case_yield_strength: f64,

    /// Required safety factor
    pub target_safety_factor: f64,

    /// Bulkhead material yield strength (Pa)
    pub bulkhead_yield_strength: f64,

    /// Bulkhead thickness available in the radial direction (m)
    pub bulkhead_radial_thickness: f64,

    /// Retaining screw diameter (m)
    pub screw_diameter: f64,

    /// Screw hole diameter in the case wall (m)
    pub screw_hole_diameter: f64,

    /// Screw material shear strength (Pa)
    pub screw_shear_strength: f64,

    /// Nozzle throat diameter (m)
    pub throat_diameter: f64,

    /// Nozzle area expansion ratio Ae/At
    pub expansion_ratio: f64,

    #[serde(default)]
    pub constants: StructuralConstants,
}

impl Default for StructuralConfig {
    /// 76 mm aluminium case at 7 MPa, M9 screws, 12.7 mm throat
    fn default() -> Self {
        StructuralConfig {
            label: String::new(),
            case_thickness: 0.003175,
            case_outer_diameter: 0.0762,
            max_pressure: 7.0e6,
            case_yield_strength: 150.0e6,
            target_safety_factor: 2.0,
            bulkhead_yield_strength: 205.0e6,
            bulkhead_radial_thickness: 0.007,
            screw_diameter: 0.00903,
            screw_hole_diameter: 0.01,
            screw_shear_strength: 207.0e6,
            throat_diameter: 0.0127,
            expansion_ratio: 6.0,
            constants: StructuralConstants::default(),
        }
    }
}

impl StructuralConfig {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("case_thickness", self.case_thickness)?;
        require_positive("case_outer_diameter", self.case_outer_diameter)?;
        if self.case_outer_diameter <= 2.0 * self.case_thickness {
            return Err(CalcError::invalid_input(
                "case_outer_diameter",
                self.case_outer_diameter.to_string(),
                "Outer diameter must exceed twice the wall thickness",
            ));
        }
        require_positive("max_pressure", self.max_pressure)?;
        require_positive("case_yield_strength", self.case_yield_strength)?;
        require_positive("target_safety_factor", self.target_safety_factor)?;
        require_positive("bulkhead_yield_strength", self.bulkhead_yield_strength)?;
        require_positive("bulkhead_radial_thickness", self.bulkhead_radial_thickness)?;
        require_positive("screw_diameter", self.screw_diameter)?;
        require_positive("screw_hole_diameter", self.screw_hole_diameter)?;
        if self.screw_hole_diameter < self.screw_diameter {
            return Err(CalcError::invalid_input(
                "screw_hole_diameter",
                self.screw_hole_diameter.to_string(),
                "Screw hole cannot be smaller than the screw",
            ));
        }
        require_positive("screw_shear_strength", self.screw_shear_strength)?;
        require_positive("throat_diameter", self.throat_diameter)?;
        require_positive("expansion_ratio", self.expansion_ratio)?;
        require_positive("constants.screw_spacing", self.constants.screw_spacing)?;
        require_positive("constants.acceptable_fraction", self.constants.acceptable_fraction)?;
        Ok(())
    }

    /// Case internal diameter (m)
    pub fn internal_diameter(&self) -> f64 {
        self.case_outer_diameter - 2.0 * self.case_thickness
    }
}

/// Results from the structural checks. Stresses in Pa, lengths in m.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralResult {
    // Case
    pub internal_diameter: f64,
    /// Lamé hoop stress at the inner wall
    pub tangential_stress: f64,
    /// −P at the inner wall
    pub radial_stress: f64,
    /// Closed-end axial stress
    pub longitudinal_stress: f64,
    pub von_mises_stress: f64,
    /// Case yield / von Mises
    pub case_safety_factor: f64,
    pub case_status: CaseStatus,

    // Bulkhead
    /// Required flat bulkhead thickness
    pub bulkhead_thickness: f64,
    /// Whether the provided radial thickness covers the requirement
    pub bulkhead_adequate: bool,

    // Screws
    /// Pressure load on the bulkhead (N)
    pub bulkhead_force: f64,
    /// Screws around the circumference at the configured spacing
    pub screw_count: u32,
    /// Load per screw (N)
    pub force_per_screw: f64,
    pub screw_shear_stress: f64,
    /// Screw shear strength / shear stress
    pub screw_safety_factor: f64,
    /// Screw bearing on the case wall at the hole
    pub bearing_stress: f64,
    /// Case yield / bearing stress
    pub bearing_safety_factor: f64,

    // Nozzle
    /// m²
    pub throat_area: f64,
    /// m²
    pub exit_area: f64,
    pub exit_diameter: f64,
    pub expansion_ratio: f64,
}

/// Run all structural checks.
///
/// # Returns
///
/// * `Ok(StructuralResult)` - Stresses, status and sizing
/// * `Err(CalcError)` - If the wall is too thick for the diameter, the screw
///   hole is smaller than the screw, or an input is non-positive
pub fn calculate(config: &StructuralConfig) -> CalcResult<StructuralResult> {
    config.validate()?;

    let p = config.max_pressure;
    let internal_diameter = config.internal_diameter();
    let ri = internal_diameter / 2.0;
    let re = config.case_outer_diameter / 2.0;
    let ri2 = ri.powi(2);
    let re2 = re.powi(2);

    // Lamé at the bore
    let tangential_stress = p * (ri2 + re2) / (re2 - ri2);
    let radial_stress = -p;
    let longitudinal_stress = p * ri2 / (re2 - ri2);

    let von_mises_stress = (0.5
        * ((tangential_stress - radial_stress).powi(2)
            + (radial_stress - longitudinal_stress).powi(2)
            + (longitudinal_stress - tangential_stress).powi(2)))
    .sqrt();

    let case_safety_factor = config.case_yield_strength / von_mises_stress;
    let case_status = CaseStatus::classify(
        case_safety_factor,
        config.target_safety_factor,
        config.constants.acceptable_fraction,
    );

    let bulkhead_load = 3.0 * p * config.target_safety_factor / config.bulkhead_yield_strength;
    let bulkhead_thickness = (ri / 2.0) * bulkhead_load.sqrt();
    let bulkhead_adequate = config.bulkhead_radial_thickness >= bulkhead_thickness;

    let bulkhead_force = p * PI * ri2;
    let screw_count =
        (PI * internal_diameter / config.constants.screw_spacing).ceil().max(1.0) as u32;
    let force_per_screw = bulkhead_force / f64::from(screw_count);
    let screw_area = PI * (config.screw_diameter / 2.0).powi(2);
    let screw_shear_stress = force_per_screw / screw_area;
    let screw_safety_factor = config.screw_shear_strength / screw_shear_stress;

    let bearing_stress = force_per_screw / (config.screw_hole_diameter * config.case_thickness);
    let bearing_safety_factor = config.case_yield_strength / bearing_stress;

    let throat_area = PI * (config.throat_diameter / 2.0).powi(2);
    let exit_area = throat_area * config.expansion_ratio;
    let exit_diameter = (4.0 * exit_area / PI).sqrt();

    Ok(StructuralResult {
        internal_diameter,
        tangential_stress,
        radial_stress,
        longitudinal_stress,
        von_mises_stress,
        case_safety_factor,
        case_status,
        bulkhead_thickness,
        bulkhead_adequate,
        bulkhead_force,
        screw_count,
        force_per_screw,
        screw_shear_stress,
        screw_safety_factor,
        bearing_stress,
        bearing_safety_factor,
        throat_area,
        exit_area,
        exit_diameter,
        expansion_ratio: config.expansion_ratio,
    })
}

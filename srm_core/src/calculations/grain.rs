//! # Grain Ballistics
//!
//! Computes the initial burning surface of a propellant grain, balances
//! chamber pressure against choked nozzle flow, and derives burn rate, mass
//! flow, thrust, burn time and web thickness.
//!
//! ## Assumptions
//!
//! - Closed-form initial burning area per geometry (no regression surface)
//! - Saint-Robert burn law `r = a·P^n` with P in MPa
//! - Fixed combustion gas properties (KNSB-like: k = 1.133, T = 1600 K,
//!   M = 0.042 kg/mol)
//! - Fixed thrust coefficient Cf = 1.5
//! - Segment count multiplies BATES grains only; the other geometries are a
//!   single grain of the given length
//!
//! ## Example
//!
//! ```rust
//! use srm_core::calculations::grain::{calculate, GrainConfig, GrainGeometry};
//!
//! let config = GrainConfig::new(
//!     GrainGeometry::Bates,
//!     0.0762,
//!     0.0254,
//!     0.1,
//!     4,
//!     1800.0,
//!     0.00826,
//!     0.319,
//!     0.0127,
//! );
//! let result = calculate(&config).unwrap();
//!
//! assert!(result.pressure_solve.converged);
//! println!(
//!     "Pc = {:.2} MPa, F = {:.0} N, class {}",
//!     result.chamber_pressure / 1e6,
//!     result.thrust,
//!     result.impulse_class()
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

use super::chamber_pressure::{self, MassBalance, PressurePolicy, PressureSolution};
use crate::constants::{GRAVITY, PA_PER_MPA, UNIVERSAL_GAS_CONSTANT};
use crate::errors::{require_positive, CalcError, CalcResult};

/// Grain cross-section geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrainGeometry {
    /// Cylindrical segments with a round core; core and segment ends burn
    Bates,
    /// Hollow cylinder burning on every surface
    HollowCylinder,
    /// Star-shaped core (5 points)
    Star,
    /// Round core with radial fin slots
    Finocyl,
}

impl GrainGeometry {
    /// All geometries for UI selection
    pub const ALL: [GrainGeometry; 4] = [
        GrainGeometry::Bates,
        GrainGeometry::HollowCylinder,
        GrainGeometry::Star,
        GrainGeometry::Finocyl,
    ];

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            GrainGeometry::Bates => "BATES",
            GrainGeometry::HollowCylinder => "Hollow cylinder",
            GrainGeometry::Star => "Star",
            GrainGeometry::Finocyl => "Finocyl",
        }
    }

    /// Short description of the burn profile
    pub fn description(&self) -> &'static str {
        match self {
            GrainGeometry::Bates => {
                "Multiple cylindrical segments with a central core. Neutral to progressive burn."
            }
            GrainGeometry::HollowCylinder => "Simple hollow cylinder. Burns on all surfaces.",
            GrainGeometry::Star => "Star-shaped core. Progressive burn with high initial thrust.",
            GrainGeometry::Finocyl => {
                "Cylindrical core with radial fins. Controlled progressive burn."
            }
        }
    }
}

/// Combustion and calibration constants for grain ballistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrainConstants {
    /// Ratio of specific heats k
    pub heat_capacity_ratio: f64,
    /// Chamber temperature (K)
    pub chamber_temperature: f64,
    /// Molar mass of combustion products (kg/mol)
    pub molar_mass: f64,
    /// Thrust coefficient Cf
    pub thrust_coefficient: f64,
    /// Star core area multiplier over a round core
    pub star_area_multiplier: f64,
    /// Number of finocyl fin slots
    pub finocyl_fin_count: u32,
    /// Finocyl slot depth as a fraction of the web
    pub finocyl_fin_depth_fraction: f64,
    /// Finocyl slot width (m), used for propellant volume
    pub finocyl_fin_width: f64,
    /// Gravitational acceleration for delivered Isp (m/s²)
    pub gravity: f64,
}

impl Default for GrainConstants {
    fn default() -> Self {
        GrainConstants {
            heat_capacity_ratio: 1.133,
            chamber_temperature: 1600.0,
            molar_mass: 0.042,
            thrust_coefficient: 1.5,
            star_area_multiplier: 2.5,
            finocyl_fin_count: 6,
            finocyl_fin_depth_fraction: 0.7,
            finocyl_fin_width: 0.005,
            gravity: GRAVITY,
        }
    }
}

impl GrainConstants {
    /// Constants of the legacy tool, which used `R = 8314 / 0.042` J/(kg·K).
    ///
    /// Same as [`Default`] but with a molar mass of 4.2e-5 kg/mol. Together
    /// with [`PressurePolicy::legacy`] this reproduces the legacy chamber
    /// pressures.
    pub fn legacy() -> Self {
        GrainConstants {
            molar_mass: 4.2e-5,
            ..GrainConstants::default()
        }
    }

    /// Specific gas constant R = R_u / M (J/(kg·K))
    pub fn gas_constant(&self) -> f64 {
        UNIVERSAL_GAS_CONSTANT / self.molar_mass
    }

    /// Choked mass flux per unit throat area per unit pressure (kg/s/m²/Pa)
    ///
    /// sqrt(k/(R·T))·(2/(k+1))^((k+1)/(2(k-1)))
    pub fn choked_flow_factor(&self) -> f64 {
        let k = self.heat_capacity_ratio;
        (k / (self.gas_constant() * self.chamber_temperature)).sqrt()
            * (2.0 / (k + 1.0)).powf((k + 1.0) / (2.0 * (k - 1.0)))
    }

    fn validate(&self) -> CalcResult<()> {
        if !self.heat_capacity_ratio.is_finite() || self.heat_capacity_ratio <= 1.0 {
            return Err(CalcError::invalid_input(
                "constants.heat_capacity_ratio",
                self.heat_capacity_ratio.to_string(),
                "Ratio of specific heats must be greater than 1",
            ));
        }
        require_positive("constants.chamber_temperature", self.chamber_temperature)?;
        require_positive("constants.molar_mass", self.molar_mass)?;
        require_positive("constants.thrust_coefficient", self.thrust_coefficient)?;
        require_positive("constants.star_area_multiplier", self.star_area_multiplier)?;
        require_positive("constants.gravity", self.gravity)?;
        if !(0.0..1.0).contains(&self.finocyl_fin_depth_fraction) {
            return Err(CalcError::invalid_input(
                "constants.finocyl_fin_depth_fraction",
                self.finocyl_fin_depth_fraction.to_string(),
                "Fin depth fraction must be in [0, 1)",
            ));
        }
        if !self.finocyl_fin_width.is_finite() || self.finocyl_fin_width < 0.0 {
            return Err(CalcError::invalid_input(
                "constants.finocyl_fin_width",
                self.finocyl_fin_width.to_string(),
                "Fin width cannot be negative",
            ));
        }
        Ok(())
    }
}

/// Input parameters for a propellant grain and its nozzle throat.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "4-segment BATES",
///   "geometry": "bates",
///   "outer_diameter": 0.0762,
///   "core_diameter": 0.0254,
///   "length": 0.1,
///   "segment_count": 4,
///   "propellant_density": 1800.0,
///   "burn_rate_coefficient": 0.00826,
///   "pressure_exponent": 0.319,
///   "throat_diameter": 0.0127
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrainConfig {
    /// User label for this calculation
    #[serde(default)]
    pub label: String,

    /// Grain geometry
    pub geometry: GrainGeometry,

    /// Grain outer diameter (m)
    pub outer_diameter: f64,

    /// Core diameter (m)
    pub core_diameter: f64,

    /// Grain length, per segment for BATES (m)
    pub length: f64,

    /// Number of BATES segments
    pub segment_count: u32,

    /// Propellant density (kg/m³)
    pub propellant_density: f64,

    /// Burn rate coefficient a (m/s/MPa^n)
    pub burn_rate_coefficient: f64,

    /// Pressure exponent n
    pub pressure_exponent: f64,

    /// Nozzle throat diameter (m)
    pub throat_diameter: f64,

    /// Combustion and calibration constants
    #[serde(default)]
    pub constants: GrainConstants,

    /// Chamber pressure root-finding policy
    #[serde(default)]
    pub pressure_policy: PressurePolicy,
}

impl GrainConfig {
    /// Create a config with default constants and pressure policy.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        geometry: GrainGeometry,
        outer_diameter: f64,
        core_diameter: f64,
        length: f64,
        segment_count: u32,
        propellant_density: f64,
        burn_rate_coefficient: f64,
        pressure_exponent: f64,
        throat_diameter: f64,
    ) -> Self {
        GrainConfig {
            label: String::new(),
            geometry,
            outer_diameter,
            core_diameter,
            length,
            segment_count,
            propellant_density,
            burn_rate_coefficient,
            pressure_exponent,
            throat_diameter,
            constants: GrainConstants::default(),
            pressure_policy: PressurePolicy::default(),
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("outer_diameter", self.outer_diameter)?;
        require_positive("core_diameter", self.core_diameter)?;
        if self.core_diameter >= self.outer_diameter {
            return Err(CalcError::invalid_input(
                "core_diameter",
                self.core_diameter.to_string(),
                "Core diameter must be smaller than outer diameter",
            ));
        }
        require_positive("length", self.length)?;
        if self.segment_count == 0 {
            return Err(CalcError::invalid_input(
                "segment_count",
                "0",
                "At least one segment is required",
            ));
        }
        require_positive("propellant_density", self.propellant_density)?;
        require_positive("burn_rate_coefficient", self.burn_rate_coefficient)?;
        if !(0.0..1.0).contains(&self.pressure_exponent) {
            return Err(CalcError::invalid_input(
                "pressure_exponent",
                self.pressure_exponent.to_string(),
                "Pressure exponent must be in [0, 1) for a stable chamber pressure",
            ));
        }
        require_positive("throat_diameter", self.throat_diameter)?;
        self.constants.validate()
    }

    /// Web thickness (D_outer − D_core)/2 (m)
    pub fn web_thickness(&self) -> f64 {
        (self.outer_diameter - self.core_diameter) / 2.0
    }

    /// Nozzle throat area (m²)
    pub fn throat_area(&self) -> f64 {
        PI * (self.throat_diameter / 2.0).powi(2)
    }

    /// Depth of one finocyl fin slot (m)
    fn fin_depth(&self) -> f64 {
        self.web_thickness() * self.constants.finocyl_fin_depth_fraction
    }

    /// Initial burning surface area (m²)
    pub fn burning_area(&self) -> f64 {
        let r_outer = self.outer_diameter / 2.0;
        let r_core = self.core_diameter / 2.0;
        let length = self.length;
        let core = 2.0 * PI * r_core * length;
        let annulus = PI * (r_outer.powi(2) - r_core.powi(2));

        match self.geometry {
            GrainGeometry::Bates => {
                let segments = f64::from(self.segment_count);
                core * segments + annulus * 2.0 * segments
            }
            GrainGeometry::HollowCylinder => {
                let outer = 2.0 * PI * r_outer * length;
                core + outer + 2.0 * annulus
            }
            GrainGeometry::Star => core * self.constants.star_area_multiplier,
            GrainGeometry::Finocyl => {
                let fins = f64::from(self.constants.finocyl_fin_count);
                core + fins * 2.0 * self.fin_depth() * length
            }
        }
    }

    /// Propellant volume (m³)
    ///
    /// The star core is treated as round here, so this is an upper bound.
    pub fn propellant_volume(&self) -> f64 {
        let r_outer = self.outer_diameter / 2.0;
        let r_core = self.core_diameter / 2.0;
        let annulus_volume = PI * (r_outer.powi(2) - r_core.powi(2)) * self.length;

        match self.geometry {
            GrainGeometry::Bates => annulus_volume * f64::from(self.segment_count),
            GrainGeometry::HollowCylinder | GrainGeometry::Star => annulus_volume,
            GrainGeometry::Finocyl => {
                let slots = f64::from(self.constants.finocyl_fin_count)
                    * self.constants.finocyl_fin_width
                    * self.fin_depth()
                    * self.length;
                annulus_volume - slots
            }
        }
    }
}

/// Motor impulse class (letter), bucketed by total impulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ImpulseClass {
    /// Below 160 N·s
    H,
    /// 160–320 N·s
    I,
    /// 320–640 N·s
    J,
    /// 640–1280 N·s
    K,
    /// 1280 N·s and above
    #[serde(rename = "L+")]
    LPlus,
}

impl ImpulseClass {
    /// Classify a total impulse in N·s.
    pub fn from_total_impulse(total_impulse: f64) -> Self {
        if total_impulse < 160.0 {
            ImpulseClass::H
        } else if total_impulse < 320.0 {
            ImpulseClass::I
        } else if total_impulse < 640.0 {
            ImpulseClass::J
        } else if total_impulse < 1280.0 {
            ImpulseClass::K
        } else {
            ImpulseClass::LPlus
        }
    }

    /// Class letter
    pub fn letter(&self) -> &'static str {
        match self {
            ImpulseClass::H => "H",
            ImpulseClass::I => "I",
            ImpulseClass::J => "J",
            ImpulseClass::K => "K",
            ImpulseClass::LPlus => "L+",
        }
    }
}

impl fmt::Display for ImpulseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// Results from grain ballistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrainResult {
    /// Initial burning area (m²)
    pub burning_area: f64,
    /// Burn rate at chamber pressure (m/s)
    pub burn_rate: f64,
    /// Propellant mass generation rate (kg/s)
    pub mass_flow_rate: f64,
    /// Chamber pressure (Pa)
    pub chamber_pressure: f64,
    /// Thrust (N)
    pub thrust: f64,
    /// Burn time (s)
    pub burn_time: f64,
    /// Web thickness (m)
    pub web_thickness: f64,
    /// Throat area (m²)
    pub throat_area: f64,
    /// Kn = burning area / throat area
    pub klemmung: f64,
    /// Propellant mass (kg)
    pub propellant_mass: f64,
    /// Delivered specific impulse (s)
    pub delivered_isp: f64,
    /// Pressure solve diagnostics
    pub pressure_solve: PressureSolution,
}

impl GrainResult {
    /// Total impulse thrust × burn time (N·s)
    pub fn total_impulse(&self) -> f64 {
        self.thrust * self.burn_time
    }

    /// Impulse class letter for the total impulse
    pub fn impulse_class(&self) -> ImpulseClass {
        ImpulseClass::from_total_impulse(self.total_impulse())
    }
}

/// Calculate grain ballistics.
///
/// # Returns
///
/// * `Ok(GrainResult)` - Ballistics at the equilibrium chamber pressure
/// * `Err(CalcError)` - If the geometry is invalid (core ≥ outer diameter) or
///   an input is non-finite/non-positive
pub fn calculate(config: &GrainConfig) -> CalcResult<GrainResult> {
    config.validate()?;

    let c = &config.constants;
    let burning_area = config.burning_area();
    let throat_area = config.throat_area();

    let balance = MassBalance {
        generation_coefficient: config.propellant_density
            * burning_area
            * config.burn_rate_coefficient,
        pressure_exponent: config.pressure_exponent,
        discharge_coefficient: throat_area * c.choked_flow_factor(),
    };
    let pressure_solve = chamber_pressure::solve(&balance, &config.pressure_policy)?;
    let chamber_pressure = pressure_solve.pressure;

    let pressure_mpa = chamber_pressure / PA_PER_MPA;
    let burn_rate = config.burn_rate_coefficient * pressure_mpa.powf(config.pressure_exponent);
    let mass_flow_rate = config.propellant_density * burning_area * burn_rate;
    if !(mass_flow_rate > 0.0 && mass_flow_rate.is_finite()) {
        return Err(CalcError::invalid_input(
            "burn_rate_coefficient",
            config.burn_rate_coefficient.to_string(),
            "Mass flow rate vanished at the solved chamber pressure",
        ));
    }

    let thrust = c.thrust_coefficient * throat_area * chamber_pressure;
    let web_thickness = config.web_thickness();
    let burn_time = web_thickness / burn_rate;

    let propellant_volume = config.propellant_volume();
    if propellant_volume <= 0.0 {
        return Err(CalcError::invalid_input(
            "constants.finocyl_fin_width",
            c.finocyl_fin_width.to_string(),
            "Fin slots remove all of the propellant",
        ));
    }

    Ok(GrainResult {
        burning_area,
        burn_rate,
        mass_flow_rate,
        chamber_pressure,
        thrust,
        burn_time,
        web_thickness,
        throat_area,
        klemmung: burning_area / throat_area,
        propellant_mass: propellant_volume * config.propellant_density,
        delivered_isp: thrust / (mass_flow_rate * c.gravity),
        pressure_solve,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// 4-segment KNSB BATES grain with a 12.7 mm throat
    fn bates() -> GrainConfig {
        GrainConfig::new(
            GrainGeometry::Bates,
            0.0762,
            0.0254,
            0.1,
            4,
            1800.0,
            0.00826,
            0.319,
            0.0127,
        )
    }

    fn with_geometry(geometry: GrainGeometry) -> GrainConfig {
        GrainConfig { geometry, ..bates() }
    }

    #[test]
    fn test_bates_burning_area() {
        // core: 2π·0.0127·0.1·4 = 0.031919; ends: π(0.0381² − 0.0127²)·2·4 = 0.032429
        assert_relative_eq!(bates().burning_area(), 0.064348, epsilon = 1e-6);
    }

    #[test]
    fn test_geometry_burning_areas() {
        let area = |geometry| with_geometry(geometry).burning_area();
        assert_relative_eq!(area(GrainGeometry::HollowCylinder), 0.040026, epsilon = 1e-6);
        assert_relative_eq!(area(GrainGeometry::Star), 0.019949, epsilon = 1e-6);
        assert_relative_eq!(area(GrainGeometry::Finocyl), 0.029316, epsilon = 1e-6);
    }

    #[test]
    fn test_bates_pressure_converges() {
        let result = calculate(&bates()).unwrap();

        let solve = result.pressure_solve;
        assert!(solve.converged);
        assert!(solve.iterations <= 20);
        assert!(solve.relative_mismatch.abs() < 0.01);
        assert!(result.chamber_pressure > 0.0);
        // Exact equilibrium is 16.30 MPa
        assert_relative_eq!(result.chamber_pressure, 16.30e6, max_relative = 0.02);
    }

    #[test]
    fn test_bates_performance() {
        let result = calculate(&bates()).unwrap();

        assert_relative_eq!(result.web_thickness, 0.0254, epsilon = 1e-12);
        assert_relative_eq!(result.klemmung, 507.97, epsilon = 0.01);
        assert_relative_eq!(result.thrust, 1.5 * result.throat_area * result.chamber_pressure);
        assert_relative_eq!(result.burn_time, result.web_thickness / result.burn_rate);
        // π(0.0381² − 0.0127²)·0.1·4·1800 kg/m³
        assert_relative_eq!(result.propellant_mass, 2.9187, epsilon = 1e-3);
        assert!(result.delivered_isp > 0.0);
        assert_eq!(result.impulse_class(), ImpulseClass::LPlus);
    }

    #[test]
    fn test_all_geometries_have_positive_web_and_burn_time() {
        for geometry in GrainGeometry::ALL {
            for core in [0.005, 0.0254, 0.05, 0.07] {
                let config = GrainConfig {
                    geometry,
                    core_diameter: core,
                    ..bates()
                };
                let result = calculate(&config).unwrap();
                assert!(result.web_thickness > 0.0, "{geometry:?} core {core}");
                assert!(result.burn_time > 0.0, "{geometry:?} core {core}");
                assert!(result.burn_time.is_finite());
            }
        }
    }

    #[test]
    fn test_core_not_smaller_than_outer() {
        let mut config = bates();
        config.core_diameter = config.outer_diameter;
        let err = calculate(&config).unwrap_err();
        assert_eq!(err.field(), Some("core_diameter"));
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_invalid_segments_and_exponent() {
        let mut config = bates();
        config.segment_count = 0;
        assert_eq!(calculate(&config).unwrap_err().field(), Some("segment_count"));

        let mut config = bates();
        config.pressure_exponent = 1.0;
        assert_eq!(calculate(&config).unwrap_err().field(), Some("pressure_exponent"));

        let mut config = bates();
        config.throat_diameter = 0.0;
        assert_eq!(calculate(&config).unwrap_err().field(), Some("throat_diameter"));
    }

    #[test]
    fn test_legacy_policy_reports_non_convergence() {
        let mut config = bates();
        config.pressure_policy = PressurePolicy::legacy();
        let result = calculate(&config).unwrap();

        assert_eq!(result.pressure_solve.iterations, 20);
        assert!(!result.pressure_solve.converged);
        assert!(result.chamber_pressure > 5.0e6);
    }

    #[test]
    fn test_legacy_constants_reproduce_legacy_pressure() {
        let mut config = bates();
        config.constants = GrainConstants::legacy();
        config.pressure_policy = PressurePolicy::legacy();
        assert_relative_eq!(config.constants.gas_constant(), 8314.0 / 0.042, max_relative = 1e-4);

        let result = calculate(&config).unwrap();
        assert_relative_eq!(result.chamber_pressure, 8.42e6, max_relative = 0.01);
        assert_eq!(result.pressure_solve.iterations, 20);
        assert!(!result.pressure_solve.converged);
    }

    #[test]
    fn test_low_pressure_grain_converges() {
        // 1 mm star core behind a 50 mm throat settles near 450 Pa
        let config = GrainConfig {
            core_diameter: 0.001,
            throat_diameter: 0.05,
            ..with_geometry(GrainGeometry::Star)
        };
        let result = calculate(&config).unwrap();

        assert!(result.pressure_solve.converged);
        assert!(result.chamber_pressure < 1.0e4);
        assert_relative_eq!(result.chamber_pressure, 451.1, max_relative = 0.02);
    }

    #[test]
    fn test_geometry_labels() {
        for geometry in GrainGeometry::ALL {
            assert!(!geometry.display_name().is_empty());
            assert!(!geometry.description().is_empty());
        }
        assert_eq!(GrainGeometry::Bates.display_name(), "BATES");
    }

    #[test]
    fn test_segments_scale_bates_only() {
        let one = GrainConfig { segment_count: 1, ..bates() };
        assert_relative_eq!(bates().burning_area(), 4.0 * one.burning_area(), epsilon = 1e-12);

        let star = with_geometry(GrainGeometry::Star);
        let star_one = GrainConfig { segment_count: 1, ..star.clone() };
        assert_eq!(star.burning_area(), star_one.burning_area());
    }

    #[test]
    fn test_impulse_class_thresholds() {
        assert_eq!(ImpulseClass::from_total_impulse(159.9), ImpulseClass::H);
        assert_eq!(ImpulseClass::from_total_impulse(160.0), ImpulseClass::I);
        assert_eq!(ImpulseClass::from_total_impulse(320.0), ImpulseClass::J);
        assert_eq!(ImpulseClass::from_total_impulse(639.9), ImpulseClass::J);
        assert_eq!(ImpulseClass::from_total_impulse(640.0), ImpulseClass::K);
        assert_eq!(ImpulseClass::from_total_impulse(1280.0), ImpulseClass::LPlus);
        assert_eq!(ImpulseClass::LPlus.to_string(), "L+");
    }

    #[test]
    fn test_finocyl_slots_reduce_propellant() {
        let finocyl = with_geometry(GrainGeometry::Finocyl);
        let hollow = with_geometry(GrainGeometry::HollowCylinder);
        assert!(finocyl.propellant_volume() < hollow.propellant_volume());
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(calculate(&bates()).unwrap(), calculate(&bates()).unwrap());
    }

    #[test]
    fn test_serialization() {
        let json = r#"{
            "geometry": "hollow_cylinder",
            "outer_diameter": 0.0762,
            "core_diameter": 0.0254,
            "length": 0.1,
            "segment_count": 1,
            "propellant_density": 1800.0,
            "burn_rate_coefficient": 0.00826,
            "pressure_exponent": 0.319,
            "throat_diameter": 0.0127
        }"#;
        let config: GrainConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.geometry, GrainGeometry::HollowCylinder);
        assert_eq!(config.pressure_policy, PressurePolicy::default());

        let result = calculate(&config).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("chamber_pressure"));
        assert!(json.contains("pressure_solve"));
    }
}

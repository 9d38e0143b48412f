//! # Rocket Aerodynamics and Flight Estimate
//!
//! Barrowman center-of-pressure and stability margin, component drag
//! build-up, and a closed-form two-phase (boost + coast) vertical trajectory.
//!
//! ## Assumptions
//!
//! - Subsonic, small angle of attack, rigid body
//! - Barrowman nose CP at a fixed fraction of nose length; body tube carries
//!   no normal force (no boat tail)
//! - Trapezoidal fins; [`FinModel::Classic`] (default) places the fin root
//!   leading edge at the aft end of the body and ignores sweep,
//!   [`FinModel::Swept`] mounts the fins flush with the aft end and accounts
//!   for sweep and fin-body interference
//! - Constant thrust, constant drag coefficient, constant air density
//! - Mass drops from dry + propellant to dry at burnout
//!
//! ## Example
//!
//! ```rust
//! use srm_core::calculations::aerodynamics::{calculate, AeroConfig, StabilityStatus};
//!
//! let config = AeroConfig {
//!     center_of_gravity: 0.76,
//!     ..AeroConfig::default()
//! };
//! let result = calculate(&config).unwrap();
//!
//! assert_eq!(result.stability_status, StabilityStatus::Stable);
//! println!("margin {:.2} cal, apogee {:.0} m", result.stability_margin, result.apogee);
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, LN_2, PI};

use crate::constants::{AIR_DENSITY_SEA_LEVEL, GRAVITY};
use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};

/// Nose cone profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoseShape {
    /// Straight cone
    Conical,
    /// Tangent ogive
    Ogive,
    /// Parabolic series
    Parabolic,
    /// Half ellipsoid
    Elliptical,
}

impl NoseShape {
    /// All nose shapes for UI selection
    pub const ALL: [NoseShape; 4] = [
        NoseShape::Conical,
        NoseShape::Ogive,
        NoseShape::Parabolic,
        NoseShape::Elliptical,
    ];

    /// Empirical nose drag coefficient
    pub fn drag_coefficient(&self) -> f64 {
        match self {
            NoseShape::Conical => 0.6,
            NoseShape::Ogive => 0.5,
            NoseShape::Parabolic => 0.45,
            NoseShape::Elliptical => 0.4,
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            NoseShape::Conical => "Conical",
            NoseShape::Ogive => "Ogive",
            NoseShape::Parabolic => "Parabolic",
            NoseShape::Elliptical => "Elliptical",
        }
    }
}

/// Static stability verdict from the margin in calibers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StabilityStatus {
    /// Margin in [1, 2] calibers
    Stable,
    /// Margin in (0.5, 3) but outside [1, 2]
    Marginal,
    /// Everything else, including over-stable
    Unstable,
}

impl StabilityStatus {
    /// Classify a stability margin in calibers. Both ends of [1, 2] are stable.
    pub fn from_margin(margin: f64) -> Self {
        if (1.0..=2.0).contains(&margin) {
            StabilityStatus::Stable
        } else if margin > 0.5 && margin < 3.0 {
            StabilityStatus::Marginal
        } else {
            StabilityStatus::Unstable
        }
    }

    /// True only for [`StabilityStatus::Stable`]
    pub fn is_stable(&self) -> bool {
        matches!(self, StabilityStatus::Stable)
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            StabilityStatus::Stable => "Stable",
            StabilityStatus::Marginal => "Marginal",
            StabilityStatus::Unstable => "Unstable",
        }
    }
}

/// Suggested nose profile for the predicted apogee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoseRecommendation {
    /// Lowest drag, for high flights
    VonKarman,
    Ogive,
    /// Simplest to build, for low flights
    Conical,
}

impl NoseRecommendation {
    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            NoseRecommendation::VonKarman => "Von Kármán (low drag)",
            NoseRecommendation::Ogive => "Ogive",
            NoseRecommendation::Conical => "Conical",
        }
    }
}

/// Barrowman fin-set model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinModel {
    /// Fin root leading edge at the aft end of the body, sweep ignored:
    ///
    /// ```text
    /// X_f = L_nose + L_body + (C_r/3)(C_r+2C_t)/(C_r+C_t)
    ///       + (1/6)[(C_r+C_t) − C_r·C_t/(C_r+C_t)]
    /// CNα = 4N(S/D)² / (1 + sqrt(1 + (2C_r/(C_r+C_t))²))
    /// ```
    #[default]
    Classic,
    /// Fins flush with the aft end, leading-edge sweep `X_R = S·tan(sweep)`,
    /// mid-chord length `L_f` and interference `K_fb = 1 + R/(S+R)`.
    Swept,
}

/// Empirical coefficients and thresholds for the aero estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AeroConstants {
    /// Nose CP position as a fraction of nose length
    pub nose_cp_fraction: f64,
    /// Nose normal-force coefficient slope CNα
    pub nose_normal_force_slope: f64,
    /// Fin CP and CNα model
    pub fin_model: FinModel,
    /// Body skin-friction drag coefficient
    pub body_friction_drag: f64,
    /// Body base drag coefficient
    pub body_base_drag: f64,
    /// Fin drag per unit of fin-to-reference area ratio
    pub fin_drag_factor: f64,
    /// Air density (kg/m³)
    pub air_density: f64,
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Apogee above which a Von Kármán nose is suggested (m)
    pub high_apogee: f64,
    /// Apogee below which a conical nose is suggested (m)
    pub low_apogee: f64,
    /// Recommended fin span per body diameter
    pub fin_span_factor: f64,
    /// Recommended area per fin per body diameter squared
    pub fin_area_factor: f64,
}

impl Default for AeroConstants {
    fn default() -> Self {
        AeroConstants {
            nose_cp_fraction: 0.466,
            nose_normal_force_slope: 2.0,
            fin_model: FinModel::Classic,
            body_friction_drag: 0.03,
            body_base_drag: 0.12,
            fin_drag_factor: 0.02,
            air_density: AIR_DENSITY_SEA_LEVEL,
            gravity: GRAVITY,
            high_apogee: 2000.0,
            low_apogee: 500.0,
            fin_span_factor: 1.3,
            fin_area_factor: 0.15,
        }
    }
}

/// Input parameters for airframe, fins and motor.
///
/// Positions are measured from the nose tip. Lengths in m, masses in kg,
/// sweep angle in radians.
///
/// ## JSON Example
///
/// ```json
/// {
///   "body_diameter": 0.0762,
///   "body_length": 0.8,
///   "nose_length": 0.2,
///   "nose_shape": "ogive",
///   "dry_mass": 1.5,
///   "propellant_mass": 0.5,
///   "center_of_gravity": 0.45,
///   "fin_count": 3,
///   "fin_root_chord": 0.12,
///   "fin_tip_chord": 0.06,
///   "fin_span": 0.1,
///   "fin_sweep_angle": 0.5236,
///   "average_thrust": 100.0,
///   "burn_time": 2.5
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AeroConfig {
    /// User label for this calculation
    #[serde(default)]
    pub label: String,

    /// Body diameter, also the reference length for the margin
    pub body_diameter: f64,
    /// Body tube length, excluding the nose
    pub body_length: f64,
    pub nose_length: f64,
    pub nose_shape: NoseShape,

    pub dry_mass: f64,
    pub propellant_mass: f64,
    /// Loaded center of gravity from the nose tip
    pub center_of_gravity: f64,

    pub fin_count: u32,
    pub fin_root_chord: f64,
    pub fin_tip_chord: f64,
    /// Semi-span, root to tip
    pub fin_span: f64,
    /// Leading-edge sweep angle (rad)
    pub fin_sweep_angle: f64,

    /// Average motor thrust (N)
    pub average_thrust: f64,
    /// Motor burn time (s)
    pub burn_time: f64,

    #[serde(default)]
    pub constants: AeroConstants,
}

impl Default for AeroConfig {
    fn default() -> Self {
        AeroConfig {
            label: String::new(),
            body_diameter: 0.0762,
            body_length: 0.8,
            nose_length: 0.2,
            nose_shape: NoseShape::Ogive,
            dry_mass: 1.5,
            propellant_mass: 0.5,
            center_of_gravity: 0.45,
            fin_count: 3,
            fin_root_chord: 0.12,
            fin_tip_chord: 0.06,
            fin_span: 0.1,
            fin_sweep_angle: 30f64.to_radians(),
            average_thrust: 100.0,
            burn_time: 2.5,
            constants: AeroConstants::default(),
        }
    }
}

impl AeroConfig {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("body_diameter", self.body_diameter)?;
        require_positive("body_length", self.body_length)?;
        require_positive("nose_length", self.nose_length)?;
        require_positive("dry_mass", self.dry_mass)?;
        require_non_negative("propellant_mass", self.propellant_mass)?;
        require_non_negative("center_of_gravity", self.center_of_gravity)?;
        require_non_negative("fin_root_chord", self.fin_root_chord)?;
        require_non_negative("fin_tip_chord", self.fin_tip_chord)?;
        require_non_negative("fin_span", self.fin_span)?;
        if !(0.0..FRAC_PI_2).contains(&self.fin_sweep_angle) {
            return Err(CalcError::invalid_input(
                "fin_sweep_angle",
                self.fin_sweep_angle.to_string(),
                "Sweep angle must be in [0°, 90°)",
            ));
        }
        require_positive("average_thrust", self.average_thrust)?;
        require_positive("burn_time", self.burn_time)?;

        let c = &self.constants;
        require_positive("constants.nose_cp_fraction", c.nose_cp_fraction)?;
        require_positive("constants.nose_normal_force_slope", c.nose_normal_force_slope)?;
        require_non_negative("constants.body_friction_drag", c.body_friction_drag)?;
        require_non_negative("constants.body_base_drag", c.body_base_drag)?;
        require_non_negative("constants.fin_drag_factor", c.fin_drag_factor)?;
        require_positive("constants.air_density", c.air_density)?;
        require_positive("constants.gravity", c.gravity)?;

        let weight = self.liftoff_mass() * c.gravity;
        if self.average_thrust <= weight {
            return Err(CalcError::invalid_input(
                "average_thrust",
                self.average_thrust.to_string(),
                format!("Thrust must exceed liftoff weight ({weight:.1} N)"),
            ));
        }
        Ok(())
    }

    /// Dry + propellant mass (kg)
    pub fn liftoff_mass(&self) -> f64 {
        self.dry_mass + self.propellant_mass
    }

    /// Reference (frontal) area π(D/2)² (m²)
    pub fn reference_area(&self) -> f64 {
        PI * (self.body_diameter / 2.0).powi(2)
    }

    /// Planform area of all fins (m²)
    pub fn total_fin_area(&self) -> f64 {
        let chord_sum = self.fin_root_chord + self.fin_tip_chord;
        f64::from(self.fin_count) * chord_sum / 2.0 * self.fin_span
    }

    fn has_fins(&self) -> bool {
        self.fin_count > 0 && self.total_fin_area() > 0.0
    }
}

/// Results from the aero estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AeroResult {
    // Stability
    /// Center of pressure from nose tip (m)
    pub center_of_pressure: f64,
    /// Center of gravity from nose tip (m)
    pub center_of_gravity: f64,
    /// (CP − CG) / D, calibers
    pub stability_margin: f64,
    /// Verdict for the margin
    pub stability_status: StabilityStatus,
    /// Fin set CP from nose tip (m); the aft end of the body when there are no fins
    pub fin_center_of_pressure: f64,
    /// Fin set CNα
    pub fin_normal_force_slope: f64,

    // Drag coefficients, referenced to the frontal area
    /// Nose Cd
    pub nose_drag: f64,
    /// Body skin friction + base drag
    pub body_drag: f64,
    /// Fin Cd
    pub fin_drag: f64,
    /// Sum of the above
    pub total_drag: f64,

    // Flight
    /// m
    pub apogee: f64,
    /// Burnout velocity (m/s)
    pub max_velocity: f64,
    /// s
    pub time_to_apogee: f64,
    /// m
    pub burnout_altitude: f64,
    /// s
    pub coast_time: f64,

    // Recommendations
    /// Nose profile suited to the apogee
    pub recommended_nose: NoseRecommendation,
    /// m
    pub recommended_fin_span: f64,
    /// Per fin (m²)
    pub recommended_fin_area: f64,
}

/// Barrowman CP and fin CNα.
struct Barrowman {
    center_of_pressure: f64,
    fin_center_of_pressure: f64,
    fin_normal_force_slope: f64,
}

fn barrowman(config: &AeroConfig) -> Barrowman {
    let c = &config.constants;
    let nose_cp = c.nose_cp_fraction * config.nose_length;
    let nose_cn = c.nose_normal_force_slope;
    let aft_end = config.nose_length + config.body_length;

    if !config.has_fins() {
        return Barrowman {
            center_of_pressure: nose_cp,
            fin_center_of_pressure: aft_end,
            fin_normal_force_slope: 0.0,
        };
    }

    let cr = config.fin_root_chord;
    let ct = config.fin_tip_chord;
    let span = config.fin_span;
    let chord_sum = cr + ct;
    let chord_term = (chord_sum - cr * ct / chord_sum) / 6.0;
    let span_term = 4.0 * f64::from(config.fin_count) * (span / config.body_diameter).powi(2);

    let (fin_cp, fin_cn) = match c.fin_model {
        FinModel::Classic => {
            let fin_cp = aft_end + cr / 3.0 * (cr + 2.0 * ct) / chord_sum + chord_term;
            let fin_cn = span_term / (1.0 + (1.0 + (2.0 * cr / chord_sum).powi(2)).sqrt());
            (fin_cp, fin_cn)
        }
        FinModel::Swept => {
            let sweep_distance = span * config.fin_sweep_angle.tan();
            let fin_cp = aft_end - cr
                + sweep_distance / 3.0 * (cr + 2.0 * ct) / chord_sum
                + chord_term;

            let mid_chord =
                (span.powi(2) + (sweep_distance + ct / 2.0 - cr / 2.0).powi(2)).sqrt();
            let radius = config.body_diameter / 2.0;
            let interference = 1.0 + radius / (span + radius);
            let fin_cn = interference * span_term
                / (1.0 + (1.0 + (2.0 * mid_chord / chord_sum).powi(2)).sqrt());
            (fin_cp, fin_cn)
        }
    };

    // Body tube contributes no normal force
    Barrowman {
        center_of_pressure: (nose_cn * nose_cp + fin_cn * fin_cp) / (nose_cn + fin_cn),
        fin_center_of_pressure: fin_cp,
        fin_normal_force_slope: fin_cn,
    }
}

/// ln(cosh x) without overflow for large x
fn ln_cosh(x: f64) -> f64 {
    let x = x.abs();
    x + (-2.0 * x).exp().ln_1p() - LN_2
}

/// Run the stability, drag and trajectory estimate.
///
/// # Returns
///
/// * `Ok(AeroResult)` - Stability, drag breakdown, flight estimate
/// * `Err(CalcError)` - If an input is invalid or thrust does not exceed
///   liftoff weight
pub fn calculate(config: &AeroConfig) -> CalcResult<AeroResult> {
    config.validate()?;
    let c = &config.constants;

    let barrowman = barrowman(config);
    let stability_margin =
        (barrowman.center_of_pressure - config.center_of_gravity) / config.body_diameter;

    let reference_area = config.reference_area();
    let nose_drag = config.nose_shape.drag_coefficient();
    let body_drag = c.body_friction_drag + c.body_base_drag;
    let fin_drag = if config.has_fins() {
        c.fin_drag_factor * config.total_fin_area() / reference_area
    } else {
        0.0
    };
    let total_drag = nose_drag + body_drag + fin_drag;

    let k = 0.5 * c.air_density * total_drag * reference_area;
    if k <= 0.0 {
        return Err(CalcError::invalid_input(
            "constants.body_friction_drag",
            total_drag.to_string(),
            "Total drag coefficient must be positive",
        ));
    }

    // Boost at liftoff mass
    let m0 = config.liftoff_mass();
    let net_force = config.average_thrust - m0 * c.gravity;
    let terminal = (net_force / k).sqrt();
    let x = k * terminal * config.burn_time / m0;
    let max_velocity = terminal * x.tanh();
    let burnout_altitude = m0 / k * ln_cosh(x);

    // Coast at dry mass
    let mf = config.dry_mass;
    let weight = mf * c.gravity;
    let coast_altitude = mf / (2.0 * k) * ((weight + k * max_velocity.powi(2)) / weight).ln();
    let coast_time =
        (mf / (c.gravity * k)).sqrt() * (max_velocity * (k / weight).sqrt()).atan();

    let apogee = burnout_altitude + coast_altitude;

    let recommended_nose = if apogee > c.high_apogee {
        NoseRecommendation::VonKarman
    } else if apogee < c.low_apogee {
        NoseRecommendation::Conical
    } else {
        NoseRecommendation::Ogive
    };

    Ok(AeroResult {
        center_of_pressure: barrowman.center_of_pressure,
        center_of_gravity: config.center_of_gravity,
        stability_margin,
        stability_status: StabilityStatus::from_margin(stability_margin),
        fin_center_of_pressure: barrowman.fin_center_of_pressure,
        fin_normal_force_slope: barrowman.fin_normal_force_slope,
        nose_drag,
        body_drag,
        fin_drag,
        total_drag,
        apogee,
        max_velocity,
        time_to_apogee: config.burn_time + coast_time,
        burnout_altitude,
        coast_time,
        recommended_nose,
        recommended_fin_span: c.fin_span_factor * config.body_diameter,
        recommended_fin_area: c.fin_area_factor * config.body_diameter.powi(2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn swept() -> AeroConfig {
        let mut config = AeroConfig::default();
        config.constants.fin_model = FinModel::Swept;
        config
    }

    #[test]
    fn test_default_stability() {
        let result = calculate(&AeroConfig::default()).unwrap();

        // Leading edge at 1.0 m: 1.0 + 0.04·(0.24/0.18) + (0.18 − 0.04)/6
        assert_relative_eq!(result.fin_center_of_pressure, 1.076667, max_relative = 1e-6);
        assert_relative_eq!(result.fin_normal_force_slope, 7.750016, max_relative = 1e-6);
        assert_relative_eq!(result.center_of_pressure, 0.874930, max_relative = 1e-5);
        assert_relative_eq!(result.stability_margin, 5.57651, max_relative = 1e-5);
        // Over-stable counts as unstable
        assert_eq!(result.stability_status, StabilityStatus::Unstable);
    }

    #[test]
    fn test_classic_model_ignores_sweep() {
        let straight = calculate(&AeroConfig {
            fin_sweep_angle: 0.0,
            ..AeroConfig::default()
        })
        .unwrap();
        let swept = calculate(&AeroConfig::default()).unwrap();
        assert_eq!(straight.center_of_pressure, swept.center_of_pressure);
    }

    #[test]
    fn test_swept_model_stability() {
        let result = calculate(&swept()).unwrap();

        assert_relative_eq!(result.fin_center_of_pressure, 0.928993, max_relative = 1e-5);
        assert_relative_eq!(result.fin_normal_force_slope, 10.43763, max_relative = 1e-5);
        assert_relative_eq!(result.center_of_pressure, 0.794596, max_relative = 1e-5);
        assert_relative_eq!(result.stability_margin, 4.52225, max_relative = 1e-5);

        let config = AeroConfig {
            center_of_gravity: 0.70,
            ..swept()
        };
        let result = calculate(&config).unwrap();
        assert_relative_eq!(result.stability_margin, 1.24141, max_relative = 1e-5);
        assert_eq!(result.stability_status, StabilityStatus::Stable);
    }

    #[test]
    fn test_cg_moves_margin() {
        let marginal = calculate(&AeroConfig {
            center_of_gravity: 0.70,
            ..AeroConfig::default()
        })
        .unwrap();
        assert_relative_eq!(marginal.stability_margin, 2.29567, max_relative = 1e-5);
        assert_eq!(marginal.stability_status, StabilityStatus::Marginal);

        let stable = calculate(&AeroConfig {
            center_of_gravity: 0.76,
            ..AeroConfig::default()
        })
        .unwrap();
        assert_relative_eq!(stable.stability_margin, 1.50827, max_relative = 1e-5);
        assert_eq!(stable.stability_status, StabilityStatus::Stable);
        assert_eq!(stable.stability_status.display_name(), "Stable");

        let unstable = calculate(&AeroConfig {
            center_of_gravity: 0.95,
            ..AeroConfig::default()
        })
        .unwrap();
        assert!(unstable.stability_margin < 0.0);
        assert_eq!(unstable.stability_status, StabilityStatus::Unstable);
    }

    #[test]
    fn test_margin_boundaries() {
        assert_eq!(StabilityStatus::from_margin(1.0), StabilityStatus::Stable);
        assert_eq!(StabilityStatus::from_margin(2.0), StabilityStatus::Stable);
        assert_eq!(StabilityStatus::from_margin(0.5), StabilityStatus::Unstable);
        assert_eq!(StabilityStatus::from_margin(0.75), StabilityStatus::Marginal);
        assert_eq!(StabilityStatus::from_margin(2.5), StabilityStatus::Marginal);
        assert_eq!(StabilityStatus::from_margin(3.0), StabilityStatus::Unstable);
    }

    #[test]
    fn test_margin_scale_invariant() {
        let base = AeroConfig::default();
        let scaled = AeroConfig {
            body_diameter: base.body_diameter * 2.0,
            body_length: base.body_length * 2.0,
            nose_length: base.nose_length * 2.0,
            center_of_gravity: base.center_of_gravity * 2.0,
            fin_root_chord: base.fin_root_chord * 2.0,
            fin_tip_chord: base.fin_tip_chord * 2.0,
            fin_span: base.fin_span * 2.0,
            ..base.clone()
        };

        let a = calculate(&base).unwrap();
        let b = calculate(&scaled).unwrap();
        assert_relative_eq!(a.stability_margin, b.stability_margin, max_relative = 1e-10);

        let a = calculate(&swept()).unwrap();
        let b = calculate(&AeroConfig {
            constants: swept().constants,
            ..scaled
        })
        .unwrap();
        assert_relative_eq!(a.stability_margin, b.stability_margin, max_relative = 1e-10);
    }

    #[test]
    fn test_drag_breakdown() {
        let result = calculate(&AeroConfig::default()).unwrap();

        assert_eq!(result.nose_drag, 0.5);
        assert_relative_eq!(result.body_drag, 0.15);
        assert_relative_eq!(result.fin_drag, 0.118412, max_relative = 1e-5);
        assert_relative_eq!(result.total_drag, 0.768412, max_relative = 1e-5);
    }

    #[test]
    fn test_nose_drag_coefficients() {
        let drags: Vec<f64> = NoseShape::ALL.iter().map(|n| n.drag_coefficient()).collect();
        assert_eq!(drags, vec![0.6, 0.5, 0.45, 0.4]);
    }

    #[test]
    fn test_trajectory() {
        let result = calculate(&AeroConfig::default()).unwrap();

        assert_relative_eq!(result.max_velocity, 92.496, max_relative = 1e-4);
        assert_relative_eq!(result.burnout_altitude, 120.455, max_relative = 1e-4);
        assert_relative_eq!(result.apogee, 405.53, max_relative = 1e-4);
        assert_relative_eq!(result.time_to_apogee, 9.631, max_relative = 1e-4);
        assert_relative_eq!(result.time_to_apogee, 2.5 + result.coast_time);
        assert_eq!(result.recommended_nose, NoseRecommendation::Conical);
    }

    #[test]
    fn test_long_burn_does_not_overflow() {
        let result = calculate(&AeroConfig {
            burn_time: 1000.0,
            ..AeroConfig::default()
        })
        .unwrap();
        assert!(result.apogee.is_finite());
        assert!(result.apogee > 0.0);
    }

    #[test]
    fn test_recommendations() {
        let result = calculate(&AeroConfig::default()).unwrap();
        assert_relative_eq!(result.recommended_fin_span, 1.3 * 0.0762);
        assert_relative_eq!(result.recommended_fin_area, 0.15 * 0.0762 * 0.0762);

        let mid = calculate(&AeroConfig {
            average_thrust: 400.0,
            ..AeroConfig::default()
        })
        .unwrap();
        assert_eq!(mid.recommended_nose, NoseRecommendation::Ogive);

        let high = calculate(&AeroConfig {
            average_thrust: 1000.0,
            ..AeroConfig::default()
        })
        .unwrap();
        assert!(high.apogee > 2000.0);
        assert_eq!(high.recommended_nose, NoseRecommendation::VonKarman);
        assert_eq!(high.recommended_nose.display_name(), "Von Kármán (low drag)");

        for shape in NoseShape::ALL {
            assert!(!shape.display_name().is_empty());
        }
    }

    #[test]
    fn test_zero_fins() {
        for mut config in [
            AeroConfig {
                fin_count: 0,
                ..AeroConfig::default()
            },
            AeroConfig {
                fin_span: 0.0,
                ..AeroConfig::default()
            },
            AeroConfig {
                fin_root_chord: 0.0,
                fin_tip_chord: 0.0,
                ..AeroConfig::default()
            },
        ] {
            for model in [FinModel::Classic, FinModel::Swept] {
                config.constants.fin_model = model;
                let result = calculate(&config).unwrap();
                assert_eq!(result.fin_normal_force_slope, 0.0);
                assert_eq!(result.fin_drag, 0.0);
                assert!(result.stability_margin.is_finite());
                assert_abs_diff_eq!(result.center_of_pressure, 0.466 * 0.2, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_thrust_must_exceed_weight() {
        let err = calculate(&AeroConfig {
            average_thrust: 19.6,
            ..AeroConfig::default()
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("average_thrust"));
    }

    #[test]
    fn test_invalid_inputs() {
        let err = calculate(&AeroConfig {
            body_diameter: 0.0,
            ..AeroConfig::default()
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("body_diameter"));

        let err = calculate(&AeroConfig {
            fin_sweep_angle: FRAC_PI_2,
            ..AeroConfig::default()
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("fin_sweep_angle"));
    }

    #[test]
    fn test_deterministic() {
        let config = AeroConfig::default();
        assert_eq!(calculate(&config).unwrap(), calculate(&config).unwrap());
    }

    #[test]
    fn test_parallel_sweep() {
        let cgs: Vec<f64> = (0..8).map(|i| 0.40 + 0.05 * i as f64).collect();
        let serial: Vec<f64> = cgs
            .iter()
            .map(|&cg| {
                calculate(&AeroConfig {
                    center_of_gravity: cg,
                    ..AeroConfig::default()
                })
                .unwrap()
                .stability_margin
            })
            .collect();

        let parallel: Vec<f64> = std::thread::scope(|s| {
            let handles: Vec<_> = cgs
                .iter()
                .map(|&cg| {
                    s.spawn(move || {
                        calculate(&AeroConfig {
                            center_of_gravity: cg,
                            ..AeroConfig::default()
                        })
                        .map(|r| r.stability_margin)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect()
        });

        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_serialization() {
        let json = r#"{
            "body_diameter": 0.0762,
            "body_length": 0.8,
            "nose_length": 0.2,
            "nose_shape": "elliptical",
            "dry_mass": 1.5,
            "propellant_mass": 0.5,
            "center_of_gravity": 0.7,
            "fin_count": 4,
            "fin_root_chord": 0.12,
            "fin_tip_chord": 0.06,
            "fin_span": 0.1,
            "fin_sweep_angle": 0.0,
            "average_thrust": 100.0,
            "burn_time": 2.5
        }"#;
        let config: AeroConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.nose_shape, NoseShape::Elliptical);
        assert_eq!(config.constants, AeroConstants::default());
        assert_eq!(config.constants.fin_model, FinModel::Classic);

        let json = r#"{ "fin_model": "swept" }"#;
        let constants: AeroConstants = serde_json::from_str(json).unwrap();
        assert_eq!(constants.fin_model, FinModel::Swept);
        assert_eq!(constants.nose_cp_fraction, 0.466);

        let result = calculate(&config).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("stability_status"));
    }
}

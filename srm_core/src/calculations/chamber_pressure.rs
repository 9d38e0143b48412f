//! # Chamber Pressure Solve
//!
//! Finds the chamber pressure at which the grain's mass generation rate
//! equals the choked mass flow through the nozzle throat:
//!
//! ```text
//! ṁ_gen(P)    = ρ·Ab·a·(P/1e6)^n          (Saint-Robert, P in MPa)
//! ṁ_throat(P) = C·P                        (isentropic choked flow)
//! ```
//!
//! For `0 ≤ n < 1` the residual `ṁ_gen − ṁ_throat` is positive at low
//! pressure and negative at high pressure, with exactly one root.
//!
//! ## Policies
//!
//! - [`PressurePolicy::Bisection`] (default): bisection in log-pressure over a
//!   fixed bracket, 1 Pa to 1000 MPa. Always converges if the root is inside
//!   the bracket.
//! - [`PressurePolicy::ProportionalCorrection`]: the legacy fixed-gain
//!   update `P += (ṁ_gen − ṁ_throat)·gain` from a 5 MPa start. It does not
//!   converge for many realistic grains, and that is reported through
//!   [`PressureSolution::converged`]. Paired with
//!   [`GrainConstants::legacy`](super::grain::GrainConstants::legacy) it
//!   reproduces the legacy tool's output.

use serde::{Deserialize, Serialize};

use crate::constants::PA_PER_MPA;
use crate::errors::{CalcError, CalcResult};

/// Root-finding policy for the chamber pressure balance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PressurePolicy {
    /// Geometric bisection on `[lower, upper]` (Pa).
    Bisection {
        lower: f64,
        upper: f64,
        max_iterations: usize,
        tolerance: f64,
    },
    /// Fixed-gain proportional correction starting at `initial` (Pa).
    ProportionalCorrection {
        initial: f64,
        gain: f64,
        max_iterations: usize,
        tolerance: f64,
    },
}

impl Default for PressurePolicy {
    fn default() -> Self {
        PressurePolicy::Bisection {
            lower: 1.0,
            upper: 1.0e9,
            max_iterations: 20,
            tolerance: 0.01,
        }
    }
}

impl PressurePolicy {
    /// Legacy proportional-correction iteration (5 MPa start, gain 1e5).
    pub fn legacy() -> Self {
        PressurePolicy::ProportionalCorrection {
            initial: 5.0e6,
            gain: 1.0e5,
            max_iterations: 20,
            tolerance: 0.01,
        }
    }

    fn validate(&self) -> CalcResult<()> {
        let (max_iterations, tolerance) = match *self {
            PressurePolicy::Bisection {
                lower,
                upper,
                max_iterations,
                tolerance,
            } => {
                let finite = lower.is_finite() && upper.is_finite();
                if !finite || lower <= 0.0 || upper <= lower {
                    return Err(CalcError::invalid_input(
                        "pressure_policy",
                        format!("[{lower}, {upper}]"),
                        "Bracket must satisfy 0 < lower < upper",
                    ));
                }
                (max_iterations, tolerance)
            }
            PressurePolicy::ProportionalCorrection {
                initial,
                gain,
                max_iterations,
                tolerance,
            } => {
                if !initial.is_finite() || initial <= 0.0 || !gain.is_finite() || gain <= 0.0 {
                    return Err(CalcError::invalid_input(
                        "pressure_policy",
                        format!("initial={initial}, gain={gain}"),
                        "Initial pressure and gain must be positive",
                    ));
                }
                (max_iterations, tolerance)
            }
        };
        if max_iterations == 0 {
            return Err(CalcError::invalid_input(
                "pressure_policy.max_iterations",
                "0",
                "At least one iteration is required",
            ));
        }
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(CalcError::invalid_input(
                "pressure_policy.tolerance",
                tolerance.to_string(),
                "Tolerance must be positive",
            ));
        }
        Ok(())
    }
}

/// Mass generation vs. nozzle discharge as functions of chamber pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassBalance {
    /// ρ·Ab·a (kg/s per MPa^n)
    pub generation_coefficient: f64,
    /// Pressure exponent n
    pub pressure_exponent: f64,
    /// Choked-flow discharge coefficient C, ṁ = C·P (kg/s/Pa)
    pub discharge_coefficient: f64,
}

impl MassBalance {
    /// Mass generation rate at pressure `p` (kg/s)
    pub fn generated(&self, p: f64) -> f64 {
        self.generation_coefficient * (p / PA_PER_MPA).powf(self.pressure_exponent)
    }

    /// Nozzle mass flow at pressure `p` (kg/s)
    pub fn discharged(&self, p: f64) -> f64 {
        self.discharge_coefficient * p
    }

    /// (ṁ_gen − ṁ_throat) / ṁ_gen
    pub fn relative_mismatch(&self, p: f64) -> f64 {
        let generated = self.generated(p);
        (generated - self.discharged(p)) / generated
    }
}

/// Outcome of a pressure solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureSolution {
    /// Chamber pressure (Pa)
    pub pressure: f64,
    /// Iterations performed
    pub iterations: usize,
    /// Relative mass-flow mismatch at the reported pressure
    pub relative_mismatch: f64,
    /// Whether the mismatch fell below tolerance within the iteration cap
    pub converged: bool,
}

/// Solve the mass balance with the given policy.
///
/// A non-finite or non-positive pressure is reported as `InvalidInput` on the
/// throat diameter, since it means the nozzle cannot balance the grain.
pub fn solve(balance: &MassBalance, policy: &PressurePolicy) -> CalcResult<PressureSolution> {
    policy.validate()?;

    if !(balance.generation_coefficient > 0.0 && balance.generation_coefficient.is_finite()) {
        return Err(CalcError::invalid_input(
            "burning_area",
            balance.generation_coefficient.to_string(),
            "Mass generation rate must be positive",
        ));
    }
    if !(balance.discharge_coefficient > 0.0 && balance.discharge_coefficient.is_finite()) {
        return Err(CalcError::invalid_input(
            "throat_diameter",
            balance.discharge_coefficient.to_string(),
            "Throat discharge must be positive",
        ));
    }

    let solution = match *policy {
        PressurePolicy::Bisection {
            lower,
            upper,
            max_iterations,
            tolerance,
        } => bisect(balance, lower, upper, max_iterations, tolerance)?,
        PressurePolicy::ProportionalCorrection {
            initial,
            gain,
            max_iterations,
            tolerance,
        } => proportional(balance, initial, gain, max_iterations, tolerance),
    };

    if !solution.pressure.is_finite() || solution.pressure <= 0.0 {
        return Err(CalcError::invalid_input(
            "throat_diameter",
            solution.pressure.to_string(),
            "Chamber pressure solve diverged; \
             the nozzle cannot balance the grain's mass generation",
        ));
    }
    Ok(solution)
}

fn bisect(
    balance: &MassBalance,
    lower: f64,
    upper: f64,
    max_iterations: usize,
    tolerance: f64,
) -> CalcResult<PressureSolution> {
    // Residual must change sign across the bracket
    if balance.relative_mismatch(lower) <= 0.0 || balance.relative_mismatch(upper) >= 0.0 {
        return Err(CalcError::invalid_input(
            "pressure_policy",
            format!("[{:.3}, {:.3}] MPa", lower / PA_PER_MPA, upper / PA_PER_MPA),
            "Equilibrium chamber pressure lies outside the bracket",
        ));
    }

    let (mut lo, mut hi) = (lower, upper);
    let mut pressure = (lo * hi).sqrt();
    let mut mismatch = balance.relative_mismatch(pressure);
    let mut iterations = 1;

    while mismatch.abs() >= tolerance && iterations < max_iterations {
        if mismatch > 0.0 {
            lo = pressure;
        } else {
            hi = pressure;
        }
        pressure = (lo * hi).sqrt();
        mismatch = balance.relative_mismatch(pressure);
        iterations += 1;
    }

    Ok(PressureSolution {
        pressure,
        iterations,
        relative_mismatch: mismatch,
        converged: mismatch.abs() < tolerance,
    })
}

fn proportional(
    balance: &MassBalance,
    initial: f64,
    gain: f64,
    max_iterations: usize,
    tolerance: f64,
) -> PressureSolution {
    let mut pressure = initial;
    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..max_iterations {
        iterations += 1;
        let generated = balance.generated(pressure);
        let error = generated - balance.discharged(pressure);
        pressure += error * gain;

        if !pressure.is_finite() || pressure <= 0.0 {
            break;
        }
        if (error / generated).abs() < tolerance {
            converged = true;
            break;
        }
    }

    let relative_mismatch = if pressure > 0.0 {
        balance.relative_mismatch(pressure)
    } else {
        f64::NAN
    };

    PressureSolution {
        pressure,
        iterations,
        relative_mismatch,
        converged,
    }
}

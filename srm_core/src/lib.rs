//! # srm_core - Solid Rocket Motor Design Engine
//!
//! `srm_core` sizes amateur solid rocket motors: mission requirements, grain
//! ballistics, case structural checks, and vehicle aerodynamics. All inputs
//! and outputs are JSON-serializable, so the engine can sit behind a CLI, a
//! GUI form, or any tool that speaks JSON.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take a config and return results
//! - **SI Everywhere**: m, kg, s, Pa, N, rad inside the engine; display units
//!   are converted at the boundary with [`units`]
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings; advisories
//!   are part of the result
//!
//! ## Quick Start
//!
//! ```rust
//! use srm_core::calculations::motor::{calculate, MotorRequirementsConfig, MotorTarget};
//!
//! let target = MotorTarget::Apogee { apogee: 1000.0 };
//! let config = MotorRequirementsConfig::new(target, 1.5, 0.0762, 0.75);
//! let result = calculate(&config).unwrap();
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! println!("{json}");
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Motor, grain, structural and aerodynamic solvers
//! - [`constants`] - Physical constants
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod constants;
pub mod errors;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{DesignCalculation, DesignOutput};
pub use errors::{CalcError, CalcResult};

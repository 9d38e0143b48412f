//! # srm_cli
//!
//! Command-line front-end for the solid rocket motor design engine.
//! Inputs are taken in the units a designer works in (mm, MPa, degrees) and
//! converted to SI before they reach `srm_core`.
//!
//! ```text
//! srm_cli motor --apogee 1000
//! srm_cli grain --geometry finocyl --throat-mm 11
//! srm_cli structural --pressure-mpa 8 --json
//! srm_cli run design.json
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};

use srm_core::calculations::aerodynamics::{AeroConfig, AeroConstants, AeroResult, NoseShape};
use srm_core::calculations::grain::{GrainConfig, GrainConstants, GrainGeometry, GrainResult};
use srm_core::calculations::motor::{
    MotorRequirementsConfig, MotorRequirementsResult, MotorTarget,
};
use srm_core::calculations::structural::{
    StructuralConfig, StructuralConstants, StructuralResult,
};
use srm_core::calculations::{DesignCalculation, DesignOutput, PressurePolicy};
use srm_core::errors::CalcError;
use srm_core::units::{
    Degrees, Megapascals, Meters, MetersPerSecondPerMpaN, Millimeters,
    MillimetersPerSecondPerMpaN, Pascals, Radians, SqCentimeters, SqMeters, SqMillimeters,
};

/// Solid rocket motor design calculations.
#[derive(Parser, Debug)]
#[command(author, version, about = "Solid rocket motor design calculator")]
struct Cli {
    /// Print the result record as JSON instead of a report
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Required impulse, thrust and motor mass for a mission
    Motor(MotorArgs),
    /// Grain ballistics: burning area, chamber pressure, thrust
    Grain(GrainArgs),
    /// Case, bulkhead, screw and nozzle checks
    Structural(StructuralArgs),
    /// Stability margin, drag and flight estimate
    Aero(AeroArgs),
    /// Run a calculation described by a JSON file
    Run {
        /// JSON document with a "type" tag (Motor, Grain, Structural, Aero)
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["apogee", "thrust"])))]
struct MotorArgs {
    /// Target apogee (m)
    #[arg(long)]
    apogee: Option<f64>,

    /// Desired average thrust (N)
    #[arg(long)]
    thrust: Option<f64>,

    /// Rocket mass without motor (kg)
    #[arg(long, default_value_t = 1.5)]
    mass: f64,

    /// Body diameter (mm)
    #[arg(long, default_value_t = 76.2)]
    diameter_mm: f64,

    /// Drag coefficient
    #[arg(long, default_value_t = 0.75)]
    cd: f64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GeometryArg {
    Bates,
    HollowCylinder,
    Star,
    Finocyl,
}

impl From<GeometryArg> for GrainGeometry {
    fn from(arg: GeometryArg) -> Self {
        match arg {
            GeometryArg::Bates => GrainGeometry::Bates,
            GeometryArg::HollowCylinder => GrainGeometry::HollowCylinder,
            GeometryArg::Star => GrainGeometry::Star,
            GeometryArg::Finocyl => GrainGeometry::Finocyl,
        }
    }
}

#[derive(Args, Debug)]
struct GrainArgs {
    #[arg(long, value_enum, default_value_t = GeometryArg::Bates)]
    geometry: GeometryArg,

    /// Grain outer diameter (mm)
    #[arg(long, default_value_t = 76.2)]
    outer_mm: f64,

    /// Core diameter (mm)
    #[arg(long, default_value_t = 25.4)]
    core_mm: f64,

    /// Grain length, per segment for BATES (mm)
    #[arg(long, default_value_t = 100.0)]
    length_mm: f64,

    /// Number of BATES segments
    #[arg(long, default_value_t = 4)]
    segments: u32,

    /// Propellant density (kg/m³)
    #[arg(long, default_value_t = 1800.0)]
    density: f64,

    /// Burn rate coefficient a (mm/s/MPa^n)
    #[arg(long, default_value_t = 8.26)]
    burn_coeff: f64,

    /// Pressure exponent n
    #[arg(long, default_value_t = 0.319)]
    exponent: f64,

    /// Nozzle throat diameter (mm)
    #[arg(long, default_value_t = 12.7)]
    throat_mm: f64,

    /// Reproduce the legacy tool: proportional-correction pressure iteration
    /// and its gas constant
    #[arg(long, default_value_t = false)]
    legacy_solver: bool,
}

#[derive(Args, Debug)]
struct StructuralArgs {
    /// Case wall thickness (mm)
    #[arg(long, default_value_t = 3.175)]
    thickness_mm: f64,

    /// Case outer diameter (mm)
    #[arg(long, default_value_t = 76.2)]
    outer_mm: f64,

    /// Maximum chamber pressure (MPa)
    #[arg(long, default_value_t = 7.0)]
    pressure_mpa: f64,

    /// Case yield strength (MPa)
    #[arg(long, default_value_t = 150.0)]
    yield_mpa: f64,

    /// Target safety factor
    #[arg(long, default_value_t = 2.0)]
    safety_factor: f64,

    /// Bulkhead yield strength (MPa)
    #[arg(long, default_value_t = 205.0)]
    bulkhead_yield_mpa: f64,

    /// Bulkhead radial thickness (mm)
    #[arg(long, default_value_t = 7.0)]
    bulkhead_mm: f64,

    /// Screw diameter (mm)
    #[arg(long, default_value_t = 9.03)]
    screw_mm: f64,

    /// Screw hole diameter (mm)
    #[arg(long, default_value_t = 10.0)]
    hole_mm: f64,

    /// Screw shear strength (MPa)
    #[arg(long, default_value_t = 207.0)]
    screw_shear_mpa: f64,

    /// Nozzle throat diameter (mm)
    #[arg(long, default_value_t = 12.7)]
    throat_mm: f64,

    /// Nozzle expansion ratio Ae/At
    #[arg(long, default_value_t = 6.0)]
    expansion_ratio: f64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum NoseArg {
    Conical,
    Ogive,
    Parabolic,
    Elliptical,
}

impl From<NoseArg> for NoseShape {
    fn from(arg: NoseArg) -> Self {
        match arg {
            NoseArg::Conical => NoseShape::Conical,
            NoseArg::Ogive => NoseShape::Ogive,
            NoseArg::Parabolic => NoseShape::Parabolic,
            NoseArg::Elliptical => NoseShape::Elliptical,
        }
    }
}

#[derive(Args, Debug)]
struct AeroArgs {
    /// Body diameter (mm)
    #[arg(long, default_value_t = 76.2)]
    diameter_mm: f64,

    /// Body tube length (mm)
    #[arg(long, default_value_t = 800.0)]
    body_mm: f64,

    /// Nose length (mm)
    #[arg(long, default_value_t = 200.0)]
    nose_mm: f64,

    #[arg(long, value_enum, default_value_t = NoseArg::Ogive)]
    nose: NoseArg,

    /// Dry mass (kg)
    #[arg(long, default_value_t = 1.5)]
    dry_mass: f64,

    /// Propellant mass (kg)
    #[arg(long, default_value_t = 0.5)]
    propellant_mass: f64,

    /// Center of gravity from nose tip (mm)
    #[arg(long, default_value_t = 450.0)]
    cg_mm: f64,

    /// Number of fins
    #[arg(long, default_value_t = 3)]
    fins: u32,

    /// Fin root chord (mm)
    #[arg(long, default_value_t = 120.0)]
    root_mm: f64,

    /// Fin tip chord (mm)
    #[arg(long, default_value_t = 60.0)]
    tip_mm: f64,

    /// Fin span (mm)
    #[arg(long, default_value_t = 100.0)]
    span_mm: f64,

    /// Fin leading-edge sweep (degrees)
    #[arg(long, default_value_t = 30.0)]
    sweep_deg: f64,

    /// Average thrust (N)
    #[arg(long, default_value_t = 100.0)]
    thrust: f64,

    /// Burn time (s)
    #[arg(long, default_value_t = 2.5)]
    burn_time: f64,
}

fn mm(value: f64) -> f64 {
    Meters::from(Millimeters(value)).value()
}

fn mpa(value: f64) -> f64 {
    Pascals::from(Megapascals(value)).value()
}

fn to_mm(meters: f64) -> f64 {
    Millimeters::from(Meters(meters)).value()
}

fn to_mpa(pascals: f64) -> f64 {
    Megapascals::from(Pascals(pascals)).value()
}

impl MotorArgs {
    fn into_config(self) -> anyhow::Result<MotorRequirementsConfig> {
        let target = match (self.apogee, self.thrust) {
            (_, Some(thrust)) => MotorTarget::AverageThrust { thrust },
            (Some(apogee), None) => MotorTarget::Apogee { apogee },
            (None, None) => anyhow::bail!("one of --apogee or --thrust is required"),
        };
        Ok(MotorRequirementsConfig::new(target, self.mass, mm(self.diameter_mm), self.cd))
    }
}

impl GrainArgs {
    fn into_config(self) -> GrainConfig {
        let burn_rate_coefficient =
            MetersPerSecondPerMpaN::from(MillimetersPerSecondPerMpaN(self.burn_coeff)).0;
        let mut config = GrainConfig::new(
            self.geometry.into(),
            mm(self.outer_mm),
            mm(self.core_mm),
            mm(self.length_mm),
            self.segments,
            self.density,
            burn_rate_coefficient,
            self.exponent,
            mm(self.throat_mm),
        );
        if self.legacy_solver {
            config.constants = GrainConstants::legacy();
            config.pressure_policy = PressurePolicy::legacy();
        }
        config
    }
}

impl StructuralArgs {
    fn into_config(self) -> StructuralConfig {
        StructuralConfig {
            label: String::new(),
            case_thickness: mm(self.thickness_mm),
            case_outer_diameter: mm(self.outer_mm),
            max_pressure: mpa(self.pressure_mpa),
            case_yield_strength: mpa(self.yield_mpa),
            target_safety_factor: self.safety_factor,
            bulkhead_yield_strength: mpa(self.bulkhead_yield_mpa),
            bulkhead_radial_thickness: mm(self.bulkhead_mm),
            screw_diameter: mm(self.screw_mm),
            screw_hole_diameter: mm(self.hole_mm),
            screw_shear_strength: mpa(self.screw_shear_mpa),
            throat_diameter: mm(self.throat_mm),
            expansion_ratio: self.expansion_ratio,
            constants: StructuralConstants::default(),
        }
    }
}

impl AeroArgs {
    fn into_config(self) -> AeroConfig {
        AeroConfig {
            label: String::new(),
            body_diameter: mm(self.diameter_mm),
            body_length: mm(self.body_mm),
            nose_length: mm(self.nose_mm),
            nose_shape: self.nose.into(),
            dry_mass: self.dry_mass,
            propellant_mass: self.propellant_mass,
            center_of_gravity: mm(self.cg_mm),
            fin_count: self.fins,
            fin_root_chord: mm(self.root_mm),
            fin_tip_chord: mm(self.tip_mm),
            fin_span: mm(self.span_mm),
            fin_sweep_angle: Radians::from(Degrees(self.sweep_deg)).value(),
            average_thrust: self.thrust,
            burn_time: self.burn_time,
            constants: AeroConstants::default(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let calculation = match cli.command {
        Command::Motor(args) => DesignCalculation::Motor(args.into_config()?),
        Command::Grain(args) => DesignCalculation::Grain(args.into_config()),
        Command::Structural(args) => DesignCalculation::Structural(args.into_config()),
        Command::Aero(args) => DesignCalculation::Aero(args.into_config()),
        Command::Run { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            DesignCalculation::from_json(&json)
                .with_context(|| format!("failed to parse {}", file.display()))?
        }
    };

    let output = match calculation.run() {
        Ok(output) => output,
        Err(err) if cli.json => {
            eprintln!("{}", error_json(&err)?);
            std::process::exit(1);
        }
        Err(err) => {
            return Err(err).context(format!("{} calculation failed", calculation.calc_type()));
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if !calculation.label().is_empty() {
        println!("{}", calculation.label());
    }
    match (&calculation, &output) {
        (_, DesignOutput::Motor(result)) => report_motor(result),
        (DesignCalculation::Grain(config), DesignOutput::Grain(result)) => {
            report_grain(config, result)
        }
        (_, DesignOutput::Structural(result)) => report_structural(result),
        (DesignCalculation::Aero(config), DesignOutput::Aero(result)) => {
            report_aero(config, result)
        }
        _ => anyhow::bail!("{} produced a mismatched result", calculation.calc_type()),
    }
    Ok(())
}

/// Structured error record written to stderr under `--json`.
fn error_json(err: &CalcError) -> serde_json::Result<String> {
    serde_json::to_string_pretty(err)
}

fn banner(title: &str) {
    println!("═══════════════════════════════════════");
    println!("  {title}");
    println!("═══════════════════════════════════════");
    println!();
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}

fn report_motor(result: &MotorRequirementsResult) {
    banner("MOTOR REQUIREMENTS");
    println!("  Average thrust:   {:.1} N", result.thrust);
    println!("  Burn time:        {:.2} s", result.burn_time);
    println!("  Total impulse:    {:.1} N·s", result.total_impulse);
    println!("  Propellant mass:  {:.3} kg", result.propellant_mass);
    println!("  Motor mass:       {:.3} kg", result.motor_mass);
    println!("  Thrust/weight:    {:.2}", result.thrust_to_weight);
    println!();
    match result.warning() {
        Some(warning) => println!("  {} {warning}", status_icon(false)),
        None => println!("  {} No design advisories", status_icon(true)),
    }
}

fn to_cm2(square_meters: f64) -> f64 {
    SqCentimeters::from(SqMeters(square_meters)).value()
}

fn to_mm2(square_meters: f64) -> f64 {
    SqMillimeters::from(SqMeters(square_meters)).value()
}

fn report_grain(config: &GrainConfig, result: &GrainResult) {
    banner("GRAIN BALLISTICS");
    println!("{}", config.geometry.display_name());
    println!("  {}", config.geometry.description());
    println!();
    println!("  Burning area:     {:.1} cm²", to_cm2(result.burning_area));
    println!("  Throat area:      {:.1} mm²", to_mm2(result.throat_area));
    println!("  Kn:               {:.0}", result.klemmung);
    println!("  Chamber pressure: {:.2} MPa", to_mpa(result.chamber_pressure));
    println!("  Burn rate:        {:.2} mm/s", to_mm(result.burn_rate));
    println!("  Mass flow:        {:.3} kg/s", result.mass_flow_rate);
    println!("  Thrust:           {:.1} N", result.thrust);
    println!("  Web thickness:    {:.2} mm", to_mm(result.web_thickness));
    println!("  Burn time:        {:.2} s", result.burn_time);
    println!("  Propellant mass:  {:.3} kg", result.propellant_mass);
    println!("  Delivered Isp:    {:.0} s", result.delivered_isp);
    println!();
    let solve = &result.pressure_solve;
    println!(
        "  Pressure solve:   {} iterations, mismatch {:.2}% {}",
        solve.iterations,
        solve.relative_mismatch * 100.0,
        status_icon(solve.converged)
    );
    println!();
    println!(
        "  Total impulse: {:.0} N·s (class {})",
        result.total_impulse(),
        result.impulse_class()
    );
}

fn report_structural(result: &StructuralResult) {
    banner("STRUCTURAL CHECKS");
    println!("Case (ID {:.2} mm):", to_mm(result.internal_diameter));
    println!("  σ_tangential = {:.1} MPa", to_mpa(result.tangential_stress));
    println!("  σ_radial     = {:.1} MPa", to_mpa(result.radial_stress));
    println!("  σ_long       = {:.1} MPa", to_mpa(result.longitudinal_stress));
    println!("  σ_von Mises  = {:.1} MPa", to_mpa(result.von_mises_stress));
    println!(
        "  Safety factor {:.2} ({}) {}",
        result.case_safety_factor,
        result.case_status.display_name(),
        status_icon(result.case_status.is_ok())
    );
    println!();
    println!("Bulkhead:");
    println!(
        "  Required thickness {:.2} mm {}",
        to_mm(result.bulkhead_thickness),
        status_icon(result.bulkhead_adequate)
    );
    println!();
    println!("Retaining screws:");
    println!(
        "  Bulkhead force {:.0} N over {} screws ({:.0} N each)",
        result.bulkhead_force, result.screw_count, result.force_per_screw
    );
    println!(
        "  Shear   {:.1} MPa, SF {:.2} {}",
        to_mpa(result.screw_shear_stress),
        result.screw_safety_factor,
        status_icon(result.screw_safety_factor >= 1.0)
    );
    println!(
        "  Bearing {:.1} MPa, SF {:.2} {}",
        to_mpa(result.bearing_stress),
        result.bearing_safety_factor,
        status_icon(result.bearing_safety_factor >= 1.0)
    );
    println!();
    println!("Nozzle:");
    println!(
        "  Throat area {:.1} mm², exit area {:.1} mm²",
        to_mm2(result.throat_area),
        to_mm2(result.exit_area)
    );
    println!(
        "  Exit diameter {:.2} mm (ε = {:.1})",
        to_mm(result.exit_diameter),
        result.expansion_ratio
    );
}

fn report_aero(config: &AeroConfig, result: &AeroResult) {
    banner("AERODYNAMICS");
    println!("Stability:");
    println!(
        "  CP {:.1} mm, CG {:.1} mm",
        to_mm(result.center_of_pressure),
        to_mm(result.center_of_gravity)
    );
    println!(
        "  Fin CP {:.1} mm, fin CNα {:.2}",
        to_mm(result.fin_center_of_pressure),
        result.fin_normal_force_slope
    );
    println!(
        "  Margin {:.2} cal ({}) {}",
        result.stability_margin,
        result.stability_status.display_name(),
        status_icon(result.stability_status.is_stable())
    );
    println!();
    println!("Drag ({} nose):", config.nose_shape.display_name());
    println!(
        "  Cd nose {:.3} + body {:.3} + fins {:.3} = {:.3}",
        result.nose_drag, result.body_drag, result.fin_drag, result.total_drag
    );
    println!();
    println!("Flight:");
    println!(
        "  Burnout at {:.0} m, {:.1} m/s",
        result.burnout_altitude, result.max_velocity
    );
    println!(
        "  Apogee {:.0} m at {:.1} s (coast {:.1} s)",
        result.apogee, result.time_to_apogee, result.coast_time
    );
    println!();
    println!("Recommendations:");
    println!("  Nose: {}", result.recommended_nose.display_name());
    println!(
        "  Fin span {:.0} mm, fin area {:.1} cm² per fin",
        to_mm(result.recommended_fin_span),
        to_cm2(result.recommended_fin_area)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("srm_cli").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_motor_requires_a_target() {
        assert!(Cli::try_parse_from(["srm_cli", "motor"]).is_err());
        assert!(Cli::try_parse_from(["srm_cli", "motor", "--apogee", "1000"]).is_ok());
    }

    #[test]
    fn test_legacy_solver_sets_both_presets() {
        let Command::Grain(args) = parse(&["grain", "--legacy-solver"]).command else {
            panic!("expected grain subcommand");
        };
        let config = args.into_config();
        assert_eq!(config.constants, GrainConstants::legacy());
        assert_eq!(config.pressure_policy, PressurePolicy::legacy());

        let Command::Grain(args) = parse(&["grain"]).command else {
            panic!("expected grain subcommand");
        };
        let config = args.into_config();
        assert_eq!(config.constants, GrainConstants::default());
        assert_eq!(config.pressure_policy, PressurePolicy::default());
    }

    #[test]
    fn test_display_units_are_converted() {
        let cli = parse(&["aero", "--cg-mm", "760", "--sweep-deg", "0", "--json"]);
        assert!(cli.json);
        let Command::Aero(args) = cli.command else {
            panic!("expected aero subcommand");
        };
        let config = args.into_config();
        assert!((config.center_of_gravity - 0.76).abs() < 1e-12);
        assert!((config.body_diameter - 0.0762).abs() < 1e-12);
        assert_eq!(config.fin_sweep_angle, 0.0);
    }

    #[test]
    fn test_error_json_is_one_document() {
        let err = DesignCalculation::Structural(StructuralConfig {
            case_thickness: 0.05,
            ..StructuralConfig::default()
        })
        .run()
        .unwrap_err();

        let json = error_json(&err).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "InvalidInput");
        assert_eq!(value["details"]["field"], "case_outer_diameter");
    }
}

//! Simulation-wide parameters: boundary layout, validation, and the
//! always-valid typed form.
//!
//! The external caller supplies plain scalars; [`SimulationParams::build`]
//! runs every check before constructing anything, so a violation leaves no
//! partial state and an existing `SimulationParams` is valid by
//! construction.

use aeolus_core::{
    check_option_cmp, check_option_in, ComparisonOp, InitError, Real, MAX_TRACERS,
};

const ENTRY: &str = "init_simulation_params";

/// Vertical remap algorithm selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemapAlg {
    /// Piecewise-parabolic method with mirrored boundary cells.
    PpmMirrored,
    /// PPM with fixed parabolas at the boundaries.
    PpmFixedParabola,
    /// PPM with fixed cell means at the boundaries.
    PpmFixedMeans,
}

/// Forcing application algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForcingAlg {
    /// No forcing applied.
    Off,
    /// Debug forcing: tracer tendencies are exchanged across the boundary.
    Debug,
    /// Standard forcing without tracer-tendency exchange.
    Forcing2,
}

/// Moisture treatment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoistDry {
    /// Moist dynamics.
    Moist,
    /// Dry dynamics.
    Dry,
}

/// Idealized test case driving the forcing self-test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestCase {
    /// Jablonowski–Williamson baroclinic wave.
    JwBaroclinic,
}

/// The 22 scalars exactly as they cross the C boundary.
#[derive(Clone, Copy, Debug)]
pub struct RawSimulationParams {
    /// Vertical remap algorithm tag.
    pub remap_alg: i32,
    /// Tracer limiter option.
    pub limiter_option: i32,
    /// Vertical remap split count.
    pub rsplit: i32,
    /// Tracer advection split count.
    pub qsplit: i32,
    /// Time stepping scheme tag.
    pub time_step_type: i32,
    /// Number of advected tracer species.
    pub qsize: i32,
    /// State output frequency, in steps.
    pub state_frequency: i32,
    /// Velocity hyperviscosity coefficient.
    pub nu: Real,
    /// Pressure-thickness hyperviscosity coefficient.
    pub nu_p: Real,
    /// Tracer hyperviscosity coefficient.
    pub nu_q: Real,
    /// Temperature hyperviscosity coefficient.
    pub nu_s: Real,
    /// Divergence-damping hyperviscosity coefficient.
    pub nu_div: Real,
    /// Sponge-layer viscosity coefficient.
    pub nu_top: Real,
    /// Hyperviscosity operator order.
    pub hypervis_order: i32,
    /// Hyperviscosity subcycle count.
    pub hypervis_subcycle: i32,
    /// Tensor-hyperviscosity scaling exponent; zero selects the
    /// constant-coefficient operator.
    pub hypervis_scaling: Real,
    /// Forcing algorithm tag.
    pub ftype: i32,
    /// Whether winds are prescribed rather than prognostic.
    pub prescribed_wind: bool,
    /// Whether moisture is carried.
    pub moisture: bool,
    /// Whether energy diagnostics are disabled.
    pub disable_diagnostics: bool,
    /// Whether cp* is used in the thermodynamic equation.
    pub use_cpstar: bool,
    /// Whether tracer transport is semi-Lagrangian.
    pub use_semi_lagrangian_transport: bool,
}

/// Validated simulation-wide configuration.
///
/// Constructed once per process by [`SimulationParams::build`]; the two
/// viscosity ratios are a pure function of `nu`, `nu_div`, and
/// `hypervis_scaling`, computed exactly once here and never recomputed.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParams {
    /// Vertical remap algorithm.
    pub remap_alg: RemapAlg,
    /// Tracer limiter option.
    pub limiter_option: i32,
    /// Vertical remap split count.
    pub rsplit: i32,
    /// Tracer advection split count.
    pub qsplit: i32,
    /// Time stepping scheme tag.
    pub time_step_type: i32,
    /// Whether winds are prescribed rather than prognostic.
    pub prescribed_wind: bool,
    /// State output frequency, in steps.
    pub state_frequency: i32,
    /// Number of advected tracer species.
    pub qsize: usize,
    /// Velocity hyperviscosity coefficient.
    pub nu: Real,
    /// Pressure-thickness hyperviscosity coefficient.
    pub nu_p: Real,
    /// Tracer hyperviscosity coefficient.
    pub nu_q: Real,
    /// Temperature hyperviscosity coefficient.
    pub nu_s: Real,
    /// Divergence-damping hyperviscosity coefficient.
    pub nu_div: Real,
    /// Sponge-layer viscosity coefficient.
    pub nu_top: Real,
    /// Hyperviscosity operator order.
    pub hypervis_order: i32,
    /// Hyperviscosity subcycle count.
    pub hypervis_subcycle: i32,
    /// Tensor-hyperviscosity scaling exponent.
    pub hypervis_scaling: Real,
    /// First derived viscosity ratio.
    pub nu_ratio1: Real,
    /// Second derived viscosity ratio.
    pub nu_ratio2: Real,
    /// Forcing algorithm.
    pub ftype: ForcingAlg,
    /// Moisture treatment.
    pub moisture: MoistDry,
    /// Whether energy diagnostics are disabled.
    pub disable_diagnostics: bool,
    /// Whether cp* is used in the thermodynamic equation.
    pub use_cpstar: bool,
    /// Whether tracer transport is semi-Lagrangian.
    pub use_semi_lagrangian_transport: bool,
    /// Idealized test case.
    pub test_case: TestCase,
}

impl SimulationParams {
    /// Validate every supplied scalar, then construct the typed form.
    ///
    /// The checks mirror the options the engine currently supports; as
    /// more options gain support, checks are removed here. All checks run
    /// before any construction, and the first violation wins.
    pub fn build(raw: &RawSimulationParams) -> Result<Self, InitError> {
        check_option_in(ENTRY, "vert_remap_q_alg", raw.remap_alg, &[1, 3])?;
        check_option_in(ENTRY, "prescribed_wind", raw.prescribed_wind, &[false])?;
        check_option_in(ENTRY, "hypervis_order", raw.hypervis_order, &[2])?;
        check_option_in(
            ENTRY,
            "use_semi_lagrangian_transport",
            raw.use_semi_lagrangian_transport,
            &[false],
        )?;
        check_option_in(ENTRY, "time_step_type", raw.time_step_type, &[5])?;
        check_option_cmp(ENTRY, "qsize", raw.qsize, 0, ComparisonOp::Ge)?;
        check_option_cmp(
            ENTRY,
            "qsize",
            raw.qsize,
            MAX_TRACERS as i32,
            ComparisonOp::Le,
        )?;
        check_option_in(ENTRY, "limiter_option", raw.limiter_option, &[8, 9])?;
        check_option_in(ENTRY, "ftype", raw.ftype, &[-1, 0, 2])?;
        check_option_cmp(ENTRY, "nu_p", raw.nu_p, 0.0, ComparisonOp::Gt)?;
        check_option_cmp(ENTRY, "nu", raw.nu, 0.0, ComparisonOp::Gt)?;
        check_option_cmp(ENTRY, "nu_div", raw.nu_div, 0.0, ComparisonOp::Gt)?;

        let remap_alg = match raw.remap_alg {
            1 => RemapAlg::PpmMirrored,
            2 => RemapAlg::PpmFixedParabola,
            3 => RemapAlg::PpmFixedMeans,
            _ => unreachable!("remap_alg validated above"),
        };

        let ftype = match raw.ftype {
            -1 => ForcingAlg::Off,
            0 => ForcingAlg::Debug,
            2 => ForcingAlg::Forcing2,
            _ => unreachable!("ftype validated above"),
        };

        let (nu_ratio1, nu_ratio2) = if raw.nu != raw.nu_div {
            let ratio = raw.nu_div / raw.nu;
            if raw.hypervis_scaling != 0.0 {
                (ratio * ratio, 1.0)
            } else {
                (ratio, ratio)
            }
        } else {
            (1.0, 1.0)
        };

        Ok(Self {
            remap_alg,
            limiter_option: raw.limiter_option,
            rsplit: raw.rsplit,
            qsplit: raw.qsplit,
            time_step_type: raw.time_step_type,
            prescribed_wind: raw.prescribed_wind,
            state_frequency: raw.state_frequency,
            qsize: raw.qsize as usize,
            nu: raw.nu,
            nu_p: raw.nu_p,
            nu_q: raw.nu_q,
            nu_s: raw.nu_s,
            nu_div: raw.nu_div,
            nu_top: raw.nu_top,
            hypervis_order: raw.hypervis_order,
            hypervis_subcycle: raw.hypervis_subcycle,
            hypervis_scaling: raw.hypervis_scaling,
            nu_ratio1,
            nu_ratio2,
            ftype,
            moisture: if raw.moisture {
                MoistDry::Moist
            } else {
                MoistDry::Dry
            },
            disable_diagnostics: raw.disable_diagnostics,
            use_cpstar: raw.use_cpstar,
            use_semi_lagrangian_transport: raw.use_semi_lagrangian_transport,
            // TODO: plumb the test-case name across the boundary; nothing
            // downstream reads it yet except the forcing self-test.
            test_case: TestCase::JwBaroclinic,
        })
    }

    /// Whether constant-coefficient hyperviscosity is selected.
    pub fn const_hypervis(&self) -> bool {
        self.hypervis_scaling == 0.0
    }
}

//! Initialization entry points, in the order the caller must invoke
//! them.

use aeolus_core::{check_option_cmp, ComparisonOp, ExtView, Real};
use aeolus_state::layout::{self, len_of};
use aeolus_state::{
    DiagnosticsFields, GeometryFields, HybridVCoord, RawSimulationParams, ReferenceElement,
    SimulationParams, TimeLevel,
};

use crate::{context, fatal, get_or_fatal, ok_or_fatal, slice_in};

/// Validate and install the simulation-wide parameters.
///
/// Must be the first entry point invoked. Every scalar is checked before
/// any state is written; the first violation aborts.
#[allow(unsafe_code)]
#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn init_simulation_params(
    remap_alg: i32,
    limiter_option: i32,
    rsplit: i32,
    qsplit: i32,
    time_step_type: i32,
    qsize: i32,
    state_frequency: i32,
    nu: Real,
    nu_p: Real,
    nu_q: Real,
    nu_s: Real,
    nu_div: Real,
    nu_top: Real,
    hypervis_order: i32,
    hypervis_subcycle: i32,
    hypervis_scaling: Real,
    ftype: i32,
    prescribed_wind: bool,
    moisture: bool,
    disable_diagnostics: bool,
    use_cpstar: bool,
    use_semi_lagrangian_transport: bool,
) {
    const ENTRY: &str = "init_simulation_params";
    let raw = RawSimulationParams {
        remap_alg,
        limiter_option,
        rsplit,
        qsplit,
        time_step_type,
        qsize,
        state_frequency,
        nu,
        nu_p,
        nu_q,
        nu_s,
        nu_div,
        nu_top,
        hypervis_order,
        hypervis_subcycle,
        hypervis_scaling,
        ftype,
        prescribed_wind,
        moisture,
        disable_diagnostics,
        use_cpstar,
        use_semi_lagrangian_transport,
    };
    let params = get_or_fatal(ENTRY, SimulationParams::build(&raw));
    context().set_params(params);
}

/// Install the hybrid vertical coordinate coefficients.
#[allow(unsafe_code)]
#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn init_hvcoord(
    ps0: Real,
    hybrid_am: *const Real,
    hybrid_ai: *const Real,
    hybrid_bm: *const Real,
    hybrid_bi: *const Real,
) {
    const ENTRY: &str = "init_hvcoord";
    // SAFETY: buffers cover the fixed vertical extents per caller contract.
    let (am, ai, bm, bi) = unsafe {
        (
            slice_in(ENTRY, "hybrid_am", hybrid_am, len_of(&layout::vcoord_mid())),
            slice_in(
                ENTRY,
                "hybrid_ai",
                hybrid_ai,
                len_of(&layout::vcoord_interface()),
            ),
            slice_in(ENTRY, "hybrid_bm", hybrid_bm, len_of(&layout::vcoord_mid())),
            slice_in(
                ENTRY,
                "hybrid_bi",
                hybrid_bi,
                len_of(&layout::vcoord_interface()),
            ),
        )
    };
    let hvcoord = get_or_fatal(ENTRY, HybridVCoord::new(ps0, am, ai, bm, bi));
    context().set_hvcoord(hvcoord);
}

/// Install the reference-element derivative and mass matrices.
#[allow(unsafe_code)]
#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn init_reference_element(deriv: *const Real, mass: *const Real) {
    const ENTRY: &str = "init_reference_element";
    let len = len_of(&layout::BASIS);
    // SAFETY: both matrices are NP×NP per caller contract.
    let (deriv, mass) = unsafe {
        (
            slice_in(ENTRY, "deriv", deriv, len),
            slice_in(ENTRY, "mass", mass, len),
        )
    };
    let ref_fe = get_or_fatal(ENTRY, ReferenceElement::new(deriv, mass));
    context().set_reference_element(ref_fe);
}

/// Ingest the rotating time-level indices, converting them from the
/// caller's 1-based convention.
#[allow(unsafe_code)]
#[unsafe(no_mangle)]
pub extern "C" fn init_time_level(nm1: i32, n0: i32, np1: i32, nstep: i32, nstep0: i32) {
    const ENTRY: &str = "init_time_level";
    let tl = get_or_fatal(ENTRY, TimeLevel::from_f90(nm1, n0, np1, nstep, nstep0));
    context().set_time_level(tl);
}

/// Allocate the element and tracer containers.
///
/// Must follow [`init_simulation_params`].
#[allow(unsafe_code)]
#[unsafe(no_mangle)]
pub extern "C" fn init_elements(num_elems: i32) {
    const ENTRY: &str = "init_elements";
    ok_or_fatal(
        ENTRY,
        check_option_cmp(ENTRY, "num_elems", num_elems, 0, ComparisonOp::Gt),
    );
    let mut ctx = context();
    ok_or_fatal(ENTRY, ctx.init_elements(num_elems as usize));
}

/// Install one element's metric terms. Invoked once per element index.
#[allow(unsafe_code)]
#[unsafe(no_mangle)]
#[allow(unsafe_code)]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn init_elements_2d(
    ie: i32,
    d: *const Real,
    dinv: *const Real,
    fcor: *const Real,
    spheremp: *const Real,
    rspheremp: *const Real,
    metdet: *const Real,
    metinv: *const Real,
    phis: *const Real,
    tensorvisc: *const Real,
    vec_sph2cart: *const Real,
) {
    const ENTRY: &str = "init_elements_2d";
    ok_or_fatal(
        ENTRY,
        check_option_cmp(ENTRY, "ie", ie, 0, ComparisonOp::Ge),
    );
    let tensor = len_of(&layout::TENSOR_2X2);
    let pointwise = len_of(&layout::POINTWISE);
    // SAFETY: each buffer covers one element's documented extent per
    // caller contract.
    let fields = unsafe {
        GeometryFields {
            d: view(ENTRY, "d", slice_in(ENTRY, "d", d, tensor), &layout::TENSOR_2X2),
            dinv: view(
                ENTRY,
                "dinv",
                slice_in(ENTRY, "dinv", dinv, tensor),
                &layout::TENSOR_2X2,
            ),
            fcor: view(
                ENTRY,
                "fcor",
                slice_in(ENTRY, "fcor", fcor, pointwise),
                &layout::POINTWISE,
            ),
            spheremp: view(
                ENTRY,
                "spheremp",
                slice_in(ENTRY, "spheremp", spheremp, pointwise),
                &layout::POINTWISE,
            ),
            rspheremp: view(
                ENTRY,
                "rspheremp",
                slice_in(ENTRY, "rspheremp", rspheremp, pointwise),
                &layout::POINTWISE,
            ),
            metdet: view(
                ENTRY,
                "metdet",
                slice_in(ENTRY, "metdet", metdet, pointwise),
                &layout::POINTWISE,
            ),
            metinv: view(
                ENTRY,
                "metinv",
                slice_in(ENTRY, "metinv", metinv, tensor),
                &layout::TENSOR_2X2,
            ),
            phis: view(
                ENTRY,
                "phis",
                slice_in(ENTRY, "phis", phis, pointwise),
                &layout::POINTWISE,
            ),
            tensorvisc: view(
                ENTRY,
                "tensorvisc",
                slice_in(ENTRY, "tensorvisc", tensorvisc, tensor),
                &layout::TENSOR_2X2,
            ),
            vec_sph2cart: view(
                ENTRY,
                "vec_sph2cart",
                slice_in(
                    ENTRY,
                    "vec_sph2cart",
                    vec_sph2cart,
                    len_of(&layout::VEC_SPH2CART),
                ),
                &layout::VEC_SPH2CART,
            ),
        }
    };
    let mut ctx = context();
    ok_or_fatal(ENTRY, ctx.set_element_geometry(ie as usize, &fields));
}

/// Pull the initial prognostic state and tracer mass into the engine.
#[allow(unsafe_code)]
#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn init_elements_states(
    state_v: *const Real,
    state_temp: *const Real,
    state_dp3d: *const Real,
    state_qdp: *const Real,
    state_ps_v: *const Real,
) {
    const ENTRY: &str = "init_elements_states";
    let mut ctx = context();
    let ne = get_or_fatal(ENTRY, ctx.elements().map(|e| e.num_elems()));
    // SAFETY: buffers cover the per-field extents for `ne` elements per
    // caller contract.
    let (v, t, dp3d, qdp, ps_v) = unsafe {
        (
            slice_in(ENTRY, "state_v", state_v, len_of(&layout::state_v(ne))),
            slice_in(
                ENTRY,
                "state_temp",
                state_temp,
                len_of(&layout::state_scalar(ne)),
            ),
            slice_in(
                ENTRY,
                "state_dp3d",
                state_dp3d,
                len_of(&layout::state_scalar(ne)),
            ),
            slice_in(ENTRY, "state_qdp", state_qdp, len_of(&layout::qdp(ne))),
            slice_in(
                ENTRY,
                "state_ps_v",
                state_ps_v,
                len_of(&layout::state_ps_v(ne)),
            ),
        )
    };
    let result = ctx.pull_states(
        &view(ENTRY, "state_v", v, &layout::state_v(ne)),
        &view(ENTRY, "state_temp", t, &layout::state_scalar(ne)),
        &view(ENTRY, "state_dp3d", dp3d, &layout::state_scalar(ne)),
        &view(ENTRY, "state_qdp", qdp, &layout::qdp(ne)),
        &view(ENTRY, "state_ps_v", ps_v, &layout::state_ps_v(ne)),
    );
    ok_or_fatal(ENTRY, result);
}

/// Take host copies of the caller's diagnostic accumulators.
#[allow(unsafe_code)]
#[unsafe(no_mangle)]
#[allow(unsafe_code)]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn init_diagnostics(
    elem_state_q: *const Real,
    elem_accum_qvar: *const Real,
    elem_accum_qmass: *const Real,
    elem_accum_q1mass: *const Real,
    elem_accum_iener: *const Real,
    elem_accum_iener_wet: *const Real,
    elem_accum_kener: *const Real,
    elem_accum_pener: *const Real,
) {
    const ENTRY: &str = "init_diagnostics";
    let mut ctx = context();
    let ne = get_or_fatal(ENTRY, ctx.elements().map(|e| e.num_elems()));
    let q_len = len_of(&layout::q(ne));
    let accum_len = len_of(&layout::accum_tracer(ne));
    let energy_len = len_of(&layout::accum_energy(ne));
    // SAFETY: buffers cover the per-field extents for `ne` elements per
    // caller contract.
    let fields = unsafe {
        DiagnosticsFields {
            q: view(
                ENTRY,
                "elem_state_q",
                slice_in(ENTRY, "elem_state_q", elem_state_q, q_len),
                &layout::q(ne),
            ),
            qvar: view(
                ENTRY,
                "elem_accum_qvar",
                slice_in(ENTRY, "elem_accum_qvar", elem_accum_qvar, accum_len),
                &layout::accum_tracer(ne),
            ),
            qmass: view(
                ENTRY,
                "elem_accum_qmass",
                slice_in(ENTRY, "elem_accum_qmass", elem_accum_qmass, accum_len),
                &layout::accum_tracer(ne),
            ),
            q1mass: view(
                ENTRY,
                "elem_accum_q1mass",
                slice_in(ENTRY, "elem_accum_q1mass", elem_accum_q1mass, accum_len),
                &layout::accum_tracer(ne),
            ),
            iener: view(
                ENTRY,
                "elem_accum_iener",
                slice_in(ENTRY, "elem_accum_iener", elem_accum_iener, energy_len),
                &layout::accum_energy(ne),
            ),
            iener_wet: view(
                ENTRY,
                "elem_accum_iener_wet",
                slice_in(
                    ENTRY,
                    "elem_accum_iener_wet",
                    elem_accum_iener_wet,
                    energy_len,
                ),
                &layout::accum_energy(ne),
            ),
            kener: view(
                ENTRY,
                "elem_accum_kener",
                slice_in(ENTRY, "elem_accum_kener", elem_accum_kener, energy_len),
                &layout::accum_energy(ne),
            ),
            pener: view(
                ENTRY,
                "elem_accum_pener",
                slice_in(ENTRY, "elem_accum_pener", elem_accum_pener, energy_len),
                &layout::accum_energy(ne),
            ),
        }
    };
    ok_or_fatal(ENTRY, ctx.init_diagnostics(&fields));
}

/// Construct every kernel functor against the now-valid state.
///
/// Must follow element, tracer, reference-element, vertical-coordinate,
/// and parameter initialization; a missing prerequisite aborts with its
/// name. A repeated call is a no-op.
#[allow(unsafe_code)]
#[unsafe(no_mangle)]
pub extern "C" fn init_functors() {
    ok_or_fatal("init_functors", context().init_functors());
}

/// Attach each functor to its communication buffers.
///
/// Must follow [`init_functors`].
#[allow(unsafe_code)]
#[unsafe(no_mangle)]
pub extern "C" fn init_boundary_exchanges() {
    ok_or_fatal(
        "init_boundary_exchanges",
        context().init_boundary_exchanges(),
    );
}

pub(crate) fn view<'a>(
    entry: &'static str,
    name: &'static str,
    data: &'a [Real],
    shape: &[usize],
) -> ExtView<'a> {
    match ExtView::new(name, data, shape) {
        Ok(v) => v,
        Err(err) => fatal(entry, &err),
    }
}

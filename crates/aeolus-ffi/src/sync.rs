//! Run-time synchronization entry points: push and pull state across
//! the boundary during the run.

use aeolus_core::{ExtViewMut, Real};
use aeolus_state::layout::{self, len_of};

use crate::entry::view;
use crate::{context, fatal, get_or_fatal, ok_or_fatal, slice_in, slice_out};

fn view_mut<'a>(
    entry: &'static str,
    name: &'static str,
    data: &'a mut [Real],
    shape: &[usize],
) -> ExtViewMut<'a> {
    match ExtViewMut::new(name, data, shape) {
        Ok(v) => v,
        Err(err) => fatal(entry, &err),
    }
}

/// Push the prognostic state, tracer fields, and the vertical-velocity
/// proxy back to the caller's buffers.
#[allow(unsafe_code)]
#[unsafe(no_mangle)]
#[allow(unsafe_code)]
#[allow(clippy::too_many_arguments)]
pub extern "C" fn push_results(
    elem_state_v: *mut Real,
    elem_state_temp: *mut Real,
    elem_state_dp3d: *mut Real,
    elem_state_qdp: *mut Real,
    elem_q: *mut Real,
    elem_state_ps_v: *mut Real,
    elem_derived_omega_p: *mut Real,
) {
    const ENTRY: &str = "push_results";
    let ctx = context();
    let ne = get_or_fatal(ENTRY, ctx.elements().map(|e| e.num_elems()));
    // SAFETY: buffers cover the per-field extents for `ne` elements per
    // caller contract; the caller passes no aliased buffers.
    let (v, t, dp3d, qdp, q, ps_v, omega_p) = unsafe {
        (
            slice_out(ENTRY, "elem_state_v", elem_state_v, len_of(&layout::state_v(ne))),
            slice_out(
                ENTRY,
                "elem_state_temp",
                elem_state_temp,
                len_of(&layout::state_scalar(ne)),
            ),
            slice_out(
                ENTRY,
                "elem_state_dp3d",
                elem_state_dp3d,
                len_of(&layout::state_scalar(ne)),
            ),
            slice_out(
                ENTRY,
                "elem_state_qdp",
                elem_state_qdp,
                len_of(&layout::qdp(ne)),
            ),
            slice_out(ENTRY, "elem_q", elem_q, len_of(&layout::q(ne))),
            slice_out(
                ENTRY,
                "elem_state_ps_v",
                elem_state_ps_v,
                len_of(&layout::state_ps_v(ne)),
            ),
            slice_out(
                ENTRY,
                "elem_derived_omega_p",
                elem_derived_omega_p,
                len_of(&layout::per_level(ne)),
            ),
        )
    };
    let result = ctx.push_results(
        &mut view_mut(ENTRY, "elem_state_v", v, &layout::state_v(ne)),
        &mut view_mut(ENTRY, "elem_state_temp", t, &layout::state_scalar(ne)),
        &mut view_mut(ENTRY, "elem_state_dp3d", dp3d, &layout::state_scalar(ne)),
        &mut view_mut(ENTRY, "elem_state_qdp", qdp, &layout::qdp(ne)),
        &mut view_mut(ENTRY, "elem_q", q, &layout::q(ne)),
        &mut view_mut(ENTRY, "elem_state_ps_v", ps_v, &layout::state_ps_v(ne)),
        &mut view_mut(ENTRY, "elem_derived_omega_p", omega_p, &layout::per_level(ne)),
    );
    ok_or_fatal(ENTRY, result);
}

/// Push the forcing accumulators to the caller's buffers.
///
/// The tracer tendency buffer is written only under the debug forcing
/// algorithm; every other algorithm leaves it untouched.
#[allow(unsafe_code)]
#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn push_forcing(
    elem_derived_fm: *mut Real,
    elem_derived_ft: *mut Real,
    elem_derived_fq: *mut Real,
) {
    const ENTRY: &str = "push_forcing";
    let mut ctx = context();
    let ne = get_or_fatal(ENTRY, ctx.elements().map(|e| e.num_elems()));
    // SAFETY: buffers cover the per-field extents for `ne` elements per
    // caller contract.
    let (fm, ft, fq) = unsafe {
        (
            slice_out(ENTRY, "elem_derived_fm", elem_derived_fm, len_of(&layout::fm(ne))),
            slice_out(
                ENTRY,
                "elem_derived_ft",
                elem_derived_ft,
                len_of(&layout::per_level(ne)),
            ),
            slice_out(ENTRY, "elem_derived_fq", elem_derived_fq, len_of(&layout::q(ne))),
        )
    };
    let result = ctx.push_forcing(
        &mut view_mut(ENTRY, "elem_derived_fm", fm, &layout::fm(ne)),
        &mut view_mut(ENTRY, "elem_derived_ft", ft, &layout::per_level(ne)),
        &mut view_mut(ENTRY, "elem_derived_fq", fq, &layout::q(ne)),
    );
    ok_or_fatal(ENTRY, result);
}

/// Pull the forcing accumulators and tracer mass from the caller's
/// buffers.
///
/// The tracer tendency moves only under the debug forcing algorithm.
#[allow(unsafe_code)]
#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn pull_forcing(
    elem_derived_fm: *const Real,
    elem_derived_ft: *const Real,
    elem_derived_fq: *const Real,
    elem_state_qdp: *const Real,
) {
    const ENTRY: &str = "pull_forcing";
    let mut ctx = context();
    let ne = get_or_fatal(ENTRY, ctx.elements().map(|e| e.num_elems()));
    // SAFETY: buffers cover the per-field extents for `ne` elements per
    // caller contract.
    let (fm, ft, fq, qdp) = unsafe {
        (
            slice_in(ENTRY, "elem_derived_fm", elem_derived_fm, len_of(&layout::fm(ne))),
            slice_in(
                ENTRY,
                "elem_derived_ft",
                elem_derived_ft,
                len_of(&layout::per_level(ne)),
            ),
            slice_in(ENTRY, "elem_derived_fq", elem_derived_fq, len_of(&layout::q(ne))),
            slice_in(
                ENTRY,
                "elem_state_qdp",
                elem_state_qdp,
                len_of(&layout::qdp(ne)),
            ),
        )
    };
    let result = ctx.pull_forcing(
        &view(ENTRY, "elem_derived_fm", fm, &layout::fm(ne)),
        &view(ENTRY, "elem_derived_ft", ft, &layout::per_level(ne)),
        &view(ENTRY, "elem_derived_fq", fq, &layout::q(ne)),
        &view(ENTRY, "elem_state_qdp", qdp, &layout::qdp(ne)),
    );
    ok_or_fatal(ENTRY, result);
}

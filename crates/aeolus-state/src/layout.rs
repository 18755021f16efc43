//! External flat-buffer shape descriptors.
//!
//! The legacy caller declares its arrays column-major with the fastest
//! axis first; every shape here is the row-major reversal of that
//! declaration, so the fastest axis is last. Tracer buffers stride by the
//! compile-time capacity [`MAX_TRACERS`], not the runtime tracer count.

use aeolus_core::{
    MAX_TRACERS, NP, NUM_INTERFACE_LEV, NUM_PHYSICAL_LEV, NUM_TIME_LEVELS, Q_NUM_TIME_LEVELS,
};

/// Total scalar count implied by a shape.
pub fn len_of(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Prognostic velocity: `[nelem][NT][lev][2][np][np]`.
pub fn state_v(num_elems: usize) -> [usize; 6] {
    [num_elems, NUM_TIME_LEVELS, NUM_PHYSICAL_LEV, 2, NP, NP]
}

/// Prognostic scalars (temperature, pressure thickness):
/// `[nelem][NT][lev][np][np]`.
pub fn state_scalar(num_elems: usize) -> [usize; 5] {
    [num_elems, NUM_TIME_LEVELS, NUM_PHYSICAL_LEV, NP, NP]
}

/// Surface pressure: `[nelem][NT][np][np]`.
pub fn state_ps_v(num_elems: usize) -> [usize; 4] {
    [num_elems, NUM_TIME_LEVELS, NP, NP]
}

/// Tracer mass: `[nelem][QNT][MAX_TRACERS][lev][np][np]`.
pub fn qdp(num_elems: usize) -> [usize; 6] {
    [
        num_elems,
        Q_NUM_TIME_LEVELS,
        MAX_TRACERS,
        NUM_PHYSICAL_LEV,
        NP,
        NP,
    ]
}

/// Tracer mixing ratio and tracer forcing: `[nelem][MAX_TRACERS][lev][np][np]`.
pub fn q(num_elems: usize) -> [usize; 5] {
    [num_elems, MAX_TRACERS, NUM_PHYSICAL_LEV, NP, NP]
}

/// Per-level diagnostics and thermal forcing: `[nelem][lev][np][np]`.
pub fn per_level(num_elems: usize) -> [usize; 4] {
    [num_elems, NUM_PHYSICAL_LEV, NP, NP]
}

/// Momentum forcing: `[nelem][lev][2][np][np]`.
pub fn fm(num_elems: usize) -> [usize; 5] {
    [num_elems, NUM_PHYSICAL_LEV, 2, NP, NP]
}

/// Hybrid coordinate coefficients at midpoints.
pub fn vcoord_mid() -> [usize; 1] {
    [NUM_PHYSICAL_LEV]
}

/// Hybrid coordinate coefficients at interfaces.
pub fn vcoord_interface() -> [usize; 1] {
    [NUM_INTERFACE_LEV]
}

/// Per-element 2×2 metric tensors: `[2][2][np][np]`.
pub const TENSOR_2X2: [usize; 4] = [2, 2, NP, NP];

/// Per-element sphere-to-Cartesian map: `[2][3][np][np]`.
pub const VEC_SPH2CART: [usize; 4] = [2, 3, NP, NP];

/// Per-element pointwise fields: `[np][np]`.
pub const POINTWISE: [usize; 2] = [NP, NP];

/// Basis matrices of the reference element: `[np][np]`.
pub const BASIS: [usize; 2] = [NP, NP];

/// Per-tracer accumulators: `[nelem][MAX_TRACERS][np][np]`.
pub fn accum_tracer(num_elems: usize) -> [usize; 4] {
    [num_elems, MAX_TRACERS, NP, NP]
}

/// Energy accumulators: `[nelem][np][np]`.
pub fn accum_energy(num_elems: usize) -> [usize; 3] {
    [num_elems, NP, NP]
}

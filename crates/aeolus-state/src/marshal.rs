//! Layout transforms between external flat buffers and host mirrors.
//!
//! Two transforms cover every field this core marshals:
//!
//! * [`transpose_pair`] — vector fields are level-major on the external
//!   side (`…[lev][2]…`) and component-major internally (`…[2][lev]…`);
//!   the transform swaps that axis pair and is its own inverse with the
//!   extents exchanged.
//! * [`gather_species`] / [`scatter_species`] — external tracer buffers
//!   stride by the compile-time capacity while internal storage is sized
//!   by the runtime tracer count; only the leading species blocks move.
//!
//! Scalar fields with identical axis order copy without a transform.

use aeolus_core::{InitError, Real};

/// Check that an external buffer's length matches the container's
/// expectation before marshalling into or out of it.
pub(crate) fn expect_len(
    name: &'static str,
    got: usize,
    expected: usize,
) -> Result<(), InitError> {
    if got != expected {
        return Err(InitError::ShapeMismatch {
            name,
            expected,
            got,
        });
    }
    Ok(())
}

/// Copy `src` laid out `[outer][a][b][inner]` into `dst` laid out
/// `[outer][b][a][inner]`.
///
/// Calling it again with `a` and `b` exchanged undoes the transform.
pub fn transpose_pair(
    dst: &mut [Real],
    src: &[Real],
    outer: usize,
    a: usize,
    b: usize,
    inner: usize,
) {
    debug_assert_eq!(src.len(), outer * a * b * inner);
    debug_assert_eq!(dst.len(), src.len());
    for o in 0..outer {
        for x in 0..a {
            for y in 0..b {
                let s = ((o * a + x) * b + y) * inner;
                let d = ((o * b + y) * a + x) * inner;
                dst[d..d + inner].copy_from_slice(&src[s..s + inner]);
            }
        }
    }
}

/// Copy the first `used` of `cap` species blocks per outer index:
/// `src[outer][cap][inner]` into `dst[outer][used][inner]`.
pub fn gather_species(
    dst: &mut [Real],
    src: &[Real],
    outer: usize,
    used: usize,
    cap: usize,
    inner: usize,
) {
    debug_assert!(used <= cap);
    debug_assert_eq!(src.len(), outer * cap * inner);
    debug_assert_eq!(dst.len(), outer * used * inner);
    for o in 0..outer {
        for iq in 0..used {
            let s = (o * cap + iq) * inner;
            let d = (o * used + iq) * inner;
            dst[d..d + inner].copy_from_slice(&src[s..s + inner]);
        }
    }
}

/// Inverse of [`gather_species`]: `src[outer][used][inner]` into the
/// leading species blocks of `dst[outer][cap][inner]`. Blocks beyond
/// `used` are left untouched.
pub fn scatter_species(
    dst: &mut [Real],
    src: &[Real],
    outer: usize,
    used: usize,
    cap: usize,
    inner: usize,
) {
    debug_assert!(used <= cap);
    debug_assert_eq!(dst.len(), outer * cap * inner);
    debug_assert_eq!(src.len(), outer * used * inner);
    for o in 0..outer {
        for iq in 0..used {
            let s = (o * used + iq) * inner;
            let d = (o * cap + iq) * inner;
            dst[d..d + inner].copy_from_slice(&src[s..s + inner]);
        }
    }
}

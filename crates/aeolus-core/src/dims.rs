//! Compile-time grid dimensions shared across the workspace.
//!
//! The external caller and the engine agree on these extents at build time;
//! only the element count and the tracer count are runtime quantities.

/// Scalar type for all physical fields.
pub type Real = f64;

/// Gauss–Lobatto points per element edge. Each element carries an
/// `NP × NP` horizontal point grid.
pub const NP: usize = 4;

/// Vertical levels at layer midpoints.
pub const NUM_PHYSICAL_LEV: usize = 72;

/// Vertical interfaces. Always one more than the midpoint count.
pub const NUM_INTERFACE_LEV: usize = NUM_PHYSICAL_LEV + 1;

/// Time levels carried by the prognostic state containers.
pub const NUM_TIME_LEVELS: usize = 3;

/// Time levels carried by the tracer-mass field.
pub const Q_NUM_TIME_LEVELS: usize = 2;

/// Compile-time tracer capacity. External tracer buffers are strided by
/// this; the runtime tracer count `qsize` must not exceed it.
pub const MAX_TRACERS: usize = 40;

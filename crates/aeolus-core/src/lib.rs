//! Core types for the Aeolus dynamical-core bridge.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! compile-time grid dimensions, the scalar type, the setup error taxonomy,
//! the parameter validator, and the checked views over externally owned
//! flat buffers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod check;
pub mod dims;
pub mod error;
pub mod view;

pub use check::{check_option_cmp, check_option_in, ComparisonOp};
pub use dims::{
    Real, MAX_TRACERS, NP, NUM_INTERFACE_LEV, NUM_PHYSICAL_LEV, NUM_TIME_LEVELS,
    Q_NUM_TIME_LEVELS,
};
pub use error::InitError;
pub use view::{ExtView, ExtViewMut, Shape};

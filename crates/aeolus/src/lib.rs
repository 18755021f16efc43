//! Aeolus: the initialization and state-synchronization bridge between a
//! legacy flat-array dynamical core and a structured, device-portable
//! simulation engine.
//!
//! This facade crate re-exports the public API of the Aeolus sub-crates.
//! For most users, adding `aeolus` as a single dependency is sufficient;
//! the C boundary lives in the separate `aeolus-ffi` crate.
//!
//! # Quick start
//!
//! ```rust
//! use aeolus::prelude::*;
//!
//! // Validate and install the simulation-wide parameters.
//! let raw = RawSimulationParams {
//!     remap_alg: 1,
//!     limiter_option: 8,
//!     rsplit: 3,
//!     qsplit: 1,
//!     time_step_type: 5,
//!     qsize: 4,
//!     state_frequency: 480,
//!     nu: 1.0e15,
//!     nu_p: 1.0e15,
//!     nu_q: 1.0e15,
//!     nu_s: 1.0e15,
//!     nu_div: 1.0e15,
//!     nu_top: 2.5e5,
//!     hypervis_order: 2,
//!     hypervis_subcycle: 3,
//!     hypervis_scaling: 0.0,
//!     ftype: -1,
//!     prescribed_wind: false,
//!     moisture: true,
//!     disable_diagnostics: false,
//!     use_cpstar: false,
//!     use_semi_lagrangian_transport: false,
//! };
//! let params = SimulationParams::build(&raw).unwrap();
//! assert_eq!(params.nu_ratio1, 1.0);
//!
//! // Build the context in dependency order.
//! let mut ctx = Context::new();
//! ctx.set_params(params);
//! ctx.init_elements(4).unwrap();
//! assert_eq!(ctx.elements().unwrap().num_elems(), 4);
//!
//! // Functor construction is gated on the full prerequisite set.
//! assert!(ctx.init_functors().is_err());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `aeolus-core` | dimensions, errors, validator, checked views |
//! | [`state`] | `aeolus-state` | parameters, coordinate state, containers, marshaller |
//! | [`engine`] | `aeolus-engine` | context, functors, boundary-exchange wiring |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types: dimensions, errors, the validator, and checked views.
pub mod types {
    pub use aeolus_core::*;
}

/// Configuration, coordinate state, containers, and the marshaller.
pub mod state {
    pub use aeolus_state::*;
}

/// The context, functor shells, and exchange wiring.
pub mod engine {
    pub use aeolus_engine::*;
}

/// The types most callers need.
pub mod prelude {
    pub use aeolus_core::{ExtView, ExtViewMut, InitError, Real};
    pub use aeolus_engine::{Context, ExchangeKind};
    pub use aeolus_state::{
        Elements, ForcingAlg, HybridVCoord, RawSimulationParams, ReferenceElement, RemapAlg,
        SimulationParams, TimeLevel, Tracers,
    };
}

//! Initialization orchestrator for the Aeolus dynamical-core bridge.
//!
//! Provides the [`Context`] that owns every subsystem for the lifetime
//! of the process, the kernel functor shells constructed against a
//! fully validated context, and the boundary-exchange wiring that
//! attaches each functor to its communication buffers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod exchange;
pub mod functors;

pub use context::{Context, Functors};
pub use exchange::{BoundaryExchange, BuffersManager, Connectivity, ExchangeKind};
pub use functors::{
    CaarFunctor, EulerStepFunctor, HyperviscosityFunctor, SphereOperators, VerticalRemapManager,
};

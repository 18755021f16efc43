//! Simulation-wide configuration, coordinate state, domain state
//! containers, and the bidirectional flat-buffer marshaller.
//!
//! Everything here sits on the structured side of the legacy boundary:
//! the external caller owns flat column-major buffers, this crate owns
//! the engine's structured, device-resident arrays, and the push/pull
//! operations translate between the two layouts.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffers;
pub mod derived;
pub mod diagnostics;
pub mod elements;
pub mod geometry;
pub mod layout;
pub mod marshal;
pub mod memory;
pub mod params;
pub mod reference_element;
pub mod state;
pub mod time_level;
pub mod tracers;
pub mod vcoord;

pub use buffers::ElementsBuffers;
pub use derived::ElementsDerived;
pub use diagnostics::{Diagnostics, DiagnosticsFields};
pub use elements::Elements;
pub use geometry::{ElementsGeometry, GeometryFields};
pub use memory::{DeviceArray, HostMirror};
pub use params::{
    ForcingAlg, MoistDry, RawSimulationParams, RemapAlg, SimulationParams, TestCase,
};
pub use reference_element::ReferenceElement;
pub use state::ElementsState;
pub use time_level::TimeLevel;
pub use tracers::Tracers;
pub use vcoord::HybridVCoord;

//! The element aggregate: geometry, prognostic state, derived
//! diagnostics, and scratch buffers.

use crate::buffers::ElementsBuffers;
use crate::derived::ElementsDerived;
use crate::geometry::ElementsGeometry;
use crate::state::ElementsState;

/// All per-element storage, constructed in one shot.
///
/// The four sub-containers share the same element count and ordering by
/// construction; independent consumers borrow sub-containers from here
/// rather than allocating their own.
#[derive(Debug)]
pub struct Elements {
    num_elems: usize,
    /// Metric terms.
    pub geometry: ElementsGeometry,
    /// Time-dependent prognostic state.
    pub state: ElementsState,
    /// Derived diagnostics and forcing accumulators.
    pub derived: ElementsDerived,
    /// Reusable scratch.
    pub buffers: ElementsBuffers,
}

impl Elements {
    /// Allocate all sub-containers for `num_elems` elements.
    ///
    /// `consthv` selects constant-coefficient hyperviscosity and decides
    /// whether the tensor geometry fields are populated.
    pub fn new(num_elems: usize, consthv: bool) -> Self {
        Self {
            num_elems,
            geometry: ElementsGeometry::new(num_elems, consthv),
            state: ElementsState::new(num_elems),
            derived: ElementsDerived::new(num_elems),
            buffers: ElementsBuffers::new(num_elems),
        }
    }

    /// The element count shared by every sub-container.
    pub fn num_elems(&self) -> usize {
        self.num_elems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_containers_share_the_element_count() {
        let e = Elements::new(5, true);
        assert_eq!(e.num_elems(), 5);
        assert_eq!(e.geometry.num_elems(), 5);
        assert_eq!(e.state.num_elems(), 5);
        assert_eq!(e.derived.num_elems(), 5);
        assert_eq!(e.buffers.num_elems(), 5);
    }
}

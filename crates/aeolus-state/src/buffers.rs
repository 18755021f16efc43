//! Reusable per-element scratch buffers.
//!
//! Allocated once at element construction and shared by the kernel
//! functors; no marshalling crosses the external boundary here.

use aeolus_core::{NP, NUM_PHYSICAL_LEV};

use crate::memory::DeviceArray;

/// Scratch storage shared by the kernel functors.
#[derive(Debug)]
pub struct ElementsBuffers {
    num_elems: usize,
    /// Hydrostatic pressure work array.
    pub pressure: DeviceArray,
    /// Pressure gradient work array.
    pub pressure_grad: DeviceArray,
    /// Relative vorticity work array.
    pub vorticity: DeviceArray,
    /// Divergence of mass flux work array.
    pub div_vdp: DeviceArray,
}

impl ElementsBuffers {
    /// Allocate scratch storage for `num_elems` elements.
    pub fn new(num_elems: usize) -> Self {
        let per_level = [num_elems, NUM_PHYSICAL_LEV, NP, NP];
        Self {
            num_elems,
            pressure: DeviceArray::zeros("buf_pressure", &per_level),
            pressure_grad: DeviceArray::zeros(
                "buf_pressure_grad",
                &[num_elems, 2, NUM_PHYSICAL_LEV, NP, NP],
            ),
            vorticity: DeviceArray::zeros("buf_vorticity", &per_level),
            div_vdp: DeviceArray::zeros("buf_div_vdp", &per_level),
        }
    }

    /// Number of elements this container was sized for.
    pub fn num_elems(&self) -> usize {
        self.num_elems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scratch_extents_follow_the_element_count() {
        let b = ElementsBuffers::new(3);
        assert_eq!(b.pressure.len(), 3 * NUM_PHYSICAL_LEV * NP * NP);
        assert_eq!(b.pressure_grad.len(), 3 * 2 * NUM_PHYSICAL_LEV * NP * NP);
    }
}

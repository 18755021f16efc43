//! Derived diagnostics and forcing accumulators.

use aeolus_core::{ExtView, ExtViewMut, InitError, NP, NUM_PHYSICAL_LEV};

use crate::marshal::{expect_len, transpose_pair};
use crate::memory::DeviceArray;

/// Derived per-element fields: the vertical-velocity proxy and the
/// forcing accumulators.
///
/// Momentum forcing is component-major internally
/// (`[nelem][2][lev][np][np]`); the external buffer is level-major.
#[derive(Debug)]
pub struct ElementsDerived {
    num_elems: usize,
    /// Vertical pressure velocity over pressure.
    pub omega_p: DeviceArray,
    /// Momentum forcing accumulator.
    pub fm: DeviceArray,
    /// Temperature forcing accumulator.
    pub ft: DeviceArray,
}

impl ElementsDerived {
    /// Allocate derived storage for `num_elems` elements.
    pub fn new(num_elems: usize) -> Self {
        Self {
            num_elems,
            omega_p: DeviceArray::zeros(
                "derived_omega_p",
                &[num_elems, NUM_PHYSICAL_LEV, NP, NP],
            ),
            fm: DeviceArray::zeros("derived_fm", &[num_elems, 2, NUM_PHYSICAL_LEV, NP, NP]),
            ft: DeviceArray::zeros("derived_ft", &[num_elems, NUM_PHYSICAL_LEV, NP, NP]),
        }
    }

    /// Number of elements this container was sized for.
    pub fn num_elems(&self) -> usize {
        self.num_elems
    }

    /// Copy the vertical-velocity proxy to its external buffer.
    pub fn push_omega_p(&self, out: &mut ExtViewMut<'_>) -> Result<(), InitError> {
        expect_len(out.name(), out.as_slice().len(), self.omega_p.len())?;
        let mut m = self.omega_p.create_mirror();
        self.omega_p.deep_copy_to(&mut m);
        out.as_mut_slice().copy_from_slice(m.as_slice());
        Ok(())
    }

    /// Copy the forcing accumulators to their external buffers.
    pub fn push_forcing(
        &self,
        fm: &mut ExtViewMut<'_>,
        ft: &mut ExtViewMut<'_>,
    ) -> Result<(), InitError> {
        expect_len(fm.name(), fm.as_slice().len(), self.fm.len())?;
        expect_len(ft.name(), ft.as_slice().len(), self.ft.len())?;

        let mut mfm = self.fm.create_mirror();
        self.fm.deep_copy_to(&mut mfm);
        transpose_pair(
            fm.as_mut_slice(),
            mfm.as_slice(),
            self.num_elems,
            2,
            NUM_PHYSICAL_LEV,
            NP * NP,
        );

        let mut mft = self.ft.create_mirror();
        self.ft.deep_copy_to(&mut mft);
        ft.as_mut_slice().copy_from_slice(mft.as_slice());
        Ok(())
    }

    /// Copy the external forcing buffers into device storage.
    pub fn pull_forcing(
        &mut self,
        fm: &ExtView<'_>,
        ft: &ExtView<'_>,
    ) -> Result<(), InitError> {
        expect_len(fm.name(), fm.as_slice().len(), self.fm.len())?;
        expect_len(ft.name(), ft.as_slice().len(), self.ft.len())?;

        let mut mfm = self.fm.create_mirror();
        transpose_pair(
            mfm.as_mut_slice(),
            fm.as_slice(),
            self.num_elems,
            NUM_PHYSICAL_LEV,
            2,
            NP * NP,
        );
        self.fm.deep_copy_from(&mfm);

        let mut mft = self.ft.create_mirror();
        mft.as_mut_slice().copy_from_slice(ft.as_slice());
        self.ft.deep_copy_from(&mft);
        Ok(())
    }
}

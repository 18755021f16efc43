//! Time-dependent prognostic state: velocity, temperature, pressure
//! thickness, and surface pressure.

use aeolus_core::{ExtView, ExtViewMut, InitError, NP, NUM_PHYSICAL_LEV, NUM_TIME_LEVELS};

use crate::marshal::{expect_len, transpose_pair};
use crate::memory::DeviceArray;

/// Prognostic state for all elements, device-resident.
///
/// Velocity is component-major internally (`[nelem][NT][2][lev][np][np]`)
/// while the external buffer is level-major; the marshaller transposes
/// that axis pair in both directions.
#[derive(Debug)]
pub struct ElementsState {
    num_elems: usize,
    /// Horizontal velocity.
    pub v: DeviceArray,
    /// Temperature.
    pub t: DeviceArray,
    /// Pressure thickness.
    pub dp3d: DeviceArray,
    /// Surface pressure.
    pub ps_v: DeviceArray,
}

impl ElementsState {
    /// Allocate prognostic storage for `num_elems` elements.
    pub fn new(num_elems: usize) -> Self {
        Self {
            num_elems,
            v: DeviceArray::zeros(
                "state_v",
                &[num_elems, NUM_TIME_LEVELS, 2, NUM_PHYSICAL_LEV, NP, NP],
            ),
            t: DeviceArray::zeros(
                "state_t",
                &[num_elems, NUM_TIME_LEVELS, NUM_PHYSICAL_LEV, NP, NP],
            ),
            dp3d: DeviceArray::zeros(
                "state_dp3d",
                &[num_elems, NUM_TIME_LEVELS, NUM_PHYSICAL_LEV, NP, NP],
            ),
            ps_v: DeviceArray::zeros("state_ps_v", &[num_elems, NUM_TIME_LEVELS, NP, NP]),
        }
    }

    /// Number of elements this container was sized for.
    pub fn num_elems(&self) -> usize {
        self.num_elems
    }

    /// Copy the external prognostic buffers into device storage.
    pub fn pull(
        &mut self,
        v: &ExtView<'_>,
        t: &ExtView<'_>,
        dp3d: &ExtView<'_>,
        ps_v: &ExtView<'_>,
    ) -> Result<(), InitError> {
        let ne = self.num_elems;
        expect_len(v.name(), v.as_slice().len(), self.v.len())?;
        expect_len(t.name(), t.as_slice().len(), self.t.len())?;
        expect_len(dp3d.name(), dp3d.as_slice().len(), self.dp3d.len())?;
        expect_len(ps_v.name(), ps_v.as_slice().len(), self.ps_v.len())?;

        let mut mv = self.v.create_mirror();
        transpose_pair(
            mv.as_mut_slice(),
            v.as_slice(),
            ne * NUM_TIME_LEVELS,
            NUM_PHYSICAL_LEV,
            2,
            NP * NP,
        );
        self.v.deep_copy_from(&mv);

        let mut mt = self.t.create_mirror();
        mt.as_mut_slice().copy_from_slice(t.as_slice());
        self.t.deep_copy_from(&mt);

        let mut mdp = self.dp3d.create_mirror();
        mdp.as_mut_slice().copy_from_slice(dp3d.as_slice());
        self.dp3d.deep_copy_from(&mdp);

        let mut mps = self.ps_v.create_mirror();
        mps.as_mut_slice().copy_from_slice(ps_v.as_slice());
        self.ps_v.deep_copy_from(&mps);
        Ok(())
    }

    /// Copy device storage back into the external prognostic buffers.
    pub fn push(
        &self,
        v: &mut ExtViewMut<'_>,
        t: &mut ExtViewMut<'_>,
        dp3d: &mut ExtViewMut<'_>,
    ) -> Result<(), InitError> {
        let ne = self.num_elems;
        expect_len(v.name(), v.as_slice().len(), self.v.len())?;
        expect_len(t.name(), t.as_slice().len(), self.t.len())?;
        expect_len(dp3d.name(), dp3d.as_slice().len(), self.dp3d.len())?;

        let mut mv = self.v.create_mirror();
        self.v.deep_copy_to(&mut mv);
        transpose_pair(
            v.as_mut_slice(),
            mv.as_slice(),
            ne * NUM_TIME_LEVELS,
            2,
            NUM_PHYSICAL_LEV,
            NP * NP,
        );

        let mut mt = self.t.create_mirror();
        self.t.deep_copy_to(&mut mt);
        t.as_mut_slice().copy_from_slice(mt.as_slice());

        let mut mdp = self.dp3d.create_mirror();
        self.dp3d.deep_copy_to(&mut mdp);
        dp3d.as_mut_slice().copy_from_slice(mdp.as_slice());
        Ok(())
    }

    /// Copy the surface-pressure field back into its external buffer.
    ///
    /// `ps_v` has no layout transform, so the external buffer receives
    /// the mirror contents directly.
    pub fn push_ps_v(&self, ps_v: &mut ExtViewMut<'_>) -> Result<(), InitError> {
        expect_len(ps_v.name(), ps_v.as_slice().len(), self.ps_v.len())?;
        let mut m = self.ps_v.create_mirror();
        self.ps_v.deep_copy_to(&mut m);
        ps_v.as_mut_slice().copy_from_slice(m.as_slice());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout;
    use aeolus_core::Real;

    fn filled(len: usize, seed: Real) -> Vec<Real> {
        (0..len).map(|i| seed + i as Real).collect()
    }

    #[test]
    fn pull_then_push_reproduces_the_buffers() {
        let ne = 2;
        let mut st = ElementsState::new(ne);

        let v0 = filled(layout::len_of(&layout::state_v(ne)), 0.5);
        let t0 = filled(layout::len_of(&layout::state_scalar(ne)), 100.0);
        let dp0 = filled(layout::len_of(&layout::state_scalar(ne)), 7.0);
        let ps0 = filled(layout::len_of(&layout::state_ps_v(ne)), 1000.0);

        st.pull(
            &ExtView::new("v", &v0, &layout::state_v(ne)).unwrap(),
            &ExtView::new("t", &t0, &layout::state_scalar(ne)).unwrap(),
            &ExtView::new("dp3d", &dp0, &layout::state_scalar(ne)).unwrap(),
            &ExtView::new("ps_v", &ps0, &layout::state_ps_v(ne)).unwrap(),
        )
        .unwrap();

        let mut v1 = vec![0.0; v0.len()];
        let mut t1 = vec![0.0; t0.len()];
        let mut dp1 = vec![0.0; dp0.len()];
        let mut ps1 = vec![0.0; ps0.len()];
        st.push(
            &mut ExtViewMut::new("v", &mut v1, &layout::state_v(ne)).unwrap(),
            &mut ExtViewMut::new("t", &mut t1, &layout::state_scalar(ne)).unwrap(),
            &mut ExtViewMut::new("dp3d", &mut dp1, &layout::state_scalar(ne)).unwrap(),
        )
        .unwrap();
        st.push_ps_v(&mut ExtViewMut::new("ps_v", &mut ps1, &layout::state_ps_v(ne)).unwrap())
            .unwrap();

        assert_eq!(v1, v0);
        assert_eq!(t1, t0);
        assert_eq!(dp1, dp0);
        assert_eq!(ps1, ps0);
    }

    #[test]
    fn velocity_transpose_moves_components_inward() {
        let ne = 1;
        let mut st = ElementsState::new(ne);
        let shape = layout::state_v(ne);
        let mut v0 = vec![0.0; layout::len_of(&shape)];
        // External index (ie=0, tl=0, k=1, c=1, i=0, j=0).
        let ext_idx = ((NUM_PHYSICAL_LEV * 0 + 1) * 2 + 1) * NP * NP;
        v0[ext_idx] = 9.0;

        let t0 = vec![0.0; layout::len_of(&layout::state_scalar(ne))];
        let ps0 = vec![0.0; layout::len_of(&layout::state_ps_v(ne))];
        st.pull(
            &ExtView::new("v", &v0, &shape).unwrap(),
            &ExtView::new("t", &t0, &layout::state_scalar(ne)).unwrap(),
            &ExtView::new("dp3d", &t0, &layout::state_scalar(ne)).unwrap(),
            &ExtView::new("ps_v", &ps0, &layout::state_ps_v(ne)).unwrap(),
        )
        .unwrap();

        let mut m = st.v.create_mirror();
        st.v.deep_copy_to(&mut m);
        // Internal index (ie=0, tl=0, c=1, k=1, i=0, j=0).
        let int_idx = (NUM_PHYSICAL_LEV + 1) * NP * NP;
        assert_eq!(m.as_slice()[int_idx], 9.0);
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        let mut st = ElementsState::new(2);
        // Buffers sized for one element, container sized for two.
        let v0 = vec![0.0; layout::len_of(&layout::state_v(1))];
        let t0 = vec![0.0; layout::len_of(&layout::state_scalar(1))];
        let ps0 = vec![0.0; layout::len_of(&layout::state_ps_v(1))];
        let err = st.pull(
            &ExtView::new("v", &v0, &layout::state_v(1)).unwrap(),
            &ExtView::new("t", &t0, &layout::state_scalar(1)).unwrap(),
            &ExtView::new("dp3d", &t0, &layout::state_scalar(1)).unwrap(),
            &ExtView::new("ps_v", &ps0, &layout::state_ps_v(1)).unwrap(),
        );
        assert!(matches!(err, Err(InitError::ShapeMismatch { .. })));
    }
}

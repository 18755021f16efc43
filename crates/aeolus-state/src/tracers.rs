//! Tracer fields: mixing ratio, tracer mass, and the debug-forcing
//! tendency.

use aeolus_core::{
    ExtView, ExtViewMut, InitError, MAX_TRACERS, NP, NUM_PHYSICAL_LEV, Q_NUM_TIME_LEVELS,
};

use crate::marshal::{expect_len, gather_species, scatter_species};
use crate::memory::DeviceArray;

/// Per-element, per-species tracer storage, device-resident.
///
/// Internal arrays are sized by the runtime species count; external
/// buffers stride by [`MAX_TRACERS`], so marshalling moves only the
/// leading `qsize` species blocks. The forcing tendency `fq` is
/// allocated on first demand and only ever touched by the debug forcing
/// algorithm.
#[derive(Debug)]
pub struct Tracers {
    num_elems: usize,
    qsize: usize,
    /// Tracer mixing ratio.
    pub q: DeviceArray,
    /// Pressure-weighted tracer mass, two time levels.
    pub qdp: DeviceArray,
    fq: Option<DeviceArray>,
}

impl Tracers {
    /// Allocate tracer storage for `num_elems` elements and `qsize`
    /// species. The forcing tendency stays unallocated.
    pub fn new(num_elems: usize, qsize: usize) -> Self {
        Self {
            num_elems,
            qsize,
            q: DeviceArray::zeros("tracers_q", &[num_elems, qsize, NUM_PHYSICAL_LEV, NP, NP]),
            qdp: DeviceArray::zeros(
                "tracers_qdp",
                &[
                    num_elems,
                    Q_NUM_TIME_LEVELS,
                    qsize,
                    NUM_PHYSICAL_LEV,
                    NP,
                    NP,
                ],
            ),
            fq: None,
        }
    }

    /// Number of elements this container was sized for.
    pub fn num_elems(&self) -> usize {
        self.num_elems
    }

    /// Runtime species count, identical across all tracer fields.
    pub fn qsize(&self) -> usize {
        self.qsize
    }

    /// Whether the forcing tendency has been demanded yet.
    pub fn fq_allocated(&self) -> bool {
        self.fq.is_some()
    }

    fn inner() -> usize {
        NUM_PHYSICAL_LEV * NP * NP
    }

    fn ext_qdp_len(&self) -> usize {
        self.num_elems * Q_NUM_TIME_LEVELS * MAX_TRACERS * Self::inner()
    }

    fn ext_q_len(&self) -> usize {
        self.num_elems * MAX_TRACERS * Self::inner()
    }

    /// Copy both tracer-mass time levels in from the external buffer.
    pub fn pull_qdp(&mut self, qdp: &ExtView<'_>) -> Result<(), InitError> {
        expect_len(qdp.name(), qdp.as_slice().len(), self.ext_qdp_len())?;
        let mut m = self.qdp.create_mirror();
        gather_species(
            m.as_mut_slice(),
            qdp.as_slice(),
            self.num_elems * Q_NUM_TIME_LEVELS,
            self.qsize,
            MAX_TRACERS,
            Self::inner(),
        );
        self.qdp.deep_copy_from(&m);
        Ok(())
    }

    /// Copy both tracer-mass time levels out to the external buffer.
    pub fn push_qdp(&self, qdp: &mut ExtViewMut<'_>) -> Result<(), InitError> {
        expect_len(qdp.name(), qdp.as_slice().len(), self.ext_qdp_len())?;
        let mut m = self.qdp.create_mirror();
        self.qdp.deep_copy_to(&mut m);
        scatter_species(
            qdp.as_mut_slice(),
            m.as_slice(),
            self.num_elems * Q_NUM_TIME_LEVELS,
            self.qsize,
            MAX_TRACERS,
            Self::inner(),
        );
        Ok(())
    }

    /// Copy the mixing ratio out to the external buffer.
    pub fn push_q(&self, q: &mut ExtViewMut<'_>) -> Result<(), InitError> {
        expect_len(q.name(), q.as_slice().len(), self.ext_q_len())?;
        let mut m = self.q.create_mirror();
        self.q.deep_copy_to(&mut m);
        scatter_species(
            q.as_mut_slice(),
            m.as_slice(),
            self.num_elems,
            self.qsize,
            MAX_TRACERS,
            Self::inner(),
        );
        Ok(())
    }

    fn ensure_fq(&mut self) -> &mut DeviceArray {
        let (ne, qs) = (self.num_elems, self.qsize);
        self.fq.get_or_insert_with(|| {
            DeviceArray::zeros("tracers_fq", &[ne, qs, NUM_PHYSICAL_LEV, NP, NP])
        })
    }

    /// Copy the debug-forcing tendency in, allocating it on first use.
    ///
    /// Callers gate this on the configured forcing algorithm; the
    /// container itself only manages storage.
    pub fn pull_fq(&mut self, fq: &ExtView<'_>) -> Result<(), InitError> {
        expect_len(fq.name(), fq.as_slice().len(), self.ext_q_len())?;
        let (ne, qs) = (self.num_elems, self.qsize);
        let dev = self.ensure_fq();
        let mut m = dev.create_mirror();
        gather_species(
            m.as_mut_slice(),
            fq.as_slice(),
            ne,
            qs,
            MAX_TRACERS,
            Self::inner(),
        );
        dev.deep_copy_from(&m);
        Ok(())
    }

    /// Copy the debug-forcing tendency out, allocating it on first use.
    pub fn push_fq(&mut self, fq: &mut ExtViewMut<'_>) -> Result<(), InitError> {
        expect_len(fq.name(), fq.as_slice().len(), self.ext_q_len())?;
        let (ne, qs) = (self.num_elems, self.qsize);
        let dev = self.ensure_fq();
        let mut m = dev.create_mirror();
        dev.deep_copy_to(&mut m);
        scatter_species(
            fq.as_mut_slice(),
            m.as_slice(),
            ne,
            qs,
            MAX_TRACERS,
            Self::inner(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout;
    use aeolus_core::Real;

    fn ext_qdp(ne: usize) -> Vec<Real> {
        (0..layout::len_of(&layout::qdp(ne)))
            .map(|i| (i % 1013) as Real)
            .collect()
    }

    #[test]
    fn qdp_round_trip_is_exact() {
        let (ne, qs) = (2, 3);
        let mut tr = Tracers::new(ne, qs);
        let src = ext_qdp(ne);
        tr.pull_qdp(&ExtView::new("qdp", &src, &layout::qdp(ne)).unwrap())
            .unwrap();

        let mut out = src.clone();
        tr.push_qdp(&mut ExtViewMut::new("qdp", &mut out, &layout::qdp(ne)).unwrap())
            .unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn species_beyond_qsize_are_never_touched() {
        let (ne, qs) = (1, 2);
        let mut tr = Tracers::new(ne, qs);
        let src = ext_qdp(ne);
        tr.pull_qdp(&ExtView::new("qdp", &src, &layout::qdp(ne)).unwrap())
            .unwrap();

        let mut out = vec![-3.0; src.len()];
        tr.push_qdp(&mut ExtViewMut::new("qdp", &mut out, &layout::qdp(ne)).unwrap())
            .unwrap();
        let inner = NUM_PHYSICAL_LEV * NP * NP;
        // First time level, species at and beyond qsize keep the sentinel.
        assert_eq!(out[qs * inner], -3.0);
        assert_eq!(out[(MAX_TRACERS - 1) * inner], -3.0);
        // Leading species match the source.
        assert_eq!(&out[..qs * inner], &src[..qs * inner]);
    }

    #[test]
    fn fq_stays_unallocated_until_demanded() {
        let (ne, qs) = (1, 1);
        let mut tr = Tracers::new(ne, qs);
        assert!(!tr.fq_allocated());

        let src = vec![1.5; layout::len_of(&layout::q(ne))];
        tr.pull_fq(&ExtView::new("fq", &src, &layout::q(ne)).unwrap())
            .unwrap();
        assert!(tr.fq_allocated());

        let mut out = vec![0.0; src.len()];
        tr.push_fq(&mut ExtViewMut::new("fq", &mut out, &layout::q(ne)).unwrap())
            .unwrap();
        let inner = NUM_PHYSICAL_LEV * NP * NP;
        assert!(out[..qs * inner].iter().all(|&x| x == 1.5));
    }

    #[test]
    fn push_fq_allocates_when_null() {
        let mut tr = Tracers::new(1, 1);
        let mut out = vec![7.0; layout::len_of(&layout::q(1))];
        tr.push_fq(&mut ExtViewMut::new("fq", &mut out, &layout::q(1)).unwrap())
            .unwrap();
        assert!(tr.fq_allocated());
        // Freshly allocated tendency pushes zeros over the leading species.
        let inner = NUM_PHYSICAL_LEV * NP * NP;
        assert!(out[..inner].iter().all(|&x| x == 0.0));
        assert!(out[inner..].iter().all(|&x| x == 7.0));
    }

    #[test]
    fn zero_species_containers_marshal_nothing() {
        let ne = 1;
        let mut tr = Tracers::new(ne, 0);
        let src = ext_qdp(ne);
        tr.pull_qdp(&ExtView::new("qdp", &src, &layout::qdp(ne)).unwrap())
            .unwrap();
        let mut out = vec![-1.0; src.len()];
        tr.push_qdp(&mut ExtViewMut::new("qdp", &mut out, &layout::qdp(ne)).unwrap())
            .unwrap();
        assert!(out.iter().all(|&x| x == -1.0));
    }
}

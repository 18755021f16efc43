//! Energy and tracer-mass diagnostic accumulators.
//!
//! The external caller owns the accumulator arrays between runs; this
//! container takes host-side copies at initialization. Accumulator
//! buffers stride by the compile-time tracer capacity like every other
//! tracer field.

use aeolus_core::{ExtView, InitError, Real, MAX_TRACERS, NP, NUM_PHYSICAL_LEV};

use crate::marshal::{expect_len, gather_species};

/// Host-side diagnostic state.
#[derive(Debug)]
pub struct Diagnostics {
    num_elems: usize,
    qsize: usize,
    /// Tracer mixing ratio snapshot, `[nelem][qsize][lev][np][np]`.
    pub q: Vec<Real>,
    /// Tracer variance accumulator, `[nelem][qsize][np][np]`.
    pub qvar: Vec<Real>,
    /// Tracer mass accumulator, `[nelem][qsize][np][np]`.
    pub qmass: Vec<Real>,
    /// First-species mass accumulator, `[nelem][qsize][np][np]`.
    pub q1mass: Vec<Real>,
    /// Internal energy accumulator, `[nelem][np][np]`.
    pub iener: Vec<Real>,
    /// Wet internal energy accumulator, `[nelem][np][np]`.
    pub iener_wet: Vec<Real>,
    /// Kinetic energy accumulator, `[nelem][np][np]`.
    pub kener: Vec<Real>,
    /// Potential energy accumulator, `[nelem][np][np]`.
    pub pener: Vec<Real>,
}

/// The eight external diagnostic buffers, shape-checked.
pub struct DiagnosticsFields<'a> {
    /// Tracer mixing ratio, `[nelem][MAX_TRACERS][lev][np][np]`.
    pub q: ExtView<'a>,
    /// Tracer variance accumulator, `[nelem][MAX_TRACERS][np][np]`.
    pub qvar: ExtView<'a>,
    /// Tracer mass accumulator, `[nelem][MAX_TRACERS][np][np]`.
    pub qmass: ExtView<'a>,
    /// First-species mass accumulator, `[nelem][MAX_TRACERS][np][np]`.
    pub q1mass: ExtView<'a>,
    /// Internal energy accumulator, `[nelem][np][np]`.
    pub iener: ExtView<'a>,
    /// Wet internal energy accumulator, `[nelem][np][np]`.
    pub iener_wet: ExtView<'a>,
    /// Kinetic energy accumulator, `[nelem][np][np]`.
    pub kener: ExtView<'a>,
    /// Potential energy accumulator, `[nelem][np][np]`.
    pub pener: ExtView<'a>,
}

impl Diagnostics {
    /// Take host copies of the caller's diagnostic buffers.
    pub fn new(
        num_elems: usize,
        qsize: usize,
        f: &DiagnosticsFields<'_>,
    ) -> Result<Self, InitError> {
        let point = NP * NP;
        let level = NUM_PHYSICAL_LEV * point;

        expect_len(f.q.name(), f.q.as_slice().len(), num_elems * MAX_TRACERS * level)?;
        for view in [&f.qvar, &f.qmass, &f.q1mass] {
            expect_len(view.name(), view.as_slice().len(), num_elems * MAX_TRACERS * point)?;
        }
        for view in [&f.iener, &f.iener_wet, &f.kener, &f.pener] {
            expect_len(view.name(), view.as_slice().len(), num_elems * point)?;
        }

        let mut q = vec![0.0; num_elems * qsize * level];
        gather_species(&mut q, f.q.as_slice(), num_elems, qsize, MAX_TRACERS, level);

        let mut tracer_accum = |view: &ExtView<'_>| {
            let mut out = vec![0.0; num_elems * qsize * point];
            gather_species(&mut out, view.as_slice(), num_elems, qsize, MAX_TRACERS, point);
            out
        };
        let qvar = tracer_accum(&f.qvar);
        let qmass = tracer_accum(&f.qmass);
        let q1mass = tracer_accum(&f.q1mass);

        Ok(Self {
            num_elems,
            qsize,
            q,
            qvar,
            qmass,
            q1mass,
            iener: f.iener.as_slice().to_vec(),
            iener_wet: f.iener_wet.as_slice().to_vec(),
            kener: f.kener.as_slice().to_vec(),
            pener: f.pener.as_slice().to_vec(),
        })
    }

    /// Number of elements this container was sized for.
    pub fn num_elems(&self) -> usize {
        self.num_elems
    }

    /// Runtime species count.
    pub fn qsize(&self) -> usize {
        self.qsize
    }
}

//! Test fixtures and buffer builders for Aeolus development.
//!
//! Provides a known-valid raw parameter set, deterministic random
//! fillers, and pre-sized external buffer bundles for every marshalled
//! field, so tests exercise the boundary with realistic shapes.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use aeolus_core::{ExtView, Real};
use aeolus_state::layout::{self, len_of};
use aeolus_state::{DiagnosticsFields, GeometryFields, RawSimulationParams};
use rand::{RngExt, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A raw parameter set that passes every validator check.
pub fn valid_raw_params() -> RawSimulationParams {
    RawSimulationParams {
        remap_alg: 1,
        limiter_option: 8,
        rsplit: 3,
        qsplit: 1,
        time_step_type: 5,
        qsize: 4,
        state_frequency: 480,
        nu: 1.0e15,
        nu_p: 1.0e15,
        nu_q: 1.0e15,
        nu_s: 1.0e15,
        nu_div: 2.5e15,
        nu_top: 2.5e5,
        hypervis_order: 2,
        hypervis_subcycle: 3,
        hypervis_scaling: 0.0,
        ftype: -1,
        prescribed_wind: false,
        moisture: true,
        disable_diagnostics: false,
        use_cpstar: false,
        use_semi_lagrangian_transport: false,
    }
}

/// Fill a buffer with reproducible pseudo-random values.
pub fn fill_deterministic(buf: &mut [Real], seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for x in buf.iter_mut() {
        *x = rng.random_range(-1.0e3..1.0e3);
    }
}

fn randomized(len: usize, seed: u64) -> Vec<Real> {
    let mut buf = vec![0.0; len];
    fill_deterministic(&mut buf, seed);
    buf
}

/// External prognostic-state buffers sized for `num_elems` elements.
pub struct StateBuffers {
    pub v: Vec<Real>,
    pub t: Vec<Real>,
    pub dp3d: Vec<Real>,
    pub qdp: Vec<Real>,
    pub ps_v: Vec<Real>,
}

impl StateBuffers {
    pub fn zeroed(num_elems: usize) -> Self {
        Self {
            v: vec![0.0; len_of(&layout::state_v(num_elems))],
            t: vec![0.0; len_of(&layout::state_scalar(num_elems))],
            dp3d: vec![0.0; len_of(&layout::state_scalar(num_elems))],
            qdp: vec![0.0; len_of(&layout::qdp(num_elems))],
            ps_v: vec![0.0; len_of(&layout::state_ps_v(num_elems))],
        }
    }

    pub fn randomized(num_elems: usize, seed: u64) -> Self {
        Self {
            v: randomized(len_of(&layout::state_v(num_elems)), seed),
            t: randomized(len_of(&layout::state_scalar(num_elems)), seed ^ 1),
            dp3d: randomized(len_of(&layout::state_scalar(num_elems)), seed ^ 2),
            qdp: randomized(len_of(&layout::qdp(num_elems)), seed ^ 3),
            ps_v: randomized(len_of(&layout::state_ps_v(num_elems)), seed ^ 4),
        }
    }
}

/// External result buffers for `push_results`, sized for `num_elems`.
pub struct ResultBuffers {
    pub v: Vec<Real>,
    pub t: Vec<Real>,
    pub dp3d: Vec<Real>,
    pub qdp: Vec<Real>,
    pub q: Vec<Real>,
    pub ps_v: Vec<Real>,
    pub omega_p: Vec<Real>,
}

impl ResultBuffers {
    pub fn zeroed(num_elems: usize) -> Self {
        Self {
            v: vec![0.0; len_of(&layout::state_v(num_elems))],
            t: vec![0.0; len_of(&layout::state_scalar(num_elems))],
            dp3d: vec![0.0; len_of(&layout::state_scalar(num_elems))],
            qdp: vec![0.0; len_of(&layout::qdp(num_elems))],
            q: vec![0.0; len_of(&layout::q(num_elems))],
            ps_v: vec![0.0; len_of(&layout::state_ps_v(num_elems))],
            omega_p: vec![0.0; len_of(&layout::per_level(num_elems))],
        }
    }
}

/// External forcing buffers sized for `num_elems` elements.
pub struct ForcingBuffers {
    pub fm: Vec<Real>,
    pub ft: Vec<Real>,
    pub fq: Vec<Real>,
}

impl ForcingBuffers {
    pub fn zeroed(num_elems: usize) -> Self {
        Self {
            fm: vec![0.0; len_of(&layout::fm(num_elems))],
            ft: vec![0.0; len_of(&layout::per_level(num_elems))],
            fq: vec![0.0; len_of(&layout::q(num_elems))],
        }
    }

    pub fn randomized(num_elems: usize, seed: u64) -> Self {
        Self {
            fm: randomized(len_of(&layout::fm(num_elems)), seed),
            ft: randomized(len_of(&layout::per_level(num_elems)), seed ^ 1),
            fq: randomized(len_of(&layout::q(num_elems)), seed ^ 2),
        }
    }
}

/// One element's worth of geometry buffers.
pub struct GeometryBuffers {
    pub d: Vec<Real>,
    pub dinv: Vec<Real>,
    pub fcor: Vec<Real>,
    pub spheremp: Vec<Real>,
    pub rspheremp: Vec<Real>,
    pub metdet: Vec<Real>,
    pub metinv: Vec<Real>,
    pub phis: Vec<Real>,
    pub tensorvisc: Vec<Real>,
    pub vec_sph2cart: Vec<Real>,
}

impl GeometryBuffers {
    pub fn randomized(seed: u64) -> Self {
        Self {
            d: randomized(len_of(&layout::TENSOR_2X2), seed),
            dinv: randomized(len_of(&layout::TENSOR_2X2), seed ^ 1),
            fcor: randomized(len_of(&layout::POINTWISE), seed ^ 2),
            spheremp: randomized(len_of(&layout::POINTWISE), seed ^ 3),
            rspheremp: randomized(len_of(&layout::POINTWISE), seed ^ 4),
            metdet: randomized(len_of(&layout::POINTWISE), seed ^ 5),
            metinv: randomized(len_of(&layout::TENSOR_2X2), seed ^ 6),
            phis: randomized(len_of(&layout::POINTWISE), seed ^ 7),
            tensorvisc: randomized(len_of(&layout::TENSOR_2X2), seed ^ 8),
            vec_sph2cart: randomized(len_of(&layout::VEC_SPH2CART), seed ^ 9),
        }
    }

    /// Shape-checked views over the element's buffers.
    pub fn fields(&self) -> GeometryFields<'_> {
        GeometryFields {
            d: ExtView::new("d", &self.d, &layout::TENSOR_2X2).unwrap(),
            dinv: ExtView::new("dinv", &self.dinv, &layout::TENSOR_2X2).unwrap(),
            fcor: ExtView::new("fcor", &self.fcor, &layout::POINTWISE).unwrap(),
            spheremp: ExtView::new("spheremp", &self.spheremp, &layout::POINTWISE).unwrap(),
            rspheremp: ExtView::new("rspheremp", &self.rspheremp, &layout::POINTWISE).unwrap(),
            metdet: ExtView::new("metdet", &self.metdet, &layout::POINTWISE).unwrap(),
            metinv: ExtView::new("metinv", &self.metinv, &layout::TENSOR_2X2).unwrap(),
            phis: ExtView::new("phis", &self.phis, &layout::POINTWISE).unwrap(),
            tensorvisc: ExtView::new("tensorvisc", &self.tensorvisc, &layout::TENSOR_2X2)
                .unwrap(),
            vec_sph2cart: ExtView::new(
                "vec_sph2cart",
                &self.vec_sph2cart,
                &layout::VEC_SPH2CART,
            )
            .unwrap(),
        }
    }
}

/// External diagnostic buffers sized for `num_elems` elements.
pub struct DiagnosticBuffers {
    pub q: Vec<Real>,
    pub qvar: Vec<Real>,
    pub qmass: Vec<Real>,
    pub q1mass: Vec<Real>,
    pub iener: Vec<Real>,
    pub iener_wet: Vec<Real>,
    pub kener: Vec<Real>,
    pub pener: Vec<Real>,
}

impl DiagnosticBuffers {
    pub fn randomized(num_elems: usize, seed: u64) -> Self {
        Self {
            q: randomized(len_of(&layout::q(num_elems)), seed),
            qvar: randomized(len_of(&layout::accum_tracer(num_elems)), seed ^ 1),
            qmass: randomized(len_of(&layout::accum_tracer(num_elems)), seed ^ 2),
            q1mass: randomized(len_of(&layout::accum_tracer(num_elems)), seed ^ 3),
            iener: randomized(len_of(&layout::accum_energy(num_elems)), seed ^ 4),
            iener_wet: randomized(len_of(&layout::accum_energy(num_elems)), seed ^ 5),
            kener: randomized(len_of(&layout::accum_energy(num_elems)), seed ^ 6),
            pener: randomized(len_of(&layout::accum_energy(num_elems)), seed ^ 7),
        }
    }

    /// Shape-checked views over the buffers.
    pub fn fields(&self, num_elems: usize) -> DiagnosticsFields<'_> {
        DiagnosticsFields {
            q: ExtView::new("q", &self.q, &layout::q(num_elems)).unwrap(),
            qvar: ExtView::new("qvar", &self.qvar, &layout::accum_tracer(num_elems)).unwrap(),
            qmass: ExtView::new("qmass", &self.qmass, &layout::accum_tracer(num_elems)).unwrap(),
            q1mass: ExtView::new("q1mass", &self.q1mass, &layout::accum_tracer(num_elems))
                .unwrap(),
            iener: ExtView::new("iener", &self.iener, &layout::accum_energy(num_elems)).unwrap(),
            iener_wet: ExtView::new(
                "iener_wet",
                &self.iener_wet,
                &layout::accum_energy(num_elems),
            )
            .unwrap(),
            kener: ExtView::new("kener", &self.kener, &layout::accum_energy(num_elems)).unwrap(),
            pener: ExtView::new("pener", &self.pener, &layout::accum_energy(num_elems)).unwrap(),
        }
    }
}

/// Hybrid-coordinate coefficient buffers with plausible monotone values.
pub struct VCoordBuffers {
    pub am: Vec<Real>,
    pub ai: Vec<Real>,
    pub bm: Vec<Real>,
    pub bi: Vec<Real>,
}

impl VCoordBuffers {
    pub fn plausible() -> Self {
        use aeolus_core::{NUM_INTERFACE_LEV, NUM_PHYSICAL_LEV};
        let ai: Vec<Real> = (0..NUM_INTERFACE_LEV)
            .map(|k| 0.2 * (1.0 - k as Real / (NUM_INTERFACE_LEV - 1) as Real))
            .collect();
        let bi: Vec<Real> = (0..NUM_INTERFACE_LEV)
            .map(|k| k as Real / (NUM_INTERFACE_LEV - 1) as Real)
            .collect();
        let mid = |v: &[Real]| {
            (0..NUM_PHYSICAL_LEV)
                .map(|k| 0.5 * (v[k] + v[k + 1]))
                .collect::<Vec<_>>()
        };
        Self {
            am: mid(&ai),
            ai,
            bm: mid(&bi),
            bi,
        }
    }
}

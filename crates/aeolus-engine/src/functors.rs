//! Kernel functor shells.
//!
//! The numerical kernels themselves are external collaborators; each
//! shell here owns the configuration its kernel needs, captured at
//! construction from an already-valid context, plus its
//! boundary-exchange wiring. A shell is never default-constructed and
//! then initialized: construction takes everything.

use aeolus_core::{InitError, Real, NP};
use aeolus_state::{
    Elements, ElementsGeometry, HybridVCoord, ReferenceElement, RemapAlg, SimulationParams,
    Tracers,
};

use crate::exchange::{BoundaryExchange, BuffersManager};

/// Spectral-element operators on the sphere: gradients, divergence,
/// vorticity against the reference-element basis.
#[derive(Clone, Debug)]
pub struct SphereOperators {
    deriv: [[Real; NP]; NP],
    num_elems: usize,
}

impl SphereOperators {
    /// Capture the basis and the domain extent.
    pub fn new(geometry: &ElementsGeometry, ref_fe: &ReferenceElement) -> Self {
        Self {
            deriv: *ref_fe.deriv(),
            num_elems: geometry.num_elems(),
        }
    }

    /// The derivative matrix the operators differentiate against.
    pub fn deriv(&self) -> &[[Real; NP]; NP] {
        &self.deriv
    }

    /// Number of elements the operators run over.
    pub fn num_elems(&self) -> usize {
        self.num_elems
    }
}

/// Horizontal advection and pressure-gradient update functor.
#[derive(Debug)]
pub struct CaarFunctor {
    num_elems: usize,
    rsplit: i32,
    ps0: Real,
    be: Option<BoundaryExchange>,
}

impl CaarFunctor {
    /// Capture the state extents and coordinate reference this kernel
    /// needs.
    pub fn new(
        elements: &Elements,
        _tracers: &Tracers,
        hvcoord: &HybridVCoord,
        rsplit: i32,
    ) -> Self {
        Self {
            num_elems: elements.num_elems(),
            rsplit,
            ps0: hvcoord.ps0,
            be: None,
        }
    }

    /// Vertical remap split count this functor subcycles under.
    pub fn rsplit(&self) -> i32 {
        self.rsplit
    }

    /// Reference surface pressure of the vertical coordinate.
    pub fn ps0(&self) -> Real {
        self.ps0
    }

    /// Number of elements the functor runs over.
    pub fn num_elems(&self) -> usize {
        self.num_elems
    }

    /// Attach this functor's halo exchange to `bm`.
    ///
    /// Exchanges the two velocity components, temperature, and pressure
    /// thickness.
    pub fn init_boundary_exchanges(&mut self, bm: &mut BuffersManager) -> Result<(), InitError> {
        if self.be.is_some() {
            return Err(InitError::AlreadyInitialized {
                what: "the Caar boundary exchange",
            });
        }
        self.be = Some(BoundaryExchange::new(bm, 0, 4)?);
        Ok(())
    }

    /// Whether the halo exchange has been wired.
    pub fn has_boundary_exchange(&self) -> bool {
        self.be.is_some()
    }
}

/// Tracer advection functor.
#[derive(Debug)]
pub struct EulerStepFunctor {
    num_elems: usize,
    qsize: usize,
    limiter_option: i32,
    be: Option<BoundaryExchange>,
}

impl EulerStepFunctor {
    /// Capture the tracer extents and limiter selection.
    pub fn new(elements: &Elements, tracers: &Tracers, params: &SimulationParams) -> Self {
        Self {
            num_elems: elements.num_elems(),
            qsize: tracers.qsize(),
            limiter_option: params.limiter_option,
            be: None,
        }
    }

    /// Re-read the limiter selection from current parameters.
    ///
    /// The exchange wiring is untouched; only kernel options refresh.
    pub fn reset(&mut self, params: &SimulationParams) {
        self.limiter_option = params.limiter_option;
        self.qsize = params.qsize;
    }

    /// Active tracer species count.
    pub fn qsize(&self) -> usize {
        self.qsize
    }

    /// Selected limiter option.
    pub fn limiter_option(&self) -> i32 {
        self.limiter_option
    }

    /// Number of elements the functor runs over.
    pub fn num_elems(&self) -> usize {
        self.num_elems
    }

    /// Attach this functor's halo exchange to `bm`, one 3-D field per
    /// tracer species.
    pub fn init_boundary_exchanges(&mut self, bm: &mut BuffersManager) -> Result<(), InitError> {
        if self.be.is_some() {
            return Err(InitError::AlreadyInitialized {
                what: "the Euler step boundary exchange",
            });
        }
        self.be = Some(BoundaryExchange::new(bm, 0, self.qsize)?);
        Ok(())
    }

    /// Whether the halo exchange has been wired.
    pub fn has_boundary_exchange(&self) -> bool {
        self.be.is_some()
    }
}

/// Hyperviscosity functor.
#[derive(Debug)]
pub struct HyperviscosityFunctor {
    num_elems: usize,
    nu: Real,
    nu_div: Real,
    nu_top: Real,
    nu_ratio1: Real,
    nu_ratio2: Real,
    hypervis_subcycle: i32,
    be: Option<BoundaryExchange>,
}

impl HyperviscosityFunctor {
    /// Capture the viscosity coefficients and their derived ratios.
    ///
    /// The ratios were computed once when the parameters were set; they
    /// are copied here, never recomputed.
    pub fn new(elements: &Elements, params: &SimulationParams) -> Self {
        Self {
            num_elems: elements.num_elems(),
            nu: params.nu,
            nu_div: params.nu_div,
            nu_top: params.nu_top,
            nu_ratio1: params.nu_ratio1,
            nu_ratio2: params.nu_ratio2,
            hypervis_subcycle: params.hypervis_subcycle,
            be: None,
        }
    }

    /// First derived viscosity ratio.
    pub fn nu_ratio1(&self) -> Real {
        self.nu_ratio1
    }

    /// Second derived viscosity ratio.
    pub fn nu_ratio2(&self) -> Real {
        self.nu_ratio2
    }

    /// Subcycle count of the diffusion solve.
    pub fn hypervis_subcycle(&self) -> i32 {
        self.hypervis_subcycle
    }

    /// Number of elements the functor runs over.
    pub fn num_elems(&self) -> usize {
        self.num_elems
    }

    /// Sponge-layer viscosity coefficient.
    pub fn nu_top(&self) -> Real {
        self.nu_top
    }

    /// Velocity viscosity coefficient.
    pub fn nu(&self) -> Real {
        self.nu
    }

    /// Divergence-damping viscosity coefficient.
    pub fn nu_div(&self) -> Real {
        self.nu_div
    }

    /// Attach this functor's halo exchange to `bm`.
    pub fn init_boundary_exchanges(&mut self, bm: &mut BuffersManager) -> Result<(), InitError> {
        if self.be.is_some() {
            return Err(InitError::AlreadyInitialized {
                what: "the hyperviscosity boundary exchange",
            });
        }
        self.be = Some(BoundaryExchange::new(bm, 1, 4)?);
        Ok(())
    }

    /// Whether the halo exchange has been wired.
    pub fn has_boundary_exchange(&self) -> bool {
        self.be.is_some()
    }
}

/// Vertical remap driver.
#[derive(Clone, Debug)]
pub struct VerticalRemapManager {
    num_elems: usize,
    remap_alg: RemapAlg,
    rsplit: i32,
}

impl VerticalRemapManager {
    /// Capture the remap algorithm selection.
    pub fn new(elements: &Elements, params: &SimulationParams) -> Self {
        Self {
            num_elems: elements.num_elems(),
            remap_alg: params.remap_alg,
            rsplit: params.rsplit,
        }
    }

    /// Selected remap algorithm.
    pub fn remap_alg(&self) -> RemapAlg {
        self.remap_alg
    }

    /// Vertical remap split count.
    pub fn rsplit(&self) -> i32 {
        self.rsplit
    }

    /// Number of elements the remap runs over.
    pub fn num_elems(&self) -> usize {
        self.num_elems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::{Connectivity, ExchangeKind};

    fn fixture() -> (Elements, Tracers, HybridVCoord, ReferenceElement, SimulationParams) {
        use aeolus_core::{NUM_INTERFACE_LEV, NUM_PHYSICAL_LEV};
        let params = SimulationParams::build(&aeolus_test_utils::valid_raw_params()).unwrap();
        let elements = Elements::new(2, params.const_hypervis());
        let tracers = Tracers::new(2, params.qsize);
        let hvcoord = HybridVCoord::new(
            1000.0,
            &vec![0.0; NUM_PHYSICAL_LEV],
            &vec![0.0; NUM_INTERFACE_LEV],
            &vec![0.0; NUM_PHYSICAL_LEV],
            &vec![0.0; NUM_INTERFACE_LEV],
        )
        .unwrap();
        let ref_fe =
            ReferenceElement::new(&vec![0.0; NP * NP], &vec![1.0; NP * NP]).unwrap();
        (elements, tracers, hvcoord, ref_fe, params)
    }

    #[test]
    fn shells_capture_their_configuration() {
        let (elements, tracers, hvcoord, ref_fe, params) = fixture();
        let sph = SphereOperators::new(&elements.geometry, &ref_fe);
        assert_eq!(sph.num_elems(), 2);

        let caar = CaarFunctor::new(&elements, &tracers, &hvcoord, params.rsplit);
        assert_eq!(caar.rsplit(), params.rsplit);
        assert_eq!(caar.ps0(), 1000.0);
        assert!(!caar.has_boundary_exchange());

        let hv = HyperviscosityFunctor::new(&elements, &params);
        assert_eq!(hv.nu_ratio1(), params.nu_ratio1);

        let vrm = VerticalRemapManager::new(&elements, &params);
        assert_eq!(vrm.remap_alg(), params.remap_alg);
    }

    #[test]
    fn double_exchange_wiring_is_rejected() {
        let (elements, tracers, hvcoord, _ref_fe, params) = fixture();
        let mut caar = CaarFunctor::new(&elements, &tracers, &hvcoord, params.rsplit);
        let conn = Connectivity::new(2);
        let mut bm = BuffersManager::new(ExchangeKind::Mpi, &conn);
        caar.init_boundary_exchanges(&mut bm).unwrap();
        assert!(caar.has_boundary_exchange());
        assert!(matches!(
            caar.init_boundary_exchanges(&mut bm),
            Err(InitError::AlreadyInitialized { .. })
        ));
    }

    #[test]
    fn euler_reset_rereads_the_limiter() {
        let (elements, tracers, _hvcoord, _ref_fe, mut params) = fixture();
        let mut esf = EulerStepFunctor::new(&elements, &tracers, &params);
        params.limiter_option = 9;
        esf.reset(&params);
        assert_eq!(esf.limiter_option(), 9);
    }
}

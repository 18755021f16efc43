//! The process-wide context: one owner for every subsystem.
//!
//! The context is constructed explicitly and passed by reference through
//! the call chain. Each subsystem slot starts empty and is filled by its
//! install method in dependency order:
//!
//! `SimulationParams` → `HybridVCoord`/`ReferenceElement` →
//! `Elements`/`Tracers` → functors → boundary exchanges.
//!
//! A typed accessor hands out a subsystem only once it exists; querying
//! earlier is an ordering violation reported as
//! [`InitError::MissingPrerequisite`].

use aeolus_core::{ExtView, ExtViewMut, InitError};
use aeolus_state::{
    Diagnostics, DiagnosticsFields, Elements, ElementsBuffers, ElementsDerived,
    ElementsGeometry, ForcingAlg, GeometryFields, HybridVCoord, ReferenceElement,
    SimulationParams, TimeLevel, Tracers,
};
use indexmap::IndexMap;

use crate::exchange::{BuffersManager, Connectivity, ExchangeKind};
use crate::functors::{
    CaarFunctor, EulerStepFunctor, HyperviscosityFunctor, SphereOperators, VerticalRemapManager,
};

/// The kernel functors, constructed together exactly once.
#[derive(Debug)]
pub struct Functors {
    /// Spectral-element operators on the sphere.
    pub sphere_operators: SphereOperators,
    /// Horizontal advection and pressure-gradient update.
    pub caar: CaarFunctor,
    /// Tracer advection.
    pub euler_step: EulerStepFunctor,
    /// Hyperviscosity.
    pub hyperviscosity: HyperviscosityFunctor,
    /// Vertical remap driver.
    pub vertical_remap: VerticalRemapManager,
}

/// Owner of every subsystem for the lifetime of the process.
#[derive(Debug, Default)]
pub struct Context {
    params: Option<SimulationParams>,
    hvcoord: Option<HybridVCoord>,
    ref_fe: Option<ReferenceElement>,
    time_level: Option<TimeLevel>,
    elements: Option<Elements>,
    tracers: Option<Tracers>,
    diagnostics: Option<Diagnostics>,
    connectivity: Option<Connectivity>,
    functors: Option<Functors>,
    buffers_managers: IndexMap<ExchangeKind, BuffersManager>,
}

fn require<'a, T>(
    slot: &'a Option<T>,
    required: &'static str,
    before: &'static str,
) -> Result<&'a T, InitError> {
    slot.as_ref().ok_or(InitError::MissingPrerequisite {
        required,
        before,
    })
}

fn require_mut<'a, T>(
    slot: &'a mut Option<T>,
    required: &'static str,
    before: &'static str,
) -> Result<&'a mut T, InitError> {
    slot.as_mut().ok_or(InitError::MissingPrerequisite {
        required,
        before,
    })
}

impl Context {
    /// Create an empty context: nothing installed, nothing wired.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Configuration & coordinate state ───────────────────────────

    /// Install the validated simulation parameters.
    ///
    /// This is the only mutation path for the parameters; repeated calls
    /// follow setter semantics and replace the previous value.
    pub fn set_params(&mut self, params: SimulationParams) {
        self.params = Some(params);
    }

    /// The validated simulation parameters.
    pub fn params(&self) -> Result<&SimulationParams, InitError> {
        require(
            &self.params,
            "the SimulationParams structure",
            "using it",
        )
    }

    /// Install the hybrid vertical coordinate.
    pub fn set_hvcoord(&mut self, hvcoord: HybridVCoord) {
        self.hvcoord = Some(hvcoord);
    }

    /// The hybrid vertical coordinate.
    pub fn hvcoord(&self) -> Result<&HybridVCoord, InitError> {
        require(&self.hvcoord, "the HybridVCoord structure", "using it")
    }

    /// Install the reference-element basis data.
    pub fn set_reference_element(&mut self, ref_fe: ReferenceElement) {
        self.ref_fe = Some(ref_fe);
    }

    /// The reference-element basis data.
    pub fn reference_element(&self) -> Result<&ReferenceElement, InitError> {
        require(&self.ref_fe, "the ReferenceElement structure", "using it")
    }

    /// Install the rotating time-level indices.
    pub fn set_time_level(&mut self, tl: TimeLevel) {
        self.time_level = Some(tl);
    }

    /// The rotating time-level indices.
    pub fn time_level(&self) -> Result<&TimeLevel, InitError> {
        require(&self.time_level, "the TimeLevel structure", "using it")
    }

    // ── Domain state ───────────────────────────────────────────────

    /// Allocate the element and tracer containers for `num_elems`
    /// elements.
    ///
    /// Requires the simulation parameters: the tracer count and the
    /// hyperviscosity flavor come from there.
    pub fn init_elements(&mut self, num_elems: usize) -> Result<(), InitError> {
        let params = require(
            &self.params,
            "the SimulationParams structure",
            "initializing the elements",
        )?;
        let consthv = params.const_hypervis();
        let qsize = params.qsize;
        self.elements = Some(Elements::new(num_elems, consthv));
        self.tracers = Some(Tracers::new(num_elems, qsize));
        self.connectivity = Some(Connectivity::new(num_elems));
        Ok(())
    }

    /// The element aggregate.
    pub fn elements(&self) -> Result<&Elements, InitError> {
        require(&self.elements, "the Elements structure", "using it")
    }

    /// The tracer containers.
    pub fn tracers(&self) -> Result<&Tracers, InitError> {
        require(&self.tracers, "the Tracers structure", "using it")
    }

    /// The element geometry, borrowed from the single [`Elements`]
    /// instance so every consumer sees identical storage.
    pub fn geometry(&self) -> Result<&ElementsGeometry, InitError> {
        Ok(&self.elements()?.geometry)
    }

    /// The derived diagnostics, borrowed from the single [`Elements`]
    /// instance.
    pub fn derived(&self) -> Result<&ElementsDerived, InitError> {
        Ok(&self.elements()?.derived)
    }

    /// The scratch buffers, borrowed from the single [`Elements`]
    /// instance.
    pub fn buffers(&self) -> Result<&ElementsBuffers, InitError> {
        Ok(&self.elements()?.buffers)
    }

    /// Install one element's metric terms.
    pub fn set_element_geometry(
        &mut self,
        ie: usize,
        fields: &GeometryFields<'_>,
    ) -> Result<(), InitError> {
        let elements = require_mut(
            &mut self.elements,
            "the Elements structure",
            "installing element geometry",
        )?;
        elements.geometry.set_element(ie, fields)
    }

    /// Pull the initial prognostic state and tracer mass across the
    /// boundary.
    pub fn pull_states(
        &mut self,
        v: &ExtView<'_>,
        t: &ExtView<'_>,
        dp3d: &ExtView<'_>,
        qdp: &ExtView<'_>,
        ps_v: &ExtView<'_>,
    ) -> Result<(), InitError> {
        let elements = require_mut(
            &mut self.elements,
            "the Elements structure",
            "pulling the element states",
        )?;
        elements.state.pull(v, t, dp3d, ps_v)?;
        let tracers = require_mut(
            &mut self.tracers,
            "the Tracers structure",
            "pulling the element states",
        )?;
        tracers.pull_qdp(qdp)
    }

    /// Take host copies of the caller's diagnostic accumulators.
    pub fn init_diagnostics(
        &mut self,
        fields: &DiagnosticsFields<'_>,
    ) -> Result<(), InitError> {
        let elements = require(
            &self.elements,
            "the Elements structure",
            "initializing the diagnostics",
        )?;
        let params = require(
            &self.params,
            "the SimulationParams structure",
            "initializing the diagnostics",
        )?;
        self.diagnostics = Some(Diagnostics::new(
            elements.num_elems(),
            params.qsize,
            fields,
        )?);
        Ok(())
    }

    /// The diagnostic accumulators.
    pub fn diagnostics(&self) -> Result<&Diagnostics, InitError> {
        require(&self.diagnostics, "the Diagnostics structure", "using it")
    }

    /// The connectivity handle.
    pub fn connectivity(&self) -> Result<&Connectivity, InitError> {
        require(&self.connectivity, "the Connectivity structure", "using it")
    }

    // ── Functors & wiring ──────────────────────────────────────────

    /// Construct every kernel functor, exactly once.
    ///
    /// Checks, in order, that elements, tracers, the reference element,
    /// the vertical coordinate, and the simulation parameters are all
    /// installed; the first missing one is reported by name. A second
    /// call is a no-op: the functors are never re-built.
    pub fn init_functors(&mut self) -> Result<(), InitError> {
        if self.functors.is_some() {
            return Ok(());
        }
        const BEFORE: &str = "initializing the functors";
        let elements = require(&self.elements, "the Elements structure", BEFORE)?;
        let tracers = require(&self.tracers, "the Tracers structure", BEFORE)?;
        let ref_fe = require(&self.ref_fe, "the ReferenceElement structure", BEFORE)?;
        let hvcoord = require(&self.hvcoord, "the HybridVCoord structure", BEFORE)?;
        let params = require(&self.params, "the SimulationParams structure", BEFORE)?;

        // Each functor is built fully formed from the validated context;
        // a lookup never constructs and never copies a half-made shell.
        let sphere_operators = SphereOperators::new(&elements.geometry, ref_fe);
        let caar = CaarFunctor::new(elements, tracers, hvcoord, params.rsplit);
        let euler_step = EulerStepFunctor::new(elements, tracers, params);
        let hyperviscosity = HyperviscosityFunctor::new(elements, params);
        let vertical_remap = VerticalRemapManager::new(elements, params);

        self.functors = Some(Functors {
            sphere_operators,
            caar,
            euler_step,
            hyperviscosity,
            vertical_remap,
        });
        Ok(())
    }

    /// The constructed functors.
    pub fn functors(&self) -> Result<&Functors, InitError> {
        require(&self.functors, "the functors", "using them")
    }

    /// The buffer pool for `kind`, created on first request.
    ///
    /// Repeated requests return the existing pool and ignore any new
    /// construction context.
    pub fn buffers_manager(
        &mut self,
        kind: ExchangeKind,
    ) -> Result<&mut BuffersManager, InitError> {
        let connectivity = require(
            &self.connectivity,
            "the Connectivity structure",
            "requesting a buffers manager",
        )?;
        Ok(self
            .buffers_managers
            .entry(kind)
            .or_insert_with(|| BuffersManager::new(kind, connectivity)))
    }

    /// Wire every functor to its communication buffers.
    ///
    /// Must follow [`init_functors`](Self::init_functors). The Euler
    /// step functor re-reads its kernel options from current parameters
    /// before wiring.
    pub fn init_boundary_exchanges(&mut self) -> Result<(), InitError> {
        const BEFORE: &str = "initializing the boundary exchanges";
        let params = require(&self.params, "the SimulationParams structure", BEFORE)?;
        let connectivity = require(&self.connectivity, "the Connectivity structure", BEFORE)?;
        let functors = self.functors.as_mut().ok_or(InitError::MissingPrerequisite {
            required: "the functors",
            before: BEFORE,
        })?;

        let bm = self
            .buffers_managers
            .entry(ExchangeKind::Mpi)
            .or_insert_with(|| BuffersManager::new(ExchangeKind::Mpi, connectivity));

        functors.euler_step.reset(params);
        functors.euler_step.init_boundary_exchanges(bm)?;
        functors.caar.init_boundary_exchanges(bm)?;
        functors.hyperviscosity.init_boundary_exchanges(bm)?;
        Ok(())
    }

    // ── Runtime push/pull ──────────────────────────────────────────

    /// Push the prognostic state, tracer fields, and the
    /// vertical-velocity proxy back to the external buffers.
    pub fn push_results(
        &self,
        v: &mut ExtViewMut<'_>,
        t: &mut ExtViewMut<'_>,
        dp3d: &mut ExtViewMut<'_>,
        qdp: &mut ExtViewMut<'_>,
        q: &mut ExtViewMut<'_>,
        ps_v: &mut ExtViewMut<'_>,
        omega_p: &mut ExtViewMut<'_>,
    ) -> Result<(), InitError> {
        const BEFORE: &str = "pushing results";
        let elements = require(&self.elements, "the Elements structure", BEFORE)?;
        let tracers = require(&self.tracers, "the Tracers structure", BEFORE)?;

        elements.state.push(v, t, dp3d)?;
        tracers.push_qdp(qdp)?;
        elements.state.push_ps_v(ps_v)?;
        elements.derived.push_omega_p(omega_p)?;
        tracers.push_q(q)
    }

    /// Push the forcing accumulators to the external buffers.
    ///
    /// The tracer forcing tendency moves only under the debug forcing
    /// algorithm; every other algorithm skips it entirely.
    pub fn push_forcing(
        &mut self,
        fm: &mut ExtViewMut<'_>,
        ft: &mut ExtViewMut<'_>,
        fq: &mut ExtViewMut<'_>,
    ) -> Result<(), InitError> {
        const BEFORE: &str = "pushing forcing";
        let ftype = require(&self.params, "the SimulationParams structure", BEFORE)?.ftype;
        let elements = require(&self.elements, "the Elements structure", BEFORE)?;
        elements.derived.push_forcing(fm, ft)?;

        if ftype == ForcingAlg::Debug {
            let tracers = require_mut(&mut self.tracers, "the Tracers structure", BEFORE)?;
            tracers.push_fq(fq)?;
        }
        Ok(())
    }

    /// Pull the forcing accumulators and tracer mass from the external
    /// buffers.
    pub fn pull_forcing(
        &mut self,
        fm: &ExtView<'_>,
        ft: &ExtView<'_>,
        fq: &ExtView<'_>,
        qdp: &ExtView<'_>,
    ) -> Result<(), InitError> {
        const BEFORE: &str = "pulling forcing";
        let ftype = require(&self.params, "the SimulationParams structure", BEFORE)?.ftype;
        let elements = require_mut(&mut self.elements, "the Elements structure", BEFORE)?;
        elements.derived.pull_forcing(fm, ft)?;

        let tracers = require_mut(&mut self.tracers, "the Tracers structure", BEFORE)?;
        if ftype == ForcingAlg::Debug {
            tracers.pull_fq(fq)?;
        }
        tracers.pull_qdp(qdp)
    }
}

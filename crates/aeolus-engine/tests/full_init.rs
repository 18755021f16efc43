//! Integration test: the full initialization sequence, end to end.
//!
//! Drives the context through the same ordered entry points the legacy
//! caller uses, then verifies that pushing results reproduces the pulled
//! state bit for bit and that the debug-forcing gate behaves.

use aeolus_core::{ExtView, ExtViewMut};
use aeolus_engine::Context;
use aeolus_state::layout;
use aeolus_state::{
    ForcingAlg, HybridVCoord, ReferenceElement, SimulationParams, TimeLevel,
};
use aeolus_test_utils::{
    valid_raw_params, DiagnosticBuffers, ForcingBuffers, GeometryBuffers, ResultBuffers,
    StateBuffers, VCoordBuffers,
};

const NE: usize = 2;

fn ready_context(ftype: i32) -> Context {
    let mut raw = valid_raw_params();
    raw.ftype = ftype;

    let mut ctx = Context::new();
    ctx.set_params(SimulationParams::build(&raw).unwrap());

    let vc = VCoordBuffers::plausible();
    ctx.set_hvcoord(HybridVCoord::new(1000.0, &vc.am, &vc.ai, &vc.bm, &vc.bi).unwrap());

    let deriv = vec![0.25; aeolus_core::NP * aeolus_core::NP];
    let mass = vec![1.0; aeolus_core::NP * aeolus_core::NP];
    ctx.set_reference_element(ReferenceElement::new(&deriv, &mass).unwrap());

    ctx.set_time_level(TimeLevel::from_f90(1, 2, 3, 0, 0).unwrap());

    ctx.init_elements(NE).unwrap();
    for ie in 0..NE {
        let geo = GeometryBuffers::randomized(ie as u64);
        ctx.set_element_geometry(ie, &geo.fields()).unwrap();
    }
    ctx
}

fn pull_initial_state(ctx: &mut Context, st: &StateBuffers) {
    ctx.pull_states(
        &ExtView::new("v", &st.v, &layout::state_v(NE)).unwrap(),
        &ExtView::new("t", &st.t, &layout::state_scalar(NE)).unwrap(),
        &ExtView::new("dp3d", &st.dp3d, &layout::state_scalar(NE)).unwrap(),
        &ExtView::new("qdp", &st.qdp, &layout::qdp(NE)).unwrap(),
        &ExtView::new("ps_v", &st.ps_v, &layout::state_ps_v(NE)).unwrap(),
    )
    .unwrap();
}

#[test]
fn ordered_sequence_reaches_ready_and_round_trips() {
    let mut ctx = ready_context(-1);

    let st = StateBuffers::randomized(NE, 99);
    pull_initial_state(&mut ctx, &st);

    let diag = DiagnosticBuffers::randomized(NE, 17);
    ctx.init_diagnostics(&diag.fields(NE)).unwrap();

    ctx.init_functors().unwrap();
    ctx.init_boundary_exchanges().unwrap();
    assert!(ctx.functors().unwrap().euler_step.has_boundary_exchange());

    // Push the state straight back out and compare with the source.
    let mut out = ResultBuffers::zeroed(NE);
    ctx.push_results(
        &mut ExtViewMut::new("v", &mut out.v, &layout::state_v(NE)).unwrap(),
        &mut ExtViewMut::new("t", &mut out.t, &layout::state_scalar(NE)).unwrap(),
        &mut ExtViewMut::new("dp3d", &mut out.dp3d, &layout::state_scalar(NE)).unwrap(),
        &mut ExtViewMut::new("qdp", &mut out.qdp, &layout::qdp(NE)).unwrap(),
        &mut ExtViewMut::new("q", &mut out.q, &layout::q(NE)).unwrap(),
        &mut ExtViewMut::new("ps_v", &mut out.ps_v, &layout::state_ps_v(NE)).unwrap(),
        &mut ExtViewMut::new("omega_p", &mut out.omega_p, &layout::per_level(NE)).unwrap(),
    )
    .unwrap();

    assert_eq!(out.v, st.v);
    assert_eq!(out.t, st.t);
    assert_eq!(out.dp3d, st.dp3d);
    assert_eq!(out.ps_v, st.ps_v);
    // Tracer mass round-trips over the active species; the buffer was
    // zeroed, so inactive species stay zero, matching a zeroed source
    // only where species are active. Compare the active leading blocks.
    let qsize = ctx.params().unwrap().qsize;
    let inner = aeolus_core::NUM_PHYSICAL_LEV * aeolus_core::NP * aeolus_core::NP;
    let cap = aeolus_core::MAX_TRACERS;
    for outer in 0..NE * aeolus_core::Q_NUM_TIME_LEVELS {
        let base = outer * cap * inner;
        assert_eq!(
            &out.qdp[base..base + qsize * inner],
            &st.qdp[base..base + qsize * inner]
        );
    }
}

#[test]
fn functor_construction_rejects_out_of_order_calls() {
    let mut raw_ctx = Context::new();
    assert!(raw_ctx.init_functors().is_err());
    assert!(raw_ctx.init_boundary_exchanges().is_err());

    let mut ctx = ready_context(-1);
    // Boundary exchanges still gated on functor construction.
    assert!(ctx.init_boundary_exchanges().is_err());
    ctx.init_functors().unwrap();
    ctx.init_boundary_exchanges().unwrap();
}

#[test]
fn debug_forcing_gates_the_tracer_tendency() {
    // Debug forcing: fq moves across the boundary.
    let mut ctx = ready_context(0);
    let fb = ForcingBuffers::randomized(NE, 5);
    let st = StateBuffers::randomized(NE, 6);
    ctx.pull_forcing(
        &ExtView::new("fm", &fb.fm, &layout::fm(NE)).unwrap(),
        &ExtView::new("ft", &fb.ft, &layout::per_level(NE)).unwrap(),
        &ExtView::new("fq", &fb.fq, &layout::q(NE)).unwrap(),
        &ExtView::new("qdp", &st.qdp, &layout::qdp(NE)).unwrap(),
    )
    .unwrap();
    assert!(ctx.tracers().unwrap().fq_allocated());

    let mut out = ForcingBuffers::zeroed(NE);
    ctx.push_forcing(
        &mut ExtViewMut::new("fm", &mut out.fm, &layout::fm(NE)).unwrap(),
        &mut ExtViewMut::new("ft", &mut out.ft, &layout::per_level(NE)).unwrap(),
        &mut ExtViewMut::new("fq", &mut out.fq, &layout::q(NE)).unwrap(),
    )
    .unwrap();
    assert_eq!(out.fm, fb.fm);
    assert_eq!(out.ft, fb.ft);
    let qsize = ctx.params().unwrap().qsize;
    let inner = aeolus_core::NUM_PHYSICAL_LEV * aeolus_core::NP * aeolus_core::NP;
    assert_eq!(&out.fq[..qsize * inner], &fb.fq[..qsize * inner]);

    // Any other forcing algorithm: fq is never touched, never allocated.
    let mut ctx = ready_context(2);
    ctx.pull_forcing(
        &ExtView::new("fm", &fb.fm, &layout::fm(NE)).unwrap(),
        &ExtView::new("ft", &fb.ft, &layout::per_level(NE)).unwrap(),
        &ExtView::new("fq", &fb.fq, &layout::q(NE)).unwrap(),
        &ExtView::new("qdp", &st.qdp, &layout::qdp(NE)).unwrap(),
    )
    .unwrap();
    assert_eq!(ctx.params().unwrap().ftype, ForcingAlg::Forcing2);
    assert!(!ctx.tracers().unwrap().fq_allocated());

    let sentinel = ForcingBuffers::randomized(NE, 31);
    let mut out = ForcingBuffers {
        fm: vec![0.0; sentinel.fm.len()],
        ft: vec![0.0; sentinel.ft.len()],
        fq: sentinel.fq.clone(),
    };
    ctx.push_forcing(
        &mut ExtViewMut::new("fm", &mut out.fm, &layout::fm(NE)).unwrap(),
        &mut ExtViewMut::new("ft", &mut out.ft, &layout::per_level(NE)).unwrap(),
        &mut ExtViewMut::new("fq", &mut out.fq, &layout::q(NE)).unwrap(),
    )
    .unwrap();
    // The tendency buffer is exactly as the caller left it.
    assert_eq!(out.fq, sentinel.fq);
    assert!(!ctx.tracers().unwrap().fq_allocated());
}

//! Integration test: the layout transform is its own inverse.
//!
//! Pulling every marshalled field from randomized external buffers and
//! immediately pushing it back must reproduce the original contents bit
//! for bit, for every field class: identity layout, transposed axis
//! pair, and capacity-strided tracer blocks.

use aeolus_core::{ExtView, ExtViewMut, Real};
use aeolus_state::{layout, ElementsDerived, ElementsState, Tracers};
use rand::{RngExt, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_buffer(rng: &mut ChaCha8Rng, len: usize) -> Vec<Real> {
    (0..len).map(|_| rng.random_range(-1.0e3..1.0e3)).collect()
}

#[test]
fn state_round_trip_is_bit_exact() {
    let ne = 3;
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut st = ElementsState::new(ne);

    let v0 = random_buffer(&mut rng, layout::len_of(&layout::state_v(ne)));
    let t0 = random_buffer(&mut rng, layout::len_of(&layout::state_scalar(ne)));
    let dp0 = random_buffer(&mut rng, layout::len_of(&layout::state_scalar(ne)));
    let ps0 = random_buffer(&mut rng, layout::len_of(&layout::state_ps_v(ne)));

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
fn forcing_round_trip_is_bit_exact() {
    let ne = 2;
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut d = ElementsDerived::new(ne);

    let fm0 = random_buffer(&mut rng, layout::len_of(&layout::fm(ne)));
    let ft0 = random_buffer(&mut rng, layout::len_of(&layout::per_level(ne)));

    d.pull_forcing(
        &ExtView::new("fm", &fm0, &layout::fm(ne)).unwrap(),
        &ExtView::new("ft", &ft0, &layout::per_level(ne)).unwrap(),
    )
    .unwrap();

    let mut fm1 = vec![0.0; fm0.len()];
    let mut ft1 = vec![0.0; ft0.len()];
    d.push_forcing(
        &mut ExtViewMut::new("fm", &mut fm1, &layout::fm(ne)).unwrap(),
        &mut ExtViewMut::new("ft", &mut ft1, &layout::per_level(ne)).unwrap(),
    )
    .unwrap();

    assert_eq!(fm1, fm0);
    assert_eq!(ft1, ft0);
}

#[test]
fn tracer_round_trip_is_bit_exact_over_active_species() {
    let (ne, qs) = (2, 5);
    let mut rng = ChaCha8Rng::seed_from_u64(1234);
    let mut tr = Tracers::new(ne, qs);

    let qdp0 = random_buffer(&mut rng, layout::len_of(&layout::qdp(ne)));
    tr.pull_qdp(&ExtView::new("qdp", &qdp0, &layout::qdp(ne)).unwrap())
        .unwrap();

    let mut qdp1 = qdp0.clone();
    tr.push_qdp(&mut ExtViewMut::new("qdp", &mut qdp1, &layout::qdp(ne)).unwrap())
        .unwrap();
    assert_eq!(qdp1, qdp0);

    let fq0 = random_buffer(&mut rng, layout::len_of(&layout::q(ne)));
    tr.pull_fq(&ExtView::new("fq", &fq0, &layout::q(ne)).unwrap())
        .unwrap();
    let mut fq1 = fq0.clone();
    tr.push_fq(&mut ExtViewMut::new("fq", &mut fq1, &layout::q(ne)).unwrap())
        .unwrap();
    assert_eq!(fq1, fq0);
}

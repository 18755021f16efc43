//! Hybrid vertical coordinate coefficients.

use aeolus_core::{
    check_option_cmp, ComparisonOp, InitError, Real, NUM_INTERFACE_LEV, NUM_PHYSICAL_LEV,
};

/// Hybrid pressure-sigma vertical coordinate.
///
/// Valid by construction: all four coefficient arrays carry their full
/// vertical extent and the reference surface pressure is positive.
#[derive(Clone, Debug, PartialEq)]
pub struct HybridVCoord {
    /// Reference surface pressure.
    pub ps0: Real,
    /// Pressure coefficients at layer midpoints.
    pub hybrid_am: Vec<Real>,
    /// Pressure coefficients at interfaces.
    pub hybrid_ai: Vec<Real>,
    /// Sigma coefficients at layer midpoints.
    pub hybrid_bm: Vec<Real>,
    /// Sigma coefficients at interfaces.
    pub hybrid_bi: Vec<Real>,
}

impl HybridVCoord {
    /// Build the coordinate from the caller's coefficient buffers.
    pub fn new(
        ps0: Real,
        am: &[Real],
        ai: &[Real],
        bm: &[Real],
        bi: &[Real],
    ) -> Result<Self, InitError> {
        check_option_cmp("init_hvcoord", "ps0", ps0, 0.0, ComparisonOp::Gt)?;
        expect("hybrid_am", am, NUM_PHYSICAL_LEV)?;
        expect("hybrid_ai", ai, NUM_INTERFACE_LEV)?;
        expect("hybrid_bm", bm, NUM_PHYSICAL_LEV)?;
        expect("hybrid_bi", bi, NUM_INTERFACE_LEV)?;
        Ok(Self {
            ps0,
            hybrid_am: am.to_vec(),
            hybrid_ai: ai.to_vec(),
            hybrid_bm: bm.to_vec(),
            hybrid_bi: bi.to_vec(),
        })
    }
}

fn expect(name: &'static str, buf: &[Real], len: usize) -> Result<(), InitError> {
    if buf.len() != len {
        return Err(InitError::ShapeMismatch {
            name,
            expected: len,
            got: buf.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_extent_coefficients_are_accepted() {
        let am = vec![0.1; NUM_PHYSICAL_LEV];
        let ai = vec![0.2; NUM_INTERFACE_LEV];
        let bm = vec![0.3; NUM_PHYSICAL_LEV];
        let bi = vec![0.4; NUM_INTERFACE_LEV];
        let hv = HybridVCoord::new(1000.0, &am, &ai, &bm, &bi).unwrap();
        assert_eq!(hv.hybrid_ai.len(), NUM_INTERFACE_LEV);
        assert_eq!(hv.ps0, 1000.0);
    }

    #[test]
    fn short_interface_array_is_rejected() {
        let am = vec![0.0; NUM_PHYSICAL_LEV];
        let ai = vec![0.0; NUM_PHYSICAL_LEV]; // one short
        let bm = vec![0.0; NUM_PHYSICAL_LEV];
        let bi = vec![0.0; NUM_INTERFACE_LEV];
        assert!(HybridVCoord::new(1000.0, &am, &ai, &bm, &bi).is_err());
    }

    #[test]
    fn non_positive_reference_pressure_is_rejected() {
        let am = vec![0.0; NUM_PHYSICAL_LEV];
        let ai = vec![0.0; NUM_INTERFACE_LEV];
        let bm = vec![0.0; NUM_PHYSICAL_LEV];
        let bi = vec![0.0; NUM_INTERFACE_LEV];
        assert!(HybridVCoord::new(0.0, &am, &ai, &bm, &bi).is_err());
    }
}

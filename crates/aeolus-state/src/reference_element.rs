//! Reference-element basis data: derivative and mass matrices.

use aeolus_core::{InitError, Real, NP};

/// Per-element basis and quadrature data shared by all elements.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceElement {
    deriv: [[Real; NP]; NP],
    mass: [[Real; NP]; NP],
}

impl ReferenceElement {
    /// Build from the caller's flat `NP × NP` matrices.
    pub fn new(deriv: &[Real], mass: &[Real]) -> Result<Self, InitError> {
        Ok(Self {
            deriv: unflatten("deriv", deriv)?,
            mass: unflatten("mass", mass)?,
        })
    }

    /// Derivative matrix of the Gauss–Lobatto basis.
    pub fn deriv(&self) -> &[[Real; NP]; NP] {
        &self.deriv
    }

    /// Mass matrix of the Gauss–Lobatto basis.
    pub fn mass(&self) -> &[[Real; NP]; NP] {
        &self.mass
    }
}

fn unflatten(name: &'static str, buf: &[Real]) -> Result<[[Real; NP]; NP], InitError> {
    if buf.len() != NP * NP {
        return Err(InitError::ShapeMismatch {
            name,
            expected: NP * NP,
            got: buf.len(),
        });
    }
    let mut out = [[0.0; NP]; NP];
    for i in 0..NP {
        for j in 0..NP {
            out[i][j] = buf[i * NP + j];
        }
    }
    Ok(out)
}

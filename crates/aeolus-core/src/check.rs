//! Parameter validator: pure membership and comparison checks.
//!
//! Every externally supplied scalar passes through one of these checks
//! before any shared state is mutated, so a violation leaves no partial
//! state behind. The decision is exactly the membership or comparison
//! test; there is no coercion and no defaulting.

use std::fmt::Display;

use crate::error::InitError;

/// Comparison operator for bound checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComparisonOp {
    /// Value must be strictly greater than the bound.
    Gt,
    /// Value must be greater than or equal to the bound.
    Ge,
    /// Value must be strictly less than the bound.
    Lt,
    /// Value must be less than or equal to the bound.
    Le,
    /// Value must equal the bound.
    Eq,
    /// Value must differ from the bound.
    Ne,
}

impl ComparisonOp {
    fn holds<T: PartialOrd>(self, value: &T, bound: &T) -> bool {
        match self {
            Self::Gt => value > bound,
            Self::Ge => value >= bound,
            Self::Lt => value < bound,
            Self::Le => value <= bound,
            Self::Eq => value == bound,
            Self::Ne => value != bound,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Eq => "==",
            Self::Ne => "!=",
        }
    }
}

/// Check that `value` is a member of `allowed`.
///
/// On violation returns [`InitError::InvalidParameter`] naming the entry
/// point, the parameter, and the allowed set. No side effects on success.
pub fn check_option_in<T>(
    entry: &'static str,
    name: &'static str,
    value: T,
    allowed: &[T],
) -> Result<(), InitError>
where
    T: PartialEq + Copy + Display,
{
    if allowed.iter().any(|a| *a == value) {
        return Ok(());
    }
    let set = allowed
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(InitError::InvalidParameter {
        entry,
        name,
        reason: format!("must be one of {{{set}}}, got {value}"),
    })
}

/// Check that `value <op> bound` holds.
///
/// On violation returns [`InitError::InvalidParameter`] naming the entry
/// point, the parameter, and the violated comparison.
pub fn check_option_cmp<T>(
    entry: &'static str,
    name: &'static str,
    value: T,
    bound: T,
    op: ComparisonOp,
) -> Result<(), InitError>
where
    T: PartialOrd + Copy + Display,
{
    if op.holds(&value, &bound) {
        return Ok(());
    }
    Err(InitError::InvalidParameter {
        entry,
        name,
        reason: format!("must be {} {bound}, got {value}", op.symbol()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn membership_accepts_members() {
        assert!(check_option_in("e", "p", 3, &[1, 3]).is_ok());
        assert!(check_option_in("e", "p", 1, &[1, 3]).is_ok());
        assert!(check_option_in("e", "p", false, &[false]).is_ok());
    }

    #[test]
    fn membership_rejects_non_members() {
        let err = check_option_in("init_simulation_params", "remap_alg", 2, &[1, 3]).unwrap_err();
        match err {
            InitError::InvalidParameter { name, reason, .. } => {
                assert_eq!(name, "remap_alg");
                assert!(reason.contains("got 2"));
            }
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn comparison_boundaries_are_exact() {
        assert!(check_option_cmp("e", "nu", 1e-9, 0.0, ComparisonOp::Gt).is_ok());
        assert!(check_option_cmp("e", "nu", 0.0, 0.0, ComparisonOp::Gt).is_err());
        assert!(check_option_cmp("e", "qsize", 0, 0, ComparisonOp::Ge).is_ok());
        assert!(check_option_cmp("e", "qsize", 40, 40, ComparisonOp::Le).is_ok());
        assert!(check_option_cmp("e", "qsize", 41, 40, ComparisonOp::Le).is_err());
    }

    proptest! {
        /// The validator decision equals the membership test, exactly.
        #[test]
        fn membership_decision_is_membership(v in any::<i32>()) {
            let allowed = [-1, 0, 2];
            let decided = check_option_in("e", "ftype", v, &allowed).is_ok();
            prop_assert_eq!(decided, allowed.contains(&v));
        }

        /// The validator decision equals the comparison test, exactly.
        #[test]
        fn comparison_decision_is_comparison(v in any::<f64>().prop_filter("finite", |x| x.is_finite())) {
            let decided = check_option_cmp("e", "nu", v, 0.0, ComparisonOp::Gt).is_ok();
            prop_assert_eq!(decided, v > 0.0);
        }
    }
}

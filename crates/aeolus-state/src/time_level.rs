//! Rotating time-level bookkeeping.

use aeolus_core::{check_option_cmp, ComparisonOp, InitError, NUM_TIME_LEVELS};

const ENTRY: &str = "init_time_level";

/// The three rotating prognostic time levels plus step counters.
///
/// Level indices are converted from the caller's 1-based convention to
/// 0-based at the moment of ingestion and never re-converted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeLevel {
    /// Previous time level, 0-based.
    pub nm1: usize,
    /// Current time level, 0-based.
    pub n0: usize,
    /// Next time level, 0-based.
    pub np1: usize,
    /// Current step counter.
    pub nstep: i32,
    /// Step counter at the start of the run.
    pub nstep0: i32,
}

impl TimeLevel {
    /// Ingest 1-based level indices from the external caller.
    pub fn from_f90(
        nm1: i32,
        n0: i32,
        np1: i32,
        nstep: i32,
        nstep0: i32,
    ) -> Result<Self, InitError> {
        for (name, value) in [("nm1", nm1), ("n0", n0), ("np1", np1)] {
            check_option_cmp(ENTRY, name, value, 1, ComparisonOp::Ge)?;
            check_option_cmp(ENTRY, name, value, NUM_TIME_LEVELS as i32, ComparisonOp::Le)?;
        }
        Ok(Self {
            nm1: (nm1 - 1) as usize,
            n0: (n0 - 1) as usize,
            np1: (np1 - 1) as usize,
            nstep,
            nstep0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_based_indices_become_zero_based() {
        let tl = TimeLevel::from_f90(1, 2, 3, 10, 0).unwrap();
        assert_eq!((tl.nm1, tl.n0, tl.np1), (0, 1, 2));
        assert_eq!(tl.nstep, 10);
        assert_eq!(tl.nstep0, 0);
    }

    #[test]
    fn rotated_indices_are_preserved() {
        let tl = TimeLevel::from_f90(3, 1, 2, 42, 41).unwrap();
        assert_eq!((tl.nm1, tl.n0, tl.np1), (2, 0, 1));
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        assert!(TimeLevel::from_f90(0, 2, 3, 0, 0).is_err());
        assert!(TimeLevel::from_f90(1, 4, 3, 0, 0).is_err());
        assert!(TimeLevel::from_f90(1, 2, -1, 0, 0).is_err());
    }
}

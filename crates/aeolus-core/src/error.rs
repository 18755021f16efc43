//! Error types for the setup and marshalling boundary.
//!
//! All failures in this core are configuration or ordering violations
//! detected during the single-threaded setup phase, plus shape mismatches
//! at the marshalling boundary. Library code returns these as values; the
//! C boundary escalates them to process termination.

use std::error::Error;
use std::fmt;

/// A violation detected during setup or marshalling.
///
/// The first violation encountered is returned; no aggregation is
/// performed, because a run cannot proceed from inconsistent configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitError {
    /// A supplied scalar is outside its allowed set or bound.
    InvalidParameter {
        /// Entry point that received the parameter.
        entry: &'static str,
        /// Name of the offending parameter.
        name: &'static str,
        /// The violated constraint, human readable.
        reason: String,
    },
    /// A subsystem was queried before its prerequisite was installed.
    MissingPrerequisite {
        /// The subsystem that must be initialized first.
        required: &'static str,
        /// The operation that was attempted too early.
        before: &'static str,
    },
    /// An external buffer's length does not match its declared shape.
    ShapeMismatch {
        /// Name of the buffer.
        name: &'static str,
        /// Length implied by the declared shape.
        expected: usize,
        /// Length actually supplied.
        got: usize,
    },
    /// A per-element operation addressed an element outside the domain.
    ElementIndexOutOfRange {
        /// The requested element index.
        index: usize,
        /// Number of elements in the domain.
        num_elems: usize,
    },
    /// A one-shot subsystem was installed a second time.
    AlreadyInitialized {
        /// The subsystem that was already set up.
        what: &'static str,
    },
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                entry,
                name,
                reason,
            } => {
                write!(f, "{entry}: parameter '{name}' {reason}")
            }
            Self::MissingPrerequisite { required, before } => {
                write!(
                    f,
                    "you must initialize {required} before {before}"
                )
            }
            Self::ShapeMismatch {
                name,
                expected,
                got,
            } => {
                write!(
                    f,
                    "buffer '{name}' has length {got}, expected {expected}"
                )
            }
            Self::ElementIndexOutOfRange { index, num_elems } => {
                write!(
                    f,
                    "element index {index} out of range for {num_elems} elements"
                )
            }
            Self::AlreadyInitialized { what } => {
                write!(f, "{what} is already initialized")
            }
        }
    }
}

impl Error for InitError {}

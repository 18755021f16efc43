//! C-linkage entry points for the Aeolus dynamical-core bridge.
//!
//! The legacy caller drives initialization through a fixed sequence of
//! entry points taking plain scalars and raw pointers to contiguous
//! buffers. All calls happen during the single-threaded setup phase or
//! at run-time synchronization points; the process-wide context mutex is
//! never contended.
//!
//! There is no error code at this boundary: a configuration violation,
//! an ordering violation, or a shape mismatch terminates the process
//! with a descriptive message. This crate is the only one in the
//! workspace that may contain `unsafe` code.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

mod entry;
mod sync;

pub use entry::*;
pub use sync::*;

use std::sync::{LazyLock, Mutex, MutexGuard};

use aeolus_core::{InitError, Real};
use aeolus_engine::Context;

static CONTEXT: LazyLock<Mutex<Context>> = LazyLock::new(|| Mutex::new(Context::new()));

/// Lock the process-wide context.
pub(crate) fn context() -> MutexGuard<'static, Context> {
    match CONTEXT.lock() {
        Ok(guard) => guard,
        // A poisoning panic already aborted setup; nothing to recover.
        Err(_) => fatal_msg("context", "context mutex poisoned"),
    }
}

/// Terminate the process with a descriptive message.
pub(crate) fn fatal(entry: &'static str, err: &InitError) -> ! {
    eprintln!("Error! {entry}: {err}");
    std::process::abort();
}

pub(crate) fn fatal_msg(entry: &'static str, msg: &str) -> ! {
    eprintln!("Error! {entry}: {msg}");
    std::process::abort();
}

/// Unwrap a setup result, aborting on violation.
pub(crate) fn ok_or_fatal(entry: &'static str, result: Result<(), InitError>) {
    if let Err(err) = result {
        fatal(entry, &err);
    }
}

/// Unwrap a setup value, aborting on violation.
pub(crate) fn get_or_fatal<T>(entry: &'static str, result: Result<T, InitError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => fatal(entry, &err),
    }
}

/// Borrow `len` scalars from an external read-only buffer.
///
/// # Safety
///
/// `ptr` must be non-null (checked, fatal otherwise) and valid for `len`
/// reads for the duration of the call, per the caller contract.
#[allow(unsafe_code)]
pub(crate) unsafe fn slice_in<'a>(
    entry: &'static str,
    name: &'static str,
    ptr: *const Real,
    len: usize,
) -> &'a [Real] {
    if ptr.is_null() {
        fatal(
            entry,
            &InitError::InvalidParameter {
                entry,
                name,
                reason: "must not be null".to_string(),
            },
        );
    }
    // SAFETY: non-null checked above; extent per caller contract.
    unsafe { std::slice::from_raw_parts(ptr, len) }
}

/// Borrow `len` scalars from an external writable buffer.
///
/// # Safety
///
/// `ptr` must be non-null (checked, fatal otherwise) and valid for `len`
/// reads and writes for the duration of the call, per the caller
/// contract, with no other live aliases.
#[allow(unsafe_code)]
pub(crate) unsafe fn slice_out<'a>(
    entry: &'static str,
    name: &'static str,
    ptr: *mut Real,
    len: usize,
) -> &'a mut [Real] {
    if ptr.is_null() {
        fatal(
            entry,
            &InitError::InvalidParameter {
                entry,
                name,
                reason: "must not be null".to_string(),
            },
        );
    }
    // SAFETY: non-null checked above; extent and exclusivity per caller
    // contract.
    unsafe { std::slice::from_raw_parts_mut(ptr, len) }
}

//! Device-resident storage with explicit host mirroring.
//!
//! The real accelerator array type and its copy primitives are external
//! collaborators; this module is the seam. A [`DeviceArray`] owns its
//! storage for process lifetime. A [`HostMirror`] is created lazily by a
//! marshalling call, lives only for that call, and is released at scope
//! exit. Every transfer is blocking: when a copy returns, the destination
//! contents are final.

use aeolus_core::{InitError, Real, Shape};

/// Device-resident array identified by a label and a logical shape.
///
/// Storage is owned by the array for the lifetime of the container that
/// allocated it. Contents are reached only through mirror copies or slab
/// transfers, never borrowed directly.
#[derive(Debug)]
pub struct DeviceArray {
    label: &'static str,
    shape: Shape,
    data: Vec<Real>,
}

impl DeviceArray {
    /// Allocate a zero-filled device array with the given logical shape.
    pub fn zeros(label: &'static str, shape: &[usize]) -> Self {
        let len = shape.iter().product();
        Self {
            label,
            shape: Shape::from_slice(shape),
            data: vec![0.0; len],
        }
    }

    /// The array's diagnostic label.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// The logical shape, fastest axis last.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total number of scalars.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the array holds no scalars (possible when `qsize == 0`).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Allocate a host mirror with the same shape, zero-filled.
    pub fn create_mirror(&self) -> HostMirror {
        HostMirror {
            shape: self.shape.clone(),
            data: vec![0.0; self.data.len()],
        }
    }

    /// Blocking deep copy, device to mirror.
    pub fn deep_copy_to(&self, mirror: &mut HostMirror) {
        assert_eq!(
            mirror.data.len(),
            self.data.len(),
            "mirror for '{}' has the wrong extent",
            self.label
        );
        mirror.data.copy_from_slice(&self.data);
    }

    /// Blocking deep copy, mirror to device.
    pub fn deep_copy_from(&mut self, mirror: &HostMirror) {
        assert_eq!(
            mirror.data.len(),
            self.data.len(),
            "mirror for '{}' has the wrong extent",
            self.label
        );
        self.data.copy_from_slice(&mirror.data);
    }

    /// Blocking deep copy of a contiguous slab, host to device.
    ///
    /// Covers the per-element install path, where one element's worth of
    /// data lands at `offset` without mirroring the whole array.
    pub fn upload_slab(&mut self, offset: usize, src: &[Real]) -> Result<(), InitError> {
        let end = offset.checked_add(src.len()).unwrap_or(usize::MAX);
        if end > self.data.len() {
            return Err(InitError::ShapeMismatch {
                name: self.label,
                expected: self.data.len(),
                got: end,
            });
        }
        self.data[offset..end].copy_from_slice(src);
        Ok(())
    }

    /// Blocking deep copy of a contiguous slab, device to host.
    pub fn download_slab(&self, offset: usize, dst: &mut [Real]) -> Result<(), InitError> {
        let end = offset.checked_add(dst.len()).unwrap_or(usize::MAX);
        if end > self.data.len() {
            return Err(InitError::ShapeMismatch {
                name: self.label,
                expected: self.data.len(),
                got: end,
            });
        }
        dst.copy_from_slice(&self.data[offset..end]);
        Ok(())
    }
}

/// Host-side mirror of a [`DeviceArray`], owned by the marshalling call
/// that created it.
#[derive(Debug)]
pub struct HostMirror {
    shape: Shape,
    data: Vec<Real>,
}

impl HostMirror {
    /// The logical shape, fastest axis last.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The mirror's storage.
    pub fn as_slice(&self) -> &[Real] {
        &self.data
    }

    /// The mirror's storage, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [Real] {
        &mut self.data
    }
}

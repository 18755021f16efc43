//! Checked views over externally owned flat buffers.
//!
//! The legacy caller hands us raw contiguous storage whose logical shape
//! is fixed by convention (column-major, 1-based on its side). A view
//! pairs the slice with its declared shape and verifies the two agree at
//! construction, so a shape mismatch is a checked precondition instead of
//! undefined behavior downstream.
//!
//! Views are always host-side; device residency belongs to the structured
//! containers. Shapes are written row-major with the fastest-varying axis
//! last (the reversal of the caller's column-major declaration).

use smallvec::SmallVec;

use crate::dims::Real;
use crate::error::InitError;

/// Logical shape of a flat buffer. Inline up to six axes, which covers
/// every field this core marshals.
pub type Shape = SmallVec<[usize; 6]>;

fn checked(name: &'static str, len: usize, shape: &[usize]) -> Result<Shape, InitError> {
    let expected: usize = shape.iter().product();
    if expected != len {
        return Err(InitError::ShapeMismatch {
            name,
            expected,
            got: len,
        });
    }
    Ok(Shape::from_slice(shape))
}

/// Read-only view of an external flat buffer with a verified shape.
#[derive(Debug)]
pub struct ExtView<'a> {
    name: &'static str,
    data: &'a [Real],
    shape: Shape,
}

impl<'a> ExtView<'a> {
    /// Wrap `data`, verifying its length equals the product of `shape`.
    pub fn new(name: &'static str, data: &'a [Real], shape: &[usize]) -> Result<Self, InitError> {
        let shape = checked(name, data.len(), shape)?;
        Ok(Self { name, data, shape })
    }

    /// The buffer name used in diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The verified shape, fastest axis last.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The underlying storage.
    pub fn as_slice(&self) -> &[Real] {
        self.data
    }
}

/// Mutable view of an external flat buffer with a verified shape.
#[derive(Debug)]
pub struct ExtViewMut<'a> {
    name: &'static str,
    data: &'a mut [Real],
    shape: Shape,
}

impl<'a> ExtViewMut<'a> {
    /// Wrap `data`, verifying its length equals the product of `shape`.
    pub fn new(
        name: &'static str,
        data: &'a mut [Real],
        shape: &[usize],
    ) -> Result<Self, InitError> {
        let shape = checked(name, data.len(), shape)?;
        Ok(Self { name, data, shape })
    }

    /// The buffer name used in diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The verified shape, fastest axis last.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The underlying storage.
    pub fn as_slice(&self) -> &[Real] {
        self.data
    }

    /// The underlying storage, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [Real] {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_shape_is_accepted() {
        let buf = vec![0.0; 24];
        let v = ExtView::new("b", &buf, &[2, 3, 4]).unwrap();
        assert_eq!(v.shape(), &[2, 3, 4]);
        assert_eq!(v.as_slice().len(), 24);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let buf = vec![0.0; 23];
        match ExtView::new("b", &buf, &[2, 3, 4]) {
            Err(InitError::ShapeMismatch {
                expected, got, ..
            }) => {
                assert_eq!(expected, 24);
                assert_eq!(got, 23);
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn zero_extent_axis_requires_empty_buffer() {
        let buf: Vec<Real> = Vec::new();
        assert!(ExtView::new("b", &buf, &[0, 3, 4]).is_ok());
        let buf = vec![0.0; 1];
        assert!(ExtView::new("b", &buf, &[0, 3, 4]).is_err());
    }

    #[test]
    fn mutable_view_round_trips_writes() {
        let mut buf = vec![0.0; 6];
        let mut v = ExtViewMut::new("b", &mut buf, &[2, 3]).unwrap();
        v.as_mut_slice()[4] = 7.5;
        assert_eq!(buf[4], 7.5);
    }
}

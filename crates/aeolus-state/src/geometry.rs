//! Per-element geometry: metric terms on the reference sphere.

use aeolus_core::{ExtView, InitError, NP};

use crate::layout::{len_of, POINTWISE, TENSOR_2X2, VEC_SPH2CART};
use crate::memory::DeviceArray;

/// One element's worth of geometry buffers, as supplied by the caller.
///
/// Shapes are verified by the [`ExtView`] constructors; `set_element`
/// additionally checks that each view carries exactly one element.
pub struct GeometryFields<'a> {
    /// Map from reference to physical coordinates, `[2][2][np][np]`.
    pub d: ExtView<'a>,
    /// Inverse of `d`, `[2][2][np][np]`.
    pub dinv: ExtView<'a>,
    /// Coriolis parameter, `[np][np]`.
    pub fcor: ExtView<'a>,
    /// Spectral mass, `[np][np]`.
    pub spheremp: ExtView<'a>,
    /// Inverse spectral mass, `[np][np]`.
    pub rspheremp: ExtView<'a>,
    /// Metric determinant, `[np][np]`.
    pub metdet: ExtView<'a>,
    /// Inverse metric tensor, `[2][2][np][np]`.
    pub metinv: ExtView<'a>,
    /// Surface geopotential, `[np][np]`.
    pub phis: ExtView<'a>,
    /// Tensor-hyperviscosity coefficients, `[2][2][np][np]`.
    pub tensorvisc: ExtView<'a>,
    /// Spherical-to-Cartesian velocity map, `[2][3][np][np]`.
    pub vec_sph2cart: ExtView<'a>,
}

/// Geometry for all elements, device-resident.
#[derive(Debug)]
pub struct ElementsGeometry {
    num_elems: usize,
    consthv: bool,
    /// Map from reference to physical coordinates.
    pub d: DeviceArray,
    /// Inverse of `d`.
    pub dinv: DeviceArray,
    /// Coriolis parameter.
    pub fcor: DeviceArray,
    /// Spectral mass.
    pub spheremp: DeviceArray,
    /// Inverse spectral mass.
    pub rspheremp: DeviceArray,
    /// Metric determinant.
    pub metdet: DeviceArray,
    /// Inverse metric tensor.
    pub metinv: DeviceArray,
    /// Surface geopotential.
    pub phis: DeviceArray,
    /// Tensor-hyperviscosity coefficients. Populated only when the
    /// tensor operator is selected.
    pub tensorvisc: DeviceArray,
    /// Spherical-to-Cartesian velocity map. Populated only when the
    /// tensor operator is selected.
    pub vec_sph2cart: DeviceArray,
}

impl ElementsGeometry {
    /// Allocate geometry storage for `num_elems` elements.
    ///
    /// `consthv` selects constant-coefficient hyperviscosity, in which
    /// case the tensor fields stay zero.
    pub fn new(num_elems: usize, consthv: bool) -> Self {
        let tensor = [&[num_elems][..], &TENSOR_2X2[..]].concat();
        let sph2cart = [&[num_elems][..], &VEC_SPH2CART[..]].concat();
        let pointwise = [num_elems, NP, NP];
        Self {
            num_elems,
            consthv,
            d: DeviceArray::zeros("d", &tensor),
            dinv: DeviceArray::zeros("dinv", &tensor),
            fcor: DeviceArray::zeros("fcor", &pointwise),
            spheremp: DeviceArray::zeros("spheremp", &pointwise),
            rspheremp: DeviceArray::zeros("rspheremp", &pointwise),
            metdet: DeviceArray::zeros("metdet", &pointwise),
            metinv: DeviceArray::zeros("metinv", &tensor),
            phis: DeviceArray::zeros("phis", &pointwise),
            tensorvisc: DeviceArray::zeros("tensorvisc", &tensor),
            vec_sph2cart: DeviceArray::zeros("vec_sph2cart", &sph2cart),
        }
    }

    /// Number of elements this container was sized for.
    pub fn num_elems(&self) -> usize {
        self.num_elems
    }

    /// Whether the constant-coefficient operator is selected.
    pub fn const_hypervis(&self) -> bool {
        self.consthv
    }

    /// Install one element's metric terms.
    ///
    /// The tensor-viscosity fields are skipped under the
    /// constant-coefficient operator.
    pub fn set_element(&mut self, ie: usize, f: &GeometryFields<'_>) -> Result<(), InitError> {
        if ie >= self.num_elems {
            return Err(InitError::ElementIndexOutOfRange {
                index: ie,
                num_elems: self.num_elems,
            });
        }
        let tensor = len_of(&TENSOR_2X2);
        let pointwise = len_of(&POINTWISE);

        upload(&mut self.d, ie, tensor, &f.d)?;
        upload(&mut self.dinv, ie, tensor, &f.dinv)?;
        upload(&mut self.fcor, ie, pointwise, &f.fcor)?;
        upload(&mut self.spheremp, ie, pointwise, &f.spheremp)?;
        upload(&mut self.rspheremp, ie, pointwise, &f.rspheremp)?;
        upload(&mut self.metdet, ie, pointwise, &f.metdet)?;
        upload(&mut self.metinv, ie, tensor, &f.metinv)?;
        upload(&mut self.phis, ie, pointwise, &f.phis)?;
        if !self.consthv {
            upload(&mut self.tensorvisc, ie, tensor, &f.tensorvisc)?;
            upload(&mut self.vec_sph2cart, ie, len_of(&VEC_SPH2CART), &f.vec_sph2cart)?;
        }
        Ok(())
    }
}

fn upload(
    dst: &mut DeviceArray,
    ie: usize,
    elem_len: usize,
    src: &ExtView<'_>,
) -> Result<(), InitError> {
    if src.as_slice().len() != elem_len {
        return Err(InitError::ShapeMismatch {
            name: src.name(),
            expected: elem_len,
            got: src.as_slice().len(),
        });
    }
    dst.upload_slab(ie * elem_len, src.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeolus_core::Real;

    fn views(buf: &GeoBufs) -> GeometryFields<'_> {
        GeometryFields {
            d: ExtView::new("d", &buf.tensor, &TENSOR_2X2).unwrap(),
            dinv: ExtView::new("dinv", &buf.tensor, &TENSOR_2X2).unwrap(),
            fcor: ExtView::new("fcor", &buf.pointwise, &POINTWISE).unwrap(),
            spheremp: ExtView::new("spheremp", &buf.pointwise, &POINTWISE).unwrap(),
            rspheremp: ExtView::new("rspheremp", &buf.pointwise, &POINTWISE).unwrap(),
            metdet: ExtView::new("metdet", &buf.pointwise, &POINTWISE).unwrap(),
            metinv: ExtView::new("metinv", &buf.tensor, &TENSOR_2X2).unwrap(),
            phis: ExtView::new("phis", &buf.pointwise, &POINTWISE).unwrap(),
            tensorvisc: ExtView::new("tensorvisc", &buf.tensor, &TENSOR_2X2).unwrap(),
            vec_sph2cart: ExtView::new("vec_sph2cart", &buf.sph2cart, &VEC_SPH2CART).unwrap(),
        }
    }

    struct GeoBufs {
        tensor: Vec<Real>,
        pointwise: Vec<Real>,
        sph2cart: Vec<Real>,
    }

    fn bufs(fill: Real) -> GeoBufs {
        GeoBufs {
            tensor: vec![fill; len_of(&TENSOR_2X2)],
            pointwise: vec![fill; len_of(&POINTWISE)],
            sph2cart: vec![fill; len_of(&VEC_SPH2CART)],
        }
    }

    #[test]
    fn set_element_lands_in_the_right_slab() {
        let mut g = ElementsGeometry::new(3, true);
        let b = bufs(2.5);
        g.set_element(1, &views(&b)).unwrap();

        let mut m = g.fcor.create_mirror();
        g.fcor.deep_copy_to(&mut m);
        let per = len_of(&POINTWISE);
        assert!(m.as_slice()[..per].iter().all(|&x| x == 0.0));
        assert!(m.as_slice()[per..2 * per].iter().all(|&x| x == 2.5));
        assert!(m.as_slice()[2 * per..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn out_of_range_element_is_rejected() {
        let mut g = ElementsGeometry::new(2, true);
        let b = bufs(1.0);
        match g.set_element(2, &views(&b)) {
            Err(InitError::ElementIndexOutOfRange { index, num_elems }) => {
                assert_eq!(index, 2);
                assert_eq!(num_elems, 2);
            }
            other => panic!("expected ElementIndexOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn tensor_fields_skipped_under_constant_coefficients() {
        let mut g = ElementsGeometry::new(1, true);
        let b = bufs(4.0);
        g.set_element(0, &views(&b)).unwrap();
        let mut m = g.tensorvisc.create_mirror();
        g.tensorvisc.deep_copy_to(&mut m);
        assert!(m.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn tensor_fields_populated_for_tensor_operator() {
        let mut g = ElementsGeometry::new(1, false);
        let b = bufs(4.0);
        g.set_element(0, &views(&b)).unwrap();
        let mut m = g.vec_sph2cart.create_mirror();
        g.vec_sph2cart.deep_copy_to(&mut m);
        assert!(m.as_slice().iter().all(|&x| x == 4.0));
    }
}

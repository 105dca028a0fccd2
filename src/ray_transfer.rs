#![warn(missing_docs)]
//! Paraxial rays and ray transfer (ABCD) matrices
//!
//! A [`ParaxialRay`] is described by its height above the optical axis and its angle with respect
//! to the axis. A [`RayTransferMatrix`] maps such a ray from one reference plane to another. All
//! matrix entries are stored in SI base units: `A` and `D` are dimensionless, `B` is given in meters
//! and `C` in 1/meter.
use crate::error::{ParaxisError, ParaxisResult};
use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, ops::Mul};
use uom::num_traits::Zero;
use uom::si::{
    angle::radian,
    f64::{Angle, Length},
};

/// A ray in the paraxial (small angle) approximation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParaxialRay {
    height: Length,
    angle: Angle,
}
impl ParaxialRay {
    /// Creates a new [`ParaxialRay`] with the given height above the axis and angle.
    #[must_use]
    pub const fn new(height: Length, angle: Angle) -> Self {
        Self { height, angle }
    }
    /// Creates a ray running parallel to the optical axis at the given height.
    #[must_use]
    pub fn collimated(height: Length) -> Self {
        Self {
            height,
            angle: Angle::zero(),
        }
    }
    /// Returns the height of this [`ParaxialRay`] above the optical axis.
    #[must_use]
    pub const fn height(&self) -> Length {
        self.height
    }
    /// Returns the angle of this [`ParaxialRay`] with respect to the optical axis.
    #[must_use]
    pub const fn angle(&self) -> Angle {
        self.angle
    }
    fn as_vector(&self) -> Vector2<f64> {
        Vector2::new(self.height.value, self.angle.get::<radian>())
    }
    fn from_vector(vector: &Vector2<f64>) -> Self {
        Self {
            height: Length::new::<uom::si::length::meter>(vector[0]),
            angle: Angle::new::<radian>(vector[1]),
        }
    }
}

/// A 2x2 ray transfer matrix `[[A, B], [C, D]]`.
///
/// Matrices compose by premultiplication: if a ray first passes an element described by `m1` and
/// then an element described by `m2`, the combined matrix is `m2 * m1` (or `m1.then(&m2)`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayTransferMatrix {
    matrix: Matrix2<f64>,
}
impl Default for RayTransferMatrix {
    fn default() -> Self {
        Self::identity()
    }
}
impl RayTransferMatrix {
    /// Creates the identity matrix, which leaves every ray untouched.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix2::identity(),
        }
    }
    /// Creates a matrix from its four entries (in SI base units).
    #[must_use]
    pub fn from_abcd(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self {
            matrix: Matrix2::new(a, b, c, d),
        }
    }
    /// Creates the matrix of a thin lens `[[1, 0], [-1/f, 1]]`.
    ///
    /// # Errors
    ///
    /// This function returns [`ParaxisError::DivisionByZero`] if the given `focal_length` is
    /// exactly zero.
    pub fn thin_lens(focal_length: Length) -> ParaxisResult<Self> {
        if focal_length.is_zero() {
            return Err(ParaxisError::DivisionByZero(
                "thin lens with zero focal length".into(),
            ));
        }
        Ok(Self::from_abcd(1.0, 0.0, -1.0 / focal_length.value, 1.0))
    }
    /// Creates the matrix of a free-space propagation `[[1, d], [0, 1]]` over the (signed)
    /// distance `d`.
    #[must_use]
    pub fn free_space(distance: Length) -> Self {
        Self::from_abcd(1.0, distance.value, 0.0, 1.0)
    }
    /// Returns the `A` entry (dimensionless).
    #[must_use]
    pub fn a(&self) -> f64 {
        self.matrix[(0, 0)]
    }
    /// Returns the `B` entry (meter).
    #[must_use]
    pub fn b(&self) -> f64 {
        self.matrix[(0, 1)]
    }
    /// Returns the `C` entry (1/meter).
    #[must_use]
    pub fn c(&self) -> f64 {
        self.matrix[(1, 0)]
    }
    /// Returns the `D` entry (dimensionless).
    #[must_use]
    pub fn d(&self) -> f64 {
        self.matrix[(1, 1)]
    }
    /// Returns the underlying [`Matrix2`].
    #[must_use]
    pub const fn as_matrix(&self) -> &Matrix2<f64> {
        &self.matrix
    }
    /// Returns the entries as nested rows `[[A, B], [C, D]]`.
    #[must_use]
    pub fn to_rows(&self) -> [[f64; 2]; 2] {
        [[self.a(), self.b()], [self.c(), self.d()]]
    }
    /// Returns the determinant `AD - BC`.
    ///
    /// Products of thin lens and free-space matrices always have a determinant of 1.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.a().mul_add(self.d(), -self.b() * self.c())
    }
    /// Returns the inverse of this matrix.
    ///
    /// # Errors
    ///
    /// This function returns [`ParaxisError::SingularMatrix`] if the determinant is exactly zero.
    pub fn inverse(&self) -> ParaxisResult<Self> {
        let matrix = self
            .matrix
            .try_inverse()
            .ok_or(ParaxisError::SingularMatrix)?;
        Ok(Self { matrix })
    }
    /// Returns the matrix of passing `self` first and `next` afterwards (`next * self`).
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        Self {
            matrix: next.matrix * self.matrix,
        }
    }
    /// Propagates a [`ParaxialRay`] through this matrix.
    #[must_use]
    pub fn propagate(&self, ray: &ParaxialRay) -> ParaxialRay {
        ParaxialRay::from_vector(&(self.matrix * ray.as_vector()))
    }
}
impl Mul for RayTransferMatrix {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            matrix: self.matrix * rhs.matrix,
        }
    }
}
impl Display for RayTransferMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[[{}, {} m], [{} 1/m, {}]]",
            self.a(),
            self.b(),
            self.c(),
            self.d()
        )
    }
}
#[cfg(test)]
mod test {
    use super::*;
    use crate::{meter, millimeter, radian};
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    #[test]
    fn default() {
        let m = RayTransferMatrix::default();
        assert_eq!(m, RayTransferMatrix::identity());
        assert_eq!(m.to_rows(), [[1.0, 0.0], [0.0, 1.0]]);
    }
    #[test]
    fn thin_lens() {
        let m = RayTransferMatrix::thin_lens(meter!(2.0)).unwrap();
        assert_eq!(m.to_rows(), [[1.0, 0.0], [-0.5, 1.0]]);
        let m = RayTransferMatrix::thin_lens(meter!(-4.0)).unwrap();
        assert_eq!(m.c(), 0.25);
    }
    #[test]
    fn thin_lens_zero_focal_length() {
        assert_matches!(
            RayTransferMatrix::thin_lens(meter!(0.0)),
            Err(ParaxisError::DivisionByZero(_))
        );
    }
    #[test]
    fn free_space() {
        let m = RayTransferMatrix::free_space(meter!(-1.5));
        assert_eq!(m.to_rows(), [[1.0, -1.5], [0.0, 1.0]]);
        assert_eq!(m.determinant(), 1.0);
    }
    #[test]
    fn determinant() {
        let m = RayTransferMatrix::from_abcd(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m.determinant(), -2.0);
    }
    #[test]
    fn inverse() {
        let m = RayTransferMatrix::from_abcd(1.0, 2.0, 3.0, 4.0);
        let inv = m.inverse().unwrap();
        assert_eq!(inv.to_rows(), [[-2.0, 1.0], [1.5, -0.5]]);
        let product = m * inv;
        assert_abs_diff_eq!(product.a(), 1.0);
        assert_abs_diff_eq!(product.b(), 0.0);
        assert_abs_diff_eq!(product.c(), 0.0);
        assert_abs_diff_eq!(product.d(), 1.0);
    }
    #[test]
    fn inverse_singular() {
        let m = RayTransferMatrix::from_abcd(1.0, 2.0, 2.0, 4.0);
        assert_eq!(m.inverse(), Err(ParaxisError::SingularMatrix));
        let m = RayTransferMatrix::from_abcd(0.0, 0.0, 0.0, 0.0);
        assert_eq!(m.inverse(), Err(ParaxisError::SingularMatrix));
        // tiny but non-zero determinant is still invertible
        let m = RayTransferMatrix::from_abcd(1.0e-10, 0.0, 0.0, 1.0e-10);
        assert!(m.inverse().is_ok());
    }
    #[test]
    fn then() {
        let lens = RayTransferMatrix::thin_lens(meter!(1.0)).unwrap();
        let gap = RayTransferMatrix::free_space(meter!(2.0));
        assert_eq!(lens.then(&gap), gap * lens);
        assert_eq!(lens.then(&gap).to_rows(), [[-1.0, 2.0], [-1.0, 1.0]]);
    }
    #[test]
    fn propagate_free_space() {
        let ray = ParaxialRay::new(millimeter!(1.0), radian!(0.01));
        let out = RayTransferMatrix::free_space(meter!(1.0)).propagate(&ray);
        assert_abs_diff_eq!(out.height().value, 0.011);
        assert_abs_diff_eq!(out.angle().get::<radian>(), 0.01);
    }
    #[test]
    fn propagate_through_focus() {
        let ray = ParaxialRay::collimated(millimeter!(5.0));
        let system = RayTransferMatrix::thin_lens(millimeter!(100.0))
            .unwrap()
            .then(&RayTransferMatrix::free_space(millimeter!(100.0)));
        let out = system.propagate(&ray);
        assert_abs_diff_eq!(out.height().value, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(out.angle().get::<radian>(), -0.05, epsilon = 1e-12);
    }
    #[test]
    fn display() {
        let m = RayTransferMatrix::from_abcd(1.0, 2.0, -0.5, 1.0);
        assert_eq!(format!("{m}"), "[[1, 2 m], [-0.5 1/m, 1]]");
    }
}

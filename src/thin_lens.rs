#![warn(missing_docs)]
//! Thin lens (ideal lens) element
use crate::{error::ParaxisResult, ray_transfer::RayTransferMatrix};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uom::si::{f64::Length, length::millimeter};

/// An ideal lens of zero thickness placed on the optical axis.
///
/// A thin lens is fully characterized by its focal length and its axial position in the lab frame.
/// A positive `focal length` corresponds to a focussing (convex) lens while a negative `focal length`
/// represents a defocussing (concave) lens.
///
/// A focal length of zero is accepted here but is reported as [`ParaxisError::DivisionByZero`](crate::error::ParaxisError::DivisionByZero)
/// as soon as the lens's transfer matrix is needed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThinLens {
    focal_length: Length,
    position: Length,
}
impl ThinLens {
    /// Creates a new [`ThinLens`] with the given focal length at the given axial position.
    #[must_use]
    pub const fn new(focal_length: Length, position: Length) -> Self {
        Self {
            focal_length,
            position,
        }
    }
    /// Returns the focal length of this [`ThinLens`].
    #[must_use]
    pub const fn focal_length(&self) -> Length {
        self.focal_length
    }
    /// Returns the axial position of this [`ThinLens`].
    #[must_use]
    pub const fn position(&self) -> Length {
        self.position
    }
    /// Returns `true` for a converging (positive focal length) lens.
    #[must_use]
    pub fn is_converging(&self) -> bool {
        self.focal_length.value > 0.0
    }
    /// Returns the ray transfer matrix of this lens.
    ///
    /// # Errors
    ///
    /// This function returns an error if the focal length is zero.
    pub fn transfer_matrix(&self) -> ParaxisResult<RayTransferMatrix> {
        RayTransferMatrix::thin_lens(self.focal_length)
    }
}
impl Display for ThinLens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "f = {:.3} mm @ {:.3} mm",
            self.focal_length.get::<millimeter>(),
            self.position.get::<millimeter>()
        )
    }
}

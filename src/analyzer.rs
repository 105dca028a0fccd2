#![warn(missing_docs)]
//! Paraxial analysis of an [`OpticSystem`]
//!
//! The [`SystemAnalyzer`] composes the ray transfer matrix of a thin lens train and derives the
//! effective focal length as well as the positions of the front and back focal points and principal
//! planes. Every query is computed from scratch from the current content of the system.
use crate::{
    error::{ParaxisError, ParaxisResult},
    optic_system::OpticSystem,
    ray_transfer::{ParaxialRay, RayTransferMatrix},
    reporter::AnalysisReport,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use strum::EnumIter;
use uom::num_traits::Zero;
use uom::si::{
    angle::radian,
    f64::Length,
    length::{meter, millimeter},
};

/// Configuration of a [`SystemAnalyzer`].
///
/// Divisors which are exactly zero always lead to [`ParaxisError::DivisionByZero`]. Divisors whose
/// magnitude is non-zero but below `near_zero_threshold` (given in SI base units) are accepted, but a
/// warning is logged since the results are numerically unreliable (e.g. an almost afocal system).
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    near_zero_threshold: f64,
}
impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            near_zero_threshold: 1.0e-12,
        }
    }
}
impl AnalyzerConfig {
    /// Returns the near-zero threshold of this [`AnalyzerConfig`].
    #[must_use]
    pub const fn near_zero_threshold(&self) -> f64 {
        self.near_zero_threshold
    }
    /// Sets the near-zero threshold of this [`AnalyzerConfig`].
    ///
    /// # Errors
    ///
    /// This function returns an error if the given threshold is negative or not finite.
    pub fn set_near_zero_threshold(&mut self, threshold: f64) -> ParaxisResult<()> {
        if !threshold.is_finite() || threshold.is_sign_negative() {
            return Err(ParaxisError::Other(
                "near-zero threshold must be >= 0.0 and finite".into(),
            ));
        }
        self.near_zero_threshold = threshold;
        Ok(())
    }
}

/// Side of an optical system
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Side {
    /// object side (in front of the leftmost lens)
    Front,
    /// image side (behind the rightmost lens)
    Back,
}
impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Front => write!(f, "front"),
            Self::Back => write!(f, "back"),
        }
    }
}

/// Focal point, principal plane and focal distance on one [`Side`] of an optical system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocalParameters {
    /// lab frame position of the focal point
    pub focal_point: Length,
    /// lab frame position of the principal plane
    pub principal_plane: Length,
    /// distance of the focal point from the outermost lens on this side
    pub focal_distance: Length,
}
impl FocalParameters {
    /// Returns the parameters as `(focal point, principal plane, focal distance)`.
    #[must_use]
    pub const fn as_tuple(&self) -> (Length, Length, Length) {
        (self.focal_point, self.principal_plane, self.focal_distance)
    }
}
impl Display for FocalParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "focal point: {:.3} mm, principal plane: {:.3} mm, focal distance: {:.3} mm",
            self.focal_point.get::<millimeter>(),
            self.principal_plane.get::<millimeter>(),
            self.focal_distance.get::<millimeter>()
        )
    }
}

/// Analyzer for the paraxial properties of an [`OpticSystem`].
///
/// The analyzer borrows the system, so it cannot be modified while an analysis is in progress.
#[derive(Debug, Clone)]
pub struct SystemAnalyzer<'a> {
    system: &'a OpticSystem,
    config: AnalyzerConfig,
}
impl<'a> SystemAnalyzer<'a> {
    /// Creates a new [`SystemAnalyzer`] with the default [`AnalyzerConfig`].
    #[must_use]
    pub fn new(system: &'a OpticSystem) -> Self {
        Self::with_config(system, AnalyzerConfig::default())
    }
    /// Creates a new [`SystemAnalyzer`] with the given [`AnalyzerConfig`].
    #[must_use]
    pub const fn with_config(system: &'a OpticSystem, config: AnalyzerConfig) -> Self {
        Self { system, config }
    }
    /// Returns the [`AnalyzerConfig`] of this [`SystemAnalyzer`].
    #[must_use]
    pub const fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
    /// Returns the ray transfer matrix of the whole system.
    ///
    /// The matrix maps a ray just in front of the leftmost lens to a ray just behind the rightmost
    /// lens. Starting from the identity, the lenses are walked in ascending position order: the
    /// running matrix is premultiplied by each lens matrix followed by the free-space matrix to the
    /// next lens.
    ///
    /// # Errors
    ///
    /// This function returns an error if
    ///  - the system does not contain any lens ([`ParaxisError::EmptySystem`]).
    ///  - a lens has a focal length of zero ([`ParaxisError::DivisionByZero`]).
    pub fn transfer_matrix(&self) -> ParaxisResult<RayTransferMatrix> {
        let lenses = self.system.ordered_lenses();
        if lenses.is_empty() {
            return Err(ParaxisError::EmptySystem);
        }
        let mut matrix = RayTransferMatrix::identity();
        for (i, lens) in lenses.iter().enumerate() {
            matrix = matrix.then(&lens.transfer_matrix()?);
            if let Some(next) = lenses.get(i + 1) {
                matrix = matrix.then(&RayTransferMatrix::free_space(
                    next.position() - lens.position(),
                ));
            }
        }
        Ok(matrix)
    }
    /// Returns the effective focal length `-1/C` of the system.
    ///
    /// # Errors
    ///
    /// This function returns an error if
    ///  - the transfer matrix cannot be calculated (see [`Self::transfer_matrix`]).
    ///  - the system is afocal (`C` = 0, [`ParaxisError::DivisionByZero`]).
    pub fn effective_focal_length(&self) -> ParaxisResult<Length> {
        let matrix = self.transfer_matrix()?;
        self.effective_focal_length_of(&matrix)
    }
    /// Returns the back focal point, back principal plane and back focal distance.
    ///
    /// A collimated ray entering the system is propagated through the transfer matrix. Its
    /// intersection with the axis behind the rightmost lens is the back focal point.
    ///
    /// # Errors
    ///
    /// This function returns an error if the transfer matrix cannot be calculated or if the
    /// outgoing ray is parallel to the axis (afocal system).
    pub fn back_focal_parameters(&self) -> ParaxisResult<FocalParameters> {
        self.focal_parameters(Side::Back)
    }
    /// Returns the front focal point, front principal plane and front focal distance.
    ///
    /// A collimated ray is propagated backwards (through the inverse transfer matrix). Its
    /// intersection with the axis in front of the leftmost lens is the front focal point.
    ///
    /// # Errors
    ///
    /// This function returns an error if the transfer matrix cannot be calculated or inverted or
    /// if the outgoing ray is parallel to the axis (afocal system).
    pub fn front_focal_parameters(&self) -> ParaxisResult<FocalParameters> {
        self.focal_parameters(Side::Front)
    }
    /// Returns the [`FocalParameters`] of the given [`Side`].
    ///
    /// # Errors
    ///
    /// This function returns an error if
    ///  - the transfer matrix cannot be calculated (see [`Self::transfer_matrix`]).
    ///  - the matrix is singular and the front side is requested ([`ParaxisError::SingularMatrix`]).
    ///  - the traced ray leaves the system parallel to the axis ([`ParaxisError::DivisionByZero`]).
    pub fn focal_parameters(&self, side: Side) -> ParaxisResult<FocalParameters> {
        let matrix = self.transfer_matrix()?;
        let efl = self.effective_focal_length_of(&matrix)?;
        self.focal_parameters_of(&matrix, efl, side)
    }
    /// Performs all queries and collects the results in an [`AnalysisReport`].
    ///
    /// The transfer matrix is composed only once and shared by all derived quantities.
    ///
    /// # Errors
    ///
    /// This function returns the first error of any of the underlying queries.
    pub fn analyze(&self) -> ParaxisResult<AnalysisReport> {
        let transfer_matrix = self.transfer_matrix()?;
        let effective_focal_length = self.effective_focal_length_of(&transfer_matrix)?;
        let front =
            self.focal_parameters_of(&transfer_matrix, effective_focal_length, Side::Front)?;
        let back =
            self.focal_parameters_of(&transfer_matrix, effective_focal_length, Side::Back)?;
        info!(
            "Analyzed system of {} lens(es): effective focal length {:.3} mm",
            self.system.len(),
            effective_focal_length.get::<millimeter>()
        );
        Ok(AnalysisReport::new(
            self.system.ordered_lenses(),
            transfer_matrix,
            effective_focal_length,
            front,
            back,
        ))
    }
    // the traced ray angle is `C` (back) or `-C/det` (front); its near-zero warning is issued by
    // the EFL check
    fn focal_parameters_of(
        &self,
        matrix: &RayTransferMatrix,
        efl: Length,
        side: Side,
    ) -> ParaxisResult<FocalParameters> {
        let (reference, propagation) = match side {
            Side::Back => (self.system.last_lens(), *matrix),
            Side::Front => (self.system.first_lens(), matrix.inverse()?),
        };
        let reference = reference.ok_or(ParaxisError::EmptySystem)?.position();
        let ray = propagation.propagate(&ParaxialRay::collimated(Length::new::<meter>(1.0)));
        let angle = ray.angle().get::<radian>();
        if angle.is_zero() {
            return Err(ParaxisError::DivisionByZero(format!(
                "{side} focal point: ray leaves parallel to axis"
            )));
        }
        let parameters = match side {
            Side::Back => {
                let focal_distance = -ray.height() / angle;
                let focal_point = reference + focal_distance;
                FocalParameters {
                    focal_point,
                    principal_plane: focal_point - efl,
                    focal_distance,
                }
            }
            Side::Front => {
                let focal_distance = ray.height() / angle;
                let focal_point = reference - focal_distance;
                FocalParameters {
                    focal_point,
                    principal_plane: focal_point + efl,
                    focal_distance,
                }
            }
        };
        Ok(parameters)
    }
    fn effective_focal_length_of(&self, matrix: &RayTransferMatrix) -> ParaxisResult<Length> {
        self.check_divisor(matrix.c(), "afocal system: C element of transfer matrix is zero")?;
        Ok(Length::new::<meter>(-1.0 / matrix.c()))
    }
    fn check_divisor(&self, divisor: f64, msg: &str) -> ParaxisResult<()> {
        if divisor.is_zero() {
            return Err(ParaxisError::DivisionByZero(msg.into()));
        }
        if divisor.abs() < self.config.near_zero_threshold {
            warn!("divisor {divisor:e} is close to zero. Results might be inaccurate.");
        }
        Ok(())
    }
}

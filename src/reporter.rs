#![warn(missing_docs)]
//! Report of a paraxial analysis
use crate::{
    analyzer::FocalParameters,
    error::{ParaxisError, ParaxisResult},
    ray_transfer::RayTransferMatrix,
    thin_lens::ThinLens,
};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uom::si::{f64::Length, length::millimeter};

/// Snapshot of all results of a [`SystemAnalyzer`](crate::analyzer::SystemAnalyzer) run.
///
/// The report is all a renderer needs to draw a diagram of the system (see [`Plottable`](crate::plottable::Plottable)).
/// It can be serialized (e.g. to JSON) since all lengths are stored in SI base units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    lenses: Vec<ThinLens>,
    transfer_matrix: [[f64; 2]; 2],
    effective_focal_length: Length,
    front: FocalParameters,
    back: FocalParameters,
}
impl AnalysisReport {
    /// Creates a new [`AnalysisReport`].
    #[must_use]
    pub fn new(
        lenses: Vec<ThinLens>,
        transfer_matrix: RayTransferMatrix,
        effective_focal_length: Length,
        front: FocalParameters,
        back: FocalParameters,
    ) -> Self {
        Self {
            lenses,
            transfer_matrix: transfer_matrix.to_rows(),
            effective_focal_length,
            front,
            back,
        }
    }
    /// Returns the analyzed lenses in ascending position order.
    #[must_use]
    pub fn lenses(&self) -> &[ThinLens] {
        &self.lenses
    }
    /// Returns the transfer matrix of the system.
    #[must_use]
    pub fn transfer_matrix(&self) -> RayTransferMatrix {
        let [[a, b], [c, d]] = self.transfer_matrix;
        RayTransferMatrix::from_abcd(a, b, c, d)
    }
    /// Returns the effective focal length of the system.
    #[must_use]
    pub const fn effective_focal_length(&self) -> Length {
        self.effective_focal_length
    }
    /// Returns the front focal parameters.
    #[must_use]
    pub const fn front(&self) -> &FocalParameters {
        &self.front
    }
    /// Returns the back focal parameters.
    #[must_use]
    pub const fn back(&self) -> &FocalParameters {
        &self.back
    }
    /// Serializes this report to pretty printed JSON.
    ///
    /// # Errors
    ///
    /// This function returns an error if the serialization fails.
    pub fn to_json(&self) -> ParaxisResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ParaxisError::Other(format!("serialization of report failed: {e}")))
    }
}
impl Display for AnalysisReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Lenses:")?;
        for lens in &self.lenses {
            writeln!(f, "  {lens}")?;
        }
        writeln!(f, "Transfer matrix: {}", self.transfer_matrix())?;
        writeln!(
            f,
            "Effective focal length: {:.3} mm",
            self.effective_focal_length.get::<millimeter>()
        )?;
        writeln!(f, "Front: {}", self.front)?;
        write!(f, "Back: {}", self.back)
    }
}

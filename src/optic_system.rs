#![warn(missing_docs)]
//! The registry of thin lenses forming an optical train
use crate::{
    analyzer::{AnalyzerConfig, SystemAnalyzer},
    thin_lens::ThinLens,
};
use log::debug;
use serde::{Deserialize, Serialize};
use uom::si::{f64::Length, length::millimeter};

/// An optical train of [`ThinLens`]es placed along the optical axis.
///
/// The lenses are stored in insertion order. Since every analysis orders the lenses by their
/// position first, the insertion order has no influence on any result. Several lenses may share
/// the same position; they then keep their insertion order.
///
/// # Example
/// ```
/// use paraxis::{millimeter, OpticSystem};
///
/// let mut system = OpticSystem::new();
/// system.add_lens(millimeter!(100.0), millimeter!(0.0));
/// let efl = system.analyzer().effective_focal_length().unwrap();
/// assert!((efl - millimeter!(100.0)).abs() < millimeter!(1e-9));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpticSystem {
    lenses: Vec<ThinLens>,
}
impl OpticSystem {
    /// Creates an empty [`OpticSystem`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Adds a thin lens with the given focal length at the given axial position.
    ///
    /// No validation takes place. A zero focal length is accepted but lets every later analysis fail.
    pub fn add_lens(&mut self, focal_length: Length, position: Length) {
        debug!(
            "add lens f={:.3} mm at {:.3} mm",
            focal_length.get::<millimeter>(),
            position.get::<millimeter>()
        );
        self.lenses.push(ThinLens::new(focal_length, position));
    }
    /// Returns all lenses in insertion order.
    #[must_use]
    pub fn lenses(&self) -> &[ThinLens] {
        &self.lenses
    }
    /// Returns a copy of all lenses sorted ascending by their position.
    ///
    /// The sort is stable: lenses at identical positions keep their insertion order. The
    /// positions `-0.0` and `+0.0` count as identical.
    #[must_use]
    pub fn ordered_lenses(&self) -> Vec<ThinLens> {
        let mut lenses = self.lenses.clone();
        // adding +0.0 maps -0.0 to +0.0
        lenses.sort_by(|a, b| {
            (a.position().value + 0.0).total_cmp(&(b.position().value + 0.0))
        });
        lenses
    }
    /// Returns the leftmost (smallest position) lens or `None` for an empty system.
    #[must_use]
    pub fn first_lens(&self) -> Option<ThinLens> {
        self.ordered_lenses().first().copied()
    }
    /// Returns the rightmost (largest position) lens or `None` for an empty system.
    #[must_use]
    pub fn last_lens(&self) -> Option<ThinLens> {
        self.ordered_lenses().last().copied()
    }
    /// Returns the number of lenses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lenses.len()
    }
    /// Returns `true` if the system does not contain any lens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lenses.is_empty()
    }
    /// Returns a [`SystemAnalyzer`] for this system using the default [`AnalyzerConfig`].
    #[must_use]
    pub fn analyzer(&self) -> SystemAnalyzer<'_> {
        SystemAnalyzer::new(self)
    }
    /// Returns a [`SystemAnalyzer`] for this system using the given [`AnalyzerConfig`].
    #[must_use]
    pub fn analyzer_with_config(&self, config: AnalyzerConfig) -> SystemAnalyzer<'_> {
        SystemAnalyzer::with_config(self, config)
    }
}
impl FromIterator<ThinLens> for OpticSystem {
    fn from_iter<T: IntoIterator<Item = ThinLens>>(iter: T) -> Self {
        Self {
            lenses: iter.into_iter().collect(),
        }
    }
}
impl Extend<ThinLens> for OpticSystem {
    fn extend<T: IntoIterator<Item = ThinLens>>(&mut self, iter: T) {
        self.lenses.extend(iter);
    }
}

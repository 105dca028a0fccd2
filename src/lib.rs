//! This is the documentation for the **PARAXIS** package, a tool for the paraxial (first-order)
//! analysis of thin lens trains.
//!
//! Lenses are collected in an [`OpticSystem`]. A [`SystemAnalyzer`](analyzer::SystemAnalyzer)
//! composes the ray transfer (ABCD) matrix of the system and derives the effective focal length
//! as well as the positions of the front and back focal points and principal planes.
//!
//! ```
//! use paraxis::{millimeter, OpticSystem};
//! use uom::si::length::millimeter;
//!
//! let mut system = OpticSystem::new();
//! system.add_lens(millimeter!(100.0), millimeter!(0.0));
//! system.add_lens(millimeter!(50.0), millimeter!(20.0));
//! let report = system.analyzer().analyze().unwrap();
//! let efl = report.effective_focal_length().get::<millimeter>();
//! assert!((efl - 38.4615).abs() < 1e-3);
//! ```
#![allow(clippy::module_name_repetitions)]

pub mod analyzer;
pub mod console;
pub mod error;
pub mod optic_system;
pub mod plottable;
pub mod ray_transfer;
pub mod reporter;
pub mod thin_lens;
pub mod utils;

pub use optic_system::OpticSystem;

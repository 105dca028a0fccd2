#![warn(missing_docs)]
//! Paraxis specific error structures
use std::{error::Error, fmt::Display};

/// Paraxis application specific Result type
pub type ParaxisResult<T> = std::result::Result<T, ParaxisError>;

/// Errors that can be returned by various PARAXIS functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParaxisError {
    /// an analysis was requested for an [`OpticSystem`](crate::OpticSystem) without any lens
    EmptySystem,
    /// a computed divisor (focal length, matrix entry or ray component) is exactly zero
    DivisionByZero(String),
    /// the system's transfer matrix has a zero determinant and cannot be inverted
    SingularMatrix,
    /// errors console io
    Console(String),
    /// errors while rendering a system diagram
    Plot(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for ParaxisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySystem => {
                write!(f, "EmptySystem:optic system does not contain any lens")
            }
            Self::DivisionByZero(m) => {
                write!(f, "DivisionByZero:{m}")
            }
            Self::SingularMatrix => {
                write!(f, "SingularMatrix:transfer matrix is not invertible")
            }
            Self::Console(m) => {
                write!(f, "Console:{m}")
            }
            Self::Plot(m) => {
                write!(f, "Plot:{m}")
            }
            Self::Other(m) => write!(f, "Paraxis Error:Other:{m}"),
        }
    }
}
impl Error for ParaxisError {}

impl std::convert::From<String> for ParaxisError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}

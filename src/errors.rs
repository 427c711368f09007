//! Layout errors

use crate::float_types::Real;

/// Everything that can abort a layout computation.
///
/// All variants are fatal: the pipeline stops at the first error and
/// produces no partial output.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// Malformed or length-mismatched parameters
    #[error("(Config) {0}")]
    Config(String),
    /// A generated vertex lies outside the chip outline
    #[error("(OutOfBounds) {feature} vertex {index} at ({x}, {y}) exceeds chip size")]
    OutOfBounds {
        feature: String,
        index: usize,
        x: Real,
        y: Real,
    },
    /// A triangle strip or contour has too few points to work with
    #[error("(InsufficientGeometry) need at least {needed} points, got {len}")]
    InsufficientGeometry { needed: usize, len: usize },
    /// Adjacent edges at this vertex are (nearly) parallel or of zero length
    #[error("(DegenerateCorner) cannot offset corner at vertex {index}")]
    DegenerateCorner { index: usize },
    /// The polygon boolean or triangulation engine failed
    #[error("(FatalGeometry) {0}")]
    FatalGeometry(String),
}

pub type LayoutResult<T> = Result<T, LayoutError>;

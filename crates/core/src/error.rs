//! # Error Types
//!
//! Classification and comparison are total: every shape has a brand and
//! every pair of shapes is either related or not. The only thing that can
//! go wrong is building a shape that has no meaning, such as a tuple whose
//! rest element is not last.

use thiserror::Error;

/// Errors raised while building a shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// `[A?, B]`: a required element cannot follow an optional one.
    #[error("Required element at position {index} follows an optional element")]
    RequiredAfterOptional { index: usize },

    /// `[...A, B]`: only the last element may be a rest element.
    #[error("Rest element at position {index} is not the last element")]
    RestNotLast { index: usize },
}

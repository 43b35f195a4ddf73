//! # Assert - Shape Assertions
//!
//! A fluent, invertible assertion API over `typebrand-core`. A context is
//! built around a subject shape with [`expect_shape`]; each check either
//! returns the context again or an [`AssertionError`] naming what failed.
//!
//! ```
//! use typebrand_assert::{expect_shape, AssertionError};
//! use typebrand_core::{Field, Shape};
//!
//! fn check() -> Result<(), AssertionError> {
//!     let subject = Shape::record([
//!         ("a", Field::required(Shape::Boolean)),
//!         ("b", Field::optional(Shape::String)),
//!     ]);
//!
//!     expect_shape(subject)
//!         .to_have_required(&["a"])?
//!         .to_have_optional(&["b"])?
//!         .not()
//!         .to_have_required(&["a", "b"])?;
//!     Ok(())
//! }
//!
//! assert!(check().is_ok());
//! ```

pub mod assertions;
pub mod error;

pub use assertions::{expect_shape, TypeAssertions};
pub use error::{AssertionError, AssertionKind, Candidate};

//! # Core - Structural Shape Classification
//!
//! This crate describes the forms a value may take and reasons about them
//! structurally:
//!
//! - **Shapes**: primitives, literals, records, sequences, callables and
//!   constructors, combined with normalizing unions and intersections
//! - **Relations**: one-way subsumption ([`Extends`]) and equivalence over
//!   shapes and over brands
//! - **Predicates**: the degenerate kinds (`never`, `any`, `unknown`, `{}`)
//!   and the unit and scalar kinds, each decided by subsumption alone
//! - **Keys**: which declared fields of a record are required, optional, or
//!   able to hold a value at all
//! - **Brands**: a canonical, recursively classified descriptor for every
//!   shape
//!
//! ## Design Philosophy
//!
//! Identity is structural. Two shapes built the same way are the same shape,
//! and two shapes that accept each other are equivalent no matter how they
//! were written. Every operation here is total and pure; the only fallible
//! step is building a sequence or signature with misplaced elements.
//!
//! ```
//! use typebrand_core::{equivalent, Brand, Field, Shape};
//!
//! let a = Shape::record([("a", Field::required(Shape::Number))]);
//! let ab = Shape::record([
//!     ("a", Field::required(Shape::Number)),
//!     ("b", Field::optional(Shape::String)),
//! ]);
//!
//! // Structurally, an optional extra field changes nothing...
//! assert!(equivalent(&a, &ab));
//! // ...but the brands differ in their optional entries.
//! assert!(!equivalent(&Brand::of(&a), &Brand::of(&ab)));
//! ```

pub mod brand;
pub mod error;
mod format;
pub mod keys;
pub mod predicates;
pub mod relation;
pub mod shape;

// Re-export key types at crate root for convenience
pub use brand::{classify, Brand, BrandKind};
pub use error::ShapeError;
pub use keys::{always_keys, optional_keys, required_keys};
pub use relation::{equivalent, subsumes, Extends};
pub use shape::{Construct, Element, ElementKind, Field, Literal, Record, Sequence, Shape, Signature};

//! # Shape Predicates
//!
//! Decision procedures for the degenerate and scalar kinds. Each one is a
//! boolean combination of subsumption checks against a witness shape; none
//! of them look inside the shape being tested.
//!
//! The predicates overlap. `unknown` accepts `{}`, `any` passes almost every
//! test, `never` extends every witness. Each predicate therefore excludes
//! the kinds that would otherwise be mistaken for it, and the brand engine
//! still tests them in a fixed order.

use typebrand_logic::{all, none, not, Truth};

use crate::keys::optional_keys;
use crate::relation::Extends;
use crate::shape::Shape;

/// Only the permissive top is related in both directions to a unique
/// symbol reserved for this check.
const PERMISSIVE_WITNESS: &str = "typebrand::permissive-witness";

fn permissive_witness() -> Shape {
    Shape::unique_symbol(PERMISSIVE_WITNESS)
}

/// `null | undefined | void`.
pub fn unit_shape() -> Shape {
    Shape::union([Shape::Null, Shape::Undefined, Shape::Void])
}

/// `boolean | string | number | bigint | symbol`.
pub fn primitive_shape() -> Shape {
    Shape::union([
        Shape::Boolean,
        Shape::String,
        Shape::Number,
        Shape::BigInt,
        Shape::Symbol,
    ])
}

/// The bottom kind: extends `never`.
pub fn is_bottom(shape: &Shape) -> bool {
    shape.extends(&Shape::Never)
}

/// The fully permissive top.
pub fn is_any(shape: &Shape) -> bool {
    let witness = permissive_witness();
    all([shape.extends(&witness), witness.extends(shape)]).is_true()
}

/// The restrictive top: accepts `unknown` but is not `any`.
pub fn is_unknown(shape: &Shape) -> bool {
    all([Truth::from(Shape::Unknown.extends(shape)), not(is_any(shape))]).is_true()
}

/// The empty record: accepts `{}`, declares no optional fields, and is
/// neither top.
pub fn is_empty(shape: &Shape) -> bool {
    all([
        Truth::from(Shape::empty_record().extends(shape)),
        Truth::from(optional_keys(shape).is_empty()),
        none([is_any(shape), is_unknown(shape)]),
    ])
    .is_true()
}

/// An absent-value marker: extends `null | undefined | void` and is none of
/// the degenerate kinds.
pub fn is_unit(shape: &Shape) -> bool {
    all([
        Truth::from(shape.extends(&unit_shape())),
        not_degenerate(shape),
    ])
    .is_true()
}

/// A scalar: extends `boolean | string | number | bigint | symbol` and is
/// none of the degenerate kinds.
pub fn is_scalar(shape: &Shape) -> bool {
    all([
        Truth::from(shape.extends(&primitive_shape())),
        not_degenerate(shape),
    ])
    .is_true()
}

fn not_degenerate(shape: &Shape) -> Truth {
    none([
        is_any(shape),
        is_bottom(shape),
        is_unknown(shape),
        is_empty(shape),
    ])
}

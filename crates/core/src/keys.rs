//! Field-name classification for record-like shapes.
//!
//! A field is optional when the empty record `{}` is acceptable as a
//! projection of the shape onto that single field, and required otherwise.
//! Every declared field lands in exactly one of the two sets.

use std::collections::BTreeSet;

use crate::predicates::is_bottom;
use crate::relation::Extends;
use crate::shape::{Field, Shape};

/// Declared fields that cannot be omitted.
pub fn required_keys(shape: &Shape) -> BTreeSet<String> {
    shape
        .properties()
        .into_iter()
        .filter(|(name, field)| !can_omit(name, field))
        .map(|(name, _)| name)
        .collect()
}

/// Declared fields that may be omitted.
pub fn optional_keys(shape: &Shape) -> BTreeSet<String> {
    shape
        .properties()
        .into_iter()
        .filter(|(name, field)| can_omit(name, field))
        .map(|(name, _)| name)
        .collect()
}

/// Declared fields that can actually hold a value, i.e. whose value shape
/// is not the bottom kind.
pub fn always_keys(shape: &Shape) -> BTreeSet<String> {
    shape
        .properties()
        .into_iter()
        .filter(|(_, field)| !is_bottom(&field.effective()))
        .map(|(name, _)| name)
        .collect()
}

/// Whether `{}` is acceptable where `{ name: field }` is expected.
pub(crate) fn can_omit(name: &str, field: &Field) -> bool {
    let projection = Shape::record([(name, field.clone())]);
    Shape::empty_record().extends(&projection)
}

//! Structural subsumption between shapes and between brands.
//!
//! `a.extends(b)` reads "a value described by `a` is acceptable wherever `b`
//! is expected". Everything else is derived from it:
//!
//! - `subsumes(wider, narrower)` is `narrower.extends(wider)`
//! - `equivalent(a, b)` is subsumption in both directions
//!
//! How to use:
//! - Compare raw shapes to keep exact structural nuance (literal vs.
//!   primitive, readonly vs. mutable sequences, function variance).
//! - Compare brands (see [`crate::brand`]) to ask whether two shapes have
//!   the same kind and the same classified parts. Brand comparison is
//!   stricter: `any` inside a brand is just another kind, not a wildcard.
//!
//! Shape rules are tried in order; the first one that decides wins:
//! 1. Equal shapes extend each other.
//! 2. `any` extends everything except `never`; everything extends `any`
//!    and `unknown`. `never` extends everything; `unknown` extends nothing
//!    else.
//! 3. A union extends a target if every member does; a source extends an
//!    intersection if it extends every member.
//! 4. A source extends a union if it extends some member. An intersection
//!    extends a target if some member does, or, for record targets, if its
//!    merged fields satisfy the record.
//! 5. Structural rules per target form (atoms, records, sequences,
//!    callables, constructors).

use std::collections::BTreeMap;

use crate::brand::Brand;
use crate::shape::{Element, ElementKind, Field, Literal, Record, Shape};

/// One-way structural subsumption.
pub trait Extends {
    /// Whether `self` is acceptable wherever `target` is expected.
    fn extends(&self, target: &Self) -> bool;
}

/// Whether every value described by `narrower` is also described by `wider`.
pub fn subsumes<T: Extends + ?Sized>(wider: &T, narrower: &T) -> bool {
    narrower.extends(wider)
}

/// Subsumption in both directions.
pub fn equivalent<T: Extends + ?Sized>(a: &T, b: &T) -> bool {
    subsumes(a, b) && subsumes(b, a)
}

impl Extends for Shape {
    fn extends(&self, target: &Shape) -> bool {
        shape_extends(self, target)
    }
}

impl Extends for Brand {
    fn extends(&self, target: &Brand) -> bool {
        brand_extends(self, target)
    }
}

fn shape_extends(source: &Shape, target: &Shape) -> bool {
    if source == target {
        return true;
    }

    match (source, target) {
        (Shape::Any, Shape::Never) => return false,
        (Shape::Any, _) | (_, Shape::Any) | (_, Shape::Unknown) => return true,
        (Shape::Never, _) => return true,
        (_, Shape::Never) | (Shape::Unknown, _) => return false,
        _ => {}
    }

    if let Shape::Union(members) = source {
        return members.iter().all(|member| shape_extends(member, target));
    }
    if let Shape::Intersection(members) = target {
        return members.iter().all(|member| shape_extends(source, member));
    }
    if let Shape::Union(members) = target {
        // `boolean` is `true | false`; each half may land in a different member.
        if *source == Shape::Boolean {
            return [true, false]
                .into_iter()
                .all(|value| shape_extends(&Shape::literal(value), target));
        }
        return members.iter().any(|member| shape_extends(source, member));
    }
    if let Shape::Intersection(members) = source {
        if members.iter().any(|member| shape_extends(member, target)) {
            return true;
        }
        return match target {
            Shape::Record(record) => record_accepts(&source.properties(), record),
            _ => false,
        };
    }

    match (source, target) {
        (Shape::Record(source), Shape::Record(target)) => record_accepts(&source.fields, target),
        // Non-record values have no modeled fields, so only `{}` accepts them.
        (source, Shape::Record(target)) => !source.is_nullish() && target.fields.is_empty(),

        (Shape::Literal(literal), _) => literal.primitive() == *target,
        (Shape::Undefined, Shape::Void) => true,

        (Shape::Sequence(source), Shape::Sequence(target)) => {
            (!source.readonly || target.readonly)
                && elements_extend(&source.elements, &target.elements, shape_extends)
        }
        (Shape::Callable(source), Shape::Callable(target)) => {
            params_accept(&target.params, &source.params)
                && (*target.returns == Shape::Void
                    || shape_extends(&source.returns, &target.returns))
        }
        (Shape::Constructor(source), Shape::Constructor(target)) => {
            params_accept(&target.params, &source.params)
                && shape_extends(&source.instance, &target.instance)
        }

        _ => false,
    }
}

/// Whether a value with `fields` satisfies `target`.
fn record_accepts(fields: &BTreeMap<String, Field>, target: &Record) -> bool {
    for (name, expected) in &target.fields {
        match fields.get(name) {
            None if expected.optional => {}
            None => return false,
            Some(found) => {
                if found.optional && !expected.optional {
                    return false;
                }
                if !shape_extends(&found.effective(), &expected.effective()) {
                    return false;
                }
            }
        }
    }

    // A target made only of optional fields still rejects a source that
    // shares none of them.
    let weak = !target.fields.is_empty() && target.fields.values().all(|f| f.optional);
    if weak && !fields.is_empty() && !fields.keys().any(|k| target.fields.contains_key(k)) {
        return false;
    }
    true
}

fn split_rest<T>(elements: &[Element<T>]) -> (&[Element<T>], Option<&T>) {
    match elements.iter().position(|e| e.kind == ElementKind::Rest) {
        Some(index) => (&elements[..index], Some(&elements[index].item)),
        None => (elements, None),
    }
}

fn min_len<T>(elements: &[Element<T>]) -> usize {
    elements
        .iter()
        .filter(|e| e.kind == ElementKind::Required)
        .count()
}

/// Tuple subsumption, shared by shape and brand sequences.
pub(crate) fn elements_extend<T>(
    source: &[Element<T>],
    target: &[Element<T>],
    extends: impl Fn(&T, &T) -> bool,
) -> bool {
    let (source_fixed, source_rest) = split_rest(source);
    let (target_fixed, target_rest) = split_rest(target);

    if min_len(source_fixed) < min_len(target_fixed) {
        return false;
    }
    if target_rest.is_none() && (source_rest.is_some() || source_fixed.len() > target_fixed.len())
    {
        return false;
    }

    for (index, element) in source_fixed.iter().enumerate() {
        let expected = match (target_fixed.get(index), target_rest) {
            (Some(expected), _) => &expected.item,
            (None, Some(rest)) => rest,
            (None, None) => return false,
        };
        if !extends(&element.item, expected) {
            return false;
        }
    }

    if let Some(rest) = source_rest {
        for expected in target_fixed.iter().skip(source_fixed.len()) {
            if !extends(rest, &expected.item) {
                return false;
            }
        }
        if let Some(target_rest) = target_rest {
            if !extends(rest, target_rest) {
                return false;
            }
        }
    }
    true
}

/// Whether a callee declaring `accepted` can be called with the arguments
/// a caller of `supplied` passes. Parameters are contravariant: each
/// supplied argument must extend the parameter it lands in. The callee may
/// ignore trailing arguments but may not require more than are supplied.
fn params_accept(supplied: &[Element<Shape>], accepted: &[Element<Shape>]) -> bool {
    let (supplied_fixed, supplied_rest) = split_rest(supplied);
    let (accepted_fixed, accepted_rest) = split_rest(accepted);

    if supplied_rest.is_none() && min_len(accepted_fixed) > supplied_fixed.len() {
        return false;
    }

    for (index, argument) in supplied_fixed.iter().enumerate() {
        let param = match (accepted_fixed.get(index), accepted_rest) {
            (Some(param), _) => &param.item,
            (None, Some(rest)) => rest,
            (None, None) => break,
        };
        if !shape_extends(&argument.item, param) {
            return false;
        }
    }

    if let Some(rest) = supplied_rest {
        for param in accepted_fixed.iter().skip(supplied_fixed.len()) {
            if !shape_extends(rest, &param.item) {
                return false;
            }
        }
        if let Some(accepted_rest) = accepted_rest {
            if !shape_extends(rest, accepted_rest) {
                return false;
            }
        }
    }
    true
}

fn brand_extends(source: &Brand, target: &Brand) -> bool {
    if source == target {
        return true;
    }

    match (source, target) {
        (Brand::Unit(source), Brand::Unit(target))
        | (Brand::Scalar(source), Brand::Scalar(target)) => shape_extends(source, target),

        (Brand::Sequence(source), Brand::Sequence(target))
        | (Brand::ImmutableSequence(source), Brand::ImmutableSequence(target)) => {
            elements_extend(source, target, brand_extends)
        }

        (
            Brand::Constructor {
                params: source_params,
                instance: source_instance,
            },
            Brand::Constructor {
                params: target_params,
                instance: target_instance,
            },
        ) => {
            brand_extends(source_params, target_params)
                && shape_extends(source_instance, target_instance)
        }

        (
            Brand::Callable {
                params: source_params,
                returns: source_returns,
            },
            Brand::Callable {
                params: target_params,
                returns: target_returns,
            },
        ) => {
            brand_extends(source_params, target_params)
                && brand_extends(source_returns, target_returns)
        }

        (
            Brand::Record {
                required: source_required,
                optional: source_optional,
            },
            Brand::Record {
                required: target_required,
                optional: target_optional,
            },
        ) => {
            entries_extend(source_required, target_required)
                && entries_extend(source_optional, target_optional)
        }

        // Payload-free kinds are only equal to themselves, handled above.
        _ => false,
    }
}

fn entries_extend(source: &BTreeMap<String, Brand>, target: &BTreeMap<String, Brand>) -> bool {
    target.iter().all(|(name, expected)| {
        source
            .get(name)
            .is_some_and(|found| brand_extends(found, expected))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_a() -> Shape {
        Shape::record([("a", Field::required(Shape::Number))])
    }

    fn class_b() -> Shape {
        Shape::record([
            ("a", Field::required(Shape::Number)),
            ("b", Field::required(Shape::Number)),
        ])
    }

    #[test]
    fn test_extends() {
        assert!(Shape::Number.extends(&Shape::Number));

        assert!(Shape::Any.extends(&Shape::Any));
        assert!(Shape::Any.extends(&Shape::Number));
        assert!(Shape::Number.extends(&Shape::Any));

        assert!(Shape::Never.extends(&Shape::Never));
        assert!(Shape::Never.extends(&Shape::Number));
        assert!(!Shape::Number.extends(&Shape::Never));

        assert!(!Shape::Number.extends(&Shape::String));
        assert!(!Shape::String.extends(&Shape::Number));

        assert!(!class_a().extends(&class_b()));
        assert!(class_b().extends(&class_a()));
    }

    #[test]
    fn test_equivalent() {
        assert!(equivalent(&Shape::Number, &Shape::Number));

        assert!(equivalent(&Shape::Any, &Shape::Any));
        assert!(equivalent(&Shape::Any, &Shape::Number));
        assert!(equivalent(&Shape::Number, &Shape::Any));

        assert!(equivalent(&Shape::Never, &Shape::Never));
        assert!(!equivalent(&Shape::Never, &Shape::Number));
        assert!(!equivalent(&Shape::Number, &Shape::Never));

        assert!(!equivalent(&Shape::Number, &Shape::String));

        assert!(!equivalent(&class_a(), &class_b()));
        assert!(!equivalent(&class_b(), &class_a()));
    }

    #[test]
    fn test_any_does_not_extend_never() {
        assert!(!Shape::Any.extends(&Shape::Never));
        assert!(!Shape::Unknown.extends(&Shape::Number));
        assert!(Shape::Number.extends(&Shape::Unknown));
    }

    #[test]
    fn test_literals() {
        assert!(Shape::literal(1).extends(&Shape::Number));
        assert!(!Shape::Number.extends(&Shape::literal(1)));
        assert!(!Shape::literal(1).extends(&Shape::literal(2)));
        assert!(Shape::literal("a").extends(&Shape::String));
        assert!(Shape::bigint(3).extends(&Shape::BigInt));
        assert!(Shape::unique_symbol("k").extends(&Shape::Symbol));
    }

    #[test]
    fn test_boolean_splits_across_union() {
        let target = Shape::Union(vec![
            Shape::literal(true),
            Shape::literal(false),
            Shape::Null,
        ]);
        assert!(Shape::Boolean.extends(&target));
        assert!(Shape::literal(true).extends(&Shape::Boolean));
    }

    #[test]
    fn test_unions() {
        let number_or_string = Shape::union([Shape::Number, Shape::String]);
        assert!(Shape::Number.extends(&number_or_string));
        assert!(!number_or_string.extends(&Shape::Number));
        assert!(Shape::union([Shape::literal(1), Shape::literal("a")]).extends(&number_or_string));
    }

    #[test]
    fn test_undefined_extends_void() {
        assert!(Shape::Undefined.extends(&Shape::Void));
        assert!(!Shape::Void.extends(&Shape::Undefined));
        assert!(!Shape::Null.extends(&Shape::Undefined));
    }

    #[test]
    fn test_record_optional_fields() {
        let required = Shape::record([("a", Field::required(Shape::Boolean))]);
        let with_optional = Shape::record([
            ("a", Field::required(Shape::Boolean)),
            ("b", Field::optional(Shape::String)),
        ]);
        assert!(required.extends(&with_optional));
        assert!(with_optional.extends(&required));

        let optional_a = Shape::record([("a", Field::optional(Shape::Boolean))]);
        assert!(!optional_a.extends(&required));
        assert!(required.extends(&optional_a));
    }

    #[test]
    fn test_weak_record_needs_common_field() {
        let weak = Shape::record([("b", Field::optional(Shape::Number))]);
        let unrelated = Shape::record([("a", Field::required(Shape::Number))]);
        assert!(!unrelated.extends(&weak));
        assert!(Shape::empty_record().extends(&weak));
    }

    #[test]
    fn test_non_records_only_extend_empty_record() {
        assert!(Shape::Number.extends(&Shape::empty_record()));
        assert!(Shape::tuple([]).extends(&Shape::empty_record()));
        assert!(!Shape::Null.extends(&Shape::empty_record()));
        assert!(!Shape::Number.extends(&class_a()));
        assert!(!Shape::empty_record().extends(&Shape::tuple([])));
    }

    #[test]
    fn test_branded_intersection_extends_parts() {
        let tag = Shape::record([("tag", Field::required(Shape::literal("usd")))]);
        let branded = Shape::intersection([Shape::Number, tag.clone()]);
        assert!(branded.extends(&Shape::Number));
        assert!(branded.extends(&tag));
        assert!(!Shape::Number.extends(&branded));
    }

    #[test]
    fn test_tuples() {
        let pair = Shape::tuple([Shape::Number, Shape::String]);
        let single = Shape::tuple([Shape::Number]);
        assert!(!pair.extends(&single));
        assert!(!single.extends(&pair));

        let numbers = Shape::array(Shape::Number);
        assert!(single.extends(&numbers));
        assert!(Shape::tuple([]).extends(&numbers));
        assert!(!numbers.extends(&single));
        assert!(!pair.extends(&numbers));

        let maybe_pair = Shape::sequence(vec![
            Element::required(Shape::Number),
            Element::optional(Shape::String),
        ])
        .unwrap();
        assert!(single.extends(&maybe_pair));
        assert!(pair.extends(&maybe_pair));
        assert!(!maybe_pair.extends(&pair));
    }

    #[test]
    fn test_readonly_sequences() {
        let mutable = Shape::array(Shape::Number);
        let readonly = Shape::array(Shape::Number).into_readonly();
        assert!(mutable.extends(&readonly));
        assert!(!readonly.extends(&mutable));
    }

    #[test]
    fn test_function_variance() {
        let wide = Shape::function([Shape::Number], Shape::literal(1));
        let narrow_param = Shape::function([Shape::literal(1)], Shape::literal(1));
        // Parameters are contravariant.
        assert!(wide.extends(&narrow_param));
        assert!(!narrow_param.extends(&wide));

        // Returns are covariant, and `void` accepts any return.
        let returns_number = Shape::function([], Shape::Number);
        assert!(Shape::function([], Shape::literal(1)).extends(&returns_number));
        assert!(returns_number.extends(&Shape::function([], Shape::Void)));
    }

    #[test]
    fn test_function_arity() {
        let unary = Shape::function([Shape::Number], Shape::Void);
        let binary = Shape::function([Shape::Number, Shape::Number], Shape::Void);
        assert!(unary.extends(&binary));
        assert!(!binary.extends(&unary));
    }

    #[test]
    fn test_constructor_instance_covariance() {
        let make_a = Shape::constructor([], class_a());
        let make_b = Shape::constructor([], class_b());
        assert!(make_b.extends(&make_a));
        assert!(!make_a.extends(&make_b));
        assert!(!make_a.extends(&Shape::function([], class_a())));
    }

    #[test]
    fn test_brand_kinds_must_match() {
        assert!(Brand::Any.extends(&Brand::Any));
        assert!(!Brand::Any.extends(&Brand::Unknown));
        assert!(!Brand::Bottom.extends(&Brand::Empty));
        assert!(!Brand::Scalar(Shape::Null).extends(&Brand::Unit(Shape::Null)));
    }

    #[test]
    fn test_brand_record_entries() {
        let ab = Brand::Record {
            required: BTreeMap::from([
                ("a".to_string(), Brand::Scalar(Shape::Boolean)),
                ("b".to_string(), Brand::Scalar(Shape::String)),
            ]),
            optional: BTreeMap::new(),
        };
        let a = Brand::Record {
            required: BTreeMap::from([("a".to_string(), Brand::Scalar(Shape::Boolean))]),
            optional: BTreeMap::new(),
        };
        assert!(ab.extends(&a));
        assert!(!a.extends(&ab));
    }

    #[test]
    fn test_literal_helper_matches() {
        assert_eq!(Literal::from(2).primitive(), Shape::Number);
    }
}

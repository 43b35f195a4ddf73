//! # Brand Tests
//!
//! Tests for the brand engine:
//! - Kind names for each classification branch
//! - Payloads of composite brands
//! - Brand equivalence, including normalized scalars
//! - End-to-end classification and comparison scenarios

use std::collections::BTreeMap;

use typebrand_core::predicates::{primitive_shape, unit_shape};
use typebrand_core::{
    equivalent, subsumes, Brand, BrandKind, Element, Extends, Field, Shape,
};

fn required(name: &str, shape: Shape) -> (String, Field) {
    (name.to_string(), Field::required(shape))
}

/// A stand-in for a class instance with a single method.
fn date() -> Shape {
    Shape::record([required("getTime", Shape::function([], Shape::Number))])
}

fn date_class() -> Shape {
    let arg = Shape::union([Shape::Number, Shape::String, date()]);
    Shape::constructor([arg], date())
}

fn class_a() -> Shape {
    Shape::record([required("a", Shape::Number)])
}

fn class_d() -> Shape {
    Shape::record([required("a", Shape::Number), required("b", Shape::Number)])
}

fn entries(pairs: &[(&str, Brand)]) -> BTreeMap<String, Brand> {
    pairs
        .iter()
        .map(|(name, brand)| (name.to_string(), brand.clone()))
        .collect()
}

fn bi_extends(a: &Shape, b: &Shape) -> bool {
    equivalent(&Brand::of(a), &Brand::of(b))
}

// ============================================================================
// Kind Names
// ============================================================================

#[test]
fn test_names() {
    let cases = [
        (Shape::Never, "never"),
        (Shape::Any, "any"),
        (Shape::Unknown, "unknown"),
        (Shape::empty_record(), "empty"),
        (unit_shape(), "unit"),
        (primitive_shape(), "primitive"),
        (Shape::Boolean, "primitive"),
        (Shape::literal(true), "primitive"),
        (Shape::tuple([]), "array"),
        (Shape::tuple([]).into_readonly(), "readonly array"),
        (date_class(), "class"),
        (Shape::function([], Shape::Void), "function"),
        (
            Shape::record([
                required("a", Shape::Boolean),
                ("b".to_string(), Field::optional(Shape::Number)),
            ]),
            "object",
        ),
    ];

    for (shape, name) in cases {
        assert_eq!(Brand::of(&shape).name(), name, "brand name of {shape}");
    }
}

#[test]
fn test_every_kind_is_reachable() {
    let shapes = [
        Shape::Never,
        Shape::Any,
        Shape::Unknown,
        Shape::empty_record(),
        Shape::Null,
        Shape::Number,
        Shape::array(Shape::Number),
        Shape::array(Shape::Number).into_readonly(),
        date_class(),
        Shape::function([], Shape::Void),
        class_a(),
    ];

    let kinds: Vec<BrandKind> = shapes.iter().map(|shape| Brand::of(shape).kind()).collect();
    assert_eq!(kinds, BrandKind::ALL);
}

// ============================================================================
// Payloads
// ============================================================================

#[test]
fn test_degenerate_payloads() {
    assert_eq!(Brand::of(&Shape::Never), Brand::Bottom);
    assert_eq!(Brand::of(&Shape::Any), Brand::Any);
    assert_eq!(Brand::of(&Shape::Unknown), Brand::Unknown);
    assert_eq!(Brand::of(&Shape::empty_record()), Brand::Empty);
}

#[test]
fn test_scalar_payload_is_the_shape() {
    let Brand::Scalar(payload) = Brand::of(&primitive_shape()) else {
        panic!("expected a scalar brand");
    };
    assert!(equivalent(&payload, &primitive_shape()));

    let Brand::Scalar(payload) = Brand::of(&Shape::Number) else {
        panic!("expected a scalar brand");
    };
    assert!(!equivalent(&payload, &primitive_shape()));
}

#[test]
fn test_sequence_payloads() {
    assert_eq!(Brand::of(&Shape::tuple([])), Brand::Sequence(Vec::new()));

    let one_two_three = Shape::tuple([Shape::literal(1), Shape::literal(2), Shape::literal(3)]);
    let expected: Vec<Element<Brand>> = [1, 2, 3]
        .into_iter()
        .map(|n| Element::required(Brand::of(&Shape::literal(n))))
        .collect();
    assert_eq!(Brand::of(&one_two_three), Brand::Sequence(expected.clone()));

    assert_eq!(
        Brand::of(&Shape::tuple([]).into_readonly()),
        Brand::ImmutableSequence(Vec::new())
    );
    assert_eq!(
        Brand::of(&one_two_three.into_readonly()),
        Brand::ImmutableSequence(expected)
    );
}

#[test]
fn test_class_payload() {
    let arg = Shape::union([Shape::Number, Shape::String, date()]);
    assert_eq!(
        Brand::of(&date_class()),
        Brand::Constructor {
            params: Box::new(Brand::of(&Shape::tuple([arg]))),
            instance: Box::new(date()),
        }
    );
}

#[test]
fn test_function_payloads() {
    assert_eq!(
        Brand::of(&Shape::function([], Shape::Void)),
        Brand::Callable {
            params: Box::new(Brand::of(&Shape::tuple([]))),
            returns: Box::new(Brand::of(&Shape::Void)),
        }
    );

    let params = vec![
        Element::required(primitive_shape()),
        Element::rest(Shape::Any),
    ];
    let variadic = Shape::callable(params.clone(), Shape::Void).unwrap();
    assert_eq!(
        Brand::of(&variadic),
        Brand::Callable {
            params: Box::new(Brand::of(&Shape::sequence(params).unwrap())),
            returns: Box::new(Brand::of(&Shape::Void)),
        }
    );
}

#[test]
fn test_record_payload() {
    let shape = Shape::record([
        required("a", Shape::Boolean),
        ("b".to_string(), Field::optional(Shape::Number)),
    ]);
    assert_eq!(
        Brand::of(&shape),
        Brand::Record {
            required: entries(&[("a", Brand::of(&Shape::Boolean))]),
            optional: entries(&[("b", Brand::of(&Shape::Number))]),
        }
    );
}

// ============================================================================
// Brand Equivalence
// ============================================================================

#[test]
fn test_any_matches_only_any() {
    let others = [
        Shape::Never,
        Shape::Unknown,
        Shape::empty_record(),
        primitive_shape(),
        Shape::function([], Shape::empty_record()),
        date(),
    ];

    assert!(bi_extends(&Shape::Any, &Shape::Any));
    for other in &others {
        assert!(!bi_extends(&Shape::Any, other), "any vs {other}");
        assert!(!bi_extends(other, &Shape::Any), "{other} vs any");
    }
}

#[test]
fn test_classes() {
    let class_s = class_a();

    assert!(bi_extends(&class_a(), &class_s));
    assert!(bi_extends(&class_s, &class_a()));
    assert!(!bi_extends(&class_a(), &Shape::Any));
    assert!(!bi_extends(&class_a(), &class_d()));
    assert!(!bi_extends(&class_d(), &class_a()));
}

#[test]
fn test_any_inside_payloads_is_not_a_wildcard() {
    let left = Shape::tuple([Shape::Any, Shape::Number]);
    let right = Shape::tuple([Shape::Number, Shape::Any]);
    assert!(!bi_extends(&left, &right));

    let any_x = Shape::record([required("x", Shape::Any)]);
    let one_x = Shape::record([required("x", Shape::literal(1))]);
    assert!(!bi_extends(&any_x, &one_x));

    let foo_number = Shape::record([required("foo", Shape::Number)]);
    let foo_any = Shape::record([required("foo", Shape::Any)]);
    assert!(!bi_extends(&foo_number, &foo_any));
}

#[test]
fn test_normalized_branded_scalars() {
    let dollar = Shape::intersection([
        Shape::Number,
        Shape::record([required("_tag", Shape::literal("dollar"))]),
    ]);
    let tagged = Shape::intersection([
        Shape::Number,
        Shape::record([required("_tag", Shape::Any)]),
    ]);

    assert!(!equivalent(&Brand::normalized(&dollar), &Brand::normalized(&tagged)));
    assert!(equivalent(&Brand::of(&dollar), &Brand::of(&tagged)));
}

#[test]
fn test_normalized_scalars_keep_their_fields() {
    let branded = Shape::intersection([
        Shape::String,
        Shape::record([required("tag", Shape::literal("usd"))]),
    ]);
    assert_eq!(
        Brand::normalized(&branded),
        Brand::Record {
            required: entries(&[("tag", Brand::Record {
                required: BTreeMap::new(),
                optional: BTreeMap::new(),
            })]),
            optional: BTreeMap::new(),
        }
    );
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_record_partition() {
    let shape = Shape::record([
        required("a", Shape::Boolean),
        ("b".to_string(), Field::optional(Shape::Number)),
    ]);
    let Brand::Record { required, optional } = Brand::of(&shape) else {
        panic!("expected a record brand");
    };
    assert_eq!(required, entries(&[("a", Brand::Scalar(Shape::Boolean))]));
    assert_eq!(optional, entries(&[("b", Brand::Scalar(Shape::Number))]));
}

#[test]
fn test_empty_and_literal_sequences() {
    assert_eq!(Brand::of(&Shape::tuple([])), Brand::Sequence(Vec::new()));

    let Brand::Sequence(elements) = Brand::of(&Shape::tuple([
        Shape::literal(1),
        Shape::literal(2),
        Shape::literal(3),
    ])) else {
        panic!("expected a sequence brand");
    };
    assert_eq!(elements.len(), 3);
    for (element, n) in elements.iter().zip([1, 2, 3]) {
        assert_eq!(element.item, Brand::Scalar(Shape::literal(n)));
    }
}

#[test]
fn test_intersection_is_narrower_than_its_parts() {
    let a = Shape::record([required("a", Shape::Boolean)]);
    let b = Shape::record([required("b", Shape::String)]);
    let ab = Shape::intersection([a.clone(), b]);

    let (a, ab) = (Brand::of(&a), Brand::of(&ab));
    assert!(ab.extends(&a));
    assert!(subsumes(&a, &ab));
    assert!(!subsumes(&ab, &a));
}

#[test]
fn test_derived_class_is_narrower_than_base() {
    let (a, d) = (Brand::of(&class_a()), Brand::of(&class_d()));
    assert!(subsumes(&a, &d));
    assert!(!subsumes(&d, &a));
}

#[test]
fn test_classification_is_deterministic() {
    for shape in [date_class(), class_d(), unit_shape(), Shape::array(Shape::Any)] {
        assert_eq!(Brand::of(&shape), Brand::of(&shape));
        assert_eq!(Brand::normalized(&shape), Brand::normalized(&shape));
    }
}

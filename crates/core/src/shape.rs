//! # Shapes - Structural Type Descriptions
//!
//! A [`Shape`] describes the possible forms of a value: a primitive, a
//! literal, a record with named fields, a sequence, a callable, a
//! constructor, or a union/intersection of those. Shapes are plain values:
//! equality and hashing are structural, and two shapes built the same way
//! are interchangeable.
//!
//! ## Canonical Construction
//!
//! [`Shape::union`] and [`Shape::intersection`] normalize as they build, so
//! that shapes which obviously mean the same thing also look the same:
//!
//! - `A | never` is `A`, `A | any` is `any`, `A | unknown` is `unknown`
//! - `true | false` is `boolean`, and `1 | number` is `number`
//! - `{ a: A } & { b: B }` is the single record `{ a: A; b: B }`
//! - `string & number` and `null & { a: A }` are `never`
//!
//! Building the enum variants directly skips this and is allowed, but the
//! comparison rules assume canonical input.
//!
//! ## Sequences
//!
//! Tuples and arrays share one representation. `T[]` is the sequence
//! `[...T]`, a tuple `[A, B?]` is a required element followed by an optional
//! one. Parameter lists of callables and constructors use the same element
//! list.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::relation::Extends;

/// A single scalar value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Literal {
    Bool(bool),
    String(String),
    /// Compared by bit pattern.
    Number(f64),
    BigInt(i64),
    /// A symbol that only equals itself.
    UniqueSymbol(String),
}

impl Literal {
    /// The primitive shape this literal belongs to.
    pub fn primitive(&self) -> Shape {
        match self {
            Literal::Bool(_) => Shape::Boolean,
            Literal::String(_) => Shape::String,
            Literal::Number(_) => Shape::Number,
            Literal::BigInt(_) => Shape::BigInt,
            Literal::UniqueSymbol(_) => Shape::Symbol,
        }
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Literal::Bool(l), Literal::Bool(r)) => l == r,
            (Literal::String(l), Literal::String(r)) => l == r,
            (Literal::Number(l), Literal::Number(r)) => l.to_bits() == r.to_bits(),
            (Literal::BigInt(l), Literal::BigInt(r)) => l == r,
            (Literal::UniqueSymbol(l), Literal::UniqueSymbol(r)) => l == r,
            _ => false,
        }
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Literal::Bool(value) => {
                0u8.hash(state);
                value.hash(state);
            }
            Literal::String(value) => {
                1u8.hash(state);
                value.hash(state);
            }
            Literal::Number(value) => {
                2u8.hash(state);
                value.to_bits().hash(state);
            }
            Literal::BigInt(value) => {
                3u8.hash(state);
                value.hash(state);
            }
            Literal::UniqueSymbol(name) => {
                4u8.hash(state);
                name.hash(state);
            }
        }
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Number(f64::from(value))
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Number(value)
    }
}

/// A named field of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    /// The declared value shape, without the implicit `undefined` of an
    /// optional field.
    pub shape: Shape,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub readonly: bool,
}

impl Field {
    /// A field that must be present.
    pub fn required(shape: Shape) -> Self {
        Self {
            shape,
            optional: false,
            readonly: false,
        }
    }

    /// A field that may be omitted.
    pub fn optional(shape: Shape) -> Self {
        Self {
            shape,
            optional: true,
            readonly: false,
        }
    }

    /// Mark the field readonly.
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// The shape a reader of this field observes: optional fields may also
    /// read as `undefined`.
    pub fn effective(&self) -> Shape {
        if self.optional {
            Shape::union([self.shape.clone(), Shape::Undefined])
        } else {
            self.shape.clone()
        }
    }

    fn meet(self, other: Field) -> Field {
        Field {
            shape: Shape::intersection([self.shape, other.shape]),
            optional: self.optional && other.optional,
            readonly: self.readonly || other.readonly,
        }
    }

    fn join(self, other: Field) -> Field {
        Field {
            shape: Shape::union([self.shape, other.shape]),
            optional: self.optional || other.optional,
            readonly: self.readonly || other.readonly,
        }
    }
}

/// A mapping from field name to field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub fields: BTreeMap<String, Field>,
}

impl Record {
    /// Combine two records as if a value had to satisfy both.
    fn merge(mut self, other: Record) -> Record {
        for (name, field) in other.fields {
            let merged = match self.fields.remove(&name) {
                Some(existing) => existing.meet(field),
                None => field,
            };
            self.fields.insert(name, merged);
        }
        self
    }
}

/// How an element of a sequence or parameter list occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Exactly once.
    Required,
    /// Zero or one time.
    Optional,
    /// Zero or more times; only valid as the last element.
    Rest,
}

/// One position of a sequence. `T` is [`Shape`] for shapes and
/// [`crate::Brand`] for classified sequences.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Element<T> {
    pub item: T,
    pub kind: ElementKind,
}

impl<T> Element<T> {
    pub fn required(item: T) -> Self {
        Self {
            item,
            kind: ElementKind::Required,
        }
    }

    pub fn optional(item: T) -> Self {
        Self {
            item,
            kind: ElementKind::Optional,
        }
    }

    pub fn rest(item: T) -> Self {
        Self {
            item,
            kind: ElementKind::Rest,
        }
    }

    /// Apply `f` to the item, keeping the element kind.
    pub fn map<U>(&self, f: impl FnOnce(&T) -> U) -> Element<U> {
        Element {
            item: f(&self.item),
            kind: self.kind,
        }
    }
}

/// An ordered list of elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sequence {
    pub elements: Vec<Element<Shape>>,
    #[serde(default)]
    pub readonly: bool,
}

/// A callable signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    pub params: Vec<Element<Shape>>,
    pub returns: Box<Shape>,
}

/// A construct signature: called with `new`, produces `instance`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Construct {
    pub params: Vec<Element<Shape>>,
    pub instance: Box<Shape>,
}

/// A structural description of the values something may hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum Shape {
    /// No value at all.
    Never,
    /// Every value, and assignable to everything but `Never`.
    Any,
    /// Every value, but assignable only to `Any` and `Unknown`.
    Unknown,

    // Absent values
    Null,
    Undefined,
    Void,

    // Primitives
    Boolean,
    String,
    Number,
    BigInt,
    Symbol,
    Literal(Literal),

    Union(Vec<Shape>),
    Intersection(Vec<Shape>),

    Record(Record),
    Sequence(Sequence),
    Callable(Signature),
    Constructor(Construct),
}

impl Shape {
    /// A literal shape: `Shape::literal(1)`, `Shape::literal("a")`,
    /// `Shape::literal(true)`.
    pub fn literal(value: impl Into<Literal>) -> Shape {
        Shape::Literal(value.into())
    }

    /// A bigint literal such as `10n`.
    pub fn bigint(value: i64) -> Shape {
        Shape::Literal(Literal::BigInt(value))
    }

    /// A symbol equal only to itself.
    pub fn unique_symbol(name: impl Into<String>) -> Shape {
        Shape::Literal(Literal::UniqueSymbol(name.into()))
    }

    /// The record with no fields, `{}`.
    pub fn empty_record() -> Shape {
        Shape::Record(Record::default())
    }

    /// A record from `(name, field)` pairs.
    pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, Field)>) -> Shape {
        Shape::Record(Record {
            fields: fields
                .into_iter()
                .map(|(name, field)| (name.into(), field))
                .collect(),
        })
    }

    /// A fixed-length tuple of required elements.
    pub fn tuple(items: impl IntoIterator<Item = Shape>) -> Shape {
        Shape::Sequence(Sequence {
            elements: items.into_iter().map(Element::required).collect(),
            readonly: false,
        })
    }

    /// A variable-length array `T[]`.
    pub fn array(item: Shape) -> Shape {
        Shape::Sequence(Sequence {
            elements: vec![Element::rest(item)],
            readonly: false,
        })
    }

    /// A sequence with explicit element kinds.
    pub fn sequence(elements: Vec<Element<Shape>>) -> Result<Shape, ShapeError> {
        validate_elements(&elements)?;
        Ok(Shape::Sequence(Sequence {
            elements,
            readonly: false,
        }))
    }

    /// The readonly form of a sequence. Other shapes are returned unchanged.
    pub fn into_readonly(self) -> Shape {
        match self {
            Shape::Sequence(sequence) => Shape::Sequence(Sequence {
                readonly: true,
                ..sequence
            }),
            other => other,
        }
    }

    /// A function taking required positional parameters.
    pub fn function(params: impl IntoIterator<Item = Shape>, returns: Shape) -> Shape {
        Shape::Callable(Signature {
            params: params.into_iter().map(Element::required).collect(),
            returns: Box::new(returns),
        })
    }

    /// A function with explicit parameter kinds.
    pub fn callable(params: Vec<Element<Shape>>, returns: Shape) -> Result<Shape, ShapeError> {
        validate_elements(&params)?;
        Ok(Shape::Callable(Signature {
            params,
            returns: Box::new(returns),
        }))
    }

    /// A constructor taking required positional parameters.
    pub fn constructor(params: impl IntoIterator<Item = Shape>, instance: Shape) -> Shape {
        Shape::Constructor(Construct {
            params: params.into_iter().map(Element::required).collect(),
            instance: Box::new(instance),
        })
    }

    /// A constructor with explicit parameter kinds.
    pub fn construct(params: Vec<Element<Shape>>, instance: Shape) -> Result<Shape, ShapeError> {
        validate_elements(&params)?;
        Ok(Shape::Constructor(Construct {
            params,
            instance: Box::new(instance),
        }))
    }

    /// The canonical union of `members`.
    pub fn union(members: impl IntoIterator<Item = Shape>) -> Shape {
        let mut flat = Vec::new();
        for member in members {
            flatten_into(member, &mut flat, |shape| match shape {
                Shape::Union(inner) => Ok(inner),
                other => Err(other),
            });
        }

        if flat.contains(&Shape::Any) {
            return Shape::Any;
        }
        if flat.contains(&Shape::Unknown) {
            return Shape::Unknown;
        }

        let mut members = dedup(flat.into_iter().filter(|shape| *shape != Shape::Never));

        let has_true = members.contains(&Shape::literal(true));
        let has_false = members.contains(&Shape::literal(false));
        if has_true && has_false {
            members.retain(|shape| !matches!(shape, Shape::Literal(Literal::Bool(_))));
            if !members.contains(&Shape::Boolean) {
                members.push(Shape::Boolean);
            }
        }

        let primitives: Vec<Shape> = members
            .iter()
            .filter(|shape| shape.is_primitive())
            .cloned()
            .collect();
        members.retain(|shape| match shape {
            Shape::Literal(literal) => !primitives.contains(&literal.primitive()),
            _ => true,
        });

        match members.len() {
            0 => Shape::Never,
            1 => members.remove(0),
            _ => Shape::Union(members),
        }
    }

    /// The canonical intersection of `members`.
    pub fn intersection(members: impl IntoIterator<Item = Shape>) -> Shape {
        let mut flat = Vec::new();
        for member in members {
            flatten_into(member, &mut flat, |shape| match shape {
                Shape::Intersection(inner) => Ok(inner),
                other => Err(other),
            });
        }

        if flat.contains(&Shape::Never) {
            return Shape::Never;
        }
        if flat.contains(&Shape::Any) {
            return Shape::Any;
        }

        let mut record: Option<Record> = None;
        let mut atom: Option<Shape> = None;
        let mut others = Vec::new();
        for member in dedup(flat.into_iter().filter(|shape| *shape != Shape::Unknown)) {
            match member {
                Shape::Record(next) => {
                    record = Some(match record {
                        Some(acc) => acc.merge(next),
                        None => next,
                    });
                }
                member if member.is_atomic() => {
                    atom = Some(match atom {
                        None => member,
                        Some(acc) if member.extends(&acc) => member,
                        Some(acc) if acc.extends(&member) => acc,
                        Some(_) => return Shape::Never,
                    });
                }
                member => others.push(member),
            }
        }

        if let Some(atom) = &atom {
            if atom.is_nullish() && (record.is_some() || !others.is_empty()) {
                return Shape::Never;
            }
        }

        let mut members: Vec<Shape> = atom
            .into_iter()
            .chain(others)
            .chain(record.map(Shape::Record))
            .collect();
        match members.len() {
            0 => Shape::Unknown,
            1 => members.remove(0),
            _ => Shape::Intersection(members),
        }
    }

    /// The declared fields of this shape.
    ///
    /// Records report their own fields and intersections the merged fields
    /// of their members. A union reports only the fields every member
    /// declares. All other shapes have no fields.
    pub fn properties(&self) -> BTreeMap<String, Field> {
        match self {
            Shape::Record(record) => record.fields.clone(),
            Shape::Intersection(members) => {
                members
                    .iter()
                    .fold(Record::default(), |acc, member| {
                        acc.merge(Record {
                            fields: member.properties(),
                        })
                    })
                    .fields
            }
            Shape::Union(members) => {
                let mut iter = members.iter();
                let Some(first) = iter.next() else {
                    return BTreeMap::new();
                };
                iter.fold(first.properties(), |common, member| {
                    let mut fields = member.properties();
                    common
                        .into_iter()
                        .filter_map(|(name, field)| {
                            fields.remove(&name).map(|other| (name, field.join(other)))
                        })
                        .collect()
                })
            }
            _ => BTreeMap::new(),
        }
    }

    /// The sequence this shape is, looking through intersections.
    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Shape::Sequence(sequence) => Some(sequence),
            Shape::Intersection(members) => members.iter().find_map(Shape::as_sequence),
            _ => None,
        }
    }

    /// The call signature of this shape, looking through intersections.
    pub fn as_callable(&self) -> Option<&Signature> {
        match self {
            Shape::Callable(signature) => Some(signature),
            Shape::Intersection(members) => members.iter().find_map(Shape::as_callable),
            _ => None,
        }
    }

    /// The construct signature of this shape, looking through intersections.
    pub fn as_constructor(&self) -> Option<&Construct> {
        match self {
            Shape::Constructor(construct) => Some(construct),
            Shape::Intersection(members) => members.iter().find_map(Shape::as_constructor),
            _ => None,
        }
    }

    /// This shape with its `undefined` alternative removed.
    pub fn without_undefined(&self) -> Shape {
        match self {
            Shape::Undefined => Shape::Never,
            Shape::Union(members) => Shape::union(
                members
                    .iter()
                    .filter(|member| **member != Shape::Undefined)
                    .cloned(),
            ),
            other => other.clone(),
        }
    }

    pub(crate) fn is_primitive(&self) -> bool {
        matches!(
            self,
            Shape::Boolean | Shape::String | Shape::Number | Shape::BigInt | Shape::Symbol
        )
    }

    pub(crate) fn is_nullish(&self) -> bool {
        matches!(self, Shape::Null | Shape::Undefined | Shape::Void)
    }

    /// Absent-value markers, primitives and literals.
    pub(crate) fn is_atomic(&self) -> bool {
        self.is_nullish() || self.is_primitive() || matches!(self, Shape::Literal(_))
    }
}

fn flatten_into(
    shape: Shape,
    out: &mut Vec<Shape>,
    split: impl Fn(Shape) -> Result<Vec<Shape>, Shape> + Copy,
) {
    match split(shape) {
        Ok(inner) => {
            for member in inner {
                flatten_into(member, out, split);
            }
        }
        Err(leaf) => out.push(leaf),
    }
}

fn dedup(shapes: impl Iterator<Item = Shape>) -> Vec<Shape> {
    let mut out: Vec<Shape> = Vec::new();
    for shape in shapes {
        if !out.contains(&shape) {
            out.push(shape);
        }
    }
    out
}

/// Required elements first, then optional ones, then at most one rest
/// element at the end.
fn validate_elements(elements: &[Element<Shape>]) -> Result<(), ShapeError> {
    let mut seen_optional = false;
    for (index, element) in elements.iter().enumerate() {
        match element.kind {
            ElementKind::Required if seen_optional => {
                return Err(ShapeError::RequiredAfterOptional { index });
            }
            ElementKind::Required => {}
            ElementKind::Optional => seen_optional = true,
            ElementKind::Rest if index + 1 != elements.len() => {
                return Err(ShapeError::RestNotLast { index });
            }
            ElementKind::Rest => {}
        }
    }
    Ok(())
}

//! TypeScript-like rendering of shapes and brands.
//!
//! Shapes print the way they would be written as type annotations, which is
//! what assertion failures and trace events show. Brands print as their
//! kind name followed by the classified payload.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use crate::brand::Brand;
use crate::shape::{Element, ElementKind, Field, Literal, Record, Sequence, Shape};

/// How tightly the surrounding syntax binds, from loosest to tightest.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Top,
    Union,
    Intersection,
    Postfix,
}

impl Shape {
    fn precedence(&self) -> Precedence {
        match self {
            Shape::Callable(_) | Shape::Constructor(_) => Precedence::Top,
            Shape::Union(_) => Precedence::Union,
            Shape::Intersection(_) => Precedence::Intersection,
            _ => Precedence::Postfix,
        }
    }
}

/// Write `shape`, parenthesized if it binds looser than `context`.
fn operand(f: &mut Formatter<'_>, shape: &Shape, context: Precedence) -> fmt::Result {
    if shape.precedence() < context {
        write!(f, "({shape})")
    } else {
        write!(f, "{shape}")
    }
}

fn joined(
    f: &mut Formatter<'_>,
    members: &[Shape],
    separator: &str,
    context: Precedence,
) -> fmt::Result {
    for (index, member) in members.iter().enumerate() {
        if index > 0 {
            f.write_str(separator)?;
        }
        operand(f, member, context)?;
    }
    Ok(())
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(value) => write!(f, "{value}"),
            Literal::String(value) => write!(f, "{value:?}"),
            Literal::Number(value) => write!(f, "{value}"),
            Literal::BigInt(value) => write!(f, "{value}n"),
            Literal::UniqueSymbol(name) => write!(f, "unique symbol {name:?}"),
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.shape)
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            return f.write_str("{}");
        }
        f.write_str("{ ")?;
        for (index, (name, field)) in self.fields.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            if field.readonly {
                f.write_str("readonly ")?;
            }
            let mark = if field.optional { "?" } else { "" };
            write!(f, "{name}{mark}: {field}")?;
        }
        f.write_str(" }")
    }
}

impl<T: Display> Display for Element<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind {
            ElementKind::Required => write!(f, "{}", self.item),
            ElementKind::Optional => write!(f, "{}?", self.item),
            ElementKind::Rest => write!(f, "...{}[]", self.item),
        }
    }
}

/// A shape element, with the item parenthesized where `?` or `[]` would
/// otherwise bind to part of it.
struct ShapeElement<'a>(&'a Element<Shape>);

impl Display for ShapeElement<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let element = self.0;
        if element.kind == ElementKind::Rest {
            f.write_str("...")?;
        }
        operand(f, &element.item, Precedence::Postfix)?;
        match element.kind {
            ElementKind::Required => Ok(()),
            ElementKind::Optional => f.write_str("?"),
            ElementKind::Rest => f.write_str("[]"),
        }
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.readonly {
            f.write_str("readonly ")?;
        }
        if let [only] = self.elements.as_slice() {
            if only.kind == ElementKind::Rest {
                operand(f, &only.item, Precedence::Postfix)?;
                return f.write_str("[]");
            }
        }
        f.write_str("[")?;
        for (index, element) in self.elements.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", ShapeElement(element))?;
        }
        f.write_str("]")
    }
}

fn params(f: &mut Formatter<'_>, params: &[Element<Shape>]) -> fmt::Result {
    f.write_str("(")?;
    for (index, param) in params.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        match param.kind {
            ElementKind::Required => write!(f, "arg{index}: {}", param.item)?,
            ElementKind::Optional => write!(f, "arg{index}?: {}", param.item)?,
            ElementKind::Rest => {
                write!(f, "...rest: ")?;
                operand(f, &param.item, Precedence::Postfix)?;
                f.write_str("[]")?;
            }
        }
    }
    f.write_str(")")
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Never => f.write_str("never"),
            Shape::Any => f.write_str("any"),
            Shape::Unknown => f.write_str("unknown"),
            Shape::Null => f.write_str("null"),
            Shape::Undefined => f.write_str("undefined"),
            Shape::Void => f.write_str("void"),
            Shape::Boolean => f.write_str("boolean"),
            Shape::String => f.write_str("string"),
            Shape::Number => f.write_str("number"),
            Shape::BigInt => f.write_str("bigint"),
            Shape::Symbol => f.write_str("symbol"),
            Shape::Literal(literal) => write!(f, "{literal}"),
            Shape::Union(members) => joined(f, members, " | ", Precedence::Union),
            Shape::Intersection(members) => {
                joined(f, members, " & ", Precedence::Intersection)
            }
            Shape::Record(record) => write!(f, "{record}"),
            Shape::Sequence(sequence) => write!(f, "{sequence}"),
            Shape::Callable(signature) => {
                params(f, &signature.params)?;
                write!(f, " => {}", signature.returns)
            }
            Shape::Constructor(construct) => {
                f.write_str("new ")?;
                params(f, &construct.params)?;
                write!(f, " => {}", construct.instance)
            }
        }
    }
}

fn brand_list(f: &mut Formatter<'_>, elements: &[Element<Brand>]) -> fmt::Result {
    f.write_str("[")?;
    for (index, element) in elements.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{element}")?;
    }
    f.write_str("]")
}

fn brand_map(f: &mut Formatter<'_>, entries: &BTreeMap<String, Brand>) -> fmt::Result {
    if entries.is_empty() {
        return f.write_str("{}");
    }
    f.write_str("{ ")?;
    for (index, (name, brand)) in entries.iter().enumerate() {
        if index > 0 {
            f.write_str("; ")?;
        }
        write!(f, "{name}: {brand}")?;
    }
    f.write_str(" }")
}

impl Display for Brand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        match self {
            Brand::Bottom | Brand::Any | Brand::Unknown | Brand::Empty => Ok(()),
            Brand::Unit(shape) | Brand::Scalar(shape) => write!(f, "<{shape}>"),
            Brand::Sequence(elements) | Brand::ImmutableSequence(elements) => {
                f.write_str("<")?;
                brand_list(f, elements)?;
                f.write_str(">")
            }
            Brand::Constructor { params, instance } => {
                write!(f, "<params: {params}, instance: {instance}>")
            }
            Brand::Callable { params, returns } => {
                write!(f, "<params: {params}, returns: {returns}>")
            }
            Brand::Record { required, optional } => {
                f.write_str("<required: ")?;
                brand_map(f, required)?;
                f.write_str(", optional: ")?;
                brand_map(f, optional)?;
                f.write_str(">")
            }
        }
    }
}

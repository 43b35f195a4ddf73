//! # Brand Engine
//!
//! Classifies a [`Shape`] into exactly one of eleven kinds and builds a
//! canonical descriptor, the [`Brand`], whose payload is itself made of
//! brands for composite shapes. Two shapes with equivalent brands have the
//! same kind and equivalent classified parts.
//!
//! ## Priority
//!
//! The degenerate kinds overlap with everything, so classification is a
//! single ordered dispatch where the first match wins:
//!
//! | # | Test | Brand |
//! |---|------|-------|
//! | 1 | extends `never` | `Bottom` |
//! | 2 | permissive top | `Any` |
//! | 3 | restrictive top | `Unknown` |
//! | 4 | accepts `{}` with no optional fields | `Empty` |
//! | 5 | extends `null \| undefined \| void` | `Unit(shape)` |
//! | 6 | extends a primitive | `Scalar(shape)`, or a record when normalized |
//! | 7 | mutable sequence | `Sequence(elements)` |
//! | 8 | readonly sequence | `ImmutableSequence(elements)` |
//! | 9 | construct signature | `Constructor { params, instance }` |
//! | 10 | call signature | `Callable { params, returns }` |
//! | 11 | anything else | `Record { required, optional }` |
//!
//! ## Normalization
//!
//! With `normalize` set, scalars are described by their fields instead of
//! their value. A bare `number` becomes the empty record brand, while a
//! branded `number & { tag: "usd" }` keeps `tag` in its required map. The
//! flag applies to every nested classification as well.
//!
//! ```
//! use typebrand_core::{classify, Brand, BrandKind, Shape};
//!
//! let brand = classify(&Shape::tuple([Shape::literal(1), Shape::Null]), false);
//! assert_eq!(brand.kind(), BrandKind::Sequence);
//! assert_eq!(Brand::of(&Shape::Never), Brand::Bottom);
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::keys::{optional_keys, required_keys};
use crate::predicates::{is_any, is_bottom, is_empty, is_scalar, is_unit, is_unknown};
use crate::shape::{Element, Sequence, Shape};

/// The canonical descriptor of a shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum Brand {
    Bottom,
    Any,
    Unknown,
    Empty,
    /// An absent-value marker, carried as the shape itself.
    Unit(Shape),
    /// A scalar, carried as the shape itself.
    Scalar(Shape),
    Sequence(Vec<Element<Brand>>),
    /// A readonly sequence. The elements are classified exactly like a
    /// mutable one; only the kind differs.
    ImmutableSequence(Vec<Element<Brand>>),
    /// The instance shape is kept unclassified.
    Constructor {
        params: Box<Brand>,
        instance: Box<Shape>,
    },
    Callable {
        params: Box<Brand>,
        returns: Box<Brand>,
    },
    /// Optional entries are classified without their `undefined`
    /// alternative.
    Record {
        required: BTreeMap<String, Brand>,
        optional: BTreeMap<String, Brand>,
    },
}

/// The classification tag of a [`Brand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandKind {
    Bottom,
    Any,
    Unknown,
    Empty,
    Unit,
    Scalar,
    Sequence,
    ImmutableSequence,
    Constructor,
    Callable,
    Record,
}

impl BrandKind {
    /// Every kind, in classification priority order.
    pub const ALL: [BrandKind; 11] = [
        BrandKind::Bottom,
        BrandKind::Any,
        BrandKind::Unknown,
        BrandKind::Empty,
        BrandKind::Unit,
        BrandKind::Scalar,
        BrandKind::Sequence,
        BrandKind::ImmutableSequence,
        BrandKind::Constructor,
        BrandKind::Callable,
        BrandKind::Record,
    ];

    /// The human-facing name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            BrandKind::Bottom => "never",
            BrandKind::Any => "any",
            BrandKind::Unknown => "unknown",
            BrandKind::Empty => "empty",
            BrandKind::Unit => "unit",
            BrandKind::Scalar => "primitive",
            BrandKind::Sequence => "array",
            BrandKind::ImmutableSequence => "readonly array",
            BrandKind::Constructor => "class",
            BrandKind::Callable => "function",
            BrandKind::Record => "object",
        }
    }
}

impl fmt::Display for BrandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Brand {
    /// Classify `shape` without normalization.
    pub fn of(shape: &Shape) -> Brand {
        classify(shape, false)
    }

    /// Classify `shape`, describing scalars by their fields.
    pub fn normalized(shape: &Shape) -> Brand {
        classify(shape, true)
    }

    pub fn kind(&self) -> BrandKind {
        match self {
            Brand::Bottom => BrandKind::Bottom,
            Brand::Any => BrandKind::Any,
            Brand::Unknown => BrandKind::Unknown,
            Brand::Empty => BrandKind::Empty,
            Brand::Unit(_) => BrandKind::Unit,
            Brand::Scalar(_) => BrandKind::Scalar,
            Brand::Sequence(_) => BrandKind::Sequence,
            Brand::ImmutableSequence(_) => BrandKind::ImmutableSequence,
            Brand::Constructor { .. } => BrandKind::Constructor,
            Brand::Callable { .. } => BrandKind::Callable,
            Brand::Record { .. } => BrandKind::Record,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}

/// Classify `shape` into its brand.
///
/// Total: every shape has exactly one brand. `normalize` is passed down to
/// every nested classification.
pub fn classify(shape: &Shape, normalize: bool) -> Brand {
    let brand = dispatch(shape, normalize);
    tracing::trace!(kind = %brand.kind(), %shape, normalize, "classified shape");
    brand
}

fn dispatch(shape: &Shape, normalize: bool) -> Brand {
    if is_bottom(shape) {
        return Brand::Bottom;
    }
    if is_any(shape) {
        return Brand::Any;
    }
    if is_unknown(shape) {
        return Brand::Unknown;
    }
    if is_empty(shape) {
        return Brand::Empty;
    }
    if is_unit(shape) {
        return Brand::Unit(shape.clone());
    }
    if is_scalar(shape) {
        return if normalize {
            classify_record(shape, normalize)
        } else {
            Brand::Scalar(shape.clone())
        };
    }

    if let Some(sequence) = shape.as_sequence() {
        let elements = classify_elements(&sequence.elements, normalize);
        return if sequence.readonly {
            Brand::ImmutableSequence(elements)
        } else {
            Brand::Sequence(elements)
        };
    }
    if let Some(construct) = shape.as_constructor() {
        return Brand::Constructor {
            params: Box::new(classify_params(&construct.params, normalize)),
            instance: construct.instance.clone(),
        };
    }
    if let Some(signature) = shape.as_callable() {
        return Brand::Callable {
            params: Box::new(classify_params(&signature.params, normalize)),
            returns: Box::new(classify(&signature.returns, normalize)),
        };
    }

    classify_record(shape, normalize)
}

fn classify_elements(elements: &[Element<Shape>], normalize: bool) -> Vec<Element<Brand>> {
    elements
        .iter()
        .map(|element| element.map(|item| classify(item, normalize)))
        .collect()
}

/// A parameter list is classified as the mutable tuple it would be if the
/// arguments were collected into one.
fn classify_params(params: &[Element<Shape>], normalize: bool) -> Brand {
    let tuple = Shape::Sequence(Sequence {
        elements: params.to_vec(),
        readonly: false,
    });
    classify(&tuple, normalize)
}

fn classify_record(shape: &Shape, normalize: bool) -> Brand {
    let properties = shape.properties();
    let entries = |names: BTreeSet<String>, strip: bool| {
        names
            .into_iter()
            .filter_map(|name| {
                let field = properties.get(&name)?;
                let value = if strip {
                    field.shape.without_undefined()
                } else {
                    field.shape.clone()
                };
                Some((name, classify(&value, normalize)))
            })
            .collect::<BTreeMap<_, _>>()
    };

    Brand::Record {
        required: entries(required_keys(shape), false),
        optional: entries(optional_keys(shape), true),
    }
}

//! # Logic - Tri-State Boolean Combinators
//!
//! The shape predicates are conjunctions and disjunctions of subsumption
//! checks. This crate provides the combinators they are written with.
//!
//! Values are three-valued: besides `True` and `False` there is
//! [`Truth::Indeterminate`], a value that may be either. The combinators
//! follow "all possible outcomes" semantics:
//!
//! - `and` is `True` only when both sides are definitely `True`
//! - `or` is `False` only when both sides are definitely `False`
//! - `xor` is `True` unless both sides are definitely equal
//! - `all([])` and `any([])` are both `False`
//!
//! ```rust
//! use typebrand_logic::{all, and, not, Truth};
//!
//! assert_eq!(and(true, true), Truth::True);
//! assert_eq!(and(Truth::Indeterminate, true), Truth::False);
//! assert_eq!(not(Truth::Indeterminate), Truth::Indeterminate);
//! assert!(all([true, true, true]).is_true());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A three-valued boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Truth {
    False,
    True,
    /// Could be either `True` or `False`.
    Indeterminate,
}

impl Truth {
    /// `true` only for [`Truth::True`].
    pub fn is_true(self) -> bool {
        self == Truth::True
    }

    /// `true` only for [`Truth::False`].
    pub fn is_false(self) -> bool {
        self == Truth::False
    }

    /// The concrete value, if there is one.
    pub fn known(self) -> Option<bool> {
        match self {
            Truth::False => Some(false),
            Truth::True => Some(true),
            Truth::Indeterminate => None,
        }
    }

    fn may_be_true(self) -> bool {
        self != Truth::False
    }

    fn may_be_false(self) -> bool {
        self != Truth::True
    }
}

impl From<bool> for Truth {
    fn from(value: bool) -> Self {
        if value {
            Truth::True
        } else {
            Truth::False
        }
    }
}

impl From<Option<bool>> for Truth {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Truth::Indeterminate, Truth::from)
    }
}

impl fmt::Display for Truth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Truth::False => write!(f, "false"),
            Truth::True => write!(f, "true"),
            Truth::Indeterminate => write!(f, "boolean"),
        }
    }
}

/// Negation. `Indeterminate` stays `Indeterminate`.
pub fn not(value: impl Into<Truth>) -> Truth {
    let value: Truth = value.into();
    match value {
        Truth::False => Truth::True,
        Truth::True => Truth::False,
        Truth::Indeterminate => Truth::Indeterminate,
    }
}

/// Conjunction: `True` only if both operands are `True`.
pub fn and(left: impl Into<Truth>, right: impl Into<Truth>) -> Truth {
    let (left, right): (Truth, Truth) = (left.into(), right.into());
    (left.is_true() && right.is_true()).into()
}

/// Negated conjunction.
pub fn nand(left: impl Into<Truth>, right: impl Into<Truth>) -> Truth {
    not(and(left, right))
}

/// Disjunction: `False` only if both operands are `False`.
pub fn or(left: impl Into<Truth>, right: impl Into<Truth>) -> Truth {
    let (left, right): (Truth, Truth) = (left.into(), right.into());
    (!(left.is_false() && right.is_false())).into()
}

/// Negated disjunction.
pub fn nor(left: impl Into<Truth>, right: impl Into<Truth>) -> Truth {
    not(or(left, right))
}

/// Exclusive or: `False` only if both operands are definitely equal.
pub fn xor(left: impl Into<Truth>, right: impl Into<Truth>) -> Truth {
    let (left, right): (Truth, Truth) = (left.into(), right.into());
    let both_true = left.is_true() && right.is_true();
    let both_false = left.is_false() && right.is_false();
    (!(both_true || both_false)).into()
}

/// Equality: the negation of [`xor`].
pub fn eq(left: impl Into<Truth>, right: impl Into<Truth>) -> Truth {
    not(xor(left, right))
}

/// `True` if every item is definitely `True`. Empty input is `False`.
pub fn all<I>(items: I) -> Truth
where
    I: IntoIterator,
    I::Item: Into<Truth>,
{
    let mut seen = false;
    for item in items {
        seen = true;
        let item: Truth = item.into();
        if item.may_be_false() {
            return Truth::False;
        }
    }
    seen.into()
}

/// `True` if any item may be `True`. Empty input is `False`.
pub fn any<I>(items: I) -> Truth
where
    I: IntoIterator,
    I::Item: Into<Truth>,
{
    items
        .into_iter()
        .any(|item| Into::<Truth>::into(item).may_be_true())
        .into()
}

/// The negation of [`any`].
pub fn none<I>(items: I) -> Truth
where
    I: IntoIterator,
    I::Item: Into<Truth>,
{
    not(any(items))
}

/// Whether a check passes given an inversion flag.
///
/// A non-inverted check passes when `condition` is `True`; an inverted one
/// passes when it is `False`. An `Indeterminate` condition never passes.
pub fn switch(condition: impl Into<Truth>, inverted: impl Into<Truth>) -> bool {
    let (condition, inverted): (Truth, Truth) = (condition.into(), inverted.into());
    if condition == Truth::Indeterminate || inverted == Truth::Indeterminate {
        return false;
    }
    xor(condition, inverted).is_true()
}

//! Chainable assertions about a subject shape.
//!
//! [`expect_shape`] builds a context around a subject. Every check returns
//! the context again on success, so checks chain with `?`, and `not()`
//! flips the expectation for the checks that follow it.
//!
//! | Check | Holds when |
//! |-------|------------|
//! | `to_extend(s)` | the subject extends `s` |
//! | `to_be(s)` | the brands are equivalent |
//! | `to_have(s)` | the subject's brand extends the brand of `s` |
//! | `to_be_part_of(s)` | the brand of `s` extends the subject's brand |
//! | `to_have_required(keys)` | every key is a required field of the subject |
//! | `to_have_optional(keys)` | every key is an optional field of the subject |

use std::sync::{Arc, OnceLock};

use typebrand_core::{equivalent, optional_keys, required_keys, subsumes, Brand, Extends, Shape};
use typebrand_logic::switch;

use crate::error::{AssertionError, AssertionKind, Candidate};

/// The shape under test, shared by a context and its inversions. The brand
/// is computed on first use.
#[derive(Debug)]
struct Subject {
    shape: Shape,
    brand: OnceLock<Brand>,
}

impl Subject {
    fn brand(&self) -> &Brand {
        self.brand.get_or_init(|| Brand::of(&self.shape))
    }
}

/// An assertion context for one subject.
#[derive(Debug, Clone)]
pub struct TypeAssertions {
    subject: Arc<Subject>,
    inverted: bool,
}

/// Start asserting about `subject`.
pub fn expect_shape(subject: Shape) -> TypeAssertions {
    TypeAssertions {
        subject: Arc::new(Subject {
            shape: subject,
            brand: OnceLock::new(),
        }),
        inverted: false,
    }
}

impl TypeAssertions {
    /// The same subject with the expectation flipped.
    pub fn not(&self) -> TypeAssertions {
        TypeAssertions {
            subject: Arc::clone(&self.subject),
            inverted: !self.inverted,
        }
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn subject(&self) -> &Shape {
        &self.subject.shape
    }

    /// The subject extends `shape`, compared structurally.
    pub fn to_extend(&self, shape: &Shape) -> Result<TypeAssertions, AssertionError> {
        let holds = subsumes(shape, self.subject());
        self.check(holds, AssertionKind::Extend, Candidate::Shape(shape.clone()))
    }

    /// The subject and `shape` have equivalent brands.
    pub fn to_be(&self, shape: &Shape) -> Result<TypeAssertions, AssertionError> {
        let holds = equivalent(self.subject.brand(), &Brand::of(shape));
        self.check(holds, AssertionKind::Be, Candidate::Shape(shape.clone()))
    }

    /// The subject has everything the brand of `shape` requires.
    pub fn to_have(&self, shape: &Shape) -> Result<TypeAssertions, AssertionError> {
        let holds = self.subject.brand().extends(&Brand::of(shape));
        self.check(holds, AssertionKind::Have, Candidate::Shape(shape.clone()))
    }

    /// Everything the subject's brand requires is present in `shape`.
    pub fn to_be_part_of(&self, shape: &Shape) -> Result<TypeAssertions, AssertionError> {
        let holds = Brand::of(shape).extends(self.subject.brand());
        self.check(holds, AssertionKind::BePartOf, Candidate::Shape(shape.clone()))
    }

    /// Every key in `keys` names a required field. An empty list holds.
    pub fn to_have_required<K: AsRef<str>>(
        &self,
        keys: &[K],
    ) -> Result<TypeAssertions, AssertionError> {
        let required = required_keys(self.subject());
        let holds = keys.iter().all(|key| required.contains(key.as_ref()));
        self.check(holds, AssertionKind::HaveRequired, key_list(keys))
    }

    /// Every key in `keys` names an optional field. An empty list holds.
    pub fn to_have_optional<K: AsRef<str>>(
        &self,
        keys: &[K],
    ) -> Result<TypeAssertions, AssertionError> {
        let optional = optional_keys(self.subject());
        let holds = keys.iter().all(|key| optional.contains(key.as_ref()));
        self.check(holds, AssertionKind::HaveOptional, key_list(keys))
    }

    fn check(
        &self,
        holds: bool,
        kind: AssertionKind,
        candidate: Candidate,
    ) -> Result<TypeAssertions, AssertionError> {
        if switch(holds, self.inverted) {
            return Ok(self.clone());
        }

        tracing::debug!(
            subject = %self.subject(),
            %candidate,
            %kind,
            inverted = self.inverted,
            "assertion failed"
        );
        Err(AssertionError::Violation {
            subject: self.subject().clone(),
            candidate,
            kind,
            inverted: self.inverted,
        })
    }
}

fn key_list<K: AsRef<str>>(keys: &[K]) -> Candidate {
    Candidate::Keys(keys.iter().map(|key| key.as_ref().to_string()).collect())
}

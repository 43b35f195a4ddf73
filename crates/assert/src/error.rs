//! # Error Types
//!
//! An assertion either holds or fails with a [`AssertionError`] describing
//! the subject, what it was compared against, the relation that was
//! checked, and whether the check was inverted.

use std::fmt;

use thiserror::Error;
use typebrand_core::Shape;

/// The relation an assertion checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssertionKind {
    Extend,
    Be,
    Have,
    BePartOf,
    HaveRequired,
    HaveOptional,
}

impl fmt::Display for AssertionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phrase = match self {
            AssertionKind::Extend => "to extend",
            AssertionKind::Be => "to be",
            AssertionKind::Have => "to have",
            AssertionKind::BePartOf => "to be part of",
            AssertionKind::HaveRequired => "to have required keys",
            AssertionKind::HaveOptional => "to have optional keys",
        };
        f.write_str(phrase)
    }
}

/// What the subject was compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    Shape(Shape),
    Keys(Vec<String>),
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Candidate::Shape(shape) => write!(f, "{shape}"),
            Candidate::Keys(keys) => write!(f, "[{}]", keys.join(", ")),
        }
    }
}

/// Errors raised by a failed assertion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssertionError {
    #[error("expected {subject} {}{kind} {candidate}", negation(.inverted))]
    Violation {
        subject: Shape,
        candidate: Candidate,
        kind: AssertionKind,
        inverted: bool,
    },
}

fn negation(inverted: &bool) -> &'static str {
    if *inverted {
        "not "
    } else {
        ""
    }
}

impl AssertionError {
    /// The relation that failed.
    pub fn kind(&self) -> AssertionKind {
        match self {
            AssertionError::Violation { kind, .. } => *kind,
        }
    }

    /// Whether the failed check was the inverted form.
    pub fn inverted(&self) -> bool {
        match self {
            AssertionError::Violation { inverted, .. } => *inverted,
        }
    }
}

//! Restricted DNF concept expressions.
//!
//! An [`Expression`] is a disjunction of [`Conjunction`]s, each a conjunction of
//! [`Literal`]s. Literal payloads are plain names, so negation and role
//! restrictions can only ever wrap an atomic concept:
//!
//! ```text
//! expression   := conjunction ( '⊔' conjunction )*
//! conjunction  := literal ( '⊓' literal )*
//! literal      := atomic | '¬' atomic | '∀' role '.' atomic | '∃' role '.' atomic
//! ```
//!
//! Names stay unresolved strings until evaluation.

pub mod parser;

use serde::{Deserialize, Serialize};

pub use parser::parse;

pub const NOT: char = '¬';
pub const AND: char = '⊓';
pub const OR: char = '⊔';
pub const ALL: char = '∀';
pub const EXISTS: char = '∃';

/// A single conjunct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Literal {
    /// `C`
    Atomic { name: String },
    /// `¬C`
    Not { name: String },
    /// `∀R.C`
    All { role: String, name: String },
    /// `∃R.C`
    Exists { role: String, name: String },
}

impl Literal {
    pub fn atomic(name: impl Into<String>) -> Self {
        Self::Atomic { name: name.into() }
    }

    pub fn not(name: impl Into<String>) -> Self {
        Self::Not { name: name.into() }
    }

    pub fn all(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::All {
            role: role.into(),
            name: name.into(),
        }
    }

    pub fn exists(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Exists {
            role: role.into(),
            name: name.into(),
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Atomic { .. } => "atomic",
            Literal::Not { .. } => "not",
            Literal::All { .. } => "all",
            Literal::Exists { .. } => "exists",
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Atomic { name } => write!(f, "{name}"),
            Literal::Not { name } => write!(f, "{NOT}{name}"),
            Literal::All { role, name } => write!(f, "{ALL}{role}.{name}"),
            Literal::Exists { role, name } => write!(f, "{EXISTS}{role}.{name}"),
        }
    }
}

/// Literals joined by `⊓`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conjunction(pub Vec<Literal>);

impl Conjunction {
    pub fn literals(&self) -> &[Literal] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Conjunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, literal) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " {AND} ")?;
            }
            write!(f, "{literal}")?;
        }
        Ok(())
    }
}

/// Conjunctions joined by `⊔`, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Expression(pub Vec<Conjunction>);

impl Expression {
    pub fn groups(&self) -> &[Conjunction] {
        &self.0
    }

    /// Every literal, group by group.
    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.0.iter().flat_map(|c| c.0.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, group) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " {OR} ")?;
            }
            if self.0.len() > 1 && group.0.len() > 1 {
                write!(f, "({group})")?;
            } else {
                write!(f, "{group}")?;
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for Expression {
    type Err = crate::error::ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

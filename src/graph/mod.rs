//! Fact store: a set of (subject, predicate, object) triples.
//!
//! The reasoner only talks to facts through the [`FactStore`] trait, which offers
//! pattern-matched lookup and insertion. [`KnowledgeGraph`](index::KnowledgeGraph)
//! is the in-memory implementation; [`rdf`] fills a store from serialized RDF.

pub mod index;
pub mod rdf;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::term::Term;

/// A triple (subject, predicate, object) in the fact store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    /// The subject of the triple.
    pub subject: Term,
    /// The predicate (relation) of the triple.
    pub predicate: Term,
    /// The object of the triple.
    pub object: Term,
}

impl Triple {
    pub fn new(subject: impl Into<Term>, predicate: impl Into<Term>, object: impl Into<Term>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

/// A partial triple. `None` components are wildcards.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriplePattern<'a> {
    pub subject: Option<&'a Term>,
    pub predicate: Option<&'a Term>,
    pub object: Option<&'a Term>,
}

impl<'a> TriplePattern<'a> {
    pub fn new(
        subject: Option<&'a Term>,
        predicate: Option<&'a Term>,
        object: Option<&'a Term>,
    ) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Whether `triple` agrees with every bound component.
    pub fn matches(&self, triple: &Triple) -> bool {
        self.subject.is_none_or(|s| *s == triple.subject)
            && self.predicate.is_none_or(|p| *p == triple.predicate)
            && self.object.is_none_or(|o| *o == triple.object)
    }
}

/// Pattern-matched access to a set of triples.
///
/// Implementations keep set semantics: inserting a triple that is already
/// present changes nothing.
pub trait FactStore {
    /// All triples matching `pattern`, in unspecified order.
    fn triples(&self, pattern: TriplePattern<'_>) -> Vec<Triple>;

    /// Insert a triple. Returns `false` if it was already present.
    fn add(&self, triple: Triple) -> bool;

    fn contains(&self, triple: &Triple) -> bool;

    /// Number of distinct triples.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subjects of triples matching `(?, predicate, object)`.
    fn subjects(&self, predicate: Option<&Term>, object: Option<&Term>) -> BTreeSet<Term> {
        self.triples(TriplePattern::new(None, predicate, object))
            .into_iter()
            .map(|t| t.subject)
            .collect()
    }

    /// Objects of triples matching `(subject, predicate, ?)`.
    fn objects(&self, subject: Option<&Term>, predicate: Option<&Term>) -> BTreeSet<Term> {
        self.triples(TriplePattern::new(subject, predicate, None))
            .into_iter()
            .map(|t| t.object)
            .collect()
    }
}

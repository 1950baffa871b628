//! Set-semantics evaluation of concept expressions against a fact store.
//!
//! Each literal is turned into the subset of candidate individuals that
//! satisfies it; conjunction groups intersect their literal sets and the outer
//! disjunction unions the group results. Names are resolved through the
//! store's base namespace. A name that matches nothing yields an empty
//! (or, under negation, a full) set, never an error.
//!
//! Negation is open-world over materialized facts: `¬C` holds for an
//! individual iff no `(x, rdf:type, C)` fact is present after materialization.

use std::collections::BTreeSet;

use crate::error::ExprResult;
use crate::expr::{self, Conjunction, Expression, Literal};
use crate::graph::{FactStore, Triple, TriplePattern};
use crate::term::{Namespace, Term, Vocabulary};

/// Evaluates expressions over a borrowed fact store.
///
/// Holds no cached state: every call recomputes the candidate individuals so
/// that facts inserted since the last call (e.g. by materialization) are seen.
pub struct Evaluator<'a, S: FactStore> {
    store: &'a S,
    vocab: &'a Vocabulary,
    namespace: &'a Namespace,
}

impl<'a, S: FactStore> Evaluator<'a, S> {
    pub fn new(store: &'a S, vocab: &'a Vocabulary, namespace: &'a Namespace) -> Self {
        Self {
            store,
            vocab,
            namespace,
        }
    }

    /// Terms with at least one type assertion that are neither classes nor roles.
    ///
    /// Excluded are subjects of `subClassOf` edges and anything typed with a
    /// class or property marker.
    pub fn individuals(&self) -> BTreeSet<Term> {
        let typed = self
            .store
            .triples(TriplePattern::new(None, Some(&self.vocab.type_of), None));

        let mut excluded: BTreeSet<Term> = self
            .store
            .subjects(Some(&self.vocab.sub_class_of), None);
        excluded.extend(
            typed
                .iter()
                .filter(|t| self.vocab.is_marker(&t.object))
                .map(|t| t.subject.clone()),
        );

        typed
            .into_iter()
            .map(|t| t.subject)
            .filter(|s| !excluded.contains(s))
            .collect()
    }

    /// Parse and evaluate `expression`.
    pub fn evaluate(&self, expression: &str) -> ExprResult<BTreeSet<Term>> {
        let parsed = expr::parse(expression)?;
        Ok(self.evaluate_parsed(&parsed))
    }

    /// Evaluate a pre-parsed expression. No groups yields the empty set.
    pub fn evaluate_parsed(&self, expression: &Expression) -> BTreeSet<Term> {
        let individuals = self.individuals();
        let mut result = BTreeSet::new();
        for group in expression.groups() {
            result.extend(self.evaluate_conjunction(group, &individuals));
        }
        tracing::debug!(
            expression = %expression,
            candidates = individuals.len(),
            matched = result.len(),
            "evaluated expression"
        );
        result
    }

    /// Intersect the literal sets of one group. An empty group matches nothing.
    fn evaluate_conjunction(
        &self,
        group: &Conjunction,
        individuals: &BTreeSet<Term>,
    ) -> BTreeSet<Term> {
        let mut literals = group.literals().iter();
        let Some(first) = literals.next() else {
            return BTreeSet::new();
        };
        let mut acc = self.satisfying(first, individuals);
        for literal in literals {
            if acc.is_empty() {
                break;
            }
            // Only survivors of earlier conjuncts need checking.
            acc = self.satisfying(literal, &acc);
        }
        acc
    }

    /// The members of `candidates` that satisfy `literal`.
    pub fn satisfying(&self, literal: &Literal, candidates: &BTreeSet<Term>) -> BTreeSet<Term> {
        let hits: BTreeSet<Term> = match literal {
            Literal::Atomic { name } => {
                let concept = self.namespace.resolve(name);
                candidates
                    .iter()
                    .filter(|x| self.has_type(x, &concept))
                    .cloned()
                    .collect()
            }
            Literal::Not { name } => {
                let concept = self.namespace.resolve(name);
                candidates
                    .iter()
                    .filter(|x| !self.has_type(x, &concept))
                    .cloned()
                    .collect()
            }
            Literal::All { role, name } => {
                let role = self.namespace.resolve(role);
                let concept = self.namespace.resolve(name);
                candidates
                    .iter()
                    .filter(|x| {
                        self.store
                            .objects(Some(*x), Some(&role))
                            .iter()
                            .all(|o| self.has_type(o, &concept))
                    })
                    .cloned()
                    .collect()
            }
            Literal::Exists { role, name } => {
                let role = self.namespace.resolve(role);
                let concept = self.namespace.resolve(name);
                candidates
                    .iter()
                    .filter(|x| {
                        self.store
                            .objects(Some(*x), Some(&role))
                            .iter()
                            .any(|o| self.has_type(o, &concept))
                    })
                    .cloned()
                    .collect()
            }
        };
        tracing::debug!(literal = %literal, kind = literal.kind(), hits = hits.len(), "evaluated literal");
        hits
    }

    fn has_type(&self, x: &Term, concept: &Term) -> bool {
        self.store.contains(&Triple {
            subject: x.clone(),
            predicate: self.vocab.type_of.clone(),
            object: concept.clone(),
        })
    }
}

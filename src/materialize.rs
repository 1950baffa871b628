//! Type materialization over the `subClassOf` hierarchy.
//!
//! For every asserted `(x, rdf:type, C)` the materializer walks the
//! subsumption edges upward from `C` and inserts `(x, rdf:type, D)` for every
//! super-concept `D` it reaches. Each walk is a BFS with its own visited set,
//! so cyclic hierarchies (including `A subClassOf A`) terminate.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::graph::{FactStore, Triple, TriplePattern};
use crate::term::{Term, Vocabulary};

/// A derived type assertion together with the hierarchy path that justifies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derivation {
    /// The inserted `(x, rdf:type, D)` fact.
    pub triple: Triple,
    /// `[C, ..., D]`: the asserted type followed by each super-concept up to `D`.
    pub chain: Vec<Term>,
}

/// Summary of one materialization run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterializeReport {
    /// Type assertions present before the run.
    pub asserted: usize,
    /// New facts inserted.
    pub inserted: usize,
    /// One record per inserted fact, in insertion order.
    pub derivations: Vec<Derivation>,
}

/// Computes and caches upward closures of the subsumption hierarchy.
#[derive(Debug, Default)]
pub struct Hierarchy {
    /// concept → direct super-concepts
    parents_of: HashMap<Term, Vec<Term>>,
    /// concept → reachable super-concepts (distance ≥ 1), each with its path
    closures: HashMap<Term, Vec<(Term, Vec<Term>)>>,
}

impl Hierarchy {
    /// Snapshot the `subClassOf` edges currently in `store`.
    pub fn build(store: &impl FactStore, vocab: &Vocabulary) -> Self {
        let mut parents_of: HashMap<Term, Vec<Term>> = HashMap::new();
        for t in store.triples(TriplePattern::new(None, Some(&vocab.sub_class_of), None)) {
            parents_of.entry(t.subject).or_default().push(t.object);
        }
        for parents in parents_of.values_mut() {
            parents.sort();
            parents.dedup();
        }
        Self {
            parents_of,
            closures: HashMap::new(),
        }
    }

    /// All concepts reachable from `concept` by one or more `subClassOf` edges,
    /// each paired with the path `[concept, ..., super]` that reached it.
    ///
    /// `concept` itself appears in the result only if it lies on a cycle.
    pub fn ancestors(&mut self, concept: &Term) -> &[(Term, Vec<Term>)] {
        if !self.closures.contains_key(concept) {
            let closure = self.walk(concept);
            self.closures.insert(concept.clone(), closure);
        }
        &self.closures[concept]
    }

    fn walk(&self, start: &Term) -> Vec<(Term, Vec<Term>)> {
        let mut reached = Vec::new();
        let mut visited: HashSet<&Term> = HashSet::new();
        let mut queue: VecDeque<(&Term, Vec<Term>)> = VecDeque::new();
        queue.push_back((start, vec![start.clone()]));

        while let Some((current, path)) = queue.pop_front() {
            let Some(parents) = self.parents_of.get(current) else {
                continue;
            };
            for parent in parents {
                if visited.insert(parent) {
                    let mut next = path.clone();
                    next.push(parent.clone());
                    reached.push((parent.clone(), next.clone()));
                    queue.push_back((parent, next));
                }
            }
        }
        reached
    }
}

/// Insert every type assertion implied by the subsumption hierarchy.
///
/// Idempotent: a second run over the same store inserts nothing.
pub fn materialize(store: &impl FactStore, vocab: &Vocabulary) -> MaterializeReport {
    let mut hierarchy = Hierarchy::build(store, vocab);
    let asserted = store.triples(TriplePattern::new(None, Some(&vocab.type_of), None));

    let mut report = MaterializeReport {
        asserted: asserted.len(),
        ..Default::default()
    };

    for assertion in &asserted {
        for (ancestor, chain) in hierarchy.ancestors(&assertion.object) {
            let triple = Triple {
                subject: assertion.subject.clone(),
                predicate: vocab.type_of.clone(),
                object: ancestor.clone(),
            };
            if store.add(triple.clone()) {
                report.inserted += 1;
                report.derivations.push(Derivation {
                    triple,
                    chain: chain.clone(),
                });
            }
        }
    }

    tracing::info!(
        asserted = report.asserted,
        inserted = report.inserted,
        concepts = hierarchy.parents_of.len(),
        "materialized type closure"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::index::KnowledgeGraph;

    fn vocab() -> Vocabulary {
        Vocabulary::default()
    }

    fn is_a(kg: &KnowledgeGraph, x: &str, c: &str) -> bool {
        kg.contains(&Triple::new(x, vocab().type_of, c))
    }

    fn sub(kg: &KnowledgeGraph, a: &str, b: &str) {
        kg.insert_triple(&Triple::new(a, vocab().sub_class_of, b));
    }

    fn typed(kg: &KnowledgeGraph, x: &str, c: &str) {
        kg.insert_triple(&Triple::new(x, vocab().type_of, c));
    }

    #[test]
    fn derives_transitive_supertypes() {
        let kg = KnowledgeGraph::new();
        sub(&kg, "father", "male");
        sub(&kg, "male", "person");
        typed(&kg, "tom", "father");

        let report = materialize(&kg, &vocab());

        assert!(is_a(&kg, "tom", "male"));
        assert!(is_a(&kg, "tom", "person"));
        assert_eq!(report.asserted, 1);
        assert_eq!(report.inserted, 2);
    }

    #[test]
    fn second_run_adds_nothing() {
        let kg = KnowledgeGraph::new();
        sub(&kg, "father", "male");
        sub(&kg, "male", "person");
        typed(&kg, "tom", "father");

        materialize(&kg, &vocab());
        let before = kg.triple_count();
        let second = materialize(&kg, &vocab());

        assert_eq!(second.inserted, 0);
        assert!(second.derivations.is_empty());
        assert_eq!(kg.triple_count(), before);
    }

    #[test]
    fn cycle_terminates_and_closes_both_ways() {
        let kg = KnowledgeGraph::new();
        sub(&kg, "A", "B");
        sub(&kg, "B", "A");
        typed(&kg, "x", "A");
        typed(&kg, "y", "B");

        materialize(&kg, &vocab());

        assert!(is_a(&kg, "x", "A"));
        assert!(is_a(&kg, "x", "B"));
        assert!(is_a(&kg, "y", "A"));
        assert!(is_a(&kg, "y", "B"));
    }

    #[test]
    fn self_loop_terminates() {
        let kg = KnowledgeGraph::new();
        sub(&kg, "A", "A");
        sub(&kg, "A", "B");
        typed(&kg, "x", "A");

        let report = materialize(&kg, &vocab());
        assert!(is_a(&kg, "x", "B"));
        assert_eq!(report.inserted, 1);
    }

    #[test]
    fn diamond_hierarchy_inserts_each_ancestor_once() {
        let kg = KnowledgeGraph::new();
        sub(&kg, "mother", "female");
        sub(&kg, "mother", "parent");
        sub(&kg, "female", "person");
        sub(&kg, "parent", "person");
        typed(&kg, "eve", "mother");

        let report = materialize(&kg, &vocab());
        assert_eq!(report.inserted, 3);
        assert!(is_a(&kg, "eve", "person"));
    }

    #[test]
    fn derivation_chains_follow_subclass_edges() {
        let kg = KnowledgeGraph::new();
        sub(&kg, "father", "male");
        sub(&kg, "male", "person");
        typed(&kg, "tom", "father");

        let report = materialize(&kg, &vocab());
        let sc = vocab().sub_class_of;
        for d in &report.derivations {
            assert_eq!(d.chain.first(), Some(&Term::new("father")));
            assert_eq!(d.chain.last(), Some(&d.triple.object));
            for pair in d.chain.windows(2) {
                assert!(kg.contains(&Triple::new(pair[0].clone(), sc.clone(), pair[1].clone())));
            }
        }
        let person = report
            .derivations
            .iter()
            .find(|d| d.triple.object == Term::new("person"))
            .unwrap();
        assert_eq!(person.chain.len(), 3);
    }

    #[test]
    fn facts_without_hierarchy_are_untouched() {
        let kg = KnowledgeGraph::new();
        typed(&kg, "tom", "male");
        kg.insert_triple(&Triple::new("tom", "hasChild", "ann"));

        let report = materialize(&kg, &vocab());
        assert_eq!(report.inserted, 0);
        assert_eq!(kg.triple_count(), 2);
    }

    #[test]
    fn ancestors_are_cached_per_concept() {
        let kg = KnowledgeGraph::new();
        sub(&kg, "a", "b");
        sub(&kg, "b", "c");
        let mut h = Hierarchy::build(&kg, &vocab());
        let names: Vec<_> = h.ancestors(&Term::new("a")).iter().map(|(t, _)| t.clone()).collect();
        assert_eq!(names, vec![Term::new("b"), Term::new("c")]);
        assert!(h.ancestors(&Term::new("c")).is_empty());
        assert_eq!(h.closures.len(), 2);
    }
}

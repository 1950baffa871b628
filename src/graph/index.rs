//! In-memory knowledge graph with dual-indexing.
//!
//! Uses `petgraph` for subject/object adjacency and `DashMap` for fast lookups
//! by predicate. A `DashSet` of all triples enforces set semantics.

use std::sync::RwLock;

use dashmap::{DashMap, DashSet};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::term::Term;

use super::{FactStore, Triple, TriplePattern};

/// In-memory knowledge graph backed by petgraph with dual-indexing.
///
/// Lookups with a bound subject or object walk that node's edges; lookups
/// bound only on the predicate go through the predicate index.
pub struct KnowledgeGraph {
    /// The directed graph: nodes are terms, edges carry the predicate.
    graph: RwLock<DiGraph<Term, Term>>,
    /// Term → NodeIndex mapping for O(1) node lookups.
    node_index: DashMap<Term, NodeIndex>,
    /// Predicate index: predicate → list of (subject, object) pairs.
    predicate_index: DashMap<Term, Vec<(Term, Term)>>,
    /// Every stored triple.
    facts: DashSet<Triple>,
}

impl KnowledgeGraph {
    /// Create a new empty knowledge graph.
    pub fn new() -> Self {
        Self {
            graph: RwLock::new(DiGraph::new()),
            node_index: DashMap::new(),
            predicate_index: DashMap::new(),
            facts: DashSet::new(),
        }
    }

    /// Ensure a node exists for the given term, returning its NodeIndex.
    fn ensure_node(&self, term: &Term) -> NodeIndex {
        if let Some(idx) = self.node_index.get(term) {
            return *idx.value();
        }
        let mut graph = self.graph.write().expect("graph lock poisoned");
        // Double-check after acquiring write lock
        if let Some(idx) = self.node_index.get(term) {
            return *idx.value();
        }
        let idx = graph.add_node(term.clone());
        self.node_index.insert(term.clone(), idx);
        idx
    }

    /// Insert a triple into the graph.
    ///
    /// Creates nodes for subject and object if they don't exist. Returns `false`
    /// without touching the indexes when the triple is already present.
    pub fn insert_triple(&self, triple: &Triple) -> bool {
        if !self.facts.insert(triple.clone()) {
            return false;
        }

        let subj_idx = self.ensure_node(&triple.subject);
        let obj_idx = self.ensure_node(&triple.object);

        {
            let mut graph = self.graph.write().expect("graph lock poisoned");
            graph.add_edge(subj_idx, obj_idx, triple.predicate.clone());
        }

        self.predicate_index
            .entry(triple.predicate.clone())
            .or_default()
            .push((triple.subject.clone(), triple.object.clone()));

        true
    }

    /// Bulk-load triples. Returns the number of triples that were new.
    pub fn bulk_load(&self, triples: impl IntoIterator<Item = Triple>) -> usize {
        triples
            .into_iter()
            .filter(|t| self.insert_triple(t))
            .count()
    }

    /// Get all objects for a given subject and predicate.
    pub fn objects_of(&self, subject: &Term, predicate: &Term) -> Vec<Term> {
        self.triples_from(subject)
            .into_iter()
            .filter(|t| t.predicate == *predicate)
            .map(|t| t.object)
            .collect()
    }

    /// Get all subjects for a given predicate and object.
    pub fn subjects_of(&self, predicate: &Term, object: &Term) -> Vec<Term> {
        self.triples_to(object)
            .into_iter()
            .filter(|t| t.predicate == *predicate)
            .map(|t| t.subject)
            .collect()
    }

    /// Get all (subject, object) pairs for a predicate.
    pub fn triples_for_predicate(&self, predicate: &Term) -> Vec<(Term, Term)> {
        self.predicate_index
            .get(predicate)
            .map(|v| v.value().clone())
            .unwrap_or_default()
    }

    /// Get all triples where the given term appears as subject.
    pub fn triples_from(&self, subject: &Term) -> Vec<Triple> {
        self.edges(subject, Direction::Outgoing)
    }

    /// Get all triples where the given term appears as object (incoming edges).
    pub fn triples_to(&self, object: &Term) -> Vec<Triple> {
        self.edges(object, Direction::Incoming)
    }

    fn edges(&self, term: &Term, direction: Direction) -> Vec<Triple> {
        let idx = match self.node_index.get(term) {
            Some(idx) => *idx.value(),
            None => return vec![],
        };
        let graph = self.graph.read().expect("graph lock poisoned");

        graph
            .edges_directed(idx, direction)
            .filter_map(|e| {
                let subject = graph.node_weight(e.source())?.clone();
                let object = graph.node_weight(e.target())?.clone();
                Some(Triple {
                    subject,
                    predicate: e.weight().clone(),
                    object,
                })
            })
            .collect()
    }

    /// Check if a node exists.
    pub fn has_node(&self, term: &Term) -> bool {
        self.node_index.contains_key(term)
    }

    /// Number of nodes (distinct subjects and objects).
    pub fn node_count(&self) -> usize {
        self.node_index.len()
    }

    /// Number of triples.
    pub fn triple_count(&self) -> usize {
        self.facts.len()
    }

    /// Get all triples in the graph.
    pub fn all_triples(&self) -> Vec<Triple> {
        self.facts.iter().map(|t| t.key().clone()).collect()
    }
}

impl FactStore for KnowledgeGraph {
    fn triples(&self, pattern: TriplePattern<'_>) -> Vec<Triple> {
        let candidates = match (pattern.subject, pattern.predicate, pattern.object) {
            (Some(s), _, _) => self.triples_from(s),
            (None, _, Some(o)) => self.triples_to(o),
            (None, Some(p), None) => {
                return self
                    .triples_for_predicate(p)
                    .into_iter()
                    .map(|(subject, object)| Triple {
                        subject,
                        predicate: p.clone(),
                        object,
                    })
                    .collect();
            }
            (None, None, None) => return self.all_triples(),
        };
        candidates.into_iter().filter(|t| pattern.matches(t)).collect()
    }

    fn add(&self, triple: Triple) -> bool {
        self.insert_triple(&triple)
    }

    fn contains(&self, triple: &Triple) -> bool {
        self.facts.contains(triple)
    }

    fn len(&self) -> usize {
        self.triple_count()
    }
}

impl Default for KnowledgeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KnowledgeGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeGraph")
            .field("nodes", &self.node_count())
            .field("triples", &self.triple_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str, p: &str, o: &str) -> Triple {
        Triple::new(s, p, o)
    }

    #[test]
    fn insert_and_query() {
        let kg = KnowledgeGraph::new();
        kg.insert_triple(&t("sun", "is-a", "star"));

        assert!(kg.has_node(&Term::new("sun")));
        assert!(kg.has_node(&Term::new("star")));
        assert_eq!(kg.node_count(), 2);
        assert_eq!(kg.triple_count(), 1);

        let objects = kg.objects_of(&Term::new("sun"), &Term::new("is-a"));
        assert_eq!(objects, vec![Term::new("star")]);

        let subjects = kg.subjects_of(&Term::new("is-a"), &Term::new("star"));
        assert_eq!(subjects, vec![Term::new("sun")]);
    }

    #[test]
    fn duplicate_insert_is_noop() {
        let kg = KnowledgeGraph::new();
        assert!(kg.insert_triple(&t("a", "r", "b")));
        assert!(!kg.insert_triple(&t("a", "r", "b")));
        assert_eq!(kg.triple_count(), 1);
        assert_eq!(kg.triples_from(&Term::new("a")).len(), 1);
        assert_eq!(kg.triples_for_predicate(&Term::new("r")).len(), 1);
    }

    #[test]
    fn predicate_index() {
        let kg = KnowledgeGraph::new();
        kg.insert_triple(&t("a", "rel", "b"));
        kg.insert_triple(&t("a", "rel", "c"));

        let pairs = kg.triples_for_predicate(&Term::new("rel"));
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn pattern_lookup_every_shape() {
        let kg = KnowledgeGraph::new();
        kg.bulk_load([
            t("tom", "type", "father"),
            t("tom", "hasChild", "ann"),
            t("ann", "type", "female"),
            t("father", "subClassOf", "male"),
        ]);
        let tom = Term::new("tom");
        let ty = Term::new("type");
        let female = Term::new("female");

        assert_eq!(kg.triples(TriplePattern::new(Some(&tom), None, None)).len(), 2);
        assert_eq!(kg.triples(TriplePattern::new(Some(&tom), Some(&ty), None)).len(), 1);
        assert_eq!(kg.triples(TriplePattern::new(None, Some(&ty), None)).len(), 2);
        assert_eq!(kg.triples(TriplePattern::new(None, None, Some(&female))).len(), 1);
        assert_eq!(kg.triples(TriplePattern::default()).len(), 4);
        assert!(kg.contains(&t("ann", "type", "female")));
        assert!(!kg.contains(&t("ann", "type", "male")));
    }

    #[test]
    fn subject_and_object_projections() {
        let kg = KnowledgeGraph::new();
        kg.bulk_load([t("a", "type", "x"), t("b", "type", "x"), t("a", "type", "y")]);
        let ty = Term::new("type");

        let subjects = kg.subjects(Some(&ty), Some(&Term::new("x")));
        assert_eq!(subjects.len(), 2);
        let objects = kg.objects(Some(&Term::new("a")), Some(&ty));
        assert_eq!(objects.into_iter().collect::<Vec<_>>(), vec![Term::new("x"), Term::new("y")]);
    }

    #[test]
    fn empty_queries() {
        let kg = KnowledgeGraph::new();
        assert!(kg.objects_of(&Term::new("a"), &Term::new("r")).is_empty());
        assert!(kg.subjects_of(&Term::new("r"), &Term::new("b")).is_empty());
        assert!(kg.triples_from(&Term::new("a")).is_empty());
        assert!(kg.is_empty());
    }
}

//! Engine facade: top-level API for dl-eval.
//!
//! The `Engine` owns the fact store, the namespace used to resolve local names,
//! and the vocabulary. Opening a knowledge base loads it and materializes the
//! type closure before the handle is returned, so every query sees implied
//! facts. Callers that add base facts later re-run [`Engine::materialize`].

use std::collections::BTreeSet;
use std::path::Path;

use crate::config::EngineConfig;
use crate::error::DlResult;
use crate::eval::Evaluator;
use crate::expr::{self, Expression};
use crate::graph::index::KnowledgeGraph;
use crate::graph::{FactStore, Triple, rdf};
use crate::materialize::{self, MaterializeReport};
use crate::term::{Namespace, Term, Vocabulary};

/// The dl-eval reasoning engine.
///
/// Single-writer: materialization must finish before evaluations start, and no
/// other writer may mutate the store during an evaluation.
pub struct Engine {
    config: EngineConfig,
    vocab: Vocabulary,
    namespace: Namespace,
    knowledge_graph: KnowledgeGraph,
    derived: usize,
}

impl Engine {
    /// Create an engine over an empty fact store.
    pub fn new(config: EngineConfig) -> Self {
        let namespace = config.namespace().unwrap_or_default();
        Self {
            vocab: config.vocabulary(),
            namespace,
            config,
            knowledge_graph: KnowledgeGraph::new(),
            derived: 0,
        }
    }

    /// Load a knowledge base from an RDF file and return a ready-to-query engine.
    ///
    /// The namespace is the configured override, else the source's default prefix.
    pub fn open(path: &Path, config: EngineConfig) -> DlResult<Self> {
        let mut engine = Self::new(config);
        let summary = rdf::load_path(&engine.knowledge_graph, path)?;
        if engine.config.namespace.is_none()
            && let Some(ns) = summary.namespace
        {
            engine.namespace = ns;
        }
        tracing::info!(
            path = %path.display(),
            namespace = %engine.namespace,
            triples = engine.knowledge_graph.triple_count(),
            "opened knowledge base"
        );
        if engine.config.materialize_on_load {
            engine.materialize();
        }
        Ok(engine)
    }

    /// Add a base fact. Returns `false` if it was already present.
    pub fn add_triple(&self, triple: Triple) -> bool {
        self.knowledge_graph.add(triple)
    }

    /// Insert all type assertions implied by the subsumption hierarchy.
    pub fn materialize(&mut self) -> MaterializeReport {
        let report = materialize::materialize(&self.knowledge_graph, &self.vocab);
        self.derived += report.inserted;
        report
    }

    /// Parse an expression without evaluating it.
    pub fn parse(&self, expression: &str) -> DlResult<Expression> {
        Ok(expr::parse(expression)?)
    }

    /// Individuals satisfying `expression`.
    pub fn evaluate(&self, expression: &str) -> DlResult<BTreeSet<Term>> {
        Ok(self.evaluator().evaluate(expression)?)
    }

    /// Individuals satisfying a pre-parsed expression.
    pub fn evaluate_parsed(&self, expression: &Expression) -> BTreeSet<Term> {
        self.evaluator().evaluate_parsed(expression)
    }

    /// The current candidate individuals.
    pub fn individuals(&self) -> BTreeSet<Term> {
        self.evaluator().individuals()
    }

    /// Turn a local name into a full term using the engine's namespace.
    pub fn resolve(&self, local_name: &str) -> Term {
        self.namespace.resolve(local_name)
    }

    /// Write every fact, base and derived, as sorted N-Triples.
    pub fn export_ntriples(&self, writer: impl std::io::Write) -> std::io::Result<usize> {
        rdf::write_ntriples(&self.knowledge_graph, writer)
    }

    fn evaluator(&self) -> Evaluator<'_, KnowledgeGraph> {
        Evaluator::new(&self.knowledge_graph, &self.vocab, &self.namespace)
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn knowledge_graph(&self) -> &KnowledgeGraph {
        &self.knowledge_graph
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Summary of the engine state.
    pub fn info(&self) -> EngineInfo {
        EngineInfo {
            namespace: self.namespace.to_string(),
            node_count: self.knowledge_graph.node_count(),
            triple_count: self.knowledge_graph.triple_count(),
            derived_count: self.derived,
            individual_count: self.individuals().len(),
        }
    }
}

/// Summary information about the engine state.
#[derive(Debug, Clone, serde::Serialize)]
pub struct EngineInfo {
    pub namespace: String,
    pub node_count: usize,
    pub triple_count: usize,
    pub derived_count: usize,
    pub individual_count: usize,
}

impl std::fmt::Display for EngineInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "dl-eval engine info")?;
        writeln!(f, "  namespace:    {}", self.namespace)?;
        writeln!(f, "  nodes:        {}", self.node_count)?;
        writeln!(f, "  triples:      {}", self.triple_count)?;
        writeln!(f, "  derived:      {}", self.derived_count)?;
        writeln!(f, "  individuals:  {}", self.individual_count)?;
        Ok(())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("namespace", &self.namespace)
            .field("knowledge_graph", &self.knowledge_graph)
            .finish()
    }
}

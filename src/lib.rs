// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # dl-eval
//!
//! A small description-logic reasoner over a triple store.
//!
//! ## Architecture
//!
//! - **Fact store** (`graph`): petgraph-backed triple index behind the `FactStore` trait,
//!   loadable from RDF via oxigraph's parsers
//! - **Materializer** (`materialize`): closes type assertions under `rdfs:subClassOf`
//! - **Expressions** (`expr`): restricted DNF over `¬`, `⊓`, `⊔`, `∀R.C` and `∃R.C`
//! - **Evaluator** (`eval`): set-semantics evaluation against the materialized store
//!
//! ## Library usage
//!
//! ```no_run
//! use std::path::Path;
//! use dl_eval::config::EngineConfig;
//! use dl_eval::engine::Engine;
//!
//! let engine = Engine::open(Path::new("family.ttl"), EngineConfig::default()).unwrap();
//! for individual in engine.evaluate("male ⊓ ∃hasChild.female").unwrap() {
//!     println!("{individual}");
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod expr;
pub mod graph;
pub mod materialize;
pub mod term;

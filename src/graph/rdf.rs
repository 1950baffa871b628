//! Loading serialized RDF into a fact store, and exporting it again.
//!
//! Parsing is delegated to oxigraph's RDF parsers. Named nodes become terms by
//! their IRI; blank nodes and literals keep their N-Triples rendering so they
//! stay distinct from IRIs. Named graphs are flattened into one set of facts.

use std::io::{Read, Write};
use std::path::Path;

use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model::Term as RdfTerm;

use crate::error::{StoreError, StoreResult};
use crate::term::{Namespace, Term};

use super::{FactStore, Triple};

/// Outcome of loading a serialized graph.
#[derive(Debug, Clone)]
pub struct LoadSummary {
    /// Triples read from the source (including ones already present).
    pub parsed: usize,
    /// Triples that were new to the store.
    pub inserted: usize,
    /// The IRI bound to the default (`:`) prefix, if the source declared one.
    pub namespace: Option<Namespace>,
}

/// Pick an RDF syntax from a file extension.
pub fn format_for_path(path: &Path) -> StoreResult<RdfFormat> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| match ext.to_ascii_lowercase().as_str() {
            "ttl" => Some(RdfFormat::Turtle),
            "nt" => Some(RdfFormat::NTriples),
            "nq" => Some(RdfFormat::NQuads),
            "trig" => Some(RdfFormat::TriG),
            "rdf" | "owl" => Some(RdfFormat::RdfXml),
            "n3" => Some(RdfFormat::N3),
            _ => None,
        })
        .ok_or_else(|| StoreError::UnknownFormat {
            path: path.display().to_string(),
        })
}

/// Load an RDF file into `store`, picking the syntax from its extension.
pub fn load_path(store: &impl FactStore, path: &Path) -> StoreResult<LoadSummary> {
    let format = format_for_path(path)?;
    let file = std::fs::File::open(path).map_err(|e| StoreError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_reader(
        store,
        std::io::BufReader::new(file),
        format,
        &path.display().to_string(),
    )
}

/// Load RDF in the given syntax from any reader. `origin` names the source in errors.
pub fn load_reader(
    store: &impl FactStore,
    reader: impl Read,
    format: RdfFormat,
    origin: &str,
) -> StoreResult<LoadSummary> {
    let mut parser = RdfParser::from_format(format).for_reader(reader);
    let mut parsed = 0;
    let mut inserted = 0;

    for quad in parser.by_ref() {
        let quad = quad.map_err(|e| StoreError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        parsed += 1;
        let triple = Triple {
            subject: Term::from(strip_iri_brackets(quad.subject.to_string())),
            predicate: Term::new(quad.predicate.as_str()),
            object: object_term(quad.object),
        };
        if store.add(triple) {
            inserted += 1;
        }
    }

    // Prefixes are only complete once the whole document has been read.
    let namespace = parser
        .prefixes()
        .find(|(prefix, _)| prefix.is_empty())
        .map(|(_, iri)| Namespace::new(iri));

    if namespace.is_none() {
        tracing::warn!(source = origin, "no default prefix declared; local names resolve verbatim");
    }
    tracing::info!(source = origin, parsed, inserted, "loaded RDF source");

    Ok(LoadSummary {
        parsed,
        inserted,
        namespace,
    })
}

fn object_term(object: RdfTerm) -> Term {
    match object {
        RdfTerm::NamedNode(node) => Term::from(node.into_string()),
        other => Term::from(other.to_string()),
    }
}

fn strip_iri_brackets(rendered: String) -> String {
    match rendered.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        Some(iri) => iri.to_string(),
        None => rendered,
    }
}

/// Render a term in N-Triples position syntax.
fn ntriples_term(term: &Term) -> String {
    let s = term.as_str();
    if s.starts_with("_:") || s.starts_with('"') {
        s.to_string()
    } else {
        format!("<{s}>")
    }
}

/// Write every triple of `store` as sorted N-Triples. Returns the number of lines written.
pub fn write_ntriples(store: &impl FactStore, mut writer: impl Write) -> std::io::Result<usize> {
    let mut triples = store.triples(Default::default());
    triples.sort();
    for t in &triples {
        writeln!(
            writer,
            "{} {} {} .",
            ntriples_term(&t.subject),
            ntriples_term(&t.predicate),
            ntriples_term(&t.object)
        )?;
    }
    writer.flush()?;
    Ok(triples.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::index::KnowledgeGraph;

    const FAMILY: &str = r#"
@prefix : <http://example.org/family#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

:father rdfs:subClassOf :male .
:tom a :father ;
     :hasChild :ann .
:ann a :female ;
     :name "Ann" .
"#;

    #[test]
    fn loads_turtle_and_reports_default_prefix() {
        let kg = KnowledgeGraph::new();
        let summary = load_reader(&kg, FAMILY.as_bytes(), RdfFormat::Turtle, "family.ttl").unwrap();

        assert_eq!(summary.parsed, 5);
        assert_eq!(summary.inserted, 5);
        assert_eq!(
            summary.namespace,
            Some(Namespace::new("http://example.org/family#"))
        );
        assert!(kg.contains(&Triple::new(
            "http://example.org/family#tom",
            "http://example.org/family#hasChild",
            "http://example.org/family#ann",
        )));
        assert!(kg.contains(&Triple::new(
            "http://example.org/family#ann",
            "http://example.org/family#name",
            "\"Ann\"",
        )));
    }

    #[test]
    fn reload_inserts_nothing_new() {
        let kg = KnowledgeGraph::new();
        load_reader(&kg, FAMILY.as_bytes(), RdfFormat::Turtle, "family.ttl").unwrap();
        let again = load_reader(&kg, FAMILY.as_bytes(), RdfFormat::Turtle, "family.ttl").unwrap();
        assert_eq!(again.parsed, 5);
        assert_eq!(again.inserted, 0);
    }

    #[test]
    fn ntriples_have_no_namespace() {
        let kg = KnowledgeGraph::new();
        let nt = "<http://ex.org/a> <http://ex.org/r> <http://ex.org/b> .\n";
        let summary = load_reader(&kg, nt.as_bytes(), RdfFormat::NTriples, "a.nt").unwrap();
        assert_eq!(summary.inserted, 1);
        assert!(summary.namespace.is_none());
    }

    #[test]
    fn syntax_errors_surface_as_parse_errors() {
        let kg = KnowledgeGraph::new();
        let err = load_reader(&kg, ":a :b".as_bytes(), RdfFormat::Turtle, "bad.ttl").unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(format_for_path(Path::new("kb.ttl")).unwrap(), RdfFormat::Turtle);
        assert_eq!(format_for_path(Path::new("kb.nt")).unwrap(), RdfFormat::NTriples);
        assert_eq!(format_for_path(Path::new("kb.owl")).unwrap(), RdfFormat::RdfXml);
        assert!(matches!(
            format_for_path(Path::new("kb.docx")),
            Err(StoreError::UnknownFormat { .. })
        ));
        for unlisted in ["kb.txt", "kb.xml", "kb"] {
            assert!(
                matches!(
                    format_for_path(Path::new(unlisted)),
                    Err(StoreError::UnknownFormat { .. })
                ),
                "{unlisted} should not map to an RDF syntax"
            );
        }
        assert_eq!(format_for_path(Path::new("KB.TTL")).unwrap(), RdfFormat::Turtle);
    }

    #[test]
    fn export_is_sorted_ntriples() {
        let kg = KnowledgeGraph::new();
        kg.insert_triple(&Triple::new("http://ex.org/b", "http://ex.org/r", "\"x\""));
        kg.insert_triple(&Triple::new("http://ex.org/a", "http://ex.org/r", "_:b0"));

        let mut out = Vec::new();
        let written = write_ntriples(&kg, &mut out).unwrap();
        assert_eq!(written, 2);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "<http://ex.org/a> <http://ex.org/r> _:b0 .\n<http://ex.org/b> <http://ex.org/r> \"x\" .\n"
        );
    }
}

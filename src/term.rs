//! Terms, namespaces, and the well-known RDF/RDFS/OWL vocabulary.
//!
//! A [`Term`] is an opaque identifier (usually an IRI) naming a concept, a role,
//! or an individual. Two terms are equal iff their identifiers are equal.
//! Terms are reference-counted so cloning them into result sets is cheap.

use std::sync::Arc;

use oxigraph::model::vocab::{rdf, rdfs};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
const OWL_DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";

/// Opaque identifier for a concept, role, or individual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term(Arc<str>);

impl Term {
    /// Create a term from its full identifier.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// The full identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after the last `#` or `/`, or the whole identifier if neither occurs.
    pub fn local_name(&self) -> &str {
        match self.0.rfind(['#', '/']) {
            Some(idx) if idx + 1 < self.0.len() => &self.0[idx + 1..],
            _ => &self.0,
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Term {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Term {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl Serialize for Term {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Term {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Term::from)
    }
}

/// Base namespace used to turn local names from expressions into full terms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace(String);

impl Namespace {
    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into())
    }

    /// Concatenate the base namespace with a local name.
    pub fn resolve(&self, local_name: &str) -> Term {
        Term::from(format!("{}{local_name}", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The distinguished relations and marker concepts the reasoner relies on.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// `rdf:type`: type assertions.
    pub type_of: Term,
    /// `rdfs:subClassOf`: subsumption edges.
    pub sub_class_of: Term,
    /// Concepts whose instances are classes (`rdfs:Class`, `owl:Class`).
    pub class_markers: Vec<Term>,
    /// Concepts whose instances are roles (`rdf:Property`, ...).
    pub property_markers: Vec<Term>,
}

impl Vocabulary {
    /// Build a vocabulary with custom class and property markers.
    pub fn with_markers(class_markers: Vec<Term>, property_markers: Vec<Term>) -> Self {
        Self {
            type_of: Term::new(rdf::TYPE.as_str()),
            sub_class_of: Term::new(rdfs::SUB_CLASS_OF.as_str()),
            class_markers,
            property_markers,
        }
    }

    pub fn default_class_markers() -> Vec<Term> {
        vec![Term::new(rdfs::CLASS.as_str()), Term::new(OWL_CLASS)]
    }

    pub fn default_property_markers() -> Vec<Term> {
        vec![
            Term::new(rdf::PROPERTY.as_str()),
            Term::new(OWL_OBJECT_PROPERTY),
            Term::new(OWL_DATATYPE_PROPERTY),
        ]
    }

    /// Whether `concept` marks its instances as classes or roles.
    pub fn is_marker(&self, concept: &Term) -> bool {
        self.class_markers.contains(concept) || self.property_markers.contains(concept)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::with_markers(
            Self::default_class_markers(),
            Self::default_property_markers(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_compare_by_identifier() {
        assert_eq!(Term::new("http://ex.org/a"), Term::from("http://ex.org/a".to_string()));
        assert_ne!(Term::new("http://ex.org/a"), Term::new("http://ex.org/A"));
    }

    #[test]
    fn namespace_resolve_concatenates() {
        let ns = Namespace::new("http://example.org/family#");
        assert_eq!(ns.resolve("male").as_str(), "http://example.org/family#male");
        assert_eq!(Namespace::default().resolve("male").as_str(), "male");
    }

    #[test]
    fn local_name_after_hash_or_slash() {
        assert_eq!(Term::new("http://example.org/family#male").local_name(), "male");
        assert_eq!(Term::new("http://example.org/people/tom").local_name(), "tom");
        assert_eq!(Term::new("tom").local_name(), "tom");
        assert_eq!(Term::new("http://example.org/").local_name(), "http://example.org/");
    }

    #[test]
    fn default_vocabulary_uses_w3c_iris() {
        let vocab = Vocabulary::default();
        assert_eq!(
            vocab.type_of.as_str(),
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type"
        );
        assert_eq!(
            vocab.sub_class_of.as_str(),
            "http://www.w3.org/2000/01/rdf-schema#subClassOf"
        );
        assert!(vocab.is_marker(&Term::new("http://www.w3.org/2000/01/rdf-schema#Class")));
        assert!(vocab.is_marker(&Term::new(OWL_CLASS)));
        assert!(vocab.is_marker(&Term::new(
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property"
        )));
        assert!(!vocab.is_marker(&Term::new("http://example.org/family#male")));
    }

    #[test]
    fn term_serializes_as_string() {
        let json = serde_json::to_string(&Term::new("http://ex.org/a")).unwrap();
        assert_eq!(json, "\"http://ex.org/a\"");
        let back: Term = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Term::new("http://ex.org/a"));
    }
}

//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! namespace = "http://example.org/family#"
//! materialize_on_load = true
//! class_markers = ["http://www.w3.org/2000/01/rdf-schema#Class"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::term::{Namespace, Term, Vocabulary};

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Configuration for the dl-eval engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base namespace for resolving names in expressions. Overrides the default
    /// prefix declared by a loaded source.
    pub namespace: Option<String>,
    /// Run materialization as part of `Engine::open`.
    pub materialize_on_load: bool,
    /// Concepts whose instances are classes and therefore not individuals.
    pub class_markers: Vec<String>,
    /// Concepts whose instances are roles and therefore not individuals.
    pub property_markers: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let iris = |terms: Vec<Term>| -> Vec<String> {
            terms.iter().map(|t| t.as_str().to_string()).collect()
        };
        Self {
            namespace: None,
            materialize_on_load: true,
            class_markers: iris(Vocabulary::default_class_markers()),
            property_markers: iris(Vocabulary::default_property_markers()),
        }
    }
}

impl EngineConfig {
    /// The vocabulary described by the configured markers.
    pub fn vocabulary(&self) -> Vocabulary {
        let terms = |iris: &[String]| -> Vec<Term> { iris.iter().map(Term::new).collect() };
        Vocabulary::with_markers(terms(&self.class_markers), terms(&self.property_markers))
    }

    /// The configured namespace override, if any.
    pub fn namespace(&self) -> Option<Namespace> {
        self.namespace.as_deref().map(Namespace::new)
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}

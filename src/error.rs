//! Rich diagnostic error types for the dl-eval engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so users know exactly what
//! went wrong and how to fix it.
//!
//! Unknown concept, role, or individual names are not errors: they simply match
//! nothing. Cycles in the subsumption hierarchy are not errors either.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the dl-eval engine.
#[derive(Debug, Error, Diagnostic)]
pub enum DlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Expr(#[from] ExprError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Expression errors
// ---------------------------------------------------------------------------

/// A concept expression that does not conform to the restricted DNF grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ExprError {
    #[error("malformed expression: expression is empty")]
    #[diagnostic(
        code(dl::expr::empty),
        help("Supply at least one concept, e.g. `person` or `male ⊓ ∃hasChild.female`.")
    )]
    Empty,

    #[error("malformed expression: empty operand around '{operator}' in \"{expression}\"")]
    #[diagnostic(
        code(dl::expr::empty_segment),
        help(
            "Every '⊔' and '⊓' needs a literal on both sides. \
             Remove the dangling operator or fill in the missing concept."
        )
    )]
    EmptySegment { operator: char, expression: String },

    #[error("malformed expression: restriction \"{token}\" has {parts} dot-separated part(s), expected 2")]
    #[diagnostic(
        code(dl::expr::malformed_restriction),
        help("Role restrictions take the form `∀role.Concept` or `∃role.Concept` with exactly one '.'.")
    )]
    MalformedRestriction { token: String, parts: usize },

    #[error("malformed expression: nested operator in \"{token}\"")]
    #[diagnostic(
        code(dl::expr::nested_operator),
        help(
            "Negation and role restrictions only apply to atomic concepts. \
             Forms like `¬∀R.A`, `∃R.¬A` or `¬¬A` are not part of the restricted grammar."
        )
    )]
    NestedOperator { token: String },

    #[error("malformed expression: invalid identifier \"{token}\"")]
    #[diagnostic(
        code(dl::expr::invalid_identifier),
        help(
            "Names must be non-empty and may not contain '¬', '∀', '∃', '⊓' or '⊔'. \
             Inside a role restriction the only '.' is the one separating role and concept."
        )
    )]
    InvalidIdentifier { token: String },
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    #[diagnostic(
        code(dl::store::io),
        help("Check that the file exists and is readable (or that the output location is writable).")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot infer RDF syntax of {path}")]
    #[diagnostic(
        code(dl::store::unknown_format),
        help("Use one of the extensions .ttl, .nt, .nq, .trig, .rdf, .owl or .n3.")
    )]
    UnknownFormat { path: String },

    #[error("RDF parse error in {path}: {message}")]
    #[diagnostic(
        code(dl::store::parse),
        help("The knowledge base could not be parsed. Validate it with an RDF linter.")
    )]
    Parse { path: String, message: String },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    #[diagnostic(code(dl::config::read), help("Check that the config file exists and is readable."))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config {path}: {source}")]
    #[diagnostic(code(dl::config::write), help("Check that the target directory is writable."))]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    #[diagnostic(
        code(dl::config::parse),
        help("The config must be TOML with optional keys `namespace`, `materialize_on_load`, `class_markers` and `property_markers`.")
    )]
    Parse { path: String, message: String },

    #[error("failed to serialize config for {path}: {message}")]
    #[diagnostic(code(dl::config::serialize))]
    Serialize { path: String, message: String },
}

/// Result type for expression parsing.
pub type ExprResult<T> = std::result::Result<T, ExprError>;

/// Result type for fact store loading and export.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Convenience alias for functions returning dl-eval results.
pub type DlResult<T> = std::result::Result<T, DlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expr_error_converts_to_dl_error() {
        let err = ExprError::NestedOperator {
            token: "¬¬A".into(),
        };
        let dl: DlError = err.into();
        assert!(matches!(dl, DlError::Expr(ExprError::NestedOperator { .. })));
    }

    #[test]
    fn store_error_converts_to_dl_error() {
        let err = StoreError::UnknownFormat {
            path: "kb.xyz".into(),
        };
        let dl: DlError = err.into();
        assert!(matches!(dl, DlError::Store(StoreError::UnknownFormat { .. })));
    }

    #[test]
    fn config_serialize_error_is_not_a_parse_error() {
        let err = ConfigError::Serialize {
            path: "dl-eval.toml".into(),
            message: "unsupported type".into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("failed to serialize config"));
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("dl::config::serialize")
        );
    }

    #[test]
    fn error_display_names_offending_token() {
        let err = ExprError::MalformedRestriction {
            token: "∀R.A.B".into(),
            parts: 3,
        };
        let msg = format!("{err}");
        assert!(msg.contains("∀R.A.B"));
        assert!(msg.contains('3'));
    }
}

//! Error types for template operations

use oxigraph::model::IriParseError;
use oxigraph::sparql::QueryEvaluationError;
use oxigraph::store::{LoaderError, StorageError};
use thiserror::Error;

/// Result type alias for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Main error type for the graph and query templates
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The template was used before a store was configured
    #[error("No store configured")]
    MissingStore,

    /// A subject, predicate or resource object was not a valid IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    /// The query string could not be parsed
    #[error("Query syntax error: {0}")]
    Syntax(String),

    /// The query engine failed while evaluating
    #[error("Query evaluation error: {0}")]
    Evaluation(String),

    /// Store error
    #[error("Store error: {0}")]
    Storage(String),

    /// RDF data could not be loaded into a store
    #[error("Load error: {0}")]
    Loader(String),

    /// The query produced a different result form than the operation expects
    #[error("Unexpected query results: expected {0}")]
    UnexpectedResults(&'static str),

    /// A caller-supplied row mapper failed
    #[error("Row mapping error: {0}")]
    Mapping(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(String),
}

impl TemplateError {
    /// Wraps any displayable failure raised inside a row mapper.
    pub fn mapping(err: impl std::fmt::Display) -> Self {
        TemplateError::Mapping(err.to_string())
    }
}

impl From<IriParseError> for TemplateError {
    fn from(err: IriParseError) -> Self {
        TemplateError::InvalidIri(err.to_string())
    }
}

impl From<QueryEvaluationError> for TemplateError {
    fn from(err: QueryEvaluationError) -> Self {
        TemplateError::Evaluation(err.to_string())
    }
}

impl From<StorageError> for TemplateError {
    fn from(err: StorageError) -> Self {
        TemplateError::Storage(err.to_string())
    }
}

impl From<LoaderError> for TemplateError {
    fn from(err: LoaderError) -> Self {
        TemplateError::Loader(err.to_string())
    }
}

impl From<std::io::Error> for TemplateError {
    fn from(err: std::io::Error) -> Self {
        TemplateError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TemplateError::Syntax("unexpected token".to_string());
        assert_eq!(err.to_string(), "Query syntax error: unexpected token");
    }

    #[test]
    fn test_missing_store_display() {
        assert_eq!(TemplateError::MissingStore.to_string(), "No store configured");
    }

    #[test]
    fn test_storage_error_conversion() {
        let err: TemplateError = StorageError::Other("disk gone".into()).into();
        assert!(matches!(err, TemplateError::Storage(_)));
        assert!(err.to_string().contains("disk gone"));
    }

    #[test]
    fn test_mapping_helper() {
        let parse_err = "abc".parse::<i32>().unwrap_err();
        let err = TemplateError::mapping(parse_err);
        assert!(err.to_string().starts_with("Row mapping error:"));
    }
}

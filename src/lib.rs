//! # RDF Template
//!
//! Template helpers that take the repetitive calls out of working with an
//! [Oxigraph](https://crates.io/crates/oxigraph) RDF store, in the spirit of a
//! JDBC-style template: the caller supplies a store handle and a query or a
//! triple, the template does the conversion, execution and cleanup.
//!
//! ## Features
//!
//! - [`GraphTemplate`]: add, remove, connect and check triples by IRI string
//! - [`QueryTemplate`]: run SELECT/CONSTRUCT queries and map each row with a closure
//! - Dates stored as UTC `xsd:dateTime` literals, so the same instant always
//!   serializes the same way
//!
//! ## Example
//!
//! ```rust
//! use oxigraph::store::Store;
//! use rdf_template::{GraphTemplate, QueryTemplate, Result};
//!
//! fn example() -> Result<()> {
//!     let store = Store::new()?;
//!     let graph = GraphTemplate::with_store(store.clone());
//!     let query = QueryTemplate::with_store(store);
//!
//!     graph.add("urn:something", "urn:test", "testval")?;
//!     let names = query.select_list("SELECT ?z WHERE { ?x ?y ?z }", |row, _| {
//!         Ok(row.get("z").map(ToString::to_string))
//!     })?;
//!     assert_eq!(names.map(|n| n.len()), Some(1));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::new_without_default)]

/// Term conversion helpers
pub mod core;

pub mod error;

/// Module for triple mutation
pub mod graph;

/// Module for SPARQL query execution
pub mod querying;

// Re-export commonly used types
pub use error::{Result, TemplateError};
pub use graph::graph_template::GraphTemplate;
pub use querying::query_template::QueryTemplate;
pub use querying::value::Value;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_start_without_store() {
        assert!(GraphTemplate::new().store().is_none());
        assert!(QueryTemplate::new().store().is_none());
    }

    #[test]
    fn test_missing_store_fails_fast() {
        let graph = GraphTemplate::new();
        let graph_ops: Vec<(&str, Result<()>)> = vec![
            ("len", graph.len().map(drop)),
            ("is_empty", graph.is_empty().map(drop)),
            ("exists_subject", graph.exists_subject("urn:a").map(drop)),
            (
                "exists_subject_predicate",
                graph.exists_subject_predicate("urn:a", "urn:p").map(drop),
            ),
            ("exists_triple", graph.exists_triple("urn:a", "urn:p", "v").map(drop)),
            ("exists", graph.exists(Some("urn:a"), Some("urn:p"), Some("v")).map(drop)),
            ("add", graph.add("urn:a", "urn:p", "v")),
            ("set_singleton", graph.set_singleton("urn:a", "urn:p", "v")),
            ("remove_resource", graph.remove_resource("urn:a")),
            ("remove_property", graph.remove_property("urn:a", "urn:p")),
            ("remove_property_value", graph.remove_property_value("urn:a", "urn:p", "v")),
            ("connect", graph.connect("urn:a", "urn:p", "urn:b")),
            ("disconnect", graph.disconnect("urn:a", "urn:p", "urn:b")),
        ];

        let query = QueryTemplate::new();
        let all = "SELECT ?x ?y ?z WHERE { ?x ?y ?z }";
        let query_ops: Vec<(&str, Result<()>)> = vec![
            ("select_list", query.select_list(all, |_, _| Ok(())).map(drop)),
            ("select_one", query.select_one(all, |_, _| Ok(())).map(drop)),
            (
                "select_map",
                query
                    .select_map(all, |_, _| Ok(std::collections::HashMap::<String, String>::new()))
                    .map(drop),
            ),
            ("construct", query.construct("CONSTRUCT { ?x ?y ?z } WHERE { ?x ?y ?z }").map(drop)),
            ("select_generic_map", query.select_generic_map(all).map(drop)),
            ("select_single_generic_map", query.select_single_generic_map(all).map(drop)),
            ("select_string_map", query.select_string_map(all).map(drop)),
            ("select_string", query.select_string(all).map(drop)),
            ("debug_to", query.debug_to(&mut Vec::new())),
        ];

        for (name, result) in graph_ops.into_iter().chain(query_ops) {
            assert!(
                matches!(result, Err(TemplateError::MissingStore)),
                "{} should fail with MissingStore, got {:?}",
                name,
                result
            );
        }
    }
}

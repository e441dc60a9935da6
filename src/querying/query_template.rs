//! SPARQL query template over an Oxigraph store.
//!
//! `QueryTemplate` removes the parse/bind/execute/iterate boilerplate of running a
//! SPARQL query with Oxigraph. Callers hand it a query string and a row mapper and
//! get back a list, a single value or a merged map.
//!
//! # Example
//!
//! ```
//! use oxigraph::model::{GraphName, Literal, NamedNode, Quad};
//! use oxigraph::store::Store;
//! use rdf_template::QueryTemplate;
//!
//! let store = Store::new().unwrap();
//! store
//!     .insert(&Quad::new(
//!         NamedNode::new("urn:something").unwrap(),
//!         NamedNode::new("urn:test").unwrap(),
//!         Literal::new_simple_literal("testval"),
//!         GraphName::DefaultGraph,
//!     ))
//!     .unwrap();
//!
//! let template = QueryTemplate::with_store(store);
//! let value = template.select_string("SELECT ?z WHERE { <urn:something> ?y ?z }").unwrap();
//! assert_eq!(value.as_deref(), Some("testval"));
//! ```

use crate::core::terms::render_term;
use crate::error::{Result, TemplateError};
use crate::querying::formatter::ResultTable;
use crate::querying::value::Value;
use log::{debug, trace};
use oxigraph::model::GraphName;
use oxigraph::sparql::{QueryResults, QuerySolution, SparqlEvaluator};
use oxigraph::store::Store;
use std::collections::HashMap;
use std::hash::Hash;
use std::io::Write;

type SolutionRows<'a> = dyn Iterator<Item = Result<QuerySolution>> + 'a;

/// Query run by [`QueryTemplate::debug`].
pub const DEBUG_QUERY: &str = "SELECT ?x ?y ?z WHERE { ?x ?y ?z }";

/// Executes SELECT and CONSTRUCT queries against a shared store.
#[derive(Clone, Default)]
pub struct QueryTemplate {
    store: Option<Store>,
}

impl QueryTemplate {
    /// Creates a template with no store; set one with [`set_store`](Self::set_store).
    pub fn new() -> Self {
        Self { store: None }
    }

    pub fn with_store(store: Store) -> Self {
        Self { store: Some(store) }
    }

    /// The store being queried, if one was set.
    pub fn store(&self) -> Option<&Store> {
        self.store.as_ref()
    }

    pub fn set_store(&mut self, store: Store) {
        self.store = Some(store);
    }

    fn handle(&self) -> Result<&Store> {
        self.store.as_ref().ok_or(TemplateError::MissingStore)
    }

    /// Parses `query`, runs it on the store and passes the results to `handle`.
    ///
    /// The results, and any iterator they hold, are dropped before this returns.
    fn run<R>(&self, query: &str, handle: impl FnOnce(QueryResults) -> Result<R>) -> Result<R> {
        let store = self.handle()?;
        debug!("Executing query: {}", query);
        let prepared = SparqlEvaluator::new()
            .parse_query(query)
            .map_err(|e| TemplateError::Syntax(e.to_string()))?;
        match prepared.on_store(store).execute() {
            Ok(results) => handle(results),
            Err(e) => Err(e.into()),
        }
    }

    /// Runs a SELECT query and hands its solution stream to `consume`.
    ///
    /// The stream is dropped when `consume` returns, whether it finished the
    /// iteration, stopped early or failed.
    fn with_solutions<R>(
        &self,
        query: &str,
        consume: impl FnOnce(&[String], &mut SolutionRows<'_>) -> Result<R>,
    ) -> Result<R> {
        self.run(query, |results| match results {
            QueryResults::Solutions(solutions) => {
                let variables: Vec<String> =
                    solutions.variables().iter().map(|v| v.as_str().to_owned()).collect();
                let mut rows = solutions.map(|row| row.map_err(TemplateError::from));
                consume(&variables, &mut rows)
            }
            QueryResults::Boolean(_) | QueryResults::Graph(_) => {
                Err(TemplateError::UnexpectedResults("SELECT solutions"))
            }
        })
    }

    /// Maps every solution of a SELECT query, in result order.
    ///
    /// Returns `None` for an empty query string. Once the query runs the result is
    /// always `Some`, possibly empty.
    pub fn select_list<T, F>(&self, query: &str, mut mapper: F) -> Result<Option<Vec<T>>>
    where
        F: FnMut(&QuerySolution, usize) -> Result<T>,
    {
        if query.is_empty() {
            return Ok(None);
        }
        self.with_solutions(query, |_, rows| {
            let mut list = Vec::new();
            for (index, row) in rows.enumerate() {
                list.push(mapper(&row?, index)?);
            }
            trace!("Mapped {} rows", list.len());
            Ok(Some(list))
        })
    }

    /// Maps only the first solution. `None` for an empty query or no solutions.
    pub fn select_one<T, F>(&self, query: &str, mut mapper: F) -> Result<Option<T>>
    where
        F: FnMut(&QuerySolution, usize) -> Result<T>,
    {
        if query.is_empty() {
            return Ok(None);
        }
        self.with_solutions(query, |_, rows| match rows.next() {
            Some(row) => mapper(&row?, 0).map(Some),
            None => Ok(None),
        })
    }

    /// Merges the partial map produced for each solution into one map.
    ///
    /// Later rows overwrite earlier ones on key collisions.
    pub fn select_map<K, V, F>(&self, query: &str, mut mapper: F) -> Result<HashMap<K, V>>
    where
        K: Eq + Hash,
        F: FnMut(&QuerySolution, usize) -> Result<HashMap<K, V>>,
    {
        self.with_solutions(query, |_, rows| {
            let mut merged = HashMap::new();
            for (index, row) in rows.enumerate() {
                merged.extend(mapper(&row?, index)?);
            }
            Ok(merged)
        })
    }

    /// Runs a CONSTRUCT query into a new in-memory store.
    ///
    /// The held store is only read.
    pub fn construct(&self, query: &str) -> Result<Store> {
        self.run(query, |results| match results {
            QueryResults::Graph(triples) => {
                let graph = Store::new()?;
                for triple in triples {
                    graph.insert(&triple?.in_graph(GraphName::DefaultGraph))?;
                }
                trace!("Constructed {} triples", graph.len()?);
                Ok(graph)
            }
            QueryResults::Solutions(_) | QueryResults::Boolean(_) => {
                Err(TemplateError::UnexpectedResults("CONSTRUCT triples"))
            }
        })
    }

    /// One map per solution from variable name to its native [`Value`].
    pub fn select_generic_map(&self, query: &str) -> Result<Option<Vec<HashMap<String, Value>>>> {
        self.select_list(query, generic_row)
    }

    /// The generic map of the first solution only.
    pub fn select_single_generic_map(
        &self,
        query: &str,
    ) -> Result<Option<HashMap<String, Value>>> {
        self.select_one(query, generic_row)
    }

    /// Collapses all solutions into one map from variable name to rendered value.
    ///
    /// A variable bound in several rows keeps the value of the last row.
    pub fn select_string_map(&self, query: &str) -> Result<Option<HashMap<String, String>>> {
        if query.is_empty() {
            return Ok(None);
        }
        self.with_solutions(query, |_, rows| {
            let mut result = HashMap::new();
            for row in rows {
                for (variable, term) in row?.iter() {
                    result.insert(variable.as_str().to_owned(), render_term(term));
                }
            }
            Ok(Some(result))
        })
    }

    /// The rendered value of the last bound variable of the last solution.
    ///
    /// Meant for single-row, single-variable queries.
    pub fn select_string(&self, query: &str) -> Result<Option<String>> {
        if query.is_empty() {
            return Ok(None);
        }
        self.with_solutions(query, |_, rows| {
            let mut result = None;
            for row in rows {
                for (_, term) in row?.iter() {
                    result = Some(render_term(term));
                }
            }
            Ok(result)
        })
    }

    /// Writes every triple of the store as a table to standard error.
    pub fn debug(&self) -> Result<()> {
        let stderr = std::io::stderr();
        self.debug_to(&mut stderr.lock())
    }

    /// Writes every triple of the store as a table to `out`.
    pub fn debug_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let table = self.with_solutions(DEBUG_QUERY, |variables, rows| {
            let mut table = ResultTable::new(variables.to_vec());
            for row in rows {
                let row = row?;
                let cells = variables
                    .iter()
                    .map(|v| row.get(v.as_str()).map(ToString::to_string).unwrap_or_default())
                    .collect();
                table.push_row(cells);
            }
            Ok(table)
        })?;
        table.write_to(out)?;
        Ok(())
    }
}

fn generic_row(row: &QuerySolution, _index: usize) -> Result<HashMap<String, Value>> {
    Ok(row
        .iter()
        .map(|(variable, term)| (variable.as_str().to_owned(), Value::from(term)))
        .collect())
}

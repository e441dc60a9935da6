//! SPARQL query template, native result values and debug output

pub mod formatter;
pub mod query_template;
pub mod value;

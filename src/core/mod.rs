//! Core term handling shared by the graph and query templates

pub mod terms;
pub use terms::*;

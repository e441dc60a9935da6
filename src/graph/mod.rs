//! Graph mutation template

pub mod graph_template;

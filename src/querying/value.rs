//! Native values of bound query terms.
//!
//! The generic-map operations of [`QueryTemplate`](crate::QueryTemplate) unwrap
//! literals to a native value and keep resources as their string form.

use chrono::{DateTime, FixedOffset};
use oxigraph::model::vocab::{rdf, xsd};
use oxigraph::model::{Literal, Term};
use serde::Serialize;

/// A bound term converted to a native Rust value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// IRI or blank node, as a string
    Resource(String),
    /// Plain, `xsd:string` or language-tagged literal
    String(String),
    Boolean(bool),
    /// `xsd:integer` and the integer types derived from it
    Integer(i64),
    /// `xsd:double` or `xsd:float`
    Double(f64),
    /// `xsd:decimal`, kept lexical to avoid losing precision
    Decimal(String),
    /// Timezoned `xsd:dateTime`
    DateTime(DateTime<FixedOffset>),
    /// Any other datatype, or a lexical form that did not parse
    Typed { lexical: String, datatype: String },
}

impl Value {
    /// The string payload for resources and string literals.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Resource(s) | Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_resource(&self) -> bool {
        matches!(self, Value::Resource(_))
    }
}

impl From<&Term> for Value {
    fn from(term: &Term) -> Self {
        match term {
            Term::NamedNode(node) => Value::Resource(node.as_str().to_owned()),
            Term::BlankNode(node) => Value::Resource(node.to_string()),
            Term::Literal(literal) => Value::from(literal),
            #[allow(unreachable_patterns)]
            other => Value::Resource(other.to_string()),
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        let lexical = literal.value();
        let datatype = literal.datatype();

        let parsed = if datatype == xsd::STRING || datatype == rdf::LANG_STRING {
            Some(Value::String(lexical.to_owned()))
        } else if datatype == xsd::BOOLEAN {
            match lexical {
                "true" | "1" => Some(Value::Boolean(true)),
                "false" | "0" => Some(Value::Boolean(false)),
                _ => None,
            }
        } else if is_integer_type(datatype.as_str()) {
            lexical.trim_start_matches('+').parse().ok().map(Value::Integer)
        } else if datatype == xsd::DOUBLE || datatype == xsd::FLOAT {
            parse_xsd_double(lexical).map(Value::Double)
        } else if datatype == xsd::DECIMAL {
            Some(Value::Decimal(lexical.to_owned()))
        } else if datatype == xsd::DATE_TIME {
            DateTime::parse_from_rfc3339(lexical).ok().map(Value::DateTime)
        } else {
            None
        };

        parsed.unwrap_or_else(|| Value::Typed {
            lexical: lexical.to_owned(),
            datatype: datatype.as_str().to_owned(),
        })
    }
}

const INTEGER_TYPES: [&str; 13] = [
    "integer",
    "long",
    "int",
    "short",
    "byte",
    "nonNegativeInteger",
    "nonPositiveInteger",
    "negativeInteger",
    "positiveInteger",
    "unsignedLong",
    "unsignedInt",
    "unsignedShort",
    "unsignedByte",
];

fn is_integer_type(datatype: &str) -> bool {
    datatype
        .strip_prefix("http://www.w3.org/2001/XMLSchema#")
        .is_some_and(|local| INTEGER_TYPES.contains(&local))
}

fn parse_xsd_double(lexical: &str) -> Option<f64> {
    match lexical {
        "INF" | "+INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        _ => lexical.parse().ok(),
    }
}

//! Conversions between plain strings and Oxigraph terms.
//!
//! Both templates accept subjects, predicates and objects as strings. This module
//! turns those strings into IRIs and literals, builds the UTC `xsd:dateTime`
//! literals used for dates, and renders bound terms back to strings.

use chrono::{DateTime, TimeZone, Utc};
use oxigraph::model::vocab::xsd;
use oxigraph::model::{Literal, NamedNode, Term};

use crate::error::Result;

/// Parses an IRI, failing with `TemplateError::InvalidIri`.
pub fn named_node(iri: &str) -> Result<NamedNode> {
    Ok(NamedNode::new(iri)?)
}

/// Builds an untyped literal.
pub fn plain_literal(value: &str) -> Literal {
    Literal::new_simple_literal(value)
}

/// Canonical `xsd:dateTime` lexical form of a date once normalized to UTC.
///
/// The instant is truncated to milliseconds and written with a `Z` suffix. A zero
/// fraction is dropped and trailing zeros are trimmed, matching what the store
/// hands back for a stored `xsd:dateTime`.
pub fn utc_lexical<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    let utc = date.with_timezone(&Utc);
    let seconds = utc.format("%Y-%m-%dT%H:%M:%S");
    match utc.timestamp_subsec_millis() % 1000 {
        0 => format!("{}Z", seconds),
        millis => {
            let fraction = format!("{:03}", millis);
            format!("{}.{}Z", seconds, fraction.trim_end_matches('0'))
        }
    }
}

/// Builds an `xsd:dateTime` literal from a date normalized to UTC.
pub fn utc_date_literal<Tz: TimeZone>(date: &DateTime<Tz>) -> Literal {
    Literal::new_typed_literal(utc_lexical(date), xsd::DATE_TIME)
}

/// Renders a bound term as a plain string.
///
/// IRIs come out bare, simple literals as their lexical form, language literals
/// as `value@lang` and other typed literals as `value^^datatype`.
pub fn render_term(term: &Term) -> String {
    match term {
        Term::NamedNode(node) => node.as_str().to_owned(),
        Term::BlankNode(node) => node.to_string(),
        Term::Literal(literal) => render_literal(literal),
        #[allow(unreachable_patterns)]
        other => other.to_string(),
    }
}

fn render_literal(literal: &Literal) -> String {
    if let Some(language) = literal.language() {
        return format!("{}@{}", literal.value(), language);
    }
    let datatype = literal.datatype();
    if datatype == xsd::STRING {
        literal.value().to_owned()
    } else {
        format!("{}^^{}", literal.value(), datatype.as_str())
    }
}

//! Triple-level mutation and existence checks over an Oxigraph store.
//!
//! Subjects, predicates and resource objects are passed as IRI strings. Every
//! operation works on the store's default graph and is visible immediately; there
//! is no batching.

use crate::core::terms::{named_node, plain_literal, utc_date_literal, utc_lexical};
use crate::error::{Result, TemplateError};
use chrono::{DateTime, TimeZone};
use log::debug;
use oxigraph::model::{GraphName, GraphNameRef, NamedNode, NamedNodeRef, Quad, Term, TermRef};
use oxigraph::store::Store;

/// Adds, removes and checks triples on a shared store.
///
/// # Example
///
/// ```
/// use oxigraph::store::Store;
/// use rdf_template::GraphTemplate;
///
/// let template = GraphTemplate::with_store(Store::new().unwrap());
/// template.add("http://example.org/alice", "http://example.org/name", "Alice").unwrap();
/// assert!(template
///     .exists_triple("http://example.org/alice", "http://example.org/name", "Alice")
///     .unwrap());
/// ```
#[derive(Clone, Default)]
pub struct GraphTemplate {
    store: Option<Store>,
}

impl GraphTemplate {
    /// Creates a template with no store; set one with [`set_store`](Self::set_store).
    pub fn new() -> Self {
        Self { store: None }
    }

    pub fn with_store(store: Store) -> Self {
        Self { store: Some(store) }
    }

    pub fn store(&self) -> Option<&Store> {
        self.store.as_ref()
    }

    pub fn set_store(&mut self, store: Store) {
        self.store = Some(store);
    }

    fn handle(&self) -> Result<&Store> {
        self.store.as_ref().ok_or(TemplateError::MissingStore)
    }

    /// Number of triples in the default graph.
    pub fn len(&self) -> Result<usize> {
        self.matching(None, None, None)?.try_fold(0, |count, quad| quad.map(|_| count + 1))
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(!self.any_match(None, None, None)?)
    }

    fn matching<'a>(
        &'a self,
        subject: Option<NamedNodeRef<'a>>,
        predicate: Option<NamedNodeRef<'a>>,
        object: Option<TermRef<'a>>,
    ) -> Result<impl Iterator<Item = Result<Quad>> + 'a> {
        let quads = self.handle()?.quads_for_pattern(
            subject.map(Into::into),
            predicate,
            object,
            Some(GraphNameRef::DefaultGraph),
        );
        Ok(quads.map(|quad| quad.map_err(TemplateError::from)))
    }

    fn any_match(
        &self,
        subject: Option<NamedNodeRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
    ) -> Result<bool> {
        match self.matching(subject, predicate, object)?.next() {
            Some(quad) => quad.map(|_| true),
            None => Ok(false),
        }
    }

    fn remove_matching(
        &self,
        subject: Option<NamedNodeRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
    ) -> Result<usize> {
        let quads = self.matching(subject, predicate, object)?.collect::<Result<Vec<_>>>()?;
        let store = self.handle()?;
        for quad in &quads {
            store.remove(quad)?;
        }
        Ok(quads.len())
    }

    fn insert(
        &self,
        subject: NamedNode,
        predicate: NamedNode,
        object: impl Into<Term>,
    ) -> Result<()> {
        let quad = Quad::new(subject, predicate, object, GraphName::DefaultGraph);
        debug!("Inserting {}", quad);
        self.handle()?.insert(&quad)?;
        Ok(())
    }

    fn contains(&self, subject: &NamedNode, predicate: &NamedNode, object: Term) -> Result<bool> {
        let quad = Quad::new(subject.clone(), predicate.clone(), object, GraphName::DefaultGraph);
        Ok(self.handle()?.contains(&quad)?)
    }

    /// Whether `subject` occurs as the subject or the object of any triple.
    pub fn exists_subject(&self, subject: &str) -> Result<bool> {
        let subject = named_node(subject)?;
        if self.any_match(Some(subject.as_ref()), None, None)? {
            return Ok(true);
        }
        self.any_match(None, None, Some(subject.as_ref().into()))
    }

    /// Whether any triple links `subject` through `predicate`, whatever its object.
    pub fn exists_subject_predicate(&self, subject: &str, predicate: &str) -> Result<bool> {
        let subject = named_node(subject)?;
        let predicate = named_node(predicate)?;
        self.any_match(Some(subject.as_ref()), Some(predicate.as_ref()), None)
    }

    /// Whether the triple exists with `object` read either as a plain literal or,
    /// when it is a valid IRI, as a resource.
    pub fn exists_triple(&self, subject: &str, predicate: &str, object: &str) -> Result<bool> {
        let subject = named_node(subject)?;
        let predicate = named_node(predicate)?;
        if self.contains(&subject, &predicate, plain_literal(object).into())? {
            return Ok(true);
        }
        match NamedNode::new(object) {
            Ok(resource) => self.contains(&subject, &predicate, resource.into()),
            Err(_) => Ok(false),
        }
    }

    /// Positional existence check.
    ///
    /// No subject is always `false`. A missing predicate narrows the check to the
    /// subject alone, even when an object is given; a missing object checks the
    /// subject and predicate only.
    pub fn exists(
        &self,
        subject: Option<&str>,
        predicate: Option<&str>,
        object: Option<&str>,
    ) -> Result<bool> {
        match (subject, predicate, object) {
            (None, _, _) => Ok(false),
            (Some(s), Some(p), Some(o)) => self.exists_triple(s, p, o),
            (Some(s), Some(p), None) => self.exists_subject_predicate(s, p),
            (Some(s), None, _) => self.exists_subject(s),
        }
    }

    /// Adds a triple with a plain literal object.
    pub fn add(&self, subject: &str, predicate: &str, value: &str) -> Result<()> {
        self.insert(named_node(subject)?, named_node(predicate)?, plain_literal(value))
    }

    /// Adds a triple whose object is `date` as a UTC `xsd:dateTime` literal.
    pub fn add_date<Tz: TimeZone>(
        &self,
        subject: &str,
        predicate: &str,
        date: &DateTime<Tz>,
    ) -> Result<()> {
        self.insert(named_node(subject)?, named_node(predicate)?, utc_date_literal(date))
    }

    /// Links two already parsed resources.
    pub fn add_uri(
        &self,
        subject: NamedNodeRef<'_>,
        predicate: &str,
        object: NamedNodeRef<'_>,
    ) -> Result<()> {
        self.insert(subject.into_owned(), named_node(predicate)?, object.into_owned())
    }

    /// Links the resource named by `subject` to an already parsed resource.
    pub fn add_resource(
        &self,
        subject: &str,
        predicate: &str,
        object: NamedNodeRef<'_>,
    ) -> Result<()> {
        self.insert(named_node(subject)?, named_node(predicate)?, object.into_owned())
    }

    /// Replaces every value of `predicate` on `subject` with one plain literal.
    pub fn set_singleton(&self, subject: &str, predicate: &str, value: &str) -> Result<()> {
        debug!("Setting {} of {} to \"{}\"", predicate, subject, value);
        self.remove_property(subject, predicate)?;
        self.add(subject, predicate, value)
    }

    /// Replaces every value of `predicate` on `subject` with one UTC date.
    pub fn set_singleton_date<Tz: TimeZone>(
        &self,
        subject: &str,
        predicate: &str,
        date: &DateTime<Tz>,
    ) -> Result<()> {
        debug!("Setting {} of {} to {}", predicate, subject, utc_lexical(date));
        self.remove_property(subject, predicate)?;
        self.add_date(subject, predicate, date)
    }

    /// Removes every triple whose subject is `uri`.
    pub fn remove_resource(&self, uri: &str) -> Result<()> {
        let subject = named_node(uri)?;
        let removed = self.remove_matching(Some(subject.as_ref()), None, None)?;
        debug!("Removed {} triples of {}", removed, uri);
        Ok(())
    }

    /// Removes every (uri, predicate, *) triple.
    pub fn remove_property(&self, uri: &str, predicate: &str) -> Result<()> {
        let subject = named_node(uri)?;
        let predicate = named_node(predicate)?;
        let removed =
            self.remove_matching(Some(subject.as_ref()), Some(predicate.as_ref()), None)?;
        debug!("Removed {} values of {} on {}", removed, predicate, subject);
        Ok(())
    }

    /// Removes the single triple (uri, predicate, "value").
    pub fn remove_property_value(&self, uri: &str, predicate: &str, value: &str) -> Result<()> {
        let quad = Quad::new(
            named_node(uri)?,
            named_node(predicate)?,
            plain_literal(value),
            GraphName::DefaultGraph,
        );
        debug!("Removing {}", quad);
        self.handle()?.remove(&quad)?;
        Ok(())
    }

    /// Links two resources named by IRI strings.
    pub fn connect(&self, subject: &str, predicate: &str, object: &str) -> Result<()> {
        self.insert(named_node(subject)?, named_node(predicate)?, named_node(object)?)
    }

    /// Removes the resource-to-resource triple added by [`connect`](Self::connect).
    pub fn disconnect(&self, subject: &str, predicate: &str, object: &str) -> Result<()> {
        let quad = Quad::new(
            named_node(subject)?,
            named_node(predicate)?,
            named_node(object)?,
            GraphName::DefaultGraph,
        );
        debug!("Removing {}", quad);
        self.handle()?.remove(&quad)?;
        Ok(())
    }
}

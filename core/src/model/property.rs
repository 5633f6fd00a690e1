//! Supported properties: plain IRI references and `hydra:Link` properties.

use serde_json::{json, Map, Value};
use url::Url;

use super::collection::Manages;
use super::operation::HydraOperation;
use crate::namespace::Namespace;

/// A navigable link property with its own id, domain, range and operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydraLink {
    /// Link id.
    pub id: String,
    /// Link title.
    pub title: String,
    /// Link description.
    pub description: String,
    /// Domain class IRI.
    pub domain: String,
    /// Range class IRI.
    pub range: String,
    /// What the linked collection contains; set only on EntryPoint
    /// collection links.
    pub manages: Option<Manages>,
    /// Operations available through the link.
    pub supported_operation: Vec<HydraOperation>,
}

impl HydraLink {
    /// Creates a link. Absolute ids are canonicalized, anything else is
    /// placed under the namespace.
    pub fn new(
        namespace: &Namespace,
        id: &str,
        title: impl Into<String>,
        description: impl Into<String>,
        domain: impl Into<String>,
        range: impl Into<String>,
    ) -> Self {
        let id = if Url::parse(id).is_ok() {
            namespace.check_namespace(id)
        } else {
            namespace.resource(id)
        };
        Self {
            id,
            title: title.into(),
            description: description.into(),
            domain: domain.into(),
            range: range.into(),
            manages: None,
            supported_operation: Vec::new(),
        }
    }

    /// Adds a supported operation.
    pub fn add_supported_op(&mut self, op: HydraOperation) {
        self.supported_operation.push(op);
    }

    /// Renders the link.
    #[must_use]
    pub fn generate(&self) -> Value {
        let mut link = json!({
            "@id": self.id,
            "@type": "hydra:Link",
            "title": self.title,
            "description": self.description,
            "range": self.range,
            "domain": self.domain,
            "supportedOperation": self
                .supported_operation
                .iter()
                .map(HydraOperation::generate)
                .collect::<Vec<_>>(),
        });
        if let Some(manages) = &self.manages {
            link["manages"] = manages.to_json();
        }
        link
    }
}

/// What a supported property points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// A plain property IRI.
    Plain(String),
    /// A link property.
    Link(HydraLink),
}

impl From<String> for PropertyValue {
    fn from(iri: String) -> Self {
        PropertyValue::Plain(iri)
    }
}

impl From<&str> for PropertyValue {
    fn from(iri: &str) -> Self {
        PropertyValue::Plain(iri.to_owned())
    }
}

impl From<HydraLink> for PropertyValue {
    fn from(link: HydraLink) -> Self {
        PropertyValue::Link(link)
    }
}

/// A `supportedProperty` entry of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydraClassProp {
    /// The referenced property.
    pub value: PropertyValue,
    /// Property title.
    pub title: String,
    /// Whether clients may read it.
    pub readable: bool,
    /// Whether clients may write it.
    pub writeable: bool,
    /// Whether it must be supplied.
    pub required: bool,
    /// Description; omitted from the rendering when empty.
    pub description: String,
}

impl HydraClassProp {
    /// Creates a property without a description.
    pub fn new(
        value: impl Into<PropertyValue>,
        title: impl Into<String>,
        readable: bool,
        writeable: bool,
        required: bool,
    ) -> Self {
        Self {
            value: value.into(),
            title: title.into(),
            readable,
            writeable,
            required,
            description: String::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The property IRI, or the link id for link properties.
    #[must_use]
    pub fn iri(&self) -> &str {
        match &self.value {
            PropertyValue::Plain(iri) => iri,
            PropertyValue::Link(link) => &link.id,
        }
    }

    /// Returns the link, if this is a link property.
    #[must_use]
    pub fn as_link(&self) -> Option<&HydraLink> {
        match &self.value {
            PropertyValue::Link(link) => Some(link),
            PropertyValue::Plain(_) => None,
        }
    }

    /// Renders the property.
    #[must_use]
    pub fn generate(&self) -> Value {
        let mut prop = Map::new();
        prop.insert("@type".to_owned(), json!("SupportedProperty"));
        prop.insert("title".to_owned(), json!(self.title));
        prop.insert("required".to_owned(), json!(self.required));
        prop.insert("readable".to_owned(), json!(self.readable));
        prop.insert("writeable".to_owned(), json!(self.writeable));
        let property = match &self.value {
            PropertyValue::Plain(iri) => json!(iri),
            PropertyValue::Link(link) => link.generate(),
        };
        prop.insert("property".to_owned(), property);
        if !self.description.is_empty() {
            prop.insert("description".to_owned(), json!(self.description));
        }
        Value::Object(prop)
    }
}

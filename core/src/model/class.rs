//! Supported classes.

use serde_json::{json, Value};

use super::operation::HydraOperation;
use super::property::HydraClassProp;
use crate::namespace::Namespace;

/// A `supportedClass` of the API Documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydraClass {
    /// Canonical id.
    pub id: String,
    /// Class title.
    pub title: String,
    /// Class description; the base classes have none.
    pub description: Option<String>,
    /// Serving path; defaults to the title.
    pub path: String,
    /// Whether the class is reachable from the EntryPoint.
    pub endpoint: bool,
    /// Supported properties, in declaration order.
    pub supported_property: Vec<HydraClassProp>,
    /// Supported operations, in declaration order.
    pub supported_operation: Vec<HydraOperation>,
    /// Parent class IRI (`subClassOf`).
    pub parent: Option<String>,
}

impl HydraClass {
    /// Creates a non-endpoint class with id `<namespace><title>`.
    pub fn new(namespace: &Namespace, title: &str, description: impl Into<String>) -> Self {
        Self {
            id: namespace.resource(title),
            title: title.to_owned(),
            description: Some(description.into()),
            path: title.to_owned(),
            endpoint: false,
            supported_property: Vec::new(),
            supported_operation: Vec::new(),
            parent: None,
        }
    }

    /// Creates a description-less class with an explicit id (used for the
    /// `hydra:Resource` and `hydra:Collection` base classes).
    pub fn base(id: impl Into<String>, title: &str) -> Self {
        Self {
            id: id.into(),
            title: title.to_owned(),
            description: None,
            path: title.to_owned(),
            endpoint: false,
            supported_property: Vec::new(),
            supported_operation: Vec::new(),
            parent: None,
        }
    }

    /// Replaces the id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Replaces the path; an empty path keeps the title.
    #[must_use]
    pub fn with_path(mut self, path: &str) -> Self {
        if !path.is_empty() {
            self.path = path.to_owned();
        }
        self
    }

    /// Marks the class as an endpoint (or not).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: bool) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Sets the parent class.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Adds a supported property.
    pub fn add_supported_prop(&mut self, prop: HydraClassProp) {
        self.supported_property.push(prop);
    }

    /// Adds a supported operation.
    pub fn add_supported_op(&mut self, op: HydraOperation) {
        self.supported_operation.push(op);
    }

    /// Renders the class. Empty property and operation lists render as empty
    /// arrays.
    #[must_use]
    pub fn generate(&self) -> Value {
        let mut class = json!({
            "@id": self.id,
            "@type": "hydra:Class",
            "title": self.title,
            "description": self.description,
            "supportedProperty": self
                .supported_property
                .iter()
                .map(HydraClassProp::generate)
                .collect::<Vec<_>>(),
            "supportedOperation": self
                .supported_operation
                .iter()
                .map(HydraOperation::generate)
                .collect::<Vec<_>>(),
        });
        if let Some(parent) = &self.parent {
            class["subClassOf"] = json!(parent);
        }
        class
    }
}

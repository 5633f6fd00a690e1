//! IRI templates (`hydra:IriTemplate`) for parameterized resource lookups,
//! such as the target of a `search` link.

use serde_json::{json, Value};

use crate::namespace::Namespace;

/// How template variables are serialized into the expanded IRI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VariableRepresentation {
    /// Values are inserted as their lexical form.
    #[default]
    Basic,
    /// Values keep their datatype or language annotation.
    Explicit,
}

impl VariableRepresentation {
    /// Returns the rendered compact IRI.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            VariableRepresentation::Basic => "hydra:BasicRepresentation",
            VariableRepresentation::Explicit => "hydra:ExplicitRepresentation",
        }
    }
}

/// Binds one template variable to a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IriTemplateMapping {
    /// Variable name as written in the template.
    pub variable: String,
    /// IRI of the property the variable stands for.
    pub property: String,
    /// Whether a value must be supplied.
    pub required: bool,
}

impl IriTemplateMapping {
    /// Creates a mapping.
    pub fn new(variable: impl Into<String>, property: impl Into<String>, required: bool) -> Self {
        Self {
            variable: variable.into(),
            property: property.into(),
            required,
        }
    }

    /// Renders the mapping.
    #[must_use]
    pub fn generate(&self) -> Value {
        json!({
            "@type": "hydra:IriTemplateMapping",
            "hydra:variable": self.variable,
            "hydra:property": self.property,
            "hydra:required": self.required,
        })
    }
}

/// A URI template together with its variable mappings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydraIriTemplate {
    /// Template text, rooted at the server (e.g. `/api/Drone{?name}`).
    pub template: String,
    /// Variable mappings, in template order.
    pub mapping: Vec<IriTemplateMapping>,
    /// Variable representation.
    pub representation: VariableRepresentation,
}

impl HydraIriTemplate {
    /// Creates a template using the basic representation.
    pub fn new(template: impl Into<String>, mapping: Vec<IriTemplateMapping>) -> Self {
        Self {
            template: template.into(),
            mapping,
            representation: VariableRepresentation::Basic,
        }
    }

    /// Replaces the variable representation.
    #[must_use]
    pub fn with_representation(mut self, representation: VariableRepresentation) -> Self {
        self.representation = representation;
        self
    }

    /// Renders the template. The template text is appended to the server
    /// root of `namespace`: its base with the API name and the documentation
    /// segment removed.
    #[must_use]
    pub fn generate(&self, namespace: &Namespace) -> Value {
        json!({
            "@type": "hydra:IriTemplate",
            "hydra:template": format!("{}{}", server_root(namespace), self.template),
            "hydra:variableRepresentation": self.representation.as_str(),
            "hydra:mapping": self
                .mapping
                .iter()
                .map(IriTemplateMapping::generate)
                .collect::<Vec<_>>(),
        })
    }
}

/// `http://hydrus.com/test_api/vocab?resource=` becomes `http://hydrus.com`.
fn server_root(namespace: &Namespace) -> &str {
    namespace
        .base()
        .rsplitn(3, '/')
        .last()
        .unwrap_or_else(|| namespace.base())
}

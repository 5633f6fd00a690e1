//! Supported operations and the method → action-type table.

use std::fmt;
use std::str::FromStr;

use serde_json::{json, Map, Value};

use super::iris::{ADD_ACTION, DELETE_ACTION, FIND_ACTION, UPDATE_ACTION};
use super::status::HydraStatus;
use crate::error::HydraError;
use crate::namespace::NULL_SENTINEL;

/// HTTP method of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`.
    Get,
    /// `PUT`.
    Put,
    /// `POST`.
    Post,
    /// `DELETE`.
    Delete,
}

impl Method {
    /// Returns the wire name of the method.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }

    /// Returns the schema.org action type rendered as the operation `@type`.
    ///
    /// The table is fixed: PUT adds and POST updates.
    #[must_use]
    pub fn action_type(self) -> &'static str {
        match self {
            Method::Get => FIND_ACTION,
            Method::Put => ADD_ACTION,
            Method::Post => UPDATE_ACTION,
            Method::Delete => DELETE_ACTION,
        }
    }
}

impl FromStr for Method {
    type Err = HydraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::Get),
            "PUT" => Ok(Method::Put),
            "POST" => Ok(Method::Post),
            "DELETE" => Ok(Method::Delete),
            other => Err(HydraError::UnsupportedMethod(other.to_owned())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `expects` / `returns` type of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeRef {
    /// No request or response body.
    #[default]
    Null,
    /// A class IRI.
    Iri(String),
}

impl TypeRef {
    /// Wraps an IRI; the `"null"` sentinel maps to [`TypeRef::Null`].
    pub fn from_iri(iri: impl Into<String>) -> Self {
        let iri = iri.into();
        if iri == NULL_SENTINEL {
            TypeRef::Null
        } else {
            TypeRef::Iri(iri)
        }
    }

    /// Returns the IRI, if any.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            TypeRef::Null => None,
            TypeRef::Iri(iri) => Some(iri),
        }
    }

    /// Renders as a JSON string, or JSON `null` for [`TypeRef::Null`].
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            TypeRef::Null => Value::Null,
            TypeRef::Iri(iri) => json!(iri),
        }
    }
}

impl From<Option<String>> for TypeRef {
    fn from(iri: Option<String>) -> Self {
        iri.map_or(TypeRef::Null, TypeRef::from_iri)
    }
}

/// A supported operation.
///
/// Class operations carry a title; collection and EntryPoint operations carry
/// an id and a description instead. Optional fields are rendered only when
/// present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydraOperation {
    /// Blank-node id (`_:name_verb`), if any.
    pub id: Option<String>,
    /// Operation title.
    pub title: Option<String>,
    /// Operation description.
    pub description: Option<String>,
    /// Label shown on EntryPoint operations.
    pub label: Option<String>,
    /// HTTP method.
    pub method: Method,
    /// Request body type.
    pub expects: TypeRef,
    /// Response body type.
    pub returns: TypeRef,
    /// Expected request headers.
    pub expects_header: Vec<String>,
    /// Returned response headers.
    pub returns_header: Vec<String>,
    /// Documented outcomes.
    pub possible_status: Vec<HydraStatus>,
    /// Explicit `@type`, overriding the action type derived from the method.
    pub type_override: Option<String>,
}

impl HydraOperation {
    /// Creates a titled class operation.
    pub fn new(
        title: impl Into<String>,
        method: Method,
        expects: TypeRef,
        returns: TypeRef,
    ) -> Self {
        Self {
            id: None,
            title: Some(title.into()),
            description: None,
            label: None,
            method,
            expects,
            returns,
            expects_header: Vec::new(),
            returns_header: Vec::new(),
            possible_status: Vec::new(),
            type_override: None,
        }
    }

    /// Creates an operation identified by a blank-node id and described
    /// rather than titled.
    pub fn described(
        id: impl Into<String>,
        method: Method,
        description: impl Into<String>,
        expects: TypeRef,
        returns: TypeRef,
    ) -> Self {
        Self {
            id: Some(id.into()),
            title: None,
            description: Some(description.into()),
            ..Self::new(String::new(), method, expects, returns)
        }
    }

    /// Sets the header lists.
    #[must_use]
    pub fn with_headers(mut self, expects: Vec<String>, returns: Vec<String>) -> Self {
        self.expects_header = expects;
        self.returns_header = returns;
        self
    }

    /// Sets the documented outcomes.
    #[must_use]
    pub fn with_status(mut self, possible_status: Vec<HydraStatus>) -> Self {
        self.possible_status = possible_status;
        self
    }

    /// Overrides the rendered `@type`.
    #[must_use]
    pub fn with_type(mut self, type_: impl Into<String>) -> Self {
        self.type_override = Some(type_.into());
        self
    }

    /// The rendered `@type`: the override if set, otherwise the action type.
    #[must_use]
    pub fn action_type(&self) -> &str {
        self.type_override
            .as_deref()
            .unwrap_or_else(|| self.method.action_type())
    }

    /// The copy of a class operation listed on an EntryPoint link: id and
    /// label come from the title.
    #[must_use]
    pub fn for_entrypoint_class(&self) -> Self {
        Self {
            id: self.title.as_ref().map(|t| t.to_lowercase()),
            title: None,
            description: None,
            label: self.title.clone(),
            ..self.clone()
        }
    }

    /// The copy of a collection operation listed on an EntryPoint link.
    #[must_use]
    pub fn for_entrypoint_collection(&self) -> Self {
        Self {
            id: self.id.as_ref().map(|id| id.to_lowercase()),
            ..self.clone()
        }
    }

    /// Renders the operation.
    #[must_use]
    pub fn generate(&self) -> Value {
        let mut op = Map::new();
        if let Some(id) = &self.id {
            op.insert("@id".to_owned(), json!(id));
        }
        op.insert("@type".to_owned(), json!(self.action_type()));
        if let Some(title) = &self.title {
            op.insert("title".to_owned(), json!(title));
        }
        op.insert("method".to_owned(), json!(self.method.as_str()));
        if let Some(description) = &self.description {
            op.insert("description".to_owned(), json!(description));
        }
        op.insert("expects".to_owned(), self.expects.to_json());
        op.insert("returns".to_owned(), self.returns.to_json());
        op.insert("expectsHeader".to_owned(), json!(self.expects_header));
        op.insert("returnsHeader".to_owned(), json!(self.returns_header));
        op.insert(
            "possibleStatus".to_owned(),
            Value::Array(self.possible_status.iter().map(HydraStatus::generate).collect()),
        );
        if let Some(label) = &self.label {
            op.insert("label".to_owned(), json!(label));
        }
        Value::Object(op)
    }
}

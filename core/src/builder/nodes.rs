//! Read access to expanded JSON-LD node objects.

use serde_json::{Map, Value};

use crate::error::{HydraError, Location, Result};
use crate::namespace::local_name;

/// Expands a Hydra core term to its full IRI.
macro_rules! hydra {
    ($term:literal) => {
        concat!("http://www.w3.org/ns/hydra/core#", $term)
    };
}
pub(crate) use hydra;

/// An expanded node object, tagged with what it is read as so that missing
/// keys are reported against the right location.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Node<'a> {
    map: &'a Map<String, Value>,
    location: Location,
}

impl<'a> Node<'a> {
    /// Wraps `value`, which must be a node object.
    pub(crate) fn new(value: &'a Value, location: Location) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self { map, location }),
            other => Err(HydraError::Expansion(format!(
                "expected a node object, found {other}"
            ))),
        }
    }

    pub(crate) fn location(&self) -> Location {
        self.location
    }

    pub(crate) fn id(&self) -> Option<&'a str> {
        self.map.get("@id").and_then(Value::as_str)
    }

    pub(crate) fn require_id(&self) -> Result<&'a str> {
        self.id()
            .ok_or_else(|| HydraError::missing(self.location, "@id"))
    }

    pub(crate) fn has(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub(crate) fn has_type(&self, iri: &str) -> bool {
        self.values("@type").iter().any(|t| t.as_str() == Some(iri))
    }

    /// All values under `key`; empty when absent.
    pub(crate) fn values(&self, key: &str) -> &'a [Value] {
        match self.map.get(key) {
            Some(Value::Array(values)) => values,
            Some(value) => std::slice::from_ref(value),
            None => &[],
        }
    }

    pub(crate) fn first(&self, key: &str) -> Option<&'a Value> {
        self.values(key).first()
    }

    /// The first value under `key`, reporting the key by its local name when
    /// absent.
    pub(crate) fn require(&self, key: &str) -> Result<&'a Value> {
        self.first(key)
            .ok_or_else(|| HydraError::missing(self.location, local_name(key)))
    }

    pub(crate) fn string(&self, key: &str) -> Option<String> {
        self.first(key).and_then(text)
    }

    pub(crate) fn require_string(&self, key: &str) -> Result<String> {
        let value = self.require(key)?;
        text(value).ok_or_else(|| HydraError::missing(self.location, local_name(key)))
    }

    /// Every value under `key` rendered as text, skipping non-textual ones.
    pub(crate) fn strings(&self, key: &str) -> Vec<String> {
        self.values(key).iter().filter_map(text).collect()
    }

    /// Child node objects under `key`, read as `location`.
    pub(crate) fn nodes(&self, key: &str, location: Location) -> impl Iterator<Item = Node<'a>> {
        self.values(key)
            .iter()
            .filter_map(move |value| match value {
                Value::Object(map) if !map.contains_key("@value") => Some(Node { map, location }),
                _ => None,
            })
    }

    /// Nested node under `key`, read as `location`.
    pub(crate) fn node(&self, key: &str, location: Location) -> Option<Node<'a>> {
        self.nodes(key, location).next()
    }
}

/// Text of an expanded value: the `@id` of a reference, the `@value` of a
/// literal, or a bare scalar.
pub(crate) fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(map) => map
            .get("@id")
            .or_else(|| map.get("@value"))
            .and_then(text),
        _ => None,
    }
}

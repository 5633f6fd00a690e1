//! Error types raised while building an API Documentation.
//!
//! Every failure is structural and deterministic: the build aborts on the
//! first error and no partial document is returned.

use std::fmt;

use thiserror::Error;

/// The kind of node on which a required key was expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// The top-level API Documentation node.
    Doc,
    /// A `supportedClass` node.
    Class,
    /// A `supportedProperty` node.
    Property,
    /// A property node typed `hydra:Link`.
    Link,
    /// A `supportedOperation` node.
    Operation,
    /// A `possibleStatus` node.
    Status,
    /// A class node carrying `manages`.
    Collection,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Location::Doc => "The API Documentation",
            Location::Class => "Class",
            Location::Property => "Property",
            Location::Link => "Link property",
            Location::Operation => "Operation",
            Location::Status => "Status",
            Location::Collection => "Collection",
        };
        f.write_str(label)
    }
}

/// Errors produced by the builder, the expander and the namespace resolver.
#[derive(Debug, Error)]
pub enum HydraError {
    /// A structurally required key is absent.
    #[error("{location} must have [{key}]")]
    MissingRequiredKey {
        /// Where the key was expected.
        location: Location,
        /// The missing key (local name, e.g. `title`).
        key: String,
    },

    /// A boolean-like field holds something other than `true`, `false` or `null`.
    #[error("literal not recognised: {0}")]
    InvalidLiteral(String),

    /// An operation method outside GET, PUT, POST and DELETE.
    #[error("unsupported method {0}: select one of GET, PUT, POST and DELETE")]
    UnsupportedMethod(String),

    /// No `supportedClass` id matches the EntryPoint pattern.
    #[error("no EntryPoint class found")]
    NoEntryPointFound,

    /// The JSON-LD expansion collaborator rejected the document.
    #[error("JSON-LD expansion failed: {0}")]
    Expansion(String),

    /// A base URL or IRI reference could not be parsed.
    #[error("invalid IRI {iri}: {source}")]
    InvalidIri {
        /// The offending IRI.
        iri: String,
        /// The underlying parse failure.
        source: url::ParseError,
    },
}

impl HydraError {
    pub(crate) fn missing(location: Location, key: impl Into<String>) -> Self {
        HydraError::MissingRequiredKey {
            location,
            key: key.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HydraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_names_location_and_key() {
        let err = HydraError::missing(Location::Doc, "@context");
        assert_eq!(
            err.to_string(),
            "The API Documentation must have [@context]"
        );
        let err = HydraError::missing(Location::Link, "range");
        assert_eq!(err.to_string(), "Link property must have [range]");
    }

    #[test]
    fn unsupported_method_message() {
        let err = HydraError::UnsupportedMethod("PATCH".to_owned());
        assert!(err.to_string().starts_with("unsupported method PATCH"));
    }
}

//! Core Hydra object model types.
//!
//! These types represent one API Documentation as typed Rust data. Every
//! entity renders itself to JSON-LD through a `generate()` method; rendering
//! never mutates the model. The top-level value is [`ApiDoc`].

pub mod class;
pub mod collection;
pub mod context;
pub mod document;
pub mod entrypoint;
pub mod iri_template;
pub mod operation;
pub mod property;
pub mod status;

pub use class::HydraClass;
pub use collection::{CollectionOps, HydraCollection, Manages};
pub use context::Context;
pub use document::{ApiDoc, ClassEntry, CollectionEntry};
pub use entrypoint::EntryPoint;
pub use iri_template::{HydraIriTemplate, IriTemplateMapping, VariableRepresentation};
pub use operation::{HydraOperation, Method, TypeRef};
pub use property::{HydraClassProp, HydraLink, PropertyValue};
pub use status::{HydraStatus, StatusKind};

/// Standard IRI constants used across the model and the builder.
pub mod iris {
    /// Hydra core namespace.
    pub const HYDRA: &str = "http://www.w3.org/ns/hydra/core#";
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDFS namespace.
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";

    /// `hydra:Resource`, the base of every class.
    pub const HYDRA_RESOURCE: &str = "http://www.w3.org/ns/hydra/core#Resource";
    /// `hydra:Collection`, the base of every collection.
    pub const HYDRA_COLLECTION: &str = "http://www.w3.org/ns/hydra/core#Collection";
    /// `hydra:member`.
    pub const HYDRA_MEMBER: &str = "http://www.w3.org/ns/hydra/core#member";
    /// `hydra:Link`.
    pub const HYDRA_LINK: &str = "http://www.w3.org/ns/hydra/core#Link";
    /// `hydra:Error`.
    pub const HYDRA_ERROR: &str = "http://www.w3.org/ns/hydra/core#Error";
    /// `rdfs:label`.
    pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    /// `rdfs:domain`.
    pub const RDFS_DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
    /// `rdfs:range`.
    pub const RDFS_RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
    /// `rdfs:subClassOf`.
    pub const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";

    /// External `@context` injected into every rendered status.
    pub const HYDRA_CORE_CONTEXT: &str =
        "https://raw.githubusercontent.com/HydraCG/Specifications/master/spec/latest/core/core.jsonld";

    /// `schema:object`, mapped in class-scoped contexts.
    pub const SCHEMA_OBJECT: &str = "http://schema.org/object";
    /// Action type of GET operations.
    pub const FIND_ACTION: &str = "http://schema.org/FindAction";
    /// Action type of PUT operations.
    pub const ADD_ACTION: &str = "http://schema.org/AddAction";
    /// Action type of POST operations.
    pub const UPDATE_ACTION: &str = "http://schema.org/UpdateAction";
    /// Action type of DELETE operations.
    pub const DELETE_ACTION: &str = "http://schema.org/DeleteAction";
}

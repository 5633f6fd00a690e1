//! Hydra API Documentation encoded as typed Rust data.
//!
//! The `hydra-doc` crate reads a compact JSON-LD API Documentation written
//! against the [Hydra](http://www.w3.org/ns/hydra/core) vocabulary, expands
//! it, rebuilds it as a typed object model under one canonical vocabulary
//! namespace, and regenerates a canonical JSON-LD document from that model.
//!
//! # Entry Point
//!
//! ```
//! use hydra_doc::{build, BuildOptions};
//! use serde_json::json;
//!
//! let compact = json!({
//!     "@context": {
//!         "hydra": "http://www.w3.org/ns/hydra/core#",
//!         "vocab": { "@id": "http://localhost:8080/api/vocab?resource=", "@prefix": true },
//!         "entrypoint": { "@id": "hydra:entrypoint", "@type": "@id" },
//!         "supportedClass": "hydra:supportedClass",
//!         "supportedProperty": "hydra:supportedProperty",
//!         "title": "hydra:title"
//!     },
//!     "@id": "http://localhost:8080/api/vocab",
//!     "@type": "hydra:ApiDocumentation",
//!     "entrypoint": "http://localhost:8080/api",
//!     "supportedClass": [
//!         { "@id": "vocab:EntryPoint", "title": "EntryPoint", "supportedProperty": [] }
//!     ]
//! });
//!
//! let doc = build(&compact, &BuildOptions::default()).expect("valid documentation");
//! assert_eq!(doc.namespace().base(), "http://localhost:8080/api/vocab?resource=");
//! let rendered = doc.generate();
//! assert_eq!(rendered["@type"], "ApiDocumentation");
//! ```
//!
//! # Renderings
//!
//! - [`ApiDoc::generate`] — the canonical API Documentation.
//! - [`EntryPoint::generate`] — the synthesized EntryPoint class.
//! - [`EntryPoint::get`] — the live EntryPoint object served to clients.
//! - [`Context::generate`] — the `@context` for one rendering scope.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod builder;
pub mod error;
pub mod expand;
pub mod model;
pub mod namespace;

pub use builder::{build, build_with, decode_literal, BuildOptions};
pub use error::{HydraError, Location, Result};
pub use expand::{Expander, JsonLdExpander};
pub use model::{
    ApiDoc, CollectionOps, Context, EntryPoint, HydraClass, HydraClassProp, HydraCollection,
    HydraIriTemplate, HydraLink, HydraOperation, HydraStatus, IriTemplateMapping, Manages, Method,
    PropertyValue, StatusKind, TypeRef, VariableRepresentation,
};
pub use namespace::Namespace;
